//! State handlers, grouped by family.
//!
//! Every handler runs after the step loop has consumed
//! `current_input_character` (`None` for EOF), except the lookahead states
//! noted on [`super::machine::HTMLTokenizer::step`].

mod cdata;
mod comment;
mod doctype;
mod reference;
mod tag;
mod text;
