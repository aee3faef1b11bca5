//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference decoding per § 13.2.5.72 - § 13.2.5.80.
pub mod character_reference;
/// Parse error codes per § 13.2.2.
pub mod error;
mod helpers;
/// The input stream per § 13.2.3.5.
pub mod input;
/// The state machine and its pull and push drivers.
pub mod machine;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
mod states;
/// Token types produced by the tokenizer.
pub mod token;

pub use character_reference::{CharacterReference, decode_character_reference};
pub use error::{ParseError, ParseErrorKind};
pub use input::{InputCharacter, InputStream, MatchResult};
pub use machine::{ContentModel, HTMLTokenizer, Step, TokenizerConfig, TokenizerState};
pub use token::{Attribute, Token};
