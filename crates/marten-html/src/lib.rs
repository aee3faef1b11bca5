//! HTML tokenizer for the Marten toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, PLAINTEXT and the script data escape states
//!   - Tag and attribute states
//!   - Comment, DOCTYPE and CDATA section states
//!   - Named and numeric character references
//!   - A pull driver over a complete document and a push driver for
//!     incremental input, both sharing one state machine
//!
//! - **Structural check** ([`structure`]): a coarse test for a DOCTYPE and a
//!   well ordered `html` root element, independent of the tokenizer.
//!
//! - **Fetch glue** ([`fetch`]): streams a document from a
//!   [`marten_common::Session`] straight into the push driver.
//!
//! # Not Yet Implemented
//!
//! - Tree construction
//! - Encoding sniffing (input is decoded as UTF-8)
//!
//! # Example
//!
//! ```
//! use marten_html::{Token, tokenize};
//!
//! let tokens = tokenize("<p>hi</p>");
//! assert!(tokens[0].is_start_tag_named("p"));
//! assert_eq!(tokens.last(), Some(&Token::EndOfInput));
//! ```

/// Streaming a fetched document into the tokenizer.
pub mod fetch;
/// Coarse structural check of raw markup.
pub mod structure;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use structure::{DocumentShape, is_valid_html_string};
pub use tokenizer::{
    Attribute, ContentModel, HTMLTokenizer, ParseError, ParseErrorKind, Step, Token, TokenizerConfig,
    TokenizerState,
};

/// Tokenize a complete document with the default configuration.
///
/// The returned sequence always ends with exactly one [`Token::EndOfInput`].
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}
