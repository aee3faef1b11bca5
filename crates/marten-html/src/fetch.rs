//! Feeding a fetched document to the push driver as it downloads.
//!
//! The loader hands out raw bytes. They are decoded as UTF-8 (no encoding
//! sniffing) by an incremental decoder, so a multi-byte sequence split
//! across deliveries still comes out as one character.

use encoding_rs::{CoderResult, Decoder, UTF_8};
use marten_common::{LoaderError, Session};

use crate::tokenizer::{HTMLTokenizer, Token, TokenizerConfig};

/// A push-mode tokenizer that accepts bytes instead of characters.
pub struct ByteStreamTokenizer {
    decoder: Decoder,
    tokenizer: HTMLTokenizer,
    /// Scratch space for decoded text, reused across bytes.
    decoded: String,
}

impl ByteStreamTokenizer {
    /// Create a byte-fed tokenizer with the given configuration.
    #[must_use]
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            decoder: UTF_8.new_decoder_without_bom_handling(),
            tokenizer: HTMLTokenizer::streaming(config),
            decoded: String::new(),
        }
    }

    /// Push one byte, or end the stream when `is_final` is true (the byte is
    /// then ignored). Completed tokens go to `sink`.
    ///
    /// Malformed UTF-8 decodes to U+FFFD.
    ///
    /// # Panics
    ///
    /// Panics if a byte is pushed after the stream has ended.
    pub fn push_byte<F: FnMut(Token)>(&mut self, byte: u8, is_final: bool, mut sink: F) {
        if is_final {
            self.decode(&[], true);
            if !self.decoded.is_empty() {
                self.tokenizer.feed_str(&self.decoded, &mut sink);
            }
            self.tokenizer.finish(sink);
            return;
        }

        self.decode(&[byte], false);
        if !self.decoded.is_empty() {
            self.tokenizer.feed_str(&self.decoded, sink);
        }
    }

    /// The wrapped tokenizer, for its parse errors and state.
    #[must_use]
    pub const fn tokenizer(&self) -> &HTMLTokenizer {
        &self.tokenizer
    }

    fn decode(&mut self, mut bytes: &[u8], last: bool) {
        self.decoded.clear();
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(bytes.len())
                .unwrap_or(bytes.len() * 3 + 4);
            self.decoded.reserve(needed);
            let (result, read, _) = self.decoder.decode_to_string(bytes, &mut self.decoded, last);
            bytes = &bytes[read..];
            if result == CoderResult::InputEmpty {
                return;
            }
        }
    }
}

/// Fetch `url` through `session` and tokenize the body while it streams in.
///
/// Every token, ending with [`Token::EndOfInput`], is handed to `on_token`.
/// The stream is finished even when the fetch fails, so `on_token` always
/// sees the end-of-input token; a URL that is not fetchable tokenizes as an
/// empty document.
///
/// # Errors
///
/// Returns the loader's error if the fetch failed. The tokens delivered
/// before the failure (and the end-of-input token) have already been handed
/// out by then.
pub fn tokenize_url<F: FnMut(Token)>(
    session: &Session,
    url: &str,
    mut on_token: F,
) -> Result<(), LoaderError> {
    let mut stream = ByteStreamTokenizer::new(TokenizerConfig::default());
    let result = session.fetch_streaming(url, |byte, is_final| {
        stream.push_byte(byte, is_final, &mut on_token);
    });
    if let Err(ref e) = result {
        log::debug!(target: "marten_html::fetch", "fetch of {url} ended early: {e}");
    }
    result
}
