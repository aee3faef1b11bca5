//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token")
//! - Text-state helpers for end tags inside RCDATA, RAWTEXT and script data
//! - Attribute helpers for the pending attribute and duplicate detection
//! - Parse error reporting

use marten_common::warning::warn_once;

use super::error::{ParseError, ParseErrorKind};
use super::input::MatchResult;
use super::machine::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next step.
    pub(super) fn switch_to(&mut self, new_state: TokenizerState) {
        #[cfg(feature = "tokenizer-trace")]
        log::trace!(target: "marten_html::tokenizer", "{} -> {new_state}", self.state);
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Pushes the current input character back onto the stream so the next
    /// step processes it again under the new state.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.input.reconsume();
        self.switch_to(new_state);
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// The whitespace set the tokenizer switches on. CR never reaches the
    /// states since the input stream normalizes it to LF.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        // "U+0009 CHARACTER TABULATION (tab)"
        // "U+000A LINE FEED (LF)"
        // "U+000C FORM FEED (FF)"
        // "U+0020 SPACE"
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// Start building a new token, dropping any attribute state left over
    /// from the previous one.
    pub(super) fn begin_token(&mut self, token: Token) {
        self.current_token = Some(token);
        self.current_attribute = None;
        self.end_tag_had_attributes = false;
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    ///
    /// True when the stream is open and the buffered characters could still
    /// turn out to be `PUBLIC` or `SYSTEM`.
    pub(super) fn doctype_keyword_is_undecided(&self) -> bool {
        ["PUBLIC", "SYSTEM"]
            .iter()
            .any(|keyword| self.input.match_ahead(keyword, true) == MatchResult::NeedMoreInput)
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token" - adds the token to the output stream.
    pub(super) fn emit_token(&mut self) {
        self.commit_attribute();
        let Some(token) = self.current_token.take() else {
            return;
        };

        match token {
            Token::StartTag { ref name, .. } => {
                self.last_start_tag_name = Some(name.clone());
                if self.switch_on_text_elements {
                    self.switch_for_text_element(name.as_str());
                }
            }
            Token::EndTag { .. } => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if self.end_tag_had_attributes {
                    self.log_parse_error(ParseErrorKind::EndTagWithAttributes);
                    self.end_tag_had_attributes = false;
                }
            }
            _ => {}
        }
        self.token_stream.push(token);
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// The tree builder normally switches the tokenizer after inserting these
    /// elements. Without one, the tokenizer does it itself.
    fn switch_for_text_element(&mut self, name: &str) {
        match name {
            // "Follow the generic RCDATA element parsing algorithm."
            "title" | "textarea" => self.switch_to(TokenizerState::RCDATA),
            // "Follow the generic raw text element parsing algorithm."
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                self.switch_to(TokenizerState::RAWTEXT);
            }
            // "Switch the tokenizer to the script data state."
            "script" => self.switch_to(TokenizerState::ScriptData),
            // "Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => self.switch_to(TokenizerState::PLAINTEXT),
            _ => {}
        }
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::new_character(c));
    }

    /// Emit one character token per character of `text`.
    pub(super) fn emit_character_tokens(&mut self, text: &str) {
        self.token_stream.extend(text.chars().map(Token::new_character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::new_eof());
        self.finished = true;
    }

    /// "Emit the current token. Emit an end-of-file token."
    ///
    /// The EOF resolution shared by the comment and DOCTYPE states.
    pub(super) fn emit_token_then_eof(&mut self) {
        self.emit_token();
        self.emit_eof_token();
    }
}

// =============================================================================
// RCDATA/RAWTEXT/Script Data Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// "Anything else" of the RCDATA, RAWTEXT, script data and script data
    /// escaped end tag name states:
    ///
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// X state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_character_tokens(&buffer);
        self.temporary_buffer = buffer;
        // The end tag token is discarded.
        self.current_token = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self, name: &str) {
        self.commit_attribute();
        self.current_attribute = Some(Attribute::new(name.to_string(), String::new()));
    }

    /// "Append the current input character to the current attribute's name."
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(ref mut attribute) = self.current_attribute {
            attribute.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(ref mut attribute) = self.current_attribute {
            attribute.value.push(c);
        }
    }

    /// Append decoded character reference text to the current attribute's value.
    pub(super) fn append_to_attribute_value_str(&mut self, text: &str) {
        if let Some(ref mut attribute) = self.current_attribute {
            attribute.value.push_str(text);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "...if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    ///
    /// Moves the pending attribute onto the current tag. End tags keep no
    /// attributes; the attempt is remembered for the parse error on emit.
    pub(super) fn commit_attribute(&mut self) {
        let Some(attribute) = self.current_attribute.take() else {
            return;
        };

        let is_duplicate = match self.current_token {
            Some(Token::EndTag { .. }) => {
                self.end_tag_had_attributes = true;
                return;
            }
            Some(ref token) => token.has_attribute(&attribute.name),
            None => return,
        };

        if is_duplicate {
            self.log_parse_error(ParseErrorKind::DuplicateAttribute);
        } else if let Some(ref mut token) = self.current_token {
            token.push_attribute(attribute);
        }
    }
}

// =============================================================================
// Current Token Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Append the current input character to the current tag token's tag name."
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_tag_name(c);
        }
    }

    /// "Append the current input character to the comment token's data."
    pub(super) fn append_to_comment(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_comment(c);
        }
    }

    /// Append several characters to the comment token's data.
    pub(super) fn append_str_to_comment(&mut self, s: &str) {
        if let Some(ref mut token) = self.current_token {
            token.append_str_to_comment(s);
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    pub(super) fn set_force_quirks(&mut self) {
        if let Some(ref mut token) = self.current_token {
            token.set_force_quirks();
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error and reports it through the warning system.
    /// Parse errors in HTML are not fatal - the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&mut self, kind: ParseErrorKind) {
        let position = self.input.position();
        log::debug!(target: "marten_html::tokenizer", "{kind} at position {position}");
        warn_once("HTML Tokenizer", &kind.to_string());
        if self.record_parse_errors {
            self.parse_errors.push(ParseError::new(kind, position));
        }
    }
}
