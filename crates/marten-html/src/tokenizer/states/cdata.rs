//! CDATA section states. Only reachable when CDATA is allowed, i.e. inside
//! SVG or MathML content.
//!
//! [§ 13.2.5.69 - § 13.2.5.71](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)

use crate::tokenizer::error::ParseErrorKind;
use crate::tokenizer::machine::{HTMLTokenizer, TokenizerState};

impl HTMLTokenizer {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(in crate::tokenizer) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            // "U+005D RIGHT SQUARE BRACKET (])"
            // "Switch to the CDATA section bracket state."
            Some(']') => self.switch_to(TokenizerState::CDATASectionBracket),
            // "EOF"
            // "This is an eof-in-cdata parse error. Emit an end-of-file token."
            None => {
                self.log_parse_error(ParseErrorKind::EofInCdata);
                self.emit_eof_token();
            }
            // U+0000 NULL is handed on as U+FFFD like in every other text state.
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.emit_character_token('\u{FFFD}');
            }
            // "Anything else"
            // "Emit the current input character as a character token."
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(in crate::tokenizer) fn handle_cdata_section_bracket_state(&mut self) {
        match self.current_input_character {
            // "U+005D RIGHT SQUARE BRACKET (])"
            // "Switch to the CDATA section end state."
            Some(']') => self.switch_to(TokenizerState::CDATASectionEnd),
            // "Anything else"
            // "Emit a U+005D RIGHT SQUARE BRACKET character token. Reconsume in the CDATA
            // section state."
            _ => {
                self.emit_character_token(']');
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(in crate::tokenizer) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            // "U+005D RIGHT SQUARE BRACKET (])"
            // "Emit a U+005D RIGHT SQUARE BRACKET character token."
            Some(']') => self.emit_character_token(']'),
            // "U+003E GREATER-THAN SIGN character"
            // "Switch to the data state."
            Some('>') => self.switch_to(TokenizerState::Data),
            // "Anything else"
            // "Emit two U+005D RIGHT SQUARE BRACKET character tokens. Reconsume in the CDATA
            // section state."
            _ => {
                self.emit_character_tokens("]]");
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }
}
