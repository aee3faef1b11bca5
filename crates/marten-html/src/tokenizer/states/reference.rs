//! Character reference states.
//!
//! [§ 13.2.5.72 - § 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Named references are matched one character per step against the entity
//! table, so a reference split across pushed chunks decodes the same way as
//! one that arrived whole.

use crate::tokenizer::character_reference::{accumulate_digit, resolve_numeric_reference};
use crate::tokenizer::error::ParseErrorKind;
use crate::tokenizer::machine::{HTMLTokenizer, TokenizerState};
use crate::tokenizer::named_character_references::{any_entity_has_prefix, lookup_entity};

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(in crate::tokenizer) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026 AMPERSAND (&)
        // character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric"
            // "Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.named_reference_match = None;
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#)"
            // "Append the current input character to the temporary buffer. Switch to the
            // numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else"
            // "Flush code points consumed as a character reference. Reconsume in the return
            // state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table."
    ///
    /// Each step extends the name by one character while some entity still
    /// starts with it. The first character that breaks the prefix is pushed
    /// back and the longest full match seen so far decides the outcome.
    pub(in crate::tokenizer) fn handle_named_character_reference_state(&mut self) {
        let Some(c) = self.current_input_character else {
            self.input.reconsume();
            self.finish_named_character_reference(None);
            return;
        };

        let mut candidate = self.temporary_buffer[1..].to_string();
        candidate.push(c);
        if !any_entity_has_prefix(&candidate) {
            self.input.reconsume();
            self.finish_named_character_reference(Some(c));
            return;
        }

        self.temporary_buffer.push(c);
        if let Some(replacement) = lookup_entity(&candidate) {
            self.named_reference_match = Some((candidate.len(), replacement));
        }
        // No name continues past a semicolon.
        if c == ';' {
            self.finish_named_character_reference(None);
        }
    }

    /// The rest of the named character reference state once the longest
    /// match is known. `next` is the input character after the consumed name.
    fn finish_named_character_reference(&mut self, next: Option<char>) {
        let Some((matched_len, replacement)) = self.named_reference_match.take() else {
            // "Otherwise"
            // "Flush code points consumed as a character reference. Switch to the
            // ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(TokenizerState::AmbiguousAmpersand);
            return;
        };

        // Characters consumed past the longest match go out as plain text.
        let name = &self.temporary_buffer[1..];
        let ends_with_semicolon = name[..matched_len].ends_with(';');
        let unmatched = name[matched_len..].to_string();
        let next_input_character = unmatched.chars().next().or(next);

        // "If the character reference was consumed as part of an attribute, and the last
        // character matched is not a U+003B SEMICOLON character (;), and the next input
        // character is either a U+003D EQUALS SIGN character (=) or an ASCII alphanumeric,
        // then, for historical reasons, flush code points consumed as a character
        // reference and switch to the return state."
        if !ends_with_semicolon
            && self.is_consumed_as_part_of_attribute()
            && next_input_character.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;), then
        // this is a missing-semicolon-after-character-reference parse error."
        if !ends_with_semicolon {
            self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two characters
        // corresponding to the character reference name (as given by the second column
        // of the named character references table) to the temporary buffer. Flush code
        // points consumed as a character reference. Switch to the return state."
        self.flush_as_character_reference(replacement);
        self.flush_as_character_reference(&unmatched);
        self.temporary_buffer.clear();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(in crate::tokenizer) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "If the character reference was consumed as part of an attribute, then append
            // the current input character to the current attribute's value. Otherwise, emit
            // the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_attribute_value(c);
                } else {
                    self.emit_character_token(c);
                }
            }
            // "U+003B SEMICOLON (;)"
            // "This is an unknown-named-character-reference parse error. Reconsume in the
            // return state."
            Some(';') => {
                self.log_parse_error(ParseErrorKind::UnknownNamedCharacterReference);
                self.reconsume_in(self.return_state);
            }
            // "Anything else"
            // "Reconsume in the return state."
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(in crate::tokenizer) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;

        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X"
            // "U+0058 LATIN CAPITAL LETTER X"
            // "Append the current input character to the temporary buffer. Switch to the
            // hexadecimal character reference start state."
            Some(x @ ('x' | 'X')) => {
                self.temporary_buffer.push(x);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else"
            // "Reconsume in the decimal character reference start state."
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(in crate::tokenizer) fn handle_numeric_character_reference_start_state(
        &mut self,
        base: u32,
        digits_state: TokenizerState,
    ) {
        match self.current_input_character {
            // "ASCII hex digit" / "ASCII digit"
            // "Reconsume in the hexadecimal character reference state."
            Some(c) if c.is_digit(base) => self.reconsume_in(digits_state),
            // "Anything else"
            // "This is an absence-of-digits-in-numeric-character-reference parse error.
            // Flush code points consumed as a character reference. Reconsume in the return
            // state."
            _ => {
                self.log_parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(in crate::tokenizer) fn handle_numeric_character_reference_digits_state(
        &mut self,
        base: u32,
    ) {
        match self.current_input_character {
            // "Multiply the character reference code by 16 (or 10). Add a numeric version of
            // the current input character to the character reference code."
            Some(c) if c.is_digit(base) => {
                let digit = c.to_digit(base).unwrap_or_default();
                self.character_reference_code =
                    accumulate_digit(self.character_reference_code, base, digit);
            }
            // "U+003B SEMICOLON"
            // "Switch to the numeric character reference end state."
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "Anything else"
            // "This is a missing-semicolon-after-character-reference parse error. Reconsume
            // in the numeric character reference end state."
            _ => {
                self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Runs without consuming a character.
    pub(in crate::tokenizer) fn handle_numeric_character_reference_end_state(&mut self) {
        let (c, error) = resolve_numeric_reference(self.character_reference_code);
        if let Some(error) = error {
            self.log_parse_error(error);
        }

        // "Set the temporary buffer to the empty string. Append a code point equal to the
        // character reference code to the temporary buffer. Flush code points consumed as
        // a character reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push(c);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }
}
