//! Character reference decoding.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The state machine decodes references one character at a time (see
//! `states::reference`). The functions here hold the pieces it shares with
//! [`decode_character_reference`], which decodes a reference sitting in an
//! already materialized string.

use super::error::ParseErrorKind;
use super::machine::{HTMLTokenizer, TokenizerState};
use super::named_character_references::longest_entity_prefix;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// A decoded reference found by [`decode_character_reference`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterReference {
    /// The replacement text (one or two code points).
    pub text: String,
    /// Bytes of input consumed after the ampersand, including any `;`.
    pub consumed: usize,
    /// Parse errors raised while decoding.
    pub errors: Vec<ParseErrorKind>,
}

/// Accumulate one digit into a character reference code.
///
/// Saturates instead of overflowing; anything past U+10FFFF is out of range
/// either way.
#[must_use]
pub const fn accumulate_digit(code: u32, base: u32, digit: u32) -> u32 {
    code.saturating_mul(base).saturating_add(digit)
}

/// Returns true for the noncharacter code points U+FDD0..U+FDEF and every
/// code point ending in FFFE or FFFF.
const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE) == 0xFFFE
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Turn a character reference code into the character to emit, along with
/// the parse error it raises, if any.
///
/// Null, out-of-range, surrogate and noncharacter codes all become U+FFFD.
/// Control codes are kept (after the Windows-1252 fix-up for 0x80..0x9F).
#[must_use]
pub fn resolve_numeric_reference(code: u32) -> (char, Option<ParseErrorKind>) {
    // "If the number is 0x00, then this is a null-character-reference parse
    // error. Set the character reference code to 0xFFFD."
    if code == 0 {
        return ('\u{FFFD}', Some(ParseErrorKind::NullCharacterReference));
    }
    // "If the number is greater than 0x10FFFF, then this is a
    // character-reference-outside-unicode-range parse error."
    if code > 0x0010_FFFF {
        return (
            '\u{FFFD}',
            Some(ParseErrorKind::CharacterReferenceOutsideUnicodeRange),
        );
    }
    // "If the number is a surrogate, then this is a
    // surrogate-character-reference parse error."
    if (0xD800..=0xDFFF).contains(&code) {
        return ('\u{FFFD}', Some(ParseErrorKind::SurrogateCharacterReference));
    }
    if is_noncharacter(code) {
        return (
            '\u{FFFD}',
            Some(ParseErrorKind::NoncharacterCharacterReference),
        );
    }
    // "If the number is 0x0D, or a control that's not ASCII whitespace, then
    // this is a control-character-reference parse error."
    let is_control = code <= 0x1F || (0x7F..=0x9F).contains(&code);
    if code == 0x0D || (is_control && !matches!(code, 0x09 | 0x0A | 0x0C)) {
        let c = C1_REPLACEMENTS
            .iter()
            .find(|(from, _)| *from == code)
            .map_or_else(
                || char::from_u32(code).unwrap_or('\u{FFFD}'),
                |(_, to)| *to,
            );
        return (c, Some(ParseErrorKind::ControlCharacterReference));
    }
    (char::from_u32(code).unwrap_or('\u{FFFD}'), None)
}

/// Decode the character reference at the start of `after_ampersand` (the
/// text following a `&`).
///
/// Returns `None` when the ampersand should be left as literal text: no
/// digits after `&#`, no matching entity name, or a legacy reference without
/// a semicolon inside an attribute value that is followed by `=` or an ASCII
/// alphanumeric.
///
/// # Example
/// ```
/// use marten_html::tokenizer::decode_character_reference;
///
/// let r = decode_character_reference("amp;rest", false).unwrap();
/// assert_eq!((r.text.as_str(), r.consumed), ("&", 4));
/// ```
#[must_use]
pub fn decode_character_reference(
    after_ampersand: &str,
    in_attribute: bool,
) -> Option<CharacterReference> {
    if let Some(numeric) = after_ampersand.strip_prefix('#') {
        return decode_numeric(numeric);
    }

    let (name, replacement) = longest_entity_prefix(after_ampersand)?;
    let mut errors = Vec::new();
    if !name.ends_with(';') {
        let next = after_ampersand[name.len()..].chars().next();
        if in_attribute && next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
            return None;
        }
        errors.push(ParseErrorKind::MissingSemicolonAfterCharacterReference);
    }
    Some(CharacterReference {
        text: replacement.to_string(),
        consumed: name.len(),
        errors,
    })
}

/// Decode the part of a numeric reference after `&#`.
fn decode_numeric(text: &str) -> Option<CharacterReference> {
    let (digits, base, prefix_len) = match text.chars().next() {
        Some('x' | 'X') => (&text[1..], 16, 2),
        _ => (text, 10, 1),
    };

    let mut code = 0u32;
    let mut digit_len = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(base) else {
            break;
        };
        code = accumulate_digit(code, base, digit);
        digit_len += 1;
    }
    if digit_len == 0 {
        return None;
    }

    let mut errors = Vec::new();
    let mut consumed = prefix_len + digit_len;
    if digits[digit_len..].starts_with(';') {
        consumed += 1;
    } else {
        errors.push(ParseErrorKind::MissingSemicolonAfterCharacterReference);
    }
    let (c, error) = resolve_numeric_reference(code);
    errors.extend(error);
    Some(CharacterReference {
        text: c.to_string(),
        consumed,
        errors,
    })
}

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// Returns true if the return state is an attribute value state.
    /// WHATWG: "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// "Flush code points consumed as a character reference"
    /// WHATWG: "If the character reference was consumed as part of an attribute,
    /// then append each character to the current attribute's value. Otherwise,
    /// emit each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.flush_as_character_reference(&buffer);
        self.temporary_buffer = buffer;
    }

    /// Flush arbitrary text the way a decoded reference is flushed.
    pub(super) fn flush_as_character_reference(&mut self, text: &str) {
        if self.is_consumed_as_part_of_attribute() {
            self.append_to_attribute_value_str(text);
        } else {
            for c in text.chars() {
                self.emit_character_token(c);
            }
        }
    }
}
