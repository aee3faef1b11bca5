//! Integration tests for character reference decoding outside the state machine.

use marten_html::ParseErrorKind;
use marten_html::tokenizer::character_reference::{accumulate_digit, resolve_numeric_reference};
use marten_html::tokenizer::decode_character_reference;

#[test]
fn test_resolve_plain_code_point() {
    assert_eq!(resolve_numeric_reference(0x41), ('A', None));
    assert_eq!(resolve_numeric_reference(0x1F600), ('\u{1F600}', None));
}

#[test]
fn test_resolve_whitespace_controls_are_allowed() {
    assert_eq!(resolve_numeric_reference(0x09), ('\t', None));
    assert_eq!(resolve_numeric_reference(0x0A), ('\n', None));
    assert_eq!(resolve_numeric_reference(0x0C), ('\x0C', None));
}

#[test]
fn test_resolve_replaced_code_points() {
    assert_eq!(
        resolve_numeric_reference(0),
        ('\u{FFFD}', Some(ParseErrorKind::NullCharacterReference))
    );
    assert_eq!(
        resolve_numeric_reference(0x11_0000),
        (
            '\u{FFFD}',
            Some(ParseErrorKind::CharacterReferenceOutsideUnicodeRange)
        )
    );
    assert_eq!(
        resolve_numeric_reference(0xDFFF),
        ('\u{FFFD}', Some(ParseErrorKind::SurrogateCharacterReference))
    );
    assert_eq!(
        resolve_numeric_reference(0xFDD0),
        ('\u{FFFD}', Some(ParseErrorKind::NoncharacterCharacterReference))
    );
    assert_eq!(
        resolve_numeric_reference(0x10_FFFE),
        ('\u{FFFD}', Some(ParseErrorKind::NoncharacterCharacterReference))
    );
}

#[test]
fn test_resolve_control_characters() {
    // Carriage return is a control character reference even though it is whitespace.
    assert_eq!(
        resolve_numeric_reference(0x0D),
        ('\r', Some(ParseErrorKind::ControlCharacterReference))
    );
    assert_eq!(
        resolve_numeric_reference(0x01),
        ('\u{1}', Some(ParseErrorKind::ControlCharacterReference))
    );
    // C1 codes with no Windows-1252 mapping stay as they are.
    assert_eq!(
        resolve_numeric_reference(0x81),
        ('\u{81}', Some(ParseErrorKind::ControlCharacterReference))
    );
    assert_eq!(
        resolve_numeric_reference(0x99),
        ('\u{2122}', Some(ParseErrorKind::ControlCharacterReference))
    );
}

#[test]
fn test_accumulate_digit_saturates() {
    assert_eq!(accumulate_digit(0, 10, 7), 7);
    assert_eq!(accumulate_digit(0x1, 16, 0xF), 0x1F);
    assert_eq!(accumulate_digit(u32::MAX, 10, 9), u32::MAX);
}

#[test]
fn test_decode_named_reference() {
    let r = decode_character_reference("lt;p", false).unwrap();
    assert_eq!(r.text, "<");
    assert_eq!(r.consumed, 3);
    assert!(r.errors.is_empty());
}

#[test]
fn test_decode_named_reference_without_semicolon() {
    let r = decode_character_reference("copy 2024", false).unwrap();
    assert_eq!(r.text, "\u{00A9}");
    assert_eq!(r.consumed, 4);
    assert_eq!(
        r.errors,
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_decode_attribute_historical_exception() {
    assert!(decode_character_reference("amp=1", true).is_none());
    assert!(decode_character_reference("ampx", true).is_none());
    // Terminated references decode even in attributes.
    assert_eq!(
        decode_character_reference("amp;=1", true).map(|r| r.text),
        Some("&".to_string())
    );
    // Outside attributes the exception does not apply.
    assert!(decode_character_reference("amp=1", false).is_some());
}

#[test]
fn test_decode_unknown_name() {
    assert!(decode_character_reference("zzz;", false).is_none());
    assert!(decode_character_reference("", false).is_none());
}

#[test]
fn test_decode_numeric_references() {
    let r = decode_character_reference("#x41;", false).unwrap();
    assert_eq!((r.text.as_str(), r.consumed), ("A", 5));

    let r = decode_character_reference("#65 ", false).unwrap();
    assert_eq!((r.text.as_str(), r.consumed), ("A", 3));
    assert_eq!(
        r.errors,
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );

    let r = decode_character_reference("#0;", false).unwrap();
    assert_eq!(r.text, "\u{FFFD}");
    assert_eq!(r.errors, vec![ParseErrorKind::NullCharacterReference]);
}

#[test]
fn test_decode_numeric_without_digits() {
    assert!(decode_character_reference("#;", false).is_none());
    assert!(decode_character_reference("#x;", false).is_none());
    assert!(decode_character_reference("#xg", false).is_none());
}
