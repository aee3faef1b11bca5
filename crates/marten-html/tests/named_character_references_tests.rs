//! Integration tests for named character reference lookup.

use marten_html::tokenizer::named_character_references::{
    any_entity_has_prefix, entity_count, longest_entity_prefix, lookup_entity,
};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("hellip;"), Some("\u{2026}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
    assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
}

#[test]
fn test_semicolon_required_for_newer_entities() {
    assert_eq!(lookup_entity("apos;"), Some("'"));
    assert_eq!(lookup_entity("apos"), None);
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("alpha;"), Some("\u{03B1}"));
    assert_eq!(lookup_entity("Alpha;"), Some("\u{0391}"));
}

#[test]
fn test_multi_code_point_entities() {
    assert_eq!(lookup_entity("fjlig;"), Some("fj"));
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a")); // amp, apos, alpha, etc.
    assert!(any_entity_has_prefix("am")); // amp
    assert!(any_entity_has_prefix("amp")); // amp, amp;
    assert!(any_entity_has_prefix("amp;")); // amp;
    assert!(!any_entity_has_prefix("ampx")); // nothing
    assert!(!any_entity_has_prefix("xyz")); // nothing
}

#[test]
fn test_longest_entity_prefix() {
    assert_eq!(longest_entity_prefix("amp;rest"), Some(("amp;", "&")));
    assert_eq!(longest_entity_prefix("amprest"), Some(("amp", "&")));
    // "not" is a legacy entity, "notin;" a longer one
    assert_eq!(longest_entity_prefix("notit;"), Some(("not", "\u{00AC}")));
    assert_eq!(longest_entity_prefix("notin;"), Some(("notin;", "\u{2209}")));
    assert_eq!(longest_entity_prefix("zzz"), None);
    assert_eq!(longest_entity_prefix(""), None);
}

#[test]
fn test_every_legacy_name_has_a_semicolon_form() {
    for name in ["amp", "lt", "gt", "quot", "nbsp", "copy", "not"] {
        let with_semicolon = format!("{name};");
        assert_eq!(
            lookup_entity(name),
            lookup_entity(&with_semicolon),
            "{name}"
        );
    }
}

#[test]
fn test_entity_count() {
    // Both forms of each legacy entity are separate entries.
    assert_eq!(entity_count(), 2231);
}

#[test]
fn test_lookup_long_tail_entities() {
    assert_eq!(
        lookup_entity("CounterClockwiseContourIntegral;"),
        Some("\u{2233}")
    );
    assert_eq!(lookup_entity("bigtriangleup;"), Some("\u{25B3}"));
    assert_eq!(lookup_entity("zwnj;"), Some("\u{200C}"));
    assert_eq!(lookup_entity("Zfr;"), Some("\u{2128}"));
    assert_eq!(lookup_entity("NotSquareSubset;"), Some("\u{228F}\u{338}"));
}

#[test]
fn test_only_legacy_entities_match_without_semicolon() {
    assert_eq!(lookup_entity("AMP"), Some("&"));
    assert_eq!(lookup_entity("yuml"), Some("\u{FF}"));
    assert_eq!(lookup_entity("hellip"), None);
    assert_eq!(lookup_entity("CounterClockwiseContourIntegral"), None);
}
