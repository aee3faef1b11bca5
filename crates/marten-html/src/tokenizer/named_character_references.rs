//! Named character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! The table is generated at build time from `data/entities.json` and holds
//! all 2,231 entities, including the legacy forms that match without a
//! trailing semicolon.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Every entity as `(name, replacement)`, sorted by name, without the leading '&'.
static ENTITIES: &[(&str, &str)] = include!(concat!(env!("OUT_DIR"), "/named_entities.rs"));

/// The named character reference table.
/// Maps entity names (without the leading '&') to their replacement strings.
///
/// NOTE: Some entities map to multiple characters (e.g., "fjlig;" -> "fj").
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ENTITIES.iter().copied().collect());

/// Look up a named character reference.
///
/// Returns the replacement string if found.
/// The `name` should NOT include the leading '&'.
///
/// # Example
/// ```ignore
/// lookup_entity("amp;")  // Returns Some("&")
/// lookup_entity("amp")   // Returns Some("&") - legacy support
/// lookup_entity("apos")  // Returns None - needs the semicolon
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Check if any entity name starts with the given prefix.
///
/// Used to decide whether to keep consuming characters while looking for the
/// longest match.
///
/// # Example
/// ```ignore
/// any_entity_has_prefix("am")   // true (amp, amp;)
/// any_entity_has_prefix("xyz")  // false
/// ```
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    let index = ENTITIES.partition_point(|(name, _)| *name < prefix);
    ENTITIES
        .get(index)
        .is_some_and(|(name, _)| name.starts_with(prefix))
}

/// Find the longest entity name that `text` starts with.
///
/// Returns the matched name and its replacement.
#[must_use]
pub fn longest_entity_prefix(text: &str) -> Option<(&'static str, &'static str)> {
    let mut best = None;
    for (end, c) in text.char_indices() {
        let candidate = &text[..end + c.len_utf8()];
        if !any_entity_has_prefix(candidate) {
            break;
        }
        if let Some((&name, &replacement)) = NAMED_ENTITIES.get_key_value(candidate) {
            best = Some((name, replacement));
        }
    }
    best
}

/// Number of entries in the table.
#[must_use]
pub fn entity_count() -> usize {
    NAMED_ENTITIES.len()
}
