//! Diagnostics with colored terminal output.
//!
//! Provides deduplication so a malformed document does not spam the same
//! complaint once per offending character. Used by the tokenizer to report
//! parse errors and by the loader to report network failures.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `message` for `component`, returning true the first time the pair
/// is seen.
fn first_sighting(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recoverable problem (prints once per unique message).
///
/// The first sighting is also forwarded to the `log` facade at warn level.
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unexpected-null-character");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        log::warn!(target: "marten", "[{component}] {message}");
        eprintln!("{}", format!("[Marten {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if `message` has already been reported for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when starting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
