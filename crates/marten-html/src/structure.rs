//! A coarse structural check of raw markup.
//!
//! This looks for a DOCTYPE and an `html` root element in the text itself.
//! It does not tokenize and says nothing about whether the tokenizer will
//! accept the input (it accepts everything).

const DOCTYPE_MARKER: &str = "<!doctype";
const ROOT_OPEN_MARKER: &str = "<html";
const ROOT_CLOSE_MARKER: &str = "</html>";

/// Where the DOCTYPE and root element markers sit in a document.
///
/// All matching is ASCII case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentShape {
    /// The text contains `<!DOCTYPE`.
    pub has_doctype: bool,
    /// The text contains `<html>`, or `<html` followed by whitespace and a
    /// later `>`.
    pub has_root_open: bool,
    /// The text contains `</html>`.
    pub has_root_close: bool,
    /// The root open tag comes before the root close tag.
    pub root_open_before_close: bool,
    /// The DOCTYPE marker comes before the root open tag.
    pub doctype_before_root: bool,
}

impl DocumentShape {
    /// Scan `text` for the DOCTYPE and root element markers.
    #[must_use]
    pub fn inspect(text: &str) -> Self {
        let lowered = text.to_ascii_lowercase();
        let doctype = lowered.find(DOCTYPE_MARKER);
        let root_open = find_root_open(&lowered);
        let root_close = lowered.find(ROOT_CLOSE_MARKER);

        Self {
            has_doctype: doctype.is_some(),
            has_root_open: root_open.is_some(),
            has_root_close: root_close.is_some(),
            root_open_before_close: matches!(
                (root_open, root_close),
                (Some(open), Some(close)) if open < close
            ),
            doctype_before_root: matches!(
                (doctype, root_open),
                (Some(doctype), Some(open)) if doctype < open
            ),
        }
    }

    /// True when the document has a DOCTYPE, an opened and closed root
    /// element in that order, and the DOCTYPE precedes the root.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.has_doctype
            && self.has_root_open
            && self.has_root_close
            && self.root_open_before_close
            && self.doctype_before_root
    }
}

/// Shorthand for `DocumentShape::inspect(text).is_valid()`.
///
/// # Example
/// ```
/// use marten_html::is_valid_html_string;
///
/// assert!(is_valid_html_string("<!DOCTYPE html><html></html>"));
/// assert!(!is_valid_html_string("<html></html>"));
/// ```
#[must_use]
pub fn is_valid_html_string(text: &str) -> bool {
    DocumentShape::inspect(text).is_valid()
}

/// Byte offset of the first `<html>` or `<html` + whitespace with a `>`
/// somewhere after it.
fn find_root_open(lowered: &str) -> Option<usize> {
    lowered.match_indices(ROOT_OPEN_MARKER).find_map(|(start, _)| {
        let rest = &lowered[start + ROOT_OPEN_MARKER.len()..];
        match rest.chars().next() {
            Some('>') => Some(start),
            Some(c) if c.is_ascii_whitespace() && rest.contains('>') => Some(start),
            _ => None,
        }
    })
}
