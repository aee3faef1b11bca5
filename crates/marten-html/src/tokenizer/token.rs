use core::fmt;

use serde::Serialize;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
///
/// Serializes with a `"type"` field naming the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing
    /// (which is a distinct state from the empty string), and the force-quirks
    /// flag must be set to off (its other state is on)."
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_id: Option<String>,
        /// "a system identifier"
        system_id: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// A start tag. Attribute names are unique; the first occurrence wins.
    StartTag {
        /// "a tag name"
        name: String,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
        /// "a self-closing flag"
        self_closing: bool,
    },

    /// An end tag. Attributes written on end tags are parsed and dropped.
    EndTag {
        /// "a tag name"
        name: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
    },

    /// One code point of character data.
    Character {
        /// "data"
        data: char,
    },

    /// Signals the end of input. Always the last token.
    EndOfInput,
}

impl Token {
    /// "When a DOCTYPE token is created, its name, public identifier, and system
    /// identifier must be marked as missing"
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype {
            name: None,
            public_id: None,
            system_id: None,
            force_quirks: false,
        }
    }

    /// "When a start or end tag token is created, its self-closing flag must be
    /// unset (its other state is that it be set), and its attributes list must
    /// be empty."
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    /// Create an end tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// Create a comment token holding `data`.
    #[must_use]
    pub const fn new_comment(data: String) -> Self {
        Self::Comment { data }
    }

    /// Create a character token with the given character.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Create an end-of-input token.
    #[must_use]
    pub const fn new_eof() -> Self {
        Self::EndOfInput
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    /// The value of the attribute called `name` on a start tag.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::StartTag { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            _ => None,
        }
    }

    /// Returns true for a start tag called `tag`.
    #[must_use]
    pub fn is_start_tag_named(&self, tag: &str) -> bool {
        matches!(self, Self::StartTag { name, .. } if name == tag)
    }

    /// Returns true for an end tag called `tag`.
    #[must_use]
    pub fn is_end_tag_named(&self, tag: &str) -> bool {
        matches!(self, Self::EndTag { name } if name == tag)
    }

    /// Returns true for a character token holding tab, LF, FF, CR or space.
    ///
    /// Tree construction treats these specially in most insertion modes.
    #[must_use]
    pub const fn is_whitespace_character(&self) -> bool {
        matches!(
            self,
            Self::Character {
                data: '\t' | '\n' | '\x0C' | '\r' | ' '
            }
        )
    }
}

// Mutation helpers for use during tokenization. These panic if called on the
// wrong token variant, which indicates a bug in the state machine.
impl Token {
    /// "Append the current input character to the current tag token's tag name."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub(crate) fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => name.push(c),
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// "Set the self-closing flag of the current tag token."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token.
    pub(crate) fn set_self_closing(&mut self) {
        match self {
            Self::StartTag { self_closing, .. } => *self_closing = true,
            _ => panic!("set_self_closing called on non-start-tag token"),
        }
    }

    /// Returns true if a start tag already carries an attribute called `name`.
    pub(crate) fn has_attribute(&self, name: &str) -> bool {
        matches!(self, Self::StartTag { attributes, .. } if attributes.iter().any(|attr| attr.name == name))
    }

    /// Add a finished attribute to a start tag.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token.
    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        match self {
            Self::StartTag { attributes, .. } => attributes.push(attribute),
            _ => panic!("push_attribute called on non-start-tag token"),
        }
    }

    /// "Append the current input character to the comment token's data."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token.
    pub(crate) fn append_to_comment(&mut self, c: char) {
        match self {
            Self::Comment { data } => data.push(c),
            _ => panic!("append_to_comment called on non-comment token"),
        }
    }

    /// Append several characters to the comment token's data.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token.
    pub(crate) fn append_str_to_comment(&mut self, s: &str) {
        match self {
            Self::Comment { data } => data.push_str(s),
            _ => panic!("append_str_to_comment called on non-comment token"),
        }
    }

    /// "Append the current input character to the current DOCTYPE token's name."
    ///
    /// Creates the name on first use, since a missing name differs from an
    /// empty one.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub(crate) fn append_to_doctype_name(&mut self, c: char) {
        match self {
            Self::Doctype { name, .. } => name.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_doctype_name called on non-DOCTYPE token"),
        }
    }

    /// "Set the current DOCTYPE token's public identifier to the empty string
    /// (not missing)"
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub(crate) fn set_public_id_empty(&mut self) {
        match self {
            Self::Doctype { public_id, .. } => *public_id = Some(String::new()),
            _ => panic!("set_public_id_empty called on non-DOCTYPE token"),
        }
    }

    /// "Append the current input character to the current DOCTYPE token's
    /// public identifier."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub(crate) fn append_to_public_id(&mut self, c: char) {
        match self {
            Self::Doctype { public_id, .. } => public_id.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_public_id called on non-DOCTYPE token"),
        }
    }

    /// "Set the current DOCTYPE token's system identifier to the empty string
    /// (not missing)"
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub(crate) fn set_system_id_empty(&mut self) {
        match self {
            Self::Doctype { system_id, .. } => *system_id = Some(String::new()),
            _ => panic!("set_system_id_empty called on non-DOCTYPE token"),
        }
    }

    /// "Append the current input character to the current DOCTYPE token's
    /// system identifier."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub(crate) fn append_to_system_id(&mut self, c: char) {
        match self {
            Self::Doctype { system_id, .. } => system_id.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_system_id called on non-DOCTYPE token"),
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub(crate) fn set_force_quirks(&mut self) {
        match self {
            Self::Doctype { force_quirks, .. } => *force_quirks = true,
            _ => panic!("set_force_quirks called on non-DOCTYPE token"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_id,
                system_id,
                force_quirks,
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_id {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_id {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfInput => write!(f, "EOF"),
        }
    }
}
