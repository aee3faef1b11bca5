//! The input stream the tokenizer reads from.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! Characters live in an indexable buffer with an explicit cursor. The stream
//! may still be open, in which case running out of buffered characters means
//! "more may arrive" rather than end of file.

/// How many consumed characters may pile up before the buffer is compacted.
const COMPACT_THRESHOLD: usize = 4096;

/// The result of consuming or peeking one position of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCharacter {
    /// A decoded character.
    Char(char),
    /// The stream is closed and fully consumed.
    Eof,
    /// Nothing is buffered yet, but the stream is still open.
    Pending,
}

/// Outcome of a keyword lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The next characters spell the keyword.
    Matched,
    /// The next characters do not spell the keyword.
    Mismatch,
    /// The buffered characters agree so far, but the stream is open and ends
    /// before the keyword does.
    NeedMoreInput,
}

/// What the most recent `consume` handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Consumed {
    Char,
    Eof,
}

/// A repositionable cursor over decoded input with one-slot push back.
#[derive(Debug, Default)]
pub struct InputStream {
    buffer: Vec<char>,
    cursor: usize,
    /// Characters dropped from the front of `buffer` by compaction.
    offset: usize,
    closed: bool,
    last_consumed: Option<Consumed>,
    reconsumed: bool,
    /// The last appended character was a CR, so a following LF is dropped.
    after_carriage_return: bool,
}

impl InputStream {
    /// Create an open, empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed stream holding all of `input`.
    #[must_use]
    pub fn from_text(input: &str) -> Self {
        let mut stream = Self::new();
        stream.push_str(input);
        stream.close();
        stream
    }

    /// Append one character.
    ///
    /// "Before the tokenization stage, the input stream must be preprocessed
    /// by normalizing newlines." A CR becomes an LF, and an LF right after a
    /// CR is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the stream has already been closed.
    pub fn push_char(&mut self, c: char) {
        assert!(!self.closed, "character pushed after end of stream");
        match c {
            '\r' => {
                self.buffer.push('\n');
                self.after_carriage_return = true;
            }
            '\n' if self.after_carriage_return => {
                self.after_carriage_return = false;
            }
            c => {
                self.buffer.push(c);
                self.after_carriage_return = false;
            }
        }
        self.compact();
    }

    /// Append every character of `input`.
    ///
    /// # Panics
    ///
    /// Panics if the stream has already been closed.
    pub fn push_str(&mut self, input: &str) {
        for c in input.chars() {
            self.push_char(c);
        }
    }

    /// Mark the true end of input. Closing twice is harmless.
    pub const fn close(&mut self) {
        self.closed = true;
    }

    /// Returns true once [`InputStream::close`] has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of characters consumed since the stream was created.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset + self.cursor
    }

    /// "Consume the next input character"
    pub fn consume(&mut self) -> InputCharacter {
        self.reconsumed = false;
        match self.at(self.cursor) {
            InputCharacter::Char(c) => {
                self.cursor += 1;
                self.last_consumed = Some(Consumed::Char);
                InputCharacter::Char(c)
            }
            InputCharacter::Eof => {
                self.last_consumed = Some(Consumed::Eof);
                InputCharacter::Eof
            }
            InputCharacter::Pending => {
                self.last_consumed = None;
                InputCharacter::Pending
            }
        }
    }

    /// Consume `count` characters that a lookahead has already confirmed.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` characters are buffered.
    pub fn consume_many(&mut self, count: usize) {
        assert!(
            self.cursor + count <= self.buffer.len(),
            "consume_many past the buffered input"
        );
        if count == 0 {
            return;
        }
        self.cursor += count;
        self.reconsumed = false;
        self.last_consumed = Some(Consumed::Char);
    }

    /// Push back the most recently consumed character so the next
    /// [`InputStream::consume`] returns it again.
    ///
    /// # Panics
    ///
    /// Panics when called twice without an intervening consume, or when the
    /// last consume handed out nothing (an empty or pending stream).
    pub fn reconsume(&mut self) {
        assert!(!self.reconsumed, "reconsume called twice in a row");
        let Some(last) = self.last_consumed else {
            panic!("reconsume called with nothing consumed");
        };
        if last == Consumed::Char {
            self.cursor -= 1;
        }
        self.reconsumed = true;
    }

    /// Look at the next `count` positions without consuming them.
    #[must_use]
    pub fn peek(&self, count: usize) -> Vec<InputCharacter> {
        (0..count).map(|i| self.at(self.cursor + i)).collect()
    }

    /// "If the next few characters are ..."
    ///
    /// Compares the upcoming characters with `keyword`, optionally as an
    /// ASCII case-insensitive match. Nothing is consumed.
    #[must_use]
    pub fn match_ahead(&self, keyword: &str, case_insensitive: bool) -> MatchResult {
        for (i, expected) in keyword.chars().enumerate() {
            match self.at(self.cursor + i) {
                InputCharacter::Char(c) => {
                    let same = if case_insensitive {
                        c.eq_ignore_ascii_case(&expected)
                    } else {
                        c == expected
                    };
                    if !same {
                        return MatchResult::Mismatch;
                    }
                }
                InputCharacter::Eof => return MatchResult::Mismatch,
                InputCharacter::Pending => return MatchResult::NeedMoreInput,
            }
        }
        MatchResult::Matched
    }

    fn at(&self, index: usize) -> InputCharacter {
        match self.buffer.get(index) {
            Some(&c) => InputCharacter::Char(c),
            None if self.closed => InputCharacter::Eof,
            None => InputCharacter::Pending,
        }
    }

    /// Drop the consumed prefix, keeping the last consumed character so a
    /// reconsume still has something to rewind onto.
    fn compact(&mut self) {
        if self.cursor <= COMPACT_THRESHOLD {
            return;
        }
        let dropped = self.cursor - 1;
        let _ = self.buffer.drain(..dropped);
        self.offset += dropped;
        self.cursor = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_then_eof() {
        let mut input = InputStream::from_text("ab");
        assert_eq!(input.consume(), InputCharacter::Char('a'));
        assert_eq!(input.consume(), InputCharacter::Char('b'));
        assert_eq!(input.consume(), InputCharacter::Eof);
        assert_eq!(input.consume(), InputCharacter::Eof);
        assert_eq!(input.position(), 2);
    }

    #[test]
    fn test_open_stream_is_pending_not_eof() {
        let mut input = InputStream::new();
        assert_eq!(input.consume(), InputCharacter::Pending);
        input.push_char('x');
        assert_eq!(input.consume(), InputCharacter::Char('x'));
        assert_eq!(input.consume(), InputCharacter::Pending);
        input.close();
        assert_eq!(input.consume(), InputCharacter::Eof);
    }

    #[test]
    fn test_reconsume_returns_same_character() {
        let mut input = InputStream::from_text("xy");
        assert_eq!(input.consume(), InputCharacter::Char('x'));
        input.reconsume();
        assert_eq!(input.consume(), InputCharacter::Char('x'));
        assert_eq!(input.consume(), InputCharacter::Char('y'));
    }

    #[test]
    fn test_reconsume_eof() {
        let mut input = InputStream::from_text("");
        assert_eq!(input.consume(), InputCharacter::Eof);
        input.reconsume();
        assert_eq!(input.consume(), InputCharacter::Eof);
    }

    #[test]
    #[should_panic(expected = "reconsume called twice")]
    fn test_double_reconsume_panics() {
        let mut input = InputStream::from_text("xy");
        let _ = input.consume();
        input.reconsume();
        input.reconsume();
    }

    #[test]
    #[should_panic(expected = "nothing consumed")]
    fn test_reconsume_pending_panics() {
        let mut input = InputStream::new();
        assert_eq!(input.consume(), InputCharacter::Pending);
        input.reconsume();
    }

    #[test]
    #[should_panic(expected = "after end of stream")]
    fn test_push_after_close_panics() {
        let mut input = InputStream::from_text("a");
        input.push_char('b');
    }

    #[test]
    fn test_newline_normalization() {
        let mut input = InputStream::from_text("a\r\nb\rc");
        let mut seen = String::new();
        while let InputCharacter::Char(c) = input.consume() {
            seen.push(c);
        }
        assert_eq!(seen, "a\nb\nc");
    }

    #[test]
    fn test_crlf_split_across_pushes() {
        let mut input = InputStream::new();
        input.push_char('\r');
        input.push_char('\n');
        input.close();
        assert_eq!(input.consume(), InputCharacter::Char('\n'));
        assert_eq!(input.consume(), InputCharacter::Eof);
    }

    #[test]
    fn test_match_ahead() {
        let input = InputStream::from_text("DocType html");
        assert_eq!(input.match_ahead("DOCTYPE", true), MatchResult::Matched);
        assert_eq!(input.match_ahead("DOCTYPE", false), MatchResult::Mismatch);

        let mut open = InputStream::new();
        open.push_str("DOC");
        assert_eq!(open.match_ahead("DOCTYPE", false), MatchResult::NeedMoreInput);
        assert_eq!(open.match_ahead("--", false), MatchResult::Mismatch);
        open.close();
        assert_eq!(open.match_ahead("DOCTYPE", false), MatchResult::Mismatch);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut input = InputStream::new();
        input.push_str("a");
        assert_eq!(
            input.peek(2),
            vec![InputCharacter::Char('a'), InputCharacter::Pending]
        );
        assert_eq!(input.consume(), InputCharacter::Char('a'));
    }

    #[test]
    fn test_consume_many_allows_reconsume_of_last() {
        let mut input = InputStream::from_text("--x");
        input.consume_many(2);
        assert_eq!(input.position(), 2);
        input.reconsume();
        assert_eq!(input.consume(), InputCharacter::Char('-'));
        assert_eq!(input.consume(), InputCharacter::Char('x'));
    }

    #[test]
    fn test_compaction_keeps_positions() {
        let mut input = InputStream::new();
        let text = "z".repeat(COMPACT_THRESHOLD * 2);
        for c in text.chars() {
            input.push_char(c);
            assert_eq!(input.consume(), InputCharacter::Char(c));
        }
        input.push_char('!');
        assert_eq!(input.position(), COMPACT_THRESHOLD * 2);
        input.reconsume();
        assert_eq!(input.consume(), InputCharacter::Char('z'));
        assert_eq!(input.consume(), InputCharacter::Char('!'));
    }
}
