//! DOCTYPE states.
//!
//! [§ 13.2.5.53 - § 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//!
//! The public and system identifier chains mirror each other state for
//! state; [`DoctypeIdentifier`] picks which field and which errors apply.

use crate::tokenizer::error::ParseErrorKind;
use crate::tokenizer::input::MatchResult;
use crate::tokenizer::machine::{DoctypeIdentifier, HTMLTokenizer, TokenizerState};
use crate::tokenizer::token::Token;

impl DoctypeIdentifier {
    const fn before_identifier_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::BeforeDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::BeforeDOCTYPESystemIdentifier,
        }
    }

    const fn quoted_state(self, quote: char) -> TokenizerState {
        match (self, quote) {
            (Self::Public, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (Self::Public, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (Self::System, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (Self::System, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        }
    }

    const fn after_identifier_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::AfterDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::AfterDOCTYPESystemIdentifier,
        }
    }

    const fn missing_whitespace_after_keyword(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::MissingWhitespaceAfterDoctypePublicKeyword,
            Self::System => ParseErrorKind::MissingWhitespaceAfterDoctypeSystemKeyword,
        }
    }

    const fn missing_identifier(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::MissingDoctypePublicIdentifier,
            Self::System => ParseErrorKind::MissingDoctypeSystemIdentifier,
        }
    }

    const fn missing_quote(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::MissingQuoteBeforeDoctypePublicIdentifier,
            Self::System => ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier,
        }
    }

    const fn abrupt_end(self) -> ParseErrorKind {
        match self {
            Self::Public => ParseErrorKind::AbruptDoctypePublicIdentifier,
            Self::System => ParseErrorKind::AbruptDoctypeSystemIdentifier,
        }
    }
}

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(in crate::tokenizer) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "Switch to the before DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Reconsume in the before DOCTYPE name state."
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            // "EOF"
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE token. Set its
            // force-quirks flag to on. Emit the current token. Emit an end-of-file token."
            None => {
                self.begin_token(Token::new_doctype());
                self.emit_eof_in_doctype();
            }
            // "Anything else"
            // "This is a missing-whitespace-before-doctype-name parse error. Reconsume in
            // the before DOCTYPE name state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(in crate::tokenizer) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Create a new DOCTYPE token.
            // Set the token's name to a U+FFFD REPLACEMENT CHARACTER character. Switch to
            // the DOCTYPE name state."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.begin_token(Token::new_doctype());
                self.append_to_doctype_name('\u{FFFD}');
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE token. Set
            // its force-quirks flag to on. Switch to the data state. Emit the current token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::MissingDoctypeName);
                self.begin_token(Token::new_doctype());
                self.set_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF"
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE token. Set its
            // force-quirks flag to on. Emit the current token. Emit an end-of-file token."
            None => {
                self.begin_token(Token::new_doctype());
                self.emit_eof_in_doctype();
            }
            // "ASCII upper alpha"
            // "Create a new DOCTYPE token. Set the token's name to the lowercase version of
            // the current input character. Switch to the DOCTYPE name state."
            // "Anything else"
            // "Create a new DOCTYPE token. Set the token's name to the current input
            // character. Switch to the DOCTYPE name state."
            Some(c) => {
                self.begin_token(Token::new_doctype());
                self.append_to_doctype_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(in crate::tokenizer) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "Switch to the after DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD REPLACEMENT
            // CHARACTER character to the current DOCTYPE token's name."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.append_to_doctype_name('\u{FFFD}');
            }
            // "EOF"
            // "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.emit_eof_in_doctype(),
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the current
            // DOCTYPE token's name."
            Some(c) => self.append_to_doctype_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    ///
    /// [`HTMLTokenizer::step`] holds off on this state while an open stream
    /// could still spell `PUBLIC` or `SYSTEM`, so the lookahead here always
    /// decides.
    pub(in crate::tokenizer) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF"
            // "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
            // force-quirks flag to on. Emit the current DOCTYPE token. Emit an end-of-file token."
            None => self.emit_eof_in_doctype(),
            // "Anything else"
            Some(_) => {
                // The keyword starts with the current input character.
                self.input.reconsume();

                // "If the six characters starting from the current input character are an
                // ASCII case-insensitive match for the word "PUBLIC", then consume those
                // characters and switch to the after DOCTYPE public keyword state."
                if self.input.match_ahead("PUBLIC", true) == MatchResult::Matched {
                    self.input.consume_many(6);
                    self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                    return;
                }
                // "Otherwise, if the six characters starting from the current input character
                // are an ASCII case-insensitive match for the word "SYSTEM", then consume
                // those characters and switch to the after DOCTYPE system keyword state."
                if self.input.match_ahead("SYSTEM", true) == MatchResult::Matched {
                    self.input.consume_many(6);
                    self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                    return;
                }
                // "Otherwise, this is an invalid-character-sequence-after-doctype-name parse
                // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume
                // in the bogus DOCTYPE state."
                self.log_parse_error(ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName);
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(in crate::tokenizer) fn handle_after_doctype_keyword_state(
        &mut self,
        identifier: DoctypeIdentifier,
    ) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "Switch to the before DOCTYPE public identifier state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(identifier.before_identifier_state());
            }
            // "U+0022 QUOTATION MARK (")"
            // "U+0027 APOSTROPHE (')"
            // "This is a missing-whitespace-after-doctype-public-keyword parse error. Set the
            // current DOCTYPE token's public identifier to the empty string (not missing),
            // then switch to the DOCTYPE public identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(identifier.missing_whitespace_after_keyword());
                self.open_doctype_identifier(identifier, quote);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-doctype-public-identifier parse error. Set the current
            // DOCTYPE token's force-quirks flag to on. Switch to the data state. Emit the
            // current DOCTYPE token."
            Some('>') => self.close_doctype_early(identifier.missing_identifier()),
            // "EOF"
            None => self.emit_eof_in_doctype(),
            // "Anything else"
            // "This is a missing-quote-before-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Reconsume in the bogus
            // DOCTYPE state."
            Some(_) => self.reconsume_in_bogus_doctype(identifier.missing_quote()),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(in crate::tokenizer) fn handle_before_doctype_identifier_state(
        &mut self,
        identifier: DoctypeIdentifier,
    ) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "Set the current DOCTYPE token's public identifier to the empty string (not
            // missing), then switch to the DOCTYPE public identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => self.open_doctype_identifier(identifier, quote),
            Some('>') => self.close_doctype_early(identifier.missing_identifier()),
            None => self.emit_eof_in_doctype(),
            Some(_) => self.reconsume_in_bogus_doctype(identifier.missing_quote()),
        }
    }

    /// [§ 13.2.5.59 - § 13.2.5.60](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and [§ 13.2.5.65 - § 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    pub(in crate::tokenizer) fn handle_doctype_identifier_quoted_state(
        &mut self,
        identifier: DoctypeIdentifier,
        quote: char,
    ) {
        match self.current_input_character {
            // "U+0022 QUOTATION MARK (")"
            // "Switch to the after DOCTYPE public identifier state."
            Some(c) if c == quote => self.switch_to(identifier.after_identifier_state()),
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD REPLACEMENT
            // CHARACTER character to the current DOCTYPE token's public identifier."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.append_to_doctype_identifier(identifier, '\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an abrupt-doctype-public-identifier parse error. Set the current
            // DOCTYPE token's force-quirks flag to on. Switch to the data state. Emit the
            // current DOCTYPE token."
            Some('>') => self.close_doctype_early(identifier.abrupt_end()),
            None => self.emit_eof_in_doctype(),
            // "Append the current input character to the current DOCTYPE token's public
            // identifier."
            Some(c) => self.append_to_doctype_identifier(identifier, c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(in crate::tokenizer) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            // "Switch to the between DOCTYPE public and system identifiers state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "This is a missing-whitespace-between-doctype-public-and-system-identifiers
            // parse error. Set the current DOCTYPE token's system identifier to the empty
            // string (not missing), then switch to the DOCTYPE system identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(
                    ParseErrorKind::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.open_doctype_identifier(DoctypeIdentifier::System, quote);
            }
            None => self.emit_eof_in_doctype(),
            Some(_) => self.reconsume_in_bogus_doctype(
                ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier,
            ),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(in crate::tokenizer) fn handle_between_doctype_public_and_system_identifiers_state(
        &mut self,
    ) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.open_doctype_identifier(DoctypeIdentifier::System, quote);
            }
            None => self.emit_eof_in_doctype(),
            Some(_) => self.reconsume_in_bogus_doctype(
                ParseErrorKind::MissingQuoteBeforeDoctypeSystemIdentifier,
            ),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(in crate::tokenizer) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier parse error.
            // Reconsume in the bogus DOCTYPE state."
            //
            // Force-quirks is set here as well, so every bogus DOCTYPE is a quirky one.
            Some(_) => self.reconsume_in_bogus_doctype(
                ParseErrorKind::UnexpectedCharacterAfterDoctypeSystemIdentifier,
            ),
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(in crate::tokenizer) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Ignore the character."
            Some('\0') => self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter),
            // "EOF"
            // "Emit the DOCTYPE token. Emit an end-of-file token."
            None => self.emit_token_then_eof(),
            // "Anything else"
            // "Ignore the character."
            Some(_) => {}
        }
    }

    fn append_to_doctype_name(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_doctype_name(c);
        }
    }

    fn append_to_doctype_identifier(&mut self, identifier: DoctypeIdentifier, c: char) {
        if let Some(ref mut token) = self.current_token {
            match identifier {
                DoctypeIdentifier::Public => token.append_to_public_id(c),
                DoctypeIdentifier::System => token.append_to_system_id(c),
            }
        }
    }

    /// Set the identifier to the empty string (not missing) and start
    /// reading it inside `quote`.
    fn open_doctype_identifier(&mut self, identifier: DoctypeIdentifier, quote: char) {
        if let Some(ref mut token) = self.current_token {
            match identifier {
                DoctypeIdentifier::Public => token.set_public_id_empty(),
                DoctypeIdentifier::System => token.set_system_id_empty(),
            }
        }
        self.switch_to(identifier.quoted_state(quote));
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on. Switch to the
    /// data state. Emit the current DOCTYPE token."
    fn close_doctype_early(&mut self, error: ParseErrorKind) {
        self.log_parse_error(error);
        self.set_force_quirks();
        self.switch_to(TokenizerState::Data);
        self.emit_token();
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on. Reconsume in
    /// the bogus DOCTYPE state."
    fn reconsume_in_bogus_doctype(&mut self, error: ParseErrorKind) {
        self.log_parse_error(error);
        self.set_force_quirks();
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn emit_eof_in_doctype(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInDoctype);
        self.set_force_quirks();
        self.emit_token_then_eof();
    }
}
