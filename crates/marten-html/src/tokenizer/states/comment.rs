//! Comment states, the bogus comment state and markup declaration open.
//!
//! [§ 13.2.5.41 - § 13.2.5.52](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)

use crate::tokenizer::error::ParseErrorKind;
use crate::tokenizer::input::{InputCharacter, MatchResult};
use crate::tokenizer::machine::{HTMLTokenizer, Step, TokenizerState};
use crate::tokenizer::token::Token;

impl HTMLTokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(in crate::tokenizer) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF"
            // "Emit the comment. Emit an end-of-file token."
            None => self.emit_token_then_eof(),
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD REPLACEMENT
            // CHARACTER character to the comment token's data."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.append_to_comment('\u{FFFD}');
            }
            // "Anything else"
            // "Append the current input character to the comment token's data."
            Some(c) => self.append_to_comment(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Looks ahead instead of consuming a single character, so it runs
    /// before the usual consume in [`HTMLTokenizer::step`].
    pub(in crate::tokenizer) fn handle_markup_declaration_open_state(&mut self) -> Step {
        let comment = self.input.match_ahead("--", false);
        let doctype = self.input.match_ahead("DOCTYPE", true);
        let cdata = self.input.match_ahead("[CDATA[", true);

        // "If the next two characters are both U+002D HYPHEN-MINUS characters (-),
        // consume those two characters, create a comment token whose data is the
        // empty string, and switch to the comment start state."
        if comment == MatchResult::Matched {
            self.input.consume_many(2);
            self.begin_token(Token::new_comment(String::new()));
            self.switch_to(TokenizerState::CommentStart);
            return Step::Progress;
        }

        // "Otherwise, if the next seven characters are an ASCII case-insensitive
        // match for the word "DOCTYPE", then consume those characters and switch
        // to the DOCTYPE state."
        if doctype == MatchResult::Matched {
            self.input.consume_many(7);
            self.switch_to(TokenizerState::DOCTYPE);
            return Step::Progress;
        }

        // "Otherwise, if there is an adjusted current node and it is not an element
        // in the HTML namespace and the next seven characters are a case-sensitive
        // match for the string "[CDATA[", then consume those characters and switch
        // to the CDATA section state."
        if cdata == MatchResult::Matched {
            // The keyword as written, so a bogus comment keeps the source casing.
            let keyword: String = self
                .input
                .peek(7)
                .into_iter()
                .filter_map(|c| match c {
                    InputCharacter::Char(c) => Some(c),
                    InputCharacter::Eof | InputCharacter::Pending => None,
                })
                .collect();
            self.input.consume_many(7);
            if self.allow_cdata {
                self.switch_to(TokenizerState::CDATASection);
            } else {
                // "Otherwise, this is a cdata-in-html-content parse error. Create a
                // comment token whose data is the "[CDATA[" string. Switch to the
                // bogus comment state."
                self.log_parse_error(ParseErrorKind::CdataInHtmlContent);
                self.begin_token(Token::new_comment(keyword));
                self.switch_to(TokenizerState::BogusComment);
            }
            return Step::Progress;
        }

        if [comment, doctype, cdata].contains(&MatchResult::NeedMoreInput) {
            return Step::NeedMoreInput;
        }

        // "Anything else"
        // "This is an incorrectly-opened-comment parse error. Create a comment token
        // whose data is the empty string. Switch to the bogus comment state (don't
        // consume anything in the current state)."
        self.log_parse_error(ParseErrorKind::IncorrectlyOpenedComment);
        self.begin_token(Token::new_comment(String::new()));
        self.switch_to(TokenizerState::BogusComment);
        Step::Progress
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(in crate::tokenizer) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment start dash state."
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "Anything else"
            // "Reconsume in the comment state."
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(in crate::tokenizer) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment end state."
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF"
            // "This is an eof-in-comment parse error. Emit the current comment token.
            // Emit an end-of-file token."
            None => self.emit_eof_in_comment(),
            // "Anything else"
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment token's data.
            // Reconsume in the comment state."
            Some(_) => {
                self.append_to_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(in crate::tokenizer) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<)"
            // "Append the current input character to the comment token's data. Switch to
            // the comment less-than sign state."
            Some('<') => {
                self.append_to_comment('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment end dash state."
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD REPLACEMENT
            // CHARACTER character to the comment token's data."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.append_to_comment('\u{FFFD}');
            }
            // "EOF"
            // "This is an eof-in-comment parse error. Emit the current comment token.
            // Emit an end-of-file token."
            None => self.emit_eof_in_comment(),
            // "Anything else"
            // "Append the current input character to the comment token's data."
            Some(c) => self.append_to_comment(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(in crate::tokenizer) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!)"
            // "Append the current input character to the comment token's data. Switch to
            // the comment less-than sign bang state."
            Some('!') => {
                self.append_to_comment('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            // "U+003C LESS-THAN SIGN (<)"
            // "Append the current input character to the comment token's data."
            Some('<') => self.append_to_comment('<'),
            // "Anything else"
            // "Reconsume in the comment state."
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(in crate::tokenizer) fn handle_comment_less_than_sign_bang_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment less-than sign bang dash state."
            Some('-') => self.switch_to(TokenizerState::CommentLessThanSignBangDash),
            // "Anything else"
            // "Reconsume in the comment state."
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(in crate::tokenizer) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment less-than sign bang dash dash state."
            Some('-') => self.switch_to(TokenizerState::CommentLessThanSignBangDashDash),
            // "Anything else"
            // "Reconsume in the comment end dash state."
            _ => self.reconsume_in(TokenizerState::CommentEndDash),
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(in crate::tokenizer) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "EOF"
            // "Reconsume in the comment end state."
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            // "Anything else"
            // "This is a nested-comment parse error. Reconsume in the comment end state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(in crate::tokenizer) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment end state."
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            // "EOF"
            // "This is an eof-in-comment parse error. Emit the current comment token.
            // Emit an end-of-file token."
            None => self.emit_eof_in_comment(),
            // "Anything else"
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment token's data.
            // Reconsume in the comment state."
            Some(_) => {
                self.append_to_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(in crate::tokenizer) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the comment end bang state."
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            // "U+002D HYPHEN-MINUS (-)"
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment token's data."
            Some('-') => self.append_to_comment('-'),
            // "EOF"
            // "This is an eof-in-comment parse error. Emit the current comment token.
            // Emit an end-of-file token."
            None => self.emit_eof_in_comment(),
            // "Anything else"
            // "Append two U+002D HYPHEN-MINUS characters (-) to the comment token's data.
            // Reconsume in the comment state."
            Some(_) => {
                self.append_str_to_comment("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(in crate::tokenizer) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Append two U+002D HYPHEN-MINUS characters (-) and a U+0021 EXCLAMATION MARK
            // character (!) to the comment token's data. Switch to the comment end dash state."
            Some('-') => {
                self.append_str_to_comment("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an incorrectly-closed-comment parse error. Switch to the data state.
            // Emit the current comment token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::IncorrectlyClosedComment);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF"
            // "This is an eof-in-comment parse error. Emit the current comment token.
            // Emit an end-of-file token."
            None => self.emit_eof_in_comment(),
            // "Anything else"
            // "Append two U+002D HYPHEN-MINUS characters (-) and a U+0021 EXCLAMATION MARK
            // character (!) to the comment token's data. Reconsume in the comment state."
            Some(_) => {
                self.append_str_to_comment("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn emit_eof_in_comment(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInComment);
        self.emit_token_then_eof();
    }
}
