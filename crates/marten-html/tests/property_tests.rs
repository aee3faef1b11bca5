//! Property tests over arbitrary and markup-heavy input.

use marten_html::{HTMLTokenizer, Token, TokenizerConfig, tokenize};
use quickcheck_macros::quickcheck;

/// Pieces that steer the tokenizer through most of its states.
const FRAGMENTS: &[&str] = &[
    "<", ">", "/", "!", "-", "--", "?", "&", "#", "x", ";", "=", "\"", "'", " ", "\n", "\r",
    "\0", "]", "]]", "a", "Z", "0", "9", "<!--", "-->", "<!DOCTYPE", "PUBLIC", "SYSTEM",
    "[CDATA[", "<script>", "</script>", "<style>", "</style>", "<title>", "</title>",
    "<plaintext>", "amp", "not", "copy", "notin", "é", "😀",
];

fn markup_from(indices: &[u8]) -> String {
    indices
        .iter()
        .map(|&i| FRAGMENTS[usize::from(i) % FRAGMENTS.len()])
        .collect()
}

fn push_char_by_char(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::streaming(TokenizerConfig::default());
    let mut tokens = Vec::new();
    for c in input.chars() {
        tokenizer.feed_char(c, |t| tokens.push(t));
    }
    tokenizer.finish(|t| tokens.push(t));
    tokens
}

fn ends_with_single_eof(tokens: &[Token]) -> bool {
    tokens.last().is_some_and(Token::is_eof) && tokens.iter().filter(|t| t.is_eof()).count() == 1
}

#[quickcheck]
fn prop_arbitrary_text_ends_with_one_eof(input: String) -> bool {
    ends_with_single_eof(&tokenize(&input))
}

#[quickcheck]
fn prop_markup_ends_with_one_eof(indices: Vec<u8>) -> bool {
    ends_with_single_eof(&tokenize(&markup_from(&indices)))
}

#[quickcheck]
fn prop_tokenizing_is_deterministic(indices: Vec<u8>) -> bool {
    let input = markup_from(&indices);
    tokenize(&input) == tokenize(&input)
}

#[quickcheck]
fn prop_push_matches_pull(indices: Vec<u8>) -> bool {
    let input = markup_from(&indices);
    push_char_by_char(&input) == tokenize(&input)
}

#[quickcheck]
fn prop_push_matches_pull_for_arbitrary_text(input: String) -> bool {
    push_char_by_char(&input) == tokenize(&input)
}

#[quickcheck]
fn prop_no_carriage_returns_or_nulls_in_text(indices: Vec<u8>) -> bool {
    // CR is normalized to LF and NUL becomes U+FFFD in every state.
    tokenize(&markup_from(&indices))
        .iter()
        .all(|t| !matches!(t, Token::Character { data: '\r' | '\0' }))
}

#[quickcheck]
fn prop_plain_text_round_trips(input: String) -> bool {
    let text: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '&' | '\0' | '\r'))
        .collect();
    let decoded: String = tokenize(&text)
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect();
    decoded == text
}

#[quickcheck]
fn prop_attribute_names_are_unique(indices: Vec<u8>) -> bool {
    tokenize(&markup_from(&indices)).iter().all(|t| match t {
        Token::StartTag { attributes, .. } => {
            let mut names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
            names.sort_unstable();
            names.windows(2).all(|pair| pair[0] != pair[1])
        }
        _ => true,
    })
}

#[quickcheck]
fn prop_tag_names_have_no_ascii_uppercase(indices: Vec<u8>) -> bool {
    tokenize(&markup_from(&indices))
        .iter()
        .filter_map(Token::tag_name)
        .all(|name| !name.chars().any(|c| c.is_ascii_uppercase()))
}
