//! Integration tests for the HTML tokenizer.

use marten_html::{
    ContentModel, HTMLTokenizer, ParseErrorKind, Token, TokenizerConfig, TokenizerState, tokenize,
};

/// Helper to tokenize a string and return the tokens with the parse errors
fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<ParseErrorKind>) {
    tokenize_with_config(input, TokenizerConfig::default())
}

fn tokenize_with_config(input: &str, config: TokenizerConfig) -> (Vec<Token>, Vec<ParseErrorKind>) {
    let mut tokenizer = HTMLTokenizer::with_config(input, config);
    tokenizer.run();
    let errors = tokenizer.parse_errors().iter().map(|e| e.kind).collect();
    (tokenizer.into_tokens(), errors)
}

/// Concatenate the data of every character token.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

/// The characters between the first token and the last two (end tag, EOF).
fn element_content(tokens: &[Token]) -> String {
    text_of(&tokens[1..tokens.len() - 2])
}

fn only_attribute_value(token: &Token) -> &str {
    match token {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            &attributes[0].value
        }
        _ => panic!("Expected StartTag token, got {token}"),
    }
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfInput));
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), vec![Token::EndOfInput]);
}

#[test]
fn test_paragraph_sequence() {
    assert_eq!(
        tokenize("<p>hi</p>"),
        vec![
            Token::StartTag {
                name: "p".to_string(),
                attributes: vec![],
                self_closing: false,
            },
            Token::Character { data: 'h' },
            Token::Character { data: 'i' },
            Token::EndTag {
                name: "p".to_string()
            },
            Token::EndOfInput,
        ]
    );
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_id,
            system_id,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_id.is_none());
            assert!(system_id.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_end_tag_named("div"));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize(r#"<DiV CLASS="Mixed">"#);
    assert!(tokens[0].is_start_tag_named("div"));
    // Values keep their case
    assert_eq!(tokens[0].attribute("class"), Some("Mixed"));
}

#[test]
fn test_tag_name_with_null() {
    let (tokens, errors) = tokenize_with_errors("<a\0b>");
    assert_eq!(tokens[0].tag_name(), Some("a\u{FFFD}b"));
    assert_eq!(errors, vec![ParseErrorKind::UnexpectedNullCharacter]);
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- This is a comment -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " This is a comment "),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="container">"#);
    assert_eq!(tokens[0].attribute("class"), Some("container"));
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='container'>");
    assert_eq!(tokens[0].attribute("class"), Some("container"));
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=container>");
    assert_eq!(tokens[0].attribute("class"), Some("container"));
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    assert_eq!(tokens[0].attribute("disabled"), Some(""));
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" name="username" disabled>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            let names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, ["type", "name", "disabled"]);
            assert_eq!(attributes[0].value, "text");
            assert_eq!(attributes[1].value, "username");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let (tokens, errors) = tokenize_with_errors(r#"<a href="x" href="y">"#);
    assert_eq!(only_attribute_value(&tokens[0]), "x");
    assert_eq!(errors, vec![ParseErrorKind::DuplicateAttribute]);
}

#[test]
fn test_duplicate_attribute_is_case_insensitive() {
    let tokens = tokenize(r#"<a ID="one" id="two">"#);
    assert_eq!(only_attribute_value(&tokens[0]), "one");
}

#[test]
fn test_attribute_without_whitespace_between() {
    let (tokens, errors) = tokenize_with_errors(r#"<a x="1"y="2">"#);
    assert_eq!(tokens[0].attribute("x"), Some("1"));
    assert_eq!(tokens[0].attribute("y"), Some("2"));
    assert_eq!(errors, vec![ParseErrorKind::MissingWhitespaceBetweenAttributes]);
}

#[test]
fn test_equals_sign_before_attribute_name() {
    let (tokens, errors) = tokenize_with_errors("<div =foo>");
    assert_eq!(tokens[0].attribute("=foo"), Some(""));
    assert_eq!(
        errors,
        vec![ParseErrorKind::UnexpectedEqualsSignBeforeAttributeName]
    );
}

#[test]
fn test_missing_attribute_value() {
    let (tokens, errors) = tokenize_with_errors("<div a=>");
    assert_eq!(tokens[0].attribute("a"), Some(""));
    assert_eq!(errors, vec![ParseErrorKind::MissingAttributeValue]);
}

#[test]
fn test_unexpected_character_in_unquoted_value() {
    let (tokens, errors) = tokenize_with_errors("<div a=b'c>");
    assert_eq!(tokens[0].attribute("a"), Some("b'c"));
    assert_eq!(
        errors,
        vec![ParseErrorKind::UnexpectedCharacterInUnquotedAttributeValue]
    );
}

#[test]
fn test_solidus_inside_tag() {
    let (tokens, errors) = tokenize_with_errors("<div / a>");
    assert_eq!(tokens[0].attribute("a"), Some(""));
    assert!(matches!(
        tokens[0],
        Token::StartTag {
            self_closing: false,
            ..
        }
    ));
    assert_eq!(errors, vec![ParseErrorKind::UnexpectedSolidusInTag]);
}

#[test]
fn test_end_tag_attributes_are_dropped() {
    let (tokens, errors) = tokenize_with_errors(r#"</div class="x">"#);
    assert_eq!(
        tokens[0],
        Token::EndTag {
            name: "div".to_string()
        }
    );
    assert_eq!(errors, vec![ParseErrorKind::EndTagWithAttributes]);
}

#[test]
fn test_end_tag_trailing_solidus() {
    let (tokens, errors) = tokenize_with_errors("</br/>");
    assert!(tokens[0].is_end_tag_named("br"));
    assert_eq!(errors, vec![ParseErrorKind::EndTagWithTrailingSolidus]);
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hello</p>");
    assert!(tokens[0].is_start_tag_named("p"));
    assert_eq!(element_content(&tokens), "Hello");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("p"));
}

#[test]
fn test_simple_html_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>"#;
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfInput)));

    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .count();
    let end_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .count();

    assert_eq!(start_tags, 4); // html, head, title, body
    assert_eq!(end_tags, 4); // /title, /head, /body, /html
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

// ========== Data state edge cases ==========

#[test]
fn test_null_in_data_becomes_replacement_character() {
    let (tokens, errors) = tokenize_with_errors("a\0b");
    assert_eq!(text_of(&tokens), "a\u{FFFD}b");
    assert_eq!(errors, vec![ParseErrorKind::UnexpectedNullCharacter]);
}

#[test]
fn test_less_than_followed_by_space() {
    let (tokens, errors) = tokenize_with_errors("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert_eq!(errors, vec![ParseErrorKind::InvalidFirstCharacterOfTagName]);
}

#[test]
fn test_less_than_at_end_of_input() {
    let (tokens, errors) = tokenize_with_errors("<");
    assert_eq!(
        tokens,
        vec![Token::Character { data: '<' }, Token::EndOfInput]
    );
    assert_eq!(errors, vec![ParseErrorKind::EofBeforeTagName]);
}

#[test]
fn test_end_tag_open_at_end_of_input() {
    let tokens = tokenize("</");
    assert_eq!(text_of(&tokens), "</");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_end_of_input_inside_tag_name() {
    let (tokens, errors) = tokenize_with_errors("<di");
    assert_eq!(tokens, vec![Token::EndOfInput]);
    assert_eq!(errors, vec![ParseErrorKind::EofInTag]);
}

#[test]
fn test_end_of_input_inside_attribute_value() {
    let tokens = tokenize(r#"x<a href="foo"#);
    assert_eq!(
        tokens,
        vec![Token::Character { data: 'x' }, Token::EndOfInput]
    );
}

#[test]
fn test_empty_end_tag() {
    let (tokens, errors) = tokenize_with_errors("a</>b");
    assert_eq!(text_of(&tokens), "ab");
    assert_eq!(errors, vec![ParseErrorKind::MissingEndTagName]);
}

// ========== Comments ==========

#[test]
fn test_empty_comment() {
    assert_eq!(tokenize("<!---->")[0], Token::new_comment(String::new()));
}

#[test]
fn test_abruptly_closed_comment() {
    let (tokens, errors) = tokenize_with_errors("<!-->");
    assert_eq!(tokens[0], Token::new_comment(String::new()));
    assert_eq!(errors, vec![ParseErrorKind::AbruptClosingOfEmptyComment]);
}

#[test]
fn test_comment_closed_with_bang() {
    let (tokens, errors) = tokenize_with_errors("<!--a--!>");
    assert_eq!(tokens[0], Token::new_comment("a".to_string()));
    assert_eq!(errors, vec![ParseErrorKind::IncorrectlyClosedComment]);
}

#[test]
fn test_comment_with_dashes_inside() {
    let tokens = tokenize("<!--a-b--c--->");
    assert_eq!(tokens[0], Token::new_comment("a-b--c-".to_string()));
}

#[test]
fn test_nested_comment() {
    let (tokens, errors) = tokenize_with_errors("<!--a<!--b-->");
    assert_eq!(tokens[0], Token::new_comment("a<!--b".to_string()));
    assert_eq!(errors, vec![ParseErrorKind::NestedComment]);
}

#[test]
fn test_unterminated_comment() {
    let (tokens, errors) = tokenize_with_errors("<!--unterminated");
    assert_eq!(
        tokens,
        vec![
            Token::new_comment("unterminated".to_string()),
            Token::EndOfInput
        ]
    );
    assert_eq!(errors, vec![ParseErrorKind::EofInComment]);
}

#[test]
fn test_processing_instruction_is_bogus_comment() {
    let (tokens, errors) = tokenize_with_errors(r#"<?xml version="1.0"?>"#);
    assert_eq!(
        tokens[0],
        Token::new_comment(r#"?xml version="1.0"?"#.to_string())
    );
    assert_eq!(
        errors,
        vec![ParseErrorKind::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

#[test]
fn test_incorrectly_opened_comment() {
    let (tokens, errors) = tokenize_with_errors("<!foo>");
    assert_eq!(tokens[0], Token::new_comment("foo".to_string()));
    assert_eq!(errors, vec![ParseErrorKind::IncorrectlyOpenedComment]);
}

#[test]
fn test_invalid_end_tag_is_bogus_comment() {
    let tokens = tokenize("</ x>");
    assert_eq!(tokens[0], Token::new_comment(" x".to_string()));
}

#[test]
fn test_bogus_comment_at_end_of_input() {
    let tokens = tokenize("<!");
    assert_eq!(
        tokens,
        vec![Token::new_comment(String::new()), Token::EndOfInput]
    );
}

// ========== CDATA ==========

#[test]
fn test_cdata_in_html_content_is_comment() {
    let (tokens, errors) = tokenize_with_errors("<![CDATA[x]]>");
    assert_eq!(tokens[0], Token::new_comment("[CDATA[x]]".to_string()));
    assert_eq!(errors, vec![ParseErrorKind::CdataInHtmlContent]);
}

#[test]
fn test_lowercase_cdata_comment_keeps_source_text() {
    let (tokens, errors) = tokenize_with_errors("<![cdata[x]]>");
    assert_eq!(
        tokens,
        vec![
            Token::new_comment("[cdata[x]]".to_string()),
            Token::EndOfInput
        ]
    );
    assert_eq!(errors, vec![ParseErrorKind::CdataInHtmlContent]);
}

#[test]
fn test_cdata_in_foreign_content() {
    let config = TokenizerConfig {
        allow_cdata: true,
        ..TokenizerConfig::default()
    };
    let (tokens, errors) = tokenize_with_config("<![CDATA[a]b]]c<d>]]>e", config);
    assert_eq!(text_of(&tokens), "a]b]]c<d>e");
    assert!(errors.is_empty());
}

#[test]
fn test_cdata_at_end_of_input() {
    let config = TokenizerConfig {
        allow_cdata: true,
        ..TokenizerConfig::default()
    };
    let (tokens, errors) = tokenize_with_config("<![CDATA[abc", config);
    assert_eq!(text_of(&tokens), "abc");
    assert_eq!(errors, vec![ParseErrorKind::EofInCdata]);
}

// ========== DOCTYPE ==========

#[test]
fn test_empty_doctype_forces_quirks() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: None,
            public_id: None,
            system_id: None,
            force_quirks: true,
        }
    );
    assert_eq!(errors, vec![ParseErrorKind::MissingDoctypeName]);
}

#[test]
fn test_doctype_keyword_is_case_insensitive() {
    let tokens = tokenize("<!doctype HTML>");
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), force_quirks: false, .. } if n == "html"));
}

#[test]
fn test_doctype_without_space() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPEhtml>");
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));
    assert_eq!(errors, vec![ParseErrorKind::MissingWhitespaceBeforeDoctypeName]);
}

#[test]
fn test_doctype_public_and_system() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_id: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_id: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_system_single_quoted() {
    let tokens = tokenize("<!doctype html system 'about:legacy-compat'>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_id: None,
            system_id: Some("about:legacy-compat".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_empty_public_identifier() {
    let tokens = tokenize(r#"<!DOCTYPE html PUBLIC "">"#);
    assert!(matches!(
        &tokens[0],
        Token::Doctype { public_id: Some(id), system_id: None, force_quirks: false, .. } if id.is_empty()
    ));
}

#[test]
fn test_doctype_missing_public_identifier() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE html PUBLIC>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            public_id: None,
            force_quirks: true,
            ..
        }
    ));
    assert_eq!(errors, vec![ParseErrorKind::MissingDoctypePublicIdentifier]);
}

#[test]
fn test_doctype_abrupt_public_identifier() {
    let (tokens, errors) = tokenize_with_errors(r#"<!DOCTYPE html PUBLIC "abc>"#);
    assert!(matches!(
        &tokens[0],
        Token::Doctype { public_id: Some(id), force_quirks: true, .. } if id == "abc"
    ));
    assert_eq!(errors, vec![ParseErrorKind::AbruptDoctypePublicIdentifier]);
}

#[test]
fn test_doctype_garbage_after_name_is_bogus() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE html bogus stuff>x");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_id: None,
            system_id: None,
            force_quirks: true,
        }
    );
    assert_eq!(text_of(&tokens), "x");
    assert_eq!(
        errors,
        vec![ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName]
    );
}

#[test]
fn test_doctype_garbage_after_system_identifier_is_bogus() {
    let (tokens, errors) = tokenize_with_errors(r#"<!DOCTYPE html PUBLIC "a" "b" c>"#);
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_id: Some("a".to_string()),
            system_id: Some("b".to_string()),
            force_quirks: true,
        }
    );
    assert_eq!(
        errors,
        vec![ParseErrorKind::UnexpectedCharacterAfterDoctypeSystemIdentifier]
    );
}

#[test]
fn test_doctype_at_end_of_input() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE");
    assert_eq!(
        tokens,
        vec![
            Token::Doctype {
                name: None,
                public_id: None,
                system_id: None,
                force_quirks: true,
            },
            Token::EndOfInput
        ]
    );
    assert_eq!(errors, vec![ParseErrorKind::EofInDoctype]);
}

#[test]
fn test_doctype_name_at_end_of_input() {
    let tokens = tokenize("<!DOCTYPE ht");
    assert!(matches!(
        &tokens[0],
        Token::Doctype { name: Some(n), force_quirks: true, .. } if n == "ht"
    ));
    assert_eq!(tokens.len(), 2);
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize("<style>body { color: red; }</style>");
    assert!(tokens[0].is_start_tag_named("style"));
    assert_eq!(element_content(&tokens), "body { color: red; }");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfInput)));
}

#[test]
fn test_title_element_rcdata() {
    let tokens = tokenize("<title>My Page</title>");
    assert!(tokens[0].is_start_tag_named("title"));
    assert_eq!(element_content(&tokens), "My Page");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("title"));
}

#[test]
fn test_title_decodes_character_references() {
    let tokens = tokenize("<title>a &amp; b</title>");
    assert_eq!(element_content(&tokens), "a & b");
}

#[test]
fn test_style_does_not_decode_character_references() {
    let tokens = tokenize("<style>a &amp; b</style>");
    assert_eq!(element_content(&tokens), "a &amp; b");
}

#[test]
fn test_style_with_fake_tags() {
    // Tags inside style should NOT be parsed as tags
    let tokens = tokenize("<style><div>not a tag</div></style>");
    assert_eq!(element_content(&tokens), "<div>not a tag</div>");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("style"));
}

#[test]
fn test_title_with_less_than() {
    let tokens = tokenize("<title>a < b</title>");
    assert_eq!(element_content(&tokens), "a < b");
}

#[test]
fn test_style_with_wrong_end_tag() {
    // </notastyle> inside style should NOT close the style element
    let tokens = tokenize("<style>a</notastyle>b</style>");
    assert_eq!(element_content(&tokens), "a</notastyle>b");
}

#[test]
fn test_rawtext_end_tag_is_case_insensitive() {
    let tokens = tokenize("<style>x</STYLE>");
    assert_eq!(element_content(&tokens), "x");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("style"));
}

#[test]
fn test_textarea_element_rcdata() {
    let tokens = tokenize("<textarea><b>bold?</b></textarea>");
    assert!(tokens[0].is_start_tag_named("textarea"));
    assert_eq!(element_content(&tokens), "<b>bold?</b>");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("textarea"));
}

#[test]
fn test_xmp_element_rawtext() {
    let tokens = tokenize("<xmp><html>is text</html></xmp>");
    assert!(tokens[0].is_start_tag_named("xmp"));
    assert_eq!(element_content(&tokens), "<html>is text</html>");
}

#[test]
fn test_iframe_element_rawtext() {
    let tokens = tokenize("<iframe>some content</iframe>");
    assert!(tokens[0].is_start_tag_named("iframe"));
    assert_eq!(element_content(&tokens), "some content");
}

#[test]
fn test_null_in_rawtext() {
    let tokens = tokenize("<style>\0</style>");
    assert_eq!(element_content(&tokens), "\u{FFFD}");
}

#[test]
fn test_rawtext_at_end_of_input() {
    let tokens = tokenize("<style>abc</sty");
    assert_eq!(text_of(&tokens), "abc</sty");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize("<plaintext><b></plaintext>");
    assert!(tokens[0].is_start_tag_named("plaintext"));
    assert_eq!(text_of(&tokens), "<b></plaintext>");
    assert_eq!(tokens.len(), 1 + "<b></plaintext>".len() + 1);
}

#[test]
fn test_text_element_switching_can_be_disabled() {
    let config = TokenizerConfig {
        switch_on_text_elements: false,
        ..TokenizerConfig::default()
    };
    let (tokens, _) = tokenize_with_config("<style><b></style>", config);
    assert!(tokens[0].is_start_tag_named("style"));
    assert!(tokens[1].is_start_tag_named("b"));
    assert!(tokens[2].is_end_tag_named("style"));
}

#[test]
fn test_fragment_starts_in_rcdata() {
    let config = TokenizerConfig {
        initial_state: ContentModel::RCDATA,
        last_start_tag: Some("title".to_string()),
        ..TokenizerConfig::default()
    };
    let (tokens, _) = tokenize_with_config("a<b></title>x", config);
    assert_eq!(text_of(&tokens), "a<b>x");
    assert!(tokens.iter().any(|t| t.is_end_tag_named("title")));
    assert!(!tokens.iter().any(|t| t.is_start_tag_named("b")));
}

#[test]
fn test_set_state_from_tree_builder() {
    let mut tokenizer = HTMLTokenizer::new("<b>");
    tokenizer.set_state(ContentModel::PLAINTEXT);
    assert_eq!(tokenizer.state(), TokenizerState::PLAINTEXT);
    tokenizer.run();
    assert_eq!(text_of(tokenizer.tokens()), "<b>");
}

#[test]
fn test_every_content_model_starts_cleanly() {
    let models = [
        ContentModel::Data,
        ContentModel::RCDATA,
        ContentModel::RAWTEXT,
        ContentModel::ScriptData,
        ContentModel::PLAINTEXT,
        ContentModel::CDATASection,
    ];
    for model in models {
        let config = TokenizerConfig {
            initial_state: model,
            ..TokenizerConfig::default()
        };
        let (tokens, _) = tokenize_with_config("amp;&amp;<x>", config);
        assert_eq!(tokens.last(), Some(&Token::EndOfInput), "{model:?}");
        assert!(text_of(&tokens).starts_with("amp;"), "{model:?}");

        let mut tokenizer = HTMLTokenizer::new("amp;");
        tokenizer.set_state(model);
        tokenizer.run();
        assert_eq!(text_of(tokenizer.tokens()), "amp;", "{model:?}");
    }
}

// ========== Script data ==========

#[test]
fn test_script_content() {
    let tokens = tokenize("<script>if (a < b && c) {}</script>");
    assert!(tokens[0].is_start_tag_named("script"));
    assert_eq!(element_content(&tokens), "if (a < b && c) {}");
    assert!(tokens[tokens.len() - 2].is_end_tag_named("script"));
}

#[test]
fn test_script_escaped_comment() {
    let tokens = tokenize("<script><!-- x --></script>");
    assert_eq!(element_content(&tokens), "<!-- x -->");
}

#[test]
fn test_script_double_escaped() {
    // The inner </script> sits inside a double escaped section and does not
    // end the element.
    let tokens = tokenize("<script><!--<script>x</script>--></script>");
    assert_eq!(element_content(&tokens), "<!--<script>x</script>-->");
    assert_eq!(
        tokens.iter().filter(|t| t.is_end_tag_named("script")).count(),
        1
    );
}

#[test]
fn test_script_escaped_end_tag_closes() {
    let tokens = tokenize("<script><!-- a </script>b");
    assert_eq!(text_of(&tokens), "<!-- a b");
    assert!(tokens.iter().any(|t| t.is_end_tag_named("script")));
}

#[test]
fn test_script_escaped_at_end_of_input() {
    let (tokens, errors) = tokenize_with_errors("<script><!-- a");
    assert_eq!(text_of(&tokens), "<!-- a");
    assert_eq!(errors, vec![ParseErrorKind::EofInScriptHtmlCommentLikeText]);
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    // [§ 13.2.5.72 Character reference state]
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    assert_eq!(tokens.len(), 6);
    assert_eq!(text_of(&tokens), "a & b");
}

#[test]
fn test_ampersand_at_end_of_input() {
    let tokens = tokenize("a&");
    assert_eq!(text_of(&tokens), "a&");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_named_character_reference_amp() {
    let tokens = tokenize("a &amp; b");
    assert_eq!(text_of(&tokens), "a & b");
}

#[test]
fn test_named_character_reference_lt_gt() {
    let tokens = tokenize("&lt;div&gt;");
    assert_eq!(text_of(&tokens), "<div>");
}

#[test]
fn test_named_character_reference_two_code_points() {
    let tokens = tokenize("&NotEqualTilde;");
    assert_eq!(text_of(&tokens), "\u{2242}\u{0338}");
}

#[test]
fn test_named_character_reference_long_tail() {
    let (tokens, errors) = tokenize_with_errors("&CounterClockwiseContourIntegral;&bigtriangleup;");
    assert_eq!(text_of(&tokens), "\u{2233}\u{25B3}");
    assert!(errors.is_empty());
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon still decode
    let (tokens, errors) = tokenize_with_errors("&amp is ok");
    assert_eq!(text_of(&tokens), "& is ok");
    assert_eq!(
        errors,
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_named_character_reference_longest_legacy_prefix() {
    // "&notit;" is not an entity; the legacy "&not" is the longest match.
    let tokens = tokenize("&notit;");
    assert_eq!(text_of(&tokens), "\u{00AC}it;");
}

#[test]
fn test_named_character_reference_full_match_beats_prefix() {
    let tokens = tokenize("&notin;");
    assert_eq!(text_of(&tokens), "\u{2209}");
}

#[test]
fn test_named_character_reference_unknown() {
    let (tokens, errors) = tokenize_with_errors("&bogus;");
    assert_eq!(text_of(&tokens), "&bogus;");
    assert_eq!(errors, vec![ParseErrorKind::UnknownNamedCharacterReference]);
}

#[test]
fn test_named_character_reference_at_end_of_input() {
    let tokens = tokenize("x&am");
    assert_eq!(text_of(&tokens), "x&am");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_unterminated_reference_followed_by_equals_in_text() {
    // Outside attributes the historical exception does not apply.
    let tokens = tokenize("&amp=");
    assert_eq!(text_of(&tokens), "&=");
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    assert_eq!(only_attribute_value(&tokens[0]), "?a=1&b=2");
}

#[test]
fn test_ambiguous_ampersand_in_attribute() {
    let (tokens, errors) = tokenize_with_errors(r#"<a href="?x=1&amp=2">"#);
    assert_eq!(only_attribute_value(&tokens[0]), "?x=1&amp=2");
    assert!(errors.is_empty());
}

#[test]
fn test_ambiguous_ampersand_alphanumeric_in_attribute() {
    let tokens = tokenize("<a href=?q&copyright>");
    assert_eq!(only_attribute_value(&tokens[0]), "?q&copyright");
}

#[test]
fn test_unterminated_reference_before_quote_in_attribute() {
    let (tokens, errors) = tokenize_with_errors(r#"<a title="&copy">"#);
    assert_eq!(only_attribute_value(&tokens[0]), "\u{00A9}");
    assert_eq!(
        errors,
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_unknown_reference_in_attribute() {
    let tokens = tokenize("<a title='&zzz;'>");
    assert_eq!(only_attribute_value(&tokens[0]), "&zzz;");
}

#[test]
fn test_decimal_character_reference() {
    assert_eq!(text_of(&tokenize("&#65;&#0066;")), "AB");
}

#[test]
fn test_hexadecimal_character_reference() {
    assert_eq!(text_of(&tokenize("&#x41;&#X62;&#x00e9;")), "Abé");
}

#[test]
fn test_numeric_reference_without_semicolon() {
    let (tokens, errors) = tokenize_with_errors("&#65x");
    assert_eq!(text_of(&tokens), "Ax");
    assert_eq!(
        errors,
        vec![ParseErrorKind::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_numeric_reference_without_digits() {
    let (tokens, errors) = tokenize_with_errors("&#;&#x;");
    assert_eq!(text_of(&tokens), "&#;&#x;");
    assert_eq!(
        errors,
        vec![
            ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference,
            ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference
        ]
    );
}

#[test]
fn test_numeric_reference_replacements() {
    let cases = [
        ("&#0;", ParseErrorKind::NullCharacterReference),
        ("&#x110000;", ParseErrorKind::CharacterReferenceOutsideUnicodeRange),
        ("&#99999999999999999999;", ParseErrorKind::CharacterReferenceOutsideUnicodeRange),
        ("&#xD800;", ParseErrorKind::SurrogateCharacterReference),
        ("&#xFFFF;", ParseErrorKind::NoncharacterCharacterReference),
    ];
    for (input, expected) in cases {
        let (tokens, errors) = tokenize_with_errors(input);
        assert_eq!(text_of(&tokens), "\u{FFFD}", "{input}");
        assert_eq!(errors, vec![expected], "{input}");
    }
}

#[test]
fn test_numeric_reference_windows_1252_remap() {
    let (tokens, errors) = tokenize_with_errors("&#x80;&#150;");
    assert_eq!(text_of(&tokens), "\u{20AC}\u{2013}");
    assert_eq!(
        errors,
        vec![
            ParseErrorKind::ControlCharacterReference,
            ParseErrorKind::ControlCharacterReference
        ]
    );
}

#[test]
fn test_numeric_reference_in_attribute() {
    let tokens = tokenize("<a b='&#x26;&#38'>");
    assert_eq!(only_attribute_value(&tokens[0]), "&&");
}

// ========== Parse error reporting ==========

#[test]
fn test_parse_error_position_and_code() {
    let mut tokenizer = HTMLTokenizer::new("<div>\0");
    tokenizer.run();
    let errors = tokenizer.parse_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), "unexpected-null-character");
    assert_eq!(errors[0].position, 6);
    assert_eq!(
        errors[0].to_string(),
        "unexpected-null-character at position 6"
    );
}

#[test]
fn test_parse_errors_can_be_turned_off() {
    let config = TokenizerConfig {
        record_parse_errors: false,
        ..TokenizerConfig::default()
    };
    let (tokens, errors) = tokenize_with_config("<a\0 a a>&#0;", config);
    assert!(errors.is_empty());
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_well_formed_document_has_no_parse_errors() {
    let (_, errors) = tokenize_with_errors(
        "<!DOCTYPE html><html><head><title>T</title></head><body class=x>&copy; 2024</body></html>",
    );
    assert!(errors.is_empty(), "{errors:?}");
}
