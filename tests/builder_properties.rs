//! Tree builder property and robustness tests

use fieldmark::fieldmark::lexer::{tokens, Token};
use fieldmark::fieldmark::parser::{ParseError, TreeBuilder, DEFAULT_TOKEN_SPECS};
use fieldmark::fieldmark::processor::parse_document;
use fieldmark::fieldmark::schema::DEFAULT_SCHEMA;
use proptest::prelude::*;
use rstest::rstest;

fn builder() -> TreeBuilder {
    TreeBuilder::new(DEFAULT_SCHEMA.clone(), &DEFAULT_TOKEN_SPECS).unwrap()
}

fn paragraph_stream(children: Vec<Token>) -> Vec<Token> {
    let mut inline = Token::leaf(tokens::INLINE, "");
    inline.children = children;
    vec![
        Token::open(tokens::PARAGRAPH),
        inline,
        Token::close(tokens::PARAGRAPH),
    ]
}

#[test]
fn test_adjacent_text_tokens_merge_like_single_token() {
    let b = builder();
    let split = b
        .parse(&paragraph_stream(vec![
            Token::text("foo"),
            Token::text("bar"),
        ]))
        .unwrap();
    let joined = b
        .parse(&paragraph_stream(vec![Token::text("foobar")]))
        .unwrap();
    assert_eq!(split, joined);
    assert_eq!(split.children()[0].children().len(), 1);
}

#[test]
fn test_merge_requires_equal_mark_attrs() {
    let b = builder();
    let open_link = |href: &str| {
        Token::open(tokens::LINK)
            .with_attr("href", serde_json::json!(href))
            .with_attr("title", serde_json::Value::Null)
    };
    let doc = b
        .parse(&paragraph_stream(vec![
            open_link("/a"),
            Token::text("one"),
            Token::close(tokens::LINK),
            open_link("/b"),
            Token::text("two"),
            Token::close(tokens::LINK),
        ]))
        .unwrap();
    // Same mark type, different attrs: two separate runs.
    assert_eq!(doc.children()[0].children().len(), 2);

    let doc = b
        .parse(&paragraph_stream(vec![
            open_link("/a"),
            Token::text("one"),
            Token::text("two"),
            Token::close(tokens::LINK),
        ]))
        .unwrap();
    // Identical marks merge.
    assert_eq!(doc.children()[0].children().len(), 1);
}

#[rstest]
#[case::bare_unknown("custom_widget")]
#[case::unknown_open("custom_widget_open")]
#[case::unknown_close("custom_widget_close")]
fn test_unknown_token_type_is_fatal(#[case] name: &str) {
    let mut stream = paragraph_stream(vec![Token::text("x")]);
    stream.push(Token::leaf(name, ""));
    let err = builder().parse(&stream).unwrap_err();
    assert_eq!(err, ParseError::UnknownToken(name.to_string()));
}

#[test]
fn test_close_all_always_yields_a_document() {
    // Open many frames and never close them; the final loop must terminate
    // and still produce a root node.
    let mut stream = Vec::new();
    for _ in 0..50 {
        stream.push(Token::open(tokens::PARAGRAPH));
    }
    let doc = builder().parse(&stream).unwrap();
    assert_eq!(doc.name(), "doc");
}

#[test]
fn test_stray_close_tokens_are_absorbed() {
    // Closes beyond the open count pop the root early; the parse still
    // finishes with a document.
    let mut stream = paragraph_stream(vec![Token::text("x")]);
    stream.push(Token::close(tokens::PARAGRAPH));
    stream.push(Token::close(tokens::PARAGRAPH));
    let doc = builder().parse(&stream).unwrap();
    assert_eq!(doc.name(), "doc");
}

proptest! {
    /// The whole pipeline absorbs arbitrary input without panicking or
    /// erroring: every token the lexer emits has a handler.
    #[test]
    fn prop_parse_never_fails_on_arbitrary_input(input in ".{0,200}") {
        let doc = parse_document(&input).unwrap();
        prop_assert_eq!(doc.name(), "doc");
    }

    /// Any balanced single-line span over plain interior text tokenizes to
    /// exactly one open marker, the interior, and one close marker.
    #[test]
    fn prop_plain_span_tokenizes_cleanly(interior in "[a-z ]{1,40}") {
        let source = format!("{{{{{}}}}}", interior);
        let stream = fieldmark::fieldmark::lexer::inline::tokenize(&source);
        prop_assert_eq!(stream.len(), 3);
        prop_assert_eq!(stream[0].name.as_str(), "field_open");
        prop_assert_eq!(stream[1].content.as_str(), interior.as_str());
        prop_assert_eq!(stream[2].name.as_str(), "field_close");
    }

    /// Field open/close markers always balance, whatever the input.
    #[test]
    fn prop_field_markers_balance(input in ".{0,200}") {
        let mut depth = 0i64;
        for token in fieldmark::fieldmark::lexer::inline::tokenize(&input) {
            match token.name.as_str() {
                "field_open" => depth += 1,
                "field_close" => {
                    depth -= 1;
                    prop_assert!(depth >= 0);
                }
                _ => {}
            }
        }
        prop_assert_eq!(depth, 0);
    }
}
