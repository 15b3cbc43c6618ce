//! Integration tests for the lexers
//!
//! Tests tokenization with both the document and expression grammars.

use idlescript_foundation::ErrorKind;
use idlescript_language::{Grammar, Lexer, Token, TokenKind, tokenize_document, tokenize_expression};

fn summary(tokens: &[Token]) -> Vec<(TokenKind, &str, usize)> {
    tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str(), t.position()))
        .collect()
}

// =============================================================================
// Document Grammar
// =============================================================================

#[test]
fn tokenize_section_key_value() {
    let tokens = tokenize_document("Let's make a game!\ntest: test2").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::Section, "Let's make a game!", 0),
            (TokenKind::Key, "test:", 19),
            (TokenKind::Value, "test2", 25),
        ]
    );
}

#[test]
fn tokenize_invalid_document() {
    let err = tokenize_document("&1%1$").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Tokenization { ref remainder } if remainder == "&1%1$"
    ));
}

#[test]
fn tokenize_failure_reports_unconsumed_tail() {
    let err = tokenize_document("Settings\nname: x\n&oops").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Tokenization { ref remainder } if remainder == "&oops"
    ));
}

#[test]
fn tokenize_all_section_headers() {
    for header in [
        "Let's make a game!",
        "Settings",
        "Includes",
        "Layout",
        "Buttons",
        "Buildings",
        "Upgrades",
        "Items",
        "Achievements",
        "Resources",
        "Shinies",
    ] {
        let tokens = tokenize_document(header).unwrap();
        assert_eq!(tokens.len(), 1, "{header}");
        assert_eq!(tokens[0].kind, TokenKind::Section, "{header}");
    }
    assert_eq!(tokenize_document("CSS").unwrap()[0].kind, TokenKind::CssSection);
}

#[test]
fn tokenize_entity_body() {
    let tokens = tokenize_document("Resources\n*test1|test2\nhello: world\ntest").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Section,
            TokenKind::EntityKey,
            TokenKind::Key,
            TokenKind::Value,
            TokenKind::Tag,
        ]
    );
}

#[test]
fn tokenize_effect_line_keeps_value_whole() {
    let tokens =
        tokenize_document("on tick: multiply yield of :All by 10*12-5^7\ngoodbye world").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::Key, "on tick:", 0),
            (TokenKind::Value, "multiply yield of :All by 10*12-5^7", 9),
            (TokenKind::Tag, "goodbye world", 45),
        ]
    );
}

#[test]
fn tokenize_css_until_next_section() {
    let tokens = tokenize_document("CSS\n#thing {\n\tcolor: blue;\n}\nLayout\n*a").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::CssStyle);
    assert_eq!(tokens[1].text, "#thing {\n\tcolor: blue;\n}");
    assert_eq!(tokens[2].kind, TokenKind::Section);
    assert_eq!(tokens[2].span.line, 5);
}

#[test]
fn tokenize_comments_are_tokens() {
    let tokens = tokenize_document("// hello\nSettings").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert!(tokens[0].kind.is_trivia());
}

#[test]
fn tokenize_spans_cover_text() {
    let source = "Settings\nname: my game\nspritesheet: icons, 48 by 48, icons.jpg";
    for token in tokenize_document(source).unwrap() {
        assert_eq!(token.span.text(source), token.text);
    }
}

// =============================================================================
// Expression Grammar
// =============================================================================

#[test]
fn tokenize_simple_effect() {
    let tokens = tokenize_expression("multiply yield of :All by 777*3").unwrap();
    assert_eq!(
        summary(&tokens),
        vec![
            (TokenKind::Command, "multiply", 0),
            (TokenKind::Command, "yield of", 9),
            (TokenKind::Selector, ":All", 18),
            (TokenKind::Command, "by", 23),
            (TokenKind::Number, "777", 26),
            (TokenKind::BinaryOperator, "*", 29),
            (TokenKind::Number, "3", 30),
        ]
    );
}

#[test]
fn tokenize_from_clause() {
    let tokens = tokenize_expression("increase cost of wood from :owned by 2").unwrap();
    assert!(tokens[4].is(TokenKind::Command, "from"));
    assert!(tokens[5].is(TokenKind::Selector, ":owned"));
}

#[test]
fn tokenize_expression_rejects_unknown_symbol() {
    let err = tokenize_expression("by 2 # 3").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Tokenization { ref remainder } if remainder == "# 3"
    ));
}

#[test]
fn lexer_struct_matches_helpers() {
    let source = "lower refund of :Items by (1+2)";
    let direct = Lexer::new(source, Grammar::Expression).tokenize().unwrap();
    assert_eq!(direct, tokenize_expression(source).unwrap());
}
