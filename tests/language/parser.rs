//! Integration tests for the document parser
//!
//! Tests section dispatch, entity lists, objects, and error reporting.

use idlescript_foundation::{ErrorKind, ParseLimit};
use idlescript_language::{
    ObjectStatement, ParseConfig, Section, SectionName, Value, parse, parse_document,
    parse_with_config, tokenize_document,
};

// =============================================================================
// Sections
// =============================================================================

#[test]
fn parse_object_sections() {
    let document = parse("Let's make a game!\nname: Cookies\nSettings\nspritesheet: icons, 48 by 48, icons.jpg").unwrap();
    assert_eq!(document.len(), 2);

    let game = document
        .get(SectionName::LetsMakeAGame)
        .and_then(Section::as_object)
        .unwrap();
    assert_eq!(game.get("name").and_then(Value::as_str), Some("Cookies"));

    let settings = document
        .get(SectionName::Settings)
        .and_then(Section::as_object)
        .unwrap();
    assert_eq!(
        settings.get("spritesheet").and_then(Value::as_str),
        Some("icons, 48 by 48, icons.jpg")
    );
}

#[test]
fn parse_every_entity_section() {
    for name in [
        SectionName::Buttons,
        SectionName::Buildings,
        SectionName::Upgrades,
        SectionName::Items,
        SectionName::Achievements,
        SectionName::Resources,
        SectionName::Shinies,
    ] {
        let source = format!("{name}\n*thing\nname: thing");
        let document = parse(&source).unwrap();
        let entities = document.get(name).and_then(Section::as_entities).unwrap();
        assert_eq!(entities.len(), 1, "{name}");
    }
}

#[test]
fn parse_document_from_tokens() {
    let tokens = tokenize_document("Resources\n*wood\nname: wood").unwrap();
    let document = parse_document(tokens).unwrap();
    assert!(document.get(SectionName::Resources).is_some());
}

#[test]
fn sections_do_not_leak_into_each_other() {
    let document = parse("Resources\n*test3\nname: three\nLayout\n*main\nSettings\nx: y").unwrap();
    let resources = document
        .get(SectionName::Resources)
        .and_then(Section::as_entities)
        .unwrap();
    let body = &resources.find("test3").unwrap().body;
    assert_eq!(body.len(), 1);
    assert!(document.get(SectionName::Layout).is_some());
    assert!(document.get(SectionName::Settings).is_some());
}

#[test]
fn repeated_section_replaces_earlier() {
    let document = parse("Resources\n*a\nResources\n*b").unwrap();
    let resources = document
        .get(SectionName::Resources)
        .and_then(Section::as_entities)
        .unwrap();
    assert!(resources.find("a").is_none());
    assert!(resources.find("b").is_some());
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn effect_and_string_branches() {
    let document = parse(
        "Resources\n*x\non tick: multiply yield of :All by 2\nabc: multiply yield of :All by 2",
    )
    .unwrap();
    let body = &document
        .get(SectionName::Resources)
        .and_then(Section::as_entities)
        .unwrap()
        .entries[0]
        .body;
    assert!(matches!(
        &body.statements[0],
        ObjectStatement::KeyValue {
            value: Value::Effect(_),
            ..
        }
    ));
    assert!(matches!(
        &body.statements[1],
        ObjectStatement::KeyValue {
            value: Value::String(_),
            ..
        }
    ));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unknown_section_header() {
    let err = parse("*notheader").unwrap_err();
    assert_eq!(
        format!("{err}"),
        "expected a valid section name at position 0, got '*notheader'"
    );
}

#[test]
fn tag_outside_section() {
    let err = parse("hello there\nSettings").unwrap_err();
    assert!(err.is_structural());
    assert_eq!(err.position(), Some(0));
}

#[test]
fn unimplemented_section() {
    let err = parse("Includes\n*lib").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedSection(ref name) if name == "Includes"));
}

#[test]
fn object_key_error_in_settings() {
    let err = parse("Settings\n*invalid").unwrap_err();
    assert_eq!(
        format!("{err}"),
        "expected an object key at position 9, got '*invalid'"
    );
    let ctx = err.context.unwrap();
    assert_eq!((ctx.line, ctx.column), (Some(2), Some(1)));
    assert_eq!(ctx.stack, vec!["section Settings"]);
}

#[test]
fn missing_value_at_end() {
    let err = parse("Settings\nnot valid object:").unwrap_err();
    assert_eq!(
        format!("{err}"),
        "expected an object value at the end of input"
    );
}

#[test]
fn effect_errors_carry_frames() {
    let err = parse("Buildings\n*mill\non click: multiply yield of :tag by 2").unwrap_err();
    assert!(err.is_structural());
    let stack = err.context.unwrap().stack;
    assert_eq!(
        stack,
        vec![
            "effect value at position 26",
            "key 'on click'",
            "entity *mill",
            "section Buildings",
        ]
    );
}

#[test]
fn tokenization_errors_surface_from_parse() {
    assert!(parse("Settings\n&").unwrap_err().is_tokenization());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn lowercase_categories_need_lenient_config() {
    let source = "Upgrades\n*boost\npassive: multiply yield of :buildings by 2";
    assert!(parse(source).is_err());
    assert!(parse_with_config(source, &ParseConfig::lenient()).is_ok());
}

#[test]
fn nesting_cap_applies_to_effect_amounts() {
    let source = "Upgrades\n*boost\npassive: multiply yield of :All by ((((2))))";
    assert!(parse(source).is_ok());

    let strict = ParseConfig::default().with_max_nesting_depth(2);
    let err = parse_with_config(source, &strict).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}

#[test]
fn long_operator_chain_is_capped() {
    let source = format!(
        "Resources\n*a\non tick: multiply yield of :All by 1{}",
        "+1".repeat(50_000)
    );
    let err = parse(&source).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::LimitExceeded(ParseLimit::MaxExpressionDepth { limit: 256 })
    );
    let frames = err.context.unwrap().stack;
    assert!(frames.contains(&"entity *a".to_string()));
}
