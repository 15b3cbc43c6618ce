//! Integration tests for effects, selectors, and expressions

use idlescript_language::pretty::expression_outline;
use idlescript_language::selector::selector_from_text;
use idlescript_language::{
    BinaryOperator, Category, ParseConfig, Property, Verb, parse_effect_text,
    parse_expression_text,
};

fn outline(source: &str) -> String {
    expression_outline(&parse_expression_text(source, &ParseConfig::default()).unwrap())
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn precedence_examples() {
    assert_eq!(outline("(((23))+45)*76"), "Mul(Add(23, 45), 76)");
    assert_eq!(outline("10*12-5^7"), "Sub(Mul(10, 12), Pow(5, 7))");
}

#[test]
fn leading_operator_is_structural_error_at_zero() {
    let err = parse_expression_text("+", &ParseConfig::default()).unwrap_err();
    assert!(err.is_structural());
    assert_eq!(err.position(), Some(0));
}

#[test]
fn modulo_and_comparison() {
    assert_eq!(outline("7 % 3 == 1"), "Eq(Mod(7, 3), 1)");
    assert_eq!(outline("1 or 2 and 3"), "Or(1, And(2, 3))");
}

#[test]
fn operator_ranks_follow_table() {
    let ordered = [
        BinaryOperator::Pow,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Mod,
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Lt,
        BinaryOperator::Le,
        BinaryOperator::Gt,
        BinaryOperator::Ge,
        BinaryOperator::Eq,
        BinaryOperator::Ne,
        BinaryOperator::Is,
        BinaryOperator::And,
        BinaryOperator::Or,
    ];
    for pair in ordered.windows(2) {
        assert!(pair[0].binds_tighter_than(pair[1]));
    }
}

// =============================================================================
// Effects
// =============================================================================

#[test]
fn full_effect_with_source() {
    let effect = parse_effect_text(
        "multiply yield of :All:tag:test:notTag:notTest from test:tag:tier1:notTag:pseudoTier2:Buildings by 777",
        &ParseConfig::default(),
    )
    .unwrap();
    assert_eq!(effect.verb, Verb::Multiply);
    assert_eq!(effect.property, Property::Yield);

    assert!(effect.target.selects_all);
    assert!(effect.target.tags.contains("test"));
    assert!(effect.target.excluded_tags.contains("notTest"));
    assert!(effect.target.key.is_none());

    let source = effect.source.unwrap();
    assert_eq!(source.key.as_deref(), Some("test"));
    assert!(source.tags.contains("tier1"));
    assert!(source.excluded_tags.contains("pseudoTier2"));
    assert!(source.categories.contains(&Category::Buildings));
    assert!(!source.selects_all);

    assert_eq!(effect.amount.as_number(), Some(777.0));
}

#[test]
fn effect_position_errors_are_relative_to_value() {
    let err = parse_effect_text("increase yield of wood with 2", &ParseConfig::default())
        .unwrap_err();
    assert_eq!(err.position(), Some(23));
}

// =============================================================================
// Selectors
// =============================================================================

#[test]
fn selector_parsing_is_idempotent() {
    let config = ParseConfig::default();
    let text = "test:tag:tier1:notTag:pseudoTier2:Buildings:owned";
    assert_eq!(
        selector_from_text(text, &config).unwrap(),
        selector_from_text(text, &config).unwrap()
    );
}

#[test]
fn categories_are_stored_lower_case() {
    let selector = selector_from_text(":Shinies:Achievements", &ParseConfig::default()).unwrap();
    let names: Vec<&str> = selector.categories.iter().map(|c| c.as_str()).collect();
    assert_eq!(names, ["achievements", "shinies"]);
}
