//! Effect command parser.
//!
//! An effect reads `<verb> <property> of <target> [from <source>] by <amount>`,
//! for example `multiply yield of :tag:tier1 by 10*12-5^7`.

use idlescript_foundation::Result;

use crate::ast::{EffectCommand, Property, Verb};
use crate::config::ParseConfig;
use crate::cursor::TokenCursor;
use crate::expression::evaluate;
use crate::lexer::tokenize_expression;
use crate::selector::parse_selector;
use crate::token::{Token, TokenKind, expected};

/// Parses one effect from expression-grammar tokens.
///
/// # Errors
/// Returns a structural error if the verb, property, selectors, `by`, or
/// amount are missing or malformed.
pub fn parse_effect(tokens: &[Token], config: &ParseConfig) -> Result<EffectCommand> {
    let mut cursor = TokenCursor::new(tokens);

    let verb = match cursor.consume() {
        Some(token) if token.kind == TokenKind::Command => {
            Verb::parse(&token.text).ok_or_else(|| expected("an effect command", Some(token)))?
        }
        other => return Err(expected("an effect command", other)),
    };

    let property = match cursor.consume() {
        Some(token) if token.kind == TokenKind::Command => Property::from_phrase(&token.text)
            .ok_or_else(|| expected("a property like 'yield of'", Some(token)))?,
        other => return Err(expected("a property like 'yield of'", other)),
    };

    let target = parse_selector(&mut cursor, config)?;

    let source = if cursor
        .peek(0)
        .is_some_and(|token| token.is(TokenKind::Command, "from"))
    {
        cursor.consume();
        Some(parse_selector(&mut cursor, config)?)
    } else {
        None
    };

    match cursor.consume() {
        Some(token) if token.is(TokenKind::Command, "by") => {}
        other => return Err(expected("'by'", other)),
    }

    let amount = evaluate(cursor.take_remaining(), config)?;

    log::trace!("parsed {} {} effect", verb.as_str(), property.as_str());
    Ok(EffectCommand {
        verb,
        property,
        target,
        source,
        amount,
    })
}

/// Tokenizes effect text with the expression grammar and parses it.
///
/// # Errors
/// Returns a tokenization error if the text does not lex, otherwise any
/// error from [`parse_effect`].
pub fn parse_effect_text(source: &str, config: &ParseConfig) -> Result<EffectCommand> {
    let tokens = tokenize_expression(source)?;
    parse_effect(&tokens, config)
}
