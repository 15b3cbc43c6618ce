//! Stack-based operator precedence evaluator for effect amounts.
//!
//! The evaluator keeps the most recently completed operand and a stack of
//! pending `(left, operator)` pairs. A new operator that binds tighter than
//! the one on top of the stack defers it by pushing a fresh pair; otherwise
//! the top pair is resolved first. Whatever is pending at the end is folded
//! from the top down. A value that arrives while one is already held
//! replaces it.

use idlescript_foundation::{Error, ParseLimit, Result};

use crate::ast::{BinaryOperator, Expression};
use crate::config::ParseConfig;
use crate::cursor::TokenCursor;
use crate::lexer::tokenize_expression;
use crate::token::{Token, TokenKind, expected};

/// Evaluates a flat expression token run into a tree.
///
/// # Errors
/// Returns a structural error for malformed input,
/// [`ParseLimit::MaxNestingDepth`] when parentheses nest deeper than
/// `config.max_nesting_depth`, and [`ParseLimit::MaxExpressionDepth`] when
/// the resulting tree would be deeper than `config.max_expression_depth`.
pub fn evaluate(tokens: &[Token], config: &ParseConfig) -> Result<Expression> {
    let mut cursor = TokenCursor::new(tokens);
    evaluate_nested(&mut cursor, config, 0).map(|(expression, _)| expression)
}

/// Tokenizes expression text and evaluates it.
///
/// # Errors
/// Returns a tokenization error if the text does not lex, otherwise any
/// error from [`evaluate`].
pub fn parse_expression_text(source: &str, config: &ParseConfig) -> Result<Expression> {
    evaluate(&tokenize_expression(source)?, config)
}

/// An expression paired with its tree depth.
type Measured = (Expression, usize);

fn evaluate_nested(
    cursor: &mut TokenCursor<'_>,
    config: &ParseConfig,
    nesting: usize,
) -> Result<Measured> {
    let mut current: Option<Measured> = None;
    let mut pending: Vec<(Measured, BinaryOperator)> = Vec::new();

    while let Some(token) = cursor.consume() {
        match token.kind {
            TokenKind::Number => {
                current = Some((Expression::Number(parse_number(token)?), 1));
            }
            TokenKind::Parenthesis if token.text == "(" => {
                if nesting >= config.max_nesting_depth {
                    return Err(Error::limit_exceeded(ParseLimit::MaxNestingDepth {
                        limit: config.max_nesting_depth,
                    }));
                }
                let inner = scan_group(cursor, token)?;
                let mut nested = TokenCursor::new(inner);
                current = Some(evaluate_nested(&mut nested, config, nesting + 1)?);
            }
            kind if kind.is_operator() => {
                let operator = BinaryOperator::from_symbol(&token.text)
                    .ok_or_else(|| expected("a binary operator", Some(token)))?;
                let left = current
                    .take()
                    .ok_or_else(|| expected("a value before a binary operator", Some(token)))?;
                match pending.pop() {
                    None => pending.push((left, operator)),
                    Some(top) if operator.binds_tighter_than(top.1) => {
                        pending.push(top);
                        pending.push((left, operator));
                    }
                    Some((saved_left, saved_operator)) => {
                        let resolved = build(saved_operator, saved_left, left, config)?;
                        pending.push((resolved, operator));
                    }
                }
            }
            _ => return Err(expected("a valid expression", Some(token))),
        }
    }

    let mut current = current.ok_or_else(|| expected("a complete expression", None))?;
    while let Some((left, operator)) = pending.pop() {
        current = build(operator, left, current, config)?;
    }
    Ok(current)
}

/// Builds a binary node, failing once the tree grows deeper than
/// `config.max_expression_depth`.
fn build(
    operator: BinaryOperator,
    left: Measured,
    right: Measured,
    config: &ParseConfig,
) -> Result<Measured> {
    let depth = 1 + left.1.max(right.1);
    if depth > config.max_expression_depth {
        return Err(Error::limit_exceeded(ParseLimit::MaxExpressionDepth {
            limit: config.max_expression_depth,
        }));
    }
    Ok((Expression::binary(operator, left.0, right.0), depth))
}

fn parse_number(token: &Token) -> Result<f64> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| expected("a number", Some(token)))
}

/// Commits everything up to the `)` matching `open` and returns it without
/// the closing parenthesis.
fn scan_group<'a>(cursor: &mut TokenCursor<'a>, open: &Token) -> Result<&'a [Token]> {
    let mut depth = 0usize;
    loop {
        let Some(token) = cursor.scan_ahead() else {
            return Err(expected("a closing parenthesis", None)
                .with_frame(format!("group opened at position {}", open.position())));
        };
        if token.kind != TokenKind::Parenthesis {
            continue;
        }
        if token.text == "(" {
            depth += 1;
        } else if depth == 0 {
            break;
        } else {
            depth -= 1;
        }
    }
    let scanned = cursor.commit_scanned();
    Ok(scanned.split_last().map_or(scanned, |(_, inner)| inner))
}
