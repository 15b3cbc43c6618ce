//! Selector micro-grammar.
//!
//! A selector is a single token whose text encodes a leading key and a run of
//! `:`-prefixed segments, e.g. `test:tag:tier1:notTag:pseudoTier2:Buildings`
//! or `:All`. Segments are consumed left to right from one shared iterator,
//! so `tag`/`notTag` can take the following segment as their argument.

use idlescript_foundation::{Error, ErrorContext, Result};

use crate::ast::{Category, Selector};
use crate::config::ParseConfig;
use crate::cursor::TokenCursor;
use crate::token::{Token, TokenKind, expected};

/// Consumes one selector token and decodes it.
///
/// # Errors
/// Returns a structural error if the next token is not a selector or a
/// segment is invalid.
pub fn parse_selector(cursor: &mut TokenCursor<'_>, config: &ParseConfig) -> Result<Selector> {
    match cursor.consume() {
        Some(token) if token.kind == TokenKind::Selector => selector_from_token(token, config),
        other => Err(expected("a selector", other)),
    }
}

/// Decodes a selector token's text.
///
/// # Errors
/// Returns a structural error naming the offending segment and its position.
pub fn selector_from_token(token: &Token, config: &ParseConfig) -> Result<Selector> {
    decode(&token.text, token.position(), config).map_err(|err| {
        err.with_context(ErrorContext::new().with_position(token.span.line, token.span.column))
    })
}

/// Decodes selector text that did not come from the lexer.
///
/// Positions in errors are relative to `text`.
///
/// # Errors
/// Returns a structural error naming the offending segment.
pub fn selector_from_text(text: &str, config: &ParseConfig) -> Result<Selector> {
    decode(text, 0, config)
}

fn decode(text: &str, base: usize, config: &ParseConfig) -> Result<Selector> {
    let mut selector = Selector::default();
    let mut segments = segments(text, base);

    if text.starts_with(':') {
        // The empty text before the leading colon.
        segments.next();
    } else if let Some((_, key)) = segments.next() {
        selector.key = Some(key.to_string());
    }

    while let Some((position, segment)) = segments.next() {
        match segment {
            "tag" | "notTag" => {
                let Some((_, name)) = segments.next().filter(|(_, name)| !name.is_empty()) else {
                    return Err(Error::expected(
                        "a tag name",
                        Some((segment.to_string(), position)),
                    ));
                };
                if segment == "tag" {
                    selector.tags.insert(name.to_string());
                } else {
                    selector.excluded_tags.insert(name.to_string());
                }
            }
            "owned" => selector.owned = Some(true),
            "notOwned" => selector.owned = Some(false),
            "All" => selector.selects_all = true,
            _ => {
                let category = Category::from_segment(segment, config.case_insensitive_categories)
                    .ok_or_else(|| {
                        Error::expected(
                            "a valid selector segment",
                            Some((segment.to_string(), position)),
                        )
                    })?;
                selector.categories.insert(category);
            }
        }
    }

    Ok(selector)
}

/// Splits on `:`, pairing each part with its absolute byte position.
fn segments(text: &str, base: usize) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = base;
    text.split(':').map(move |part| {
        let position = offset;
        offset += part.len() + 1;
        (position, part)
    })
}
