//! Entity-list parser.
//!
//! Entity sections hold a run of `*id|alias` keys, each followed by a body
//! that extends to the next entity key, section header, or end of input.
//! Bodies are handed to a caller-supplied value handler, so the list itself
//! is generic over what an entity body parses into.

use std::collections::BTreeSet;

use idlescript_foundation::Result;

use crate::ast::{EntityDeclaration, EntityEntry};
use crate::cursor::TokenCursor;
use crate::token::{Token, TokenKind, expected};

/// Parsed entities plus any pre-entity tags that appeared.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityList<T> {
    /// The entities in declaration order.
    pub entities: EntityDeclaration<T>,
    /// Pre-entity tags that were present.
    pub found_tags: BTreeSet<String>,
}

/// Parses entities until a section boundary or end of input.
///
/// Tag tokens whose text is in `pre_entity_tags` are recorded instead of being
/// treated as entity content. The boundary token is left on the cursor.
///
/// # Errors
/// Returns a structural error if content appears where an entity key is
/// expected, or whatever error `handler` returns for a body.
pub fn parse_entity_list<'a, T, F>(
    cursor: &mut TokenCursor<'a>,
    pre_entity_tags: &[&str],
    mut handler: F,
) -> Result<EntityList<T>>
where
    F: FnMut(&'a [Token]) -> Result<T>,
{
    let mut entries = Vec::new();
    let mut found_tags = BTreeSet::new();

    while let Some(token) = cursor.consume() {
        if token.is_section_boundary() {
            cursor.step_back();
            break;
        }
        if token.kind == TokenKind::Tag && pre_entity_tags.contains(&token.text.as_str()) {
            found_tags.insert(token.text.clone());
            continue;
        }
        if token.kind != TokenKind::EntityKey {
            return Err(expected("an entity key", Some(token)));
        }

        let ids = entity_ids(&token.text);
        let body = scan_body(cursor);
        let value = handler(body).map_err(|err| err.with_frame(format!("entity {}", token.text)))?;
        entries.push(EntityEntry { ids, body: value });
    }

    Ok(EntityList {
        entities: EntityDeclaration { entries },
        found_tags,
    })
}

/// Splits `*a|b` into `["a", "b"]`.
fn entity_ids(key: &str) -> Vec<String> {
    key.strip_prefix('*')
        .unwrap_or(key)
        .split('|')
        .map(str::to_string)
        .collect()
}

/// Commits tokens up to the next entity key or section header.
fn scan_body<'a>(cursor: &mut TokenCursor<'a>) -> &'a [Token] {
    let mut stopped_on_boundary = false;
    while let Some(token) = cursor.scan_ahead() {
        if token.kind == TokenKind::EntityKey || token.is_section_boundary() {
            stopped_on_boundary = true;
            break;
        }
    }
    let scanned = cursor.commit_scanned();
    if !stopped_on_boundary {
        return scanned;
    }
    cursor.step_back();
    scanned.split_last().map_or(scanned, |(_, body)| body)
}
