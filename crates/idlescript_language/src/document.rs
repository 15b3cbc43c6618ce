//! Document parser: section dispatch.

use idlescript_foundation::{Error, Result};

use crate::ast::{Document, Section, SectionKind, SectionName};
use crate::config::ParseConfig;
use crate::cursor::TokenCursor;
use crate::entity_list::parse_entity_list;
use crate::object::parse_object;
use crate::token::{Token, TokenKind, expected};

/// Pre-entity tag recognised by the `Layout` section.
pub const USE_DEFAULT: &str = "use default";

/// Parses document-grammar tokens into a tree.
///
/// Comments are dropped before structural parsing. A later section with the
/// same name replaces an earlier one.
///
/// # Errors
/// Returns a structural error for content outside a known section or
/// malformed section content, and an unsupported-section error for
/// `Includes`.
pub fn parse_document_tokens(mut tokens: Vec<Token>, config: &ParseConfig) -> Result<Document> {
    tokens.retain(|token| !token.kind.is_trivia());
    let mut cursor = TokenCursor::new(&tokens);
    let mut document = Document::new();

    while let Some(header) = cursor.consume() {
        let name = section_name(header)?;
        log::debug!("parsing section {name}");
        let section = parse_section(name, &mut cursor, config)
            .map_err(|err| err.with_frame(format!("section {name}")))?;
        if document.insert(name, section).is_some() {
            log::debug!("section {name} replaced an earlier one");
        }
    }

    Ok(document)
}

fn section_name(header: &Token) -> Result<SectionName> {
    Some(header)
        .filter(|token| token.kind.is_section_header())
        .and_then(|token| SectionName::from_header(&token.text))
        .ok_or_else(|| expected("a valid section name", Some(header)))
}

fn parse_section(
    name: SectionName,
    cursor: &mut TokenCursor<'_>,
    config: &ParseConfig,
) -> Result<Section> {
    match name.kind() {
        SectionKind::Object => Ok(Section::Object {
            properties: parse_object(cursor, config)?,
        }),
        SectionKind::EntityList => {
            let is_layout = name == SectionName::Layout;
            let pre_entity_tags: &[&str] = if is_layout { &[USE_DEFAULT] } else { &[] };
            let list = parse_entity_list(cursor, pre_entity_tags, |body| {
                parse_object(&mut TokenCursor::new(body), config)
            })?;
            Ok(Section::EntityList {
                entities: list.entities,
                use_default: is_layout.then(|| list.found_tags.contains(USE_DEFAULT)),
            })
        }
        SectionKind::RawText => match cursor.consume() {
            Some(token) if token.kind == TokenKind::CssStyle => Ok(Section::RawText {
                text: token.text.clone(),
            }),
            other => Err(expected("a CSS value", other)),
        },
        SectionKind::Reserved => Err(Error::unsupported_section(name.as_str())),
    }
}
