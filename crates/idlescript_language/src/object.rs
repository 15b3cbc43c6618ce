//! Object parser: key/value lines and bare tags.

use idlescript_foundation::Result;

use crate::ast::{ObjectDeclaration, ObjectStatement, Value, is_effect_key};
use crate::config::ParseConfig;
use crate::cursor::TokenCursor;
use crate::effect::parse_effect_text;
use crate::token::{Token, TokenKind, expected};

/// Parses statements until a section boundary or end of input.
///
/// The boundary token is left on the cursor.
///
/// # Errors
/// Returns a structural error for a token that is neither a key nor a tag,
/// a key at the end of input, or an effect value that fails to parse.
/// Whatever token follows a key is taken as its raw value.
pub fn parse_object(cursor: &mut TokenCursor<'_>, config: &ParseConfig) -> Result<ObjectDeclaration> {
    let mut statements = Vec::new();

    while let Some(token) = cursor.consume() {
        match token.kind {
            kind if kind.is_section_header() => {
                cursor.step_back();
                break;
            }
            TokenKind::Tag => statements.push(ObjectStatement::BareTag {
                name: token.text.clone(),
            }),
            TokenKind::Key => {
                let key = key_name(&token.text);
                let raw = cursor.consume().ok_or_else(|| {
                    expected("an object value", None).with_frame(format!("key '{key}'"))
                })?;
                let value = parse_value(&key, raw, config)?;
                statements.push(ObjectStatement::KeyValue { key, value });
            }
            _ => return Err(expected("an object key", Some(token))),
        }
    }

    Ok(ObjectDeclaration { statements })
}

/// Strips the trailing `:` and any spaces before it.
fn key_name(text: &str) -> String {
    text.strip_suffix(':').unwrap_or(text).trim_end().to_string()
}

fn parse_value(key: &str, raw: &Token, config: &ParseConfig) -> Result<Value> {
    if !is_effect_key(key) {
        return Ok(Value::String(raw.text.clone()));
    }
    parse_effect_text(&raw.text, config)
        .map(Value::Effect)
        .map_err(|err| {
            err.with_frame(format!("effect value at position {}", raw.position()))
                .with_frame(format!("key '{key}'"))
        })
}
