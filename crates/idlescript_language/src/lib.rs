//! Lexer, token cursor, and parsers for idlescript.
//!
//! This crate provides:
//! - [`Lexer`] - Context-sensitive tokenization for the document and expression grammars
//! - [`TokenCursor`] - Bounded lookahead with commit/cancel shared by every parser
//! - Section, entity-list, object, effect, selector, and expression parsers
//! - [`pretty`] - Rendering trees back to source text
//!
//! # Example
//!
//! ```
//! use idlescript_language::{SectionName, parse};
//!
//! let document = parse("Let's make a game!\nname: Cookie Clicker").unwrap();
//! assert!(document.get(SectionName::LetsMakeAGame).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod config;
pub mod cursor;
pub mod document;
pub mod effect;
pub mod entity_list;
pub mod expression;
pub mod lexer;
pub mod object;
pub mod pretty;
pub mod selector;
pub mod span;
pub mod token;

pub use ast::{
    BinaryOperator, Category, Document, EffectCommand, EntityDeclaration, EntityEntry, Expression,
    ObjectDeclaration, ObjectStatement, Property, Section, SectionKind, SectionName, Selector,
    Value, Verb,
};
pub use config::ParseConfig;
pub use cursor::TokenCursor;
pub use effect::parse_effect_text;
pub use expression::parse_expression_text;
pub use lexer::{Grammar, Lexer, tokenize_document, tokenize_expression};
pub use span::Span;
pub use token::{Token, TokenKind};

use idlescript_foundation::Result;

/// Parses document-grammar tokens with the default configuration.
///
/// # Errors
/// Returns a structural or unsupported-section error if the tokens do not
/// form a valid document.
pub fn parse_document(tokens: Vec<Token>) -> Result<Document> {
    parse_document_with_config(tokens, &ParseConfig::default())
}

/// Parses document-grammar tokens with a custom configuration.
///
/// # Errors
/// Returns a structural or unsupported-section error if the tokens do not
/// form a valid document.
pub fn parse_document_with_config(tokens: Vec<Token>, config: &ParseConfig) -> Result<Document> {
    document::parse_document_tokens(tokens, config)
}

/// Tokenizes and parses source text with the default configuration.
///
/// # Errors
/// Returns a tokenization error if the text does not lex, otherwise any
/// error from [`parse_document`].
pub fn parse(source: &str) -> Result<Document> {
    parse_with_config(source, &ParseConfig::default())
}

/// Tokenizes and parses source text with a custom configuration.
///
/// # Errors
/// Returns a tokenization error if the text does not lex, otherwise any
/// error from [`parse_document_with_config`].
pub fn parse_with_config(source: &str, config: &ParseConfig) -> Result<Document> {
    let tokens = tokenize_document(source)?;
    parse_document_with_config(tokens, config)
}
