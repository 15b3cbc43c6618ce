//! idlescript - Parser for an idle-game description language
//!
//! This crate re-exports all layers of idlescript for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: idlescript_language   — Lexer, token cursor, section/entity/effect parsers
//! Layer 0: idlescript_foundation — Error types
//! ```

pub use idlescript_foundation as foundation;
pub use idlescript_language as language;
