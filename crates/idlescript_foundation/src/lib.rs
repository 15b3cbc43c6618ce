//! Core error types for idlescript.
//!
//! This crate provides:
//! - [`Error`] - Rich error type with source position and frame context
//! - [`ErrorKind`] - Categorized failures (tokenization, structure, limits)
//! - [`ParseLimit`] - Hardening caps that can be exceeded by pathological input

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{Error, ErrorContext, ErrorKind, ParseLimit, Result};
