//! Error types for the idlescript pipeline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error is terminal for the parse that raised it: nothing is retried
//! and no partial tree is produced.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout idlescript.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for idlescript operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context, creating the context if needed.
    ///
    /// Frames are pushed innermost first as the error propagates outward.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates a tokenization error carrying the unconsumed input.
    #[must_use]
    pub fn tokenization(remainder: impl Into<String>) -> Self {
        Self::new(ErrorKind::Tokenization {
            remainder: remainder.into(),
        })
    }

    /// Creates a structural error.
    ///
    /// `found` is the offending token's text and byte position, or `None`
    /// when the input ran out.
    #[must_use]
    pub fn expected(expected: impl Into<String>, found: Option<(String, usize)>) -> Self {
        let (found, position) = match found {
            Some((text, position)) => (Some(text), Some(position)),
            None => (None, None),
        };
        Self::new(ErrorKind::Structural {
            expected: expected.into(),
            found,
            position,
        })
    }

    /// Creates an unsupported section error.
    #[must_use]
    pub fn unsupported_section(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedSection(name.into()))
    }

    /// Creates a parse limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: ParseLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Returns true if this is a tokenization error.
    #[must_use]
    pub const fn is_tokenization(&self) -> bool {
        matches!(self.kind, ErrorKind::Tokenization { .. })
    }

    /// Returns true if this is a structural error.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self.kind, ErrorKind::Structural { .. })
    }

    /// Returns the source position of the offending token, if one was recorded.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::Structural { position, .. } => position,
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// No lexical rule matched at the current position.
    #[error("couldn't tokenize the code, leftover code: {remainder}")]
    Tokenization {
        /// The unconsumed remainder of the input.
        remainder: String,
    },

    /// An expected token kind or text was missing or malformed.
    #[error("{}", describe_structural(.expected, .found, .position))]
    Structural {
        /// Description of what the parser expected.
        expected: String,
        /// Text of the offending token, `None` at end of input.
        found: Option<String>,
        /// Byte position of the offending token.
        position: Option<usize>,
    },

    /// A recognized section name that is intentionally not implemented.
    #[error("section '{0}' is reserved but not supported")]
    UnsupportedSection(String),

    /// A parse limit was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(ParseLimit),
}

#[allow(clippy::ref_option)]
fn describe_structural(expected: &str, found: &Option<String>, position: &Option<usize>) -> String {
    match (found, position) {
        (Some(text), Some(position)) => {
            format!("expected {expected} at position {position}, got '{text}'")
        }
        (Some(text), None) => format!("expected {expected}, got '{text}'"),
        (None, _) => format!("expected {expected} at the end of input"),
    }
}

/// Parse limits that can be exceeded by adversarial input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseLimit {
    /// Parenthesised sub-expressions nested deeper than the configured cap.
    MaxNestingDepth {
        /// The configured limit.
        limit: usize,
    },
    /// An expression tree deeper than the configured cap.
    MaxExpressionDepth {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for ParseLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxNestingDepth { limit } => {
                write!(f, "max nesting depth ({limit}) exceeded")
            }
            Self::MaxExpressionDepth { limit } => {
                write!(f, "max expression depth ({limit}) exceeded")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Line number in source (1-based).
    pub line: Option<u32>,
    /// Column number in source (1-based).
    pub column: Option<u32>,
    /// Enclosing constructs, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "at {line}:{col}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
