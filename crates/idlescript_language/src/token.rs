//! Token types for both idlescript grammars.
//!
//! Tokens are the output of the lexer and input to every parser. The
//! document grammar and the expression grammar share one [`TokenKind`] so
//! that a single [`TokenCursor`](crate::cursor::TokenCursor) serves both.

use idlescript_foundation::Error;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The type of this token.
    pub kind: TokenKind,
    /// The matched source text.
    pub text: String,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns the byte offset where this token starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.span.start
    }

    /// Returns true if this token has the given kind and exact text.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Returns true if this token starts a new section.
    #[must_use]
    pub const fn is_section_boundary(&self) -> bool {
        self.kind.is_section_header()
    }
}

/// Builds a structural error pointing at `token`, or at the end of input.
pub(crate) fn expected(what: &str, token: Option<&Token>) -> Error {
    match token {
        Some(token) => Error::expected(what, Some((token.text.clone(), token.position())))
            .with_context(
                idlescript_foundation::ErrorContext::new()
                    .with_position(token.span.line, token.span.column),
            ),
        None => Error::expected(what, None),
    }
}

/// Token types for the document and expression grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Document grammar
    /// A section header like `Resources`
    Section,
    /// The `CSS` header, which switches the lexer into raw capture
    CssSection,
    /// Raw stylesheet text following `CSS`
    CssStyle,
    /// An object key including its trailing colon, like `on click:`
    Key,
    /// A spritesheet declaration like `icons, 48 by 48, icons.jpg`
    SpritesheetValue,
    /// The free-form remainder of a line after a key
    Value,
    /// An entity key like `*wood|woods`
    EntityKey,
    /// `// line` or `/* block */` comment
    Comment,
    /// A bare tag on its own line, like `no tooltip`
    Tag,

    // Expression grammar
    /// `end`
    End,
    /// `if` or `else`
    FlowStatement,
    /// `$name`
    Variable,
    /// Command words and phrases like `multiply` or `yield of`
    Command,
    /// Number literal like `777` or `0.5`
    Number,
    /// `(` or `)`
    Parenthesis,
    /// `have` or `no`
    Keyword,
    /// `and`, `or`, `!`
    LogicOperator,
    /// `+ - * / % ^`
    BinaryOperator,
    /// `== != <= >= < > is`
    CompareOperator,
    /// Built-in function names like `min` or `random`
    Function,
    /// Selector text like `:All` or `wood:tag:tier1`
    Selector,
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Comment)
    }

    /// Returns true if this token kind opens a section.
    #[must_use]
    pub const fn is_section_header(self) -> bool {
        matches!(self, Self::Section | Self::CssSection)
    }

    /// Returns true if this kind can act as an infix operator in expressions.
    #[must_use]
    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            Self::BinaryOperator | Self::CompareOperator | Self::LogicOperator
        )
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::CssSection => "cssSection",
            Self::CssStyle => "cssStyle",
            Self::Key => "key",
            Self::SpritesheetValue => "spritesheetValue",
            Self::Value => "value",
            Self::EntityKey => "entityKey",
            Self::Comment => "comment",
            Self::Tag => "tag",
            Self::End => "end",
            Self::FlowStatement => "flowStatement",
            Self::Variable => "variable",
            Self::Command => "command",
            Self::Number => "number",
            Self::Parenthesis => "parenthesis",
            Self::Keyword => "keyword",
            Self::LogicOperator => "logicOperator",
            Self::BinaryOperator => "binaryOperator",
            Self::CompareOperator => "compareOperator",
            Self::Function => "function",
            Self::Selector => "selector",
        }
    }
}
