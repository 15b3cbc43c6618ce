//! Lexer for idlescript.
//!
//! Two ordered rule tables drive tokenization: the document grammar
//! (sections, keys, entity keys, tags, raw CSS) and the expression grammar
//! (commands, selectors, numbers, operators) used only inside effect values.
//!
//! Rules are tried in declaration order and the first rule whose pattern
//! matches at the current position wins, provided its context constraint on
//! the previously emitted token kind holds. There is no longest-match
//! disambiguation: order is the grammar.

use idlescript_foundation::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{SectionKind, SectionName};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Which rule table a lexer scans with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// Sections, keys, values, entity keys, tags, and raw CSS.
    Document,
    /// Effect commands, selectors, and arithmetic.
    Expression,
}

impl Grammar {
    fn rules(self) -> &'static [Rule] {
        match self {
            Self::Document => DOCUMENT_RULES.as_slice(),
            Self::Expression => EXPRESSION_RULES.as_slice(),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Expression => "expression",
        }
    }
}

/// Requirement on the kind of the immediately preceding emitted token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Constraint {
    /// The previous token must have this kind.
    After(TokenKind),
    /// The previous token must not have this kind (no previous token passes).
    NotAfter(TokenKind),
}

impl Constraint {
    fn allows(self, last: Option<TokenKind>) -> bool {
        match self {
            Self::After(kind) => last == Some(kind),
            Self::NotAfter(kind) => last != Some(kind),
        }
    }
}

/// How a rule measures its match against the remaining input.
#[derive(Debug)]
enum Matcher {
    /// Anchored pattern. Capture group 1, when present, is the token text and
    /// whatever follows it in the match is lookahead that stays unconsumed.
    Pattern(Regex),
    /// Raw capture up to the first match of the terminator, or end of input,
    /// with trailing whitespace excluded.
    Until(Regex),
}

impl Matcher {
    /// Returns the length of the token text at the start of `input`.
    fn measure(&self, input: &str) -> Option<usize> {
        let len = match self {
            Self::Pattern(re) => {
                let caps = re.captures(input)?;
                caps.get(1).or_else(|| caps.get(0))?.end()
            }
            Self::Until(re) => {
                let end = re.find(input).map_or(input.len(), |m| m.start());
                input[..end].trim_end().len()
            }
        };
        (len > 0).then_some(len)
    }
}

/// A single lexical rule.
#[derive(Debug)]
struct Rule {
    kind: TokenKind,
    matcher: Matcher,
    constraint: Option<Constraint>,
}

impl Rule {
    fn pattern(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            matcher: Matcher::Pattern(compile(pattern)),
            constraint: None,
        }
    }

    fn until(kind: TokenKind, terminator: &str) -> Self {
        Self {
            kind,
            matcher: Matcher::Until(compile(terminator)),
            constraint: None,
        }
    }

    fn after(mut self, kind: TokenKind) -> Self {
        self.constraint = Some(Constraint::After(kind));
        self
    }

    fn not_after(mut self, kind: TokenKind) -> Self {
        self.constraint = Some(Constraint::NotAfter(kind));
        self
    }
}

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("lexical rule patterns are valid")
}

/// Alternation of every header except `CSS`, which has its own rule.
fn section_alternation() -> String {
    SectionName::ALL
        .iter()
        .filter(|name| name.kind() != SectionKind::RawText)
        .map(|name| regex::escape(name.as_str()))
        .collect::<Vec<_>>()
        .join("|")
}

static DOCUMENT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let sections = section_alternation();
    vec![
        Rule::pattern(
            TokenKind::Section,
            &format!(r"^({sections})[ \t]*(?:\r?\n|\z)"),
        )
        .not_after(TokenKind::Key),
        Rule::pattern(TokenKind::CssSection, r"^(CSS)[ \t]*(?:\r?\n|\z)")
            .not_after(TokenKind::Key),
        Rule::until(
            TokenKind::CssStyle,
            &format!(r"(?m)^(?:{sections}|CSS)[ \t]*\r?$"),
        )
        .after(TokenKind::CssSection),
        Rule::pattern(TokenKind::Key, r"^[\w ]+:").not_after(TokenKind::Key),
        Rule::pattern(
            TokenKind::SpritesheetValue,
            r"^(\w+, \d+ by \d+, \w+\.jpg)[ \t]*(?:\r?\n|\z)",
        )
        .after(TokenKind::Key),
        Rule::pattern(TokenKind::Value, r"^[^\r\n]*\S").after(TokenKind::Key),
        Rule::pattern(
            TokenKind::EntityKey,
            r"^\*[a-zA-Z0-9](?:[a-zA-Z0-9|]*[a-zA-Z0-9])?",
        ),
        Rule::pattern(TokenKind::Comment, r"^(?://[^\r\n]*|(?s:/\*.*?\*/))"),
        Rule::pattern(TokenKind::Tag, r"^([\w ]+)(?:\r?\n|\z)"),
    ]
});

static EXPRESSION_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::pattern(TokenKind::End, r"^end\b"),
        Rule::pattern(TokenKind::FlowStatement, r"^(?:if|else)\b"),
        Rule::pattern(TokenKind::Variable, r"^\$\w+"),
        Rule::pattern(
            TokenKind::Command,
            concat!(
                r"^(?:log\(\w+\)|(?:increase|lower|multiply|yield of|cost of|refund of|",
                r"frequency of|duration of|spawn|yield|lose|grant|from|by|do|with|show|",
                r"hide|light|dim|anim icon|anim|log|toast)\b)",
            ),
        ),
        Rule::pattern(TokenKind::Number, r"^\d+(?:\.\d+)?"),
        Rule::pattern(TokenKind::Parenthesis, r"^[()]"),
        Rule::pattern(TokenKind::Keyword, r"^(?:have|no)\b"),
        Rule::pattern(TokenKind::CompareOperator, r"^(?:==|!=|<=|>=|<|>|is\b)"),
        Rule::pattern(TokenKind::LogicOperator, r"^(?:(?:and|or)\b|!)"),
        Rule::pattern(TokenKind::BinaryOperator, r"^[-+*/%^]"),
        Rule::pattern(
            TokenKind::Function,
            r"^(?:min|max|floor|ceil|roundr|round|random|frandom|chance)\b",
        ),
        Rule::pattern(TokenKind::Selector, r"^(?:\w+(?::\w+)*|(?::\w+)+)"),
    ]
});

/// Lexer for idlescript source text.
///
/// Positions are byte offsets into the text the lexer was created with.
pub struct Lexer<'src> {
    /// Rule table in use.
    grammar: Grammar,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source and grammar.
    #[must_use]
    pub fn new(source: &'src str, grammar: Grammar) -> Self {
        Self {
            grammar,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the whole input.
    ///
    /// Whitespace is skipped only after a token, never before the first one.
    ///
    /// # Errors
    /// Returns a tokenization error carrying the unconsumed remainder if no
    /// rule matches at some position.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut last: Option<TokenKind> = None;

        while !self.rest.is_empty() {
            let (kind, len) = self
                .match_rule(last)
                .ok_or_else(|| Error::tokenization(self.rest))?;

            let text = &self.rest[..len];
            let (start, line, column) = (self.position, self.line, self.column);
            self.advance(len);
            let token = Token::new(kind, text, Span::new(start, self.position, line, column));
            log::trace!("{} token {:?} at {}", kind.name(), token.text, start);
            tokens.push(token);
            last = Some(kind);

            self.skip_whitespace();
        }

        log::debug!(
            "lexed {} {} tokens from {} bytes",
            tokens.len(),
            self.grammar.name(),
            self.position
        );
        Ok(tokens)
    }

    /// Finds the first rule that applies at the current position.
    fn match_rule(&self, last: Option<TokenKind>) -> Option<(TokenKind, usize)> {
        self.grammar
            .rules()
            .iter()
            .filter(|rule| rule.constraint.is_none_or(|c| c.allows(last)))
            .find_map(|rule| rule.matcher.measure(self.rest).map(|len| (rule.kind, len)))
    }

    /// Advances past `len` bytes, keeping line and column in step.
    fn advance(&mut self, len: usize) {
        let (consumed, rest) = self.rest.split_at(len);
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += len;
        self.rest = rest;
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        let skipped = self.rest.len() - self.rest.trim_start().len();
        self.advance(skipped);
    }
}

/// Tokenizes a whole document with the document grammar.
///
/// # Errors
/// Returns a tokenization error if some part of the input matches no rule.
pub fn tokenize_document(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source, Grammar::Document).tokenize()
}

/// Tokenizes an effect value with the expression grammar.
///
/// Positions restart at zero relative to `source`.
///
/// # Errors
/// Returns a tokenization error if some part of the input matches no rule.
pub fn tokenize_expression(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source, Grammar::Expression).tokenize()
}
