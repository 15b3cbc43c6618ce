//! Configuration for parsing.

/// Default cap on parenthesised expression nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Default cap on the depth of an effect amount's expression tree.
pub const DEFAULT_MAX_EXPRESSION_DEPTH: usize = 256;

/// Configuration for a single parse invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Deepest allowed parenthesis nesting inside an effect amount.
    pub max_nesting_depth: usize,

    /// Deepest allowed expression tree, counting operator chains as well as
    /// parentheses.
    pub max_expression_depth: usize,

    /// Whether selector categories match regardless of case (`:buildings`).
    ///
    /// Off by default: only the capitalised names (`:Buildings`) match.
    pub case_insensitive_categories: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_expression_depth: DEFAULT_MAX_EXPRESSION_DEPTH,
            case_insensitive_categories: false,
        }
    }
}

impl ParseConfig {
    /// Creates a configuration that accepts category names in any case.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            case_insensitive_categories: true,
            ..Self::default()
        }
    }

    /// Builder method to set the maximum nesting depth.
    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Builder method to set the maximum expression tree depth.
    #[must_use]
    pub fn with_max_expression_depth(mut self, depth: usize) -> Self {
        self.max_expression_depth = depth;
        self
    }

    /// Builder method to enable/disable case-insensitive category matching.
    #[must_use]
    pub fn with_case_insensitive_categories(mut self, enabled: bool) -> Self {
        self.case_insensitive_categories = enabled;
        self
    }
}
