//! Syntax tree for idlescript documents.
//!
//! Every node is created once during parsing and never mutated afterwards.
//! Ownership is strictly hierarchical: a parent exclusively owns its children.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A parsed document: sections keyed by name.
///
/// A later section with the same name replaces an earlier one.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Sections by name.
    pub sections: BTreeMap<SectionName, Section>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the section with the given name.
    #[must_use]
    pub fn get(&self, name: SectionName) -> Option<&Section> {
        self.sections.get(&name)
    }

    /// Inserts a section, returning the one it replaced.
    pub fn insert(&mut self, name: SectionName, section: Section) -> Option<Section> {
        self.sections.insert(name, section)
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates sections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&SectionName, &Section)> {
        self.sections.iter()
    }
}

/// The fixed set of section headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionName {
    /// `Let's make a game!`
    #[cfg_attr(feature = "serde", serde(rename = "Let's make a game!"))]
    LetsMakeAGame,
    /// `Settings`
    Settings,
    /// `Includes` (reserved)
    Includes,
    /// `Layout`
    Layout,
    /// `Buttons`
    Buttons,
    /// `Buildings`
    Buildings,
    /// `Upgrades`
    Upgrades,
    /// `Items`
    Items,
    /// `Achievements`
    Achievements,
    /// `Resources`
    Resources,
    /// `Shinies`
    Shinies,
    /// `CSS`
    #[cfg_attr(feature = "serde", serde(rename = "CSS"))]
    Css,
}

/// How a section's content is parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    /// A flat run of key/value lines and tags.
    Object,
    /// A list of `*key` entities, each with an object body.
    EntityList,
    /// Verbatim text.
    RawText,
    /// Recognised but not implemented.
    Reserved,
}

impl SectionName {
    /// All section names in header order.
    pub const ALL: [Self; 12] = [
        Self::LetsMakeAGame,
        Self::Settings,
        Self::Includes,
        Self::Layout,
        Self::Buttons,
        Self::Buildings,
        Self::Upgrades,
        Self::Items,
        Self::Achievements,
        Self::Resources,
        Self::Shinies,
        Self::Css,
    ];

    /// Returns the header text for this section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LetsMakeAGame => "Let's make a game!",
            Self::Settings => "Settings",
            Self::Includes => "Includes",
            Self::Layout => "Layout",
            Self::Buttons => "Buttons",
            Self::Buildings => "Buildings",
            Self::Upgrades => "Upgrades",
            Self::Items => "Items",
            Self::Achievements => "Achievements",
            Self::Resources => "Resources",
            Self::Shinies => "Shinies",
            Self::Css => "CSS",
        }
    }

    /// Looks up a section by its exact header text.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == header)
    }

    /// Returns how this section's content is parsed.
    #[must_use]
    pub const fn kind(self) -> SectionKind {
        match self {
            Self::LetsMakeAGame | Self::Settings => SectionKind::Object,
            Self::Layout
            | Self::Buttons
            | Self::Buildings
            | Self::Upgrades
            | Self::Items
            | Self::Achievements
            | Self::Resources
            | Self::Shinies => SectionKind::EntityList,
            Self::Css => SectionKind::RawText,
            Self::Includes => SectionKind::Reserved,
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level section.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    /// Whole-section key/value object (`Let's make a game!`, `Settings`).
    Object {
        /// The section's statements.
        properties: ObjectDeclaration,
    },
    /// Entity list (`Resources`, `Buildings`, `Layout`, ...).
    EntityList {
        /// The declared entities in order.
        entities: EntityDeclaration,
        /// Whether `use default` appeared; only `Some` for `Layout`.
        use_default: Option<bool>,
    },
    /// Verbatim text (`CSS`).
    RawText {
        /// The captured text.
        text: String,
    },
}

impl Section {
    /// Returns the object body if this is an object section.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectDeclaration> {
        match self {
            Self::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Returns the entities if this is an entity-list section.
    #[must_use]
    pub fn as_entities(&self) -> Option<&EntityDeclaration> {
        match self {
            Self::EntityList { entities, .. } => Some(entities),
            _ => None,
        }
    }

    /// Returns the raw text if this is a raw-text section.
    #[must_use]
    pub fn as_raw_text(&self) -> Option<&str> {
        match self {
            Self::RawText { text } => Some(text),
            _ => None,
        }
    }
}

/// An ordered list of entities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityDeclaration<T = ObjectDeclaration> {
    /// Entities in declaration order.
    pub entries: Vec<EntityEntry<T>>,
}

impl<T> Default for EntityDeclaration<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> EntityDeclaration<T> {
    /// Returns the first entity declaring `id` among its aliases.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&EntityEntry<T>> {
        self.entries
            .iter()
            .find(|entry| entry.ids.iter().any(|alias| alias == id))
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entities were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entities in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityEntry<T>> {
        self.entries.iter()
    }
}

/// A single `*id|alias` entity and its body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityEntry<T = ObjectDeclaration> {
    /// Ids split from the key on `|`, in declaration order.
    pub ids: Vec<String>,
    /// The parsed body.
    pub body: T,
}

/// An ordered run of object statements.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDeclaration {
    /// Statements in source order.
    pub statements: Vec<ObjectStatement>,
}

impl ObjectDeclaration {
    /// Returns the value of the first statement with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.statements.iter().find_map(|statement| match statement {
            ObjectStatement::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Returns true if a bare tag with the given name is present.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.statements
            .iter()
            .any(|statement| matches!(statement, ObjectStatement::BareTag { name: n } if n == name))
    }

    /// Returns the number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if there are no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterates statements in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectStatement> {
        self.statements.iter()
    }
}

/// One line of an object body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectStatement {
    /// `key: value`
    KeyValue {
        /// The key without its trailing colon.
        key: String,
        /// The parsed value.
        value: Value,
    },
    /// A bare tag line like `no tooltip`.
    BareTag {
        /// The tag text.
        name: String,
    },
}

/// The value of a key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Plain text.
    String(String),
    /// An effect, for keys starting with `on ` or equal to `passive`.
    Effect(EffectCommand),
}

impl Value {
    /// Returns the text if this is a plain string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Effect(_) => None,
        }
    }

    /// Returns the effect if this is an effect value.
    #[must_use]
    pub fn as_effect(&self) -> Option<&EffectCommand> {
        match self {
            Self::Effect(effect) => Some(effect),
            Self::String(_) => None,
        }
    }
}

/// Returns true if values under `key` are parsed with the effect grammar.
#[must_use]
pub fn is_effect_key(key: &str) -> bool {
    key.starts_with("on ") || key == "passive"
}

/// A numeric property mutation like `multiply yield of :All by 2`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectCommand {
    /// How the property changes.
    pub verb: Verb,
    /// Which property changes.
    pub property: Property,
    /// The entities whose property changes.
    pub target: Selector,
    /// The entities the change originates from (`from ...`).
    pub source: Option<Selector>,
    /// The amount.
    pub amount: Expression,
}

/// Effect verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verb {
    /// `increase`
    Increase,
    /// `lower`
    Lower,
    /// `multiply`
    Multiply,
}

impl Verb {
    /// All verbs.
    pub const ALL: [Self; 3] = [Self::Increase, Self::Lower, Self::Multiply];

    /// Returns the source keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Lower => "lower",
            Self::Multiply => "multiply",
        }
    }

    /// Parses a verb keyword.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.as_str() == word)
    }
}

/// Properties an effect can mutate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    /// `yield of`
    Yield,
    /// `cost of`
    Cost,
    /// `refund of`
    Refund,
    /// `frequency of`
    Frequency,
    /// `duration of`
    Duration,
}

impl Property {
    /// All properties.
    pub const ALL: [Self; 5] = [
        Self::Yield,
        Self::Cost,
        Self::Refund,
        Self::Frequency,
        Self::Duration,
    ];

    /// Returns the property name without ` of`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yield => "yield",
            Self::Cost => "cost",
            Self::Refund => "refund",
            Self::Frequency => "frequency",
            Self::Duration => "duration",
        }
    }

    /// Parses a `<property> of` phrase.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let name = phrase.strip_suffix(" of")?;
        Self::ALL.into_iter().find(|property| property.as_str() == name)
    }
}

/// A set of entities picked by key, tags, category, or ownership.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector {
    /// Leading bare word, absent for selectors starting with `:`.
    pub key: Option<String>,
    /// `:tag:<name>` segments.
    pub tags: BTreeSet<String>,
    /// `:notTag:<name>` segments.
    pub excluded_tags: BTreeSet<String>,
    /// Category segments like `:Buildings`.
    pub categories: BTreeSet<Category>,
    /// `:owned` (true) or `:notOwned` (false).
    pub owned: Option<bool>,
    /// `:All`.
    pub selects_all: bool,
}

/// Entity categories usable in selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// `Resources`
    Resources,
    /// `Buttons`
    Buttons,
    /// `Buildings`
    Buildings,
    /// `Upgrades`
    Upgrades,
    /// `Achievements`
    Achievements,
    /// `Items`
    Items,
    /// `Shinies`
    Shinies,
}

impl Category {
    /// All categories.
    pub const ALL: [Self; 7] = [
        Self::Resources,
        Self::Buttons,
        Self::Buildings,
        Self::Upgrades,
        Self::Achievements,
        Self::Items,
        Self::Shinies,
    ];

    /// Returns the capitalised name as written in selectors.
    #[must_use]
    pub const fn selector_name(self) -> &'static str {
        match self {
            Self::Resources => "Resources",
            Self::Buttons => "Buttons",
            Self::Buildings => "Buildings",
            Self::Upgrades => "Upgrades",
            Self::Achievements => "Achievements",
            Self::Items => "Items",
            Self::Shinies => "Shinies",
        }
    }

    /// Returns the stored lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resources => "resources",
            Self::Buttons => "buttons",
            Self::Buildings => "buildings",
            Self::Upgrades => "upgrades",
            Self::Achievements => "achievements",
            Self::Items => "items",
            Self::Shinies => "shinies",
        }
    }

    /// Matches a selector segment against the category names.
    #[must_use]
    pub fn from_segment(segment: &str, case_insensitive: bool) -> Option<Self> {
        Self::ALL.into_iter().find(|category| {
            if case_insensitive {
                category.selector_name().eq_ignore_ascii_case(segment)
            } else {
                category.selector_name() == segment
            }
        })
    }
}

/// Operator symbols ranked from tightest to loosest binding.
pub const PRECEDENCE: [&str; 16] = [
    "!", "^", "*", "/", "%", "+", "-", "<", "<=", ">", ">=", "==", "!=", "is", "and", "or",
];

/// Infix operators accepted in effect amounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    /// `^`
    Pow,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `is`
    Is,
    /// `and`
    And,
    /// `or`
    Or,
}

impl BinaryOperator {
    /// All binary operators.
    pub const ALL: [Self; 15] = [
        Self::Pow,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Add,
        Self::Sub,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Eq,
        Self::Ne,
        Self::Is,
        Self::And,
        Self::Or,
    ];

    /// Returns the source symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pow => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Is => "is",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Returns the operator name used in outlines like `Add(1, 2)`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pow => "Pow",
            Self::Mul => "Mul",
            Self::Div => "Div",
            Self::Mod => "Mod",
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Lt => "Lt",
            Self::Le => "Le",
            Self::Gt => "Gt",
            Self::Ge => "Ge",
            Self::Eq => "Eq",
            Self::Ne => "Ne",
            Self::Is => "Is",
            Self::And => "And",
            Self::Or => "Or",
        }
    }

    /// Parses an operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Returns the index of this operator in [`PRECEDENCE`]; lower binds tighter.
    #[must_use]
    pub fn rank(self) -> usize {
        PRECEDENCE
            .iter()
            .position(|symbol| *symbol == self.symbol())
            .unwrap_or(PRECEDENCE.len())
    }

    /// Returns true if this operator binds strictly tighter than `other`.
    #[must_use]
    pub fn binds_tighter_than(self, other: Self) -> bool {
        self.rank() < other.rank()
    }
}

/// An arithmetic or logical expression tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// Number literal.
    Number(f64),
    /// `left operator right`
    Binary {
        /// The operator.
        operator: BinaryOperator,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
}

impl Expression {
    /// Creates a binary node.
    #[must_use]
    pub fn binary(operator: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the number if this is a literal.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Binary { .. } => None,
        }
    }

    /// Returns the depth of this tree; a literal has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Number(_) => 1,
            Self::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
