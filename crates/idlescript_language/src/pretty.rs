//! Pretty-printer for syntax trees.
//!
//! Renders trees back to source text that re-parses to an equal tree.
//! Nested binary operations are always parenthesised, so the output never
//! depends on the precedence table.
//!
//! # Example
//!
//! ```
//! use idlescript_language::{ParseConfig, parse_effect_text, pretty::pretty_print_effect};
//!
//! let effect = parse_effect_text("multiply yield of :All by 10*12-5^7", &ParseConfig::default()).unwrap();
//! assert_eq!(
//!     pretty_print_effect(&effect),
//!     "multiply yield of :All by (10 * 12) - (5 ^ 7)"
//! );
//! ```

use std::fmt::Write;

use crate::ast::{
    Document, EffectCommand, EntityDeclaration, Expression, ObjectDeclaration, ObjectStatement,
    Section, Selector, Value,
};
use crate::document::USE_DEFAULT;

/// Renders a whole document, one section after another.
#[must_use]
pub fn pretty_print_document(document: &Document) -> String {
    let mut printer = PrettyPrinter::default();
    printer.print_document(document);
    printer.output
}

/// Renders an effect in `<verb> <property> of <target> ... by <amount>` form.
#[must_use]
pub fn pretty_print_effect(effect: &EffectCommand) -> String {
    let mut printer = PrettyPrinter::default();
    printer.print_effect(effect);
    printer.output
}

/// Renders a selector as a single token.
#[must_use]
pub fn pretty_print_selector(selector: &Selector) -> String {
    let mut printer = PrettyPrinter::default();
    printer.print_selector(selector);
    printer.output
}

/// Renders an expression in infix form.
#[must_use]
pub fn pretty_print_expression(expression: &Expression) -> String {
    let mut printer = PrettyPrinter::default();
    printer.print_expression(expression, false);
    printer.output
}

/// Renders an expression by operator name, e.g. `Sub(Mul(10, 12), Pow(5, 7))`.
#[must_use]
pub fn expression_outline(expression: &Expression) -> String {
    match expression {
        Expression::Number(n) => n.to_string(),
        Expression::Binary {
            operator,
            left,
            right,
        } => format!(
            "{}({}, {})",
            operator.name(),
            expression_outline(left),
            expression_outline(right)
        ),
    }
}

/// Pretty-printer state.
#[derive(Default)]
struct PrettyPrinter {
    output: String,
}

impl PrettyPrinter {
    fn line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn print_document(&mut self, document: &Document) {
        for (i, (name, section)) in document.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.line(name.as_str());
            match section {
                Section::Object { properties } => self.print_object(properties),
                Section::EntityList {
                    entities,
                    use_default,
                } => {
                    if *use_default == Some(true) {
                        self.line(USE_DEFAULT);
                    }
                    self.print_entities(entities);
                }
                Section::RawText { text } => self.line(text),
            }
        }
    }

    fn print_entities(&mut self, entities: &EntityDeclaration) {
        for entry in entities.iter() {
            self.output.push('*');
            self.line(&entry.ids.join("|"));
            self.print_object(&entry.body);
        }
    }

    fn print_object(&mut self, object: &ObjectDeclaration) {
        for statement in object.iter() {
            match statement {
                ObjectStatement::BareTag { name } => self.line(name),
                ObjectStatement::KeyValue { key, value } => {
                    self.output.push_str(key);
                    self.output.push_str(": ");
                    match value {
                        Value::String(text) => self.output.push_str(text),
                        Value::Effect(effect) => self.print_effect(effect),
                    }
                    self.output.push('\n');
                }
            }
        }
    }

    fn print_effect(&mut self, effect: &EffectCommand) {
        self.output.push_str(effect.verb.as_str());
        self.output.push(' ');
        self.output.push_str(effect.property.as_str());
        self.output.push_str(" of ");
        self.print_selector(&effect.target);
        if let Some(source) = &effect.source {
            self.output.push_str(" from ");
            self.print_selector(source);
        }
        self.output.push_str(" by ");
        self.print_expression(&effect.amount, false);
    }

    fn print_selector(&mut self, selector: &Selector) {
        if let Some(key) = &selector.key {
            self.output.push_str(key);
        }
        for tag in &selector.tags {
            let _ = write!(self.output, ":tag:{tag}");
        }
        for tag in &selector.excluded_tags {
            let _ = write!(self.output, ":notTag:{tag}");
        }
        for category in &selector.categories {
            self.output.push(':');
            self.output.push_str(category.selector_name());
        }
        match selector.owned {
            Some(true) => self.output.push_str(":owned"),
            Some(false) => self.output.push_str(":notOwned"),
            None => {}
        }
        if selector.selects_all {
            self.output.push_str(":All");
        }
    }

    fn print_expression(&mut self, expression: &Expression, nested: bool) {
        match expression {
            Expression::Number(n) => {
                let _ = write!(self.output, "{n}");
            }
            Expression::Binary {
                operator,
                left,
                right,
            } => {
                if nested {
                    self.output.push('(');
                }
                self.print_expression(left, true);
                let _ = write!(self.output, " {} ", operator.symbol());
                self.print_expression(right, true);
                if nested {
                    self.output.push(')');
                }
            }
        }
    }
}
