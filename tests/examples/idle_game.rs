//! A small idle game exercising every supported section kind.

use std::collections::BTreeSet;

use idlescript_language::pretty::{expression_outline, pretty_print_document};
use idlescript_language::{
    Category, Document, EffectCommand, EntityDeclaration, EntityEntry, ObjectDeclaration,
    ObjectStatement, Property, Section, SectionName, Selector, Value, Verb, parse,
};

const GAME: &str = "Let's make a game!
abc: def
this is a tag
test1: test2
Layout
use default
*hi
bye: e
Resources
*test1|test2
hello: world
test
*test3
on tick: multiply yield of :All:tag:test:notTag:notTest from test:tag:tier1:notTag:pseudoTier2:Buildings by 777
on tick: multiply yield of :All by 10*12-5^7
goodbye world
CSS
#thing {
\tcolor: blue;
}";

fn key_value(key: &str, text: &str) -> ObjectStatement {
    ObjectStatement::KeyValue {
        key: key.to_string(),
        value: Value::String(text.to_string()),
    }
}

fn tag(name: &str) -> ObjectStatement {
    ObjectStatement::BareTag {
        name: name.to_string(),
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn effect_at(document: &Document, id: &str, index: usize) -> EffectCommand {
    let entities = document
        .get(SectionName::Resources)
        .and_then(Section::as_entities)
        .unwrap();
    let body = &entities.find(id).unwrap().body;
    match &body.statements[index] {
        ObjectStatement::KeyValue {
            value: Value::Effect(effect),
            ..
        } => effect.clone(),
        other => panic!("expected an effect, got {other:?}"),
    }
}

#[test]
fn parses_every_section() {
    let document = parse(GAME).unwrap();
    let names: Vec<SectionName> = document.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            SectionName::LetsMakeAGame,
            SectionName::Layout,
            SectionName::Resources,
            SectionName::Css,
        ]
    );
}

#[test]
fn game_metadata() {
    let document = parse(GAME).unwrap();
    let expected = Section::Object {
        properties: ObjectDeclaration {
            statements: vec![
                key_value("abc", "def"),
                tag("this is a tag"),
                key_value("test1", "test2"),
            ],
        },
    };
    assert_eq!(document.get(SectionName::LetsMakeAGame), Some(&expected));
}

#[test]
fn layout_with_default() {
    let document = parse(GAME).unwrap();
    let expected = Section::EntityList {
        entities: EntityDeclaration {
            entries: vec![EntityEntry {
                ids: vec!["hi".to_string()],
                body: ObjectDeclaration {
                    statements: vec![key_value("bye", "e")],
                },
            }],
        },
        use_default: Some(true),
    };
    assert_eq!(document.get(SectionName::Layout), Some(&expected));
}

#[test]
fn resources_entities() {
    let document = parse(GAME).unwrap();
    let entities = document
        .get(SectionName::Resources)
        .and_then(Section::as_entities)
        .unwrap();
    assert_eq!(entities.len(), 2);

    let first = &entities.entries[0];
    assert_eq!(first.ids, ["test1", "test2"]);
    assert_eq!(
        first.body.statements,
        vec![key_value("hello", "world"), tag("test")]
    );

    let second = &entities.entries[1];
    assert_eq!(second.ids, ["test3"]);
    assert_eq!(second.body.len(), 3);
    assert_eq!(second.body.statements[2], tag("goodbye world"));
}

#[test]
fn effect_with_source_selector() {
    let document = parse(GAME).unwrap();
    let effect = effect_at(&document, "test3", 0);

    assert_eq!(effect.verb, Verb::Multiply);
    assert_eq!(effect.property, Property::Yield);
    assert_eq!(
        effect.target,
        Selector {
            key: None,
            tags: set(&["test"]),
            excluded_tags: set(&["notTest"]),
            categories: BTreeSet::new(),
            owned: None,
            selects_all: true,
        }
    );
    assert_eq!(
        effect.source,
        Some(Selector {
            key: Some("test".to_string()),
            tags: set(&["tier1"]),
            excluded_tags: set(&["pseudoTier2"]),
            categories: [Category::Buildings].into_iter().collect(),
            owned: None,
            selects_all: false,
        })
    );
    assert_eq!(expression_outline(&effect.amount), "777");
}

#[test]
fn effect_with_precedence() {
    let document = parse(GAME).unwrap();
    let effect = effect_at(&document, "test3", 1);

    assert!(effect.source.is_none());
    assert!(effect.target.selects_all);
    assert_eq!(
        expression_outline(&effect.amount),
        "Sub(Mul(10, 12), Pow(5, 7))"
    );
}

#[test]
fn css_is_verbatim() {
    let document = parse(GAME).unwrap();
    assert_eq!(
        document.get(SectionName::Css).and_then(Section::as_raw_text),
        Some("#thing {\n\tcolor: blue;\n}")
    );
}

#[test]
fn pretty_printed_game_reparses() {
    let document = parse(GAME).unwrap();
    let printed = pretty_print_document(&document);
    assert_eq!(parse(&printed).unwrap(), document);
}
