//! Function kind classification
//!
//! Classification is an ordered table of `(predicate, kind)` rules; the first
//! matching rule wins. The last rule always matches.

use std::sync::OnceLock;

use regex::Regex;

use super::BlockKind;

/// What the classifier knows about a function-like node
#[derive(Debug, Clone, Copy)]
pub struct FunctionCandidate<'a> {
    /// Declared or synthesized name
    pub name: &'a str,
    /// Source text of the function (or the initializer that holds it)
    pub body: &'a str,
    /// Declared directly inside a class body
    pub in_class: bool,
    /// The language has markup syntax; in plain TypeScript `<Foo>value` is a
    /// type assertion
    pub markup: bool,
}

type Rule = (fn(&FunctionCandidate) -> bool, BlockKind);

/// Rules in priority order
pub const FUNCTION_RULES: &[Rule] = &[
    (is_hook_name, BlockKind::Hook),
    (returns_markup, BlockKind::Component),
    (is_pascal_case, BlockKind::Component),
    (declared_in_class, BlockKind::Method),
    (always, BlockKind::Function),
];

/// Classify a function-like node
pub fn classify_function(candidate: &FunctionCandidate) -> BlockKind {
    FUNCTION_RULES
        .iter()
        .find(|(matches, _)| matches(candidate))
        .map(|(_, kind)| *kind)
        .unwrap_or(BlockKind::Function)
}

/// `use` followed by an uppercase letter (`useState`, `useFoo`)
fn is_hook_name(c: &FunctionCandidate) -> bool {
    c.name
        .strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|ch| ch.is_ascii_uppercase())
}

fn markup_return_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `return <Tag`, `return (<Tag`, `return <>` and `=> <Tag` expression bodies
        Regex::new(r"(?:\breturn|=>)\s*\(?\s*<(?:[A-Za-z_$]|>)").expect("valid markup regex")
    })
}

fn returns_markup(c: &FunctionCandidate) -> bool {
    c.markup && markup_return_regex().is_match(c.body)
}

/// Leading uppercase letter with at least one lowercase letter after it,
/// so `Button` qualifies and `API` does not
fn is_pascal_case(c: &FunctionCandidate) -> bool {
    let mut chars = c.name.chars();
    chars.next().is_some_and(|ch| ch.is_ascii_uppercase())
        && chars.any(|ch| ch.is_ascii_lowercase())
}

fn declared_in_class(c: &FunctionCandidate) -> bool {
    c.in_class
}

fn always(_: &FunctionCandidate) -> bool {
    true
}
