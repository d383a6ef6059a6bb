//! Block extraction from tree-sitter parse trees
//!
//! Walks the JavaScript/TypeScript AST and produces a flat list of
//! classified blocks. The walk threads an explicit accumulator through
//! `collect` instead of mutating shared state, so it can be tested on any
//! tree in isolation.

use std::collections::HashSet;

use tree_sitter::{Node, Tree};

use super::classify::{classify_function, FunctionCandidate};
use super::{Block, BlockKind, LineRange};
use crate::syntax::{LanguageId, ParserState};

/// Title used when nothing names a function or class
pub const ANONYMOUS: &str = "anonymous";

/// Parse `source` and extract its blocks.
///
/// Never fails: plain text or an unparseable document yields an empty list,
/// and syntax errors yield whatever tree-sitter recovered.
pub fn analyze(parser: &mut ParserState, source: &str, language: LanguageId) -> Vec<Block> {
    let Some(tree) = parser.parse(source, language) else {
        return Vec::new();
    };
    extract_blocks(&tree, source, language)
}

/// Extract the flat block list from a parsed tree.
///
/// `language` decides whether `<Tag` after a return is markup or, in plain
/// TypeScript, an angle-bracket type assertion.
pub fn extract_blocks(tree: &Tree, source: &str, language: LanguageId) -> Vec<Block> {
    let blocks = collect(tree.root_node(), source, language.allows_markup(), 0, Vec::new());
    dedup_blocks(blocks)
}

/// Drop exact (range, kind, title) duplicates, keeping the first
fn dedup_blocks(blocks: Vec<Block>) -> Vec<Block> {
    let mut seen = HashSet::new();
    blocks
        .into_iter()
        .filter(|b| seen.insert((b.range, b.kind, b.title.clone())))
        .collect()
}

// =============================================================================
// Node helpers
// =============================================================================

/// Whole-line range of a node. An end at column 0 means the node stopped
/// right after a newline, so the previous row is its last line.
fn line_range(node: &Node) -> LineRange {
    let start = node.start_position();
    let end = node.end_position();
    let end_row = if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    };
    LineRange::new(start.row, end_row)
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn field_text<'a>(node: &Node, field: &str, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field)
        .map(|n| node_text(&n, source))
        .filter(|t| !t.is_empty())
}

/// Function expressions. Older grammars call them `function`, which is also
/// the kind of the anonymous keyword token, hence the `is_named` check.
fn is_function_node(node: &Node) -> bool {
    node.is_named()
        && matches!(
            node.kind(),
            "function_expression" | "function" | "generator_function" | "arrow_function"
        )
}

fn is_class_node(node: &Node) -> bool {
    node.is_named()
        && matches!(
            node.kind(),
            "class_declaration" | "abstract_class_declaration" | "class"
        )
}

/// Identifier bound by a declarator; destructuring patterns have none
fn declarator_name<'a>(declarator: &Node, source: &'a str) -> Option<&'a str> {
    declarator
        .child_by_field_name("name")
        .filter(|n| n.kind() == "identifier")
        .map(|n| node_text(&n, source))
}

/// Field name (`name` in TypeScript, `property` in JavaScript)
fn field_definition_name<'a>(field: &Node, source: &'a str) -> Option<&'a str> {
    field_text(field, "name", source).or_else(|| field_text(field, "property", source))
}

/// Callees whose first argument is the real definition of the variable they
/// initialize. Any other call keeps its function argument as a callback.
pub const WRAPPER_CALLEES: &[&str] = &[
    "memo",
    "React.memo",
    "forwardRef",
    "React.forwardRef",
    "useCallback",
    "React.useCallback",
    "observer",
];

/// `memo(() => ...)` style wrapper: a call to one of [`WRAPPER_CALLEES`]
/// whose first argument is a function
fn wrapped_function<'a>(value: &Node<'a>, source: &str) -> Option<Node<'a>> {
    if value.kind() != "call_expression" {
        return None;
    }
    let callee = value.child_by_field_name("function")?;
    if !WRAPPER_CALLEES.contains(&node_text(&callee, source)) {
        return None;
    }
    let args = value.child_by_field_name("arguments")?;
    let first = args.named_child(0)?;
    is_function_node(&first).then_some(first)
}

fn in_class_body(node: &Node) -> bool {
    node.parent().is_some_and(|p| p.kind() == "class_body")
}

/// Whether a function expression is recorded by its enclosing declarator or
/// class field instead of on its own
fn named_by_parent(node: &Node, source: &str) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind() {
        "variable_declarator" => {
            parent.child_by_field_name("value").as_ref() == Some(node)
                && declarator_name(&parent, source).is_some()
        }
        "public_field_definition" | "field_definition" => {
            parent.child_by_field_name("value").as_ref() == Some(node)
                && field_definition_name(&parent, source).is_some()
        }
        "arguments" => {
            let Some(call) = parent.parent() else {
                return false;
            };
            let Some(declarator) = call.parent() else {
                return false;
            };
            declarator.kind() == "variable_declarator"
                && declarator_name(&declarator, source).is_some()
                && declarator.child_by_field_name("value").as_ref() == Some(&call)
                && wrapped_function(&call, source).as_ref() == Some(node)
        }
        _ => false,
    }
}

/// Callee label for `useEffect(() => ...)` or `items.map(fn)`
fn callee_name<'a>(call: &Node, source: &'a str) -> Option<&'a str> {
    let callee = call.child_by_field_name("function")?;
    match callee.kind() {
        "identifier" => Some(node_text(&callee, source)),
        "member_expression" => field_text(&callee, "property", source),
        _ => None,
    }
}

/// A block title and whether it is a real identifier. Synthesized labels
/// such as `useEffect callback` must not feed the name-based rules.
struct Title {
    text: String,
    is_name: bool,
}

impl Title {
    fn name(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_name: true,
        }
    }

    fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_name: false,
        }
    }
}

/// Own name of a function or class node, or a title derived from where it sits
fn title_for(node: &Node, source: &str) -> Title {
    if let Some(name) = field_text(node, "name", source) {
        return Title::name(name);
    }
    let Some(parent) = node.parent() else {
        return Title::label(ANONYMOUS);
    };
    match parent.kind() {
        "pair" => field_text(&parent, "key", source)
            .map(|k| Title::name(k.trim_matches(|c| c == '"' || c == '\'')))
            .unwrap_or_else(|| Title::label(ANONYMOUS)),
        "assignment_expression" => parent
            .child_by_field_name("left")
            .and_then(|left| match left.kind() {
                "member_expression" => field_text(&left, "property", source),
                "identifier" => Some(node_text(&left, source)),
                _ => None,
            })
            .map(Title::name)
            .unwrap_or_else(|| Title::label(ANONYMOUS)),
        "arguments" => match parent.parent().and_then(|call| callee_name(&call, source)) {
            Some(callee) => Title::label(format!("{} callback", callee)),
            None => Title::label("callback"),
        },
        "export_statement" => Title::label("default"),
        _ => Title::label(ANONYMOUS),
    }
}

fn function_block(
    node: &Node,
    range: LineRange,
    title: Title,
    body: &str,
    markup: bool,
    depth: usize,
) -> Block {
    let name = if title.is_name { title.text.as_str() } else { "" };
    let kind = classify_function(&FunctionCandidate {
        name,
        body,
        in_class: in_class_body(node),
        markup,
    });
    Block::new(range, kind, title.text, depth)
}

/// Names declared by the `declaration` of an export statement
fn declaration_titles<'a>(decl: &Node, source: &'a str) -> Vec<&'a str> {
    match decl.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            decl.children(&mut cursor)
                .filter(|c| c.kind() == "variable_declarator")
                .filter_map(|c| declarator_name(&c, source))
                .collect()
        }
        _ => field_text(decl, "name", source).into_iter().collect(),
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Visit `node`, append its blocks to `acc`, recurse, and hand `acc` back.
///
/// `depth` counts the painted blocks (functions and classes) enclosing `node`.
fn collect(
    node: Node,
    source: &str,
    markup: bool,
    depth: usize,
    mut acc: Vec<Block>,
) -> Vec<Block> {
    let mut child_depth = depth;

    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "method_definition" => {
            acc.push(function_block(
                &node,
                line_range(&node),
                title_for(&node, source),
                node_text(&node, source),
                markup,
                depth,
            ));
            child_depth = depth + 1;
        }
        _ if is_function_node(&node) => {
            if !named_by_parent(&node, source) {
                acc.push(function_block(
                    &node,
                    line_range(&node),
                    title_for(&node, source),
                    node_text(&node, source),
                    markup,
                    depth,
                ));
            }
            child_depth = depth + 1;
        }
        "public_field_definition" | "field_definition" => {
            let value = node
                .child_by_field_name("value")
                .filter(is_function_node);
            if let (Some(value), Some(name)) = (value, field_definition_name(&node, source)) {
                acc.push(function_block(
                    &node,
                    line_range(&node),
                    Title::name(name),
                    node_text(&value, source),
                    markup,
                    depth,
                ));
            }
        }
        _ if is_class_node(&node) => {
            let title = title_for(&node, source);
            acc.push(Block::new(line_range(&node), BlockKind::Class, title.text, depth));
            child_depth = depth + 1;
        }
        "variable_declarator" => {
            if let (Some(name), Some(value)) =
                (declarator_name(&node, source), node.child_by_field_name("value"))
            {
                let range = line_range(&node);
                if is_function_node(&value) || wrapped_function(&value, source).is_some() {
                    acc.push(function_block(
                        &node,
                        range,
                        Title::name(name),
                        node_text(&value, source),
                        markup,
                        depth,
                    ));
                } else if matches!(value.kind(), "object" | "array") {
                    acc.push(Block::new(range, BlockKind::Constant, name, depth));
                }
            }
        }
        "type_alias_declaration" | "interface_declaration" | "enum_declaration" => {
            let kind = match node.kind() {
                "type_alias_declaration" => BlockKind::Type,
                "interface_declaration" => BlockKind::Interface,
                _ => BlockKind::Enum,
            };
            if let Some(name) = field_text(&node, "name", source) {
                acc.push(Block::new(line_range(&node), kind, name, depth));
            }
        }
        "export_statement" => {
            let range = line_range(&node);
            if let Some(decl) = node.child_by_field_name("declaration") {
                for title in declaration_titles(&decl, source) {
                    acc.push(Block::new(range, BlockKind::Exported, title, depth));
                }
            } else if let Some(value) = node.child_by_field_name("value") {
                if is_function_node(&value) || is_class_node(&value) {
                    let title = field_text(&value, "name", source).unwrap_or("default");
                    acc.push(Block::new(range, BlockKind::Exported, title, depth));
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        acc = collect(child, source, markup, child_depth, acc);
    }
    acc
}
