//! Semantic block extraction
//!
//! Turns a tree-sitter parse tree into a flat list of classified blocks
//! (functions, hooks, components, classes, declarations) and nests the
//! painted ones into a containment tree.

mod classify;
mod extract;
mod tree;

pub use classify::{classify_function, FunctionCandidate, FUNCTION_RULES};
pub use extract::{analyze, extract_blocks, WRAPPER_CALLEES};
pub use tree::{build_block_tree, visible_pieces};

use serde::Serialize;

/// Block kind for coloring and annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Function,
    Method,
    Hook,
    Component,
    Class,
    Exported,
    Constant,
    Type,
    Interface,
    Enum,
}

impl BlockKind {
    /// Short label used in annotations
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Function => "function",
            BlockKind::Method => "method",
            BlockKind::Hook => "hook",
            BlockKind::Component => "component",
            BlockKind::Class => "class",
            BlockKind::Exported => "exported",
            BlockKind::Constant => "constant",
            BlockKind::Type => "type",
            BlockKind::Interface => "interface",
            BlockKind::Enum => "enum",
        }
    }

    /// Kinds colored by the function palette policy
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            BlockKind::Function | BlockKind::Method | BlockKind::Hook | BlockKind::Component
        )
    }

    /// Kinds that get an indentation band and take part in the block tree
    pub fn is_painted(&self) -> bool {
        self.is_function_like() || *self == BlockKind::Class
    }
}

/// An inclusive range of whole lines (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Create a range; `end` is clamped so it is never before `start`
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of lines covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Ranges always cover at least one line
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    /// Whether `other` lies entirely inside this range (equal ranges count)
    pub fn contains(&self, other: &LineRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Remove every range in `cuts` from this one.
    ///
    /// Returns the remaining pieces in line order. Each piece is disjoint from
    /// every cut; an empty result means the range is fully covered.
    pub fn subtract(&self, cuts: &[LineRange]) -> Vec<LineRange> {
        let mut pieces = vec![*self];
        for cut in cuts {
            let mut next = Vec::with_capacity(pieces.len() + 1);
            for piece in pieces {
                if !piece.overlaps(cut) {
                    next.push(piece);
                    continue;
                }
                if piece.start < cut.start {
                    next.push(LineRange::new(piece.start, cut.start - 1));
                }
                if cut.end < piece.end {
                    next.push(LineRange::new(cut.end + 1, piece.end));
                }
            }
            pieces = next;
        }
        pieces.sort();
        pieces
    }
}

/// A located, classified syntactic unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub range: LineRange,
    pub kind: BlockKind,
    pub title: String,
    /// Nesting level among painted blocks (0 = top level)
    pub depth: usize,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(range: LineRange, kind: BlockKind, title: impl Into<String>, depth: usize) -> Self {
        Self {
            range,
            kind,
            title: title.into(),
            depth,
            children: Vec::new(),
        }
    }

    /// Visit this block and all descendants depth-first, parents first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Block)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_families() {
        assert!(BlockKind::Hook.is_function_like());
        assert!(BlockKind::Method.is_painted());
        assert!(BlockKind::Class.is_painted());
        assert!(!BlockKind::Class.is_function_like());
        assert!(!BlockKind::Exported.is_painted());
        assert!(!BlockKind::Interface.is_painted());
    }

    #[test]
    fn test_subtract_inside() {
        let range = LineRange::new(0, 20);
        let pieces = range.subtract(&[LineRange::new(5, 9)]);
        assert_eq!(pieces, vec![LineRange::new(0, 4), LineRange::new(10, 20)]);
    }

    #[test]
    fn test_subtract_fully_covered() {
        let range = LineRange::new(4, 6);
        assert!(range.subtract(&[LineRange::new(3, 10)]).is_empty());
    }

    #[test]
    fn test_subtract_edges_and_multiple_cuts() {
        let range = LineRange::new(0, 10);
        let pieces = range.subtract(&[
            LineRange::new(0, 1),
            LineRange::new(5, 5),
            LineRange::new(9, 12),
        ]);
        assert_eq!(pieces, vec![LineRange::new(2, 4), LineRange::new(6, 8)]);
    }

    #[test]
    fn test_subtract_disjoint_is_identity() {
        let range = LineRange::new(10, 12);
        assert_eq!(range.subtract(&[LineRange::new(0, 3)]), vec![range]);
    }
}
