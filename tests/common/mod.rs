//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use blockbands::blocks::analyze;
use blockbands::decorate::{DecorationEntry, LayerKind, PaintStyle, RenderOutput};
use blockbands::palette::Color;
use blockbands::syntax::ParserState;
use blockbands::{Block, BlockKind, Colorizer, ColorizerConfig, ColorPolicy, Document, LanguageId};

pub const DASHBOARD_TSX: &str = include_str!("../../samples/dashboard.tsx");

/// Flat analyzer output for `source`
pub fn blocks(source: &str, language: LanguageId) -> Vec<Block> {
    let mut parser = ParserState::new();
    analyze(&mut parser, source, language)
}

/// Blocks matching `kind` and `title`
pub fn find<'a>(blocks: &'a [Block], kind: BlockKind, title: &str) -> Vec<&'a Block> {
    blocks
        .iter()
        .filter(|b| b.kind == kind && b.title == title)
        .collect()
}

/// Every block of a tree, pre-order
pub fn flatten(tree: &[Block]) -> Vec<&Block> {
    let mut out = Vec::new();
    for root in tree {
        root.walk(&mut |b| out.push(b));
    }
    out
}

/// Assert containment and sibling disjointness for a whole tree
pub fn assert_tree_invariants(blocks: &[Block]) {
    for (i, block) in blocks.iter().enumerate() {
        for child in &block.children {
            assert!(
                block.range.contains(&child.range),
                "child '{}' {:?} escapes parent '{}' {:?}",
                child.title,
                child.range,
                block.title,
                block.range
            );
            assert_eq!(child.depth, block.depth + 1);
        }
        for other in &blocks[i + 1..] {
            assert!(
                !block.range.overlaps(&other.range),
                "siblings '{}' {:?} and '{}' {:?} overlap",
                block.title,
                block.range,
                other.title,
                other.range
            );
        }
        assert_tree_invariants(&block.children);
    }
}

pub fn colorizer(policy: ColorPolicy) -> Colorizer {
    Colorizer::new(ColorizerConfig {
        color_policy: policy,
        ..ColorizerConfig::default()
    })
}

pub fn refresh(source: &str, language: LanguageId) -> RenderOutput {
    Colorizer::default().refresh(&Document::new(source, language))
}

/// Band entries paired with their style
pub fn band_entries(output: &RenderOutput) -> Vec<(PaintStyle, DecorationEntry)> {
    output
        .entries(LayerKind::Band)
        .map(|(style, entry)| (*style, entry.clone()))
        .collect()
}

/// Lines covered by a visible band span or ghost, sorted
pub fn painted_band_lines(output: &RenderOutput) -> Vec<usize> {
    let mut lines: Vec<usize> = output
        .entries(LayerKind::Band)
        .filter(|(_, e)| !e.range.is_zero_width() || e.ghost.is_some())
        .map(|(_, e)| e.range.line)
        .collect();
    lines.sort();
    lines
}

/// Band color painted on `line`, if any
pub fn band_color_at(output: &RenderOutput, line: usize) -> Option<Color> {
    output
        .entries(LayerKind::Band)
        .find(|(_, e)| e.range.line == line && (!e.range.is_zero_width() || e.ghost.is_some()))
        .map(|(style, _)| style.color)
}

/// All annotations, in layer order
pub fn annotations(output: &RenderOutput) -> Vec<(usize, String)> {
    output
        .entries(LayerKind::Band)
        .filter_map(|(_, e)| e.annotation.clone().map(|a| (e.range.line, a)))
        .collect()
}
