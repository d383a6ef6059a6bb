//! Band and region emission

use std::cell::RefCell;
use std::rc::Rc;

use super::{block_indent, owned_lines, DecorationEntry, PaintStyle, SpanRange, GHOST_CHAR};
use crate::blocks::{visible_pieces, Block, LineRange};
use crate::exclusion::{ExclusionBus, ExclusionSet};
use crate::palette::{block_color, ColorPolicy};
use crate::region::RegionRange;
use crate::util::{is_blank, split_identifier, text::visual_col_to_char_col};

/// Entries painted with one style, before handles are assigned
pub type StyledEntries = (PaintStyle, Vec<DecorationEntry>);

/// Title as shown to the user: identifier tokens joined by spaces
pub fn hover_text(title: &str) -> String {
    split_identifier(title).join(" ")
}

/// Paints indentation bands for the block tree, leaving out every line the
/// region scanner has claimed.
///
/// The colorer never asks for exclusions; it keeps the last set the bus
/// delivered to its subscription.
pub struct BandColorer {
    exclusions: Rc<RefCell<ExclusionSet>>,
    policy: ColorPolicy,
}

impl BandColorer {
    /// Create a colorer subscribed to `bus`
    pub fn attach(bus: &mut ExclusionBus, policy: ColorPolicy) -> Self {
        let exclusions = Rc::new(RefCell::new(ExclusionSet::new()));
        let sink = Rc::clone(&exclusions);
        bus.subscribe(move |set| {
            *sink.borrow_mut() = set.clone();
        });
        Self { exclusions, policy }
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ColorPolicy) {
        self.policy = policy;
    }

    /// Snapshot of the exclusion set last received from the bus
    pub fn exclusions(&self) -> ExclusionSet {
        self.exclusions.borrow().clone()
    }

    /// Emit bands for every block of `tree`, parents before children
    pub fn emit(&self, tree: &[Block], lines: &[&str]) -> Vec<StyledEntries> {
        let exclusions = self.exclusions.borrow();
        let mut out = Vec::new();
        for block in tree {
            self.emit_block(block, lines, &exclusions, &mut out);
        }
        out
    }

    fn emit_block(
        &self,
        block: &Block,
        lines: &[&str],
        exclusions: &[LineRange],
        out: &mut Vec<StyledEntries>,
    ) {
        let pieces = visible_pieces(block.range, exclusions);
        if pieces.is_empty() {
            tracing::trace!(
                "Block '{}' at line {} is fully excluded",
                block.title,
                block.range.start
            );
        } else if block.range.start < lines.len() {
            let entries = self.block_entries(block, &pieces, lines);
            if !entries.is_empty() {
                let color = block_color(block, self.policy);
                out.push((PaintStyle::band(color), entries));
            }
        }

        for child in &block.children {
            self.emit_block(child, lines, exclusions, out);
        }
    }

    fn block_entries(
        &self,
        block: &Block,
        pieces: &[LineRange],
        lines: &[&str],
    ) -> Vec<DecorationEntry> {
        let indent = block_indent(block, lines);
        let tokens = hover_text(&block.title);
        let mut entries: Vec<DecorationEntry> = Vec::new();
        let mut hover_placed = false;

        for piece in pieces {
            for line in owned_lines(block, *piece, lines.len()) {
                let text = lines[line];
                let mut entry = if is_blank(text) {
                    let mut entry = DecorationEntry::span(SpanRange::new(line, 0, 0));
                    entry.ghost = Some(GHOST_CHAR.to_string().repeat(indent));
                    entry
                } else {
                    let end = visual_col_to_char_col(text, indent).min(text.chars().count());
                    DecorationEntry::span(SpanRange::new(line, 0, end))
                };
                if !hover_placed && !is_blank(text) {
                    entry.hover = Some(tokens.clone());
                    hover_placed = true;
                }
                entries.push(entry);
            }
        }

        // Annotation sits at the start of the first visible piece, even when
        // that line belongs to a child block
        if let Some(anchor) = pieces.first().map(|p| p.start) {
            let annotation = format!("{}: {}", block.kind.label(), tokens);
            match entries.iter_mut().find(|e| e.range.line == anchor) {
                Some(entry) => entry.annotation = Some(annotation),
                None if anchor < lines.len() => {
                    let mut entry = DecorationEntry::span(SpanRange::new(anchor, 0, 0));
                    entry.annotation = Some(annotation);
                    entries.insert(0, entry);
                }
                None => {}
            }
        }

        entries
    }
}

/// Whole-line entries for a marked region
pub fn region_entries(region: &RegionRange, lines: &[&str]) -> Vec<DecorationEntry> {
    let label = format!("region: {}", region.label);
    let mut entries: Vec<DecorationEntry> = (region.start..=region.end)
        .take_while(|line| *line < lines.len())
        .map(|line| DecorationEntry::span(SpanRange::new(line, 0, lines[line].chars().count())))
        .collect();
    if let Some(first) = entries.first_mut() {
        first.hover = Some(label.clone());
        first.annotation = Some(label);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockKind;
    use crate::region::RegionLabel;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_hover_text() {
        assert_eq!(hover_text("useFetchData"), "use Fetch Data");
        assert_eq!(hover_text("anonymous"), "anonymous");
    }

    #[test]
    fn test_colorer_tracks_bus() {
        let mut bus = ExclusionBus::new();
        bus.publish(vec![LineRange::new(1, 2)]);
        let colorer = BandColorer::attach(&mut bus, ColorPolicy::Hash);
        assert_eq!(colorer.exclusions(), vec![LineRange::new(1, 2)]);

        bus.publish(Vec::new());
        assert!(colorer.exclusions().is_empty());
    }

    #[test]
    fn test_blank_line_gets_ghost() {
        let src = lines("  function a() {\n\n    go();\n  }");
        let tree = vec![Block::new(LineRange::new(0, 3), BlockKind::Function, "a", 0)];
        let mut bus = ExclusionBus::new();
        let colorer = BandColorer::attach(&mut bus, ColorPolicy::Hash);

        let out = colorer.emit(&tree, &src);
        let entries = &out[0].1;
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].range, SpanRange::new(0, 0, 2));
        assert_eq!(entries[0].hover.as_deref(), Some("a"));
        assert_eq!(entries[0].annotation.as_deref(), Some("function: a"));
        assert!(entries[1].range.is_zero_width());
        assert_eq!(entries[1].ghost.as_deref(), Some("\u{a0}\u{a0}"));
    }

    #[test]
    fn test_annotation_on_child_owned_line() {
        let src = lines("const f = () => () => {\n  go();\n};");
        let mut outer = Block::new(LineRange::new(0, 2), BlockKind::Function, "f", 0);
        outer
            .children
            .push(Block::new(LineRange::new(0, 2), BlockKind::Function, "anonymous", 1));
        let mut bus = ExclusionBus::new();
        let colorer = BandColorer::attach(&mut bus, ColorPolicy::Depth);

        let out = colorer.emit(&[outer], &src);
        let outer_entries = &out[0].1;
        assert_eq!(outer_entries.len(), 1);
        assert!(outer_entries[0].range.is_zero_width());
        assert_eq!(outer_entries[0].annotation.as_deref(), Some("function: f"));
    }

    #[test]
    fn test_region_entries_cover_whole_lines() {
        let src = lines("// #region Init\nlet a = 1;\n// #endregion");
        let region = RegionRange {
            label: RegionLabel::Named("init".into()),
            start: 0,
            end: 2,
        };
        let entries = region_entries(&region, &src);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].range, SpanRange::new(1, 0, 10));
        assert_eq!(entries[0].annotation.as_deref(), Some("region: init"));
    }
}
