//! Containment tree for painted blocks
//!
//! The parser's own tree is not used for nesting: blocks are nested purely
//! by line-range containment, which also works for blocks recovered from
//! broken source.

use super::{Block, LineRange};

/// Nest the painted blocks (function-like and classes) of a flat list.
///
/// Blocks are sorted by (start asc, end desc) so a parent always comes before
/// its children. Each block is attached to the innermost open block whose
/// range contains it, or becomes a root. Depth is reassigned from the
/// resulting tree.
///
/// Line ranges of siblings can touch (`}, function () {` closes one callback
/// and opens the next on the same line). The later sibling then starts on the
/// line after the earlier one ends; if nothing is left it is dropped.
/// Containment is decided on the parsed ranges, so blocks opening on the
/// shared line still nest inside the moved sibling and move down with it.
pub fn build_block_tree(blocks: Vec<Block>) -> Vec<Block> {
    let mut painted: Vec<Block> = blocks
        .into_iter()
        .filter(|b| b.kind.is_painted())
        .map(|mut b| {
            b.children.clear();
            b
        })
        .collect();

    painted.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    let mut roots: Vec<Block> = Vec::new();
    // Open blocks with their parsed range
    let mut stack: Vec<(Block, LineRange)> = Vec::new();

    for mut block in painted {
        let parsed = block.range;

        // Pop items that don't contain this block
        while stack
            .last()
            .is_some_and(|(_, open)| !open.contains(&parsed))
        {
            if let Some((finished, _)) = stack.pop() {
                attach(finished, &mut stack, &mut roots);
            }
        }

        // A parent moved down by sibling repair takes its children with it
        let parent_start = stack.last().map(|(parent, _)| parent.range.start);
        let previous_end = match stack.last() {
            Some((parent, _)) => parent.children.last().map(|c| c.range.end),
            None => roots.last().map(|r| r.range.end),
        };
        let floor = match (parent_start, previous_end) {
            (Some(parent), Some(previous)) => Some(parent.max(previous + 1)),
            (Some(parent), None) => Some(parent),
            (None, previous) => previous.map(|end| end + 1),
        };
        if let Some(floor) = floor {
            if block.range.start < floor {
                if block.range.end < floor {
                    tracing::trace!(
                        "Dropping '{}' at line {}: covered by an earlier block",
                        block.title,
                        block.range.start
                    );
                    continue;
                }
                block.range = LineRange::new(floor, block.range.end);
            }
        }

        stack.push((block, parsed));
    }

    // Flush remaining stack
    while let Some((finished, _)) = stack.pop() {
        attach(finished, &mut stack, &mut roots);
    }

    assign_depth(&mut roots, 0);
    roots
}

fn attach(finished: Block, stack: &mut [(Block, LineRange)], roots: &mut Vec<Block>) {
    if let Some((parent, _)) = stack.last_mut() {
        parent.children.push(finished);
    } else {
        roots.push(finished);
    }
}

fn assign_depth(blocks: &mut [Block], depth: usize) {
    for block in blocks {
        block.depth = depth;
        assign_depth(&mut block.children, depth + 1);
    }
}

/// Parts of `range` left after removing every exclusion range
pub fn visible_pieces(range: LineRange, exclusions: &[LineRange]) -> Vec<LineRange> {
    range.subtract(exclusions)
}
