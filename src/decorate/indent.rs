//! Line ownership and indentation width

use crate::blocks::{Block, LineRange};
use crate::util::{is_blank, is_punctuation_only, leading_visual_width};

/// Lines of `block` not inside any of its children, restricted to `within`
/// and to the document
pub fn owned_lines(block: &Block, within: LineRange, line_count: usize) -> Vec<usize> {
    let last = within.end.min(block.range.end);
    (within.start.max(block.range.start)..=last)
        .take_while(|line| *line < line_count)
        .filter(|line| !block.children.iter().any(|c| c.range.contains_line(*line)))
        .collect()
}

/// Visual indentation width of a block's band.
///
/// The minimum leading width among the block's own lines that carry code;
/// blank and punctuation-only lines (`});`) are ignored. Falls back to the
/// indentation of the block's first line, and is never below 1.
pub fn block_indent(block: &Block, lines: &[&str]) -> usize {
    let own = owned_lines(block, block.range, lines.len());
    let measured = own
        .iter()
        .map(|&line| lines[line])
        .filter(|text| !is_blank(text) && !is_punctuation_only(text))
        .map(leading_visual_width)
        .min();

    let width = measured.unwrap_or_else(|| {
        lines
            .get(block.range.start)
            .map(|text| leading_visual_width(text))
            .unwrap_or(0)
    });
    width.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockKind;

    fn block(start: usize, end: usize) -> Block {
        Block::new(LineRange::new(start, end), BlockKind::Function, "f", 0)
    }

    #[test]
    fn test_owned_lines_skip_children() {
        let mut parent = block(0, 6);
        parent.children.push(block(2, 4));
        assert_eq!(owned_lines(&parent, parent.range, 10), vec![0, 1, 5, 6]);
    }

    #[test]
    fn test_owned_lines_clip_to_document() {
        let b = block(0, 9);
        assert_eq!(owned_lines(&b, b.range, 3), vec![0, 1, 2]);
        assert_eq!(owned_lines(&b, LineRange::new(5, 7), 3), Vec::<usize>::new());
    }

    #[test]
    fn test_indent_ignores_punctuation_and_blank_lines() {
        let lines = vec!["    run(() => {", "", "        go();", "  });"];
        assert_eq!(block_indent(&block(0, 3), &lines), 4);
    }

    #[test]
    fn test_indent_floor_is_one() {
        let lines = vec!["function top() {", "  return 1;", "}"];
        assert_eq!(block_indent(&block(0, 2), &lines), 1);
    }

    #[test]
    fn test_indent_falls_back_to_first_line() {
        let lines = vec!["      })", "", "  ]"];
        assert_eq!(block_indent(&block(0, 2), &lines), 6);
    }
}
