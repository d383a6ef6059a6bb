//! Region marker parsing
//!
//! Scans raw lines for `// #region [label]` and `// #endregion [label]`
//! comments and resolves them into the outermost marked ranges.
//!
//! Matching rules:
//! - An unlabeled `#endregion` closes the most recently opened region,
//!   whatever its label.
//! - A labeled `#endregion` closes the nearest open region with the same
//!   label, even if it is not the most recent one. Without a match the close
//!   marker is ignored.
//! - Regions still open at the end of the text produce no range. They are
//!   reported as [`UnclosedMarker`] so callers can fall back to the enclosing
//!   brace block.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::blocks::LineRange;

/// Normalized region label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLabel {
    Unlabeled,
    Named(String),
}

impl RegionLabel {
    /// Normalize raw label text: full-width spaces become ASCII spaces,
    /// whitespace runs collapse to one space, and case is folded
    pub fn normalize(raw: &str) -> Self {
        let folded = raw.replace('\u{3000}', " ");
        let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            RegionLabel::Unlabeled
        } else {
            RegionLabel::Named(collapsed.to_lowercase())
        }
    }
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionLabel::Unlabeled => write!(f, "unlabeled"),
            RegionLabel::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A closed region, from its open marker line to its close marker line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRange {
    pub label: RegionLabel,
    pub start: usize,
    pub end: usize,
}

impl RegionRange {
    pub fn lines(&self) -> LineRange {
        LineRange::new(self.start, self.end)
    }
}

/// An open marker that was never closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnclosedMarker {
    pub label: RegionLabel,
    pub line: usize,
}

/// Result of scanning a document for region markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionScan {
    /// Outermost closed regions, sorted by start line
    pub ranges: Vec<RegionRange>,
    /// Open markers left on the stack, in line order
    pub unclosed: Vec<UnclosedMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    Open(RegionLabel),
    Close(RegionLabel),
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)//\s*#(end)?region\b(.*)$").expect("valid region marker regex")
    })
}

fn parse_marker(line: &str) -> Option<Marker> {
    let caps = marker_regex().captures(line)?;
    let label = RegionLabel::normalize(caps.get(2).map_or("", |m| m.as_str()));
    if caps.get(1).is_some() {
        Some(Marker::Close(label))
    } else {
        Some(Marker::Open(label))
    }
}

/// Scan lines for region markers.
///
/// Returns only outermost ranges: a range inside an already kept range is
/// dropped, while ranges that merely overlap are both kept as they are.
pub fn scan_regions<'a>(lines: impl IntoIterator<Item = &'a str>) -> RegionScan {
    let mut stack: Vec<(RegionLabel, usize)> = Vec::new();
    let mut closed: Vec<RegionRange> = Vec::new();

    for (line_no, line) in lines.into_iter().enumerate() {
        match parse_marker(line) {
            Some(Marker::Open(label)) => stack.push((label, line_no)),
            Some(Marker::Close(RegionLabel::Unlabeled)) => {
                if let Some((label, start)) = stack.pop() {
                    closed.push(RegionRange {
                        label,
                        start,
                        end: line_no,
                    });
                }
            }
            Some(Marker::Close(label)) => {
                match stack.iter().rposition(|(open, _)| *open == label) {
                    Some(idx) => {
                        let (label, start) = stack.remove(idx);
                        closed.push(RegionRange {
                            label,
                            start,
                            end: line_no,
                        });
                    }
                    None => {
                        tracing::trace!(
                            "Ignoring unmatched #endregion {} at line {}",
                            label,
                            line_no
                        );
                    }
                }
            }
            None => {}
        }
    }

    let unclosed = stack
        .into_iter()
        .map(|(label, line)| UnclosedMarker { label, line })
        .collect();

    RegionScan {
        ranges: outermost(closed),
        unclosed,
    }
}

/// Sort by start (longer first on ties) and drop ranges contained in a kept one
fn outermost(mut ranges: Vec<RegionRange>) -> Vec<RegionRange> {
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<RegionRange> = Vec::new();
    for range in ranges {
        let nested = kept.iter().any(|k| k.lines().contains(&range.lines()));
        if !nested {
            kept.push(range);
        }
    }
    kept
}

/// Innermost `{ ... }` block enclosing `line`, used as the scope of a region
/// whose close marker is missing.
///
/// Brace counting ignores strings and comments, which is enough for the
/// block structure of ordinary source files.
pub fn brace_scope(lines: &[&str], line: usize) -> Option<LineRange> {
    if line >= lines.len() {
        return None;
    }

    // Walk backwards from the end of the marker line to the unmatched `{`
    let mut depth = 0usize;
    let mut open_line = None;
    'outer: for idx in (0..=line).rev() {
        for ch in lines[idx].chars().rev() {
            match ch {
                '}' => depth += 1,
                '{' if depth == 0 => {
                    open_line = Some(idx);
                    break 'outer;
                }
                '{' => depth -= 1,
                _ => {}
            }
        }
    }
    let open_line = open_line?;

    // Walk forwards from the line after the marker to the matching `}`
    let mut depth = 0usize;
    for (idx, text) in lines.iter().enumerate().skip(line + 1) {
        for ch in text.chars() {
            match ch {
                '{' => depth += 1,
                '}' if depth == 0 => return Some(LineRange::new(open_line, idx)),
                '}' => depth -= 1,
                _ => {}
            }
        }
    }
    None
}
