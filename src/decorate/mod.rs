//! Decoration output
//!
//! Paint instructions are grouped into layers. A layer is one
//! [`PaintStyle`] with the entries painted in it during the current refresh.
//! Styles get a [`PaintHandle`] on first use from the [`PaintCache`] and keep
//! it for the lifetime of the cache, so a host can create one decoration
//! type per handle and overwrite its ranges on every refresh.

mod emitter;
mod indent;

pub use emitter::{hover_text, region_entries, BandColorer, StyledEntries};
pub use indent::{block_indent, owned_lines};

use std::collections::HashMap;

use serde::Serialize;

use crate::blocks::LineRange;
use crate::palette::Color;
use crate::region::UnclosedMarker;

/// Non-breaking space used for blank-line ghost text
pub const GHOST_CHAR: char = '\u{00A0}';

/// Character-column span on one line, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpanRange {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl SpanRange {
    pub fn new(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            line,
            start_col,
            end_col: end_col.max(start_col),
        }
    }

    pub fn is_zero_width(&self) -> bool {
        self.start_col == self.end_col
    }
}

/// One painted span with its optional payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationEntry {
    pub range: SpanRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    /// Inline label rendered after the span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Placeholder text keeping a band visible on a blank line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghost: Option<String>,
}

impl DecorationEntry {
    pub fn span(range: SpanRange) -> Self {
        Self {
            range,
            hover: None,
            annotation: None,
            ghost: None,
        }
    }
}

/// Which pass produced a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Indentation bands of function-like blocks and classes
    Band,
    /// Whole-line background of marked regions
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaintStyle {
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
    pub layer: LayerKind,
}

impl PaintStyle {
    pub fn band(color: Color) -> Self {
        Self {
            color,
            border: None,
            layer: LayerKind::Band,
        }
    }

    pub fn region(color: Color, border: Color) -> Self {
        Self {
            color,
            border: Some(border),
            layer: LayerKind::Region,
        }
    }
}

/// Stable id of a paint style within one cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PaintHandle(pub usize);

/// A style and everything painted with it in this refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintLayer {
    pub handle: PaintHandle,
    pub style: PaintStyle,
    pub entries: Vec<DecorationEntry>,
}

/// Navigation entry for a block or region
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct JumpEntry {
    pub line: usize,
    pub label: String,
}

/// Result of one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    /// One layer per known handle, in handle order
    pub layers: Vec<PaintLayer>,
    pub jump_list: Vec<JumpEntry>,
    /// Exclusion set published for this refresh
    pub exclusions: Vec<LineRange>,
    pub unclosed: Vec<UnclosedMarker>,
}

impl RenderOutput {
    /// Layers with at least one entry
    pub fn painted_layers(&self) -> impl Iterator<Item = &PaintLayer> {
        self.layers.iter().filter(|l| !l.entries.is_empty())
    }

    /// All entries of one layer kind
    pub fn entries(
        &self,
        kind: LayerKind,
    ) -> impl Iterator<Item = (&PaintStyle, &DecorationEntry)> {
        self.layers
            .iter()
            .filter(move |l| l.style.layer == kind)
            .flat_map(|l| l.entries.iter().map(move |e| (&l.style, e)))
    }
}

/// Handles for every style used so far
#[derive(Debug, Default)]
pub struct PaintCache {
    handles: HashMap<PaintStyle, PaintHandle>,
    styles: Vec<PaintStyle>,
}

impl PaintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `style`, allocating one on first use
    pub fn handle_for(&mut self, style: PaintStyle) -> PaintHandle {
        if let Some(handle) = self.handles.get(&style) {
            return *handle;
        }
        let handle = PaintHandle(self.styles.len());
        self.styles.push(style);
        self.handles.insert(style, handle);
        tracing::trace!("New paint handle {:?} for {:?}", handle, style);
        handle
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Turn this refresh's styled entries into a full layer list.
    ///
    /// Every handle the cache knows is present; handles unused in this
    /// refresh get an empty entry list so hosts clear their stale ranges.
    pub fn build_layers(&mut self, painted: Vec<StyledEntries>) -> Vec<PaintLayer> {
        let mut by_handle: HashMap<PaintHandle, Vec<DecorationEntry>> = HashMap::new();
        for (style, entries) in painted {
            let handle = self.handle_for(style);
            by_handle.entry(handle).or_default().extend(entries);
        }

        self.styles
            .iter()
            .enumerate()
            .map(|(idx, style)| {
                let handle = PaintHandle(idx);
                PaintLayer {
                    handle,
                    style: *style,
                    entries: by_handle.remove(&handle).unwrap_or_default(),
                }
            })
            .collect()
    }
}
