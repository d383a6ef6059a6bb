//! Refresh pipeline
//!
//! One [`Colorizer`] serves one host. It owns the parser, the exclusion bus,
//! the band colorer subscribed to that bus and the paint-handle cache, and
//! turns a [`Document`] into a complete [`RenderOutput`] per refresh.

use std::path::{Path, PathBuf};

use crate::blocks::{analyze, build_block_tree, Block};
use crate::config::ColorizerConfig;
use crate::decorate::{
    region_entries, BandColorer, JumpEntry, PaintCache, PaintStyle, RenderOutput, StyledEntries,
};
use crate::exclusion::{ExclusionBus, ExclusionSet};
use crate::region::{brace_scope, scan_regions, RegionRange, RegionScan};
use crate::syntax::{LanguageId, ParserState};

/// Source text and the language to analyze it as
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub language: LanguageId,
    pub file_path: Option<PathBuf>,
}

impl Document {
    pub fn new(text: impl Into<String>, language: LanguageId) -> Self {
        Self {
            text: text.into(),
            language,
            file_path: None,
        }
    }

    /// Load a document from a file path, detecting the language from its
    /// extension
    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self {
            text,
            language: LanguageId::from_path(path),
            file_path: Some(path.to_path_buf()),
        })
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}

/// Refresh context
pub struct Colorizer {
    parser: ParserState,
    bus: ExclusionBus,
    colorer: BandColorer,
    cache: PaintCache,
    config: ColorizerConfig,
}

impl Colorizer {
    pub fn new(config: ColorizerConfig) -> Self {
        let mut bus = ExclusionBus::new();
        let colorer = BandColorer::attach(&mut bus, config.color_policy);
        Self {
            parser: ParserState::new(),
            bus,
            colorer,
            cache: PaintCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &ColorizerConfig {
        &self.config
    }

    /// Swap the configuration; known paint handles are kept
    pub fn set_config(&mut self, config: ColorizerConfig) {
        if self.colorer.policy() != config.color_policy {
            tracing::debug!("Color policy changed to {:?}", config.color_policy);
        }
        self.colorer.set_policy(config.color_policy);
        self.config = config;
    }

    /// The bus region ranges are published on, for additional subscribers
    pub fn bus_mut(&mut self) -> &mut ExclusionBus {
        &mut self.bus
    }

    /// Analyze `doc` into its painted block tree without emitting anything
    pub fn block_tree(&mut self, doc: &Document) -> Vec<Block> {
        build_block_tree(analyze(&mut self.parser, &doc.text, doc.language))
    }

    /// Run one full pass over `doc`
    pub fn refresh(&mut self, doc: &Document) -> RenderOutput {
        let lines = doc.lines();

        let scan = scan_regions(lines.iter().copied());
        let exclusions: ExclusionSet = scan.ranges.iter().map(RegionRange::lines).collect();
        self.bus.publish(exclusions.clone());

        let blocks = analyze(&mut self.parser, &doc.text, doc.language);
        let jump_list = jump_list(&blocks, &scan.ranges);
        let tree = build_block_tree(blocks);

        let mut painted: Vec<StyledEntries> = Vec::new();
        let region_layer = self.region_layer(&scan, &lines);
        if !region_layer.1.is_empty() {
            painted.push(region_layer);
        }
        painted.extend(self.colorer.emit(&tree, &lines));

        tracing::debug!(
            "Refreshed {} lines: {} painted blocks at top level, {} regions, {} unclosed markers",
            lines.len(),
            tree.len(),
            scan.ranges.len(),
            scan.unclosed.len()
        );

        RenderOutput {
            layers: self.cache.build_layers(painted),
            jump_list,
            exclusions,
            unclosed: scan.unclosed,
        }
    }

    /// Closed regions plus the brace scope of each unclosed marker.
    ///
    /// Fallback scopes only get the region style; they are not exclusions.
    fn region_layer(&self, scan: &RegionScan, lines: &[&str]) -> StyledEntries {
        let style = PaintStyle::region(self.config.region_color(), self.config.region_border());

        let fallbacks = scan.unclosed.iter().filter_map(|marker| {
            let scope = brace_scope(lines, marker.line)?;
            tracing::debug!(
                "Unclosed region '{}' at line {} styled as lines {}..={}",
                marker.label,
                marker.line,
                scope.start,
                scope.end
            );
            Some(RegionRange {
                label: marker.label.clone(),
                start: scope.start,
                end: scope.end,
            })
        });

        let entries = scan
            .ranges
            .iter()
            .cloned()
            .chain(fallbacks)
            .flat_map(|region| region_entries(&region, lines))
            .collect();
        (style, entries)
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(ColorizerConfig::default())
    }
}

/// Navigation entries for every analyzed block and closed region, by line
fn jump_list(blocks: &[Block], regions: &[RegionRange]) -> Vec<JumpEntry> {
    let mut entries: Vec<JumpEntry> = blocks
        .iter()
        .map(|b| JumpEntry {
            line: b.range.start,
            label: format!("{}: {}", b.kind.label(), b.title),
        })
        .chain(regions.iter().map(|r| JumpEntry {
            line: r.start,
            label: format!("region: {}", r.label),
        }))
        .collect();
    entries.sort();
    entries.dedup();
    entries
}
