//! blockbands - indentation band colorizer for TypeScript and JavaScript
//!
//! Locates functions, hooks, components, classes and marked regions in
//! TS/JS/JSX source, nests them by line containment, and produces the paint
//! instructions a host editor needs to draw one colored band per block.
//! Region markers claim their lines through an exclusion bus so regions and
//! function bands never paint the same line.

pub mod blocks;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod decorate;
pub mod exclusion;
pub mod palette;
pub mod refresh;
pub mod region;
pub mod syntax;
pub mod tracing;
pub mod util;
pub mod watch;

// Re-export commonly used types
pub use blocks::{Block, BlockKind, LineRange};
pub use config::ColorizerConfig;
pub use decorate::{DecorationEntry, RenderOutput};
pub use exclusion::ExclusionBus;
pub use palette::ColorPolicy;
pub use refresh::{Colorizer, Document};
pub use syntax::LanguageId;
