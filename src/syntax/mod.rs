//! Syntax parsing module
//!
//! Provides tree-sitter based parsing for the block analyzer:
//! - Language detection from file extensions and editor language ids
//! - One parser per grammar variant
//!
//! ## Supported Languages
//!
//! - JavaScript / JSX (tree-sitter-javascript)
//! - TypeScript / TSX (tree-sitter-typescript)

mod languages;
mod parser;

pub use languages::LanguageId;
pub use parser::ParserState;
