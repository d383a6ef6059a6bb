//! Language identification and detection
//!
//! Maps file extensions and editor language ids to the grammar variant
//! used for block analysis.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    #[default]
    PlainText,
    JavaScript,
    /// JavaScript with embedded markup (the JavaScript grammar parses JSX too)
    Jsx,
    TypeScript,
    /// TypeScript with embedded markup
    Tsx,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => LanguageId::JavaScript,
            "jsx" => LanguageId::Jsx,
            "ts" | "mts" | "cts" => LanguageId::TypeScript,
            "tsx" => LanguageId::Tsx,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Detect language from an editor language id (`typescriptreact`, ...).
    /// Falls back to extension detection so `tsx` or `js` also work.
    pub fn from_language_id(id: &str) -> Self {
        match id.to_lowercase().as_str() {
            "javascript" => LanguageId::JavaScript,
            "javascriptreact" => LanguageId::Jsx,
            "typescript" => LanguageId::TypeScript,
            "typescriptreact" => LanguageId::Tsx,
            other => Self::from_extension(other),
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::Jsx => "JavaScript JSX",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Tsx => "TypeScript JSX",
        }
    }

    /// Check if this language can be analyzed for blocks
    pub fn has_grammar(&self) -> bool {
        !matches!(self, LanguageId::PlainText)
    }

    /// Whether `<Tag` in an expression is markup. Plain TypeScript uses the
    /// same syntax for type assertions.
    pub fn allows_markup(&self) -> bool {
        matches!(
            self,
            LanguageId::JavaScript | LanguageId::Jsx | LanguageId::Tsx
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("js"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_extension("mjs"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_extension("jsx"), LanguageId::Jsx);
        assert_eq!(LanguageId::from_extension("ts"), LanguageId::TypeScript);
        assert_eq!(LanguageId::from_extension("TSX"), LanguageId::Tsx);
        assert_eq!(LanguageId::from_extension("rs"), LanguageId::PlainText);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("src/App.tsx")),
            LanguageId::Tsx
        );
        assert_eq!(
            LanguageId::from_path(Path::new("/path/to/index.cjs")),
            LanguageId::JavaScript
        );
        assert_eq!(
            LanguageId::from_path(Path::new("Makefile")),
            LanguageId::PlainText
        );
    }

    #[test]
    fn test_from_language_id() {
        assert_eq!(
            LanguageId::from_language_id("typescriptreact"),
            LanguageId::Tsx
        );
        assert_eq!(
            LanguageId::from_language_id("javascriptreact"),
            LanguageId::Jsx
        );
        assert_eq!(LanguageId::from_language_id("ts"), LanguageId::TypeScript);
        assert_eq!(LanguageId::from_language_id("python"), LanguageId::PlainText);
    }

    #[test]
    fn test_allows_markup() {
        assert!(LanguageId::Tsx.allows_markup());
        assert!(LanguageId::JavaScript.allows_markup());
        assert!(!LanguageId::TypeScript.allows_markup());
    }
}
