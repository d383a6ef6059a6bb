//! Tree-sitter parser state
//!
//! Holds one parser per grammar variant. Trees are not cached between
//! refreshes; every analysis pass parses the whole document.

use std::collections::HashMap;

use tree_sitter::{Language, Parser, Tree};

use super::languages::LanguageId;

/// Parser instances per language (tree-sitter parsers are !Sync)
pub struct ParserState {
    parsers: HashMap<LanguageId, Parser>,
}

fn grammar(lang: LanguageId) -> Option<Language> {
    match lang {
        LanguageId::JavaScript | LanguageId::Jsx => Some(tree_sitter_javascript::LANGUAGE.into()),
        LanguageId::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        LanguageId::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
        LanguageId::PlainText => None,
    }
}

impl ParserState {
    /// Create a new parser state with all grammars initialized
    pub fn new() -> Self {
        let mut state = Self {
            parsers: HashMap::new(),
        };

        state.init_language(LanguageId::JavaScript);
        state.init_language(LanguageId::Jsx);
        state.init_language(LanguageId::TypeScript);
        state.init_language(LanguageId::Tsx);

        state
    }

    fn init_language(&mut self, lang: LanguageId) {
        let Some(ts_lang) = grammar(lang) else {
            return;
        };

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&ts_lang) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            return;
        }
        self.parsers.insert(lang, parser);
    }

    /// Parse a whole document.
    ///
    /// Returns `None` for plain text or when the parser gives up. Syntax
    /// errors do not make this fail: tree-sitter recovers and the tree
    /// carries `ERROR` nodes around the broken parts.
    pub fn parse(&mut self, source: &str, language: LanguageId) -> Option<Tree> {
        if !language.has_grammar() {
            return None;
        }

        let Some(parser) = self.parsers.get_mut(&language) else {
            tracing::warn!("No parser for language {:?}", language);
            return None;
        };

        let tree = parser.parse(source, None);
        match &tree {
            Some(t) if t.root_node().has_error() => {
                tracing::debug!("Parsed {:?} with recovered syntax errors", language);
            }
            Some(_) => {}
            None => tracing::error!("Parse failed for {:?}", language),
        }
        tree
    }
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new()
    }
}
