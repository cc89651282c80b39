//! Parser registry
//!
//! One tree-sitter parser per supported language, built once at startup and
//! handed to whatever needs to parse. Parsers are not `Sync`, so each sits
//! behind its own mutex; callers parsing different languages never contend.

use crate::{Error, Language, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tree_sitter::{Parser, Tree};

/// Registry of configured parsers, keyed by language
pub struct ParserRegistry {
    parsers: HashMap<Language, Mutex<Parser>>,
}

impl ParserRegistry {
    /// Create a registry with a parser for every supported language
    pub fn new() -> Result<Self> {
        Self::with_languages(Language::all())
    }

    /// Create a registry for a subset of languages
    pub fn with_languages(languages: &[Language]) -> Result<Self> {
        let mut parsers = HashMap::new();
        for &language in languages {
            let mut parser = Parser::new();
            parser
                .set_language(&language.grammar())
                .map_err(|e| Error::Parse(format!("Failed to set {} grammar: {}", language, e)))?;
            parsers.insert(language, Mutex::new(parser));
        }
        tracing::debug!("Parser registry ready for {} languages", parsers.len());
        Ok(Self { parsers })
    }

    /// Check whether a parser is registered for a language
    pub fn supports(&self, language: Language) -> bool {
        self.parsers.contains_key(&language)
    }

    /// Parse source bytes with the language's grammar
    pub fn parse(&self, language: Language, source: &[u8]) -> Result<Tree> {
        let parser = self
            .parsers
            .get(&language)
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))?;

        let mut parser = parser
            .lock()
            .map_err(|_| Error::Parse(format!("{} parser lock poisoned", language)))?;

        parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse(format!("{} parser returned no tree", language)))
    }
}
