//! Language tags
//!
//! The fixed set of languages sigscan understands. A tag selects the
//! tree-sitter grammar used to build the syntax tree and the node-kind table
//! the extractor applies to it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Python,
    JavaScript,
    Java,
    Go,
}

impl Language {
    /// Get the tag used in file names and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::Go => "go",
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[
            Language::C,
            Language::Python,
            Language::JavaScript,
            Language::Java,
            Language::Go,
        ]
    }

    /// File extensions (without the dot) this language is recognized by
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::C => &["c", "h"],
            Language::Python => &["py"],
            Language::JavaScript => &["js", "mjs", "cjs"],
            Language::Java => &["java"],
            Language::Go => &["go"],
        }
    }

    /// Find the language owning a file extension
    pub fn from_extension(ext: &str) -> Option<Language> {
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext))
    }

    /// Derive the language tag from a file name: the text before the first `_`.
    ///
    /// `python_sample.py` yields `python`. A name without `_` yields the whole
    /// name, which will not parse as a tag.
    pub fn tag_from_filename(file_name: &str) -> &str {
        file_name.split('_').next().unwrap_or(file_name)
    }

    /// The tree-sitter grammar for this language
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "c" => Ok(Language::C),
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            "go" => Ok(Language::Go),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
