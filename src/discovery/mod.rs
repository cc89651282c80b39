//! File discovery
//!
//! Finds source files under a directory and derives each file's language tag
//! from its name. By convention the tag is the text before the first `_`
//! (`python_sample.py`, `go_server.go`); the extension only decides whether a
//! file is a candidate at all.
//!
//! Tags are kept as raw strings here. Resolving them to a [`Language`] is left
//! to the analyzer so that one badly named file fails alone.

mod filter;

pub use filter::IgnoreFilter;

use crate::{Error, Language, Result};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a file's language tag comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSource {
    /// Text before the first `_` in the file name
    #[default]
    Prefix,
    /// The file extension
    Extension,
}

/// Options controlling a directory scan
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Descend into sub-directories instead of scanning one level
    pub recursive: bool,
    pub language_from: LanguageSource,
    /// Extra gitignore-style patterns to skip
    pub exclude: Vec<String>,
}

/// A discovered candidate source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Language tag as derived from the file, possibly unsupported
    pub tag: String,
}

impl SourceFile {
    /// Describe a single file, deriving its tag the same way a scan would
    pub fn from_path(path: impl Into<PathBuf>, language_from: LanguageSource) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let tag = match language_from {
            LanguageSource::Prefix => Language::tag_from_filename(&file_name).to_string(),
            LanguageSource::Extension => path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(Language::from_extension)
                .map(|lang| lang.as_str().to_string())
                .unwrap_or_default(),
        };
        Self { path, file_name, tag }
    }

    /// Resolve the tag to a supported language
    pub fn language(&self) -> Result<Language> {
        self.tag.parse()
    }
}

/// Check whether a path has one of the supported source extensions
pub fn is_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
        .is_some()
}

/// Scan `root` for candidate source files, sorted by path
pub fn discover(root: &Path, options: &DiscoveryOptions) -> Result<Vec<SourceFile>> {
    if !std::fs::metadata(root)?.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a directory", root.display()),
        )));
    }

    let filter = IgnoreFilter::new(root, &options.exclude);
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .max_depth(if options.recursive { None } else { Some(1) })
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !filter.is_ignored(entry.path(), is_dir)
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) || !is_candidate(entry.path()) {
            continue;
        }
        files.push(SourceFile::from_path(entry.into_path(), options.language_from));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!("Discovered {} source files under {}", files.len(), root.display());
    Ok(files)
}
