//! Analysis entry point
//!
//! Ties the parser registry to the extractor: parse one buffer, one file, or
//! a batch of discovered files. Batches fan out over worker threads, one file
//! per task; a file that fails is reported in its own outcome and never stops
//! the rest of the batch.

use crate::discovery::SourceFile;
use crate::extractor::{ExtractOptions, Extractor, FunctionRecord};
use crate::syntax::{ParserRegistry, TreeSitterNode};
use crate::ui::ProgressMessage;
use crate::{Error, Language, Result};
use crossbeam::channel::{self, Sender};
use std::path::Path;

/// Result of analyzing one discovered file
#[derive(Debug)]
pub struct FileOutcome {
    pub file: SourceFile,
    /// Resolved language, `None` when the tag is unsupported
    pub language: Option<Language>,
    pub result: Result<Vec<FunctionRecord>>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Extracted records, empty for failed files
    pub fn functions(&self) -> &[FunctionRecord] {
        self.result.as_deref().unwrap_or(&[])
    }
}

/// Runs extraction over sources using a shared parser registry
pub struct Analyzer<'r> {
    registry: &'r ParserRegistry,
    options: ExtractOptions,
}

impl<'r> Analyzer<'r> {
    pub fn new(registry: &'r ParserRegistry, options: ExtractOptions) -> Self {
        Self { registry, options }
    }

    /// Parse a source buffer and extract its function records
    pub fn analyze_source(&self, language: Language, source: &[u8]) -> Result<Vec<FunctionRecord>> {
        let tree = self.registry.parse(language, source)?;
        if tree.root_node().has_error() {
            tracing::debug!("{} source parsed with syntax errors", language);
        }
        Extractor::for_language(language, self.options).extract(TreeSitterNode::root(&tree), source)
    }

    /// Read a file and extract its function records
    pub fn analyze_file(&self, path: &Path, language: Language) -> Result<Vec<FunctionRecord>> {
        let source = std::fs::read(path)?;
        self.analyze_source(language, &source)
    }

    /// Analyze one discovered file, resolving its language tag first
    pub fn analyze(&self, file: &SourceFile) -> FileOutcome {
        let language = file.language();
        let result = match &language {
            Ok(language) => self.analyze_file(&file.path, *language),
            Err(_) => Err(Error::UnsupportedLanguage(file.tag.clone())),
        };

        match &result {
            Ok(records) => tracing::debug!("{}: {} functions", file.path.display(), records.len()),
            Err(e) => tracing::warn!("{}: {}", file.path.display(), e),
        }

        FileOutcome {
            file: file.clone(),
            language: language.ok(),
            result,
        }
    }

    /// Analyze many files on `jobs` worker threads.
    ///
    /// Outcomes come back in the order of `files`. When `progress` is given,
    /// each worker reports every finished file on it.
    pub fn analyze_batch(
        &self,
        files: &[SourceFile],
        jobs: usize,
        progress: Option<&Sender<ProgressMessage>>,
    ) -> Vec<FileOutcome> {
        let jobs = jobs.clamp(1, files.len().max(1));
        if let Some(tx) = progress {
            tx.send(ProgressMessage::Started { total: files.len() }).ok();
        }

        let (work_tx, work_rx) = channel::unbounded::<usize>();
        for index in 0..files.len() {
            work_tx.send(index).ok();
        }
        drop(work_tx);

        let (result_tx, result_rx) = channel::unbounded::<(usize, FileOutcome)>();
        let scoped = crossbeam::thread::scope(|scope| {
            for _ in 0..jobs {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move |_| {
                    for index in work_rx {
                        let outcome = self.analyze(&files[index]);
                        if let Some(tx) = progress {
                            let message = match &outcome.result {
                                Ok(_) => ProgressMessage::Progress {
                                    file: Some(outcome.file.file_name.clone()),
                                },
                                Err(e) => ProgressMessage::Failed {
                                    file: outcome.file.file_name.clone(),
                                    error: e.to_string(),
                                },
                            };
                            tx.send(message).ok();
                        }
                        if result_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        if scoped.is_err() {
            tracing::error!("An analysis worker panicked; its files are reported as failed");
        }

        let mut slots: Vec<Option<FileOutcome>> = files.iter().map(|_| None).collect();
        for (index, outcome) in result_rx.try_iter() {
            slots[index] = Some(outcome);
        }

        if let Some(tx) = progress {
            tx.send(ProgressMessage::Finished).ok();
        }

        slots
            .into_iter()
            .zip(files)
            .map(|(slot, file)| {
                slot.unwrap_or_else(|| FileOutcome {
                    file: file.clone(),
                    language: file.language().ok(),
                    result: Err(Error::Parse("analysis worker stopped before this file".to_string())),
                })
            })
            .collect()
    }
}
