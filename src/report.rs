//! Result presentation
//!
//! Renders analysis outcomes either as the plain per-file listing
//!
//! ```text
//! File: python_sample.py
//!   Function Name: greet
//!   Return Type: str
//!   Parameters: ["(", "name: str", ")"]
//! ---
//! ```
//!
//! or as JSON, one object per file.

use crate::analyzer::FileOutcome;
use crate::extractor::FunctionRecord;
use crate::ui::Theme;
use crate::Language;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::fmt::Write;

/// JSON shape of one analyzed file
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub file: &'a str,
    pub path: String,
    pub language: Option<Language>,
    pub functions: &'a [FunctionRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a FileOutcome> for FileReport<'a> {
    fn from(outcome: &'a FileOutcome) -> Self {
        Self {
            file: &outcome.file.file_name,
            path: outcome.file.path.display().to_string(),
            language: outcome.language,
            functions: outcome.functions(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Totals over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub functions: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(outcomes: &[FileOutcome]) -> Self {
        Self {
            files: outcomes.len(),
            functions: outcomes.iter().map(|o| o.functions().len()).sum(),
            failed: outcomes.iter().filter(|o| !o.is_ok()).count(),
        }
    }
}

fn field(out: &mut String, label: &str, value: &Option<String>, style: Style, theme: &Theme) {
    let _ = match value {
        Some(value) => writeln!(out, "  {}: {}", label, value.style(style)),
        None => writeln!(out, "  {}: {}", label, "None".style(theme.missing)),
    };
}

/// Write the records of one file in the listing format, without the `File:` header
pub fn write_records(out: &mut String, records: &[FunctionRecord], theme: &Theme) {
    for func in records {
        field(out, "Function Name", &func.function_name, theme.function_name, theme);
        field(out, "Return Type", &func.return_type, theme.return_type, theme);
        let params = format!("{:?}", func.parameters);
        let _ = writeln!(out, "  Parameters: {}", params.style(theme.parameters));
    }
}

/// Render a batch in the listing format, styled with `theme`
pub fn render_listing(outcomes: &[FileOutcome], theme: &Theme) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let _ = writeln!(out, "File: {}", outcome.file.file_name.style(theme.file));
        match &outcome.result {
            Ok(records) => write_records(&mut out, records, theme),
            Err(e) => {
                let _ = writeln!(out, "  Error: {}", e.style(theme.failure));
            }
        }
        out.push_str("---\n");
    }
    out
}

/// Render a batch in the listing format without colors
pub fn render_text(outcomes: &[FileOutcome]) -> String {
    render_listing(outcomes, &Theme::plain())
}

/// Render a batch as a JSON array
pub fn render_json(outcomes: &[FileOutcome]) -> serde_json::Result<String> {
    let reports: Vec<FileReport> = outcomes.iter().map(FileReport::from).collect();
    serde_json::to_string_pretty(&reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{LanguageSource, SourceFile};
    use crate::Error;

    fn outcomes() -> Vec<FileOutcome> {
        vec![
            FileOutcome {
                file: SourceFile::from_path("test_code/go_add.go", LanguageSource::Prefix),
                language: Some(Language::Go),
                result: Ok(vec![
                    FunctionRecord {
                        function_name: Some("add".into()),
                        return_type: Some("int".into()),
                        parameters: vec!["(".into(), "a int".into(), ")".into()],
                    },
                    FunctionRecord::default(),
                ]),
            },
            FileOutcome {
                file: SourceFile::from_path("test_code/perl_x.py", LanguageSource::Prefix),
                language: None,
                result: Err(Error::UnsupportedLanguage("perl".into())),
            },
        ]
    }

    #[test]
    fn test_text_listing() {
        let text = render_text(&outcomes());
        let expected = "\
File: go_add.go
  Function Name: add
  Return Type: int
  Parameters: [\"(\", \"a int\", \")\"]
  Function Name: None
  Return Type: None
  Parameters: []
---
File: perl_x.py
  Error: Unsupported language: perl
---
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_colored_listing_keeps_text() {
        let colored = render_listing(&outcomes(), &Theme::new(true));
        assert_ne!(colored, render_text(&outcomes()));
        assert!(colored.contains("\x1b["));
        assert!(colored.contains("add"));
        assert!(colored.contains("Unsupported language: perl"));
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&outcomes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["file"], "go_add.go");
        assert_eq!(value[0]["language"], "go");
        assert_eq!(value[0]["functions"][0]["function_name"], "add");
        assert_eq!(value[0]["functions"][1]["return_type"], serde_json::Value::Null);
        assert!(value[0].get("error").is_none());
        assert_eq!(value[1]["language"], serde_json::Value::Null);
        assert_eq!(value[1]["error"], "Unsupported language: perl");
    }

    #[test]
    fn test_summary() {
        let summary = Summary::of(&outcomes());
        assert_eq!(summary, Summary { files: 2, functions: 2, failed: 1 });
    }
}
