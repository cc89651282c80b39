use crate::Language;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "Tag")]
    tag: &'static str,
    #[tabled(rename = "Extensions")]
    extensions: String,
    #[tabled(rename = "Example file")]
    example: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: impl ToString) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

/// Table of supported language tags with their extensions
pub fn languages_table() -> String {
    let rows = Language::all().iter().map(|lang| LanguageRow {
        tag: lang.as_str(),
        extensions: lang
            .extensions()
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(" "),
        example: format!("{}_sample.{}", lang.as_str(), lang.extensions().first().copied().unwrap_or_default()),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
