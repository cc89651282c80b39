use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Suppress banners and progress when `SIGSCAN_QUIET` is `1` or `true`
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("SIGSCAN_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable report
    #[default]
    Text,
    /// Machine readable JSON
    Json,
}

impl OutputFormat {
    /// Whether decorations (banners, colors, progress) should be shown
    pub fn is_human(&self) -> bool {
        matches!(self, OutputFormat::Text) && !is_quiet()
    }
}
