use crate::discovery::LanguageSource;
use crate::extractor::{FieldStrategy, KindProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory scanned by `analyze` when neither flag nor config names one
pub const DEFAULT_SCAN_DIR: &str = "test_code";

/// Settings read from `sigscan.toml`. Every field is optional; command-line
/// flags take precedence over values found here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SigscanConfig {
    pub path: Option<String>,
    pub recursive: Option<bool>,
    pub language_from: Option<LanguageSource>,
    pub kinds: Option<KindProfile>,
    pub strategy: Option<FieldStrategy>,
    pub exclude: Option<Vec<String>>,
    pub jobs: Option<usize>,
}

impl SigscanConfig {
    /// A config with every setting spelled out at its default, for `sigscan init`
    pub fn starter() -> Self {
        Self {
            path: Some(DEFAULT_SCAN_DIR.to_string()),
            recursive: Some(false),
            language_from: Some(LanguageSource::default()),
            kinds: Some(KindProfile::default()),
            strategy: Some(FieldStrategy::default()),
            exclude: Some(Vec::new()),
            jobs: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("sigscan.toml")
}

/// Worker count used when none is configured
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<SigscanConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SigscanConfig = toml::from_str(&contents)
        .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &SigscanConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
