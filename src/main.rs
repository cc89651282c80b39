//! sigscan CLI - extract function signatures from C, Python, JavaScript, Java and Go files

use clap::{Parser, Subcommand};
use sigscan::config::{self, SigscanConfig};
use sigscan::output::OutputFormat;
use sigscan::report::{self, Summary};
use sigscan::ui::{self, Icons, ProgressManager, ProgressMessage, TableBuilder};
use sigscan::{
    discovery, Analyzer, DiscoveryOptions, ExtractOptions, FieldStrategy, KindProfile, Language,
    LanguageSource, OwnedNode, ParserRegistry, SourceFile, TreeSitterNode,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sigscan")]
#[command(version)]
#[command(about = "Extract function names, return types and parameters from source files")]
#[command(long_about = r#"
sigscan parses source files with tree-sitter and lists every function-like
construct it finds, nested ones included, in source order.

A file's language comes from its name: the text before the first `_`
(python_sample.py, go_server.go). Supported: c, python, javascript, java, go.

Example usage:
  sigscan analyze --path ./test_code
  sigscan file src/c_parser.c
  sigscan --format json file handler.go --language go
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Node-kind table: shared across languages or tuned per grammar
    #[arg(long, value_enum)]
    kinds: Option<KindProfile>,

    /// How a function's children are assigned to name, parameters and return type
    #[arg(long, value_enum)]
    strategy: Option<FieldStrategy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every source file in a directory
    Analyze {
        /// Directory to scan (defaults to the config's path, then `test_code`)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Descend into sub-directories
        #[arg(short, long)]
        recursive: bool,

        /// Derive each file's language from its name prefix or its extension
        #[arg(long, value_enum)]
        language_from: Option<LanguageSource>,

        /// Number of worker threads
        #[arg(short, long)]
        jobs: Option<usize>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Analyze a single file
    File {
        /// File to analyze
        path: PathBuf,

        /// Language tag (defaults to the file name prefix)
        #[arg(short, long)]
        language: Option<String>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print a file's syntax tree as JSON
    Tree {
        /// File to parse
        path: PathBuf,

        /// Language tag (defaults to the file name prefix)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List supported languages
    Languages,

    /// Write a starter sigscan.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps stdout clean for JSON
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            ui::error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

/// Run the selected command; `Ok(false)` means it completed with failures
fn run(cli: Cli) -> anyhow::Result<bool> {
    let settings = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let format = cli.format;

    match cli.command {
        Commands::Analyze { path, recursive, language_from, jobs, extract } => {
            let root = path
                .or_else(|| settings.path.clone().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SCAN_DIR));
            let options = DiscoveryOptions {
                recursive: recursive || settings.recursive.unwrap_or(false),
                language_from: language_from.or(settings.language_from).unwrap_or_default(),
                exclude: settings.exclude.clone().unwrap_or_default(),
            };
            let jobs = jobs.or(settings.jobs).unwrap_or_else(config::default_jobs);
            run_analyze(&root, &options, jobs, extract_options(&extract, &settings), format)
        }

        Commands::File { path, language, extract } => {
            let language = resolve_language(&path, language.as_deref())?;
            let registry = ParserRegistry::with_languages(&[language])?;
            let analyzer = Analyzer::new(&registry, extract_options(&extract, &settings));

            let mut file = SourceFile::from_path(&path, LanguageSource::Prefix);
            file.tag = language.as_str().to_string();
            let outcome = sigscan::FileOutcome {
                language: Some(language),
                result: analyzer.analyze_file(&path, language),
                file,
            };
            let ok = outcome.is_ok();
            print_outcomes(&[outcome], format)?;
            Ok(ok)
        }

        Commands::Tree { path, language } => {
            let language = resolve_language(&path, language.as_deref())?;
            let registry = ParserRegistry::with_languages(&[language])?;
            let source = std::fs::read(&path)?;
            let tree = registry.parse(language, &source)?;
            let owned = OwnedNode::capture(&TreeSitterNode::root(&tree));

            tracing::debug!("{} nodes in {}", owned.size(), path.display());
            println!("{}", serde_json::to_string_pretty(&owned)?);
            Ok(true)
        }

        Commands::Languages => {
            if format.is_human() {
                ui::header("Supported languages");
                println!("{}", ui::languages_table());
            } else {
                let data: Vec<_> = Language::all()
                    .iter()
                    .map(|lang| serde_json::json!({ "tag": lang, "extensions": lang.extensions() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            Ok(true)
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &SigscanConfig::starter(), force)?;
            if format.is_human() {
                ui::success(&format!("Wrote {}", path.display()));
            }
            Ok(true)
        }
    }
}

fn extract_options(args: &ExtractArgs, settings: &SigscanConfig) -> ExtractOptions {
    ExtractOptions {
        kinds: args.kinds.or(settings.kinds).unwrap_or_default(),
        strategy: args.strategy.or(settings.strategy).unwrap_or_default(),
    }
}

/// Explicit tag first, then the file name convention, then the extension
fn resolve_language(path: &Path, tag: Option<&str>) -> anyhow::Result<Language> {
    if let Some(tag) = tag {
        return Ok(tag.parse()?);
    }

    let by_prefix = SourceFile::from_path(path, LanguageSource::Prefix);
    if let Ok(language) = by_prefix.language() {
        return Ok(language);
    }

    let by_extension = SourceFile::from_path(path, LanguageSource::Extension);
    by_extension.language().map_err(|_| {
        anyhow::anyhow!(
            "cannot tell the language of {} (name it <language>_*.ext or pass --language)",
            path.display()
        )
    })
}

fn run_analyze(
    root: &Path,
    options: &DiscoveryOptions,
    jobs: usize,
    extract: ExtractOptions,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let started = Instant::now();
    let files = discovery::discover(root, options)?;

    if format.is_human() {
        ui::header("Analyzing source files");
        ui::info(Icons::FOLDER, "Path", &root.display().to_string());
        ui::info(Icons::FILE, "Files", &files.len().to_string());
    }

    if files.is_empty() {
        if format.is_human() {
            ui::warn(&format!("No source files found in {}", root.display()));
        } else {
            print_outcomes(&[], format)?;
        }
        return Ok(true);
    }

    let registry = ParserRegistry::new()?;
    let analyzer = Analyzer::new(&registry, extract);

    let (progress, tx) = ProgressManager::new(!format.is_human());
    let outcomes = analyzer.analyze_batch(&files, jobs, Some(&tx));
    tx.send(ProgressMessage::Exit).ok();
    drop(tx);
    progress.finish();

    print_outcomes(&outcomes, format)?;

    let summary = Summary::of(&outcomes);
    if format.is_human() {
        ui::section("Summary");
        let mut table = TableBuilder::new();
        table.add_row("Files", summary.files);
        table.add_row("Functions", summary.functions);
        table.add_row("Failed", summary.failed);
        println!("{}", table.build());
        ProgressManager::print_summary(started.elapsed(), summary.files, summary.functions, summary.failed);
    }

    Ok(summary.failed == 0)
}

fn print_outcomes(outcomes: &[sigscan::FileOutcome], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report::render_listing(outcomes, ui::theme())),
        OutputFormat::Json => println!("{}", report::render_json(outcomes)?),
    }
    Ok(())
}
