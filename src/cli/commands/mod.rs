//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod columns;
mod score;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;

use headline_analyzer::config::{load_settings_with_options, LoadOptions, Settings};
use headline_analyzer::services::ner::load_ner_backend;
use headline_analyzer::services::sentiment::LexiconScorer;
use headline_analyzer::services::BatchAnnotator;
use headline_analyzer::table::EntitiesFormat;

#[derive(Parser)]
#[command(name = "headlines")]
#[command(about = "Sentiment and named entity annotation for news headline tables")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "HEADLINES_CONFIG")]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a headline table and write the results CSV
    Analyze {
        /// Input CSV file (.gz files are decompressed)
        file: PathBuf,
        /// Column holding the text (skips headline detection)
        #[arg(long, env = "HEADLINES_COLUMN")]
        column: Option<String>,
        /// Output path [default: news_headlines_nlp_results.csv]
        #[arg(short, long, env = "HEADLINES_OUTPUT")]
        output: Option<PathBuf>,
        /// Serialize entities as JSON instead of Python tuples
        #[arg(long)]
        json_entities: bool,
        /// Write only the text column plus Sentiment and Entities
        #[arg(long)]
        selected_only: bool,
        /// Number of rows to preview [default: 20]
        #[arg(long)]
        preview: Option<usize>,
        /// Don't print a preview
        #[arg(long, conflicts_with = "preview")]
        no_preview: bool,
    },

    /// List a table's columns and the one that would be annotated
    Columns {
        /// Input CSV file (.gz files are decompressed)
        file: PathBuf,
    },

    /// Score ad-hoc text
    Score {
        /// Texts to annotate
        #[arg(required = true)]
        texts: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI overrides for the analyze command.
pub(crate) struct AnalyzeArgs {
    pub file: PathBuf,
    pub column: Option<String>,
    pub output: Option<PathBuf>,
    pub json_entities: bool,
    pub selected_only: bool,
    pub preview: Option<usize>,
    pub no_preview: bool,
}

impl AnalyzeArgs {
    /// Fold flags over file settings; flags win.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref column) = self.column {
            settings.column = Some(column.clone());
        }
        if let Some(ref output) = self.output {
            settings.output_path = output.clone();
        }
        if self.json_entities {
            settings.entities_format = EntitiesFormat::Json;
        }
        if self.selected_only {
            settings.selected_only = true;
        }
        if let Some(rows) = self.preview {
            settings.preview_rows = rows;
        }
        if self.no_preview {
            settings.preview_rows = 0;
        }
    }
}

/// Resolve the session's capabilities: the sentiment scorer (a bad custom
/// lexicon is fatal) and the entity backend (failures degrade with a warning).
pub(crate) fn build_annotator(settings: &Settings) -> anyhow::Result<BatchAnnotator> {
    let scorer = match settings.lexicon_path {
        Some(ref path) => LexiconScorer::from_path(path)
            .with_context(|| format!("Failed to load lexicon {}", path.display()))?,
        None => LexiconScorer::new(),
    };

    let loaded = load_ner_backend(settings.ner_enabled, settings.gazetteer_path.as_deref());
    if let Some(ref warning) = loaded.warning {
        println!("{} {}", style("!").yellow(), warning);
    }

    Ok(BatchAnnotator::new(Arc::new(scorer), loaded.backend))
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
    };
    let (mut settings, _config) = load_settings_with_options(options)
        .await
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Analyze {
            file,
            column,
            output,
            json_entities,
            selected_only,
            preview,
            no_preview,
        } => {
            let args = AnalyzeArgs {
                file,
                column,
                output,
                json_entities,
                selected_only,
                preview,
                no_preview,
            };
            args.apply(&mut settings);
            analyze::cmd_analyze(&settings, &args.file)
        }
        Commands::Columns { file } => columns::cmd_columns(&settings, &file),
        Commands::Score { texts, json } => score::cmd_score(&settings, &texts, json),
    }
}
