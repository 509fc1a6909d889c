//! ytexport
//!
//! Exports YouTrack issues as flat JSON (and optionally CSV) records.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use ytexport_cli::ExportSummary;
use ytexport_core::models::Config;
use ytexport_core::storage::{init_config_dir, ConfigStorage};

#[derive(Parser, Debug)]
#[command(name = "ytexport")]
#[command(about = "Export YouTrack issues as flat JSON records", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory holding config.json (defaults to the user config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch issues from YouTrack and export them
    Fetch {
        /// YouTrack host, e.g. youtrack.example.com
        #[arg(long, env = "YT_DOMAIN")]
        domain: Option<String>,

        /// YouTrack search query
        #[arg(short, long, env = "YT_SEARCH_QUERY")]
        query: Option<String>,

        /// Maximum number of issues to fetch
        #[arg(long, env = "MAX_ISSUES")]
        max_issues: Option<u32>,

        /// Permanent API token
        #[arg(long, env = "YT_API_TOKEN", hide_env_values = true)]
        token: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-export a previously saved raw response
    Convert {
        /// Raw response file (defaults to raw-response.json in the output dir)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Directory for exported files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write issues.csv
    #[arg(long)]
    csv: bool,
}

impl OutputArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }
        if self.csv {
            config.export.csv = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let dotenv = ytexport_cli::load_dotenv(&cwd)?;
    let args = Args::parse();

    let config_dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => init_config_dir().context("Failed to create config directory")?,
    };
    let storage = ConfigStorage::new(config_dir);
    let mut config = storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.config_path().display()))?;

    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    let summary = match args.command {
        Command::Fetch {
            domain,
            query,
            max_issues,
            token,
            output,
        } => {
            if let Some(domain) = domain {
                config.youtrack.domain = domain;
            }
            if let Some(query) = query {
                config.youtrack.query = query;
            }
            if let Some(max_issues) = max_issues {
                config.youtrack.max_issues = max_issues;
            }
            output.apply(&mut config);

            config.validate().context("Invalid configuration")?;
            init_logging(&config.log_level, dotenv.as_deref());

            ytexport_cli::fetch(&config, token, Utc::now()).await?
        }
        Command::Convert { input, output } => {
            output.apply(&mut config);

            config.validate().context("Invalid configuration")?;
            init_logging(&config.log_level, dotenv.as_deref());

            ytexport_cli::convert(&config, input.as_deref(), Utc::now())?
        }
    };

    report(&summary);
    Ok(())
}

fn init_logging(level: &str, dotenv: Option<&Path>) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(level)
        .init();

    if let Some(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}

fn report(summary: &ExportSummary) {
    println!(
        "Exported {} issue(s) to {}",
        summary.exported,
        summary.issues_path.display()
    );
    if let Some(path) = &summary.csv_path {
        println!("CSV written to {}", path.display());
    }
    if !summary.skipped.is_empty() {
        println!("Skipped {} issue(s)", summary.skipped.len());
        for skipped in &summary.skipped {
            println!(
                "  #{} {}: {}",
                skipped.index,
                skipped.id.as_deref().unwrap_or("-"),
                skipped.field.as_deref().unwrap_or("issue layout")
            );
        }
    }
}
