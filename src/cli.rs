//! CLI command definitions and handlers

use crate::aggregator;
use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::languages::{AnalysisTier, ALL_LANGUAGES};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Repolens - multi-language static analysis
///
/// 100% LOCAL - No data leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(
    version,
    about = "Static analysis across 25 languages — security, quality, and performance findings with repository scoring",
    after_help = "\
Examples:
  repolens analyze .                       Analyze current directory
  repolens analyze /path/to/repo           Analyze a specific repo
  repolens analyze . --format json         JSON output for scripting
  repolens analyze . --format md -o report.md   Markdown report
  repolens languages                       List supported languages"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a repository for security, quality, and performance issues
    Analyze {
        /// Path to repository (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Repository name shown in the report (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Output format (text, json, markdown)
        #[arg(long, short = 'f', default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of parallel workers (1-64)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,

        /// Maximum number of files to analyze
        #[arg(long)]
        max_files: Option<usize>,

        /// Additional glob patterns to exclude (repeatable)
        #[arg(long = "exclude", value_name = "GLOB")]
        exclude: Vec<String>,

        /// Skip the dependency manifest scan
        #[arg(long)]
        no_deps: bool,

        /// Run external analyzers (bandit, yamllint) when installed
        #[arg(long)]
        external: bool,
    },

    /// List supported languages and their analysis tier
    Languages,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            path,
            name,
            format,
            output,
            workers,
            max_files,
            exclude,
            no_deps,
            external,
        } => run_analyze(
            &path, name, &format, output, workers, max_files, exclude, no_deps, external,
        ),
        Commands::Languages => run_languages(),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    path: &Path,
    name: Option<String>,
    format: &str,
    output: Option<PathBuf>,
    workers: Option<usize>,
    max_files: Option<usize>,
    exclude: Vec<String>,
    no_deps: bool,
    external: bool,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;

    let mut config = AnalyzerConfig::load(path);
    if let Some(workers) = workers {
        config.workers = workers;
    }
    if let Some(max_files) = max_files {
        config.max_files = max_files;
    }
    config.exclude_patterns.extend(exclude);
    if no_deps {
        config.dependency_scan = false;
    }
    if external {
        config.external_tools = true;
    }

    let repository_name = name.unwrap_or_else(|| {
        path.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| "repository".to_string())
    });

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} analyzing {pos}/{len} {bar:30}")
            .expect("static progress template"),
    );
    let progress = |done: usize, total: usize| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    };

    let analyzer = Analyzer::new(config);
    let analysis =
        aggregator::analyze_repository(&analyzer, path, &repository_name, Some(&progress))?;
    bar.finish_and_clear();

    let rendered = reporters::render(&analysis, format)?;
    match output {
        Some(out_path) => {
            std::fs::write(&out_path, rendered)
                .with_context(|| format!("failed to write report to {}", out_path.display()))?;
            eprintln!("report written to {}", out_path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_languages() -> Result<()> {
    println!("{:<14} {:<12} markup", "language", "tier");
    for language in ALL_LANGUAGES {
        let tier = match language.tier() {
            AnalysisTier::Structured => "structured",
            AnalysisTier::Pattern => "pattern",
        };
        println!(
            "{:<14} {:<12} {}",
            language.name(),
            tier,
            if language.is_markup() { "yes" } else { "no" }
        );
    }
    Ok(())
}
