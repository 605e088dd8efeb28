// SPDX-License-Identifier: PMPL-1.0-or-later

//! i18n-audit: inventory, lint, validate, sync and machine-translate
//! translation catalogs of a JSX front-end.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use i18n_audit::backfill::{self, DeepLTranslator};
use i18n_audit::config::I18nConfig;
use i18n_audit::lint::{self, RuleSet};
use i18n_audit::report::{self, sarif, ReportFormatter};
use i18n_audit::{diagnostics, extract, sync, validate};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "i18n-audit")]
#[command(version)]
#[command(about = "Translation catalog inventory, validation, sync and machine backfill")]
#[command(long_about = None)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Profile file (defaults to i18n-audit.yaml|yml|json in the root)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan sources and index.html for hard-coded user-facing strings
    Inventory,

    /// Report hard-coded JSX strings (advisory; always exits 0)
    Lint {
        /// Files or directories to lint (default: the source directory)
        #[arg(value_name = "PATHS")]
        paths: Vec<PathBuf>,

        /// Also write diagnostics as SARIF 2.1.0
        #[arg(long, value_name = "FILE")]
        sarif: Option<PathBuf>,
    },

    /// Compare every locale against the default locale
    Validate,

    /// Extract missing keys from the last validation report
    MissingReport,

    /// Fill missing keys in every locale from the default locale
    Sync,

    /// Machine-translate untranslated strings into the target locales
    Translate,

    /// Check project layout and translation settings
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("resolving current directory")?,
    };
    let config = I18nConfig::load(&root, cli.config.as_deref())?;
    let formatter = ReportFormatter::new();

    match cli.command {
        Commands::Inventory => {
            let entries = extract::run(&config)?;
            let path = report::write_inventory(&config.reports_dir, &entries, chrono::Utc::now())?;
            formatter.print_inventory(&entries, shown(&config, &path));
        }

        Commands::Lint { paths, sarif: sarif_out } => {
            let diagnostics = lint::run(&config, &paths)?;
            formatter.print_diagnostics(&diagnostics);
            if let Some(out) = sarif_out {
                let json = sarif::to_sarif_json(&RuleSet::from_config(&config), &diagnostics)?;
                fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
                println!("SARIF report saved to: {}", out.display());
            }
        }

        Commands::Validate => {
            let result = validate::run(&config)?;
            let path = report::write_validation(&config.reports_dir, &result)?;
            formatter.print_validation(&result, shown(&config, &path));
            if !result.ok {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::MissingReport => {
            let (path, buckets) = report::extract_missing(&config.reports_dir)?;
            println!(
                "Wrote {} missing buckets to {}",
                buckets,
                shown(&config, &path).display()
            );
        }

        Commands::Sync => {
            let summary = sync::run(&config)?;
            formatter.print_sync(&summary);
        }

        Commands::Translate => {
            let translator = DeepLTranslator::from_settings(&config.translate)?;
            let summary = backfill::run(&config, &translator)?;
            formatter.print_backfill(&summary);
        }

        Commands::Doctor => diagnostics::run_self_diagnostics(&config)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn shown<'p>(config: &I18nConfig, path: &'p Path) -> &'p Path {
    path.strip_prefix(&config.project_root).unwrap_or(path)
}
