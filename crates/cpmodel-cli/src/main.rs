//! Computation-pattern model CLI.
//!
//! Provides the `cpmodel` binary:
//! - `build` writes the reference pattern and init dictionaries.
//! - `curate` recovers selected entries, edits them and writes a new pair.
//! - `check` validates every pattern against its bundle.
//! - `walk` dry-runs one pattern's routing tables.
//!
//! Relative output paths resolve against `CPMODEL_OUT_DIR` (default `.`).
//! All outputs are registered with an output plan before anything is
//! written. Exit codes: 0 ok, 1 model error, 2 validation failure, 3 I/O.

mod edits;
mod error;
mod scenarios;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cpmodel_check::{validate, walk, Diagnostic, Report, Severity, WalkConfig};
use cpmodel_core::{Format, PatternKey};
use cpmodel_storage::{AddPolicy, InitDictionary, OutputPlan, PatternDictionary};

use edits::{PeriodEdit, StateEdit};
use error::CliError;

/// Computation-pattern model tools.
#[derive(Parser)]
#[command(name = "cpmodel", about = "Build, curate and check computation patterns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the reference patterns and their init bundles.
    Build {
        /// Pattern dictionary to write (.json, .yaml or .yml).
        #[arg(long)]
        patterns: PathBuf,

        /// Init dictionary to write. Its extension also picks the table
        /// encoding inside each bundle.
        #[arg(long)]
        inits: PathBuf,
    },

    /// Recover selected entries, apply edits and write a curated pair.
    Curate {
        #[arg(long)]
        patterns: PathBuf,

        #[arg(long)]
        inits: PathBuf,

        #[arg(long)]
        out_patterns: PathBuf,

        #[arg(long)]
        out_inits: PathBuf,

        /// Entries to keep, as TYPE/NAME.
        #[arg(long = "select", required = true, num_args = 1..)]
        select: Vec<PatternKey>,

        /// Self-loop period edit, as LABEL=SECS.
        #[arg(long = "period")]
        periods: Vec<PeriodEdit>,

        /// State edit, as LABEL:KEY=VALUE.
        #[arg(long = "state")]
        states: Vec<StateEdit>,
    },

    /// Validate every pattern against its init bundle.
    Check {
        #[arg(long)]
        patterns: PathBuf,

        #[arg(long)]
        inits: PathBuf,
    },

    /// Dry-run the routing tables of one pattern.
    Walk {
        #[arg(long)]
        patterns: PathBuf,

        #[arg(long)]
        inits: PathBuf,

        /// Entry to walk, as TYPE/NAME.
        #[arg(long)]
        key: PatternKey,

        /// Seed for random functions.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Maximum hops from a self-initiating function.
        #[arg(long, default_value_t = 32)]
        hops: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build { patterns, inits } => run_build(&patterns, &inits),
        Commands::Curate {
            patterns,
            inits,
            out_patterns,
            out_inits,
            select,
            periods,
            states,
        } => run_curate(
            &patterns,
            &inits,
            &out_patterns,
            &out_inits,
            &select,
            &periods,
            &states,
        ),
        Commands::Check { patterns, inits } => run_check(&patterns, &inits),
        Commands::Walk {
            patterns,
            inits,
            key,
            seed,
            hops,
        } => run_walk(&patterns, &inits, &key, seed, hops),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

/// Registers both outputs of a run, failing before anything is written.
fn plan_outputs(patterns: &Path, inits: &Path) -> Result<(PathBuf, PathBuf), CliError> {
    let base = std::env::var("CPMODEL_OUT_DIR").unwrap_or_else(|_| ".".to_string());
    let mut plan = OutputPlan::new(base)?;
    let patterns = plan.register(patterns)?;
    let inits = plan.register(inits)?;
    Ok((patterns, inits))
}

fn dictionary_name(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(fallback)
        .to_string()
}

fn run_build(patterns: &Path, inits: &Path) -> Result<i32, CliError> {
    let (cp_path, init_path) = plan_outputs(patterns, inits)?;

    let mut cp_dict = PatternDictionary::new(dictionary_name(&cp_path, "patterns"));
    let mut init_dict = InitDictionary::new(dictionary_name(&init_path, "inits"));
    for (cp, bundle) in scenarios::all(Format::from_path(&init_path))? {
        tracing::debug!(key = %cp.key(), functions = cp.function_count(), "built pattern");
        cp_dict.add(cp, AddPolicy::Reject)?;
        init_dict.add(bundle, AddPolicy::Reject)?;
    }

    cp_dict.write(&cp_path)?;
    init_dict.write(&init_path)?;
    Ok(0)
}

fn run_curate(
    patterns: &Path,
    inits: &Path,
    out_patterns: &Path,
    out_inits: &Path,
    select: &[PatternKey],
    periods: &[PeriodEdit],
    states: &[StateEdit],
) -> Result<i32, CliError> {
    let (cp_path, init_path) = plan_outputs(out_patterns, out_inits)?;
    let cp_in = PatternDictionary::read(patterns)?;
    let init_in = InitDictionary::read(inits)?;

    let mut cp_out = PatternDictionary::new(dictionary_name(&cp_path, "patterns"));
    let mut init_out = InitDictionary::new(dictionary_name(&init_path, "inits"));
    for key in select {
        let cp = cp_in.recover_or_err(key)?.clone();
        let bundle = init_in.recover_or_err(key)?.clone();
        tracing::info!(%key, "recovered");
        cp_out.add(cp, AddPolicy::Overwrite)?;
        init_out.add(bundle, AddPolicy::Overwrite)?;
    }

    for edit in periods {
        let mut applied = false;
        for key in select {
            let Some(cp) = cp_out.get(key) else { continue };
            if !cp.contains_function(&edit.label) {
                continue;
            }
            if let Some(bundle) = init_out.recover_mut(&key.pattern_type, &key.instance) {
                let changed = edits::apply_period(cp, bundle, edit)?;
                tracing::info!(%key, label = %edit.label, period = edit.period, changed, "period set");
                applied = true;
            }
        }
        if !applied {
            return Err(CliError::UnknownLabel {
                label: edit.label.clone(),
            });
        }
    }

    for edit in states {
        let mut applied = false;
        for key in select {
            let has_label = cp_out
                .get(key)
                .is_some_and(|cp| cp.contains_function(&edit.label));
            if !has_label {
                continue;
            }
            if let Some(bundle) = init_out.recover_mut(&key.pattern_type, &key.instance) {
                edits::apply_state(bundle, edit)?;
                tracing::info!(%key, label = %edit.label, state_key = %edit.key, "state set");
                applied = true;
            }
        }
        if !applied {
            return Err(CliError::UnknownLabel {
                label: edit.label.clone(),
            });
        }
    }

    cp_out.write(&cp_path)?;
    init_out.write(&init_path)?;
    Ok(0)
}

/// One diagnostic as printed by `check`.
#[derive(Serialize)]
struct Finding<'a> {
    severity: Severity,
    message: String,
    #[serde(flatten)]
    detail: &'a Diagnostic,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    key: &'a PatternKey,
    errors: usize,
    warnings: usize,
    findings: Vec<Finding<'a>>,
}

impl<'a> CheckOutput<'a> {
    fn from_report(report: &'a Report) -> Self {
        CheckOutput {
            key: &report.key,
            errors: report.count(Severity::Error),
            warnings: report.count(Severity::Warning),
            findings: report
                .diagnostics
                .iter()
                .map(|d| Finding {
                    severity: d.severity(),
                    message: d.to_string(),
                    detail: d,
                })
                .collect(),
        }
    }
}

fn run_check(patterns: &Path, inits: &Path) -> Result<i32, CliError> {
    let cp_dict = PatternDictionary::read(patterns)?;
    let init_dict = InitDictionary::read(inits)?;
    let schemas = scenarios::state_schemas();

    for key in init_dict.keys().filter(|k| !cp_dict.contains(k)) {
        tracing::warn!(%key, "init bundle has no pattern");
    }

    let reports: Vec<Report> = cp_dict
        .iter()
        .map(|(key, cp)| validate(cp, init_dict.get(key), &schemas))
        .collect();
    let output: Vec<CheckOutput> = reports.iter().map(CheckOutput::from_report).collect();
    println!("{}", serde_json::to_string_pretty(&output)?);

    let failed = reports.iter().filter(|r| r.has_errors()).count();
    tracing::info!(patterns = reports.len(), failed, "check finished");
    Ok(if failed > 0 { 2 } else { 0 })
}

fn run_walk(
    patterns: &Path,
    inits: &Path,
    key: &PatternKey,
    seed: u64,
    hops: usize,
) -> Result<i32, CliError> {
    let cp_dict = PatternDictionary::read(patterns)?;
    let init_dict = InitDictionary::read(inits)?;
    let cp = cp_dict.recover_or_err(key)?;
    let bundle = init_dict.recover_or_err(key)?;

    let config = WalkConfig {
        seed,
        max_hops: hops,
        ..WalkConfig::default()
    };
    let steps = walk(cp, bundle, config)?;
    println!("{}", serde_json::to_string_pretty(&steps)?);
    Ok(0)
}
