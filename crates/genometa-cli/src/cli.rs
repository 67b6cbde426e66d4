//! CLI argument definitions for the genomics metadata ETL.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use genometa_cli::EtlRequest;
use genometa_model::{EtlMode, EtlOptions, Severity};

#[derive(Parser)]
#[command(
    name = "genometa",
    version,
    about = "Genomics metadata ETL - validate and curate sequencing metadata",
    long_about = "Ingest samples, sequencing runs and QC metrics, validate them against \
                  the rule catalog, and write curated Parquet tables.\n\n\
                  In strict mode any violation aborts the run. In quarantine mode \
                  offending rows are set aside and the rest continue."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline: ingest, validate, transform, load.
    Etl(EtlArgs),

    /// Ingest and validate only; report violations without writing anything.
    Validate(EtlArgs),
}

#[derive(Args)]
pub struct EtlArgs {
    /// Directory holding samples.csv, runs.csv and qc_metrics.tsv.
    #[arg(long = "input-dir", value_name = "DIR", default_value = "data/raw")]
    pub input_dir: PathBuf,

    /// Directory for the curated Parquet tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// Directory for quarantined rows, rewritten by every successful run.
    #[arg(
        long = "quarantine-dir",
        value_name = "DIR",
        default_value = "data/quarantine"
    )]
    pub quarantine_dir: PathBuf,

    /// Abort on any violation, or quarantine offending rows and continue.
    #[arg(long = "mode", value_enum, default_value = "strict")]
    pub mode: ModeArg,

    /// Severity of the QC metric to run reference.
    ///
    /// Hard references exclude dependent rows in quarantine mode; advisory
    /// ones only quarantine the offending row itself.
    #[arg(long = "qc-run-reference", value_enum, default_value = "advisory")]
    pub qc_run_reference: SeverityArg,

    /// Date used by the "collection date not in the future" rule
    /// (default: today, UTC).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,
}

impl EtlArgs {
    pub fn to_request(&self) -> EtlRequest {
        let mut options =
            EtlOptions::new(self.mode.into()).with_qc_run_reference(self.qc_run_reference.into());
        if let Some(date) = self.reference_date {
            options = options.with_reference_date(date);
        }
        EtlRequest {
            raw_dir: self.input_dir.clone(),
            out_dir: self.output_dir.clone(),
            quarantine_dir: self.quarantine_dir.clone(),
            options,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Strict,
    Quarantine,
}

impl From<ModeArg> for EtlMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Strict => EtlMode::Strict,
            ModeArg::Quarantine => EtlMode::Quarantine,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Hard,
    Advisory,
}

impl From<SeverityArg> for Severity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::Hard => Severity::Hard,
            SeverityArg::Advisory => Severity::Advisory,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
