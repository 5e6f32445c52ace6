//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use lfmatch_engine::MatchConfig;

/// Default log filter when neither `--log` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Match TRIPS logical forms against a library of command templates.
#[derive(Parser, Debug, Clone)]
#[command(name = "lfmatch", version)]
pub struct RuntimeConfig {
    /// Template file, or directory of `*.xml` template files
    pub templates: PathBuf,

    /// Logical-form files to match, in order
    pub utterances: Vec<PathBuf>,

    /// Match the given files and exit (no interactive loop)
    #[arg(short, long)]
    pub batch: bool,

    /// Also print the decoded tree and the winning role groups
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the loaded library as template markup
    #[arg(long)]
    pub dump: bool,

    /// Print the parameters each command can bind
    #[arg(long)]
    pub signatures: bool,

    /// Print one JSON object per utterance
    #[arg(long)]
    pub json: bool,

    /// Search the library on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Log filter (overrides RUST_LOG), e.g. `debug` or `lfmatch_engine=trace`
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Keep interactive history in this file across runs
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,
}

impl RuntimeConfig {
    /// The matching configuration selected by the flags.
    #[must_use]
    pub fn match_config(&self) -> MatchConfig {
        if self.parallel {
            MatchConfig::parallel()
        } else {
            MatchConfig::default()
        }
    }

    /// Output options for reports.
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            verbose: self.verbose,
            json: self.json,
        }
    }
}

/// How match results are printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print the decoded tree and the group trace.
    pub verbose: bool,
    /// Print JSON instead of text.
    pub json: bool,
}
