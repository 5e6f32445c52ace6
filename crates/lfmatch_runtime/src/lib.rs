//! Command-line front end and interactive loop for lfmatch.
//!
//! This crate provides:
//! - [`RuntimeConfig`] - `clap` arguments of the `lfmatch` binary
//! - [`Session`] - A loaded, reloadable template library
//! - [`Repl`] - Interactive matching of logical-form files
//! - [`report`] - Text and JSON rendering of match results
//! - [`init_logging`] - `tracing-subscriber` setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod editor;
pub mod logging;
pub mod repl;
pub mod report;
pub mod session;

pub use cli::run;
pub use config::{ReportOptions, RuntimeConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use logging::init_logging;
pub use repl::Repl;
pub use session::{Outcome, Session};
