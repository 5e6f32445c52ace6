//! Template matching and the command library for lfmatch.
//!
//! This crate provides:
//! - [`Matcher`] - Matches one template against a logical form
//! - [`Bindings`] - Parameter values captured by a match
//! - [`TemplateLibrary`] - Ordered commands with first-match search
//! - [`MatchConfig`] - Search strategy and depth limit

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod library;
pub mod matcher;

pub use config::{MatchConfig, SearchStrategy};
pub use library::{CommandMatch, TemplateLibrary};
pub use matcher::{Bindings, GroupSelection, Matcher, TemplateMatch};
