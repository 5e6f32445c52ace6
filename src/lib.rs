//! lfmatch - Command template matching over semantic logical forms
//!
//! This crate re-exports all layers of the lfmatch system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: lfmatch_runtime    - CLI, interactive loop, reports, logging setup
//! Layer 2: lfmatch_engine     - Matcher, command library, search strategies
//! Layer 1: lfmatch_template   - Markup, template grammar, references, dumps, utterances
//! Layer 0: lfmatch_foundation - Nodes, candidate sets, arenas, ids, errors
//! ```

pub use lfmatch_engine as engine;
pub use lfmatch_foundation as foundation;
pub use lfmatch_runtime as runtime;
pub use lfmatch_template as template;
