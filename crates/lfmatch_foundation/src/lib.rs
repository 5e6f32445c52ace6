//! Logical-form node model for lfmatch.
//!
//! This crate provides:
//! - [`Node`] - The structural unit shared by utterances and templates
//! - [`CandidateSet`] - Attribute value sets where empty means wildcard
//! - [`NodeArena`] / [`NodeIndex`] - Index-based ownership of node graphs
//! - [`LogicalForm`] - A concrete utterance tree
//! - [`NodeId`] - Explicit and generated node identifiers
//! - [`Error`] - Construction errors with source context
//! - [`pretty`] - Tree dumps with visible role-group boundaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod candidate;
pub mod error;
pub mod id;
pub mod node;
pub mod pretty;
pub mod tree;

pub use arena::{NodeArena, NodeIndex};
pub use candidate::{CandidateSet, WILDCARD};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::NodeId;
pub use node::{Attribute, Node, Role, RoleGroup, RoleValue, normalize_role_name};
pub use tree::{LogicalForm, LogicalFormBuilder};
