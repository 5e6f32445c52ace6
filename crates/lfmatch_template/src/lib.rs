//! Template sources and logical-form documents for lfmatch.
//!
//! This crate provides:
//! - [`markup`] - A positioned element tree over `quick-xml`
//! - [`TemplateParser`] - The `<commands>` template grammar
//! - [`TemplateSet`] - Parsed commands and standalone components
//! - [`ReferenceResolver`] - `from_id` forward-reference resolution
//! - [`render_source`] - Re-parseable template dumps
//! - [`decode_logical_form`] - TRIPS RDF/XML logical-form decoding

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dump;
pub mod grammar;
pub mod markup;
pub mod resolve;
pub mod template_set;
pub mod utterance;

pub use dump::render_source;
pub use grammar::TemplateParser;
pub use markup::{Element, Position, parse_document};
pub use resolve::ReferenceResolver;
pub use template_set::{CommandTemplate, TemplateSet};
pub use utterance::{decode_logical_form, read_logical_form};
