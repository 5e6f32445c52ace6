//! Integration tests for Layer 2: Engine
//!
//! Tests for the matcher and the command library.

mod library;
mod scenarios;

use lfmatch_foundation::{LogicalForm, Node, RoleValue};

/// Builds `SPEECHACT <kind>` with one CONTENT child carrying `word`.
pub fn request(kind: &str, word: &str) -> LogicalForm {
    let mut builder = LogicalForm::builder();
    let content = builder.add(Node::new("V2").with_word(word));
    let root = builder.add(
        Node::new("V1")
            .with_indicator("SPEECHACT")
            .with_type(kind)
            .with_role("CONTENT", RoleValue::Node(content)),
    );
    builder.finish(root)
}
