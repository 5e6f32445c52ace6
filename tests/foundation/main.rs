//! Integration tests for Layer 0: Foundation
//!
//! Tests for the node model: candidate sets, ids, arenas, trees, and errors.

mod trees;
