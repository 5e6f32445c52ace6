//! Integration tests for Layer 1: Templates
//!
//! Tests for template sources, reference resolution, dumps, and logical-form
//! decoding.

mod dumps;
mod sources;
mod utterances;
