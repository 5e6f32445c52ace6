//! Pretty-printer for node trees.
//!
//! Renders a tree one node per line with every role group introduced by an
//! explicit `[group N]` marker, so the OR-branching of a template (or the
//! single group of an utterance) is visible in dumps.
//!
//! # Example
//!
//! ```
//! use lfmatch_foundation::{LogicalForm, Node, RoleValue, pretty::render_tree};
//!
//! let mut builder = LogicalForm::builder();
//! let top = builder.add(Node::new("V2").with_word("TOP"));
//! let root = builder.add(
//!     Node::new("V1")
//!         .with_indicator("SPEECHACT")
//!         .with_role("CONTENT", RoleValue::Node(top)),
//! );
//! let lf = builder.finish(root);
//! let text = render_tree(lf.arena(), lf.root());
//! assert_eq!(
//!     text,
//!     "V1 (SPEECHACT * *)\n  [group 0]\n    CONTENT:\n      V2 (* * TOP)\n"
//! );
//! ```

use crate::arena::{NodeArena, NodeIndex};
use crate::node::RoleValue;

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Whether to print author-supplied node ids.
    pub show_ids: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_ids: true,
        }
    }
}

/// Render the tree under `root`.
#[must_use]
pub fn render_tree(arena: &NodeArena, root: NodeIndex) -> String {
    render_tree_with_config(arena, root, &PrettyConfig::default())
}

/// Render the tree under `root` with custom configuration.
#[must_use]
pub fn render_tree_with_config(arena: &NodeArena, root: NodeIndex, config: &PrettyConfig) -> String {
    let mut printer = PrettyPrinter {
        arena,
        config,
        output: String::new(),
        path: Vec::new(),
    };
    printer.print_node(root, 0);
    printer.output
}

/// Pretty-printer state.
struct PrettyPrinter<'a> {
    arena: &'a NodeArena,
    config: &'a PrettyConfig,
    output: String,
    /// Nodes on the current root-to-leaf path, to cut cycles.
    path: Vec<NodeIndex>,
}

impl PrettyPrinter<'_> {
    fn indent(&mut self, level: usize) {
        for _ in 0..level * self.config.indent_width {
            self.output.push(' ');
        }
    }

    fn print_node(&mut self, index: NodeIndex, level: usize) {
        let arena = self.arena;
        let node = &arena[index];
        self.indent(level);

        if self.path.contains(&index) {
            self.output.push_str(&format!("(cycle -> {})\n", node.id));
            return;
        }

        if self.config.show_ids && !node.id.is_generated() {
            self.output.push_str(&node.id.to_string());
            self.output.push(' ');
        }
        self.output.push_str(&node.to_string());
        if !node.params.is_empty() {
            let params: Vec<_> = node.params.iter().map(String::as_str).collect();
            self.output.push_str(" => ");
            self.output.push_str(&params.join(","));
        }
        self.output.push('\n');

        self.path.push(index);
        for (i, group) in node.role_groups.iter().enumerate() {
            self.indent(level + 1);
            self.output.push_str(&format!("[group {i}]\n"));
            for role in group.roles() {
                self.indent(level + 2);
                if role.is_wildcard() {
                    self.output.push_str(&format!("{}: *\n", role.name));
                    continue;
                }
                self.output.push_str(&format!("{}:\n", role.name));
                for value in &role.values {
                    match value {
                        RoleValue::Node(child) => self.print_node(*child, level + 3),
                        RoleValue::Literal(text) => {
                            self.indent(level + 3);
                            self.output.push_str(&format!("{text:?}\n"));
                        }
                    }
                }
            }
        }
        self.path.pop();
    }
}
