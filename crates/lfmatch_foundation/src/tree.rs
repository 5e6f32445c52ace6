//! Concrete utterance trees.

use crate::arena::{NodeArena, NodeIndex};
use crate::node::Node;

/// A concrete logical form: one parsed utterance.
///
/// Every node holds at most one value per attribute and at most one role
/// group. The tree is read-only once built.
#[derive(Clone, Debug)]
pub struct LogicalForm {
    arena: NodeArena,
    root: NodeIndex,
}

impl LogicalForm {
    /// Wraps an arena and its root.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not an index into `arena`.
    #[must_use]
    pub fn new(arena: NodeArena, root: NodeIndex) -> Self {
        assert!(root.as_usize() < arena.len(), "root {root} outside arena");
        Self { arena, root }
    }

    /// Starts building a logical form node by node.
    #[must_use]
    pub fn builder() -> LogicalFormBuilder {
        LogicalFormBuilder::default()
    }

    /// Returns the root index.
    #[must_use]
    pub const fn root(&self) -> NodeIndex {
        self.root
    }

    /// Returns the root node.
    #[must_use]
    pub fn root_node(&self) -> &Node {
        &self.arena[self.root]
    }

    /// Returns the owning arena.
    #[must_use]
    pub const fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Gets a node by index.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.arena[index]
    }
}

/// Builds a [`LogicalForm`] bottom-up: add children first, then the nodes
/// whose roles point at them.
///
/// ```
/// use lfmatch_foundation::{LogicalForm, Node, RoleValue};
///
/// let mut builder = LogicalForm::builder();
/// let top = builder.add(Node::new("V2").with_word("TOP"));
/// let root = builder.add(
///     Node::new("V1")
///         .with_indicator("SPEECHACT")
///         .with_type("SA_REQUEST")
///         .with_role("CONTENT", RoleValue::Node(top)),
/// );
/// let lf = builder.finish(root);
/// assert_eq!(lf.root_node().to_string(), "(SPEECHACT SA_REQUEST *)");
/// ```
#[derive(Debug, Default)]
pub struct LogicalFormBuilder {
    arena: NodeArena,
}

impl LogicalFormBuilder {
    /// Adds a node and returns its index for use in later role values.
    pub fn add(&mut self, node: Node) -> NodeIndex {
        self.arena.push(node)
    }

    /// Gives mutable access to an added node, e.g. to attach roles that point
    /// at nodes added after it.
    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.arena.get_mut(index)
    }

    /// Finishes the tree with `root` as its root.
    #[must_use]
    pub fn finish(self, root: NodeIndex) -> LogicalForm {
        LogicalForm::new(self.arena, root)
    }
}
