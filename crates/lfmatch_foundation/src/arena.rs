//! Arena storage for nodes.
//!
//! Trees never hold pointers to each other. A child is a [`NodeIndex`] into
//! the arena that owns it, so a resolved forward reference is just an index
//! rewrite and reference cycles need no special ownership.

use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::node::{Node, RoleValue};

/// Position of a node in its [`NodeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// Returns the raw index.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning storage for the nodes of one or more trees.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes.
    pub fn push(&mut self, node: Node) -> NodeIndex {
        let index = u32::try_from(self.nodes.len()).expect("node arena exceeds u32::MAX entries");
        self.nodes.push(node);
        NodeIndex(index)
    }

    /// Drops every node at or after position `len`.
    ///
    /// Used to roll back a failed construction; indices handed out after
    /// `len` become invalid.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Gets a node by index.
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.as_usize())
    }

    /// Gets a node by index mutably.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index.as_usize())
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates every node with its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex(i as u32), n))
    }

    /// Child node indices of a node, across all of its role groups.
    pub fn children(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self[index]
            .role_groups
            .iter()
            .flat_map(|g| g.roles())
            .flat_map(|r| r.values.iter())
            .filter_map(|v| match v {
                RoleValue::Node(child) => Some(*child),
                RoleValue::Literal(_) => None,
            })
    }

    /// Every node reachable from `root`, in depth-first pre-order, each once.
    ///
    /// Safe on cyclic graphs.
    #[must_use]
    pub fn reachable(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if !seen.insert(index) {
                continue;
            }
            order.push(index);
            let mut children: Vec<_> = self.children(index).collect();
            children.reverse();
            stack.extend(children);
        }
        order
    }
}

impl Index<NodeIndex> for NodeArena {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.as_usize()]
    }
}

impl IndexMut<NodeIndex> for NodeArena {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.as_usize()]
    }
}
