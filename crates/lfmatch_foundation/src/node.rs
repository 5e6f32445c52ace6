//! The node: one structural unit shared by utterance trees and templates.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::arena::NodeIndex;
use crate::candidate::CandidateSet;
use crate::id::NodeId;

/// One of the three matchable attributes of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// The logical-form indicator (SPEECHACT, F, BARE, ...).
    Indicator,
    /// The ontology type (SA_REQUEST, PERSON, ...).
    Type,
    /// The surface word.
    Word,
}

impl Attribute {
    /// All attributes, in match order.
    pub const ALL: [Self; 3] = [Self::Indicator, Self::Type, Self::Word];

    /// The attribute's name in template markup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Indicator => "indicator",
            Self::Type => "type",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value held by a role: a child node, or a bare literal string.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoleValue {
    /// A child node in the same arena.
    Node(NodeIndex),
    /// A terminal value with no structure (concrete trees only).
    Literal(String),
}

/// A named edge from a node to an ordered list of values.
///
/// In a template an empty value list is a wildcard role: the utterance only
/// has to have the role.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    /// Upper-cased role name.
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<RoleValue>,
}

impl Role {
    /// Creates a role with no values.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_role_name(name),
            values: Vec::new(),
        }
    }

    /// Returns true if a template role accepts any value.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.values.is_empty()
    }
}

/// Canonical form of a role name.
#[must_use]
pub fn normalize_role_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// One alternative of a node's roles: all of them must hold (AND).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleGroup {
    roles: Vec<Role>,
}

impl RoleGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role. Returns false (and leaves the group unchanged) if a role
    /// of the same name is already present.
    pub fn add_role(&mut self, role: Role) -> bool {
        if self.get(&role.name).is_some() {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Appends a value to the named role, creating the role if needed.
    pub fn push_value(&mut self, name: &str, value: RoleValue) {
        let name = normalize_role_name(name);
        if let Some(role) = self.roles.iter_mut().find(|r| r.name == name) {
            role.values.push(value);
        } else {
            self.roles.push(Role {
                name,
                values: vec![value],
            });
        }
    }

    /// Looks up a role by (already normalized) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Iterates roles in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// Mutable access to the roles, used when rewriting references.
    pub fn roles_mut(&mut self) -> impl Iterator<Item = &mut Role> {
        self.roles.iter_mut()
    }

    /// Returns the number of roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if the group has no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// A node of a logical form or of a template.
///
/// Equality and hashing use only `id`: ids are unique within a loaded tree, so
/// two nodes with the same id are the same node.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Stable identifier.
    pub id: NodeId,
    /// Accepted (template) or observed (concrete) indicator.
    pub indicator: CandidateSet,
    /// Accepted or observed type.
    pub kind: CandidateSet,
    /// Accepted or observed word.
    pub word: CandidateSet,
    /// Output parameter names this node's matched value populates.
    pub params: BTreeSet<String>,
    /// OR-alternatives of roles. Empty for leaf nodes.
    pub role_groups: Vec<RoleGroup>,
    /// For forward-reference nodes, the id of the standalone node they stand for.
    pub reference: Option<NodeId>,
}

impl Node {
    /// Creates a leaf node with wildcard attributes.
    #[must_use]
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            indicator: CandidateSet::wildcard(),
            kind: CandidateSet::wildcard(),
            word: CandidateSet::wildcard(),
            params: BTreeSet::new(),
            role_groups: Vec::new(),
            reference: None,
        }
    }

    /// Creates a forward-reference node standing for `target`.
    #[must_use]
    pub fn reference(id: impl Into<NodeId>, target: NodeId) -> Self {
        Self {
            reference: Some(target),
            ..Self::new(id)
        }
    }

    /// Sets the observed indicator.
    #[must_use]
    pub fn with_indicator(mut self, value: impl Into<String>) -> Self {
        self.indicator = CandidateSet::observed(value);
        self
    }

    /// Sets the observed type.
    #[must_use]
    pub fn with_type(mut self, value: impl Into<String>) -> Self {
        self.kind = CandidateSet::observed(value);
        self
    }

    /// Sets the observed word.
    #[must_use]
    pub fn with_word(mut self, value: impl Into<String>) -> Self {
        self.word = CandidateSet::observed(value);
        self
    }

    /// Sets an attribute's candidate set.
    #[must_use]
    pub fn with_candidates(mut self, attribute: Attribute, set: CandidateSet) -> Self {
        *self.attribute_mut(attribute) = set;
        self
    }

    /// Declares output parameter names.
    #[must_use]
    pub fn with_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Appends a value to a role of the first group (concrete trees have one).
    #[must_use]
    pub fn with_role(mut self, name: &str, value: RoleValue) -> Self {
        if self.role_groups.is_empty() {
            self.role_groups.push(RoleGroup::new());
        }
        self.role_groups[0].push_value(name, value);
        self
    }

    /// Adds a role group alternative.
    #[must_use]
    pub fn with_group(mut self, group: RoleGroup) -> Self {
        self.role_groups.push(group);
        self
    }

    /// Returns the candidate set of an attribute.
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> &CandidateSet {
        match attribute {
            Attribute::Indicator => &self.indicator,
            Attribute::Type => &self.kind,
            Attribute::Word => &self.word,
        }
    }

    /// Returns the candidate set of an attribute mutably.
    pub fn attribute_mut(&mut self, attribute: Attribute) -> &mut CandidateSet {
        match attribute {
            Attribute::Indicator => &mut self.indicator,
            Attribute::Type => &mut self.kind,
            Attribute::Word => &mut self.word,
        }
    }

    /// The single observed value of an attribute on a concrete node.
    #[must_use]
    pub fn concrete_value(&self, attribute: Attribute) -> Option<&str> {
        self.attribute(attribute).first()
    }

    /// The value a parameter binding captures from this (concrete) node:
    /// the word, else the type, else the indicator.
    #[must_use]
    pub fn captured_value(&self) -> Option<&str> {
        self.concrete_value(Attribute::Word)
            .or_else(|| self.concrete_value(Attribute::Type))
            .or_else(|| self.concrete_value(Attribute::Indicator))
    }

    /// The value a parameter of `pattern` captures from this node: the
    /// observed value of the first attribute (word, type, indicator) that
    /// `pattern` constrains, else [`captured_value`](Self::captured_value).
    #[must_use]
    pub fn captured_for(&self, pattern: &Node) -> Option<&str> {
        [Attribute::Word, Attribute::Type, Attribute::Indicator]
            .into_iter()
            .filter(|a| !pattern.attribute(*a).is_wildcard())
            .find_map(|a| self.concrete_value(a))
            .or_else(|| self.captured_value())
    }

    /// Returns true if the node has no role groups.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.role_groups.is_empty()
    }

    /// Returns true if this is an unresolved forward-reference node.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Returns true if every attribute is a wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        Attribute::ALL
            .iter()
            .all(|a| self.attribute(*a).is_wildcard())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(target) = &self.reference {
            return write!(f, "(-> {target})");
        }
        write!(f, "({} {} {})", self.indicator, self.kind, self.word)
    }
}
