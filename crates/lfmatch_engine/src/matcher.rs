//! Template matching against a logical form.
//!
//! A template node accepts an utterance node when each of its candidate sets
//! accepts the node's observed value, its declared parameters unify with the
//! node's captured value, and, if it has role groups, one of the groups is
//! satisfied. Groups are tried in order and the first one that succeeds wins;
//! a group holds when every role it names is present in the utterance and
//! each template child under the role finds an utterance value it matches.
//!
//! Per template child, utterance values are tried in declaration order and
//! the first one that matches is taken. Siblings do not backtrack into each
//! other's choices. An utterance value may satisfy several template children.
//!
//! Bindings and the group trace live in persistent structures, so entering an
//! alternative is a cheap snapshot and a failed alternative leaves nothing
//! behind.

use std::collections::BTreeMap;
use std::fmt;

use im::{OrdMap, Vector};
use lfmatch_foundation::{Attribute, LogicalForm, Node, NodeArena, NodeIndex, RoleGroup, RoleValue};
use tracing::{error, trace, warn};

use crate::config::MatchConfig;

// =============================================================================
// Bindings
// =============================================================================

/// Parameter names bound to the values captured from the utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    values: OrdMap<String, String>,
}

impl Bindings {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value bound to a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Binds `name` to `value`, or checks an existing binding agrees
    /// (ignoring case). Returns false on a conflict, leaving the bindings
    /// unchanged.
    pub fn unify(&mut self, name: &str, value: &str) -> bool {
        match self.values.get(name) {
            Some(existing) => existing.to_uppercase() == value.to_uppercase(),
            None => {
                self.values.insert(name.to_string(), value.to_string());
                true
            }
        }
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates bindings in parameter-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies the bindings into an ordinary map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Bindings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

// =============================================================================
// Match Results
// =============================================================================

/// Which role-group alternative succeeded at one template node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupSelection {
    /// The template node, in the template arena.
    pub node: NodeIndex,
    /// Depth of the node below the template root (root is 0).
    pub depth: usize,
    /// Zero-based index of the winning alternative.
    pub alternative: usize,
}

/// A successful template match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateMatch {
    /// Bound parameters.
    pub bindings: Bindings,
    /// Winning alternative of every branching node on the match path, in
    /// visit order.
    pub groups: Vec<GroupSelection>,
}

/// Matching state threaded through one branch of the search.
#[derive(Clone, Default)]
struct State {
    bindings: Bindings,
    groups: Vector<GroupSelection>,
}

// =============================================================================
// Matcher
// =============================================================================

/// Matches utterances against templates stored in one arena.
pub struct Matcher<'a> {
    templates: &'a NodeArena,
    max_depth: usize,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher over a resolved template arena.
    #[must_use]
    pub fn new(templates: &'a NodeArena) -> Self {
        Self::with_config(templates, &MatchConfig::default())
    }

    /// Creates a matcher with the given configuration.
    #[must_use]
    pub fn with_config(templates: &'a NodeArena, config: &MatchConfig) -> Self {
        Self {
            templates,
            max_depth: config.max_depth,
        }
    }

    /// Matches the utterance root against the template rooted at
    /// `template_root`. Returns `None` when the template does not match.
    #[must_use]
    pub fn match_template(
        &self,
        utterance: &LogicalForm,
        template_root: NodeIndex,
    ) -> Option<TemplateMatch> {
        let state = self.match_node(utterance, utterance.root(), template_root, 0, State::default())?;
        Some(TemplateMatch {
            bindings: state.bindings,
            groups: state.groups.into_iter().collect(),
        })
    }

    fn match_node(
        &self,
        utterance: &LogicalForm,
        concrete: NodeIndex,
        template: NodeIndex,
        depth: usize,
        mut state: State,
    ) -> Option<State> {
        if depth > self.max_depth {
            warn!(depth, node = %self.templates[template].id, "depth limit reached, branch counted as no match");
            return None;
        }
        let pattern = &self.templates[template];
        if let Some(target) = &pattern.reference {
            error!(%target, node = %template, "matching reached an unresolved reference");
            debug_assert!(
                pattern.reference.is_none(),
                "unresolved reference to {target} during matching"
            );
            return None;
        }
        let node = utterance.node(concrete);

        if !attributes_accept(pattern, node) {
            return None;
        }
        if let Some(value) = node.captured_for(pattern) {
            for param in &pattern.params {
                if !state.bindings.unify(param, value) {
                    trace!(param = %param, value, "conflicting parameter binding");
                    return None;
                }
            }
        }
        if pattern.is_leaf() {
            return Some(state);
        }

        let roles = node.role_groups.first();
        for (alternative, group) in pattern.role_groups.iter().enumerate() {
            trace!(node = %pattern.id, alternative, depth, "trying role group");
            let mut branch = state.clone();
            branch.groups.push_back(GroupSelection {
                node: template,
                depth,
                alternative,
            });
            if let Some(done) = self.match_group(utterance, roles, group, depth, branch) {
                return Some(done);
            }
        }
        None
    }

    /// Every role of `group` must be present; every template child must be
    /// satisfied by some value of the utterance's role.
    fn match_group(
        &self,
        utterance: &LogicalForm,
        roles: Option<&RoleGroup>,
        group: &RoleGroup,
        depth: usize,
        mut state: State,
    ) -> Option<State> {
        for role in group.roles() {
            let Some(present) = roles.and_then(|r| r.get(&role.name)) else {
                trace!(role = %role.name, "role missing from utterance");
                return None;
            };
            for child in &role.values {
                state = self.match_child(utterance, &present.values, child, depth + 1, state)?;
            }
        }
        Some(state)
    }

    /// The first utterance value that satisfies `child` wins.
    fn match_child(
        &self,
        utterance: &LogicalForm,
        values: &[RoleValue],
        child: &RoleValue,
        depth: usize,
        state: State,
    ) -> Option<State> {
        match child {
            RoleValue::Node(template) => values.iter().find_map(|value| match value {
                RoleValue::Node(concrete) => {
                    self.match_node(utterance, *concrete, *template, depth, state.clone())
                }
                RoleValue::Literal(text) => self.match_literal(text, *template, state.clone()),
            }),
            RoleValue::Literal(expected) => values
                .iter()
                .any(|value| matches!(value, RoleValue::Literal(text) if text.eq_ignore_ascii_case(expected)))
                .then_some(state),
        }
    }

    /// A literal role value satisfies a template leaf whose indicator and
    /// type are wildcards and whose word set accepts the literal.
    fn match_literal(&self, text: &str, template: NodeIndex, mut state: State) -> Option<State> {
        let pattern = &self.templates[template];
        if pattern.is_reference()
            || !pattern.is_leaf()
            || !pattern.indicator.is_wildcard()
            || !pattern.kind.is_wildcard()
            || !pattern.word.accepts(Some(text))
        {
            return None;
        }
        for param in &pattern.params {
            if !state.bindings.unify(param, text) {
                return None;
            }
        }
        Some(state)
    }
}

fn attributes_accept(pattern: &Node, node: &Node) -> bool {
    Attribute::ALL
        .into_iter()
        .all(|attribute| pattern.attribute(attribute).accepts(node.concrete_value(attribute)))
}
