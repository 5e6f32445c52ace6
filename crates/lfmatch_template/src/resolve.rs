//! Forward-reference resolution.
//!
//! A `<component from_id="X"/>` parses into a reference node. Once every
//! source is in, each reference is replaced by the standalone component it
//! names: the parent's role value (or the command's root) is rewritten to
//! the standalone's index, so the shared node is reachable from every place
//! that named it. A standalone may itself be an alias (`<component id="A"
//! from_id="B"/>`); chains are followed to the first real component.
//!
//! Nothing is rewritten unless every reference resolves, so a failed
//! resolution leaves the set untouched and resolving twice is a no-op.

use std::collections::{HashMap, HashSet};

use lfmatch_foundation::{Error, ErrorKind, NodeIndex, Result, RoleValue};
use tracing::debug;

use crate::template_set::TemplateSet;

/// Rewrites every forward reference of a [`TemplateSet`] to its target.
pub struct ReferenceResolver<'a> {
    set: &'a mut TemplateSet,
    targets: HashMap<NodeIndex, NodeIndex>,
}

impl<'a> ReferenceResolver<'a> {
    /// Resolves every reference reachable from a command or standalone.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnresolvedReference`] for an id naming no
    /// standalone component and [`ErrorKind::ReferenceCycle`] for aliases that
    /// only name each other. Errors carry the position of the reference and
    /// the enclosing command or component.
    pub fn resolve(set: &'a mut TemplateSet) -> Result<()> {
        let mut resolver = Self {
            set,
            targets: HashMap::new(),
        };

        let standalone = resolver.set.standalone.clone();
        for (id, root) in &standalone {
            resolver
                .resolve_tree(*root)
                .map_err(|e| e.in_frame(format!("component {id}")))?;
        }
        for command in 0..resolver.set.commands.len() {
            let roots = resolver.set.commands[command].alternatives.clone();
            for root in roots {
                resolver.resolve_tree(root).map_err(|e| {
                    e.in_frame(format!("command '{}'", resolver.set.commands[command].name))
                })?;
            }
        }

        resolver.rewrite();
        Ok(())
    }

    /// Records a target for every reference node under `root`.
    fn resolve_tree(&mut self, root: NodeIndex) -> Result<()> {
        for index in self.set.arena.reachable(root) {
            if self.set.arena[index].is_reference() && !self.targets.contains_key(&index) {
                let target = self.follow(index)?;
                self.targets.insert(index, target);
            }
        }
        Ok(())
    }

    /// Follows a chain of references to the first non-reference node.
    fn follow(&self, start: NodeIndex) -> Result<NodeIndex> {
        let mut seen = HashSet::new();
        let mut current = start;
        while let Some(target) = &self.set.arena[current].reference {
            if !seen.insert(current) {
                return Err(self.locate(start, Error::new(ErrorKind::ReferenceCycle(target.clone()))));
            }
            current = self
                .set
                .standalone(target)
                .ok_or_else(|| self.locate(start, Error::unresolved_reference(target.clone())))?;
        }
        Ok(current)
    }

    /// Attaches the source position of the reference at `index`.
    fn locate(&self, index: NodeIndex, err: Error) -> Error {
        let Some(site) = self.set.reference_sites.get(&index) else {
            return err;
        };
        let mut context = site.position.context();
        if let Some(origin) = &site.origin {
            context = context.with_source(origin.clone());
        }
        err.with_context(context)
    }

    fn rewrite(self) {
        if self.targets.is_empty() {
            return;
        }
        let targets = self.targets;
        let set = self.set;
        let retarget = |index: &mut NodeIndex| {
            if let Some(target) = targets.get(index) {
                *index = *target;
            }
        };

        let indices: Vec<NodeIndex> = set.arena.iter().map(|(index, _)| index).collect();
        for index in indices {
            for group in &mut set.arena[index].role_groups {
                for role in group.roles_mut() {
                    for value in &mut role.values {
                        if let RoleValue::Node(child) = value {
                            retarget(child);
                        }
                    }
                }
            }
        }
        for command in &mut set.commands {
            command.alternatives.iter_mut().for_each(retarget);
        }
        for (id, index) in &mut set.standalone {
            retarget(index);
            set.standalone_index.insert(id.clone(), *index);
        }

        debug!(references = targets.len(), "resolved forward references");
    }
}
