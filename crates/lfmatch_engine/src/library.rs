//! The command library.
//!
//! A [`TemplateLibrary`] is a resolved [`TemplateSet`] plus a
//! [`MatchConfig`]. It is immutable once built, so one library can serve any
//! number of threads matching concurrently.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use lfmatch_foundation::{LogicalForm, NodeIndex, Result};
use lfmatch_template::{CommandTemplate, TemplateSet, render_source};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{MatchConfig, SearchStrategy};
use crate::matcher::{Bindings, GroupSelection, Matcher, TemplateMatch};

/// The command an utterance matched, with its bound parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandMatch {
    /// Name of the matched command.
    pub command: String,
    /// Index of the alternative that matched.
    pub alternative: usize,
    /// Bound parameters.
    pub bindings: Bindings,
    /// Winning role-group alternatives along the match path.
    pub groups: Vec<GroupSelection>,
}

impl CommandMatch {
    fn new(command: &CommandTemplate, alternative: usize, found: TemplateMatch) -> Self {
        Self {
            command: command.name.clone(),
            alternative,
            bindings: found.bindings,
            groups: found.groups,
        }
    }
}

/// A resolved, ordered set of command templates.
#[derive(Clone, Debug)]
pub struct TemplateLibrary {
    templates: TemplateSet,
    config: MatchConfig,
}

impl TemplateLibrary {
    /// Builds a library from template markup.
    ///
    /// # Errors
    ///
    /// Returns the first construction or resolution error.
    pub fn load(source: &str) -> Result<Self> {
        Self::from_templates(TemplateSet::parse(source)?)
    }

    /// Builds a library from a template file or a directory of `*.xml` files.
    ///
    /// # Errors
    ///
    /// Returns I/O, construction, and resolution errors.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let templates = TemplateSet::load_path(path)?;
        Ok(Self {
            templates,
            config: MatchConfig::default(),
        })
    }

    /// Builds a library from parsed templates, resolving them first.
    ///
    /// # Errors
    ///
    /// Returns a resolution error for unknown or cyclic references.
    pub fn from_templates(mut templates: TemplateSet) -> Result<Self> {
        templates.resolve()?;
        info!(commands = templates.commands().len(), "template library ready");
        Ok(Self {
            templates,
            config: MatchConfig::default(),
        })
    }

    /// Replaces the matching configuration.
    #[must_use]
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The matching configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The underlying templates.
    #[must_use]
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Commands in declaration order.
    #[must_use]
    pub fn commands(&self) -> &[CommandTemplate] {
        self.templates.commands()
    }

    /// Looks up a command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&CommandTemplate> {
        self.templates.command(name)
    }

    /// Returns the number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.commands().len()
    }

    /// Returns true if the library has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.commands().is_empty()
    }

    /// Every parameter name a command can bind, across all alternatives.
    #[must_use]
    pub fn command_signature(&self, name: &str) -> Option<BTreeSet<String>> {
        self.command(name).map(|command| self.signature(command))
    }

    /// Signatures of every command, keyed by name.
    #[must_use]
    pub fn command_signatures(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.commands()
            .iter()
            .map(|command| (command.name.clone(), self.signature(command)))
            .collect()
    }

    fn signature(&self, command: &CommandTemplate) -> BTreeSet<String> {
        let arena = self.templates.arena();
        command
            .alternatives
            .iter()
            .flat_map(|root| arena.reachable(*root))
            .flat_map(|index| arena[index].params.iter().cloned())
            .collect()
    }

    /// Finds the first command, in declaration order, with an alternative
    /// the utterance matches.
    #[must_use]
    pub fn find_match(&self, utterance: &LogicalForm) -> Option<CommandMatch> {
        let found = match self.config.strategy {
            SearchStrategy::Sequential => self
                .candidates()
                .find_map(|(command, alternative, root)| self.try_alternative(utterance, command, alternative, root)),
            SearchStrategy::Parallel => {
                let candidates: Vec<_> = self.candidates().collect();
                candidates
                    .into_par_iter()
                    .find_map_first(|(command, alternative, root)| {
                        self.try_alternative(utterance, command, alternative, root)
                    })
            }
        };

        match &found {
            Some(m) => debug!(command = %m.command, alternative = m.alternative, bindings = %m.bindings, "match found"),
            None => debug!(root = %utterance.root_node().id, "no match"),
        }
        found
    }

    /// Matches the utterance against one named command only.
    #[must_use]
    pub fn match_command(&self, name: &str, utterance: &LogicalForm) -> Option<CommandMatch> {
        let command = self.command(name)?;
        command
            .alternatives
            .iter()
            .enumerate()
            .find_map(|(alternative, root)| self.try_alternative(utterance, command, alternative, *root))
    }

    /// Every (command, alternative, root) triple in library order.
    fn candidates(&self) -> impl Iterator<Item = (&CommandTemplate, usize, NodeIndex)> {
        self.commands().iter().flat_map(|command| {
            command
                .alternatives
                .iter()
                .enumerate()
                .map(move |(alternative, root)| (command, alternative, *root))
        })
    }

    fn try_alternative(
        &self,
        utterance: &LogicalForm,
        command: &CommandTemplate,
        alternative: usize,
        root: NodeIndex,
    ) -> Option<CommandMatch> {
        let matcher = Matcher::with_config(self.templates.arena(), &self.config);
        matcher
            .match_template(utterance, root)
            .map(|found| CommandMatch::new(command, alternative, found))
    }

    /// Re-parseable template markup for the whole library.
    #[must_use]
    pub fn dump(&self) -> String {
        render_source(&self.templates)
    }
}
