//! Parsed template sources.
//!
//! A [`TemplateSet`] is the output of the grammar parser: every node of every
//! command and standalone component in one arena, the commands in declaration
//! order, and the pool of standalone components that forward references may
//! name. Sources may be added one file at a time; a directory source is just
//! every `*.xml` file in it, in file-name order.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use lfmatch_foundation::{Error, NodeArena, NodeId, NodeIndex, Result};
use tracing::{debug, info};

use crate::grammar::TemplateParser;
use crate::markup::{self, Position};
use crate::resolve::ReferenceResolver;

/// A command as written: a name and its alternative template roots.
#[derive(Clone, Debug)]
pub struct CommandTemplate {
    /// Command name, unique within the set.
    pub name: String,
    /// Alternative template roots, in declaration order.
    pub alternatives: Vec<NodeIndex>,
    /// Source the command was read from, if known.
    pub origin: Option<String>,
}

/// Where a forward reference was written, for error reporting.
#[derive(Clone, Debug)]
pub(crate) struct Site {
    pub origin: Option<String>,
    pub position: Position,
}

/// Commands and standalone components read from one or more sources.
#[derive(Clone, Debug, Default)]
pub struct TemplateSet {
    pub(crate) arena: NodeArena,
    pub(crate) commands: Vec<CommandTemplate>,
    pub(crate) command_index: HashMap<String, usize>,
    pub(crate) standalone: Vec<(NodeId, NodeIndex)>,
    pub(crate) standalone_index: HashMap<NodeId, NodeIndex>,
    pub(crate) explicit_ids: HashSet<NodeId>,
    pub(crate) reference_sites: HashMap<NodeIndex, Site>,
}

impl TemplateSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single source text. References are left unresolved.
    ///
    /// # Errors
    ///
    /// Returns the first construction error in the source.
    pub fn parse(source: &str) -> Result<Self> {
        let mut set = Self::new();
        set.add_source(source, None)?;
        Ok(set)
    }

    /// Reads a file, or every `*.xml` file of a directory, and resolves
    /// references across all of them.
    ///
    /// # Errors
    ///
    /// Returns I/O errors, construction errors, and unresolved references.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let metadata = fs::metadata(path).map_err(|e| Error::io(&shown, &e))?;

        let files = if metadata.is_dir() {
            let mut files = Vec::new();
            let entries = fs::read_dir(path).map_err(|e| Error::io(&shown, &e))?;
            for entry in entries {
                let entry = entry.map_err(|e| Error::io(&shown, &e))?;
                let file = entry.path();
                if file.is_file() && file.extension().is_some_and(|ext| ext == "xml") {
                    files.push(file);
                }
            }
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut set = Self::new();
        for file in &files {
            let name = file.display().to_string();
            let text = fs::read_to_string(file).map_err(|e| Error::io(&name, &e))?;
            set.add_source(&text, Some(&name))?;
        }
        set.resolve()?;
        info!(
            source = %path.display(),
            files = files.len(),
            commands = set.commands.len(),
            "loaded template source"
        );
        Ok(set)
    }

    /// Parses one more source into this set.
    ///
    /// On error the set is rolled back to its state before the call.
    ///
    /// # Errors
    ///
    /// Returns the first construction error in the source.
    pub fn add_source(&mut self, source: &str, origin: Option<&str>) -> Result<()> {
        let checkpoint = Checkpoint::of(self);
        let result = markup::parse_document(source)
            .and_then(|root| TemplateParser::new(self, origin).parse_root(&root));
        match result {
            Ok(()) => {
                debug!(origin = origin.unwrap_or("<inline>"), "parsed template source");
                Ok(())
            }
            Err(err) => {
                checkpoint.restore(self);
                Err(match origin {
                    Some(origin) => err.in_source(origin),
                    None => err,
                })
            }
        }
    }

    /// Resolves forward references. Running it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error for a reference naming no standalone component, or
    /// for references that only name each other.
    pub fn resolve(&mut self) -> Result<()> {
        ReferenceResolver::resolve(self)
    }

    /// Returns true if no command or standalone component can reach an
    /// unresolved reference.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.roots()
            .flat_map(|root| self.arena.reachable(root))
            .all(|index| !self.arena[index].is_reference())
    }

    /// Every command root and standalone component.
    fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.commands
            .iter()
            .flat_map(|c| c.alternatives.iter().copied())
            .chain(self.standalone.iter().map(|(_, index)| *index))
    }

    /// The arena holding every node.
    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Commands in declaration order.
    #[must_use]
    pub fn commands(&self) -> &[CommandTemplate] {
        &self.commands
    }

    /// Looks up a command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&CommandTemplate> {
        self.command_index.get(name).map(|&i| &self.commands[i])
    }

    /// Standalone components in declaration order.
    #[must_use]
    pub fn standalone_components(&self) -> &[(NodeId, NodeIndex)] {
        &self.standalone
    }

    /// Looks up a standalone component by id.
    #[must_use]
    pub fn standalone(&self, id: &NodeId) -> Option<NodeIndex> {
        self.standalone_index.get(id).copied()
    }

    /// Returns true if `index` is the definition of a standalone component.
    #[must_use]
    pub fn is_standalone(&self, index: NodeIndex) -> bool {
        self.standalone.iter().any(|(_, i)| *i == index)
    }
}

/// Sizes of every collection, for rolling back a failed `add_source`.
struct Checkpoint {
    nodes: usize,
    commands: usize,
    standalone: usize,
}

impl Checkpoint {
    fn of(set: &TemplateSet) -> Self {
        Self {
            nodes: set.arena.len(),
            commands: set.commands.len(),
            standalone: set.standalone.len(),
        }
    }

    fn restore(&self, set: &mut TemplateSet) {
        for command in set.commands.drain(self.commands..) {
            set.command_index.remove(&command.name);
        }
        for (id, _) in set.standalone.drain(self.standalone..) {
            set.standalone_index.remove(&id);
        }
        let dropped: Vec<NodeIndex> = set
            .arena
            .iter()
            .skip(self.nodes)
            .map(|(index, _)| index)
            .collect();
        for index in dropped {
            let node = &set.arena[index];
            if !node.id.is_generated() {
                set.explicit_ids.remove(&node.id);
            }
            set.reference_sites.remove(&index);
        }
        set.arena.truncate(self.nodes);
    }
}
