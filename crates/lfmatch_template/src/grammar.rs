//! Template grammar.
//!
//! Turns a `<commands>` element tree into nodes:
//!
//! ```text
//! <commands>
//!   <component id="..." .../>                 standalone, referable by from_id
//!   <command name="...">
//!     <component indicator=".." type=".." word=".." map_param="a,b" id="..">
//!       <rolegroup>                           one OR-alternative ...
//!         <role name="..."> <component/>* </role>
//!       </rolegroup>
//!       ... or bare <role> children for a single implicit alternative
//!     </component>
//!     <component from_id="..."/>              forward reference
//!   </command>
//! </commands>
//! ```
//!
//! Every violation is reported at construction time with the position of the
//! offending element and the enclosing command/component.

use lfmatch_foundation::{
    CandidateSet, Error, ErrorKind, Node, NodeId, NodeIndex, Result, Role, RoleGroup,
    RoleValue,
};
use tracing::{debug, warn};

use crate::markup::Element;
use crate::template_set::{CommandTemplate, Site, TemplateSet};

/// Root tag of a template source.
pub const COMMANDS_TAG: &str = "commands";
/// A named command.
pub const COMMAND_TAG: &str = "command";
/// A template node.
pub const COMPONENT_TAG: &str = "component";
/// One OR-alternative of roles.
pub const ROLEGROUP_TAG: &str = "rolegroup";
/// A named role.
pub const ROLE_TAG: &str = "role";

const ID_ATTR: &str = "id";
const FROM_ID_ATTR: &str = "from_id";
const NAME_ATTR: &str = "name";
const MAP_PARAM_ATTR: &str = "map_param";

/// Parses template elements into a [`TemplateSet`].
pub struct TemplateParser<'a> {
    set: &'a mut TemplateSet,
    origin: Option<String>,
}

impl<'a> TemplateParser<'a> {
    /// Creates a parser adding into `set`.
    pub fn new(set: &'a mut TemplateSet, origin: Option<&str>) -> Self {
        Self {
            set,
            origin: origin.map(str::to_string),
        }
    }

    /// Parses a `<commands>` root element.
    ///
    /// # Errors
    ///
    /// Returns the first construction error found.
    pub fn parse_root(&mut self, root: &Element) -> Result<()> {
        if root.name != COMMANDS_TAG {
            return Err(root.locate(Error::new(ErrorKind::MissingRoot(COMMANDS_TAG.into()))));
        }
        check_no_text(root)?;

        for child in &root.children {
            match child.name.as_str() {
                COMPONENT_TAG => self.parse_standalone(child)?,
                COMMAND_TAG => self.parse_command(child)?,
                other => return Err(child.locate(Error::unexpected_tag(COMMANDS_TAG, other))),
            }
        }
        Ok(())
    }

    fn parse_standalone(&mut self, element: &Element) -> Result<()> {
        if element.attr(ID_ATTR).is_none() {
            return Err(element
                .locate(Error::missing_attribute(COMPONENT_TAG, ID_ATTR))
                .in_frame("standalone component"));
        }
        let index = self.parse_component(element)?;
        let id = self.set.arena[index].id.clone();
        self.set.standalone.push((id.clone(), index));
        self.set.standalone_index.insert(id.clone(), index);
        debug!(component = %id, "parsed standalone component");
        Ok(())
    }

    fn parse_command(&mut self, element: &Element) -> Result<()> {
        let name = element
            .attr(NAME_ATTR)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| element.locate(Error::missing_attribute(COMMAND_TAG, NAME_ATTR)))?
            .to_string();
        let frame = format!("command '{name}'");

        if self.set.command_index.contains_key(&name) {
            return Err(element
                .locate(Error::duplicate_command(name))
                .in_frame(frame));
        }
        check_no_text(element).map_err(|e| e.in_frame(frame.clone()))?;

        let mut alternatives = Vec::new();
        for child in &element.children {
            if child.name != COMPONENT_TAG {
                return Err(child
                    .locate(Error::unexpected_tag(COMMAND_TAG, &child.name))
                    .in_frame(frame));
            }
            let root = self
                .parse_component(child)
                .map_err(|e| e.in_frame(frame.clone()))?;
            alternatives.push(root);
        }
        if alternatives.is_empty() {
            return Err(element
                .locate(Error::new(ErrorKind::EmptyCommand(name)))
                .in_frame(frame));
        }

        debug!(command = %name, alternatives = alternatives.len(), "parsed command");
        self.set
            .command_index
            .insert(name.clone(), self.set.commands.len());
        self.set.commands.push(CommandTemplate {
            name,
            alternatives,
            origin: self.origin.clone(),
        });
        Ok(())
    }

    /// Parses a `<component>` and everything under it; returns its index.
    fn parse_component(&mut self, element: &Element) -> Result<NodeIndex> {
        let id = self.declare_id(element)?;
        let frame = format!("component {id}");

        if let Some(target) = element.attr(FROM_ID_ATTR) {
            let target = NodeId::parse_explicit(target)
                .map_err(|e| element.locate(e).in_frame(frame.clone()))?;
            let ignored: Vec<&str> = element
                .attributes
                .iter()
                .map(|(k, _)| k.as_str())
                .filter(|k| *k != FROM_ID_ATTR && *k != ID_ATTR)
                .collect();
            if !ignored.is_empty() || !element.children.is_empty() {
                warn!(
                    component = %id,
                    line = element.position.line,
                    ignored = ?ignored,
                    children = element.children.len(),
                    "from_id component carries other content; ignoring it"
                );
            }
            let index = self.set.arena.push(Node::reference(id, target));
            self.set.reference_sites.insert(
                index,
                Site {
                    origin: self.origin.clone(),
                    position: element.position,
                },
            );
            return Ok(index);
        }

        let mut node = Node::new(id);
        for (key, value) in &element.attributes {
            match key.as_str() {
                ID_ATTR => {}
                "indicator" => node.indicator = CandidateSet::parse_list(value),
                "type" => node.kind = CandidateSet::parse_list(value),
                "word" => node.word = CandidateSet::parse_list(value),
                MAP_PARAM_ATTR => node = node.with_params(parse_params(value)),
                other => warn!(
                    component = %node.id,
                    line = element.position.line,
                    attribute = other,
                    "unknown component attribute ignored"
                ),
            }
        }
        check_no_text(element).map_err(|e| e.in_frame(frame.clone()))?;

        node.role_groups = self
            .parse_role_children(element)
            .map_err(|e| e.in_frame(frame))?;
        Ok(self.set.arena.push(node))
    }

    /// Parses the children of a component into role groups.
    fn parse_role_children(&mut self, element: &Element) -> Result<Vec<RoleGroup>> {
        if let Some(bad) = element
            .children
            .iter()
            .find(|c| c.name != ROLEGROUP_TAG && c.name != ROLE_TAG)
        {
            return Err(bad.locate(Error::unexpected_tag(COMPONENT_TAG, &bad.name)));
        }

        let groups = element
            .children
            .iter()
            .filter(|c| c.name == ROLEGROUP_TAG)
            .count();
        if groups > 0 && groups < element.children.len() {
            return Err(element.locate(Error::new(ErrorKind::MixedRoleChildren)));
        }

        if groups > 0 {
            element
                .children
                .iter()
                .map(|child| self.parse_rolegroup(child))
                .collect()
        } else if element.children.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![self.parse_roles(&element.children)?])
        }
    }

    fn parse_rolegroup(&mut self, element: &Element) -> Result<RoleGroup> {
        check_no_text(element)?;
        if element.children.is_empty() {
            return Err(element.locate(Error::new(ErrorKind::EmptyRoleGroup)));
        }
        if let Some(bad) = element.children.iter().find(|c| c.name != ROLE_TAG) {
            return Err(bad.locate(Error::unexpected_tag(ROLEGROUP_TAG, &bad.name)));
        }
        self.parse_roles(&element.children)
    }

    fn parse_roles(&mut self, elements: &[Element]) -> Result<RoleGroup> {
        let mut group = RoleGroup::new();
        for element in elements {
            let role = self.parse_role(element)?;
            let name = role.name.clone();
            if !group.add_role(role) {
                return Err(element.locate(Error::new(ErrorKind::DuplicateRole(name))));
            }
        }
        Ok(group)
    }

    fn parse_role(&mut self, element: &Element) -> Result<Role> {
        let name = element
            .attr(NAME_ATTR)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| element.locate(Error::missing_attribute(ROLE_TAG, NAME_ATTR)))?;
        let mut role = Role::new(name);
        let frame = format!("role {}", role.name);
        check_no_text(element).map_err(|e| e.in_frame(frame.clone()))?;

        for child in &element.children {
            if child.name != COMPONENT_TAG {
                return Err(child
                    .locate(Error::unexpected_tag(ROLE_TAG, &child.name))
                    .in_frame(frame));
            }
            let index = self
                .parse_component(child)
                .map_err(|e| e.in_frame(frame.clone()))?;
            role.values.push(RoleValue::Node(index));
        }
        Ok(role)
    }

    /// Reads the `id` attribute, or generates one.
    fn declare_id(&mut self, element: &Element) -> Result<NodeId> {
        let Some(raw) = element.attr(ID_ATTR) else {
            return Ok(NodeId::generate());
        };
        let id = NodeId::parse_explicit(raw).map_err(|e| element.locate(e))?;
        if !self.set.explicit_ids.insert(id.clone()) {
            return Err(element.locate(Error::new(ErrorKind::DuplicateId(id))));
        }
        Ok(id)
    }
}

/// Splits a `map_param` list. Names are trimmed but keep their case.
fn parse_params(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

fn check_no_text(element: &Element) -> Result<()> {
    if element.text.is_empty() {
        return Ok(());
    }
    Err(element.locate(Error::new(ErrorKind::UnexpectedText {
        parent: element.name.clone(),
        text: element.text.clone(),
    })))
}
