//! Template source printer.
//!
//! Renders a [`TemplateSet`] back into template markup that the grammar
//! accepts again: standalone components first, then commands in declaration
//! order. A node shared through a forward reference is written once, at its
//! standalone definition, and as `from_id` everywhere else. Generated ids are
//! omitted and every role list is wrapped in an explicit `<rolegroup>`, so
//! dumping the re-parsed output yields the same text.

use lfmatch_foundation::{Attribute, Node, NodeId, NodeIndex, RoleValue};
use quick_xml::escape::escape;

use crate::grammar::{COMMAND_TAG, COMMANDS_TAG, COMPONENT_TAG, ROLE_TAG, ROLEGROUP_TAG};
use crate::template_set::TemplateSet;

const INDENT: &str = "  ";

/// Renders `set` as template markup.
#[must_use]
pub fn render_source(set: &TemplateSet) -> String {
    let mut printer = SourcePrinter {
        set,
        output: String::new(),
    };
    printer.print();
    printer.output
}

struct SourcePrinter<'a> {
    set: &'a TemplateSet,
    output: String,
}

impl SourcePrinter<'_> {
    fn print(&mut self) {
        let set = self.set;
        self.line(0, &format!("<{COMMANDS_TAG}>"));

        for (id, index) in set.standalone_components() {
            let node = &set.arena()[*index];
            if node.id == *id {
                self.component(*index, 1, Some(*index));
            } else {
                // An alias whose chain has been resolved to another standalone.
                self.line(
                    1,
                    &format!(
                        "<{COMPONENT_TAG} id=\"{}\" from_id=\"{}\"/>",
                        attr_text(&id.to_string()),
                        attr_text(&node.id.to_string())
                    ),
                );
            }
        }

        for command in set.commands() {
            self.line(
                1,
                &format!("<{COMMAND_TAG} name=\"{}\">", attr_text(&command.name)),
            );
            for root in &command.alternatives {
                self.component(*root, 2, None);
            }
            self.line(1, &format!("</{COMMAND_TAG}>"));
        }

        self.line(0, &format!("</{COMMANDS_TAG}>"));
    }

    /// Prints one component. `definition` is the standalone being defined at
    /// top level, which is the only place its body is written.
    fn component(&mut self, index: NodeIndex, level: usize, definition: Option<NodeIndex>) {
        let set = self.set;
        let node = &set.arena()[index];

        if set.is_standalone(index) && definition != Some(index) {
            self.line(
                level,
                &format!("<{COMPONENT_TAG} from_id=\"{}\"/>", attr_text(&node.id.to_string())),
            );
            return;
        }
        if let Some(target) = &node.reference {
            self.line(
                level,
                &format!(
                    "<{COMPONENT_TAG}{} from_id=\"{}\"/>",
                    id_attr(&node.id),
                    attr_text(&target.to_string())
                ),
            );
            return;
        }

        let open = format!("<{COMPONENT_TAG}{}", attributes(node));
        if node.is_leaf() {
            self.line(level, &format!("{open}/>"));
            return;
        }

        self.line(level, &format!("{open}>"));
        for group in &node.role_groups {
            self.line(level + 1, &format!("<{ROLEGROUP_TAG}>"));
            for role in group.roles() {
                let name = attr_text(&role.name);
                if role.is_wildcard() {
                    self.line(level + 2, &format!("<{ROLE_TAG} name=\"{name}\"/>"));
                    continue;
                }
                self.line(level + 2, &format!("<{ROLE_TAG} name=\"{name}\">"));
                for value in &role.values {
                    match value {
                        RoleValue::Node(child) => self.component(*child, level + 3, None),
                        // Templates never hold literals; keep them as word-only leaves.
                        RoleValue::Literal(text) => self.line(
                            level + 3,
                            &format!("<{COMPONENT_TAG} word=\"{}\"/>", attr_text(text)),
                        ),
                    }
                }
                self.line(level + 2, &format!("</{ROLE_TAG}>"));
            }
            self.line(level + 1, &format!("</{ROLEGROUP_TAG}>"));
        }
        self.line(level, &format!("</{COMPONENT_TAG}>"));
    }

    fn line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

/// ` id=".." indicator=".." type=".." word=".." map_param=".."`, skipping
/// generated ids and wildcard sets.
fn attributes(node: &Node) -> String {
    let mut out = id_attr(&node.id);
    for attribute in Attribute::ALL {
        let set = node.attribute(attribute);
        if set.is_wildcard() {
            continue;
        }
        let values: Vec<&str> = set.iter().collect();
        out.push_str(&format!(
            " {}=\"{}\"",
            attribute.name(),
            attr_text(&values.join(","))
        ));
    }
    if !node.params.is_empty() {
        let params: Vec<&str> = node.params.iter().map(String::as_str).collect();
        out.push_str(&format!(" map_param=\"{}\"", attr_text(&params.join(","))));
    }
    out
}

fn id_attr(id: &NodeId) -> String {
    if id.is_generated() {
        String::new()
    } else {
        format!(" id=\"{}\"", attr_text(&id.to_string()))
    }
}

fn attr_text(raw: &str) -> String {
    escape(raw).into_owned()
}
