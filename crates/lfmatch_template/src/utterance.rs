//! TRIPS logical-form decoder.
//!
//! The parser delivers its output as RDF/XML: one `rdf:Description` per
//! node, its values in `indicator`/`type`/`word` children, and its edges as
//! `role:NAME` children that either carry literal text or point at another
//! description through `rdf:resource="#ID"`.
//!
//! ```xml
//! <rdf:RDF xmlns:rdf="..." xmlns:role="..." xmlns:LF="...">
//!   <rdf:Description rdf:ID="V1">
//!     <LF:indicator>SPEECHACT</LF:indicator>
//!     <LF:type>SA_REQUEST</LF:type>
//!     <role:CONTENT rdf:resource="#V2"/>
//!   </rdf:Description>
//!   ...
//! </rdf:RDF>
//! ```
//!
//! The first description is the root. Nodes are created in one pass and
//! linked in a second, so references may point forward.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lfmatch_foundation::{
    Error, LogicalForm, Node, NodeId, NodeIndex, Result, RoleGroup, RoleValue,
};
use tracing::debug;

use crate::markup::{self, Element};

const DESCRIPTION: &str = "Description";
const ROLE_PREFIX: &str = "role";
const ID: &str = "ID";
const RESOURCE: &str = "resource";

/// Decodes a logical form from RDF/XML text.
///
/// # Errors
///
/// Returns a markup error for malformed XML and a logical-form error for a
/// document without descriptions, a description without `rdf:ID`, a
/// repeated id, or a role pointing at an unknown id.
pub fn decode_logical_form(source: &str) -> Result<LogicalForm> {
    let document = markup::parse_document(source)?;
    let mut descriptions = Vec::new();
    collect_descriptions(&document, &mut descriptions);
    if descriptions.is_empty() {
        return Err(document.locate(Error::logical_form("document has no rdf:Description elements")));
    }

    let mut builder = LogicalForm::builder();
    let mut by_id: HashMap<String, NodeIndex> = HashMap::new();
    let mut indices = Vec::with_capacity(descriptions.len());

    for description in &descriptions {
        let raw_id = local_attr(description, ID)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| description.locate(Error::logical_form("rdf:Description without rdf:ID")))?;
        if by_id.contains_key(raw_id) {
            return Err(description.locate(Error::logical_form(format!("duplicate rdf:ID '{raw_id}'"))));
        }

        let mut node = Node::new(NodeId::Name(raw_id.to_string()));
        for child in description.children.iter().filter(|c| c.prefix() != Some(ROLE_PREFIX)) {
            match child.local_name() {
                "indicator" => node = node.with_indicator(child.text.clone()),
                "type" => node = node.with_type(child.text.clone()),
                "word" => node = node.with_word(child.text.clone()),
                _ => {}
            }
        }

        let index = builder.add(node);
        by_id.insert(raw_id.to_string(), index);
        indices.push(index);
    }

    for (description, &index) in descriptions.iter().zip(&indices) {
        for child in description.children.iter().filter(|c| c.prefix() == Some(ROLE_PREFIX)) {
            let value = match local_attr(child, RESOURCE) {
                Some(resource) => {
                    let target = resource.trim().trim_start_matches('#');
                    let target = by_id.get(target).copied().ok_or_else(|| {
                        child.locate(Error::logical_form(format!(
                            "role {} points at unknown id '{target}'",
                            child.local_name()
                        )))
                    })?;
                    RoleValue::Node(target)
                }
                None => RoleValue::Literal(child.text.clone()),
            };
            if let Some(node) = builder.node_mut(index) {
                if node.role_groups.is_empty() {
                    node.role_groups.push(RoleGroup::new());
                }
                node.role_groups[0].push_value(child.local_name(), value);
            }
        }
    }

    let lf = builder.finish(indices[0]);
    debug!(nodes = lf.arena().len(), root = %lf.root_node().id, "decoded logical form");
    Ok(lf)
}

/// Reads and decodes a logical-form file.
///
/// # Errors
///
/// Returns I/O errors with the path, and any decoding error located in the
/// file.
pub fn read_logical_form(path: impl AsRef<Path>) -> Result<LogicalForm> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| Error::io(&name, &e))?;
    decode_logical_form(&text).map_err(|e| e.in_source(name))
}

/// Every description element, in document order.
fn collect_descriptions<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    if element.local_name() == DESCRIPTION {
        out.push(element);
    }
    for child in &element.children {
        collect_descriptions(child, out);
    }
}

/// Looks up an attribute by local name (`rdf:ID`, `ID`, ...).
fn local_attr<'a>(element: &'a Element, local: &str) -> Option<&'a str> {
    element
        .attributes
        .iter()
        .find(|(key, _)| key.rsplit_once(':').map_or(key.as_str(), |(_, l)| l) == local)
        .map(|(_, value)| value.as_str())
}
