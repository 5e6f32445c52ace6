//! Integration tests for logical-form trees
//!
//! Builder wiring, reachability, and pretty-printing.

use lfmatch_foundation::pretty::render_tree;
use lfmatch_foundation::{LogicalForm, Node, NodeId, RoleValue};

fn put_request() -> LogicalForm {
    let mut builder = LogicalForm::builder();
    let block = builder.add(Node::new("V3").with_indicator("THE").with_type("BLOCK"));
    let corner = builder.add(Node::new("V4").with_word("TOP"));
    let put = builder.add(
        Node::new("V2")
            .with_indicator("F")
            .with_type("PUT")
            .with_role("AFFECTED", RoleValue::Node(block))
            .with_role("TO-LOC", RoleValue::Node(corner))
            .with_role("TENSE", RoleValue::Literal("PRES".into())),
    );
    let root = builder.add(
        Node::new("V1")
            .with_indicator("SPEECHACT")
            .with_type("SA_REQUEST")
            .with_role("CONTENT", RoleValue::Node(put)),
    );
    builder.finish(root)
}

#[test]
fn reachable_visits_every_node_once() {
    let lf = put_request();
    let ids: Vec<_> = lf
        .arena()
        .reachable(lf.root())
        .into_iter()
        .map(|index| lf.node(index).id.to_string())
        .collect();
    assert_eq!(ids, vec!["V1", "V2", "V3", "V4"]);
}

#[test]
fn builder_can_attach_roles_later() {
    let mut builder = LogicalForm::builder();
    let root = builder.add(Node::new("V1").with_type("SA_REQUEST"));
    let child = builder.add(Node::new("V2").with_word("RED"));
    let node = builder.node_mut(root).unwrap();
    *node = node.clone().with_role("CONTENT", RoleValue::Node(child));
    let lf = builder.finish(root);
    assert_eq!(lf.arena().children(lf.root()).collect::<Vec<_>>(), vec![child]);
}

#[test]
fn pretty_printer_shows_group_and_literals() {
    let lf = put_request();
    let text = render_tree(lf.arena(), lf.root());
    assert!(text.starts_with("V1 (SPEECHACT SA_REQUEST *)\n  [group 0]\n    CONTENT:\n"));
    assert!(text.contains("TENSE:\n"));
    assert!(text.contains("\"PRES\""));
}

#[test]
fn generated_ids_are_hidden_in_dumps() {
    let mut builder = LogicalForm::builder();
    let root = builder.add(Node::new(NodeId::generate()).with_word("GO"));
    let lf = builder.finish(root);
    assert_eq!(render_tree(lf.arena(), lf.root()), "(* * GO)\n");
}
