//! Integration tests for logical-form decoding
//!
//! RDF/XML documents as the TRIPS parser writes them.

use std::fs;

use lfmatch_foundation::{Attribute, ErrorKind, RoleValue};
use lfmatch_template::{decode_logical_form, read_logical_form};

const MOVE: &str = r##"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:role="http://www.cs.rochester.edu/research/trips/role#"
         xmlns:LF="http://www.cs.rochester.edu/research/trips/LF#">
  <rdf:Description rdf:ID="V10">
    <role:CONTENT rdf:resource="#V11"/>
    <LF:indicator>SPEECHACT</LF:indicator>
    <LF:type>SA_REQUEST</LF:type>
  </rdf:Description>
  <rdf:Description rdf:ID="V11">
    <LF:indicator>F</LF:indicator>
    <LF:type>MOVE</LF:type>
    <LF:word>move</LF:word>
    <role:TO-LOC rdf:resource="#V12"/>
  </rdf:Description>
  <rdf:Description rdf:ID="V12">
    <LF:indicator>BARE</LF:indicator>
    <LF:word>LEFT</LF:word>
  </rdf:Description>
</rdf:RDF>"##;

#[test]
fn roles_may_point_forward() {
    let lf = decode_logical_form(MOVE).unwrap();
    let root = lf.root_node();
    let RoleValue::Node(content) = root.role_groups[0].get("CONTENT").unwrap().values[0] else {
        panic!("content should be a node");
    };
    let mv = lf.node(content);
    assert_eq!(mv.concrete_value(Attribute::Word), Some("move"));
    let RoleValue::Node(target) = mv.role_groups[0].get("TO-LOC").unwrap().values[0] else {
        panic!("to-loc should be a node");
    };
    assert_eq!(lf.node(target).captured_value(), Some("LEFT"));
}

#[test]
fn unknown_resource_rejected() {
    let err = decode_logical_form(
        r##"<rdf:RDF><rdf:Description rdf:ID="V1"><role:CONTENT rdf:resource="#V9"/></rdf:Description></rdf:RDF>"##,
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LogicalForm(ref m) if m.contains("V9")));
}

#[test]
fn description_needs_id() {
    let err = decode_logical_form(r"<rdf:RDF><rdf:Description/></rdf:RDF>").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LogicalForm(_)));
    assert_eq!(err.context.unwrap().line, Some(1));
}

#[test]
fn empty_document_rejected() {
    let err = decode_logical_form("<rdf:RDF></rdf:RDF>").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LogicalForm(_)));
}

#[test]
fn read_attaches_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.xml");
    fs::write(&path, "<rdf:RDF><rdf:Description/></rdf:RDF>").unwrap();
    let err = read_logical_form(&path).unwrap_err();
    let source = err.context.unwrap().source.unwrap();
    assert!(source.ends_with("bad.xml"));

    let path = dir.path().join("good.xml");
    fs::write(&path, MOVE).unwrap();
    assert_eq!(read_logical_form(&path).unwrap().arena().len(), 3);
}
