//! End-to-end matching scenarios
//!
//! Wildcard capture, rejection on type, OR/AND alternatives, and command
//! alternative selection.

use lfmatch_engine::{Bindings, TemplateLibrary};
use lfmatch_foundation::{LogicalForm, Node, RoleValue};

use crate::request;

const PLACE: &str = r#"
<commands>
  <command name="place">
    <component indicator="SPEECHACT" type="SA_REQUEST">
      <role name="CONTENT"><component map_param="row,col"/></role>
    </component>
  </command>
</commands>"#;

#[test]
fn wildcard_child_binds_every_param() {
    let library = TemplateLibrary::load(PLACE).unwrap();
    let found = library.find_match(&request("SA_REQUEST", "TOP")).unwrap();
    assert_eq!(found.command, "place");
    let expected: Bindings = [("row", "TOP"), ("col", "TOP")].into_iter().collect();
    assert_eq!(found.bindings, expected);
}

#[test]
fn other_type_does_not_match() {
    let library = TemplateLibrary::load(PLACE).unwrap();
    assert!(library.find_match(&request("SA_INFORM", "TOP")).is_none());
}

#[test]
fn second_command_alternative_selected() {
    let library = TemplateLibrary::load(
        r#"<commands>
  <command name="go">
    <component type="SA_REQUEST">
      <role name="AGENT"><component map_param="who"/></role>
      <role name="CONTENT"><component map_param="where"/></role>
    </component>
    <component type="SA_REQUEST">
      <role name="CONTENT"><component map_param="where"/></role>
    </component>
  </command>
</commands>"#,
    )
    .unwrap();
    let found = library.find_match(&request("SA_REQUEST", "HOME")).unwrap();
    assert_eq!(found.alternative, 1);
    assert_eq!(found.bindings.get("where"), Some("HOME"));
    assert_eq!(found.bindings.get("who"), None);
}

#[test]
fn or_alternative_discards_failed_bindings() {
    let library = TemplateLibrary::load(
        r#"<commands>
  <command name="color">
    <component type="SA_REQUEST">
      <rolegroup>
        <role name="CONTENT"><component map_param="first"/></role>
        <role name="MOD"/>
      </rolegroup>
      <rolegroup>
        <role name="CONTENT"><component map_param="second"/></role>
      </rolegroup>
    </component>
  </command>
</commands>"#,
    )
    .unwrap();
    let found = library.find_match(&request("SA_REQUEST", "RED")).unwrap();
    let expected: Bindings = [("second", "RED")].into_iter().collect();
    assert_eq!(found.bindings, expected);
    assert_eq!(found.groups[0].alternative, 1);
}

#[test]
fn and_requires_every_role() {
    let library = TemplateLibrary::load(
        r#"<commands>
  <command name="give">
    <component>
      <role name="CONTENT"/>
      <role name="RECIPIENT"/>
    </component>
  </command>
</commands>"#,
    )
    .unwrap();
    assert!(library.find_match(&request("SA_REQUEST", "BALL")).is_none());
}

#[test]
fn put_block_in_corner() {
    let library = TemplateLibrary::load(
        r#"<commands>
  <component id="corner" word="top,bottom" map_param="row"/>
  <command name="put">
    <component indicator="SPEECHACT" type="SA_REQUEST">
      <role name="CONTENT">
        <component indicator="F" type="PUT">
          <role name="AFFECTED"><component type="BLOCK,BALL" map_param="object"/></role>
          <role name="TO-LOC"><component from_id="corner"/></role>
        </component>
      </role>
    </component>
  </command>
</commands>"#,
    )
    .unwrap();

    let mut builder = LogicalForm::builder();
    let block = builder.add(Node::new("V3").with_indicator("THE").with_type("block"));
    let corner = builder.add(Node::new("V4").with_indicator("BARE").with_word("top"));
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
    let lf = builder.finish(root);

    let found = library.find_match(&lf).unwrap();
    assert_eq!(found.bindings.to_string(), r#"{object: "block", row: "top"}"#);
}
