//! Integration tests for loading template sources
//!
//! Files, directories, rollback on error, and located construction errors.

use std::fs;

use lfmatch_foundation::{ErrorKind, NodeId};
use lfmatch_template::TemplateSet;

// =============================================================================
// Loading
// =============================================================================

#[test]
fn directory_sources_share_standalone_components() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a_components.xml"),
        r#"<commands><component id="corner" word="top,bottom" map_param="row"/></commands>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b_commands.xml"),
        r#"<commands>
  <command name="place">
    <component type="SA_REQUEST">
      <role name="content"><component from_id="corner"/></role>
    </component>
  </command>
</commands>"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

    let set = TemplateSet::load_path(dir.path()).unwrap();
    assert!(set.is_resolved());
    assert_eq!(set.commands().len(), 1);
    assert!(set.standalone(&NodeId::from("corner")).is_some());
    let origin = set.command("place").unwrap().origin.as_deref().unwrap();
    assert!(origin.ends_with("b_commands.xml"));
}

#[test]
fn missing_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TemplateSet::load_path(dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { .. }));
}

#[test]
fn unresolved_reference_fails_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commands.xml");
    fs::write(
        &path,
        r#"<commands><command name="go"><component from_id="nowhere"/></command></commands>"#,
    )
    .unwrap();
    let err = TemplateSet::load_path(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedReference(_)));
    let source = err.context.unwrap().source.unwrap();
    assert!(source.ends_with("commands.xml"));
}

#[test]
fn failed_source_is_rolled_back() {
    let mut set = TemplateSet::new();
    set.add_source(
        r#"<commands><component id="7" word="x"/><command name="a"><component/></command></commands>"#,
        Some("first.xml"),
    )
    .unwrap();
    let before = set.arena().len();

    let err = set
        .add_source(
            r#"<commands><component id="8"/><command name="b"><component><role/></component></command></commands>"#,
            Some("second.xml"),
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingAttribute { .. }));

    assert_eq!(set.arena().len(), before);
    assert!(set.command("b").is_none());
    assert!(set.standalone(&NodeId::Number(8)).is_none());

    set.add_source(
        r#"<commands><component id="8"/><command name="b"><component/></command></commands>"#,
        Some("second.xml"),
    )
    .unwrap();
    assert_eq!(set.commands().len(), 2);
}

// =============================================================================
// Construction Errors
// =============================================================================

#[test]
fn errors_carry_position_and_enclosing_command() {
    let mut set = TemplateSet::new();
    let err = set
        .add_source(
            r#"<commands>
  <command name="move">
    <component>
      <role/>
    </component>
  </command>
</commands>"#,
            Some("moves.xml"),
        )
        .unwrap_err();
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.source.as_deref(), Some("moves.xml"));
    assert_eq!(ctx.line, Some(4));
    assert!(ctx.stack.contains(&"command 'move'".to_string()));
    assert!(format!("{err}").contains("moves.xml:4:"));
}

#[test]
fn duplicate_command_across_sources() {
    let mut set = TemplateSet::new();
    set.add_source(r#"<commands><command name="go"><component/></command></commands>"#, None)
        .unwrap();
    let err = set
        .add_source(r#"<commands><command name="go"><component/></command></commands>"#, None)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateCommand(ref name) if name == "go"));
}

#[test]
fn malformed_markup_rejected() {
    let err = TemplateSet::parse("<commands><command name=\"a\">").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Markup(_)));
}

#[test]
fn resolution_is_idempotent() {
    let mut set = TemplateSet::parse(
        r#"<commands>
  <component id="1" word="red"/>
  <command name="paint"><component><role name="mod"><component from_id="1"/></role></component></command>
</commands>"#,
    )
    .unwrap();
    set.resolve().unwrap();
    let nodes = set.arena().len();
    set.resolve().unwrap();
    assert!(set.is_resolved());
    assert_eq!(set.arena().len(), nodes);
}
