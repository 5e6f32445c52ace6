//! Integration tests for the command library
//!
//! Declaration order, signatures, targeted matching, and search strategies.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use lfmatch_engine::{MatchConfig, SearchStrategy, TemplateLibrary};

use crate::request;

const LIBRARY: &str = r#"
<commands>
  <component id="where" word="left,right,top,bottom" map_param="place"/>
  <command name="greet">
    <component indicator="SPEECHACT" type="SA_GREET"/>
  </command>
  <command name="move">
    <component indicator="SPEECHACT" type="SA_REQUEST">
      <role name="CONTENT"><component from_id="where"/></role>
    </component>
  </command>
  <command name="anything">
    <component indicator="SPEECHACT">
      <role name="CONTENT"><component map_param="what"/></role>
    </component>
  </command>
</commands>"#;

fn library() -> TemplateLibrary {
    TemplateLibrary::load(LIBRARY).unwrap()
}

#[test]
fn earlier_command_wins() {
    let found = library().find_match(&request("SA_REQUEST", "LEFT")).unwrap();
    assert_eq!(found.command, "move");
    assert_eq!(found.bindings.get("place"), Some("LEFT"));
}

#[test]
fn later_command_catches_the_rest() {
    let found = library().find_match(&request("SA_REQUEST", "BANANA")).unwrap();
    assert_eq!(found.command, "anything");
    assert_eq!(found.bindings.get("what"), Some("BANANA"));
}

#[test]
fn match_command_restricts_the_search() {
    let lib = library();
    let lf = request("SA_REQUEST", "LEFT");
    let found = lib.match_command("anything", &lf).unwrap();
    assert_eq!(found.command, "anything");
    assert!(lib.match_command("greet", &lf).is_none());
    assert!(lib.match_command("nope", &lf).is_none());
}

#[test]
fn signatures_follow_references() {
    let lib = library();
    assert_eq!(lib.command_signature("greet"), Some(BTreeSet::new()));
    assert_eq!(
        lib.command_signature("move"),
        Some(BTreeSet::from(["place".to_string()]))
    );
    assert_eq!(lib.command_signature("missing"), None);
    let names: Vec<_> = lib.command_signatures().into_keys().collect();
    assert_eq!(names, vec!["anything", "greet", "move"]);
}

#[test]
fn parallel_search_agrees_with_sequential() {
    let sequential = library();
    let parallel = library().with_config(MatchConfig::parallel());
    assert_eq!(parallel.config().strategy, SearchStrategy::Parallel);
    for word in ["LEFT", "BANANA", "top"] {
        let lf = request("SA_REQUEST", word);
        assert_eq!(sequential.find_match(&lf), parallel.find_match(&lf));
    }
}

#[test]
fn library_is_shared_across_threads() {
    let lib = Arc::new(library());
    let handles: Vec<_> = ["LEFT", "RIGHT", "PEAR"]
        .into_iter()
        .map(|word| {
            let lib = Arc::clone(&lib);
            thread::spawn(move || lib.find_match(&request("SA_REQUEST", word)).map(|m| m.command))
        })
        .collect();
    let commands: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        commands,
        vec![Some("move".to_string()), Some("move".to_string()), Some("anything".to_string())]
    );
}

#[test]
fn dump_reloads_into_equivalent_library() {
    let lib = library();
    let reloaded = TemplateLibrary::load(&lib.dump()).unwrap();
    assert_eq!(reloaded.dump(), lib.dump());
    let lf = request("SA_REQUEST", "RIGHT");
    assert_eq!(reloaded.find_match(&lf), lib.find_match(&lf));
}
