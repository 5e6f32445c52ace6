//! Session integration tests
//!
//! Loading a template directory, matching files, and reloading.

use std::fs;

use lfmatch_engine::MatchConfig;
use lfmatch_foundation::ErrorKind;
use lfmatch_runtime::report::{NO_MATCH, render_outcome};
use lfmatch_runtime::{ReportOptions, Session};

use crate::{write_put, write_templates};

#[test]
fn matches_utterance_files() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::load(write_templates(dir.path()), MatchConfig::default()).unwrap();
    assert_eq!(session.library().len(), 2);

    let outcome = session.match_file(write_put(dir.path(), "top.xml", "TOP")).unwrap();
    let found = outcome.found.as_ref().unwrap();
    assert_eq!(found.command, "place");
    assert_eq!(found.bindings.get("object"), Some("BLOCK"));
    assert_eq!(found.bindings.get("row"), Some("TOP"));

    let text = render_outcome(session.library(), &outcome, ReportOptions::default());
    assert_eq!(text, r#"place {object: "BLOCK", row: "TOP"}"#);
}

#[test]
fn unmatched_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::load(write_templates(dir.path()), MatchConfig::parallel()).unwrap();
    let outcome = session.match_file(write_put(dir.path(), "middle.xml", "MIDDLE")).unwrap();
    assert!(outcome.found.is_none());
    assert_eq!(
        render_outcome(session.library(), &outcome, ReportOptions::default()),
        NO_MATCH
    );
}

#[test]
fn verbose_report_shows_tree_and_groups() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::load(write_templates(dir.path()), MatchConfig::default()).unwrap();
    let outcome = session.match_file(write_put(dir.path(), "bottom.xml", "bottom")).unwrap();
    let options = ReportOptions {
        verbose: true,
        json: false,
    };
    let text = render_outcome(session.library(), &outcome, options);
    assert!(text.contains("V1 (SPEECHACT SA_REQUEST *)"));
    assert!(text.contains("alternative 0"));
    assert!(text.contains("-> group 0"));
    assert!(text.contains(r#"row: "bottom""#));
}

#[test]
fn reload_picks_up_edits_and_survives_errors() {
    let dir = tempfile::tempdir().unwrap();
    let templates = write_templates(dir.path());
    let mut session = Session::load(&templates, MatchConfig::default()).unwrap();

    fs::write(
        templates.join("extra.xml"),
        r#"<commands><command name="wave"><component type="SA_WAVE"/></command></commands>"#,
    )
    .unwrap();
    session.reload().unwrap();
    assert_eq!(session.library().len(), 3);

    fs::write(templates.join("extra.xml"), r#"<commands><command name="wave"/></commands>"#).unwrap();
    let err = session.reload().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyCommand(_)));
    assert_eq!(session.library().len(), 3);
}
