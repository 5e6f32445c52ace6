//! Cross-layer integration tests for lfmatch
//!
//! Template directories and RDF/XML utterances on disk, through the session
//! and the batch reports of the command-line front end.

mod session;

use std::fs;
use std::path::{Path, PathBuf};

/// Writes a two-file template library and returns its directory.
pub fn write_templates(dir: &Path) -> PathBuf {
    let templates = dir.join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("components.xml"),
        r#"<commands>
  <component id="corner" word="top,bottom" map_param="row"/>
</commands>"#,
    )
    .unwrap();
    fs::write(
        templates.join("commands.xml"),
        r#"<commands>
  <command name="place">
    <component indicator="SPEECHACT" type="SA_REQUEST">
      <role name="CONTENT">
        <component indicator="F" type="PUT">
          <role name="AFFECTED"><component map_param="object"/></role>
          <role name="TO-LOC"><component from_id="corner"/></role>
        </component>
      </role>
    </component>
  </command>
  <command name="greet">
    <component indicator="SPEECHACT" type="SA_GREET"/>
  </command>
</commands>"#,
    )
    .unwrap();
    templates
}

/// Writes an RDF/XML utterance: "put the block in the `corner`".
pub fn write_put(dir: &Path, name: &str, corner: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(
        &path,
        format!(
            r##"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:role="http://www.cs.rochester.edu/research/trips/role#"
         xmlns:LF="http://www.cs.rochester.edu/research/trips/LF#">
  <rdf:Description rdf:ID="V1">
    <LF:indicator>SPEECHACT</LF:indicator>
    <LF:type>SA_REQUEST</LF:type>
    <role:CONTENT rdf:resource="#V2"/>
  </rdf:Description>
  <rdf:Description rdf:ID="V2">
    <LF:indicator>F</LF:indicator>
    <LF:type>PUT</LF:type>
    <LF:word>PUT</LF:word>
    <role:AFFECTED rdf:resource="#V3"/>
    <role:TO-LOC rdf:resource="#V4"/>
    <role:TENSE>PRES</role:TENSE>
  </rdf:Description>
  <rdf:Description rdf:ID="V3">
    <LF:indicator>THE</LF:indicator>
    <LF:type>BLOCK</LF:type>
  </rdf:Description>
  <rdf:Description rdf:ID="V4">
    <LF:indicator>BARE</LF:indicator>
    <LF:word>{corner}</LF:word>
  </rdf:Description>
</rdf:RDF>"##
        ),
    )
    .unwrap();
    path
}
