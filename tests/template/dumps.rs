//! Integration tests for template dumps
//!
//! A dump must re-parse into a library with the same structure.

use lfmatch_template::{TemplateSet, render_source};
use proptest::prelude::*;

fn dump_of(source: &str) -> String {
    let mut set = TemplateSet::parse(source).unwrap();
    set.resolve().unwrap();
    render_source(&set)
}

fn attribute(name: &'static str, values: &'static [&'static str]) -> impl Strategy<Value = String> {
    proptest::option::of(proptest::sample::subsequence(values.to_vec(), 1..=values.len())).prop_map(
        move |picked| match picked {
            Some(values) => format!(" {name}=\"{}\"", values.join(",")),
            None => String::new(),
        },
    )
}

fn attributes() -> impl Strategy<Value = String> {
    (
        attribute("indicator", &["SPEECHACT", "F", "THE"]),
        attribute("type", &["SA_REQUEST", "PUT", "BLOCK"]),
        attribute("word", &["top", "bottom", "red"]),
        attribute("map_param", &["row", "col", "color"]),
    )
        .prop_map(|(indicator, kind, word, params)| format!("{indicator}{kind}{word}{params}"))
}

/// Random `<component>` markup, nested up to a few levels.
fn component() -> impl Strategy<Value = String> {
    let leaf = attributes().prop_map(|attrs| format!("<component{attrs}/>"));
    leaf.prop_recursive(3, 24, 3, |inner| {
        (
            attributes(),
            proptest::collection::vec(proptest::collection::vec(inner, 0..3), 1..3),
            any::<bool>(),
        )
            .prop_map(|(attrs, roles, grouped)| {
                let roles: String = roles
                    .iter()
                    .enumerate()
                    .map(|(i, children)| format!("<role name=\"r{i}\">{}</role>", children.concat()))
                    .collect();
                if grouped {
                    format!("<component{attrs}><rolegroup>{roles}</rolegroup><rolegroup><role name=\"alt\"/></rolegroup></component>")
                } else {
                    format!("<component{attrs}>{roles}</component>")
                }
            })
    })
}

#[test]
fn dump_of_shared_component() {
    let source = r#"<commands>
  <component id="corner" word="top,bottom" map_param="row"/>
  <command name="place">
    <component type="sa_request">
      <role name="content"><component from_id="corner"/></role>
      <role name="mod"><component from_id="corner"/></role>
    </component>
  </command>
</commands>"#;
    assert_eq!(
        dump_of(source),
        r#"<commands>
  <component id="corner" word="TOP,BOTTOM" map_param="row"/>
  <command name="place">
    <component type="SA_REQUEST">
      <rolegroup>
        <role name="CONTENT">
          <component from_id="corner"/>
        </role>
        <role name="MOD">
          <component from_id="corner"/>
        </role>
      </rolegroup>
    </component>
  </command>
</commands>
"#
    );
}

#[test]
fn wildcard_attributes_are_omitted() {
    let text = dump_of(r#"<commands><command name="any"><component word="*" type=""/></command></commands>"#);
    assert!(text.contains("    <component/>\n"));
}

proptest! {
    #[test]
    fn dump_round_trips(components in proptest::collection::vec(component(), 1..4)) {
        let commands: String = components
            .iter()
            .enumerate()
            .map(|(i, body)| format!("<command name=\"c{i}\">{body}</command>"))
            .collect();
        let source = format!("<commands>{commands}</commands>");

        let first = dump_of(&source);
        let second = dump_of(&first);
        prop_assert_eq!(&first, &second);

        let original = TemplateSet::parse(&source).unwrap();
        let reparsed = TemplateSet::parse(&first).unwrap();
        prop_assert_eq!(original.arena().len(), reparsed.arena().len());
        prop_assert_eq!(original.commands().len(), reparsed.commands().len());
    }
}
