//! Printing match results, signatures, and errors.

use lfmatch_engine::{Bindings, TemplateLibrary};
use lfmatch_foundation::Error;
use lfmatch_foundation::pretty::render_tree;
use serde::Serialize;

use crate::config::ReportOptions;
use crate::session::Outcome;

/// Printed for an utterance no command accepts.
pub const NO_MATCH: &str = "NO MATCH";

/// One utterance's result as printed by `--json`.
#[derive(Serialize)]
struct MatchReport<'a> {
    file: &'a str,
    matched: bool,
    command: Option<&'a str>,
    alternative: Option<usize>,
    bindings: Option<&'a Bindings>,
}

/// Renders one outcome: `NAME {params}` or [`NO_MATCH`], or a JSON object.
#[must_use]
pub fn render_outcome(library: &TemplateLibrary, outcome: &Outcome, options: ReportOptions) -> String {
    if options.json {
        return render_json(outcome);
    }

    let mut out = String::new();
    if options.verbose {
        out.push_str(&format!("{}:\n", outcome.origin));
        out.push_str(&render_tree(outcome.form.arena(), outcome.form.root()));
    }
    match &outcome.found {
        Some(found) => {
            out.push_str(&format!("{} {}", found.command, found.bindings));
            if options.verbose {
                out.push_str(&format!("\n  alternative {}", found.alternative));
                let arena = library.templates().arena();
                for selection in &found.groups {
                    let node = &arena[selection.node];
                    let label = if node.id.is_generated() {
                        node.to_string()
                    } else {
                        format!("{} {node}", node.id)
                    };
                    out.push_str(&format!(
                        "\n  {}{label} -> group {}",
                        "  ".repeat(selection.depth),
                        selection.alternative
                    ));
                }
            }
        }
        None => out.push_str(NO_MATCH),
    }
    out
}

fn render_json(outcome: &Outcome) -> String {
    let found = outcome.found.as_ref();
    let report = MatchReport {
        file: &outcome.origin,
        matched: found.is_some(),
        command: found.map(|f| f.command.as_str()),
        alternative: found.map(|f| f.alternative),
        bindings: found.map(|f| &f.bindings),
    };
    serde_json::to_string(&report).unwrap_or_else(|e| format!("{{\"error\":{:?}}}", e.to_string()))
}

/// One line per command: `NAME: a, b` (or `NAME: -` when it binds nothing).
#[must_use]
pub fn render_signatures(library: &TemplateLibrary) -> String {
    let mut out = String::new();
    for command in library.commands() {
        let params = library.command_signature(&command.name).unwrap_or_default();
        let list = if params.is_empty() {
            "-".to_string()
        } else {
            params.into_iter().collect::<Vec<_>>().join(", ")
        };
        out.push_str(&format!("{}: {list}\n", command.name));
    }
    out
}

/// Renders an error for the terminal.
#[must_use]
pub fn render_error(err: &Error) -> String {
    format!("error: {err}")
}
