//! What the `lfmatch` binary does with its arguments.

use std::io::{self, Write};

use lfmatch_foundation::{Error, Result};
use tracing::warn;

use crate::config::RuntimeConfig;
use crate::editor::RustylineEditor;
use crate::repl::Repl;
use crate::report::{render_error, render_outcome, render_signatures};
use crate::session::Session;

/// Loads the library, prints the requested reports, then enters the
/// interactive loop unless running in batch mode.
///
/// Returns false if any utterance file could not be read or decoded.
///
/// # Errors
///
/// Returns template loading errors and terminal failures.
pub fn run(config: &RuntimeConfig) -> Result<bool> {
    let session = Session::load(&config.templates, config.match_config())?;

    let clean = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        print_reports(&session, config, &mut out)?
    };

    if !config.batch {
        let mut editor = RustylineEditor::new()?;
        if let Some(path) = &config.history {
            editor = editor.with_history_file(path);
        }
        let mut repl = Repl::with_editor(editor, session).with_options(config.report_options());
        if !config.utterances.is_empty() {
            repl = repl.without_banner();
        }
        repl.run()?;
    }
    Ok(clean)
}

/// Prints `--dump`, `--signatures`, and one report per utterance file.
///
/// Returns false if any utterance file could not be read or decoded; those
/// errors are logged and printed to stderr, and the remaining files are
/// still matched.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_reports(session: &Session, config: &RuntimeConfig, out: &mut impl Write) -> Result<bool> {
    let library = session.library();
    let write_err = |e: io::Error| Error::io("<stdout>", &e);

    if config.dump {
        write!(out, "{}", library.dump()).map_err(write_err)?;
    }
    if config.signatures {
        write!(out, "{}", render_signatures(library)).map_err(write_err)?;
    }

    let mut clean = true;
    for path in &config.utterances {
        match session.match_file(path) {
            Ok(outcome) => {
                let text = render_outcome(library, &outcome, config.report_options());
                writeln!(out, "{text}").map_err(write_err)?;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping utterance");
                eprintln!("{}", render_error(&e));
                clean = false;
            }
        }
    }
    Ok(clean)
}
