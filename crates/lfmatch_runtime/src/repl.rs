//! The interactive loop.
//!
//! Each line is either a `:` command or the path of a logical-form file to
//! match against the loaded library.

use crate::config::ReportOptions;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::report::{render_error, render_outcome, render_signatures};
use crate::session::Session;
use lfmatch_foundation::{Error, ErrorKind, Result};

/// Commands understood by the loop, for completion and `:help`.
pub const COMMANDS: [(&str, &str); 5] = [
    (":dump", "print the loaded library as template markup"),
    (":signatures", "print the parameters each command binds"),
    (":reload", "read the template source again"),
    (":help", "show this help"),
    (":quit", "leave"),
];

/// The interactive loop.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    options: ReportOptions,
    show_banner: bool,
    prompt: String,
}

impl<E: LineEditor> Repl<E> {
    /// Creates a loop with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_keywords(COMMANDS.iter().map(|(name, _)| (*name).to_string()).collect());
        Self {
            editor,
            session,
            options: ReportOptions::default(),
            show_banner: true,
            prompt: "lf> ".to_string(),
        }
    }

    /// Sets how results are printed.
    #[must_use]
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `:quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            println!(
                "lfmatch {}: {} commands from {} (:help for help)",
                env!("CARGO_PKG_VERSION"),
                self.session.library().len(),
                self.session.source().display()
            );
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval_line(&line) {
                Ok(Some(output)) => {
                    if !output.is_empty() {
                        println!("{}", output.trim_end());
                    }
                }
                Ok(None) => break,
                Err(e) => eprintln!("\x1b[31m{}\x1b[0m", render_error(&e)),
            }
        }
        Ok(())
    }

    /// Evaluates one line. Returns the text to print, or `None` to quit.
    ///
    /// # Errors
    ///
    /// Returns reload and decoding errors, and unknown commands.
    pub fn eval_line(&mut self, line: &str) -> Result<Option<String>> {
        let line = line.trim();
        let output = match line {
            ":quit" | ":q" => return Ok(None),
            ":help" => help_text(),
            ":dump" => self.session.library().dump(),
            ":signatures" => render_signatures(self.session.library()),
            ":reload" => {
                self.session.reload()?;
                format!("{} commands loaded", self.session.library().len())
            }
            command if command.starts_with(':') => {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "unknown command {command} (:help lists commands)"
                ))));
            }
            path => {
                let outcome = self.session.match_file(path)?;
                render_outcome(self.session.library(), &outcome, self.options)
            }
        };
        Ok(Some(output))
    }
}

fn help_text() -> String {
    let mut text = String::from("Enter the path of a logical-form file to match it, or:\n");
    for (name, description) in COMMANDS {
        text.push_str(&format!("  {name:<12} {description}\n"));
    }
    text
}
