//! Terminal input for the interactive loop.
//!
//! [`Repl`](crate::Repl) reads through the [`LineEditor`] trait; the binary
//! plugs in [`RustylineEditor`], tests plug in a scripted editor.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use lfmatch_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Context, Editor, Helper, Hinter, Validator};
use tracing::{debug, warn};

const HISTORY_SIZE: usize = 500;

/// What one read produced.
#[derive(Debug)]
pub enum ReadResult {
    /// A line of input, without its newline.
    Line(String),
    /// Ctrl-C: the current line was discarded.
    Interrupted,
    /// Ctrl-D or end of piped input.
    Eof,
}

/// Source of input lines for the loop.
pub trait LineEditor {
    /// Prompts for and reads one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Records an entered line.
    fn add_history(&mut self, line: &str);

    /// Replaces the `:` commands offered for completion.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Hinter, Validator)]
struct InputHelper {
    paths: FilenameCompleter,
    keywords: Vec<String>,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl InputHelper {
    fn is_command(&self, line: &str) -> bool {
        let word = line.trim();
        self.keywords.iter().any(|kw| kw == word)
    }
}

impl Completer for InputHelper {
    type Candidate = Pair;

    /// `:` commands at the start of a line, file paths anywhere else.
    fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        if !typed.starts_with(':') {
            return self.paths.complete(line, pos, ctx);
        }
        let matches = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(typed))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect();
        Ok((0, matches))
    }
}

impl Highlighter for InputHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.is_command(line) {
            Cow::Owned(format!("\x1b[36m{line}\x1b[0m"))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, default: bool) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;34m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }

    fn highlight_char(&self, line: &str, _pos: usize, _kind: CmdKind) -> bool {
        line.starts_with(':')
    }
}

/// Interactive editor backed by rustyline, with optional persistent history.
pub struct RustylineEditor {
    editor: Editor<InputHelper, DefaultHistory>,
    history_file: Option<PathBuf>,
}

fn terminal_error(err: impl ToString) -> Error {
    Error::new(ErrorKind::Internal(format!("terminal: {}", err.to_string())))
}

impl RustylineEditor {
    /// Creates an editor with in-memory history.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(HISTORY_SIZE)
            .map_err(terminal_error)?
            .build();
        let mut editor = Editor::with_config(config).map_err(terminal_error)?;
        editor.set_helper(Some(InputHelper {
            paths: FilenameCompleter::new(),
            keywords: Vec::new(),
            hinter: HistoryHinter::new(),
        }));
        Ok(Self {
            editor,
            history_file: None,
        })
    }

    /// Loads history from `path` now and writes it back when the editor is
    /// dropped. A missing file starts an empty history.
    #[must_use]
    pub fn with_history_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match self.editor.load_history(&path) {
            Ok(()) => debug!(file = %path.display(), "loaded history"),
            Err(ReadlineError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(file = %path.display(), error = %e, "cannot load history"),
        }
        self.history_file = Some(path);
        self
    }
}

impl Drop for RustylineEditor {
    fn drop(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                warn!(file = %path.display(), error = %e, "cannot save history");
            }
        }
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(terminal_error(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!(error = %e, "history entry dropped");
        }
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.keywords = keywords;
        }
    }
}
