//! Error types for lfmatch.
//!
//! Every error here is a construction error: something wrong with a template
//! source or a logical-form document. Matching itself never fails; "no match"
//! is an ordinary `None`.

use std::fmt;

use thiserror::Error;

use crate::id::NodeId;

/// The main error type for lfmatch operations.
#[derive(Debug, Error)]
#[error("{kind}{}", display_context(.context))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

fn display_context(context: &Option<ErrorContext>) -> String {
    match context {
        Some(ctx) => format!(" {ctx}"),
        None => String::new(),
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, replacing any existing context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a stack frame onto this error's context, creating one if needed.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Sets the source file on this error's context unless one is already set.
    #[must_use]
    pub fn in_source(mut self, source: impl Into<String>) -> Self {
        let mut context = self.context.take().unwrap_or_default();
        if context.source.is_none() {
            context.source = Some(source.into());
        }
        self.context = Some(context);
        self
    }

    /// Creates a missing attribute error.
    #[must_use]
    pub fn missing_attribute(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        })
    }

    /// Creates an unexpected tag error.
    #[must_use]
    pub fn unexpected_tag(parent: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedTag {
            parent: parent.into(),
            tag: tag.into(),
        })
    }

    /// Creates a duplicate command error.
    #[must_use]
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateCommand(name.into()))
    }

    /// Creates an unresolved reference error.
    #[must_use]
    pub fn unresolved_reference(id: NodeId) -> Self {
        Self::new(ErrorKind::UnresolvedReference(id))
    }

    /// Creates a markup (syntax-level) error.
    #[must_use]
    pub fn markup(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Markup(message.into()))
    }

    /// Creates a logical-form decoding error.
    #[must_use]
    pub fn logical_form(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LogicalForm(message.into()))
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A required attribute is absent.
    #[error("<{tag}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// The tag the attribute belongs on.
        tag: String,
        /// The attribute name.
        attribute: String,
    },

    /// A tag appeared where it is not allowed.
    #[error("unexpected <{tag}> under <{parent}>")]
    UnexpectedTag {
        /// The enclosing tag (or "document" for the root).
        parent: String,
        /// The offending tag.
        tag: String,
    },

    /// Non-whitespace text where only tags are allowed.
    #[error("unexpected text under <{parent}>: {text:?}")]
    UnexpectedText {
        /// The enclosing tag.
        parent: String,
        /// The offending text.
        text: String,
    },

    /// The source has no `<commands>` root.
    #[error("missing root <{0}> tag")]
    MissingRoot(String),

    /// Two commands share a name.
    #[error("duplicate command name '{0}'")]
    DuplicateCommand(String),

    /// A command has no alternative components.
    #[error("command '{0}' has no <component> alternatives")]
    EmptyCommand(String),

    /// Two nodes share an explicit id.
    #[error("duplicate component id '{0}'")]
    DuplicateId(NodeId),

    /// An explicit numeric id is negative.
    #[error("invalid component id '{0}': numeric ids must be non-negative")]
    InvalidId(String),

    /// A component mixes `<rolegroup>` and `<role>` children.
    #[error("<rolegroup> and <role> cannot be mixed as siblings")]
    MixedRoleChildren,

    /// A `<rolegroup>` has no roles.
    #[error("<rolegroup> must contain at least one <role>")]
    EmptyRoleGroup,

    /// A role name appears twice in one alternative.
    #[error("duplicate role '{0}' in one alternative")]
    DuplicateRole(String),

    /// A forward reference names no standalone component.
    #[error("unresolved reference to component '{0}'")]
    UnresolvedReference(NodeId),

    /// Forward references point only at each other.
    #[error("reference cycle through component '{0}'")]
    ReferenceCycle(NodeId),

    /// The markup itself is malformed.
    #[error("malformed markup: {0}")]
    Markup(String),

    /// A logical-form document is malformed.
    #[error("malformed logical form: {0}")]
    LogicalForm(String),

    /// Reading a source failed.
    #[error("cannot read {path}: {message}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file the error came from.
    pub source: Option<String>,
    /// Line number in source (1-indexed).
    pub line: Option<usize>,
    /// Column number in source (1-indexed).
    pub column: Option<usize>,
    /// Enclosing commands and components, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line, self.column) {
            (Some(source), Some(line), Some(col)) => write!(f, "at {source}:{line}:{col}")?,
            (Some(source), _, _) => write!(f, "at {source}")?,
            (None, Some(line), Some(col)) => write!(f, "at {line}:{col}")?,
            _ => {}
        }
        for frame in &self.stack {
            write!(f, "\n  in {frame}")?;
        }
        Ok(())
    }
}

/// Result alias used across lfmatch.
pub type Result<T> = std::result::Result<T, Error>;
