//! Session state: the loaded library and where it came from.

use std::path::{Path, PathBuf};

use lfmatch_engine::{CommandMatch, MatchConfig, TemplateLibrary};
use lfmatch_foundation::{LogicalForm, Result};
use lfmatch_template::read_logical_form;
use tracing::info;

/// One matched (or unmatched) utterance.
#[derive(Debug)]
pub struct Outcome {
    /// Where the utterance came from.
    pub origin: String,
    /// The decoded logical form.
    pub form: LogicalForm,
    /// The matching command, if any.
    pub found: Option<CommandMatch>,
}

/// A loaded template library that can be matched against and reloaded.
pub struct Session {
    source: PathBuf,
    config: MatchConfig,
    library: TemplateLibrary,
}

impl Session {
    /// Loads the library at `source`.
    ///
    /// # Errors
    ///
    /// Returns any error from loading the template source.
    pub fn load(source: impl Into<PathBuf>, config: MatchConfig) -> Result<Self> {
        let source = source.into();
        let library = TemplateLibrary::load_path(&source)?.with_config(config.clone());
        Ok(Self {
            source,
            config,
            library,
        })
    }

    /// Reads the template source again. On failure the current library is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns any error from loading the template source.
    pub fn reload(&mut self) -> Result<()> {
        let library = TemplateLibrary::load_path(&self.source)?.with_config(self.config.clone());
        info!(source = %self.source.display(), commands = library.len(), "reloaded templates");
        self.library = library;
        Ok(())
    }

    /// The loaded library.
    #[must_use]
    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// The template source path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Decodes a logical-form file and matches it.
    ///
    /// # Errors
    ///
    /// Returns I/O and decoding errors. Not matching is not an error.
    pub fn match_file(&self, path: impl AsRef<Path>) -> Result<Outcome> {
        let path = path.as_ref();
        let form = read_logical_form(path)?;
        Ok(self.match_form(path.display().to_string(), form))
    }

    /// Matches an already decoded logical form.
    #[must_use]
    pub fn match_form(&self, origin: String, form: LogicalForm) -> Outcome {
        let found = self.library.find_match(&form);
        Outcome {
            origin,
            form,
            found,
        }
    }
}
