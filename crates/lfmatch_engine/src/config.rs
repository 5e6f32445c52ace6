//! Matching configuration.

/// How [`crate::TemplateLibrary::find_match`] walks the library.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// One (command, alternative) pair at a time, in library order.
    #[default]
    Sequential,
    /// All pairs across the rayon pool; the earliest success in library
    /// order still wins.
    Parallel,
}

/// Configuration for matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Library search strategy.
    pub strategy: SearchStrategy,
    /// Deepest template node visited before a branch is abandoned.
    pub max_depth: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Sequential,
            max_depth: 256,
        }
    }
}

impl MatchConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default configuration with parallel search.
    #[must_use]
    pub fn parallel() -> Self {
        Self::default().with_strategy(SearchStrategy::Parallel)
    }

    /// Sets the search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
