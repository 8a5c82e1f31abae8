/// Configuration for snapshot evaluation
///
/// This module provides configuration types for controlling how snapshots are
/// cloned and how batches of flight conditions are evaluated.
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Conditions are evaluated one after another on the calling thread
    #[default]
    Sequential,
    /// Conditions are evaluated concurrently on a Rayon thread pool
    Rayon,
}

/// Configuration for snapshot evaluation
///
/// Holds the concurrency settings for batch evaluation and the cloning
/// behaviour of the snapshot pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// The concurrency mode to use for batch evaluation
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel evaluation
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
    /// Copy influence-weight lists when cloning a surface graph instead of
    /// sharing them until first write
    pub clone_influence_lists: bool,
    /// Snapshots allocated up front by a new pool
    pub initial_pool_capacity: usize,
}

impl EvaluationConfig {
    /// Create a new evaluation configuration with default values
    ///
    /// Default configuration is sequential, copies influence lists and starts
    /// with an empty pool
    pub fn new() -> Self {
        Self {
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
            clone_influence_lists: true,
            initial_pool_capacity: 0,
        }
    }

    /// Set the concurrency mode for batch evaluation
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel evaluation
    ///
    /// # Note
    /// This setting only affects evaluation when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    pub fn with_clone_influence_lists(mut self, clone: bool) -> Self {
        self.clone_influence_lists = clone;
        self
    }

    pub fn with_initial_pool_capacity(mut self, capacity: usize) -> Self {
        self.initial_pool_capacity = capacity;
        self
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new()
    }
}
