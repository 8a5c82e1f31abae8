pub mod batch;
pub mod config;

// Re-export commonly used types
pub use batch::evaluate_batch;
pub use config::{ConcurrencyMode, EvaluationConfig};
