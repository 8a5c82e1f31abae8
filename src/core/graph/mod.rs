//! Self-contained graphs of surface models and their deep cloning.

pub mod cloner;
pub mod correlation;
pub mod errors;
pub mod surface_graph;

pub use cloner::GraphCloner;
pub use correlation::CorrelationMap;
pub use errors::GraphError;
pub use surface_graph::SurfaceGraph;
