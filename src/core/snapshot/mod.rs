//! Pooled, self-contained aerodynamic snapshots of a vehicle.

pub mod aero_graph;
pub mod aggregate;
pub mod data;
pub mod errors;
pub mod lineage;
pub mod pool;

pub use aero_graph::AeroGraph;
pub use aggregate::Snapshot;
pub use data::{AeroForces, EngineModel, SectionData};
pub use errors::SnapshotError;
pub use lineage::Lineage;
pub use pool::{PoolStats, SnapshotPool};
