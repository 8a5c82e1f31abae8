pub mod errors;
pub mod model;
pub mod profile;
pub mod state;

pub use errors::AdapterError;
pub use model::SurfaceModel;
pub use profile::{InteractionProfile, NeighborList, UpstreamSummary};
pub use state::SurfaceState;
