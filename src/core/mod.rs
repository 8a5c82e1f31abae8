pub mod binding;
pub mod execution;
pub mod graph;
pub mod hook;
pub mod runtime;
pub mod snapshot;
pub mod surface;
pub mod types;
pub mod values;
pub mod vehicle;

#[cfg(test)]
mod tests;
