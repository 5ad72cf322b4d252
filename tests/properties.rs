//! Property tests for Elkform.
//!
//! Properties use randomized host inventories to protect the invariants of
//! quorum election, link wiring and port allocation.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/strategies.rs"]
mod strategies;

#[path = "properties/quorum.rs"]
mod quorum;

#[path = "properties/topology.rs"]
mod topology;

#[path = "properties/substitution.rs"]
mod substitution;
