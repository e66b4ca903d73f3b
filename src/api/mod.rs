//! The environment side of the access layer: a real PokeAPI client.
//!
//! [`client::PokeApiClient`] supplies the raw material the core consumes —
//! one fetch-by-ID function per resource kind (as
//! [`crate::registry::Capability`] values) and the batch-listing function
//! behind [`crate::names::NameIndex`]. [`http`] is the thin reqwest wrapper
//! underneath, and [`models`] holds the serde types for the wire format.

pub mod client;
pub mod http;
pub mod models;

pub use client::PokeApiClient;
