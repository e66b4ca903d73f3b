//! Cached, name-addressable access to the PokeAPI.
//!
//! The upstream API is paginated, addressed by numeric ID, and read-mostly.
//! This crate turns it into a reliable local interface:
//!
//! - [`AccessorRegistry`] serves typed resources by ID, wrapping each
//!   kind's raw fetch in bounded-backoff retry ([`RetryPolicy`]) and a
//!   sliding-TTL cache ([`ResultCache`]).
//! - [`NameIndex`] resolves human-readable names to IDs, built once by
//!   walking the paginated listing endpoint ([`PageWalker`]).
//! - [`SpellingSuggester`] recovers slightly misspelled lookups by edit
//!   distance against the index's names.
//!
//! [`api::PokeApiClient`] is the environment side: it manufactures the raw
//! fetch and listing functions the core consumes.
//!
//! ```no_run
//! use pokedex::{AccessorRegistry, NameIndex, PokeApiClient, ResourceKind, Settings};
//!
//! # async fn run() -> pokedex::Result<()> {
//! let settings = Settings::default();
//! let client = PokeApiClient::new()?;
//! let registry = AccessorRegistry::from_capabilities(
//!     client.capabilities([ResourceKind::Species, ResourceKind::Move]),
//!     &settings,
//! )?;
//! let species_names = NameIndex::build(
//!     client.page_fn(ResourceKind::Species),
//!     settings.retry,
//!     settings.page_size,
//! )
//! .await?;
//!
//! if let Some(id) = species_names.id_of("Sneasel") {
//!     let species = registry.species(id).await?;
//!     println!("{:?}", species.map(|s| s.name));
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod names;
pub mod pages;
pub mod registry;
pub mod retry;
pub mod suggest;

pub use api::PokeApiClient;
pub use cache::ResultCache;
pub use config::Settings;
pub use error::{Error, Result};
pub use names::NameIndex;
pub use pages::{NamedEntry, Page, PageFn, PageWalker};
pub use registry::{AccessorRegistry, Capability, FetchFn, Resource, ResourceKind};
pub use retry::RetryPolicy;
pub use suggest::SpellingSuggester;
