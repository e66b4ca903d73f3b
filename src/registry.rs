//! Typed accessors: one retry+cache-wrapped fetch-by-ID per resource kind.

use crate::api::models::{Ability, EvolutionChain, Nature, PokeMove, PokeType, Pokemon, Species};
use crate::cache::ResultCache;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Tag distinguishing the categories of remote entities this layer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Species,
    Pokemon,
    EvolutionChain,
    Nature,
    Ability,
    Type,
    Move,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Species,
        ResourceKind::Pokemon,
        ResourceKind::EvolutionChain,
        ResourceKind::Nature,
        ResourceKind::Ability,
        ResourceKind::Type,
        ResourceKind::Move,
    ];

    /// The upstream endpoint segment for this kind.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Species => "pokemon-species",
            ResourceKind::Pokemon => "pokemon",
            ResourceKind::EvolutionChain => "evolution-chain",
            ResourceKind::Nature => "nature",
            ResourceKind::Ability => "ability",
            ResourceKind::Type => "type",
            ResourceKind::Move => "move",
        }
    }

    /// Whether the listing endpoint for this kind carries names. Evolution
    /// chains are listed without names upstream, so no name index can be
    /// built for them.
    pub fn has_named_listing(self) -> bool {
        !matches!(self, ResourceKind::EvolutionChain)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// A fetched resource, tagged by kind.
#[derive(Debug, Clone)]
pub enum Resource {
    Species(Species),
    Pokemon(Pokemon),
    EvolutionChain(EvolutionChain),
    Nature(Nature),
    Ability(Ability),
    Type(PokeType),
    Move(PokeMove),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Species(_) => ResourceKind::Species,
            Resource::Pokemon(_) => ResourceKind::Pokemon,
            Resource::EvolutionChain(_) => ResourceKind::EvolutionChain,
            Resource::Nature(_) => ResourceKind::Nature,
            Resource::Ability(_) => ResourceKind::Ability,
            Resource::Type(_) => ResourceKind::Type,
            Resource::Move(_) => ResourceKind::Move,
        }
    }
}

/// Raw fetch-by-ID function supplied by the environment.
pub type FetchFn = Arc<dyn Fn(u32) -> BoxFuture<'static, Result<Resource>> + Send + Sync>;

/// Capability descriptor: one resource kind plus the raw fetch serving it.
///
/// The environment hands these to the registry explicitly; the registry
/// never inspects a client object for candidate methods.
#[derive(Clone)]
pub struct Capability {
    pub kind: ResourceKind,
    pub fetch: FetchFn,
}

impl Capability {
    pub fn new(kind: ResourceKind, fetch: FetchFn) -> Self {
        Self { kind, fetch }
    }
}

/// The retry+cache composition around one kind's raw fetch. Created at
/// registry construction, immutable afterwards.
struct TypedAccessor {
    fetch: FetchFn,
    retry: RetryPolicy,
    cache: ResultCache<u32, Resource>,
}

impl TypedAccessor {
    async fn get(&self, id: u32) -> Result<Option<Resource>> {
        let fetched = self
            .cache
            .get_with(id, || self.retry.run(|| (self.fetch)(id)))
            .await;
        match fetched {
            Ok(resource) => Ok(Some(resource)),
            // A definitive upstream 404 is "absent", not an error, and is
            // never retried (its classification is non-transient).
            Err(Error::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Holds one [`TypedAccessor`] per supported resource kind.
pub struct AccessorRegistry {
    accessors: HashMap<ResourceKind, TypedAccessor>,
}

macro_rules! kind_getter {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $model:ty) => {
        $(#[$meta])*
        pub async fn $name(&self, id: u32) -> Result<Option<$model>> {
            match self.get(ResourceKind::$kind, id).await? {
                Some(Resource::$kind(value)) => Ok(Some(value)),
                _ => Ok(None),
            }
        }
    };
}

impl AccessorRegistry {
    /// Compose a fresh [`RetryPolicy`] and [`ResultCache`] around each
    /// capability's raw fetch.
    ///
    /// Two capabilities carrying the same kind fail construction; the
    /// ambiguity is never silently resolved.
    pub fn from_capabilities(
        capabilities: impl IntoIterator<Item = Capability>,
        settings: &Settings,
    ) -> Result<Self> {
        let mut accessors = HashMap::new();
        for capability in capabilities {
            if accessors.contains_key(&capability.kind) {
                return Err(Error::DuplicateAccessor(capability.kind));
            }
            accessors.insert(
                capability.kind,
                TypedAccessor {
                    fetch: capability.fetch,
                    retry: settings.retry,
                    cache: ResultCache::new(settings.cache_ttl),
                },
            );
        }
        tracing::info!(kinds = accessors.len(), "built accessor registry");
        Ok(Self { accessors })
    }

    /// Fetch a resource by kind and ID.
    ///
    /// `Ok(None)` means the upstream definitively has no such ID. Asking
    /// for a kind with no registered accessor is a programmer error and
    /// comes back as [`Error::UnsupportedKind`], distinguishing "kind not
    /// supported here" from "ID not found".
    pub async fn get(&self, kind: ResourceKind, id: u32) -> Result<Option<Resource>> {
        let accessor = self
            .accessors
            .get(&kind)
            .ok_or(Error::UnsupportedKind(kind))?;
        accessor.get(id).await
    }

    pub fn supports(&self, kind: ResourceKind) -> bool {
        self.accessors.contains_key(&kind)
    }

    /// The kinds this registry can serve. Handlers validate their
    /// requirements against this at construction.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        self.accessors.keys().copied().collect()
    }

    kind_getter!(
        /// Fetch a species, unwrapped for callers that know the kind.
        species, Species, Species);
    kind_getter!(pokemon, Pokemon, Pokemon);
    kind_getter!(evolution_chain, EvolutionChain, EvolutionChain);
    kind_getter!(nature, Nature, Nature);
    kind_getter!(ability, Ability, Ability);
    kind_getter!(poke_type, Type, PokeType);
    kind_getter!(poke_move, Move, PokeMove);
}
