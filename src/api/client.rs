//! PokeAPI client: typed fetch-by-ID per kind, paginated listing, and
//! capability manufacture for the accessor registry.

use super::http::HttpClient;
use super::models::{
    Ability, EvolutionChain, Nature, PokeMove, PokeType, Pokemon, ResourceList, Species,
};
use crate::config::DEFAULT_BASE_URL;
use crate::error::Result;
use crate::pages::{NamedEntry, Page, PageFn};
use crate::registry::{Capability, FetchFn, Resource, ResourceKind};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Client for one PokeAPI deployment.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct PokeApiClient {
    http: HttpClient,
    base: Url,
}

impl PokeApiClient {
    /// Client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(Url::parse(DEFAULT_BASE_URL)?)
    }

    /// Client against an alternate deployment (mirror, test server). The
    /// base URL must end with a `/` for endpoint joining to work.
    pub fn with_base_url(base: Url) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            base,
        })
    }

    pub async fn species(&self, id: u32) -> Result<Species> {
        self.fetch(ResourceKind::Species, id).await
    }

    pub async fn pokemon(&self, id: u32) -> Result<Pokemon> {
        self.fetch(ResourceKind::Pokemon, id).await
    }

    pub async fn evolution_chain(&self, id: u32) -> Result<EvolutionChain> {
        self.fetch(ResourceKind::EvolutionChain, id).await
    }

    pub async fn nature(&self, id: u32) -> Result<Nature> {
        self.fetch(ResourceKind::Nature, id).await
    }

    pub async fn ability(&self, id: u32) -> Result<Ability> {
        self.fetch(ResourceKind::Ability, id).await
    }

    pub async fn poke_type(&self, id: u32) -> Result<PokeType> {
        self.fetch(ResourceKind::Type, id).await
    }

    pub async fn poke_move(&self, id: u32) -> Result<PokeMove> {
        self.fetch(ResourceKind::Move, id).await
    }

    async fn fetch<T: DeserializeOwned>(&self, kind: ResourceKind, id: u32) -> Result<T> {
        let url = self.base.join(&format!("{}/{}/", kind.endpoint(), id))?;
        self.http.get_json(url).await
    }

    /// One batch of the named listing for `kind`.
    ///
    /// Entries whose URL carries no parsable numeric ID are skipped with a
    /// warning rather than failing the page.
    pub async fn page(&self, kind: ResourceKind, offset: u32, limit: u32) -> Result<Page> {
        let mut url = self.base.join(&format!("{}/", kind.endpoint()))?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        let list: ResourceList = self.http.get_json(url).await?;
        let mut entries = Vec::with_capacity(list.results.len());
        for named in list.results {
            match id_from_url(&named.url) {
                Some(id) => entries.push(NamedEntry {
                    name: named.name,
                    id,
                }),
                None => {
                    tracing::warn!(name = %named.name, url = %named.url, "listing entry without a numeric id, skipping")
                }
            }
        }
        Ok(Page {
            entries,
            has_more: list.next.is_some(),
        })
    }

    /// One capability per requested kind.
    ///
    /// Duplicates in the request produce duplicate capabilities, which the
    /// registry then rejects at construction.
    pub fn capabilities(&self, kinds: impl IntoIterator<Item = ResourceKind>) -> Vec<Capability> {
        kinds.into_iter().map(|kind| self.capability(kind)).collect()
    }

    pub fn capability(&self, kind: ResourceKind) -> Capability {
        let client = self.clone();
        let fetch: FetchFn = Arc::new(move |id| {
            let client = client.clone();
            async move {
                match kind {
                    ResourceKind::Species => client.species(id).await.map(Resource::Species),
                    ResourceKind::Pokemon => client.pokemon(id).await.map(Resource::Pokemon),
                    ResourceKind::EvolutionChain => {
                        client.evolution_chain(id).await.map(Resource::EvolutionChain)
                    }
                    ResourceKind::Nature => client.nature(id).await.map(Resource::Nature),
                    ResourceKind::Ability => client.ability(id).await.map(Resource::Ability),
                    ResourceKind::Type => client.poke_type(id).await.map(Resource::Type),
                    ResourceKind::Move => client.poke_move(id).await.map(Resource::Move),
                }
            }
            .boxed()
        });
        Capability::new(kind, fetch)
    }

    /// The batch closure handed to [`crate::names::NameIndex::build`] or a
    /// [`crate::pages::PageWalker`].
    pub fn page_fn(&self, kind: ResourceKind) -> PageFn {
        let client = self.clone();
        Arc::new(move |offset, limit| {
            let client = client.clone();
            async move { client.page(kind, offset, limit).await }.boxed()
        })
    }
}

/// Numeric ID from the trailing path segment of a resource URL, e.g.
/// `https://pokeapi.co/api/v2/pokemon-species/215/` -> 215.
fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}
