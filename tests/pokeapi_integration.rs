//! Integration tests for the access layer against a mocked PokeAPI.
//!
//! These wire the real client, registry, name index, and suggester against
//! wiremock endpoints, covering retries, caching, not-found handling, and
//! the misspelled-name lookup path.

use std::time::Duration;

use anyhow::Context as _;
use pokedex::{
    AccessorRegistry, Error, NameIndex, PokeApiClient, Resource, ResourceKind, RetryPolicy,
    Settings, SpellingSuggester,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Settings pointed at the mock server, with a retry policy fast enough
/// for tests.
fn test_settings(server: &MockServer) -> Settings {
    Settings {
        base_url: Url::parse(&format!("{}/", server.uri())).expect("mock server URI parses"),
        page_size: 2,
        cache_ttl: Duration::from_secs(24 * 60 * 60),
        retry: RetryPolicy {
            base_delay: Duration::from_millis(10),
            max_elapsed: Duration::from_millis(100),
        },
    }
}

fn registry_for(
    server: &MockServer,
    kinds: impl IntoIterator<Item = ResourceKind>,
) -> (AccessorRegistry, PokeApiClient, Settings) {
    let settings = test_settings(server);
    let client =
        PokeApiClient::with_base_url(settings.base_url.clone()).expect("client builds");
    let registry = AccessorRegistry::from_capabilities(client.capabilities(kinds), &settings)
        .expect("registry builds");
    (registry, client, settings)
}

mod registry_tests {
    use super::*;

    /// A fetched resource comes back typed, with its cross-references.
    #[tokio::test]
    async fn fetches_a_species_by_id() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon-species/25/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 25,
                "name": "pikachu",
                "evolution_chain": {"url": format!("{}/evolution-chain/10/", server.uri())},
                "names": [
                    {"name": "Pikachu", "language": {"name": "en", "url": "http://x/language/9/"}}
                ]
            })))
            .mount(&server)
            .await;

        let (registry, _, _) = registry_for(&server, [ResourceKind::Species]);

        let species = registry.species(25).await?.context("species missing")?;
        assert_eq!(species.name, "pikachu");
        assert!(species.evolution_chain.is_some());

        // The untyped surface reports the same resource, tagged.
        let resource = registry
            .get(ResourceKind::Species, 25)
            .await?
            .context("resource missing")?;
        assert_eq!(resource.kind(), ResourceKind::Species);
        assert!(matches!(resource, Resource::Species(s) if s.id == 25));
        Ok(())
    }

    /// A 404 maps to "absent", not an error, and is not retried.
    #[tokio::test]
    async fn missing_id_is_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/nature/9999/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let (registry, _, _) = registry_for(&server, [ResourceKind::Nature]);
        let nature = registry.nature(9999).await.unwrap();
        assert!(nature.is_none());
    }

    /// Transient upstream errors are retried until the endpoint recovers.
    #[tokio::test]
    async fn flaky_endpoint_recovers_within_the_retry_budget() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/move/5/"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/move/5/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "mega-punch",
                "power": 80,
                "pp": 20,
                "accuracy": 85,
                "damage_class": {"name": "physical", "url": "http://x/move-damage-class/2/"},
                "type": {"name": "normal", "url": "http://x/type/1/"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (registry, _, _) = registry_for(&server, [ResourceKind::Move]);
        let mv = registry.poke_move(5).await?.context("move missing")?;
        assert_eq!(mv.name, "mega-punch");
        assert_eq!(mv.power, Some(80));
        Ok(())
    }

    /// An endpoint that never recovers surfaces one terminal failure.
    #[tokio::test]
    async fn persistent_failure_exhausts_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ability/1/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (registry, _, _) = registry_for(&server, [ResourceKind::Ability]);
        let result = registry.ability(1).await;
        assert!(matches!(result, Err(Error::RetriesExhausted { .. })));
    }

    /// Repeat gets within the TTL are served from cache.
    #[tokio::test]
    async fn repeat_gets_are_served_from_cache() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "bulbasaur",
                "types": [
                    {"slot": 1, "type": {"name": "grass", "url": "http://x/type/12/"}},
                    {"slot": 2, "type": {"name": "poison", "url": "http://x/type/4/"}}
                ],
                "abilities": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (registry, _, _) = registry_for(&server, [ResourceKind::Pokemon]);
        for _ in 0..3 {
            let pokemon = registry.pokemon(1).await?.context("pokemon missing")?;
            assert_eq!(pokemon.types.len(), 2);
        }
        // The .expect(1) on the mock verifies the single upstream hit.
        Ok(())
    }

    /// Asking for a kind the registry was not built with is a hard error.
    #[tokio::test]
    async fn unsupported_kind_is_a_hard_error() {
        let server = MockServer::start().await;
        let (registry, _, _) = registry_for(&server, [ResourceKind::Species]);

        let result = registry.get(ResourceKind::Move, 1).await;
        assert!(matches!(
            result,
            Err(Error::UnsupportedKind(ResourceKind::Move))
        ));
    }

    /// Two capabilities for the same kind fail registry construction.
    #[tokio::test]
    async fn duplicate_capabilities_fail_construction() {
        let server = MockServer::start().await;
        let settings = test_settings(&server);
        let client = PokeApiClient::with_base_url(settings.base_url.clone()).unwrap();

        let result = AccessorRegistry::from_capabilities(
            client.capabilities([ResourceKind::Species, ResourceKind::Species]),
            &settings,
        );
        assert!(matches!(
            result,
            Err(Error::DuplicateAccessor(ResourceKind::Species))
        ));
    }
}

mod name_index_tests {
    use super::*;

    async fn mount_nature_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/nature/"))
            .and(query_param("offset", "0"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 4,
                "next": format!("{}/nature/?offset=2&limit=2", server.uri()),
                "previous": null,
                "results": [
                    {"name": "Bold", "url": format!("{}/nature/2/", server.uri())},
                    {"name": "Timid", "url": format!("{}/nature/5/", server.uri())}
                ]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/nature/"))
            .and(query_param("offset", "2"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 4,
                "next": null,
                "previous": format!("{}/nature/?offset=0&limit=2", server.uri()),
                "results": [
                    {"name": "Adamant", "url": format!("{}/nature/13/", server.uri())},
                    {"name": "Jolly", "url": format!("{}/nature/16/", server.uri())}
                ]
            })))
            .mount(server)
            .await;
    }

    /// Building the index drains every page and normalizes the names.
    #[tokio::test]
    async fn builds_a_case_insensitive_index_from_all_pages() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        mount_nature_listing(&server).await;

        let settings = test_settings(&server);
        let client = PokeApiClient::with_base_url(settings.base_url.clone())?;
        let index = NameIndex::build(
            client.page_fn(ResourceKind::Nature),
            settings.retry,
            settings.page_size,
        )
        .await?;

        assert_eq!(index.len(), 4);
        assert_eq!(index.id_of("Adamant"), Some(13));
        assert_eq!(index.id_of("adamant"), Some(13));
        assert_eq!(index.id_of("brave"), None);
        assert!(index.contains("jolly"));
        Ok(())
    }

    /// A listing endpoint that keeps failing aborts the build as a whole.
    #[tokio::test]
    async fn failing_listing_aborts_the_build() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/move/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let settings = test_settings(&server);
        let client = PokeApiClient::with_base_url(settings.base_url.clone()).unwrap();
        let result = NameIndex::build(
            client.page_fn(ResourceKind::Move),
            settings.retry,
            settings.page_size,
        )
        .await;
        assert!(matches!(result, Err(Error::RetriesExhausted { .. })));
    }

    /// The §2 data flow end to end: index a listing, miss on a misspelled
    /// name, suggest the intended one, then fetch it by ID.
    #[tokio::test]
    async fn misspelled_lookup_resolves_through_suggestion() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon-species/"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"name": "sneasel", "url": format!("{}/pokemon-species/215/", server.uri())},
                    {"name": "weavile", "url": format!("{}/pokemon-species/461/", server.uri())}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pokemon-species/215/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 215,
                "name": "sneasel"
            })))
            .mount(&server)
            .await;

        let (registry, client, settings) = registry_for(&server, [ResourceKind::Species]);
        let index = NameIndex::build(
            client.page_fn(ResourceKind::Species),
            settings.retry,
            settings.page_size,
        )
        .await?;

        let input = "nseasel";
        assert!(!index.contains(input));

        let suggester = SpellingSuggester::new(index.names())?;
        let suggestions = suggester.suggest(input);
        assert_eq!(suggestions, vec!["sneasel"]);

        let id = index
            .id_of(&suggestions[0])
            .context("suggested name does not resolve")?;
        let species = registry.species(id).await?.context("species missing")?;
        assert_eq!(species.name, "sneasel");
        Ok(())
    }

    /// Listing entries without a parsable numeric ID are skipped, not fatal.
    #[tokio::test]
    async fn unparsable_listing_entries_are_skipped() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ability/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"name": "stench", "url": format!("{}/ability/1/", server.uri())},
                    {"name": "broken", "url": "not-a-resource-url"}
                ]
            })))
            .mount(&server)
            .await;

        let settings = test_settings(&server);
        let client = PokeApiClient::with_base_url(settings.base_url.clone())?;
        let index = NameIndex::build(
            client.page_fn(ResourceKind::Ability),
            settings.retry,
            settings.page_size,
        )
        .await?;

        assert_eq!(index.len(), 1);
        assert_eq!(index.id_of("stench"), Some(1));
        Ok(())
    }
}
