//! Serde models for the PokeAPI resources this layer exposes.
//!
//! Trimmed to the fields the layer guarantees: identity plus the
//! cross-references used for chained lookups. Optional upstream fields are
//! tolerated with `#[serde(default)]` so a sparse record still decodes.

use serde::Deserialize;

/// Wire form of a named cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

/// Wire form of an unnamed cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ref {
    pub url: String,
}

/// One localized display name.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedRef,
}

/// One batch of a listing endpoint as it comes off the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub evolution_chain: Option<Ref>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u32,
    pub ability: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

/// A node of the evolution tree: the species at this stage plus everything
/// it evolves into.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NamedRef,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Nature {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub increased_stat: Option<NamedRef>,
    #[serde(default)]
    pub decreased_stat: Option<NamedRef>,
}

/// One effect description in one language.
#[derive(Debug, Clone, Deserialize)]
pub struct Effect {
    pub effect: String,
    #[serde(default)]
    pub short_effect: Option<String>,
    pub language: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ability {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub effect_entries: Vec<Effect>,
}

/// Damage multipliers against and from other types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_to: Vec<NamedRef>,
    #[serde(default)]
    pub double_damage_from: Vec<NamedRef>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedRef>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedRef>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedRef>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokeType {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokeMove {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub pp: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub damage_class: Option<NamedRef>,
    #[serde(rename = "type", default)]
    pub kind: Option<NamedRef>,
}
