//! PokeAPI client
//!
//! Response DTOs mirror the wire shape; callers only see the domain types
//! from `state`. The HTTP transport is a trait so tests can inject canned
//! responses instead of hitting the network.

use std::future::Future;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{EvolutionNode, ListItem, PokemonDetails, SpeciesInfo};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// HTTP transport seam.
pub trait Http {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, String>> + Send;
}

/// Production transport - one shared reqwest client for the process.
#[derive(Clone, Copy, Default)]
pub struct ReqwestHttp;

impl Http for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = http_client()
            .get(url)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let response = response.error_for_status().map_err(|err| err.to_string())?;
        let bytes = response.bytes().await.map_err(|err| err.to_string())?;
        Ok(bytes.to_vec())
    }
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

/// List thumbnails come straight from the sprite repository, addressed by
/// the 1-based list position - no API call involved.
pub fn sprite_url(index: usize) -> String {
    format!("{SPRITE_BASE}/{index}.png")
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    height: u16,
    weight: u16,
    base_experience: Option<u16>,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    moves: Vec<PokemonMoveSlot>,
    sprites: serde_json::Value,
    species: ApiResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    #[serde(default)]
    evolution_details: Vec<EvolutionDetail>,
    evolves_to: Vec<ChainLink>,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionDetail {
    min_level: Option<u16>,
}

pub async fn fetch_roster<H: Http>(http: &H, limit: u32) -> Result<Vec<ListItem>, String> {
    let url = format!("{API_BASE}/pokemon?limit={limit}");
    let response: ListResponse = fetch_json(http, &url).await?;
    Ok(response
        .results
        .into_iter()
        .enumerate()
        .map(|(position, entry)| ListItem {
            name: entry.name,
            index: position + 1,
        })
        .collect())
}

pub async fn fetch_details<H: Http>(http: &H, index: usize) -> Result<PokemonDetails, String> {
    let url = format!("{API_BASE}/pokemon/{index}");
    let response: PokemonResponse = fetch_json(http, &url).await?;

    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let abilities = response
        .abilities
        .into_iter()
        .map(|slot| slot.ability.name)
        .collect();
    let moves = response
        .moves
        .into_iter()
        .map(|slot| slot.move_info.name)
        .collect();

    Ok(PokemonDetails {
        sprite_front_default: pointer_string(&response.sprites, "/front_default"),
        height: response.height,
        weight: response.weight,
        base_experience: response.base_experience,
        types,
        abilities,
        moves,
        species_url: response.species.url,
    })
}

pub async fn fetch_species<H: Http>(http: &H, url: &str) -> Result<SpeciesInfo, String> {
    let response: SpeciesResponse = fetch_json(http, url).await?;
    Ok(SpeciesInfo {
        evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
    })
}

pub async fn fetch_evolution<H: Http>(http: &H, url: &str) -> Result<EvolutionNode, String> {
    let response: EvolutionChainResponse = fetch_json(http, url).await?;
    Ok(build_node(response.chain))
}

fn build_node(link: ChainLink) -> EvolutionNode {
    // Only the first evolution condition is consulted; an empty
    // evolution_details array simply yields no level.
    let min_level = link
        .evolution_details
        .first()
        .and_then(|detail| detail.min_level);
    EvolutionNode {
        species_name: link.species.name,
        min_level,
        children: link.evolves_to.into_iter().map(build_node).collect(),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json<H: Http, T: serde::de::DeserializeOwned>(
    http: &H,
    url: &str,
) -> Result<T, String> {
    let bytes = http.get(url).await?;
    serde_json::from_slice(&bytes).map_err(|err| err.to_string())
}
