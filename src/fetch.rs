//! Upstream data access.
//!
//! The engine never performs network I/O itself. Callers inject a
//! [`SpeciesSource`] and a [`ChainSource`]; [`SnapshotDir`] is a file-backed
//! implementation reading JSON snapshots laid out like the upstream routes.

use crate::chain::ChainNode;
use crate::errors::{UpstreamDataError, UpstreamResult};
use schema::{EvolutionChainResponse, RawSpecies, Region, SpeciesDetail, SpeciesResource};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Species source (Tyradex) base URL.
pub const SPECIES_ENDPOINT: &str = "https://tyradex.vercel.app/api/v1";
/// Chain source (PokeAPI) base URL.
pub const CHAIN_ENDPOINT: &str = "https://pokeapi.co/api/v2";

pub const SPECIES_LIST_PATH: &str = "/pokemon";
pub const SPECIES_DETAIL_PATH: &str = "/pokemon/[id]";
pub const REGIONAL_DETAIL_PATH: &str = "/pokemon/[name]/[region]";
pub const CHAIN_SPECIES_PATH: &str = "/pokemon-species/[id]";

/// Substitute every `[key]` placeholder in `template`.
pub fn expand_path(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |path, (key, value)| path.replace(&format!("[{}]", key), value))
}

/// A templated path is only requested once parameters are supplied.
pub fn is_ready(template: &str, params: &[(&str, &str)]) -> bool {
    !params.is_empty() || !has_placeholder(template)
}

fn has_placeholder(template: &str) -> bool {
    template
        .find('[')
        .is_some_and(|open| template[open..].contains(']'))
}

/// Full request URL, or `None` while the path is not ready.
pub fn request_url(endpoint: &str, template: &str, params: &[(&str, &str)]) -> Option<String> {
    is_ready(template, params).then(|| format!("{}{}", endpoint, expand_path(template, params)))
}

/// Name segment of the regional detail route: lowercase, accents removed,
/// everything else kept ("Ossatueur" -> "ossatueur").
pub fn route_name(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

pub trait SpeciesSource {
    /// `/pokemon`
    fn species_list(&self) -> UpstreamResult<Vec<RawSpecies>>;

    /// `/pokemon/[id]`
    fn species_detail(&self, species_id: u32) -> UpstreamResult<SpeciesDetail>;

    /// `/pokemon/[name]/[region]`, with `name` the species' standard French name.
    fn regional_detail(&self, name: &str, region: Region) -> UpstreamResult<SpeciesDetail>;
}

pub trait ChainSource {
    /// `/pokemon-species/[id]`
    fn species_resource(&self, species_id: u32) -> UpstreamResult<SpeciesResource>;

    /// The chain behind a URL taken from a species resource.
    fn evolution_chain(&self, chain_url: &str) -> UpstreamResult<EvolutionChainResponse>;

    /// Chain containing `species_id`, or `None` when the species has no chain.
    fn chain_for_species(&self, species_id: u32) -> UpstreamResult<Option<ChainNode>> {
        let resource = self.species_resource(species_id)?;
        let Some(chain) = resource.evolution_chain else {
            return Ok(None);
        };
        let response = self.evolution_chain(&chain.url)?;
        ChainNode::from_link(&response.chain).map(Some)
    }
}

/// Upstream snapshots on disk: `<root>/tyradex<path>.json` and
/// `<root>/pokeapi<path>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file(&self, source: &str, path: &str) -> PathBuf {
        let path = path.trim_matches('/');
        self.root.join(source).join(format!("{}.json", path))
    }

    fn read<T: DeserializeOwned>(&self, source: &str, path: &str) -> UpstreamResult<T> {
        let file = self.file(source, path);
        let shown = file.display().to_string();
        let text = fs::read_to_string(&file)
            .map_err(|e| UpstreamDataError::Unavailable(format!("{}: {}", shown, e)))?;
        tracing::debug!(file = %shown, "read snapshot");
        serde_json::from_str(&text).map_err(|e| UpstreamDataError::Decode {
            path: shown,
            details: e.to_string(),
        })
    }
}

impl SpeciesSource for SnapshotDir {
    fn species_list(&self) -> UpstreamResult<Vec<RawSpecies>> {
        self.read("tyradex", SPECIES_LIST_PATH)
    }

    fn species_detail(&self, species_id: u32) -> UpstreamResult<SpeciesDetail> {
        let id = species_id.to_string();
        self.read("tyradex", &expand_path(SPECIES_DETAIL_PATH, &[("id", &id)]))
    }

    fn regional_detail(&self, name: &str, region: Region) -> UpstreamResult<SpeciesDetail> {
        let name = route_name(name);
        let path = expand_path(REGIONAL_DETAIL_PATH, &[("name", &name), ("region", region.tag())]);
        self.read("tyradex", &path)
    }
}

impl ChainSource for SnapshotDir {
    fn species_resource(&self, species_id: u32) -> UpstreamResult<SpeciesResource> {
        let id = species_id.to_string();
        self.read("pokeapi", &expand_path(CHAIN_SPECIES_PATH, &[("id", &id)]))
    }

    fn evolution_chain(&self, chain_url: &str) -> UpstreamResult<EvolutionChainResponse> {
        let path = chain_url.strip_prefix(CHAIN_ENDPOINT).unwrap_or(chain_url);
        self.read("pokeapi", path)
    }
}
