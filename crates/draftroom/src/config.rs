//! Server configuration read from the environment.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use draftroom_core::{Catalog, DraftConfig};

use crate::DraftroomError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Interface used when `DRAFT_HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Everything needed to start a draft server.
///
/// | variable | field | default |
/// |---|---|---|
/// | `PORT` | `port` | `3000` |
/// | `DRAFT_HOST` | `host` | `0.0.0.0` |
/// | `DRAFT_PICKS_PER_TEAM` | `draft.picks_per_team` | `6` |
/// | `DRAFT_CATALOG` | `catalog_path` | built-in catalog |
/// | `DRAFT_SEED` | `seed` | OS entropy |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub draft: DraftConfig,
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Fixed seed for slot assignment.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            draft: DraftConfig::default(),
            catalog_path: None,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, DraftroomError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Unset and blank variables
    /// keep their defaults.
    ///
    /// # Errors
    /// [`DraftroomError::Config`] if a variable is set but does not parse.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DraftroomError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(host) = var("DRAFT_HOST") {
            config.host = host;
        }
        if let Some(raw) = var("PORT") {
            config.port = parse("PORT", &raw)?;
        }
        if let Some(raw) = var("DRAFT_PICKS_PER_TEAM") {
            config.draft.picks_per_team = parse("DRAFT_PICKS_PER_TEAM", &raw)?;
        }
        if let Some(path) = var("DRAFT_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = var("DRAFT_SEED") {
            config.seed = Some(parse("DRAFT_SEED", &raw)?);
        }
        Ok(config)
    }

    /// `host:port`, ready for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads the configured catalog, or the built-in one if none is set.
    pub fn load_catalog(&self) -> Result<Catalog, DraftroomError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::fantasy_top30());
        };
        let data =
            std::fs::read_to_string(path).map_err(|source| DraftroomError::CatalogRead {
                path: path.clone(),
                source,
            })?;
        let catalog = Catalog::from_json(&data)?;
        tracing::info!(path = %path.display(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, DraftroomError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| DraftroomError::Config {
        key,
        reason: format!("{raw:?}: {e}"),
    })
}
