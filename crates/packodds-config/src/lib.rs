//! Configuration and packet catalog loading for packodds

pub mod catalog;
pub mod error;

pub use catalog::{BUILTIN_CATALOG, Catalog, CatalogIssue, PROBABILITY_TOLERANCE};
pub use error::{ConfigError, Result};

use packodds_core::PacketName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the current directory and its parents
pub const PROJECT_CATALOG_FILE: &str = "packodds.toml";

// ============================================================================
// Global Config (~/.config/packodds/config.toml)
// ============================================================================

/// User configuration for packodds
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Catalog file to use instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_packet")]
    pub default_packet: PacketName,

    /// Merge rarities into one row per card by default
    #[serde(default)]
    pub accumulate: bool,

    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_packet: default_packet(),
            accumulate: false,
            decimals: default_decimals(),
        }
    }
}

fn default_packet() -> PacketName {
    PacketName::Mew
}

fn default_decimals() -> usize {
    packodds_core::view::DEFAULT_DECIMALS
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing the defaults there if it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            tracing::debug!(path = %path.display(), "wrote default config");
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "packodds", "packodds") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.packodds/config.toml")
        }
    }
}

// ============================================================================
// Catalog resolution
// ============================================================================

/// Where the active catalog came from
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    /// `--catalog` flag or `PACKODDS_CATALOG`
    Explicit(PathBuf),
    /// `catalog` key of the user config
    Config(PathBuf),
    /// `packodds.toml` found from the working directory upwards
    Project(PathBuf),
    Builtin,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Explicit(path) => write!(f, "{} (explicit)", path.display()),
            CatalogSource::Config(path) => write!(f, "{} (user config)", path.display()),
            CatalogSource::Project(path) => write!(f, "{} (project)", path.display()),
            CatalogSource::Builtin => f.write_str("built-in"),
        }
    }
}

/// Find packodds.toml by walking up from given directory
pub fn find_project_catalog_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(PROJECT_CATALOG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Pick the catalog to use. First hit wins: explicit path, user config,
/// project file found from `cwd`, built-in catalog.
pub fn resolve_catalog(
    explicit: Option<&Path>,
    config: &Config,
    cwd: &Path,
) -> Result<(Catalog, CatalogSource)> {
    let source = if let Some(path) = explicit {
        CatalogSource::Explicit(path.to_path_buf())
    } else if let Some(path) = &config.catalog {
        CatalogSource::Config(path.clone())
    } else if let Some(path) = find_project_catalog_from(cwd) {
        CatalogSource::Project(path)
    } else {
        CatalogSource::Builtin
    };

    let catalog = match &source {
        CatalogSource::Explicit(path) | CatalogSource::Config(path) | CatalogSource::Project(path) => {
            Catalog::from_path(path)?
        }
        CatalogSource::Builtin => Catalog::builtin()?,
    };

    tracing::debug!(source = %source, packets = catalog.packets.len(), "loaded catalog");
    Ok((catalog, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog, None);
        assert_eq!(config.display.default_packet, PacketName::Mew);
        assert!(!config.display.accumulate);
        assert_eq!(config.display.decimals, 3);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.display.decimals, config.display.decimals);
        assert_eq!(parsed.display.default_packet, config.display.default_packet);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
catalog = "/srv/packodds/catalog.toml"

[display]
default_packet = "Pikachu Packet"
accumulate = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("/srv/packodds/catalog.toml")));
        assert_eq!(config.display.default_packet, PacketName::Pikachu);
        assert!(config.display.accumulate);
        assert_eq!(config.display.decimals, 3);
    }

    #[test]
    fn test_load_from_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.display.decimals, 3);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.display.default_packet, PacketName::Mew);
    }

    #[test]
    fn test_find_project_catalog_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_catalog_from(&nested), None);

        let catalog = dir.path().join(PROJECT_CATALOG_FILE);
        std::fs::write(&catalog, BUILTIN_CATALOG).unwrap();
        assert_eq!(find_project_catalog_from(&nested), Some(catalog));
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(PROJECT_CATALOG_FILE);
        std::fs::write(&project, BUILTIN_CATALOG).unwrap();

        let explicit = dir.path().join("custom.toml");
        std::fs::write(
            &explicit,
            r#"
[[packets]]
name = "Pikachu Packet"

[[packets.sub_packets]]
order = "FIFTH"

[[packets.sub_packets.bundles]]
rarity = "CROWN"
probability = 1.0
cards = ["Pikachu ex"]
"#,
        )
        .unwrap();

        let config = Config::default();

        let (catalog, source) = resolve_catalog(Some(&explicit), &config, dir.path()).unwrap();
        assert_eq!(source, CatalogSource::Explicit(explicit.clone()));
        assert_eq!(catalog.packets.len(), 1);

        let (catalog, source) = resolve_catalog(None, &config, dir.path()).unwrap();
        assert_eq!(source, CatalogSource::Project(project));
        assert_eq!(catalog.packets.len(), 2);

        let config = Config {
            catalog: Some(explicit.clone()),
            ..Default::default()
        };
        let (_, source) = resolve_catalog(None, &config, dir.path()).unwrap();
        assert_eq!(source, CatalogSource::Config(explicit));
    }

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, source) = resolve_catalog(None, &Config::default(), dir.path()).unwrap();
        assert_eq!(source, CatalogSource::Builtin);
        assert!(catalog.packet(PacketName::Mew).is_ok());
    }
}
