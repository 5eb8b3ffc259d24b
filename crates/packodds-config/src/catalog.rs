//! Packet catalog: packets, popular build-ups and display names

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use packodds_core::{BuildUp, CoreError, Order, Packet, PacketName, Rarity};
use serde::Deserialize;

use crate::{ConfigError, Result};

/// Catalog shipped with the binary
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/default.toml");

/// Allowed deviation of a sub-packet's bundle probabilities from 1.0
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Static catalog, loaded once and read-only afterwards
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub packets: Vec<Packet>,

    #[serde(default)]
    pub buildups: Vec<BuildUp>,

    /// Display names keyed by card or packet identifier
    #[serde(default)]
    pub names: HashMap<String, String>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG, "built-in")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse a catalog; `origin` names the input in error messages
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Look up a packet by name
    pub fn packet(&self, name: PacketName) -> packodds_core::Result<&Packet> {
        self.packets
            .iter()
            .find(|p| p.name == name)
            .ok_or(CoreError::PacketNotFound(name))
    }

    pub fn packet_names(&self) -> Vec<PacketName> {
        self.packets.iter().map(|p| p.name).collect()
    }

    /// Check the invariants the aggregator assumes but does not enforce
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for packet in &self.packets {
            if !seen.insert(packet.name) {
                issues.push(CatalogIssue::DuplicatePacket {
                    packet: packet.name,
                });
            }

            if packet.sub_packets.is_empty() {
                issues.push(CatalogIssue::EmptyPacket {
                    packet: packet.name,
                });
            }

            for sub_packet in &packet.sub_packets {
                for bundle in &sub_packet.bundles {
                    if bundle.cards.is_empty() {
                        issues.push(CatalogIssue::EmptyBundle {
                            packet: packet.name,
                            order: sub_packet.order,
                            rarity: bundle.rarity,
                        });
                    }
                    if bundle.probability < 0.0 || !bundle.probability.is_finite() {
                        issues.push(CatalogIssue::InvalidProbability {
                            packet: packet.name,
                            order: sub_packet.order,
                            rarity: bundle.rarity,
                            probability: bundle.probability,
                        });
                    }
                }

                let total = sub_packet.total_probability();
                if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
                    issues.push(CatalogIssue::UnbalancedSubPacket {
                        packet: packet.name,
                        order: sub_packet.order,
                        total,
                    });
                }
            }
        }

        for build_up in &self.buildups {
            if build_up.cards.is_empty() {
                issues.push(CatalogIssue::EmptyBuildUp {
                    name: build_up.name.clone(),
                });
            }
        }

        issues
    }
}

/// A problem found by [`Catalog::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    DuplicatePacket {
        packet: PacketName,
    },
    EmptyPacket {
        packet: PacketName,
    },
    EmptyBundle {
        packet: PacketName,
        order: Order,
        rarity: Rarity,
    },
    InvalidProbability {
        packet: PacketName,
        order: Order,
        rarity: Rarity,
        probability: f64,
    },
    UnbalancedSubPacket {
        packet: PacketName,
        order: Order,
        total: f64,
    },
    EmptyBuildUp {
        name: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicatePacket { packet } => {
                write!(f, "{packet}: defined more than once")
            }
            CatalogIssue::EmptyPacket { packet } => write!(f, "{packet}: no sub-packets"),
            CatalogIssue::EmptyBundle {
                packet,
                order,
                rarity,
            } => write!(f, "{packet} / {order} / {rarity}: bundle has no cards"),
            CatalogIssue::InvalidProbability {
                packet,
                order,
                rarity,
                probability,
            } => write!(
                f,
                "{packet} / {order} / {rarity}: invalid probability {probability}"
            ),
            CatalogIssue::UnbalancedSubPacket {
                packet,
                order,
                total,
            } => write!(
                f,
                "{packet} / {order}: bundle probabilities sum to {total}, expected 1"
            ),
            CatalogIssue::EmptyBuildUp { name } => write!(f, "build-up '{name}' has no cards"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.packet_names(),
            vec![PacketName::Mew, PacketName::Pikachu]
        );
        assert!(!catalog.buildups.is_empty());
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        let issues = catalog.validate();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_packet_not_found() {
        let catalog = Catalog::from_toml_str(
            r#"
[[packets]]
name = "Mew Packet"
"#,
            "test",
        )
        .unwrap();

        assert!(catalog.packet(PacketName::Mew).is_ok());
        assert_eq!(
            catalog.packet(PacketName::Pikachu).unwrap_err(),
            CoreError::PacketNotFound(PacketName::Pikachu)
        );
    }

    #[test]
    fn test_validate_reports_problems() {
        let catalog = Catalog::from_toml_str(
            r#"
[[packets]]
name = "Mew Packet"

[[packets]]
name = "Mew Packet"

[[packets.sub_packets]]
order = "FOURTH"

[[packets.sub_packets.bundles]]
rarity = "DIAMOND2"
probability = 0.7
cards = ["Servine"]

[[packets.sub_packets.bundles]]
rarity = "STAR1"
probability = -0.1
cards = []

[[buildups]]
name = "Empty"
"#,
            "test",
        )
        .unwrap();

        let issues = catalog.validate();
        assert!(issues.contains(&CatalogIssue::EmptyPacket {
            packet: PacketName::Mew
        }));
        assert!(issues.contains(&CatalogIssue::DuplicatePacket {
            packet: PacketName::Mew
        }));
        assert!(issues.contains(&CatalogIssue::EmptyBundle {
            packet: PacketName::Mew,
            order: Order::Fourth,
            rarity: Rarity::Star1,
        }));
        assert!(issues.iter().any(|i| matches!(
            i,
            CatalogIssue::InvalidProbability { probability, .. } if *probability < 0.0
        )));
        assert!(issues.iter().any(|i| matches!(
            i,
            CatalogIssue::UnbalancedSubPacket { order: Order::Fourth, .. }
        )));
        assert!(issues.contains(&CatalogIssue::EmptyBuildUp {
            name: "Empty".to_string()
        }));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = Catalog::from_toml_str("[[packets]]\nname = \"Charizard Packet\"\n", "custom.toml")
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid catalog custom.toml"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_names_table() {
        let catalog = Catalog::from_toml_str(
            r#"
[names]
"Pikachu ex" = "皮卡丘ex"
"#,
            "test",
        )
        .unwrap();

        use packodds_core::TextLookup;
        assert_eq!(catalog.names.text("Pikachu ex"), "皮卡丘ex");
        assert_eq!(catalog.names.text("Mew ex"), "Mew ex");
    }
}
