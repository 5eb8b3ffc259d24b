use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use packodds_core::PacketName;

#[derive(Parser)]
#[command(name = "packodds")]
#[command(about = "Card packet drop-rate tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Catalog file (overrides the user config and any packodds.toml)
    #[arg(long, global = true, env = "PACKODDS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List packets in the catalog
    Packets,

    /// Show per-card probabilities for a packet
    Show {
        /// Packet name, e.g. "mew" or "Pikachu Packet" (default from config)
        packet: Option<PacketName>,

        /// Merge rarities into one row per card
        #[arg(long, conflicts_with = "individual")]
        accumulated: bool,

        /// One row per card and rarity (overrides config)
        #[arg(long)]
        individual: bool,

        /// Only show cards whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Decimal places for percentages (default from config: 3)
        #[arg(long)]
        decimals: Option<usize>,
    },

    /// List popular build-ups
    Buildups {
        /// Only show build-ups whose name or cards contain this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Check the catalog for probability and structure problems
    Validate,

    /// Write the built-in catalog to ./packodds.toml for editing
    Init {
        /// Overwrite an existing packodds.toml
        #[arg(long)]
        force: bool,
    },

    /// Browse packets interactively
    Ui {
        /// Packet to open first (default from config)
        packet: Option<PacketName>,

        /// Start in accumulated mode
        #[arg(long, conflicts_with = "individual")]
        accumulated: bool,

        /// Start in individual mode (overrides config)
        #[arg(long)]
        individual: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from([
            "packodds",
            "show",
            "pikachu",
            "--accumulated",
            "--filter",
            "ex",
            "--format",
            "json",
        ]);

        match cli.command {
            Commands::Show {
                packet,
                accumulated,
                individual,
                filter,
                format,
                decimals,
            } => {
                assert_eq!(packet, Some(PacketName::Pikachu));
                assert!(accumulated);
                assert!(!individual);
                assert_eq!(filter.as_deref(), Some("ex"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(decimals, None);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_rejects_unknown_packet() {
        assert!(Cli::try_parse_from(["packodds", "show", "charizard"]).is_err());
    }

    #[test]
    fn test_grouping_flags_conflict() {
        assert!(
            Cli::try_parse_from(["packodds", "show", "--accumulated", "--individual"]).is_err()
        );
    }

    #[test]
    fn test_ui_grouping_flags() {
        let cli = Cli::parse_from(["packodds", "ui", "mew", "--individual"]);
        match cli.command {
            Commands::Ui {
                packet,
                accumulated,
                individual,
            } => {
                assert_eq!(packet, Some(PacketName::Mew));
                assert!(!accumulated);
                assert!(individual);
            }
            _ => panic!("expected ui"),
        }

        assert!(Cli::try_parse_from(["packodds", "ui", "--accumulated", "--individual"]).is_err());
    }

    #[test]
    fn test_global_catalog_flag() {
        let cli = Cli::parse_from(["packodds", "validate", "--catalog", "custom.toml"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("custom.toml")));
    }
}
