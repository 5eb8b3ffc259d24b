mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use packodds_config::Config;
use packodds_core::Grouping;

use cli::Commands;
use commands::show::ShowArgs;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing; stdout is reserved for tables and JSON
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, path = %Config::config_path().display(), "using default config");
        Config::default()
    });
    let explicit = cli.catalog.as_deref();

    match cli.command {
        Commands::Packets => {
            let (catalog, _) = commands::load_catalog(explicit, &config)?;
            commands::packets::handle(&catalog, config.display.decimals)
        }
        Commands::Show {
            packet,
            accumulated,
            individual,
            filter,
            format,
            decimals,
        } => {
            let (catalog, _) = commands::load_catalog(explicit, &config)?;
            let grouping = resolve_grouping(accumulated, individual, &config);
            let args = ShowArgs {
                packet: packet.unwrap_or(config.display.default_packet),
                grouping,
                filter,
                format,
                decimals: decimals.unwrap_or(config.display.decimals),
            };
            commands::show::handle(&catalog, args)
        }
        Commands::Buildups { filter } => {
            let (catalog, _) = commands::load_catalog(explicit, &config)?;
            commands::buildups::handle(&catalog, filter)
        }
        Commands::Validate => {
            let cwd = std::env::current_dir()?;
            let (catalog, source) = packodds_config::resolve_catalog(explicit, &config, &cwd)?;
            commands::validate::handle(&catalog, &source)
        }
        Commands::Init { force } => commands::init::handle(force),
        Commands::Ui {
            packet,
            accumulated,
            individual,
        } => {
            let (catalog, _) = commands::load_catalog(explicit, &config)?;
            let grouping = resolve_grouping(accumulated, individual, &config);
            commands::ui::handle(catalog, &config, packet, grouping)
        }
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

/// Command-line grouping flags win over `display.accumulate`
fn resolve_grouping(accumulated: bool, individual: bool, config: &Config) -> Grouping {
    if accumulated {
        Grouping::Accumulated
    } else if individual {
        Grouping::Individual
    } else {
        Grouping::from_accumulate(config.display.accumulate)
    }
}
