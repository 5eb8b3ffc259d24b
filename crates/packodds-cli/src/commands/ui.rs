use anyhow::Result;
use packodds_config::{Catalog, Config};
use packodds_core::{Grouping, PacketName};
use packodds_tui::AppOptions;

pub fn handle(
    catalog: Catalog,
    config: &Config,
    packet: Option<PacketName>,
    grouping: Grouping,
) -> Result<()> {
    let options = AppOptions {
        packet: packet.unwrap_or(config.display.default_packet),
        grouping,
        decimals: config.display.decimals,
    };
    packodds_tui::run(catalog, options)
}
