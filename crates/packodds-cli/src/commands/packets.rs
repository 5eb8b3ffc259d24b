use anyhow::Result;
use packodds_config::Catalog;
use packodds_core::{Order, TextLookup, format_percent};

pub fn handle(catalog: &Catalog, decimals: usize) -> Result<()> {
    if catalog.packets.is_empty() {
        println!("No packets found.");
        return Ok(());
    }

    println!("Packets:");
    for packet in &catalog.packets {
        println!(
            "  {} ({} cards)",
            catalog.names.text(packet.name.as_str()),
            packet.distinct_cards()
        );

        for order in Order::ALL {
            let bundles: usize = packet
                .sub_packets
                .iter()
                .filter(|s| s.order == order)
                .map(|s| s.bundles.len())
                .sum();
            if bundles == 0 {
                continue;
            }
            println!(
                "    {:<11} {} bundle(s), total {}",
                order.label(),
                bundles,
                format_percent(packet.total_probability(order), decimals)
            );
        }
    }

    Ok(())
}
