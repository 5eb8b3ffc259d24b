use anyhow::Result;
use packodds_config::Catalog;
use packodds_core::{RowFilter, TextLookup};

pub fn handle(catalog: &Catalog, filter: Option<String>) -> Result<()> {
    let filter = RowFilter::new(filter.as_deref().unwrap_or_default());
    let build_ups: Vec<_> = catalog
        .buildups
        .iter()
        .filter(|b| filter.matches_buildup(b, &catalog.names))
        .collect();

    if build_ups.is_empty() {
        println!("No build-ups found.");
        return Ok(());
    }

    println!("Popular build-ups ({}):", build_ups.len());
    for build_up in build_ups {
        println!("\n  {} ({} cards)", build_up.name, build_up.cards.len());
        for chunk in build_up.cards.chunks(5) {
            let cards: Vec<String> = chunk
                .iter()
                .map(|card| catalog.names.text(card).into_owned())
                .collect();
            println!("    {}", cards.join(", "));
        }
    }

    Ok(())
}
