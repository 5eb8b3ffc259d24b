use anyhow::Result;
use packodds_config::{Catalog, CatalogSource};

pub fn handle(catalog: &Catalog, source: &CatalogSource) -> Result<()> {
    let issues = catalog.validate();

    println!("Catalog: {}", source);
    println!(
        "  {} packet(s), {} build-up(s)",
        catalog.packets.len(),
        catalog.buildups.len()
    );

    if issues.is_empty() {
        println!("✓ No issues found");
        return Ok(());
    }

    println!("\nIssues ({}):", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }

    anyhow::bail!("catalog has {} issue(s)", issues.len())
}
