use anyhow::Result;
use packodds_config::{BUILTIN_CATALOG, PROJECT_CATALOG_FILE};
use std::path::Path;

pub fn handle(force: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let path = write_catalog(&current_dir, force)?;

    println!("✓ Created {}", path.display());
    println!("  Edit it to add packets or build-ups; it is picked up from this directory and below");
    println!("  Run 'packodds validate' after editing");

    Ok(())
}

/// Write the built-in catalog into `dir`, refusing to overwrite unless `force`
pub fn write_catalog(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let path = dir.join(PROJECT_CATALOG_FILE);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists in {} (use --force to overwrite)",
            PROJECT_CATALOG_FILE,
            dir.display()
        );
    }

    std::fs::write(&path, BUILTIN_CATALOG)?;
    tracing::debug!(path = %path.display(), "wrote catalog");
    Ok(path)
}
