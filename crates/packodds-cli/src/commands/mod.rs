pub mod buildups;
pub mod completions;
pub mod init;
pub mod packets;
pub mod show;
pub mod ui;
pub mod validate;

use anyhow::{Context, Result};
use packodds_config::{Catalog, CatalogSource, Config, resolve_catalog};
use std::path::Path;

/// Resolve and load the active catalog, logging any problems it has
pub fn load_catalog(explicit: Option<&Path>, config: &Config) -> Result<(Catalog, CatalogSource)> {
    let cwd = std::env::current_dir()?;
    let (catalog, source) =
        resolve_catalog(explicit, config, &cwd).context("could not load packet catalog")?;

    for issue in catalog.validate() {
        tracing::warn!(%issue, catalog = %source, "catalog issue");
    }

    Ok((catalog, source))
}
