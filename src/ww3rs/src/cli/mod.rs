// ww3rs/src/cli/mod.rs

pub mod check;
pub mod render;
pub mod write;

pub use check::check_bundle;
pub use render::render_bundle;
pub use write::write_bundle;

use crate::config::BundleConfig;
use anyhow::Context;
use std::path::Path;
use ww3nml::Composition;

/// Load a bundle file and register all of its roles.
pub fn load_bundle(config_path: &Path) -> anyhow::Result<(BundleConfig, Composition)> {
    let config = BundleConfig::try_from(config_path)?;
    let composition = config
        .into_composition()
        .context(format!("Error loading bundle {}", config_path.display()))?;
    Ok((config, composition))
}
