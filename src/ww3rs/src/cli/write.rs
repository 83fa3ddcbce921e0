// ww3rs/src/cli/write.rs

use super::load_bundle;
use std::path::{Path, PathBuf};

/// Where files go: the flag, else the bundle's `output_dir` (relative to the
/// bundle file), else the current directory.
pub fn resolve_output_dir(
    config_path: &Path,
    flag: Option<&Path>,
    configured: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = configured {
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        return Ok(base.join(dir));
    }
    Ok(std::env::current_dir()?)
}

/// Render and write every control file of a bundle.
pub fn write_bundle(config_path: &Path, output_dir: Option<&Path>) -> anyhow::Result<()> {
    let (config, composition) = load_bundle(config_path)?;
    let dir = resolve_output_dir(config_path, output_dir, config.output_dir())?;
    let written = composition.write_all(&dir)?;
    for path in &written {
        println!("  ✓ Wrote {}", path.display());
    }
    Ok(())
}
