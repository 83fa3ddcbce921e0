// ww3rs/src/cli/check.rs

use super::load_bundle;
use std::path::Path;

/// Validate a bundle and print every finding.
///
/// Fails when any finding exists, so the process exits non-zero.
pub fn check_bundle(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let (_, composition) = load_bundle(config_path)?;
    let findings = composition.validate();

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else if findings.is_empty() {
        println!("  ✓ {} is complete and consistent", config_path.display());
    } else {
        for finding in &findings {
            println!("  ✗ {}", finding);
        }
    }

    if !findings.is_empty() {
        anyhow::bail!("{} finding(s) in {}", findings.len(), config_path.display());
    }
    Ok(())
}
