// ww3rs/src/cli/render.rs

use super::load_bundle;
use std::path::Path;

/// Print every control file of a bundle, each preceded by a Fortran comment
/// line naming it.
pub fn render_bundle(config_path: &Path) -> anyhow::Result<()> {
    let (_, composition) = load_bundle(config_path)?;
    let files = composition.render_all()?;
    for (i, (name, text)) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("! {}", name);
        print!("{}", text);
    }
    Ok(())
}
