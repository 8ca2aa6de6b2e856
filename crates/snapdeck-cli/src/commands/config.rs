use std::path::Path;

use anyhow::Result;

use snapdeck_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            AppConfig::default().save_to(path)?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println!("# {}", path.display());
    if !path.exists() {
        println!("# (not found, showing defaults)");
    }
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
