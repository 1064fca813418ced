use anyhow::{Context, Result};
use scribe_core::config::ClientConfig;
use scribe_infrastructure::ConfigStorage;

pub fn show() -> Result<()> {
    let storage = ConfigStorage::new()?;
    let config = storage.load()?;

    println!("# {}", storage.path().display());
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to render config")?
    );

    Ok(())
}

pub fn init() -> Result<()> {
    let storage = ConfigStorage::new()?;
    if storage.path().exists() {
        println!("Config already exists at {}.", storage.path().display());
        return Ok(());
    }

    storage.save(&ClientConfig::default())?;
    println!("✅ Wrote default config to {}", storage.path().display());

    Ok(())
}
