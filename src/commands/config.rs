//! Config command handler

use anyhow::Result;

use apkshelf::config::LoadedConfig;

pub fn cmd_config(loaded: &LoadedConfig) -> Result<()> {
    match &loaded.source {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# no config file found, using defaults"),
    }
    for warning in &loaded.warnings {
        println!("# warning: {}", warning);
    }
    print!("{}", toml::to_string_pretty(&loaded.config.redacted())?);
    Ok(())
}
