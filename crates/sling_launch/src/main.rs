use anyhow::Context;
use sling_launch::config::{CONFIG_ENV, SlingConfig};

fn main() -> anyhow::Result<()> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => SlingConfig::load(&path)
            .with_context(|| format!("Failed to load {CONFIG_ENV}={}", path.to_string_lossy()))?,
        None => SlingConfig::default(),
    };
    config.validate().context("Invalid launcher config")?;

    if sling_launch::run(config).is_error() {
        anyhow::bail!("Launcher exited with an error");
    }
    Ok(())
}
