//! `httpres config` – show config path and effective values.

use anyhow::Result;
use httpres_core::config::{self, HttpresConfig};

pub fn run_config(cfg: &HttpresConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
