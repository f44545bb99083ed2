//! `tolka config` command

use std::path::Path;

use anyhow::Result;

use crate::OutputFormat;

pub fn execute(config_path: Option<&Path>, output: OutputFormat) -> Result<()> {
    let config = super::load_config(config_path)?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Plain => print!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}
