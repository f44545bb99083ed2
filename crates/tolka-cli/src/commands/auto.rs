//! `tolka auto` command

use std::path::Path;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tolka_core::runtime::AutoTranslateRequest;
use tolka_core::{extract_translated_text, Request};

use crate::OutputFormat;

pub async fn execute(
    text: String,
    to: String,
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let linger = config.entry_linger();
    let handle = super::start_broker(config);

    let request = Request::AutoDetect(AutoTranslateRequest::new(&text).with_target_lang(&to));
    let reply = super::run_request(&handle, &request, linger, quiet).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
        OutputFormat::Plain => {
            if !quiet {
                eprintln!(
                    "Detected language: {} ({})",
                    field(&reply, "detected_language"),
                    field(&reply, "mapped_source_code"),
                );
            }
            let translated = extract_translated_text(&reply)
                .ok_or_else(|| anyhow!("reply contained no translated text"))?;
            println!("{translated}");
        }
    }

    Ok(())
}

fn field<'a>(reply: &'a Value, key: &str) -> &'a str {
    reply.get(key).and_then(Value::as_str).unwrap_or("?")
}
