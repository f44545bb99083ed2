//! `tolka translate` command

use std::path::Path;

use anyhow::{anyhow, Result};
use tolka_core::runtime::{AutoTranslateRequest, TranslateRequest};
use tolka_core::{extract_translated_text, Request};

use crate::OutputFormat;

pub async fn execute(
    text: String,
    from: String,
    to: String,
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let linger = config.entry_linger();
    let handle = super::start_broker(config);

    // "--from auto" reroutes through language detection
    let request = if from == "auto" {
        Request::AutoDetect(AutoTranslateRequest::new(&text).with_target_lang(&to))
    } else {
        Request::Translate(
            TranslateRequest::new(&text)
                .with_source_lang(&from)
                .with_target_lang(&to),
        )
    };

    let reply = super::run_request(&handle, &request, linger, quiet).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
        OutputFormat::Plain => {
            let translated = extract_translated_text(&reply)
                .ok_or_else(|| anyhow!("reply contained no translated text"))?;
            println!("{translated}");
        }
    }

    Ok(())
}
