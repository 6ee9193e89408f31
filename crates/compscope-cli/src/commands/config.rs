//! Config command implementation

use crate::cli::ConfigArgs;
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigRow};
use anyhow::{bail, Result};
use std::path::Path;

pub fn execute(args: ConfigArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let inspection_map = load_config(config_path)?.to_inspection_map();

    let mut entries: Vec<ConfigEntry> = inspection_map
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry { key, value, source: format!("{:?}", source) })
        .collect();

    // Sort by key for consistent output
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    if let Some(key) = args.key {
        let Some(entry) = entries.into_iter().find(|entry| entry.key == key) else {
            bail!("Unknown configuration key '{}'", key);
        };

        if output.is_json() {
            output.result(entry)?;
        } else {
            output.kv(&entry.key, format!("{} ({})", entry.value, entry.source));
        }
        return Ok(());
    }

    if output.is_json() {
        output.result(entries)?;
    } else {
        output.section("Configuration Values");
        output.table(
            entries
                .into_iter()
                .map(|entry| ConfigRow { key: entry.key, value: entry.value, source: entry.source })
                .collect(),
        );

        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
