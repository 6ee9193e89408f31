//! Presets command implementation

use crate::output::OutputWriter;
use crate::output_types::PresetRow;
use anyhow::Result;
use compscope_core::models::all_presets;

pub fn execute(output: &OutputWriter) -> Result<()> {
    let presets = all_presets();

    if output.is_json() {
        output.result(&presets)?;
    } else {
        output.section("Filter Presets");
        output.table(presets.iter().map(PresetRow::from).collect());
        output.info("Apply one with `compscope analyze --preset <name>`");
    }

    Ok(())
}
