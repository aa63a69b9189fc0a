use super::{read_input, write_output};
use anyhow::{Context, Result};
use dnkit_core::{build_dn_value, DnFlags};
use tracing::info;

/// Read nested-triple JSON from `input` and render it as DN text
pub fn execute(input: &str, flags: DnFlags, output: Option<&str>) -> Result<()> {
    info!("Building DN from: {}", input);

    let text = read_input(input)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("Failed to parse JSON input")?;

    let dn = build_dn_value(&value, flags).context("Failed to build DN")?;

    write_output(output, &dn)?;

    if let Some(path) = output {
        info!("Wrote DN to {}", path);
    }

    Ok(())
}
