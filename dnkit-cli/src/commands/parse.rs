use super::write_output;
use anyhow::{Context, Result};
use dnkit_core::{parse_dn, shape::dn_to_value, DnFlags};
use tracing::{debug, info};

/// Parse `dn` and emit its nested-triple JSON form
pub fn execute(dn: &str, flags: DnFlags, output: Option<&str>, pretty: bool) -> Result<()> {
    info!("Parsing DN ({} bytes, flags 0x{:04x})", dn.len(), flags.as_u32());

    let parsed = parse_dn(dn, flags).with_context(|| format!("Failed to parse DN: {:?}", dn))?;
    debug!("Parsed {} RDNs", parsed.len());

    let value = dn_to_value(&parsed);
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    write_output(output, &json)?;

    if let Some(path) = output {
        info!("Wrote {} RDNs to {}", parsed.len(), path);
    }

    Ok(())
}
