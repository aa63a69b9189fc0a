use super::write_output;
use anyhow::{Context, Result};
use dnkit_core::{explode_dn, explode_rdn, DnFlags};
use tracing::info;

/// Split `dn` into RDNs (or the first RDN into AVAs), one per line
pub fn execute(
    dn: &str,
    flags: DnFlags,
    notypes: bool,
    rdn_only: bool,
    output: Option<&str>,
) -> Result<()> {
    let parts = if rdn_only {
        explode_rdn(dn, notypes, flags)
    } else {
        explode_dn(dn, notypes, flags)
    }
    .with_context(|| format!("Failed to explode DN: {:?}", dn))?;

    info!("Exploded into {} components", parts.len());

    write_output(output, &parts.join("\n"))
}
