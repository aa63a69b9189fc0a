use anyhow::{Context, Result};
use colored::*;
use dnkit_core::{parse_dn, DnComparator, DnFlags};
use tracing::debug;

/// Compare two DNs, folding case for the values of `ignore_case` attributes
///
/// Returns whether the names are equal.
pub fn execute(a: &str, b: &str, flags: DnFlags, ignore_case: &[String]) -> Result<bool> {
    let comparator = DnComparator::with_case_insensitive(ignore_case);

    let left = parse_dn(a, flags).with_context(|| format!("Failed to parse DN: {:?}", a))?;
    let right = parse_dn(b, flags).with_context(|| format!("Failed to parse DN: {:?}", b))?;
    debug!(
        "Comparing {} and {} RDNs, case-insensitive: {:?}",
        left.len(),
        right.len(),
        ignore_case
    );

    let equal = comparator.eq_dn(&left, &right);
    if equal {
        println!("{} DNs are equal", "✓".green());
    } else {
        println!("{} DNs differ", "✗".red());
    }

    Ok(equal)
}
