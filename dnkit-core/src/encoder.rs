//! DN building

use crate::constants::{DnFlags, DnFormat};
use crate::error::DnError;
use crate::escape::{
    escape_value, hex_value, needs_quotes, quote_value, ValueSyntax, AD_CANONICAL, DCE, RFC4514,
};
use crate::types::{Ava, Dn, Rdn};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Render a structured DN as text
///
/// The notation is chosen by the format nibble of `flags`:
/// - `FORMAT_LDAP` / `FORMAT_LDAPV3`: `cn=John Doe,dc=example,dc=com`
/// - `FORMAT_LDAPV2`: like v3, but values needing escapes are quoted
/// - `FORMAT_DCE`: `/dc=com/dc=example/cn=John Doe`
/// - `FORMAT_UFN`: `John Doe, example.com`
/// - `FORMAT_AD_CANONICAL`: `example.com/John Doe`
///
/// Every AVA is validated before any text is produced; the root DN renders
/// as the empty string in every notation.
pub fn build_dn(dn: &Dn, flags: impl Into<DnFlags>) -> Result<String, DnError> {
    let flags = flags.into();

    #[cfg(feature = "logging")]
    trace!(
        "Building DN with {} RDNs and flags 0x{:04x}",
        dn.len(),
        flags.as_u32()
    );

    let format = flags.format().ok_or_else(|| {
        DnError::param(format!(
            "Unknown DN format 0x{:02x}",
            flags.as_u32() & DnFlags::FORMAT_MASK
        ))
    })?;

    if let Err(e) = dn.validate() {
        #[cfg(feature = "logging")]
        debug!("Refusing to build DN: {:?}", e);
        return Err(e);
    }

    if dn.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::with_capacity(estimated_len(dn));
    match format {
        DnFormat::Ldap | DnFormat::LdapV3 => write_ldap(&mut out, dn),
        DnFormat::LdapV2 => write_ldapv2(&mut out, dn),
        DnFormat::Dce => write_dce(&mut out, dn),
        DnFormat::Ufn => write_ufn(&mut out, dn)?,
        DnFormat::AdCanonical => write_ad_canonical(&mut out, dn)?,
    }

    Ok(out)
}

/// Validate a loosely-typed nested-triple value and render it
///
/// Shape errors are reported as [`DnError::TypeMismatch`] before any text
/// is produced.
pub fn build_dn_value(value: &serde_json::Value, flags: impl Into<DnFlags>) -> Result<String, DnError> {
    let dn = crate::shape::dn_from_value(value)?;
    build_dn(&dn, flags)
}

fn estimated_len(dn: &Dn) -> usize {
    dn.iter()
        .flat_map(|rdn| rdn.iter())
        .map(|ava| ava.attr_type.len() + ava.value.len() + 2)
        .sum()
}

fn write_value(out: &mut String, ava: &Ava, syntax: &ValueSyntax) {
    if ava.flags.is_binary() {
        hex_value(out, &ava.value);
    } else {
        escape_value(out, &ava.value, ava.flags, syntax);
    }
}

fn write_rdn(out: &mut String, rdn: &Rdn, sep: char, syntax: &ValueSyntax) {
    for (i, ava) in rdn.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.push_str(&ava.attr_type);
        out.push('=');
        write_value(out, ava, syntax);
    }
}

fn write_ldap(out: &mut String, dn: &Dn) {
    for (i, rdn) in dn.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_rdn(out, rdn, '+', &RFC4514);
    }
}

fn write_ldapv2(out: &mut String, dn: &Dn) {
    for (i, rdn) in dn.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        for (j, ava) in rdn.iter().enumerate() {
            if j > 0 {
                out.push('+');
            }
            out.push_str(&ava.attr_type);
            out.push('=');
            if !ava.flags.is_binary() && needs_quotes(&ava.value) {
                quote_value(out, &ava.value, ava.flags);
            } else {
                write_value(out, ava, &RFC4514);
            }
        }
    }
}

fn write_dce(out: &mut String, dn: &Dn) {
    for rdn in dn.iter().rev() {
        out.push('/');
        write_rdn(out, rdn, ',', &DCE);
    }
}

/// Number of trailing single-valued `dc` RDNs
fn domain_len(dn: &Dn) -> usize {
    dn.iter()
        .rev()
        .take_while(|rdn| {
            !rdn.is_multi_valued() && rdn.first().attr_type.eq_ignore_ascii_case("dc")
        })
        .count()
}

/// Dotted domain from `dc` RDNs; a label must be non-empty and free of `.`
fn write_domain(out: &mut String, rdns: &[Rdn], syntax: &ValueSyntax) -> Result<(), DnError> {
    for (i, rdn) in rdns.iter().enumerate() {
        let ava = rdn.first();
        if !ava.flags.is_binary() && (ava.value.is_empty() || ava.value.contains('.')) {
            return Err(DnError::encoding(format!(
                "Domain component {:?} cannot be written as a domain label",
                ava.value
            )));
        }
        if i > 0 {
            out.push('.');
        }
        write_value(out, ava, syntax);
    }
    Ok(())
}

fn write_values(out: &mut String, rdn: &Rdn, sep: &str, syntax: &ValueSyntax) {
    for (i, ava) in rdn.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        write_value(out, ava, syntax);
    }
}

fn write_ufn(out: &mut String, dn: &Dn) -> Result<(), DnError> {
    let split = dn.len() - domain_len(dn);
    let (leaf, domain) = dn.rdns().split_at(split);

    for (i, rdn) in leaf.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_values(out, rdn, " + ", &RFC4514);
    }

    if !domain.is_empty() {
        if !leaf.is_empty() {
            out.push_str(", ");
        }
        write_domain(out, domain, &RFC4514)?;
    }

    Ok(())
}

fn write_ad_canonical(out: &mut String, dn: &Dn) -> Result<(), DnError> {
    let split = dn.len() - domain_len(dn);
    let (leaf, domain) = dn.rdns().split_at(split);

    if domain.is_empty() {
        return Err(DnError::encoding(
            "Active Directory canonical names need a dc= domain suffix",
        ));
    }

    write_domain(out, domain, &AD_CANONICAL)?;
    out.push('/');

    let leaf: Vec<&Rdn> = leaf.iter().rev().collect();
    for (i, rdn) in leaf.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        write_values(out, rdn, "+", &AD_CANONICAL);
    }

    Ok(())
}
