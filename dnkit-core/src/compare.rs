//! Splitting and comparing DNs

use crate::constants::DnFlags;
use crate::decoder::parse_dn;
use crate::error::DnError;
use crate::escape::escape_dn_chars;
use crate::types::{Ava, Dn, Rdn};
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;

#[cfg(feature = "logging")]
use tracing::trace;

fn render_ava(ava: &Ava, notypes: bool) -> String {
    let value = escape_dn_chars(&ava.value);
    if notypes {
        value
    } else {
        let mut out = String::with_capacity(ava.attr_type.len() + value.len() + 1);
        out.push_str(&ava.attr_type);
        out.push('=');
        out.push_str(&value);
        out
    }
}

fn render_rdn(rdn: &Rdn, notypes: bool) -> String {
    rdn.iter()
        .map(|ava| render_ava(ava, notypes))
        .collect::<Vec<_>>()
        .join("+")
}

/// Split a DN into its RDNs, each rendered as escaped text
///
/// With `notypes` only the values are kept (`["John Doe", "example"]`).
pub fn explode_dn(
    dn: &str,
    notypes: bool,
    flags: impl Into<DnFlags>,
) -> Result<Vec<String>, DnError> {
    if dn.is_empty() {
        return Ok(Vec::new());
    }
    let parsed = parse_dn(dn, flags)?;
    Ok(parsed.iter().map(|rdn| render_rdn(rdn, notypes)).collect())
}

/// Split the first RDN of `rdn` into its AVAs
///
/// With `notypes` the values are returned unescaped.
pub fn explode_rdn(
    rdn: &str,
    notypes: bool,
    flags: impl Into<DnFlags>,
) -> Result<Vec<String>, DnError> {
    if rdn.is_empty() {
        return Ok(Vec::new());
    }
    let parsed = parse_dn(rdn, flags)?;
    let first = match parsed.rdn() {
        Some(first) => first,
        None => return Ok(Vec::new()),
    };

    Ok(first
        .iter()
        .map(|ava| {
            if notypes {
                ava.value.clone()
            } else {
                render_ava(ava, false)
            }
        })
        .collect())
}

/// Equality of DNs with per-attribute case folding of values
///
/// Attribute types always compare case-insensitively and AVA order inside
/// an RDN is ignored. Values compare exactly unless their attribute type is
/// registered as case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct DnComparator {
    case_insensitive: HashSet<String>,
}

impl DnComparator {
    /// Comparator where every value is case-sensitive
    pub fn new() -> Self {
        Self::default()
    }

    /// Comparator with the given case-insensitive attribute types
    pub fn with_case_insensitive<I, S>(attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut comparator = Self::new();
        for attr in attrs {
            comparator.add_case_insensitive(attr.as_ref());
        }
        comparator
    }

    /// Register one more case-insensitive attribute type
    pub fn add_case_insensitive(&mut self, attr: &str) {
        self.case_insensitive.insert(attr.to_ascii_lowercase());
    }

    /// Check if values of `attr` fold case
    pub fn is_case_insensitive(&self, attr: &str) -> bool {
        self.case_insensitive.contains(&attr.to_ascii_lowercase())
    }

    /// Canonical form used for comparison
    pub fn normalize(&self, dn: &Dn) -> Vec<Vec<(String, String, u32)>> {
        dn.iter()
            .map(|rdn| {
                let mut avas: Vec<_> = rdn
                    .iter()
                    .map(|ava| {
                        let attr = ava.attr_type.to_ascii_lowercase();
                        let value = if self.case_insensitive.contains(&attr) {
                            ava.value.to_lowercase()
                        } else {
                            ava.value.clone()
                        };
                        (attr, value, ava.flags.as_u32())
                    })
                    .collect();
                avas.sort();
                avas
            })
            .collect()
    }

    /// Compare two parsed DNs
    pub fn eq_dn(&self, a: &Dn, b: &Dn) -> bool {
        a.len() == b.len() && self.normalize(a) == self.normalize(b)
    }

    /// Parse both strings with default flags and compare them
    pub fn compare(&self, a: &str, b: &str) -> Result<bool, DnError> {
        let a = parse_dn(a, DnFlags::default())?;
        let b = parse_dn(b, DnFlags::default())?;
        let equal = self.eq_dn(&a, &b);

        #[cfg(feature = "logging")]
        trace!("DN comparison of {} and {} RDNs: {}", a.len(), b.len(), equal);

        Ok(equal)
    }
}

/// Compare two DN strings; only attribute types fold case
pub fn compare_dn(a: &str, b: &str) -> Result<bool, DnError> {
    DnComparator::new().compare(a, b)
}
