//! Core types for distinguished names

use crate::constants::{AvaFlags, DnFlags};
use crate::error::DnError;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Attribute-Value Assertion: one `type=value` pair inside an RDN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String, AvaFlags)", into = "(String, String, AvaFlags)")]
pub struct Ava {
    /// Descriptor (`cn`) or numeric OID (`2.5.4.3`)
    pub attr_type: String,

    /// Decoded (unescaped) value
    pub value: String,

    /// Encoding variant of the value
    pub flags: AvaFlags,
}

impl Ava {
    /// Create a plain string AVA
    pub fn new(attr_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_flags(attr_type, value, AvaFlags::string())
    }

    /// Create an AVA whose value is written as a `#` hex string
    pub fn binary(attr_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_flags(attr_type, value, AvaFlags::binary())
    }

    /// Create an AVA with explicit flags; internal ownership bits are dropped
    pub fn with_flags(
        attr_type: impl Into<String>,
        value: impl Into<String>,
        flags: AvaFlags,
    ) -> Self {
        Self {
            attr_type: attr_type.into(),
            value: value.into(),
            flags: flags.public(),
        }
    }

    /// Validate the AVA before it is rendered
    pub fn validate(&self) -> Result<(), DnError> {
        if !is_valid_attr_type(&self.attr_type) {
            return Err(DnError::encoding(format!(
                "Invalid attribute type {:?}",
                self.attr_type
            )));
        }

        if self.flags.is_binary() && self.value.is_empty() {
            return Err(DnError::encoding(format!(
                "Binary value of {} is empty",
                self.attr_type
            )));
        }

        Ok(())
    }

    /// The `(type, value, flags)` triple
    pub fn to_triple(&self) -> (String, String, u32) {
        (
            self.attr_type.clone(),
            self.value.clone(),
            self.flags.public().as_u32(),
        )
    }
}

impl From<(String, String, AvaFlags)> for Ava {
    fn from((attr_type, value, flags): (String, String, AvaFlags)) -> Self {
        Self::with_flags(attr_type, value, flags)
    }
}

impl From<Ava> for (String, String, AvaFlags) {
    fn from(ava: Ava) -> Self {
        (ava.attr_type, ava.value, ava.flags.public())
    }
}

/// Relative Distinguished Name: a non-empty, ordered set of AVAs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Ava>", into = "Vec<Ava>")]
pub struct Rdn {
    avas: Vec<Ava>,
}

impl Rdn {
    /// Create an RDN; fails if `avas` is empty
    pub fn new(avas: Vec<Ava>) -> Result<Self, DnError> {
        if avas.is_empty() {
            return Err(DnError::encoding("RDN contains no AVA"));
        }
        Ok(Self { avas })
    }

    /// Single-valued RDN
    pub fn single(ava: Ava) -> Self {
        Self {
            avas: alloc::vec![ava],
        }
    }

    /// AVAs in order
    pub fn avas(&self) -> &[Ava] {
        &self.avas
    }

    /// Number of AVAs
    pub fn len(&self) -> usize {
        self.avas.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.avas.is_empty()
    }

    /// Check if this RDN has more than one AVA
    pub fn is_multi_valued(&self) -> bool {
        self.avas.len() > 1
    }

    /// Iterate over the AVAs
    pub fn iter(&self) -> core::slice::Iter<'_, Ava> {
        self.avas.iter()
    }

    /// First AVA of the RDN
    pub fn first(&self) -> &Ava {
        &self.avas[0]
    }
}

impl TryFrom<Vec<Ava>> for Rdn {
    type Error = DnError;

    fn try_from(avas: Vec<Ava>) -> Result<Self, Self::Error> {
        Rdn::new(avas)
    }
}

impl From<Rdn> for Vec<Ava> {
    fn from(rdn: Rdn) -> Self {
        rdn.avas
    }
}

impl<'a> IntoIterator for &'a Rdn {
    type Item = &'a Ava;
    type IntoIter = core::slice::Iter<'a, Ava>;

    fn into_iter(self) -> Self::IntoIter {
        self.avas.iter()
    }
}

/// Distinguished Name: RDNs ordered most-specific first
///
/// The empty sequence is the root DN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dn {
    rdns: Vec<Rdn>,
}

impl Dn {
    /// Create a DN from its RDNs
    pub fn new(rdns: Vec<Rdn>) -> Self {
        Self { rdns }
    }

    /// The root DN
    pub fn root() -> Self {
        Self { rdns: Vec::new() }
    }

    /// Build from `(type, value, flags)` triples
    pub fn from_triples<I, R>(rdns: I) -> Result<Self, DnError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (String, String, u32)>,
    {
        let rdns = rdns
            .into_iter()
            .map(|rdn| {
                Rdn::new(
                    rdn.into_iter()
                        .map(|(t, v, f)| Ava::with_flags(t, v, AvaFlags::new(f)))
                        .collect(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rdns })
    }

    /// Nested `(type, value, flags)` triples
    pub fn to_triples(&self) -> Vec<Vec<(String, String, u32)>> {
        self.rdns
            .iter()
            .map(|rdn| rdn.iter().map(Ava::to_triple).collect())
            .collect()
    }

    /// RDNs in order
    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// Number of RDNs
    pub fn len(&self) -> usize {
        self.rdns.len()
    }

    /// Check if this is the root DN
    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Iterate over the RDNs
    pub fn iter(&self) -> core::slice::Iter<'_, Rdn> {
        self.rdns.iter()
    }

    /// Most-specific RDN
    pub fn rdn(&self) -> Option<&Rdn> {
        self.rdns.first()
    }

    /// DN of the parent entry; `None` for the root DN
    pub fn parent(&self) -> Option<Dn> {
        if self.rdns.is_empty() {
            return None;
        }
        Some(Self {
            rdns: self.rdns[1..].to_vec(),
        })
    }

    /// Check if `self` lies at or below `base`
    pub fn is_descendant_of(&self, base: &Dn) -> bool {
        self.rdns.len() >= base.rdns.len()
            && self.rdns[self.rdns.len() - base.rdns.len()..] == base.rdns[..]
    }

    /// Validate every AVA before rendering
    pub fn validate(&self) -> Result<(), DnError> {
        for rdn in &self.rdns {
            if rdn.is_empty() {
                return Err(DnError::encoding("RDN contains no AVA"));
            }
            for ava in rdn {
                ava.validate()?;
            }
        }
        Ok(())
    }

    /// Render with the given flags
    pub fn to_text(&self, flags: impl Into<DnFlags>) -> Result<String, DnError> {
        crate::encoder::build_dn(self, flags)
    }
}

/// LDAPv3 text; a DN that fails validation reports `fmt::Error`, so prefer
/// [`Dn::to_text`] for DNs that were not produced by the parser
impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .to_text(DnFlags::FORMAT_LDAPV3)
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Dn {
    type Err = DnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::decoder::parse_dn(s, DnFlags::default())
    }
}

impl<'a> IntoIterator for &'a Dn {
    type Item = &'a Rdn;
    type IntoIter = core::slice::Iter<'a, Rdn>;

    fn into_iter(self) -> Self::IntoIter {
        self.rdns.iter()
    }
}

/// Builder for constructing DNs in code
#[derive(Debug, Default)]
pub struct DnBuilder {
    rdns: Vec<Vec<Ava>>,
}

impl DnBuilder {
    /// Create a new, empty DN builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single-valued RDN
    pub fn ava(mut self, attr_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.rdns.push(alloc::vec![Ava::new(attr_type, value)]);
        self
    }

    /// Append an RDN made of the given AVAs
    pub fn rdn(mut self, avas: impl IntoIterator<Item = Ava>) -> Self {
        self.rdns.push(avas.into_iter().collect());
        self
    }

    /// Append every RDN of `suffix`
    pub fn suffix(mut self, suffix: &Dn) -> Self {
        self.rdns
            .extend(suffix.iter().map(|rdn| rdn.avas().to_vec()));
        self
    }

    /// Build the DN struct
    pub fn build(self) -> Result<Dn, DnError> {
        let rdns = self
            .rdns
            .into_iter()
            .map(Rdn::new)
            .collect::<Result<Vec<_>, _>>()?;
        let dn = Dn::new(rdns);
        dn.validate()?;
        Ok(dn)
    }
}

/// Check if `s` is a descriptor (`cn`, `userPassword`) or a numeric OID (`2.5.4.3`)
pub fn is_valid_attr_type(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() => bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-'),
        Some(b) if b.is_ascii_digit() => {
            let mut arcs = 0;
            for arc in s.split('.') {
                if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                    return false;
                }
                arcs += 1;
            }
            arcs >= 2
        }
        _ => false,
    }
}
