//! Flag values, result codes and character classes for DN processing

use serde::{Deserialize, Serialize};

/// Result code: operation succeeded
pub const LDAP_SUCCESS: i32 = 0x00;

/// Result code: the DN text does not follow the DN grammar
pub const LDAP_INVALID_DN_SYNTAX: i32 = 0x22;

/// Result code: a structured DN could not be rendered
pub const LDAP_ENCODING_ERROR: i32 = -3;

/// Result code: decoded bytes are not valid UTF-8
pub const LDAP_DECODING_ERROR: i32 = -4;

/// Result code: bad flag or argument
pub const LDAP_PARAM_ERROR: i32 = -9;

/// Result code: allocation failure
pub const LDAP_NO_MEMORY: i32 = -10;

/// Human readable message for a result code
pub const fn result_code_message(code: i32) -> &'static str {
    match code {
        LDAP_SUCCESS => "Success",
        LDAP_INVALID_DN_SYNTAX => "Invalid DN syntax",
        LDAP_ENCODING_ERROR => "Encoding error",
        LDAP_DECODING_ERROR => "Decoding error",
        LDAP_PARAM_ERROR => "Bad parameter to an ldap routine",
        LDAP_NO_MEMORY => "Out of memory",
        _ => "Unknown error",
    }
}

/// Characters that always need a backslash inside an RFC 4514 value
pub const SPECIAL_CHARS: &[u8; 8] = b",+\"\\<>;=";

/// Characters escaped inside a DCE value
pub const DCE_SPECIAL_CHARS: &[u8; 4] = b"/,=\\";

/// Encoding variant of a single AVA value (stored as a plain integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvaFlags(u32);

impl AvaFlags {
    /// No encoding recorded
    pub const NULL: u32 = 0x0000;

    /// Plain string value
    pub const STRING: u32 = 0x0001;

    /// Value given as `#` followed by hex digits
    pub const BINARY: u32 = 0x0002;

    /// Value contains bytes outside printable ASCII that were hex-escaped
    pub const NONPRINTABLE: u32 = 0x0004;

    /// Internal: the attribute type buffer is owned by the AVA
    pub const FREE_ATTR: u32 = 0x0010;

    /// Internal: the value buffer is owned by the AVA
    pub const FREE_VALUE: u32 = 0x0020;

    /// Bits a caller is allowed to observe
    pub const PUBLIC_MASK: u32 = !(Self::FREE_ATTR | Self::FREE_VALUE);

    /// Create new flags from a raw integer
    pub const fn new(flags: u32) -> Self {
        Self(flags)
    }

    /// Plain string encoding
    pub const fn string() -> Self {
        Self(Self::STRING)
    }

    /// Binary (hex string) encoding
    pub const fn binary() -> Self {
        Self(Self::BINARY)
    }

    /// Hex-escaped non-printable encoding
    pub const fn nonprintable() -> Self {
        Self(Self::NONPRINTABLE)
    }

    /// Get the raw integer
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Strip internal ownership markers
    pub const fn public(self) -> Self {
        Self(self.0 & Self::PUBLIC_MASK)
    }

    /// Check if the value is written as a hex string
    pub const fn is_binary(&self) -> bool {
        (self.0 & Self::BINARY) != 0
    }

    /// Check if non-printable bytes are hex-escaped
    pub const fn is_nonprintable(&self) -> bool {
        (self.0 & Self::NONPRINTABLE) != 0
    }
}

impl Default for AvaFlags {
    fn default() -> Self {
        Self(Self::STRING)
    }
}

impl From<u32> for AvaFlags {
    fn from(flags: u32) -> Self {
        Self(flags)
    }
}

/// Textual notation selected by the format nibble of [`DnFlags`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnFormat {
    /// Permissive LDAP: RFC 4514 plus `;` separators and quoted values
    Ldap,
    /// Strict RFC 4514
    LdapV3,
    /// RFC 1779 style
    LdapV2,
    /// DCE notation (`/o=foo/cn=bar`)
    Dce,
    /// User friendly name (build only)
    Ufn,
    /// Active Directory canonical name (build only)
    AdCanonical,
}

impl DnFormat {
    /// Whether the parser understands this notation
    pub const fn is_parseable(&self) -> bool {
        !matches!(self, DnFormat::Ufn | DnFormat::AdCanonical)
    }
}

/// Flag bitmask handed to `parse_dn` / `build_dn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DnFlags(u32);

impl DnFlags {
    /// Permissive LDAP notation
    pub const FORMAT_LDAP: u32 = 0x0000;

    /// Strict RFC 4514
    pub const FORMAT_LDAPV3: u32 = 0x0010;

    /// RFC 1779
    pub const FORMAT_LDAPV2: u32 = 0x0020;

    /// DCE
    pub const FORMAT_DCE: u32 = 0x0030;

    /// User friendly name
    pub const FORMAT_UFN: u32 = 0x0040;

    /// Active Directory canonical
    pub const FORMAT_AD_CANONICAL: u32 = 0x0050;

    /// Bits selecting the notation
    pub const FORMAT_MASK: u32 = 0x00F0;

    /// Reject spaces around RDNs, AVAs and `=`
    pub const P_NOLEADTRAILSPACES: u32 = 0x1000;

    /// Reject a space after an RDN separator
    pub const P_NOSPACEAFTERRDN: u32 = 0x2000;

    /// All strictness bits
    pub const PEDANTIC: u32 = 0xF000;

    /// Create new flags from a raw integer
    pub const fn new(flags: u32) -> Self {
        Self(flags)
    }

    /// Get the raw integer
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Add bits
    pub const fn with(self, bits: u32) -> Self {
        Self(self.0 | bits)
    }

    /// Replace the format nibble
    pub const fn with_format(self, format: u32) -> Self {
        Self((self.0 & !Self::FORMAT_MASK) | (format & Self::FORMAT_MASK))
    }

    /// Decode the format nibble; `None` for values no notation is assigned to
    pub const fn format(&self) -> Option<DnFormat> {
        match self.0 & Self::FORMAT_MASK {
            Self::FORMAT_LDAP => Some(DnFormat::Ldap),
            Self::FORMAT_LDAPV3 => Some(DnFormat::LdapV3),
            Self::FORMAT_LDAPV2 => Some(DnFormat::LdapV2),
            Self::FORMAT_DCE => Some(DnFormat::Dce),
            Self::FORMAT_UFN => Some(DnFormat::Ufn),
            Self::FORMAT_AD_CANONICAL => Some(DnFormat::AdCanonical),
            _ => None,
        }
    }

    /// Check if spaces around components are rejected
    pub const fn no_lead_trail_spaces(&self) -> bool {
        (self.0 & Self::P_NOLEADTRAILSPACES) != 0
    }

    /// Check if a space after an RDN separator is rejected
    pub const fn no_space_after_rdn(&self) -> bool {
        (self.0 & Self::P_NOSPACEAFTERRDN) != 0
    }

    /// Check if every strictness bit is set
    pub const fn is_pedantic(&self) -> bool {
        (self.0 & Self::PEDANTIC) == Self::PEDANTIC
    }
}

impl Default for DnFlags {
    fn default() -> Self {
        Self(Self::FORMAT_LDAP)
    }
}

impl From<u32> for DnFlags {
    fn from(flags: u32) -> Self {
        Self(flags)
    }
}

/// Printable ASCII (space through tilde)
pub(crate) const fn is_printable_ascii(b: u8) -> bool {
    matches!(b, 0x20..=0x7e)
}
