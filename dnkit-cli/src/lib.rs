//! Library entry for dnkit-cli used by integration tests and embedding.

pub mod commands;

use dnkit_core::DnFlags;

// Re-export commands for convenience
pub use commands::*;

/// DN notation selectable on the command line
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Notation {
    /// Permissive LDAP (RFC 4514 plus `;` and quoted values)
    #[default]
    Ldap,
    /// Strict RFC 4514
    V3,
    /// RFC 1779
    V2,
    /// DCE (`/dc=com/cn=x`)
    Dce,
    /// User friendly name (build only)
    Ufn,
    /// Active Directory canonical name (build only)
    Ad,
}

impl Notation {
    /// Format nibble for this notation
    pub fn format_bits(self) -> u32 {
        match self {
            Notation::Ldap => DnFlags::FORMAT_LDAP,
            Notation::V3 => DnFlags::FORMAT_LDAPV3,
            Notation::V2 => DnFlags::FORMAT_LDAPV2,
            Notation::Dce => DnFlags::FORMAT_DCE,
            Notation::Ufn => DnFlags::FORMAT_UFN,
            Notation::Ad => DnFlags::FORMAT_AD_CANONICAL,
        }
    }
}

/// Flag options shared by every subcommand
#[derive(Copy, Clone, Debug, Default, clap::Args)]
pub struct FlagArgs {
    /// DN notation
    #[arg(long, value_enum, default_value_t = Notation::Ldap, global = true)]
    pub format: Notation,

    /// Reject spaces around components and unknown escapes
    #[arg(long, global = true)]
    pub strict: bool,

    /// Raw flag bitmask, overrides --format and --strict
    #[arg(long, global = true, value_parser = parse_flag_bits)]
    pub flags: Option<u32>,
}

impl FlagArgs {
    /// Resolve to the bitmask handed to the core
    pub fn to_flags(&self) -> DnFlags {
        if let Some(raw) = self.flags {
            return DnFlags::new(raw);
        }
        let flags = DnFlags::default().with_format(self.format.format_bits());
        if self.strict {
            flags.with(DnFlags::PEDANTIC)
        } else {
            flags
        }
    }
}

/// Accept decimal or `0x`-prefixed hex
fn parse_flag_bits(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid flag bitmask {:?}: {}", s, e))
}
