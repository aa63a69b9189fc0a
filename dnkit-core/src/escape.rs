//! Value escaping shared by the parser and the builder

use crate::constants::{is_printable_ascii, AvaFlags, DCE_SPECIAL_CHARS, SPECIAL_CHARS};
use alloc::string::String;

/// Which characters a notation protects with a backslash
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValueSyntax {
    /// Bytes that are always escaped
    pub specials: &'static [u8],
    /// Escape a leading `#`
    pub lead_hash: bool,
    /// Escape leading and trailing spaces
    pub edge_spaces: bool,
}

/// RFC 4514 (also used for LDAPv2 unquoted values and UFN)
pub(crate) const RFC4514: ValueSyntax = ValueSyntax {
    specials: SPECIAL_CHARS,
    lead_hash: true,
    edge_spaces: true,
};

/// DCE: spaces are significant, `/` separates RDNs
pub(crate) const DCE: ValueSyntax = ValueSyntax {
    specials: DCE_SPECIAL_CHARS,
    lead_hash: true,
    edge_spaces: false,
};

/// Active Directory canonical names only protect the path separator
pub(crate) const AD_CANONICAL: ValueSyntax = ValueSyntax {
    specials: b"/\\",
    lead_hash: false,
    edge_spaces: false,
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn push_hex_pair(out: &mut String, b: u8) {
    out.push('\\');
    out.push(HEX_DIGITS[(b >> 4) as usize] as char);
    out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
}

/// Append `value` to `out`, escaped for `syntax`
///
/// With `NONPRINTABLE` every byte outside printable ASCII becomes a `\xx`
/// pair; otherwise such characters are copied as-is and NUL is written as a
/// backslash followed by a literal NUL.
pub(crate) fn escape_value(out: &mut String, value: &str, flags: AvaFlags, syntax: &ValueSyntax) {
    let last = value.len().saturating_sub(1);

    for (i, c) in value.char_indices() {
        if c == '\0' {
            if flags.is_nonprintable() {
                push_hex_pair(out, 0);
            } else {
                out.push('\\');
                out.push('\0');
            }
        } else if (c.is_ascii() && syntax.specials.contains(&(c as u8)))
            || (i == 0 && ((c == '#' && syntax.lead_hash) || (c == ' ' && syntax.edge_spaces)))
        {
            out.push('\\');
            out.push(c);
        } else if i == last && c == ' ' && syntax.edge_spaces {
            out.push_str("\\ ");
        } else if flags.is_nonprintable() && !(c.is_ascii() && is_printable_ascii(c as u8)) {
            let mut utf8 = [0u8; 4];
            for b in c.encode_utf8(&mut utf8).bytes() {
                push_hex_pair(out, b);
            }
        } else {
            out.push(c);
        }
    }
}

/// Append `value` as an RFC 1779 quoted string
pub(crate) fn quote_value(out: &mut String, value: &str, flags: AvaFlags) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ if flags.is_nonprintable() && !(c.is_ascii() && is_printable_ascii(c as u8)) => {
                let mut utf8 = [0u8; 4];
                for b in c.encode_utf8(&mut utf8).bytes() {
                    push_hex_pair(out, b);
                }
            }
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Check if an LDAPv2 value must be quoted
pub(crate) fn needs_quotes(value: &str) -> bool {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b' ' | b'#'), _) | (_, Some(b' ')) => true,
        _ => bytes
            .iter()
            .any(|b| *b == 0 || SPECIAL_CHARS.contains(b)),
    }
}

/// Append `value` as `#` followed by the lowercase hex of its bytes
pub(crate) fn hex_value(out: &mut String, value: &str) {
    out.push('#');
    out.push_str(&hex::encode(value.as_bytes()));
}

/// Escape all DN special characters in a single attribute value (RFC 4514, section 2.4)
///
/// ```
/// use dnkit_core::escape::escape_dn_chars;
///
/// assert_eq!(escape_dn_chars("Doe, John"), "Doe\\, John");
/// assert_eq!(escape_dn_chars("#1 "), "\\#1\\ ");
/// ```
pub fn escape_dn_chars(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    escape_value(&mut out, value, AvaFlags::string(), &RFC4514);
    out
}
