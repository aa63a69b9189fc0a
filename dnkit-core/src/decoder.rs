//! DN parsing

use crate::constants::{
    is_printable_ascii, AvaFlags, DnFlags, DnFormat, DCE_SPECIAL_CHARS, LDAP_DECODING_ERROR,
    SPECIAL_CHARS,
};
use crate::error::DnError;
use crate::types::{Ava, Dn, Rdn};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Parse DN text into a structured [`Dn`]
///
/// `input` is treated as UTF-8 with an explicit length, so embedded NUL
/// bytes are allowed inside values. `flags` selects the notation
/// (`DnFlags::FORMAT_*`) and strictness bits. Empty input is the root DN.
///
/// Returns a [`DnError::Syntax`] carrying the byte offset of the first
/// offending byte, or a [`DnError::Engine`] for flags that select a
/// notation that cannot be parsed.
pub fn parse_dn(input: impl AsRef<[u8]>, flags: impl Into<DnFlags>) -> Result<Dn, DnError> {
    let input = input.as_ref();
    let flags = flags.into();

    #[cfg(feature = "logging")]
    trace!(
        "Parsing {} byte DN with flags 0x{:04x}",
        input.len(),
        flags.as_u32()
    );

    let format = flags.format().ok_or_else(|| {
        DnError::param(format!(
            "Unknown DN format 0x{:02x}",
            flags.as_u32() & DnFlags::FORMAT_MASK
        ))
    })?;

    if !format.is_parseable() {
        return Err(DnError::param(format!("{:?} names cannot be parsed", format)));
    }

    let result = Parser::new(input, flags, format).parse();

    #[cfg(feature = "logging")]
    {
        match &result {
            Ok(dn) => trace!("Parsed DN with {} RDNs", dn.len()),
            Err(e) => debug!("Rejected DN: {:?}", e),
        }
    }

    result
}

/// Check if `input` parses as a DN with `flags`
pub fn is_dn(input: impl AsRef<[u8]>, flags: impl Into<DnFlags>) -> bool {
    parse_dn(input, flags).is_ok()
}

/// Cursor over the raw DN bytes
struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    flags: DnFlags,
    format: DnFormat,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], flags: DnFlags, format: DnFormat) -> Self {
        Self {
            input,
            pos: 0,
            flags,
            format,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn parse(mut self) -> Result<Dn, DnError> {
        if self.input.is_empty() {
            return Ok(Dn::root());
        }

        match self.format {
            DnFormat::Dce => self.parse_dce(),
            _ => self.parse_ldap(),
        }
    }

    /// `RDN (',' RDN)*`, with `;` as an alternate separator outside strict v3
    fn parse_ldap(&mut self) -> Result<Dn, DnError> {
        if !self.flags.no_lead_trail_spaces() && self.input.iter().all(|b| *b == b' ') {
            return Ok(Dn::root());
        }

        let mut rdns = Vec::new();
        loop {
            rdns.push(self.parse_rdn()?);

            match self.peek() {
                None => break,
                Some(b',') => self.pos += 1,
                Some(b';') if self.format != DnFormat::LdapV3 => self.pos += 1,
                Some(b) => {
                    return Err(DnError::syntax(
                        self.pos,
                        format!("Unexpected character {:?} after RDN", b as char),
                    ))
                }
            }

            if self.flags.no_space_after_rdn() && self.peek() == Some(b' ') {
                return Err(DnError::syntax(self.pos, "Space after RDN separator"));
            }
        }

        Ok(Dn::new(rdns))
    }

    /// `AVA ('+' AVA)*`
    fn parse_rdn(&mut self) -> Result<Rdn, DnError> {
        let mut avas = alloc::vec![self.parse_ava()?];
        while self.peek() == Some(b'+') {
            self.pos += 1;
            avas.push(self.parse_ava()?);
        }
        Rdn::new(avas)
    }

    /// `AttributeType '=' AttributeValue`
    fn parse_ava(&mut self) -> Result<Ava, DnError> {
        self.skip_spaces()?;
        let attr_type = self.parse_type()?;
        self.skip_spaces()?;

        if self.peek() != Some(b'=') {
            return Err(DnError::syntax(self.pos, "Expected '=' after attribute type"));
        }
        self.pos += 1;

        self.skip_spaces()?;
        let (value, flags) = self.parse_value()?;

        Ok(Ava::with_flags(attr_type, value, flags))
    }

    fn skip_spaces(&mut self) -> Result<(), DnError> {
        if self.format == DnFormat::Dce {
            return Ok(());
        }
        if self.peek() == Some(b' ') && self.flags.no_lead_trail_spaces() {
            return Err(DnError::syntax(self.pos, "Unexpected space"));
        }
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
        Ok(())
    }

    /// Descriptor or numeric OID; an `OID.` prefix is dropped outside strict v3
    fn parse_type(&mut self) -> Result<String, DnError> {
        if matches!(self.format, DnFormat::Ldap | DnFormat::LdapV2) {
            let rest = &self.input[self.pos..];
            if rest.len() > 4
                && rest[..4].eq_ignore_ascii_case(b"oid.")
                && rest[4].is_ascii_digit()
            {
                self.pos += 4;
            }
        }

        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => {
                while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'-') {
                    self.pos += 1;
                }
            }
            Some(b) if b.is_ascii_digit() => {
                let mut arcs = 0;
                loop {
                    if !matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                        return Err(DnError::syntax(self.pos, "Malformed numeric OID"));
                    }
                    while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                        self.pos += 1;
                    }
                    arcs += 1;
                    if self.peek() != Some(b'.') {
                        break;
                    }
                    self.pos += 1;
                }
                if arcs < 2 {
                    return Err(DnError::syntax(start, "Malformed numeric OID"));
                }
            }
            _ => return Err(DnError::syntax(self.pos, "Attribute type expected")),
        }

        Ok(self.input[start..self.pos].iter().map(|&b| b as char).collect())
    }

    fn parse_value(&mut self) -> Result<(String, AvaFlags), DnError> {
        match self.peek() {
            Some(b'#') => self.parse_hex_value(),
            Some(b'"') if matches!(self.format, DnFormat::Ldap | DnFormat::LdapV2) => {
                self.parse_quoted_value()
            }
            Some(b'"') if self.format == DnFormat::LdapV3 => Err(DnError::syntax(
                self.pos,
                "Quoted values are not allowed in LDAPv3 names",
            )),
            _ => self.parse_plain_value(),
        }
    }

    fn is_value_end(&self, b: u8) -> bool {
        match self.format {
            DnFormat::Dce => b == b'/' || b == b',',
            DnFormat::LdapV3 => b == b',' || b == b'+',
            _ => b == b',' || b == b'+' || b == b';',
        }
    }

    /// `'#' hexstring`
    fn parse_hex_value(&mut self) -> Result<(String, AvaFlags), DnError> {
        let digits_start = self.pos + 1;
        let mut end = digits_start;
        while let Some(&b) = self.input.get(end) {
            if b == b' ' || self.is_value_end(b) {
                break;
            }
            end += 1;
        }

        let digits = &self.input[digits_start..end];
        if digits.is_empty() {
            return Err(DnError::syntax(digits_start, "Hex string expected after '#'"));
        }

        let bytes = hex::decode(digits).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                DnError::syntax(digits_start + index, format!("Invalid hex digit {:?}", c))
            }
            hex::FromHexError::OddLength => DnError::syntax(end, "Odd number of hex digits"),
            other => DnError::syntax(digits_start, format!("{}", other)),
        })?;

        self.pos = end;
        self.finish_value()?;

        let value = decode_utf8(bytes, digits_start)?;
        Ok((value, AvaFlags::binary()))
    }

    /// `'"' ... '"'`; separators inside the quotes are literal
    fn parse_quoted_value(&mut self) -> Result<(String, AvaFlags), DnError> {
        let open = self.pos;
        self.pos += 1;

        let mut buf = Vec::new();
        let mut nonprintable = false;
        loop {
            let rest = &self.input[self.pos..];
            match memchr::memchr2(b'"', b'\\', rest) {
                None => return Err(DnError::syntax(open, "Unterminated quoted value")),
                Some(i) => {
                    buf.extend_from_slice(&rest[..i]);
                    self.pos += i;
                    if self.input[self.pos] == b'"' {
                        self.pos += 1;
                        break;
                    }
                    self.unescape(&mut buf, &mut nonprintable)?;
                }
            }
        }

        self.finish_value()?;

        let value = decode_utf8(buf, open + 1)?;
        Ok((value, value_flags(nonprintable)))
    }

    /// Plain value with backslash escapes; unescaped trailing spaces are dropped
    fn parse_plain_value(&mut self) -> Result<(String, AvaFlags), DnError> {
        let start = self.pos;
        let mut buf = Vec::new();
        let mut nonprintable = false;
        // Length of `buf` up to the last byte that is not an unescaped space
        let mut keep = 0;

        while let Some(b) = self.peek() {
            if self.is_value_end(b) {
                break;
            }
            match b {
                b'\\' => {
                    self.unescape(&mut buf, &mut nonprintable)?;
                    keep = buf.len();
                }
                b';' if self.format == DnFormat::LdapV3 => {
                    return Err(DnError::syntax(self.pos, "Unescaped ';' in value"));
                }
                b'"' | b'<' | b'>' if self.format != DnFormat::Dce => {
                    return Err(DnError::syntax(
                        self.pos,
                        format!("Unescaped {:?} in value", b as char),
                    ));
                }
                b' ' if self.format != DnFormat::Dce => {
                    buf.push(b);
                    self.pos += 1;
                }
                _ => {
                    buf.push(b);
                    self.pos += 1;
                    keep = buf.len();
                }
            }
        }

        let trailing = buf.len() - keep;
        if trailing > 0 {
            if self.flags.no_lead_trail_spaces() {
                return Err(DnError::syntax(self.pos - trailing, "Trailing space after value"));
            }
            buf.truncate(keep);
        }

        let value = decode_utf8(buf, start)?;
        Ok((value, value_flags(nonprintable)))
    }

    /// Decode the escape sequence at `self.pos` (which holds the backslash)
    fn unescape(&mut self, buf: &mut Vec<u8>, nonprintable: &mut bool) -> Result<(), DnError> {
        let at = self.pos;
        let next = match self.input.get(at + 1) {
            Some(&b) => b,
            None => return Err(DnError::syntax(at, "Unterminated escape sequence")),
        };

        if let Some(hi) = hex_digit(next) {
            let lo = match self.input.get(at + 2).and_then(|&b| hex_digit(b)) {
                Some(lo) => lo,
                None => return Err(DnError::syntax(at + 2, "Incomplete hex escape")),
            };
            let byte = (hi << 4) | lo;
            if !is_printable_ascii(byte) {
                *nonprintable = true;
            }
            buf.push(byte);
            self.pos = at + 3;
            return Ok(());
        }

        let escapable = match self.format {
            DnFormat::Dce => DCE_SPECIAL_CHARS.contains(&next) || next == b'#',
            _ => SPECIAL_CHARS.contains(&next) || next == b' ' || next == b'#',
        };
        if !escapable && next != 0 && self.flags.is_pedantic() {
            return Err(DnError::syntax(
                at,
                format!("Invalid escape of {:?}", next as char),
            ));
        }

        buf.push(next);
        self.pos = at + 2;
        Ok(())
    }

    /// Skip spaces after a hex or quoted value and require a separator
    fn finish_value(&mut self) -> Result<(), DnError> {
        if self.format != DnFormat::Dce && self.peek() == Some(b' ') {
            if self.flags.no_lead_trail_spaces() {
                return Err(DnError::syntax(self.pos, "Trailing space after value"));
            }
            while self.peek() == Some(b' ') {
                self.pos += 1;
            }
        }

        match self.peek() {
            None => Ok(()),
            Some(b) if self.is_value_end(b) => Ok(()),
            Some(b) => Err(DnError::syntax(
                self.pos,
                format!("Unexpected character {:?} after value", b as char),
            )),
        }
    }

    /// `/o=foo/ou=bar/cn=baz`: RDNs most-general first, `,` joins AVAs
    fn parse_dce(&mut self) -> Result<Dn, DnError> {
        let mut rdns = Vec::new();
        while self.pos < self.input.len() {
            if self.peek() != Some(b'/') {
                return Err(DnError::syntax(self.pos, "Expected '/' before RDN"));
            }
            self.pos += 1;

            let mut avas = alloc::vec![self.parse_ava()?];
            while self.peek() == Some(b',') {
                self.pos += 1;
                avas.push(self.parse_ava()?);
            }
            rdns.push(Rdn::new(avas)?);
        }

        rdns.reverse();
        Ok(Dn::new(rdns))
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn value_flags(nonprintable: bool) -> AvaFlags {
    if nonprintable {
        AvaFlags::nonprintable()
    } else {
        AvaFlags::string()
    }
}

fn decode_utf8(bytes: Vec<u8>, offset: usize) -> Result<String, DnError> {
    String::from_utf8(bytes).map_err(|e| DnError::Syntax {
        offset,
        code: LDAP_DECODING_ERROR,
        detail: format!(
            "Value is not valid UTF-8 after {} bytes",
            e.utf8_error().valid_up_to()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LDAP_INVALID_DN_SYNTAX, LDAP_PARAM_ERROR};

    fn triples(dn: &Dn) -> Vec<Vec<(String, String, u32)>> {
        dn.to_triples()
    }

    fn t(a: &str, v: &str, f: u32) -> (String, String, u32) {
        (String::from(a), String::from(v), f)
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_dn("", 0).unwrap().is_empty());
        assert!(parse_dn("   ", 0).unwrap().is_empty());
    }

    #[test]
    fn test_parse_simple() {
        let dn = parse_dn("cn=John Doe,dc=example,dc=com", 0).unwrap();
        assert_eq!(
            triples(&dn),
            alloc::vec![
                alloc::vec![t("cn", "John Doe", 1)],
                alloc::vec![t("dc", "example", 1)],
                alloc::vec![t("dc", "com", 1)],
            ]
        );
    }

    #[test]
    fn test_parse_multi_valued() {
        let dn = parse_dn("a=b+c=d", 0).unwrap();
        assert_eq!(
            triples(&dn),
            alloc::vec![alloc::vec![t("a", "b", 1), t("c", "d", 1)]]
        );
    }

    #[test]
    fn test_parse_escapes() {
        let dn = parse_dn("a=b\\,c", 0).unwrap();
        assert_eq!(triples(&dn), alloc::vec![alloc::vec![t("a", "b,c", 1)]]);

        let dn = parse_dn("cn=\\#1\\ ", 0).unwrap();
        assert_eq!(dn.rdns()[0].first().value, "#1 ");
    }

    #[test]
    fn test_parse_hex_pair_sets_nonprintable() {
        let dn = parse_dn("cn=\\c3\\a4", 0).unwrap();
        assert_eq!(triples(&dn), alloc::vec![alloc::vec![t("cn", "\u{e4}", 4)]]);

        // printable hex pairs keep the string flag
        let dn = parse_dn("cn=a\\2cb", 0).unwrap();
        assert_eq!(triples(&dn), alloc::vec![alloc::vec![t("cn", "a,b", 1)]]);
    }

    #[test]
    fn test_parse_hex_string() {
        let dn = parse_dn("cn=#4869", 0).unwrap();
        assert_eq!(triples(&dn), alloc::vec![alloc::vec![t("cn", "Hi", 2)]]);
    }

    #[test]
    fn test_parse_spaces_trimmed() {
        let dn = parse_dn(" cn = John Doe  , dc=com ", 0).unwrap();
        assert_eq!(dn.rdns()[0].first().value, "John Doe");
        assert_eq!(dn.rdns()[1].first().value, "com");
    }

    #[test]
    fn test_parse_quoted() {
        let dn = parse_dn("cn=\"Doe, John\";o=Acme", 0).unwrap();
        assert_eq!(dn.rdns()[0].first().value, "Doe, John");
        assert_eq!(dn.len(), 2);

        let err = parse_dn("cn=\"Doe, John", 0).unwrap_err();
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_parse_oid_types() {
        let dn = parse_dn("2.5.4.3=x", 0).unwrap();
        assert_eq!(dn.rdns()[0].first().attr_type, "2.5.4.3");

        let dn = parse_dn("OID.2.5.4.3=x", DnFlags::FORMAT_LDAPV2).unwrap();
        assert_eq!(dn.rdns()[0].first().attr_type, "2.5.4.3");

        assert!(parse_dn("OID.2.5.4.3=x", DnFlags::FORMAT_LDAPV3).is_err());
        assert!(parse_dn("2.5.=x", 0).is_err());
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_dn("=noattr", 0).unwrap_err();
        assert_eq!(err.offset(), Some(0));
        assert_eq!(err.code(), LDAP_INVALID_DN_SYNTAX);

        assert_eq!(parse_dn("a=b,", 0).unwrap_err().offset(), Some(4));
        assert_eq!(parse_dn("a=b+", 0).unwrap_err().offset(), Some(4));
        assert_eq!(parse_dn("a=b,,c=d", 0).unwrap_err().offset(), Some(4));
        assert_eq!(parse_dn("cn x", 0).unwrap_err().offset(), Some(3));
        assert_eq!(parse_dn("cn=x\\", 0).unwrap_err().offset(), Some(4));
        assert_eq!(parse_dn("cn=\\4g", 0).unwrap_err().offset(), Some(5));
        assert_eq!(parse_dn("cn=#414", 0).unwrap_err().offset(), Some(7));
        assert_eq!(parse_dn("cn=#41zz", 0).unwrap_err().offset(), Some(6));
        assert_eq!(parse_dn("cn=#", 0).unwrap_err().offset(), Some(4));
        assert_eq!(parse_dn("cn=a<b", 0).unwrap_err().offset(), Some(4));
    }

    #[test]
    fn test_parse_strict_v3() {
        let v3 = DnFlags::FORMAT_LDAPV3;
        assert!(parse_dn("cn=a;dc=b", v3).is_err());
        assert!(parse_dn("cn=\"a\"", v3).is_err());
        assert_eq!(parse_dn("cn=a\\;b", v3).unwrap().rdns()[0].first().value, "a;b");
    }

    #[test]
    fn test_parse_pedantic() {
        assert!(parse_dn("cn = a", DnFlags::P_NOLEADTRAILSPACES).is_err());
        assert!(parse_dn("cn=a, dc=b", DnFlags::P_NOSPACEAFTERRDN).is_err());
        assert!(parse_dn("cn=a,dc=b", DnFlags::PEDANTIC).is_ok());
        assert!(parse_dn("cn=\\q", DnFlags::PEDANTIC).is_err());
        assert_eq!(parse_dn("cn=\\q", 0).unwrap().rdns()[0].first().value, "q");
    }

    #[test]
    fn test_parse_embedded_nul() {
        let dn = parse_dn(b"cn=a\0b", 0).unwrap();
        assert_eq!(dn.rdns()[0].first().value, "a\0b");
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let err = parse_dn(b"cn=\xff", 0).unwrap_err();
        assert_eq!(err.code(), LDAP_DECODING_ERROR);
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_parse_dce() {
        let dn = parse_dn("/o=Acme/ou=R\\/D,l=HQ/cn=John", DnFlags::FORMAT_DCE).unwrap();
        assert_eq!(
            triples(&dn),
            alloc::vec![
                alloc::vec![t("cn", "John", 1)],
                alloc::vec![t("ou", "R/D", 1), t("l", "HQ", 1)],
                alloc::vec![t("o", "Acme", 1)],
            ]
        );
        assert!(parse_dn("o=Acme", DnFlags::FORMAT_DCE).is_err());
        assert!(parse_dn("/o=Acme/", DnFlags::FORMAT_DCE).is_err());
    }

    #[test]
    fn test_parse_rejects_build_only_formats() {
        let err = parse_dn("cn=x", DnFlags::FORMAT_UFN).unwrap_err();
        assert_eq!(err.code(), LDAP_PARAM_ERROR);
        assert!(parse_dn("cn=x", 0x0070).is_err());
    }
}
