//! Fuzzing entry points for dnkit-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_parse

use dnkit_core::{build_dn, build_dn_value, parse_dn, DnFlags};

const FORMATS: [u32; 4] = [
    DnFlags::FORMAT_LDAP,
    DnFlags::FORMAT_LDAPV3,
    DnFlags::FORMAT_LDAPV2,
    DnFlags::FORMAT_DCE,
];

/// Parse arbitrary bytes in every parseable notation
///
/// Anything that parses must build again in the same notation, and the
/// rebuilt text must parse.
pub fn fuzz_parse(data: &[u8]) {
    for format in FORMATS {
        let dn = match parse_dn(data, format) {
            Ok(dn) => dn,
            Err(_) => continue,
        };
        let text = match build_dn(&dn, format) {
            Ok(text) => text,
            Err(e) => panic!("parsed DN failed to build: {}", e),
        };
        if let Err(e) = parse_dn(&text, format) {
            panic!("rebuilt DN {:?} failed to parse: {}", text, e);
        }
    }
}

/// Feed arbitrary JSON to the loosely-typed builder; should never panic
pub fn fuzz_build_value(data: &[u8]) {
    let value: serde_json::Value = match serde_json::from_slice(data) {
        Ok(value) => value,
        Err(_) => return,
    };
    for format in FORMATS {
        let _ = build_dn_value(&value, format);
    }
    let _ = build_dn_value(&value, DnFlags::FORMAT_UFN);
    let _ = build_dn_value(&value, DnFlags::FORMAT_AD_CANONICAL);
}
