//! Basic parsing example

use dnkit_core::{build_dn, parse_dn, DnFlags};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("dnkit Basic Parsing Example\n");

    let text = "cn=Doe\\, John+uid=jdoe,ou=People,dc=example,dc=com";
    let dn = parse_dn(text, 0)?;

    // Walk the structure most-specific first
    for (i, rdn) in dn.iter().enumerate() {
        for ava in rdn.iter() {
            println!(
                "RDN {}: {} = {:?} (flags {})",
                i,
                ava.attr_type,
                ava.value,
                ava.flags.as_u32()
            );
        }
    }

    println!();
    for (name, format) in [
        ("LDAPv3", DnFlags::FORMAT_LDAPV3),
        ("LDAPv2", DnFlags::FORMAT_LDAPV2),
        ("DCE", DnFlags::FORMAT_DCE),
        ("UFN", DnFlags::FORMAT_UFN),
        ("AD canonical", DnFlags::FORMAT_AD_CANONICAL),
    ] {
        println!("{:<13} {}", name, build_dn(&dn, format)?);
    }

    println!("\nJSON: {}", serde_json::to_string(&dn)?);

    Ok(())
}
