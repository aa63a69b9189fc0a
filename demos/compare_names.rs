//! Comparing DNs with case-insensitive attributes

use dnkit_core::{explode_dn, DnComparator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let a = "CN=John Doe,OU=People,DC=Example,DC=com";
    let b = "cn=john doe, ou=People, dc=example, dc=com";

    let strict = DnComparator::new();
    let relaxed = DnComparator::with_case_insensitive(["cn", "dc"]);

    println!("{}\n{}\n", a, b);
    println!("exact values:          {}", strict.compare(a, b)?);
    println!("cn/dc case-insensitive: {}", relaxed.compare(a, b)?);

    println!("\nRDNs of the first name:");
    for rdn in explode_dn(a, false, 0)? {
        println!("  {}", rdn);
    }

    Ok(())
}
