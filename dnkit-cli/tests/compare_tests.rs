use dnkit_cli::commands::{compare, explode};
use dnkit_core::DnFlags;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_compare_types_fold_case() {
    assert!(compare::execute("CN=John,DC=com", "cn=John, dc=com", DnFlags::default(), &[]).unwrap());
    assert!(!compare::execute("cn=John,dc=com", "cn=john,dc=com", DnFlags::default(), &[]).unwrap());
}

#[test]
fn test_compare_ignore_case() {
    let ignore = vec!["cn".to_string()];
    assert!(compare::execute("cn=John,dc=com", "cn=john,dc=com", DnFlags::default(), &ignore).unwrap());
    assert!(!compare::execute("cn=John,dc=COM", "cn=john,dc=com", DnFlags::default(), &ignore).unwrap());
}

#[test]
fn test_compare_malformed() {
    assert!(compare::execute("cn=a", "=b", DnFlags::default(), &[]).is_err());
}

#[test]
fn test_explode_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("rdns.txt");

    explode::execute(
        "cn=Doe\\, John,dc=example,dc=com",
        DnFlags::default(),
        false,
        false,
        Some(out.to_str().unwrap()),
    )
    .unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "cn=Doe\\, John\ndc=example\ndc=com"
    );

    explode::execute(
        "cn=a+uid=b,dc=com",
        DnFlags::default(),
        true,
        true,
        Some(out.to_str().unwrap()),
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "a\nb");
}
