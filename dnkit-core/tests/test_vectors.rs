//! Test vectors for DN parsing and building
//!
//! Each vector pins one behavior of the notation: the decoded structure for
//! accepted input, or the byte offset and result code for rejected input.

use dnkit_core::{
    build_dn,
    constants::{LDAP_DECODING_ERROR, LDAP_INVALID_DN_SYNTAX, LDAP_PARAM_ERROR},
    parse_dn, DnFlags,
};

type Triples = Vec<Vec<(&'static str, &'static str, u32)>>;

struct Accept {
    input: &'static [u8],
    flags: u32,
    expected: Triples,
}

struct Reject {
    input: &'static [u8],
    flags: u32,
    offset: Option<usize>,
    code: i32,
}

fn accepted() -> Vec<Accept> {
    vec![
        Accept {
            input: b"",
            flags: 0,
            expected: vec![],
        },
        Accept {
            input: b"uid=test42",
            flags: 0,
            expected: vec![vec![("uid", "test42", 1)]],
        },
        Accept {
            input: b"cn=John Doe,dc=example,dc=com",
            flags: 0,
            expected: vec![
                vec![("cn", "John Doe", 1)],
                vec![("dc", "example", 1)],
                vec![("dc", "com", 1)],
            ],
        },
        Accept {
            input: b"a=b+c=d",
            flags: 0,
            expected: vec![vec![("a", "b", 1), ("c", "d", 1)]],
        },
        Accept {
            input: b"a=b,c=d;e=f",
            flags: 0,
            expected: vec![vec![("a", "b", 1)], vec![("c", "d", 1)], vec![("e", "f", 1)]],
        },
        Accept {
            input: b"a=b\\,c",
            flags: 0,
            expected: vec![vec![("a", "b,c", 1)]],
        },
        Accept {
            input: b"cn=\\c3\\a4",
            flags: 0,
            expected: vec![vec![("cn", "\u{e4}", 4)]],
        },
        Accept {
            input: "cn=\u{e4}".as_bytes(),
            flags: 0,
            expected: vec![vec![("cn", "\u{e4}", 1)]],
        },
        Accept {
            input: b"cn=#616263",
            flags: 0,
            expected: vec![vec![("cn", "abc", 2)]],
        },
        Accept {
            input: b"cn=\\ lead\\, trail\\ ",
            flags: 0,
            expected: vec![vec![("cn", " lead, trail ", 1)]],
        },
        Accept {
            input: b"cn=\\#hash",
            flags: 0,
            expected: vec![vec![("cn", "#hash", 1)]],
        },
        Accept {
            input: b"cn=a=b",
            flags: 0,
            expected: vec![vec![("cn", "a=b", 1)]],
        },
        Accept {
            input: b"cn=",
            flags: 0,
            expected: vec![vec![("cn", "", 1)]],
        },
        Accept {
            input: b"cn=\"a+b\" , o=\"x;y\"",
            flags: DnFlags::FORMAT_LDAPV2,
            expected: vec![vec![("cn", "a+b", 1)], vec![("o", "x;y", 1)]],
        },
        Accept {
            input: b"oid.2.5.4.3=x",
            flags: 0,
            expected: vec![vec![("2.5.4.3", "x", 1)]],
        },
        Accept {
            input: b"/dc=com/dc=example/cn=John Doe",
            flags: DnFlags::FORMAT_DCE,
            expected: vec![
                vec![("cn", "John Doe", 1)],
                vec![("dc", "example", 1)],
                vec![("dc", "com", 1)],
            ],
        },
        Accept {
            input: b"cn=a\\00b",
            flags: DnFlags::FORMAT_LDAPV3,
            expected: vec![vec![("cn", "a\0b", 4)]],
        },
    ]
}

fn rejected() -> Vec<Reject> {
    vec![
        Reject {
            input: b"=noattr",
            flags: 0,
            offset: Some(0),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"a=b,",
            flags: 0,
            offset: Some(4),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"cn=\"unterminated",
            flags: 0,
            offset: Some(3),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"cn=#abc",
            flags: 0,
            offset: Some(7),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"cn=#ff",
            flags: 0,
            offset: Some(4),
            code: LDAP_DECODING_ERROR,
        },
        Reject {
            input: b"cn=\\zz\\",
            flags: 0,
            offset: Some(6),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"cn=a>b",
            flags: 0,
            offset: Some(4),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"1cn=x",
            flags: 0,
            offset: Some(0),
            code: LDAP_INVALID_DN_SYNTAX,
        },
        Reject {
            input: b"cn=x",
            flags: DnFlags::FORMAT_AD_CANONICAL,
            offset: None,
            code: LDAP_PARAM_ERROR,
        },
    ]
}

fn owned(expected: &Triples) -> Vec<Vec<(String, String, u32)>> {
    expected
        .iter()
        .map(|rdn| {
            rdn.iter()
                .map(|(t, v, f)| (t.to_string(), v.to_string(), *f))
                .collect()
        })
        .collect()
}

#[test]
fn test_accepted_vectors() {
    for vector in accepted() {
        let dn = parse_dn(vector.input, vector.flags).unwrap_or_else(|e| {
            panic!(
                "{:?} rejected: {}",
                String::from_utf8_lossy(vector.input),
                e
            )
        });
        assert_eq!(
            dn.to_triples(),
            owned(&vector.expected),
            "{:?}",
            String::from_utf8_lossy(vector.input)
        );
    }
}

#[test]
fn test_rejected_vectors() {
    for vector in rejected() {
        let err = parse_dn(vector.input, vector.flags).expect_err(&format!(
            "{:?} accepted",
            String::from_utf8_lossy(vector.input)
        ));
        assert_eq!(err.offset(), vector.offset, "{}", err);
        assert_eq!(err.code(), vector.code, "{}", err);
    }
}

#[test]
fn test_accepted_vectors_rebuild() {
    // rebuilding in the same notation reproduces the structure
    for vector in accepted() {
        let dn = parse_dn(vector.input, vector.flags).unwrap();
        let text = build_dn(&dn, vector.flags).unwrap();
        assert_eq!(parse_dn(&text, vector.flags).unwrap(), dn, "{}", text);
    }
}
