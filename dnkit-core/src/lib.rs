//! # dnkit Core
//!
//! Parsing and building of LDAP Distinguished Names (RFC 4514 and the
//! older notations directory libraries still accept).
//!
//! ## Modules
//!
//! - `constants`: AVA and DN flag values, result codes
//! - `types`: Core types (Ava, Rdn, Dn, DnBuilder)
//! - `decoder`: DN text to structure
//! - `encoder`: structure to DN text
//! - `escape`: Value escaping rules
//! - `shape`: Validation of loosely-typed (JSON) input
//! - `compare`: Explode and compare helpers
//!
//! ```
//! use dnkit_core::{build_dn, parse_dn};
//!
//! let dn = parse_dn("cn=John Doe,dc=example,dc=com", 0).unwrap();
//! assert_eq!(dn.len(), 3);
//! assert_eq!(build_dn(&dn, 0).unwrap(), "cn=John Doe,dc=example,dc=com");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod compare;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod shape;
pub mod types;

// Re-export commonly used types
pub use compare::{compare_dn, explode_dn, explode_rdn, DnComparator};
pub use constants::{AvaFlags, DnFlags, DnFormat};
pub use decoder::{is_dn, parse_dn};
pub use encoder::{build_dn, build_dn_value};
pub use error::DnError;
pub use escape::escape_dn_chars;
pub use types::{Ava, Dn, DnBuilder, Rdn};

/// Result type alias for dnkit operations
pub type Result<T> = core::result::Result<T, DnError>;
