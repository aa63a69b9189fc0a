//! Error types for DN parsing and building

use crate::constants::{
    result_code_message, LDAP_ENCODING_ERROR, LDAP_INVALID_DN_SYNTAX, LDAP_PARAM_ERROR,
};
use alloc::string::String;

/// Shape every loosely-typed builder input must have
pub const EXPECTED_SHAPE: &str = "sequence of sequence of (string, string, integer)";

/// Errors that can occur while parsing or building a DN
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnError {
    /// Malformed DN text
    #[cfg_attr(
        feature = "std",
        error("{} at byte {offset}: {detail}", code_message(.code))
    )]
    Syntax {
        /// Byte offset of the failure in the input
        offset: usize,
        /// Result code reported for the failure
        code: i32,
        /// What was wrong
        detail: String,
    },

    /// Caller-supplied structure is not a DN
    #[cfg_attr(feature = "std", error("Type mismatch: expected {expected}, found {found}"))]
    TypeMismatch {
        /// The required shape
        expected: &'static str,
        /// Where and what was found instead
        found: String,
    },

    /// Failure reported by the parse/serialize engine itself
    #[cfg_attr(feature = "std", error("{}: {detail}", code_message(.code)))]
    Engine {
        /// Result code
        code: i32,
        /// What was wrong
        detail: String,
    },
}

#[cfg(feature = "std")]
fn code_message(code: &i32) -> &'static str {
    result_code_message(*code)
}

impl DnError {
    /// Syntax error with the default `LDAP_INVALID_DN_SYNTAX` code
    pub fn syntax(offset: usize, detail: impl Into<String>) -> Self {
        DnError::Syntax {
            offset,
            code: LDAP_INVALID_DN_SYNTAX,
            detail: detail.into(),
        }
    }

    /// Shape violation of loosely-typed input
    pub fn type_mismatch(found: impl Into<String>) -> Self {
        DnError::TypeMismatch {
            expected: EXPECTED_SHAPE,
            found: found.into(),
        }
    }

    /// Structured DN that cannot be rendered
    pub fn encoding(detail: impl Into<String>) -> Self {
        DnError::Engine {
            code: LDAP_ENCODING_ERROR,
            detail: detail.into(),
        }
    }

    /// Unsupported flag combination
    pub fn param(detail: impl Into<String>) -> Self {
        DnError::Engine {
            code: LDAP_PARAM_ERROR,
            detail: detail.into(),
        }
    }

    /// Result code carried by this error
    pub fn code(&self) -> i32 {
        match self {
            DnError::Syntax { code, .. } | DnError::Engine { code, .. } => *code,
            DnError::TypeMismatch { .. } => LDAP_PARAM_ERROR,
        }
    }

    /// Message for the result code carried by this error
    pub fn message(&self) -> &'static str {
        result_code_message(self.code())
    }

    /// Byte offset of a syntax error
    pub fn offset(&self) -> Option<usize> {
        match self {
            DnError::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for DnError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DnError::Syntax {
                offset,
                code,
                detail,
            } => write!(f, "{} at byte {}: {}", result_code_message(*code), offset, detail),
            DnError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            DnError::Engine { code, detail } => {
                write!(f, "{}: {}", result_code_message(*code), detail)
            }
        }
    }
}
