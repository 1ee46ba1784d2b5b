//! Error types for argument parsing.
//!
//! A parse pass aborts on the first failure. Errors carry the offending
//! token text so hosts can report them verbatim; the library itself never
//! prints diagnostics or exits for them.

use thiserror::Error;

use crate::value::{ConvertError, ValueKind};

/// Errors that abort a parse pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `-`-prefixed token matched no registered alias.
    #[error("unexpected argument: {0}")]
    Unrecognized(String),

    /// A value string could not be converted to the flag's declared kind.
    #[error("flag '{flag}': {source}")]
    Conversion {
        /// The alias as it appeared on the command line.
        flag: String,
        /// The underlying conversion failure.
        #[source]
        source: ConvertError,
    },

    /// A flag that requires a value occurred without one.
    #[error("flag '{flag}' requires a {expected} value")]
    MissingValue {
        /// The alias as it appeared on the command line.
        flag: String,
        /// The kind the flag was declared with.
        expected: ValueKind,
    },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_message_echoes_token() {
        let err = ParseError::Unrecognized("--nope".to_string());
        assert_eq!(err.to_string(), "unexpected argument: --nope");
    }

    #[test]
    fn test_conversion_message_names_flag_and_cause() {
        let err = ParseError::Conversion {
            flag: "--count".to_string(),
            source: ConvertError {
                raw: "abc".to_string(),
                kind: ValueKind::I32,
            },
        };
        assert_eq!(err.to_string(), "flag '--count': cannot convert 'abc' to i32");
    }

    #[test]
    fn test_missing_value_message_names_expected_kind() {
        let err = ParseError::MissingValue {
            flag: "--retries".to_string(),
            expected: ValueKind::U32,
        };
        assert_eq!(err.to_string(), "flag '--retries' requires a u32 value");
    }
}
