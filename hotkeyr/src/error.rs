//! Error types for shortcut-spec parsing and configuration loading.
//!
//! Runtime dispatch stays fail-quiet (unknown specs are no-ops, empty
//! lookups return empty lists); typed errors exist only where the caller
//! hands the dispatcher something it can reject up front.

use compact_str::CompactString;
use thiserror::Error;

pub type KeyResult<T> = Result<T, KeyError>;

/// Errors raised at registration or configuration time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key token '{token}' in spec '{spec}'")]
    UnknownKey {
        token: CompactString,
        spec: CompactString,
    },

    #[error("empty key combination in spec '{0}'")]
    EmptyCombo(CompactString),

    #[error("empty shortcut spec")]
    EmptySpec,

    #[error("dispatcher configuration error: {0}")]
    Config(CompactString),
}

impl KeyError {
    /// True for spec-parse failures (as opposed to config I/O problems).
    #[inline]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            KeyError::UnknownKey { .. } | KeyError::EmptyCombo(_) | KeyError::EmptySpec
        )
    }

    pub(crate) fn unknown_key(token: &str, spec: &str) -> Self {
        Self::UnknownKey {
            token: CompactString::from(token),
            spec: CompactString::from(spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(KeyError::unknown_key("Hyper", "Hyper+x").is_parse_error());
        assert!(KeyError::EmptySpec.is_parse_error());
        assert!(!KeyError::Config("missing file".into()).is_parse_error());
    }

    #[test]
    fn test_error_display_names_offending_token() {
        let err = KeyError::unknown_key("Hyper", "Hyper+x");
        let msg = err.to_string();
        assert!(msg.contains("Hyper"));
        assert!(msg.contains("Hyper+x"));
    }
}
