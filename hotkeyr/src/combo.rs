//! Parsed shortcut specs.
//!
//! A spec like `"Control+Shift+z | Control+y"` is a `"|"`-separated list
//! of aliases, each alias a `"+"`-separated list of key tokens. Specs are
//! parsed once, at registration, into [`KeyCombo`] values; dispatch only
//! ever compares canonical code sets. Token order inside an alias is
//! irrelevant for matching, and repeated tokens collapse to one code.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::{KeyError, KeyResult};
use crate::keymap::Key;

/// Canonical code set: sorted, deduplicated key codes.
pub type CodeSet = SmallVec<[u16; 4]>;

/// One alias of a shortcut spec, resolved to its canonical code set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    keys: SmallVec<[Key; 4]>,
    codes: CodeSet,
}

impl KeyCombo {
    /// Parse a single alias (`"Control+v"`). Whitespace around tokens is
    /// tolerated; unknown tokens and empty combos are errors.
    pub fn parse(alias: &str, spec: &str) -> KeyResult<Self> {
        let mut keys: SmallVec<[Key; 4]> = SmallVec::new();

        for token in alias.split('+') {
            let token = token.trim();
            if token.is_empty() {
                return Err(KeyError::EmptyCombo(CompactString::from(spec)));
            }
            let key = Key::from_token(token).ok_or_else(|| KeyError::unknown_key(token, spec))?;
            keys.push(key);
        }

        if keys.is_empty() {
            return Err(KeyError::EmptyCombo(CompactString::from(spec)));
        }

        Ok(Self::from_keys(keys))
    }

    /// Build a combo directly from keys, bypassing string parsing.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let keys: SmallVec<[Key; 4]> = keys.into_iter().collect();
        let mut codes: CodeSet = keys.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();

        Self { keys, codes }
    }

    /// Keys as written in the alias, registration order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Canonical code set for this alias.
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    /// Set-equality match against an event's canonical code set. Both
    /// sides are sorted and deduplicated, so slice equality is the
    /// one-to-one element match the matching rules call for.
    #[inline]
    pub fn matches(&self, event_codes: &[u16]) -> bool {
        self.codes.as_slice() == event_codes
    }
}

/// A full shortcut spec: one or more aliases bound to the same handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    aliases: Vec<(CompactString, KeyCombo)>,
}

impl KeySpec {
    /// Parse a `"|"`-separated spec. Every alias must parse; a spec with
    /// no aliases at all is an error.
    pub fn parse(spec: &str) -> KeyResult<Self> {
        let mut aliases: Vec<(CompactString, KeyCombo)> = Vec::new();

        for alias in split_aliases(spec) {
            let combo = KeyCombo::parse(alias, spec)?;
            aliases.push((normalize_alias(alias), combo));
        }

        if aliases.is_empty() {
            return Err(KeyError::EmptySpec);
        }

        Ok(Self { aliases })
    }

    /// Aliases in spec order, each with its normalized label.
    pub fn aliases(&self) -> &[(CompactString, KeyCombo)] {
        &self.aliases
    }
}

/// Split a spec into its alias segments, dropping empty ones.
pub(crate) fn split_aliases(spec: &str) -> impl Iterator<Item = &str> {
    spec.split('|').map(str::trim).filter(|s| !s.is_empty())
}

/// Normalized registry label for an alias: tokens trimmed and re-joined
/// with `"+"`, token text otherwise preserved (`"Shift + a"` becomes
/// `"Shift+a"`).
pub(crate) fn normalize_alias(alias: &str) -> CompactString {
    let mut label = CompactString::default();
    for (i, token) in alias.split('+').enumerate() {
        if i > 0 {
            label.push('+');
        }
        label.push_str(token.trim());
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_alias() {
        let combo = KeyCombo::parse("Enter", "Enter").unwrap();
        assert_eq!(combo.codes(), &[13]);
        assert_eq!(combo.keys(), &[Key::Enter]);
    }

    #[test]
    fn test_modifier_order_is_irrelevant() {
        let a = KeyCombo::parse("Control+Shift+z", "spec").unwrap();
        let b = KeyCombo::parse("Shift + Control + z", "spec").unwrap();
        assert_eq!(a.codes(), b.codes());
        assert!(a.matches(b.codes()));
    }

    #[test]
    fn test_repeated_tokens_collapse() {
        let combo = KeyCombo::parse("Control+Control+c", "spec").unwrap();
        assert_eq!(combo.codes(), &[17, 67]);
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let err = KeyCombo::parse("Hyper+x", "Hyper+x").unwrap_err();
        assert_eq!(err, KeyError::unknown_key("Hyper", "Hyper+x"));
    }

    #[test]
    fn test_dangling_plus_is_an_error() {
        assert!(KeyCombo::parse("Control+", "Control+").is_err());
        assert!(KeyCombo::parse("", "").is_err());
    }

    #[test]
    fn test_spec_splits_aliases() {
        let spec = KeySpec::parse("Tab | Insert").unwrap();
        let labels: Vec<&str> = spec.aliases().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Tab", "Insert"]);
    }

    #[test]
    fn test_spec_rejects_partial_failures() {
        // Second alias is bad, the whole registration must fail.
        assert!(KeySpec::parse("Tab | Bogus").is_err());
        assert_eq!(KeySpec::parse("|"), Err(KeyError::EmptySpec));
    }

    #[test]
    fn test_alias_normalization() {
        assert_eq!(normalize_alias("Shift + a"), "Shift+a");
        assert_eq!(normalize_alias("Control+v"), "Control+v");
    }
}
