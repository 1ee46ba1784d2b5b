//! Name comparison modes for alias and enumeration matching.

use uncased::UncasedStr;

/// Case policy applied when matching flag aliases and enumeration variant
/// names.
///
/// The default is ASCII case-insensitive matching, so `--Max-Date` resolves
/// a flag registered as `--max-date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Byte-exact comparison.
    Sensitive,
    /// ASCII case-insensitive comparison.
    #[default]
    Insensitive,
    /// Unicode case-insensitive comparison via lowercase folding.
    CaseFold,
}

impl MatchMode {
    /// Tests two names for equality under this mode.
    pub fn eq(self, a: &str, b: &str) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => UncasedStr::new(a) == UncasedStr::new(b),
            Self::CaseFold => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Tests whether any `|`-separated alias in `template` equals `name` under
/// `mode`.
pub(crate) fn template_matches(template: &str, name: &str, mode: MatchMode) -> bool {
    template.split('|').any(|alias| mode.eq(alias, name))
}
