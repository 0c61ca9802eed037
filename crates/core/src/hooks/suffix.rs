//! Data suffix policy: which variable names carry JSON values

use crate::env::DEFAULT_SUFFIX_LIST;

/// Ordered set of name suffixes whose values are decoded as JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPolicy {
    suffixes: Vec<String>,
}

impl Default for SuffixPolicy {
    fn default() -> Self {
        Self::parse(DEFAULT_SUFFIX_LIST)
    }
}

impl SuffixPolicy {
    /// Policy from the raw value of `BP_HOOK_DATA_SUFFIX_LIST`.
    ///
    /// Absent or empty falls back to the default list. Anything else replaces
    /// the default wholesale, even if it splits into no suffixes at all.
    pub fn from_override(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) if !raw.is_empty() => Self::parse(raw),
            _ => Self::default(),
        }
    }

    /// Split on any run of whitespace and/or commas, dropping empty tokens
    pub fn parse(raw: &str) -> Self {
        let suffixes = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { suffixes }
    }

    /// Whether `name` ends with any active suffix
    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}
