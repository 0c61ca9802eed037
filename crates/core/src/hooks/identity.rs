//! Hook identity derived from the invocation path

use crate::env::BP_HOOK_URL_REDIRECT_PREFIX;

/// Who this process was invoked as.
///
/// A symlink or copy named `southbound-update` yields base name
/// `southbound-update` and normalized name `SOUTHBOUND_UPDATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Final path segment of the invocation path
    pub base_name: String,

    /// `base_name` uppercased, with `-` replaced by `_`
    pub normalized_name: String,
}

impl Identity {
    /// Resolve an identity from argv[0]. Never fails; degenerate input gives
    /// a degenerate but deterministic name.
    pub fn from_invocation(path: &str) -> Self {
        let base_name = base_name(path);
        let normalized_name = base_name.to_uppercase().replace('-', "_");
        Self {
            base_name,
            normalized_name,
        }
    }

    /// Default target URL: `base_url` followed by the base name
    pub fn default_target_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.base_name)
    }

    /// Name of the variable that redirects this hook's POST
    pub fn url_override_key(&self) -> String {
        format!("{}{}", BP_HOOK_URL_REDIRECT_PREFIX, self.normalized_name)
    }
}

/// Last `/`-separated element, ignoring trailing slashes.
/// Empty input gives `.`, a path of only slashes gives `/`.
fn base_name(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rsplit_once('/') {
        Some((_, last)) => last.to_string(),
        None => trimmed.to_string(),
    }
}
