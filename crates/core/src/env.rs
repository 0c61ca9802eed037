//! Environment variable names and defaults consumed by the hook relay.
//!
//! Centralized definition of the `BP_*` control variables so the scanner,
//! the suffix policy and the identity resolver agree on the exact strings.

/// Prefix every payload candidate must carry
pub const BP_PREFIX: &str = "BP_";

/// Suffix list override (whitespace and/or comma separated). Never forwarded.
pub const BP_HOOK_DATA_SUFFIX_LIST: &str = "BP_HOOK_DATA_SUFFIX_LIST";

/// Target URL override prefix, completed with the normalized hook name
/// (e.g. `BP_HOOK_URL_REDIRECT_SOUTHBOUND_UPDATE`). Never forwarded.
pub const BP_HOOK_URL_REDIRECT_PREFIX: &str = "BP_HOOK_URL_REDIRECT_";

/// Suffixes marking a value as JSON when no override is set
pub const DEFAULT_SUFFIX_LIST: &str = "_DATA,_CONFIG";

/// Base of the default target URL; the hook's base name is appended
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1/api/v1/hook/";

/// Content type of the POST body
pub const POST_BODY_TYPE: &str = "application/json";
