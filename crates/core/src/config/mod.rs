//! Run configuration for a single relay invocation.
//!
//! Built once by the binary from its command-line flags and handed to every
//! stage, so no stage reads ambient global state.

use crate::env::{BP_PREFIX, DEFAULT_BASE_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Log the request instead of sending it (`-n`)
    pub dry_run: bool,

    /// Emit per-variable diagnostics (`-v`)
    pub verbose: bool,

    /// Base of the default target URL; the hook's base name is appended
    pub base_url: String,

    /// Prefix a variable must carry to be considered at all
    pub prefix: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            verbose: false,
            base_url: default_base_url(),
            prefix: default_prefix(),
        }
    }
}

impl RelayConfig {
    /// Config for the given CLI flags with every other field at its default
    pub fn from_flags(dry_run: bool, verbose: bool) -> Self {
        Self {
            dry_run,
            verbose,
            ..Self::default()
        }
    }

    /// Point the default target URL somewhere else (used by tests and embedders)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_prefix() -> String {
    BP_PREFIX.to_string()
}
