//! Environment scanner and classifier

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::identity::Identity;
use super::payload::Payload;
use super::suffix::SuffixPolicy;
use crate::config::RelayConfig;
use crate::env::BP_HOOK_DATA_SUFFIX_LIST;

/// Reserved variables consumed as configuration and never forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlVar {
    /// `BP_HOOK_DATA_SUFFIX_LIST`, already consumed by the suffix policy
    SuffixList,
    /// `BP_HOOK_URL_REDIRECT_<NAME>` for this hook
    UrlRedirect,
}

impl ControlVar {
    /// Which control variable `name` is for the given hook, if any
    pub fn lookup(name: &str, identity: &Identity) -> Option<Self> {
        if name == BP_HOOK_DATA_SUFFIX_LIST {
            Some(ControlVar::SuffixList)
        } else if name == identity.url_override_key() {
            Some(ControlVar::UrlRedirect)
        } else {
            None
        }
    }
}

/// How a single environment variable is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Missing the required prefix
    Ignored,
    /// Consumed as configuration
    Control(ControlVar),
    /// Value should be decoded as JSON
    Json,
    /// Value is forwarded as a plain string
    Text,
}

/// A suffix-matched value that was not valid JSON and went out as a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    pub name: String,
    pub value: String,
    pub error: String,
}

/// Result of one pass over the environment
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub payload: Payload,
    pub target_url: String,
    pub warnings: Vec<DecodeWarning>,
}

/// Classifies variables against one hook's identity and suffix policy
pub struct Scanner<'a> {
    config: &'a RelayConfig,
    identity: &'a Identity,
    suffixes: &'a SuffixPolicy,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a RelayConfig, identity: &'a Identity, suffixes: &'a SuffixPolicy) -> Self {
        Self {
            config,
            identity,
            suffixes,
        }
    }

    pub fn classify(&self, name: &str) -> Disposition {
        if !name.starts_with(self.config.prefix.as_str()) {
            return Disposition::Ignored;
        }
        if let Some(control) = ControlVar::lookup(name, self.identity) {
            return Disposition::Control(control);
        }
        if self.suffixes.matches(name) {
            Disposition::Json
        } else {
            Disposition::Text
        }
    }

    /// Walk the snapshot once, building the payload and resolving the target URL
    pub fn scan<I, K, V>(&self, entries: I) -> ScanReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut report = ScanReport {
            payload: Payload::new(),
            target_url: self.identity.default_target_url(&self.config.base_url),
            warnings: Vec::new(),
        };

        for (name, value) in entries {
            let name: String = name.into();
            let disposition = self.classify(&name);
            if disposition != Disposition::Ignored {
                debug!("processing environment variable '{}'", name);
            }
            match disposition {
                Disposition::Ignored => {
                    debug!(
                        "ignoring environment variable '{}' because it does not start with prefix '{}'",
                        name, self.config.prefix
                    );
                }
                Disposition::Control(ControlVar::SuffixList) => {}
                Disposition::Control(ControlVar::UrlRedirect) => {
                    report.target_url = value.into();
                    debug!(
                        "overriding target URL from environment to '{}'",
                        report.target_url
                    );
                }
                Disposition::Json => {
                    let value: String = value.into();
                    debug!("processing value of '{}' as JSON data", name);
                    match decode_json(&value) {
                        Ok(decoded) => report.payload.insert_json(name, decoded),
                        Err(e) => {
                            warn!(
                                "unable to unmarshal data value '{}' as JSON, passing value as string instead: {}",
                                value, e
                            );
                            report.warnings.push(DecodeWarning {
                                name: name.clone(),
                                value: value.clone(),
                                error: e.to_string(),
                            });
                            report.payload.insert_text(name, value);
                        }
                    }
                }
                Disposition::Text => report.payload.insert_text(name, value),
            }
        }

        debug!("final target URL is '{}'", report.target_url);
        report
    }
}

/// Decode a JSON document of any nesting depth. The stack grows on the heap
/// as needed, so deep input is neither rejected nor able to overflow.
fn decode_json(raw: &str) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_str(raw);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}
