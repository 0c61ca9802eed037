//! Hook-to-REST relay
//!
//! A hook executable is started by an external trigger with its context in
//! `BP_*` environment variables. The relay turns those variables into one JSON
//! object and POSTs it to a REST endpoint:
//! - identity: argv[0] names the hook (`southbound-update`)
//! - suffix: names ending in `_DATA` / `_CONFIG` carry JSON values
//! - scan: filters the environment and classifies each variable
//! - payload: sorted map encoded as the POST body
//! - runner: resolves the target URL and delivers (or logs, in dry-run)
//!
//! Control variables, never forwarded:
//! - `BP_HOOK_DATA_SUFFIX_LIST`: replaces the suffix list (`"_X _Y"`, `"_X,_Y"`)
//! - `BP_HOOK_URL_REDIRECT_<NAME>`: replaces the target URL
//!   (default `http://127.0.0.1/api/v1/hook/<name>`)
//!
//! Example: `southbound-update` run with `BP_FOO_DATA={"x":1}` and
//! `BP_FOO=hello` POSTs `{"BP_FOO":"hello","BP_FOO_DATA":{"x":1}}`.

mod identity;
mod payload;
mod runner;
mod scan;
mod snapshot;
mod suffix;

pub use identity::Identity;
pub use payload::Payload;
pub use runner::{DeliveryOutcome, HookRequest, Relay};
pub use scan::{ControlVar, DecodeWarning, Disposition, ScanReport, Scanner};
pub use snapshot::EnvSnapshot;
pub use suffix::SuffixPolicy;
