//! Relay engine: prepares the payload and delivers it

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::identity::Identity;
use super::scan::{DecodeWarning, Scanner};
use super::snapshot::EnvSnapshot;
use super::suffix::SuffixPolicy;
use crate::config::RelayConfig;
use crate::env::{BP_HOOK_DATA_SUFFIX_LIST, DEFAULT_SUFFIX_LIST, POST_BODY_TYPE};
use crate::error::{RelayError, RelayResult};

/// How a run ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Dry-run: the request was logged, not sent
    DryRun,
    /// The endpoint accepted the POST
    Delivered(StatusCode),
}

/// A fully resolved request, ready to send
#[derive(Debug, Clone)]
pub struct HookRequest {
    pub target_url: String,
    pub body: String,
    pub warnings: Vec<DecodeWarning>,
}

/// Relay for one hook invocation
pub struct Relay {
    config: RelayConfig,
    identity: Identity,
    client: Client,
}

impl Relay {
    /// Relay with a default HTTP client. Fails if the TLS backend cannot be
    /// initialized.
    pub fn new(config: RelayConfig, identity: Identity) -> RelayResult<Self> {
        let client = Client::builder().build().map_err(RelayError::Client)?;
        Ok(Self::with_client(config, identity, client))
    }

    /// Use a preconfigured HTTP client (proxy settings, TLS roots)
    pub fn with_client(config: RelayConfig, identity: Identity, client: Client) -> Self {
        Self {
            config,
            identity,
            client,
        }
    }

    /// Scan the snapshot and encode the body. Nothing touches the network.
    pub fn prepare(&self, env: &EnvSnapshot) -> RelayResult<HookRequest> {
        debug!("verbose logging is '{}'", self.config.verbose);
        debug!("display only actions is '{}'", self.config.dry_run);
        debug!("default data suffix list is '{}'", DEFAULT_SUFFIX_LIST);

        let override_list = env.get(BP_HOOK_DATA_SUFFIX_LIST);
        if let Some(list) = override_list.filter(|l| !l.is_empty()) {
            debug!("overriding data suffix list to '{}'", list);
        }
        let suffixes = SuffixPolicy::from_override(override_list);

        debug!(
            "default target URL set to '{}'",
            self.identity.default_target_url(&self.config.base_url)
        );
        debug!(
            "environment variable to override target URL set to '{}'",
            self.identity.url_override_key()
        );

        let report = Scanner::new(&self.config, &self.identity, &suffixes).scan(env.iter());
        let body = report.payload.to_body()?;

        Ok(HookRequest {
            target_url: report.target_url,
            body,
            warnings: report.warnings,
        })
    }

    /// POST the request once. No retries.
    pub async fn deliver(&self, request: &HookRequest) -> RelayResult<DeliveryOutcome> {
        if self.config.dry_run {
            info!("POST: {} '{}'", request.target_url, request.body);
            return Ok(DeliveryOutcome::DryRun);
        }
        debug!("POST: {} '{}'", request.target_url, request.body);

        let response = self
            .client
            .post(&request.target_url)
            .header(CONTENT_TYPE, POST_BODY_TYPE)
            .body(request.body.clone())
            .send()
            .await
            .map_err(|source| RelayError::Transport {
                url: request.target_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                url: request.target_url.clone(),
                status,
            });
        }

        debug!("POST to '{}' returned '{}'", request.target_url, status);
        Ok(DeliveryOutcome::Delivered(status))
    }

    /// Prepare and deliver in one step
    pub async fn run(&self, env: &EnvSnapshot) -> RelayResult<DeliveryOutcome> {
        let request = self.prepare(env)?;
        self.deliver(&request).await
    }
}
