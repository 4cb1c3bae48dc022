use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{EmailVerifier, Verification};
use crate::config::VerifierConfig;

/// Client for the hosted verifier API: `GET {base}/verify/{email}?token={key}`.
pub struct HttpVerifier {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(alias = "is_verified")]
    status: bool,
}

impl HttpVerifier {
    pub fn new(config: &VerifierConfig) -> Result<Self, String> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| format!("Invalid verifier URL '{}': {e}", config.base_url))?;

        if base_url.cannot_be_a_base() {
            return Err(format!("Invalid verifier URL '{}': not a base URL", config.base_url));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| format!("Failed to build verifier client: {e}"))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn verify_url(&self, email: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("verify").push(email);
        }
        url.query_pairs_mut().append_pair("token", &self.api_key);
        url
    }
}

#[async_trait]
impl EmailVerifier for HttpVerifier {
    async fn verify(&self, email: &str) -> Result<Verification, String> {
        let resp = self
            .client
            .get(self.verify_url(email))
            .send()
            .await
            .map_err(|e| format!("Email verification request failed: {e}"))?;

        let status = resp.status();
        // 4xx with a body is how the provider rejects an address; these are not.
        if status.is_server_error() || matches!(status.as_u16(), 401 | 403 | 429) {
            return Err(format!("Email verification provider returned {status}"));
        }

        let body: VerifyResponse = resp
            .json()
            .await
            .map_err(|e| format!("Invalid email verification response: {e}"))?;

        tracing::debug!(verified = body.status, "Email verification completed");

        Ok(Verification {
            is_verified: body.status,
        })
    }
}
