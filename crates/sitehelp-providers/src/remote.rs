//! Remote responder: POSTs `{ "message": text }` to a chat API and reads `reply` back.

use serde::Serialize;
use sitehelp_core::{Responder, ResponderError};

const RESPONDER_NAME: &str = "remote";

/// Substituted when a successful payload has no usable `reply` field.
pub const NO_REPLY_PLACEHOLDER: &str = "No reply field returned.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Network-backed responder. Fails on transport errors, non-2xx statuses and non-JSON bodies.
/// Any JSON without a non-empty string `reply` yields [`NO_REPLY_PLACEHOLDER`].
pub struct RemoteResponder {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteResponder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Responder for RemoteResponder {
    fn name(&self) -> &str {
        RESPONDER_NAME
    }

    async fn respond(&self, text: &str) -> Result<String, ResponderError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message: text })
            .send()
            .await
            .map_err(|e| ResponderError::Transport(Box::new(e)))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(
                target: "sitehelp::remote",
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Chat API returned an error status"
            );
            return Err(ResponderError::Status(status.as_u16()));
        }

        let data: serde_json::Value = res
            .json()
            .await
            .map_err(|e| ResponderError::Payload(e.to_string()))?;

        let reply = data
            .get("reply")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| NO_REPLY_PLACEHOLDER.to_string());
        tracing::debug!(target: "sitehelp::remote", chars = reply.len(), "Chat API replied");
        Ok(reply)
    }
}
