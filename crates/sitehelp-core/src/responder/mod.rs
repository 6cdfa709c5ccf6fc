//! The responder seam: one async capability, "respond(text) -> reply, may fail".
//!
//! The local FAQ engine and a remote chat API are interchangeable behind [`Responder`];
//! the UI layer depends only on the trait.

mod local;

pub use local::{LocalResponder, DEFAULT_REPLY_DELAY, PRICING_CLARIFIER};

use std::sync::Arc;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a responder. The local engine never produces one.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// Remote answered with a non-success status.
    #[error("API error: {0}")]
    Status(u16),
    /// Request never completed (connect, timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// Remote answered 2xx but the body was not JSON.
    #[error("malformed reply payload: {0}")]
    Payload(String),
}

/// Trait implemented by every reply strategy.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Short strategy name for logs and status output.
    fn name(&self) -> &str;

    /// Produces a reply to raw user text.
    async fn respond(&self, text: &str) -> Result<String, ResponderError>;
}

#[async_trait::async_trait]
impl<R: Responder + ?Sized> Responder for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn respond(&self, text: &str) -> Result<String, ResponderError> {
        (**self).respond(text).await
    }
}
