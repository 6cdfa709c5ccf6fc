//! Chat provider: picks the local FAQ engine or the remote chat API from config.

use crate::remote::RemoteResponder;
use sitehelp_core::{
    ConversationMemory, KnowledgeBase, LocalResponder, Responder, ResponderError, ResponderMode,
    WidgetConfig,
};
use std::sync::Arc;

/// The responder strategy of one widget instance. Selected at construction, never switched.
pub enum ChatProvider {
    Local(LocalResponder),
    Remote(RemoteResponder),
}

impl ChatProvider {
    /// Builds the strategy named by `config.mode`. The local engine gets fresh memory and the
    /// configured delay; the remote client posts to `config.endpoint`.
    pub fn from_config(config: &WidgetConfig, knowledge: Arc<KnowledgeBase>) -> Self {
        let provider = match config.mode {
            ResponderMode::Local => ChatProvider::Local(
                LocalResponder::new(knowledge, ConversationMemory::new())
                    .with_delay(config.reply_delay()),
            ),
            ResponderMode::Remote => ChatProvider::Remote(RemoteResponder::new(&config.endpoint)),
        };
        tracing::info!(
            target: "sitehelp::provider",
            mode = provider.mode().as_str(),
            "Chat provider selected"
        );
        provider
    }

    pub fn mode(&self) -> ResponderMode {
        match self {
            ChatProvider::Local(_) => ResponderMode::Local,
            ChatProvider::Remote(_) => ResponderMode::Remote,
        }
    }
}

#[async_trait::async_trait]
impl Responder for ChatProvider {
    fn name(&self) -> &str {
        match self {
            ChatProvider::Local(local) => local.name(),
            ChatProvider::Remote(remote) => remote.name(),
        }
    }

    async fn respond(&self, text: &str) -> Result<String, ResponderError> {
        match self {
            ChatProvider::Local(local) => local.respond(text).await,
            ChatProvider::Remote(remote) => remote.respond(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_mode_answers_from_builtin_faq() {
        let config = WidgetConfig {
            reply_delay_ms: 0,
            ..WidgetConfig::default()
        };
        let provider = ChatProvider::from_config(&config, Arc::new(KnowledgeBase::builtin()));
        assert_eq!(provider.mode(), ResponderMode::Local);
        assert_eq!(provider.name(), "local");
        let reply = provider.respond("Do you do nails?").await.unwrap();
        assert_eq!(
            reply,
            "We offer hair, nails, skincare, and tattoo services. What service are you interested in?"
        );
    }

    #[tokio::test]
    async fn test_remote_mode_uses_configured_endpoint() {
        let config = WidgetConfig {
            mode: ResponderMode::Remote,
            endpoint: "http://127.0.0.1:9/api/chat".to_string(),
            ..WidgetConfig::default()
        };
        let provider = ChatProvider::from_config(&config, Arc::new(KnowledgeBase::builtin()));
        assert_eq!(provider.mode(), ResponderMode::Remote);
        match &provider {
            ChatProvider::Remote(remote) => assert_eq!(remote.endpoint(), "http://127.0.0.1:9/api/chat"),
            ChatProvider::Local(_) => panic!("expected remote provider"),
        }
    }

    #[tokio::test]
    async fn test_provider_is_usable_as_dyn_responder() {
        let config = WidgetConfig {
            reply_delay_ms: 0,
            ..WidgetConfig::default()
        };
        let responder: Arc<dyn Responder> = Arc::new(ChatProvider::from_config(
            &config,
            Arc::new(KnowledgeBase::builtin()),
        ));
        assert!(responder.respond("weekends").await.unwrap().contains("Sat 10am–4pm"));
    }
}
