//! Chat relay with a pinned persona.
//!
//! The relay manages the lifecycle of one chat interaction:
//! 1. Prepend the NiRDy system prompt unless the client already sent one
//! 2. Stream the provider response through the driver
//! 3. Flatten transport errors into [`NormalizedEvent::Error`] so the
//!    consumer only ever sees one event vocabulary

use std::sync::Arc;

use futures::{Stream, StreamExt};
use uuid::Uuid;

use crate::normalized::NormalizedEvent;
use crate::prompt;

use super::{ChatCompletionsDriver, LlmDriver, LlmRequest, LlmSettings, Message, MessageRole};

/// Relay between the chat endpoint and the configured LLM provider.
#[derive(Clone)]
pub struct ChatRelay {
    settings: LlmSettings,
    driver: Arc<dyn LlmDriver>,
}

impl std::fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRelay").field("settings", &self.settings).finish_non_exhaustive()
    }
}

impl ChatRelay {
    /// Create a relay backed by the Chat Completions driver.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        let driver = Arc::new(ChatCompletionsDriver::new(settings.clone()));
        Self { settings, driver }
    }

    /// Create a relay with a custom driver. Used to substitute a scripted
    /// driver in tests.
    #[must_use]
    pub fn with_driver(settings: LlmSettings, driver: Arc<dyn LlmDriver>) -> Self {
        Self { settings, driver }
    }

    /// Get the LLM settings.
    #[must_use]
    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.settings.api_key.is_some()
    }

    /// Stream the assistant's reply to a conversation.
    ///
    /// The returned stream always terminates with [`NormalizedEvent::Done`],
    /// whether the provider said so, hung up, or failed mid-stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider rejects the request up front,
    /// before any content was produced.
    pub async fn stream_reply(
        &self,
        mut messages: Vec<Message>,
    ) -> anyhow::Result<std::pin::Pin<Box<dyn Stream<Item = NormalizedEvent> + Send>>> {
        if !messages.iter().any(|m| m.role == MessageRole::System) {
            messages.insert(0, Message::system(prompt::system_prompt()));
        }

        let request_id = Uuid::new_v4().to_string();
        tracing::info!(
            request_id = %request_id,
            message_count = messages.len(),
            model = %self.settings.model,
            "Starting chat relay"
        );

        let mut inner = self.driver.stream(LlmRequest { messages }).await?;

        let stream = async_stream::stream! {
            while let Some(result) = inner.next().await {
                match result {
                    Ok(NormalizedEvent::Done) => {
                        tracing::debug!(request_id = %request_id, "Relay stream completed");
                        yield NormalizedEvent::Done;
                        return;
                    }
                    Ok(event) => yield event,
                    Err(e) => {
                        tracing::error!(
                            request_id = %request_id,
                            error = %e,
                            "Relay stream failed mid-flight"
                        );
                        yield NormalizedEvent::Error { message: e.to_string(), code: None };
                        yield NormalizedEvent::Done;
                        return;
                    }
                }
            }
            // Provider closed the connection without a [DONE] sentinel.
            yield NormalizedEvent::Done;
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Provider;

    struct ScriptedDriver {
        events: Vec<anyhow::Result<NormalizedEvent>>,
    }

    #[async_trait::async_trait]
    impl LlmDriver for ScriptedDriver {
        async fn stream(
            &self,
            req: LlmRequest,
        ) -> anyhow::Result<
            std::pin::Pin<Box<dyn Stream<Item = anyhow::Result<NormalizedEvent>> + Send>>,
        > {
            assert_eq!(req.messages[0].role, MessageRole::System);
            let replayed: Vec<_> = self
                .events
                .iter()
                .map(|r| match r {
                    Ok(e) => Ok(e.clone()),
                    Err(e) => Err(anyhow::anyhow!(e.to_string())),
                })
                .collect();
            Ok(Box::pin(futures::stream::iter(replayed)))
        }
    }

    fn settings() -> LlmSettings {
        LlmSettings {
            base_url: "http://localhost:9999".to_string(),
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            provider: Provider::Generic,
        }
    }

    fn relay_with(events: Vec<anyhow::Result<NormalizedEvent>>) -> ChatRelay {
        ChatRelay::with_driver(settings(), Arc::new(ScriptedDriver { events }))
    }

    fn delta(text: &str) -> NormalizedEvent {
        NormalizedEvent::MessageDelta { text: text.to_string() }
    }

    #[tokio::test]
    async fn test_relay_prepends_system_prompt_and_passes_deltas() {
        let relay = relay_with(vec![Ok(delta("Bonjour ")), Ok(delta("!")), Ok(NormalizedEvent::Done)]);
        let stream = relay.stream_reply(vec![Message::user("Salut")]).await.unwrap();
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events, vec![delta("Bonjour "), delta("!"), NormalizedEvent::Done]);
    }

    #[tokio::test]
    async fn test_relay_flattens_mid_stream_errors() {
        let relay = relay_with(vec![Ok(delta("Bon")), Err(anyhow::anyhow!("connection reset"))]);
        let stream = relay.stream_reply(vec![Message::user("Salut")]).await.unwrap();
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], delta("Bon"));
        assert!(matches!(
            &events[1],
            NormalizedEvent::Error { message, .. } if message.contains("connection reset")
        ));
        assert_eq!(events[2], NormalizedEvent::Done);
    }

    #[tokio::test]
    async fn test_relay_appends_done_when_provider_hangs_up_silently() {
        let relay = relay_with(vec![Ok(delta("tronqué"))]);
        let stream = relay.stream_reply(vec![Message::user("Salut")]).await.unwrap();
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.last(), Some(&NormalizedEvent::Done));
    }

    #[tokio::test]
    async fn test_relay_keeps_client_system_prompt() {
        struct CapturingDriver;

        #[async_trait::async_trait]
        impl LlmDriver for CapturingDriver {
            async fn stream(
                &self,
                req: LlmRequest,
            ) -> anyhow::Result<
                std::pin::Pin<Box<dyn Stream<Item = anyhow::Result<NormalizedEvent>> + Send>>,
            > {
                let system_count =
                    req.messages.iter().filter(|m| m.role == MessageRole::System).count();
                assert_eq!(system_count, 1);
                assert_eq!(req.messages[0].content, "custom persona");
                Ok(Box::pin(futures::stream::iter(vec![Ok(NormalizedEvent::Done)])))
            }
        }

        let relay = ChatRelay::with_driver(settings(), Arc::new(CapturingDriver));
        let messages = vec![Message::system("custom persona"), Message::user("Salut")];
        let events: Vec<_> = relay.stream_reply(messages).await.unwrap().collect().await;
        assert_eq!(events, vec![NormalizedEvent::Done]);
    }

    #[test]
    fn test_has_credential() {
        let mut s = settings();
        assert!(ChatRelay::new(s.clone()).has_credential());
        s.api_key = None;
        assert!(!ChatRelay::new(s).has_credential());
    }
}
