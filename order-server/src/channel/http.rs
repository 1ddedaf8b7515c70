//! HTTP channel adapter (Bot-API-style interface)

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::{Keyboard, OutboundDocument, Update};
use super::{ChannelError, ChannelResult, MessageChannel};

/// HTTP message channel
///
/// Talks to a hosted chat API: JSON method calls, multipart document
/// upload, long-poll update fetching.
#[derive(Debug, Clone)]
pub struct HttpChannel {
    client: reqwest::Client,
    base_url: String,
}

/// Standard API response envelope
#[derive(Debug, serde::Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

impl HttpChannel {
    /// Create a channel adapter for `<api_base>/bot<token>`
    pub fn new(api_base: &str, token: &str) -> ChannelResult<Self> {
        let client = reqwest::Client::builder()
            // Must exceed the long-poll window or getUpdates times out client-side
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ChannelError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> ChannelResult<T> {
        if envelope.ok {
            return envelope.result.ok_or_else(|| ChannelError::Api {
                code: 0,
                description: "ok response without result".into(),
            });
        }
        let code = envelope.error_code.unwrap_or(0);
        let description = envelope.description.unwrap_or_else(|| "unknown".into());
        if code == 403 {
            return Err(ChannelError::Forbidden(description));
        }
        Err(ChannelError::Api { code, description })
    }

    async fn call<T: DeserializeOwned + Default>(
        &self,
        method: &str,
        payload: serde_json::Value,
    ) -> ChannelResult<T> {
        debug!(method, "channel call");
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;
        Self::unwrap_envelope(envelope)
    }
}

#[async_trait]
impl MessageChannel for HttpChannel {
    async fn poll_updates(&self, offset: i64, timeout_secs: u64) -> ChannelResult<Vec<Update>> {
        self.call(
            "getUpdates",
            serde_json::json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> ChannelResult<()> {
        let mut payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(kb) = keyboard {
            payload["reply_markup"] = kb.to_json();
        }
        self.call::<serde_json::Value>("sendMessage", payload)
            .await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, doc: OutboundDocument) -> ChannelResult<()> {
        let mut form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", doc.caption.clone())
            .part(
                "document",
                reqwest::multipart::Part::bytes(doc.bytes.clone()).file_name(doc.filename.clone()),
            );
        if let Some(kb) = &doc.keyboard {
            form = form.text("reply_markup", kb.to_json().to_string());
        }

        let response = self
            .client
            .post(format!("{}/sendDocument", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        let envelope: ApiEnvelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;
        Self::unwrap_envelope(envelope)?;
        Ok(())
    }

    async fn edit_caption(
        &self,
        chat_id: i64,
        message_id: i64,
        caption: &str,
    ) -> ChannelResult<()> {
        self.call::<serde_json::Value>(
            "editMessageCaption",
            serde_json::json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "caption": caption,
            }),
        )
        .await?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: &str,
        alert: bool,
    ) -> ChannelResult<()> {
        self.call::<serde_json::Value>(
            "answerCallbackQuery",
            serde_json::json!({
                "callback_query_id": callback_id,
                "text": text,
                "show_alert": alert,
            }),
        )
        .await?;
        Ok(())
    }
}
