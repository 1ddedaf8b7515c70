//! Channel wire types
//!
//! Inbound update shapes and outbound keyboard/document payloads.

use serde::Deserialize;
use shared::models::UserUpsert;

// ==================== Inbound ====================

/// One inbound event from the channel
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// The acting user, if the update carries one
    pub fn actor_id(&self) -> Option<i64> {
        if let Some(m) = &self.message {
            return Some(m.from.id);
        }
        if let Some(c) = &self.callback_query {
            return Some(c.from.id);
        }
        None
    }
}

/// Message sender
#[derive(Debug, Clone, Deserialize)]
pub struct Peer {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Peer {
    pub fn to_upsert(&self) -> UserUpsert {
        UserUpsert {
            user_id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebAppData {
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub from: Peer,
    pub chat: ChatRef,
    #[serde(default)]
    pub text: Option<String>,
    /// Non-empty when the message carries an image (the signature gate)
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    #[serde(default)]
    pub web_app_data: Option<WebAppData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackMessage {
    pub message_id: i64,
    pub chat: ChatRef,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Inline-button press
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: Peer,
    #[serde(default)]
    pub data: Option<String>,
    /// The staff-facing message the press originated from
    #[serde(default)]
    pub message: Option<CallbackMessage>,
}

// ==================== Web-app submission payload ====================

/// Envelope posted by the web app through the channel
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionEnvelope {
    #[serde(default)]
    pub order: SubmissionPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(default)]
    pub items: Vec<SubmissionItem>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub client_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
}

// ==================== Outbound ====================

#[derive(Debug, Clone)]
pub struct ReplyButton {
    pub text: String,
    pub web_app_url: Option<String>,
}

impl ReplyButton {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            web_app_url: None,
        }
    }

    pub fn web_app(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            web_app_url: Some(url.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// Outbound keyboard attachment
#[derive(Debug, Clone)]
pub enum Keyboard {
    /// Persistent reply keyboard shown under the input field
    Reply(Vec<Vec<ReplyButton>>),
    /// Inline buttons attached to one message
    Inline(Vec<Vec<InlineButton>>),
    /// Remove the current reply keyboard
    Remove,
}

impl Keyboard {
    /// Channel-API representation (`reply_markup`)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Keyboard::Reply(rows) => {
                let rows: Vec<Vec<serde_json::Value>> = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|b| match &b.web_app_url {
                                Some(url) => serde_json::json!({
                                    "text": b.text,
                                    "web_app": {"url": url},
                                }),
                                None => serde_json::json!({"text": b.text}),
                            })
                            .collect()
                    })
                    .collect();
                serde_json::json!({"keyboard": rows, "resize_keyboard": true})
            }
            Keyboard::Inline(rows) => {
                let rows: Vec<Vec<serde_json::Value>> = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|b| {
                                serde_json::json!({
                                    "text": b.text,
                                    "callback_data": b.callback_data,
                                })
                            })
                            .collect()
                    })
                    .collect();
                serde_json::json!({"inline_keyboard": rows})
            }
            Keyboard::Remove => serde_json::json!({"remove_keyboard": true}),
        }
    }
}

/// Outbound document payload
#[derive(Debug, Clone)]
pub struct OutboundDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub caption: String,
    pub keyboard: Option<Keyboard>,
}
