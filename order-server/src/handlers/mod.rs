//! Inbound update handlers
//!
//! One admitted update is routed here; every handler failure is converted
//! at this boundary into a localized generic failure message so no raw
//! error ever reaches a submitter.

pub mod admin;
pub mod commands;
pub mod decision;
pub mod submission;

use tracing::error;

use crate::channel::{IncomingMessage, Keyboard, ReplyButton, Update};
use crate::core::AppState;
use crate::i18n::{self, Locale};
use crate::utils::AppResult;

/// Route one admitted update to its handler
pub async fn handle_update(state: &AppState, update: Update) {
    if let Some(message) = update.message {
        let chat_id = message.chat.id;
        let user_id = message.from.id;
        if let Err(e) = route_message(state, message).await {
            error!(user_id, error = %e, "message handler failed");
            let locale = crate::db::users::get_locale(&state.db.pool, user_id)
                .await
                .unwrap_or(Locale::Ru);
            let _ = state
                .channel
                .send_text(chat_id, i18n::generic_failure(locale), None)
                .await;
        }
        return;
    }

    if let Some(callback) = update.callback_query {
        decision::handle_callback(state, callback).await;
    }
}

async fn route_message(state: &AppState, message: IncomingMessage) -> AppResult<()> {
    if message.web_app_data.is_some() {
        return submission::handle_payload(state, &message).await;
    }
    if !message.photo.is_empty() {
        return submission::handle_signature(state, &message).await;
    }

    let Some(text) = message.text.clone() else {
        return Ok(());
    };
    let text = text.trim().to_string();

    match text.as_str() {
        "/start" => return commands::start(state, &message).await,
        i18n::BTN_LANG_RU => return commands::set_language(state, &message, Locale::Ru).await,
        i18n::BTN_LANG_UZ => return commands::set_language(state, &message, Locale::Uz).await,
        "/orders_export" => return admin::orders_export(state, &message).await,
        _ => {}
    }

    if text == i18n::btn_change_language(Locale::Ru) || text == i18n::btn_change_language(Locale::Uz)
    {
        return commands::change_language(state, &message).await;
    }
    if text == i18n::btn_my_orders(Locale::Ru) || text == i18n::btn_my_orders(Locale::Uz) {
        return commands::my_orders(state, &message).await;
    }
    if text.starts_with("/get_doc") {
        return commands::get_doc(state, &message, &text).await;
    }
    if text.starts_with("/sendall") {
        return admin::sendall(state, &message, &text).await;
    }

    Ok(())
}

// ==================== Keyboards ====================

/// Language selection reply keyboard
pub fn language_keyboard() -> Keyboard {
    Keyboard::Reply(vec![vec![
        ReplyButton::text(i18n::BTN_LANG_RU),
        ReplyButton::text(i18n::BTN_LANG_UZ),
    ]])
}

/// Main menu reply keyboard (web-app order button on top)
pub fn main_menu_keyboard(locale: Locale, webapp_url: &str) -> Keyboard {
    Keyboard::Reply(vec![
        vec![ReplyButton::web_app(i18n::btn_make_order(locale), webapp_url)],
        vec![ReplyButton::text(i18n::btn_my_orders(locale))],
        vec![ReplyButton::text(i18n::btn_change_language(locale))],
    ])
}
