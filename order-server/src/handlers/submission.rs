//! Submission handlers: web-app payload intake and the signature gate

use tracing::info;

use crate::channel::{IncomingMessage, Keyboard, SubmissionEnvelope};
use crate::core::AppState;
use crate::i18n;
use crate::notify;
use crate::orders::intake;
use crate::utils::AppResult;

use super::commands::menu_for;

/// A web-app submission arrived: validate and park it behind the
/// signature gate. No order state is created here.
pub async fn handle_payload(state: &AppState, message: &IncomingMessage) -> AppResult<()> {
    let user_id = message.from.id;
    let locale = crate::db::users::get_locale(&state.db.pool, user_id).await?;

    let Some(raw) = &message.web_app_data else {
        return Ok(());
    };
    let envelope: SubmissionEnvelope = serde_json::from_str(&raw.data)?;
    info!(user_id, items = envelope.order.items.len(), "received web app submission");

    if envelope.order.items.is_empty() {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::empty_order(locale),
            None,
        )
        .await;
    }
    // Item sanity is enforced before parking so a bad submission
    // leaves no state at all
    intake::validate_items(&envelope.order.items)?;

    state.pending.park(user_id, envelope.order);

    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        i18n::ask_signature(locale),
        Some(Keyboard::Remove),
    )
    .await
}

/// A photo arrived: if a submission is parked for this submitter, the
/// signature releases it into the intake pipeline. A photo with nothing
/// parked (or an expired park) is ignored.
pub async fn handle_signature(state: &AppState, message: &IncomingMessage) -> AppResult<()> {
    let user_id = message.from.id;

    let Some(payload) = state.pending.take(user_id) else {
        return Ok(());
    };

    let locale = crate::db::users::get_locale(&state.db.pool, user_id).await?;
    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        i18n::processing(locale),
        None,
    )
    .await?;

    let created =
        intake::process_submission(state, &message.from, locale, &payload).await?;
    info!(user_id, sub_orders = created.len(), "submission processed");

    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        i18n::main_menu(locale),
        Some(menu_for(state, locale)),
    )
    .await
}
