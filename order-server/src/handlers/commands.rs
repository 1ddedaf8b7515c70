//! User commands: start, language, order history, document fetch

use crate::channel::{IncomingMessage, Keyboard, OutboundDocument};
use crate::core::AppState;
use crate::i18n::{self, Locale};
use crate::notify;
use crate::utils::AppResult;

use super::{language_keyboard, main_menu_keyboard};

/// `/start`: register the user and offer the language choice
pub async fn start(state: &AppState, message: &IncomingMessage) -> AppResult<()> {
    // A restart drops any parked submission
    state.pending.take(message.from.id);

    crate::db::users::upsert(&state.db.pool, &message.from.to_upsert()).await?;
    let locale = crate::db::users::get_locale(&state.db.pool, message.from.id).await?;

    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        i18n::welcome(locale),
        Some(language_keyboard()),
    )
    .await
}

/// Language button pressed: persist and show the main menu
pub async fn set_language(
    state: &AppState,
    message: &IncomingMessage,
    locale: Locale,
) -> AppResult<()> {
    crate::db::users::set_locale(&state.db.pool, message.from.id, locale).await?;

    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        i18n::language_saved(locale),
        Some(main_menu_keyboard(locale, &state.config.webapp_url)),
    )
    .await
}

/// "Change language" menu entry
pub async fn change_language(state: &AppState, message: &IncomingMessage) -> AppResult<()> {
    let locale = crate::db::users::get_locale(&state.db.pool, message.from.id).await?;

    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        i18n::choose_language(locale),
        Some(language_keyboard()),
    )
    .await
}

/// "My orders": the submitter's ten most recent sub-orders
pub async fn my_orders(state: &AppState, message: &IncomingMessage) -> AppResult<()> {
    let user_id = message.from.id;
    let locale = crate::db::users::get_locale(&state.db.pool, user_id).await?;

    let orders = crate::db::orders::list_for_submitter(&state.db.pool, user_id, 10).await?;
    if orders.is_empty() {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::no_orders(locale),
            None,
        )
        .await;
    }

    let mut text = i18n::my_orders_header(locale).to_string();
    for order in &orders {
        text.push_str(&i18n::my_orders_entry(locale, order));
    }
    text.push_str(i18n::my_orders_footer(locale));

    notify::send_text(state.channel.as_ref(), message.chat.id, &text, None).await
}

/// `/get_doc <order_id>`: fetch a sub-order document
///
/// Submitters see only their own orders; staff may fetch any order.
pub async fn get_doc(state: &AppState, message: &IncomingMessage, text: &str) -> AppResult<()> {
    let user_id = message.from.id;
    let locale = crate::db::users::get_locale(&state.db.pool, user_id).await?;

    let Some(order_id) = text.split_whitespace().nth(1) else {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::get_doc_usage(locale),
            None,
        )
        .await;
    };

    let order = if state.staff.is_staff(user_id) {
        crate::db::orders::find_by_id(&state.db.pool, order_id).await?
    } else {
        crate::db::orders::find_for_submitter(&state.db.pool, order_id, user_id).await?
    };
    let Some(order) = order else {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::order_not_found(locale),
            None,
        )
        .await;
    };

    let Some(bytes) = crate::db::orders::get_document(&state.db.pool, &order.order_id).await? else {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::doc_unavailable(locale),
            None,
        )
        .await;
    };

    notify::send_document(
        state.channel.as_ref(),
        message.chat.id,
        OutboundDocument {
            filename: format!("order_{}.bin", order.order_id),
            bytes,
            caption: i18n::doc_caption(locale, &order.order_id),
            keyboard: None,
        },
    )
    .await
}

/// Shared helper: main menu for a locale (used after intake completes)
pub fn menu_for(state: &AppState, locale: Locale) -> Keyboard {
    main_menu_keyboard(locale, &state.config.webapp_url)
}
