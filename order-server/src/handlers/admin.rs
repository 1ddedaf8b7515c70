//! Operator commands: export and broadcast (super-admin only)

use chrono::Utc;
use tracing::info;

use crate::channel::{IncomingMessage, OutboundDocument};
use crate::core::AppState;
use crate::i18n;
use crate::notify;
use crate::utils::AppResult;

/// `/orders_export`: all orders as `;`-delimited text
pub async fn orders_export(state: &AppState, message: &IncomingMessage) -> AppResult<()> {
    // Silently ignored for everyone but the super-admin
    if message.from.id != state.config.super_admin_id {
        return Ok(());
    }

    let orders = crate::db::orders::list_all(&state.db.pool, 10_000).await?;
    if orders.is_empty() {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::export_empty(),
            None,
        )
        .await;
    }

    // UTF-8 BOM so spreadsheet imports detect the encoding
    let mut csv = String::from("\u{FEFF}");
    csv.push_str("order_id;client_name;user_id;total;created_at;status;category\n");
    for order in &orders {
        let row = [
            order.order_id.clone(),
            order.client_name.clone(),
            order.user_id.to_string(),
            order.total.to_string(),
            order.created_at.clone(),
            order.status.as_str().to_string(),
            order.category.tag().to_string(),
        ];
        let line: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        csv.push_str(&line.join(";"));
        csv.push('\n');
    }

    info!(count = orders.len(), "orders export requested");

    notify::send_document(
        state.channel.as_ref(),
        message.chat.id,
        OutboundDocument {
            filename: format!("orders_export_{}.csv", Utc::now().format("%Y%m%d_%H%M%S")),
            bytes: csv.into_bytes(),
            caption: i18n::export_caption().to_string(),
            keyboard: None,
        },
    )
    .await
}

/// Quote a field when it contains the delimiter, quotes or newlines
fn csv_field(field: &str) -> String {
    if field.contains(';') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `/sendall <text>`: broadcast to every known user
pub async fn sendall(state: &AppState, message: &IncomingMessage, text: &str) -> AppResult<()> {
    if message.from.id != state.config.super_admin_id {
        return Ok(());
    }

    let broadcast_text = text
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();
    if broadcast_text.is_empty() {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::sendall_usage(),
            None,
        )
        .await;
    }

    let recipients = crate::db::users::list_all_ids(&state.db.pool).await?;
    if recipients.is_empty() {
        return notify::send_text(
            state.channel.as_ref(),
            message.chat.id,
            i18n::sendall_no_users(),
            None,
        )
        .await;
    }

    let report = notify::broadcast_text(state.channel.as_ref(), &recipients, broadcast_text).await;
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "broadcast finished"
    );

    notify::send_text(
        state.channel.as_ref(),
        message.chat.id,
        &i18n::sendall_report(report.succeeded, report.failed),
        None,
    )
    .await
}
