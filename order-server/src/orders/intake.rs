//! Submission intake pipeline
//!
//! One released submission becomes N sub-orders, one per category present.
//! Per category the ordering is strict: render → persist → upload
//! (best-effort) → notify submitter → notify staff. A category that fails
//! to render or persist is abandoned before any store write for it;
//! sibling categories proceed independently.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::channel::{
    InlineButton, Keyboard, OutboundDocument, Peer, SubmissionItem, SubmissionPayload,
};
use crate::core::AppState;
use crate::i18n::{self, Locale};
use crate::notify;
use crate::orders::splitter;
use crate::ticket::TicketJob;
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderDraft, OrderItem, OrderStatus, items_total};

/// Validate wire items into domain line items
///
/// Quantity must be positive, price non-negative; violations discard the
/// whole submission before any state is created.
pub fn validate_items(raw: &[SubmissionItem]) -> AppResult<Vec<OrderItem>> {
    if raw.is_empty() {
        return Err(AppError::validation("empty item list"));
    }
    raw.iter()
        .map(|item| {
            if item.quantity <= 0 {
                return Err(AppError::validation(format!(
                    "item {}: non-positive quantity {}",
                    item.id, item.quantity
                )));
            }
            if item.price < 0.0 {
                return Err(AppError::validation(format!(
                    "item {}: negative price {}",
                    item.id, item.price
                )));
            }
            Ok(OrderItem {
                id: item.id,
                name: item.name.clone(),
                quantity: item.quantity as u32,
                price: item.price,
            })
        })
        .collect()
}

/// Process a signature-released submission into per-category sub-orders
///
/// Returns the ids of the sub-orders that were fully created. A failed
/// category is logged and skipped; it never appears in the result.
pub async fn process_submission(
    state: &AppState,
    submitter: &Peer,
    locale: Locale,
    payload: &SubmissionPayload,
) -> AppResult<Vec<String>> {
    let items = validate_items(&payload.items)?;
    let groups = splitter::split(&items);

    // Deterministic identity: submission time + submitter + part suffix
    let base_id = format!(
        "ORD-{}-{}",
        Utc::now().format("%Y%m%d%H%M%S"),
        submitter.id
    );

    let mut created = Vec::new();
    let mut failed_categories = 0usize;

    for (part, (category, category_items)) in groups.iter().enumerate() {
        let sub_order_id = format!("{}-P{}", base_id, part + 1);
        let total = items_total(category_items);
        let tracking_token = format!("ORDER:{sub_order_id}");

        // 1. Render. A fault here aborts only this category.
        let ticket = match state.renderer.render(&TicketJob {
            order_id: &sub_order_id,
            client_name: &payload.client_name,
            client_phone: &payload.client_phone,
            client_address: &payload.client_address,
            items: category_items,
            total,
            tracking_token: &tracking_token,
        }) {
            Ok(bytes) => bytes,
            Err(e) => {
                let e = AppError::Render(e);
                error!(order_id = %sub_order_id, error = %e, "ticket rendering failed");
                failed_categories += 1;
                continue;
            }
        };

        // 2. Persist (status = pending, draft attached).
        let draft = OrderDraft {
            order_id: sub_order_id.clone(),
            user_id: submitter.id,
            client_name: payload.client_name.clone(),
            client_phone: payload.client_phone.clone(),
            client_address: payload.client_address.clone(),
            items: category_items.clone(),
            total,
            category: *category,
            ticket_draft: ticket.clone(),
        };
        if let Err(e) = crate::db::orders::create(&state.db.pool, &draft).await {
            error!(order_id = %sub_order_id, error = %e, "order persist failed");
            failed_categories += 1;
            continue;
        }

        let order = Order {
            order_id: sub_order_id.clone(),
            user_id: submitter.id,
            client_name: payload.client_name.clone(),
            client_phone: payload.client_phone.clone(),
            client_address: payload.client_address.clone(),
            items: category_items.clone(),
            total,
            category: *category,
            status: OrderStatus::Pending,
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            decided_at: None,
            decided_by: None,
            reject_reason: None,
        };

        // 3. Mirror to the blob sink. Attempted once; the outcome is
        //    logged and discarded by policy.
        if let Err(e) = state
            .blob
            .upload(&ticket, &format!("{sub_order_id}.bin"))
            .await
        {
            let e = AppError::from(e);
            warn!(order_id = %sub_order_id, error = %e, "blob upload failed");
        }

        // 4. Document + summary to the submitter.
        let caption = i18n::order_created_caption(locale, &order);
        if let Err(e) = notify::send_document(
            state.channel.as_ref(),
            submitter.id,
            OutboundDocument {
                filename: format!("order_{sub_order_id}.bin"),
                bytes: ticket.clone(),
                caption,
                keyboard: None,
            },
        )
        .await
        {
            warn!(order_id = %sub_order_id, error = %e, "submitter delivery failed");
        }

        // 5. Document + decision controls to the staff queue.
        let staff_caption = i18n::staff_new_order(&order, &submitter.to_upsert().display_name());
        if let Err(e) = notify::send_document(
            state.channel.as_ref(),
            state.config.staff_chat_id,
            OutboundDocument {
                filename: format!("order_{sub_order_id}.bin"),
                bytes: ticket,
                caption: staff_caption,
                keyboard: Some(decision_keyboard(&sub_order_id)),
            },
        )
        .await
        {
            error!(order_id = %sub_order_id, error = %e, "staff queue delivery failed");
        }

        info!(
            order_id = %sub_order_id,
            category = %category,
            total,
            "sub-order created"
        );
        created.push(sub_order_id);
    }

    if failed_categories > 0 && created.is_empty() {
        // Nothing survived: surface one generic failure to the submitter
        return Err(AppError::internal("all categories failed"));
    }

    Ok(created)
}

/// Approve/reject inline controls carrying the sub-order id
pub fn decision_keyboard(order_id: &str) -> Keyboard {
    Keyboard::Inline(vec![vec![
        InlineButton {
            text: i18n::btn_approve().into(),
            callback_data: format!("approve:{order_id}"),
        },
        InlineButton {
            text: i18n::btn_reject().into(),
            callback_data: format!("reject:{order_id}"),
        },
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_item(id: i64, qty: i64, price: f64) -> SubmissionItem {
        SubmissionItem {
            id,
            name: format!("item-{id}"),
            quantity: qty,
            price,
        }
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(
            validate_items(&[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_quantity() {
        assert!(validate_items(&[raw_item(1, 0, 1.0)]).is_err());
        assert!(validate_items(&[raw_item(1, -2, 1.0)]).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        assert!(validate_items(&[raw_item(1, 1, -0.5)]).is_err());
    }

    #[test]
    fn test_validate_converts() {
        let items = validate_items(&[raw_item(10_001, 2, 1500.0)]).unwrap();
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, 1500.0);
    }

    #[test]
    fn test_decision_keyboard_payloads() {
        let kb = decision_keyboard("ORD-1-P1");
        let json = kb.to_json();
        assert_eq!(json["inline_keyboard"][0][0]["callback_data"], "approve:ORD-1-P1");
        assert_eq!(json["inline_keyboard"][0][1]["callback_data"], "reject:ORD-1-P1");
    }
}
