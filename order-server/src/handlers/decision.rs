//! Staff decision callbacks (approve/reject buttons)

use tracing::{error, warn};

use crate::channel::CallbackQuery;
use crate::core::AppState;
use crate::i18n;
use crate::orders::approval::{self, DecisionOutcome};
use crate::utils::AppError;

/// Handle an inline-button press from the staff queue
///
/// The state machine owns persistence and submitter notification; this
/// handler owns the staff-side confirmation (caption edit + callback
/// acknowledgement) because only it holds the originating message.
pub async fn handle_callback(state: &AppState, callback: CallbackQuery) {
    let Some(data) = callback.data.as_deref() else {
        return;
    };
    let Some((outcome, order_id)) = DecisionOutcome::parse_callback(data) else {
        return;
    };
    let actor_id = callback.from.id;

    match approval::decide(state, order_id, actor_id, outcome, None).await {
        Ok(order) => {
            // Confirmation update on the message the decision came from
            if let Some(origin) = &callback.message {
                let caption = format!(
                    "{}{}",
                    origin.caption.as_deref().unwrap_or_default(),
                    i18n::staff_decided_suffix(order.status, &state.staff.display_name(actor_id)),
                );
                if let Err(e) = state
                    .channel
                    .edit_caption(origin.chat.id, origin.message_id, &caption)
                    .await
                {
                    warn!(order_id, error = %e, "staff caption update failed");
                }
            }
            ack(state, &callback.id, i18n::staff_decision_ack(order.status), false).await;
        }
        Err(AppError::PermissionDenied(_)) => {
            ack(state, &callback.id, i18n::staff_no_permission(), true).await;
        }
        Err(AppError::NotFound(_)) => {
            ack(state, &callback.id, i18n::staff_order_not_found(), true).await;
        }
        Err(AppError::AlreadyDecided(_)) => {
            ack(state, &callback.id, i18n::staff_already_decided(), true).await;
        }
        Err(e) => {
            error!(order_id, actor_id, error = %e, "decision failed");
            ack(state, &callback.id, i18n::staff_action_failed(), true).await;
        }
    }
}

async fn ack(state: &AppState, callback_id: &str, text: &str, alert: bool) {
    if let Err(e) = state.channel.answer_callback(callback_id, text, alert).await {
        warn!(error = %e, "callback acknowledgement failed");
    }
}
