//! Approval state machine
//!
//! Legal transitions: `pending → approved` and `pending → rejected`, both
//! terminal. The store's conditional update is the sole arbiter of
//! concurrent decisions; this module adds the role gate and the ordered
//! side effects (persist happens-before notify).

use tracing::{info, warn};

use crate::core::AppState;
use crate::i18n;
use crate::notify;
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderStatus, StaffRole};

/// Fixed reason recorded on operator rejection (two-button UI, no prompt)
pub const REJECTED_BY_STAFF: &str = "Отклонено администратором";

/// Requested decision outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    Approve,
    Reject,
}

impl DecisionOutcome {
    pub fn status(self) -> OrderStatus {
        match self {
            DecisionOutcome::Approve => OrderStatus::Approved,
            DecisionOutcome::Reject => OrderStatus::Rejected,
        }
    }

    /// Parse inline-button payloads: `approve:<id>` / `reject:<id>`
    pub fn parse_callback(data: &str) -> Option<(DecisionOutcome, &str)> {
        let (verb, order_id) = data.split_once(':')?;
        if order_id.is_empty() {
            return None;
        }
        match verb {
            "approve" => Some((DecisionOutcome::Approve, order_id)),
            "reject" => Some((DecisionOutcome::Reject, order_id)),
            _ => None,
        }
    }
}

/// Decide a pending sub-order
///
/// 1. `PermissionDenied` unless the actor holds a decision-capable role.
/// 2. `NotFound` if the order id does not resolve.
/// 3. `AlreadyDecided` if the conditional update finds the order no longer
///    pending; repeated or concurrent decisions get at most one winner.
/// 4. On success: the terminal state is committed, then the submitter is
///    notified (a crash between the two leaves a consistent terminal order
///    with an acceptable at-most-once notification gap).
pub async fn decide(
    state: &AppState,
    order_id: &str,
    actor_id: i64,
    outcome: DecisionOutcome,
    reason: Option<&str>,
) -> AppResult<Order> {
    if !state.staff.has_permission(actor_id, StaffRole::Sales) {
        return Err(AppError::permission_denied(format!(
            "actor {actor_id} cannot decide orders"
        )));
    }

    let order = crate::db::orders::find_by_id(&state.db.pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(order_id))?;

    let reason = match outcome {
        DecisionOutcome::Reject => Some(reason.unwrap_or(REJECTED_BY_STAFF)),
        DecisionOutcome::Approve => None,
    };

    // The conditional update is the only writer of terminal states
    let won =
        crate::db::orders::mark_decided(&state.db.pool, order_id, outcome.status(), actor_id, reason)
            .await?;
    if !won {
        return Err(AppError::AlreadyDecided(order_id.to_string()));
    }

    info!(
        order_id,
        actor_id,
        outcome = outcome.status().as_str(),
        "order decided"
    );

    // Persisted; reload the terminal row before emitting side effects
    let decided = crate::db::orders::find_by_id(&state.db.pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(order_id))?;

    // Submitter notification is best-effort after commit
    let locale = crate::db::users::get_locale(&state.db.pool, order.user_id).await?;
    let text = i18n::decision_notification(locale, &decided);
    if let Err(e) = notify::send_text(state.channel.as_ref(), order.user_id, &text, None).await {
        warn!(order_id, error = %e, "submitter decision notification failed");
    }

    Ok(decided)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::NullBlobSink;
    use crate::channel::{
        ChannelError, ChannelResult, Keyboard, MessageChannel, OutboundDocument, Update,
    };
    use crate::core::Config;
    use crate::db::DbService;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::models::{Category, OrderDraft, OrderItem, UserUpsert};
    use std::sync::Arc;

    /// Records every text delivery
    #[derive(Default)]
    struct RecorderChannel {
        texts: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl MessageChannel for RecorderChannel {
        async fn poll_updates(&self, _: i64, _: u64) -> ChannelResult<Vec<Update>> {
            Ok(Vec::new())
        }

        async fn send_text(
            &self,
            chat_id: i64,
            text: &str,
            _: Option<Keyboard>,
        ) -> ChannelResult<()> {
            self.texts.lock().push((chat_id, text.to_string()));
            Ok(())
        }

        async fn send_document(&self, _: i64, _: OutboundDocument) -> ChannelResult<()> {
            Ok(())
        }

        async fn edit_caption(&self, _: i64, _: i64, _: &str) -> ChannelResult<()> {
            Ok(())
        }

        async fn answer_callback(&self, _: &str, _: &str, _: bool) -> ChannelResult<()> {
            Err(ChannelError::Transport("not used in tests".into()))
        }
    }

    async fn state_with_order() -> (AppState, Arc<RecorderChannel>) {
        let db = DbService::open_in_memory().await.unwrap();
        let channel = Arc::new(RecorderChannel::default());
        let state = AppState::assemble(
            Config::for_tests(),
            db,
            channel.clone(),
            Arc::new(NullBlobSink),
        );

        crate::db::users::upsert(
            &state.db.pool,
            &UserUpsert {
                user_id: 42,
                username: None,
                first_name: Some("Иван".into()),
                last_name: None,
            },
        )
        .await
        .unwrap();

        crate::db::orders::create(
            &state.db.pool,
            &OrderDraft {
                order_id: "ORD-1-P1".into(),
                user_id: 42,
                client_name: "ООО Ромашка".into(),
                client_phone: "+998901234567".into(),
                client_address: "Ташкент".into(),
                items: vec![OrderItem {
                    id: 10_001,
                    name: "Мыло".into(),
                    quantity: 2,
                    price: 1500.0,
                }],
                total: 3000.0,
                category: Category::Cleaning,
                ticket_draft: vec![0x1B, 0x40],
            },
        )
        .await
        .unwrap();

        (state, channel)
    }

    #[test]
    fn test_parse_callback() {
        assert_eq!(
            DecisionOutcome::parse_callback("approve:ORD-1-P1"),
            Some((DecisionOutcome::Approve, "ORD-1-P1"))
        );
        assert_eq!(
            DecisionOutcome::parse_callback("reject:ORD-1-P2"),
            Some((DecisionOutcome::Reject, "ORD-1-P2"))
        );
        assert_eq!(DecisionOutcome::parse_callback("approve:"), None);
        assert_eq!(DecisionOutcome::parse_callback("ship:ORD-1"), None);
        assert_eq!(DecisionOutcome::parse_callback("approve"), None);
    }

    #[tokio::test]
    async fn test_permission_gate() {
        let (state, channel) = state_with_order().await;

        // Plain submitter denied
        let err = decide(&state, "ORD-1-P1", 42, DecisionOutcome::Approve, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));

        // Status unchanged, nothing sent
        let order = crate::db::orders::find_by_id(&state.db.pool, "ORD-1-P1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(channel.texts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_not_found() {
        let (state, _) = state_with_order().await;
        let err = decide(&state, "ORD-missing", 200, DecisionOutcome::Approve, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sales_approves_and_submitter_notified() {
        let (state, channel) = state_with_order().await;

        let order = decide(&state, "ORD-1-P1", 200, DecisionOutcome::Approve, None)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Approved);
        assert_eq!(order.decided_by, Some(200));

        let texts = channel.texts.lock();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, 42);
        assert!(texts[0].1.contains("ORD-1-P1"));
    }

    #[tokio::test]
    async fn test_second_decision_is_idempotent_noop() {
        let (state, channel) = state_with_order().await;

        decide(&state, "ORD-1-P1", 200, DecisionOutcome::Approve, None)
            .await
            .unwrap();

        let err = decide(&state, "ORD-1-P1", 201, DecisionOutcome::Reject, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyDecided(_)));

        // No extra side effects, first outcome stands
        assert_eq!(channel.texts.lock().len(), 1);
        let order = crate::db::orders::find_by_id(&state.db.pool, "ORD-1-P1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::Approved);
        assert_eq!(order.decided_by, Some(200));
    }

    #[tokio::test]
    async fn test_reject_records_default_reason() {
        let (state, _) = state_with_order().await;

        let order = decide(&state, "ORD-1-P1", 100, DecisionOutcome::Reject, None)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Rejected);
        assert_eq!(order.reject_reason.as_deref(), Some(REJECTED_BY_STAFF));
    }
}
