//! End-to-end intake flow: submission → signature → sub-orders → decision
//!
//! Drives the real handlers over an in-memory store and a recording
//! channel fake; only the chat transport and blob sink are substituted.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use order_server::channel::{
    CallbackQuery, ChannelResult, IncomingMessage, Keyboard, MessageChannel, OutboundDocument,
    Peer, Update,
};
use order_server::core::{AppState, Config};
use order_server::db::DbService;
use order_server::handlers;
use order_server::{blob::NullBlobSink, db};
use shared::models::OrderStatus;

/// Records every outbound interaction
#[derive(Default)]
struct TestChannel {
    texts: Mutex<Vec<(i64, String)>>,
    documents: Mutex<Vec<(i64, OutboundDocument)>>,
    captions: Mutex<Vec<(i64, i64, String)>>,
    acks: Mutex<Vec<(String, String, bool)>>,
}

#[async_trait]
impl MessageChannel for TestChannel {
    async fn poll_updates(&self, _offset: i64, _timeout: u64) -> ChannelResult<Vec<Update>> {
        Ok(Vec::new())
    }

    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        _keyboard: Option<Keyboard>,
    ) -> ChannelResult<()> {
        self.texts.lock().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, doc: OutboundDocument) -> ChannelResult<()> {
        self.documents.lock().push((chat_id, doc));
        Ok(())
    }

    async fn edit_caption(&self, chat_id: i64, message_id: i64, caption: &str) -> ChannelResult<()> {
        self.captions
            .lock()
            .push((chat_id, message_id, caption.to_string()));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str, alert: bool) -> ChannelResult<()> {
        self.acks
            .lock()
            .push((callback_id.to_string(), text.to_string(), alert));
        Ok(())
    }
}

const SUBMITTER: i64 = 42;
const SALES_ADMIN: i64 = 200;
const STAFF_CHAT: i64 = -1000;

fn submitter_peer() -> Peer {
    serde_json::from_value(serde_json::json!({
        "id": SUBMITTER,
        "username": "ivan",
        "first_name": "Иван",
    }))
    .unwrap()
}

fn text_message(text: &str) -> IncomingMessage {
    serde_json::from_value(serde_json::json!({
        "message_id": 1,
        "from": {"id": SUBMITTER, "username": "ivan", "first_name": "Иван"},
        "chat": {"id": SUBMITTER},
        "text": text,
    }))
    .unwrap()
}

fn update(message: IncomingMessage) -> Update {
    Update {
        update_id: 1,
        message: Some(message),
        callback_query: None,
    }
}

fn web_app_submission() -> IncomingMessage {
    let payload = serde_json::json!({
        "order": {
            "items": [
                {"id": 10_001, "name": "Мыло жидкое", "quantity": 2, "price": 1500.0},
                {"id": 30_001, "name": "Бутылка ПЭТ 1л", "quantity": 1, "price": 500.0},
                {"id": 99_999, "name": "Неизвестный товар", "quantity": 1, "price": 100.0},
            ],
            "total": 3600.0,
            "clientName": "ООО Ромашка",
            "clientPhone": "+998901234567",
            "clientAddress": "г. Ташкент, ул. Катартал, дом 28",
        }
    });
    serde_json::from_value(serde_json::json!({
        "message_id": 2,
        "from": {"id": SUBMITTER, "username": "ivan", "first_name": "Иван"},
        "chat": {"id": SUBMITTER},
        "web_app_data": {"data": payload.to_string()},
    }))
    .unwrap()
}

fn signature_photo() -> IncomingMessage {
    serde_json::from_value(serde_json::json!({
        "message_id": 3,
        "from": {"id": SUBMITTER, "username": "ivan", "first_name": "Иван"},
        "chat": {"id": SUBMITTER},
        "photo": [{"file_id": "sig-1"}],
    }))
    .unwrap()
}

fn approve_callback(order_id: &str, actor_id: i64) -> Update {
    Update {
        update_id: 9,
        message: None,
        callback_query: Some(
            serde_json::from_value::<CallbackQuery>(serde_json::json!({
                "id": "cb-1",
                "from": {"id": actor_id, "first_name": "Отдел"},
                "data": format!("approve:{order_id}"),
                "message": {
                    "message_id": 77,
                    "chat": {"id": STAFF_CHAT},
                    "caption": "📦 Новый заказ!",
                },
            }))
            .unwrap(),
        ),
    }
}

async fn test_state() -> (AppState, Arc<TestChannel>) {
    let db = DbService::open_in_memory().await.unwrap();
    let channel = Arc::new(TestChannel::default());
    let state = AppState::assemble(
        Config::for_tests(),
        db,
        channel.clone(),
        Arc::new(NullBlobSink),
    );
    db::users::upsert(&state.db.pool, &submitter_peer().to_upsert())
        .await
        .unwrap();
    (state, channel)
}

#[tokio::test]
async fn two_category_submission_produces_independent_sub_orders() {
    let (state, channel) = test_state().await;

    // 1. Web-app payload parks the submission behind the signature gate
    handlers::handle_update(&state, update(web_app_submission())).await;
    assert_eq!(state.pending.len(), 1);
    assert!(
        channel
            .texts
            .lock()
            .iter()
            .any(|(chat, text)| *chat == SUBMITTER && text.contains("подпись")),
        "submitter must be asked for a signature"
    );
    // Nothing persisted yet
    assert!(
        db::orders::list_for_submitter(&state.db.pool, SUBMITTER, 10)
            .await
            .unwrap()
            .is_empty()
    );

    // 2. The signature releases the submission into the pipeline
    handlers::handle_update(&state, update(signature_photo())).await;
    assert!(state.pending.is_empty());

    let orders = db::orders::list_for_submitter(&state.db.pool, SUBMITTER, 10)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2, "one sub-order per category present");

    let p1 = orders
        .iter()
        .find(|o| o.order_id.ends_with("-P1"))
        .expect("first-seen category gets -P1");
    let p2 = orders
        .iter()
        .find(|o| o.order_id.ends_with("-P2"))
        .expect("second category gets -P2");

    // First-seen order: cleaning item came before the PET item
    assert_eq!(p1.category.tag(), "cleaning");
    assert_eq!(p2.category.tag(), "plastic_pet");
    assert_eq!(p1.total, 3000.0);
    assert_eq!(p2.total, 500.0);
    assert_eq!(p1.status, OrderStatus::Pending);
    assert_eq!(p2.status, OrderStatus::Pending);

    // The uncategorized item was dropped from every sub-order
    for order in &orders {
        assert!(order.items.iter().all(|i| i.id != 99_999));
    }

    // Non-empty draft documents were persisted for both
    for order in &orders {
        let draft = db::orders::get_document(&state.db.pool, &order.order_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!draft.is_empty());
    }

    // Submitter and staff each received one document per sub-order
    let documents = channel.documents.lock();
    assert_eq!(
        documents.iter().filter(|(chat, _)| *chat == SUBMITTER).count(),
        2
    );
    let staff_docs: Vec<_> = documents
        .iter()
        .filter(|(chat, _)| *chat == STAFF_CHAT)
        .collect();
    assert_eq!(staff_docs.len(), 2);
    for (_, doc) in &staff_docs {
        assert!(doc.keyboard.is_some(), "staff copy carries decision controls");
    }
    drop(documents);

    // 3. Approving one sub-order leaves the sibling untouched
    let p1_id = p1.order_id.clone();
    handlers::handle_update(&state, approve_callback(&p1_id, SALES_ADMIN)).await;

    let p1_after = db::orders::find_by_id(&state.db.pool, &p1_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p1_after.status, OrderStatus::Approved);
    assert_eq!(p1_after.decided_by, Some(SALES_ADMIN));

    let p2_after = db::orders::find_by_id(&state.db.pool, &p2.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p2_after.status, OrderStatus::Pending);
    assert!(p2_after.decided_by.is_none());

    // Staff message was annotated and the press acknowledged
    let captions = channel.captions.lock();
    assert_eq!(captions.len(), 1);
    assert!(captions[0].2.contains("Одобрено"));
    drop(captions);

    // Submitter was notified about the approval after the commit
    assert!(
        channel
            .texts
            .lock()
            .iter()
            .any(|(chat, text)| *chat == SUBMITTER && text.contains("одобрен"))
    );

    // 4. A repeated decision is an idempotent no-op
    handlers::handle_update(&state, approve_callback(&p1_id, SALES_ADMIN)).await;
    let acks = channel.acks.lock();
    assert!(acks.iter().any(|(_, text, alert)| text.contains("уже обработан") && *alert));
}

#[tokio::test]
async fn submitter_without_role_cannot_decide() {
    let (state, channel) = test_state().await;

    handlers::handle_update(&state, update(web_app_submission())).await;
    handlers::handle_update(&state, update(signature_photo())).await;

    let orders = db::orders::list_for_submitter(&state.db.pool, SUBMITTER, 10)
        .await
        .unwrap();
    let order_id = orders[0].order_id.clone();

    handlers::handle_update(&state, approve_callback(&order_id, SUBMITTER)).await;

    let order = db::orders::find_by_id(&state.db.pool, &order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending, "status must be unchanged");

    let acks = channel.acks.lock();
    assert!(acks.iter().any(|(_, text, alert)| text.contains("нет прав") && *alert));
}

#[tokio::test]
async fn photo_without_parked_submission_is_ignored() {
    let (state, channel) = test_state().await;

    handlers::handle_update(&state, update(signature_photo())).await;

    assert!(
        db::orders::list_for_submitter(&state.db.pool, SUBMITTER, 10)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(channel.documents.lock().is_empty());
}

#[tokio::test]
async fn empty_submission_is_discarded() {
    let (state, channel) = test_state().await;

    let payload = serde_json::json!({"order": {
        "items": [],
        "total": 0.0,
        "clientName": "x", "clientPhone": "x", "clientAddress": "x",
    }});
    let message: IncomingMessage = serde_json::from_value(serde_json::json!({
        "message_id": 2,
        "from": {"id": SUBMITTER, "first_name": "Иван"},
        "chat": {"id": SUBMITTER},
        "web_app_data": {"data": payload.to_string()},
    }))
    .unwrap();

    handlers::handle_update(&state, update(message)).await;

    assert!(state.pending.is_empty(), "nothing parked");
    assert!(
        channel
            .texts
            .lock()
            .iter()
            .any(|(chat, text)| *chat == SUBMITTER && text.contains("пуст"))
    );
}
