//! Order queries
//!
//! The `mark_decided` conditional update is the sole arbiter of the
//! decision race: it only succeeds while the row is still `pending`.

use shared::models::{Category, Order, OrderDraft, OrderItem, OrderStatus};
use sqlx::SqlitePool;

/// Column list shared by all row-producing queries (blobs excluded)
const COLUMNS: &str = "order_id, user_id, client_name, client_phone, client_address,
            items_json, total, category, status, created_at,
            decided_at, decided_by, reject_reason";

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: String,
    user_id: i64,
    client_name: String,
    client_phone: String,
    client_address: String,
    items_json: String,
    total: f64,
    category: String,
    status: String,
    created_at: String,
    decided_at: Option<String>,
    decided_by: Option<i64>,
    reject_reason: Option<String>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, sqlx::Error> {
        let items: Vec<OrderItem> =
            serde_json::from_str(&self.items_json).map_err(|e| sqlx::Error::Decode(e.into()))?;
        let category = Category::from_tag(&self.category).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown category tag: {}", self.category).into())
        })?;
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown order status: {}", self.status).into())
        })?;

        Ok(Order {
            order_id: self.order_id,
            user_id: self.user_id,
            client_name: self.client_name,
            client_phone: self.client_phone,
            client_address: self.client_address,
            items,
            total: self.total,
            category,
            status,
            created_at: self.created_at,
            decided_at: self.decided_at,
            decided_by: self.decided_by,
            reject_reason: self.reject_reason,
        })
    }
}

/// 新建子订单 (status = pending, 附带渲染好的票据草稿)
pub async fn create(pool: &SqlitePool, draft: &OrderDraft) -> Result<(), sqlx::Error> {
    let items_json =
        serde_json::to_string(&draft.items).map_err(|e| sqlx::Error::Encode(e.into()))?;
    sqlx::query(
        "INSERT INTO orders (
            order_id, user_id, client_name, client_phone, client_address,
            items_json, total, category, status, ticket_draft
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)",
    )
    .bind(&draft.order_id)
    .bind(draft.user_id)
    .bind(&draft.client_name)
    .bind(&draft.client_phone)
    .bind(&draft.client_address)
    .bind(items_json)
    .bind(draft.total)
    .bind(draft.category.tag())
    .bind(&draft.ticket_draft)
    .execute(pool)
    .await?;
    Ok(())
}

/// 按 order_id 查找
pub async fn find_by_id(pool: &SqlitePool, order_id: &str) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM orders WHERE order_id = ?"))
            .bind(order_id)
            .fetch_optional(pool)
            .await?;
    row.map(OrderRow::into_order).transpose()
}

/// 按 order_id + 提交人查找 (普通用户只能看到自己的订单)
pub async fn find_for_submitter(
    pool: &SqlitePool,
    order_id: &str,
    user_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM orders WHERE order_id = ? AND user_id = ?"
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    row.map(OrderRow::into_order).transpose()
}

/// 提交人最近订单，按创建时间倒序
pub async fn list_for_submitter(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM orders
            WHERE user_id = ?
            ORDER BY created_at DESC, order_id DESC
            LIMIT ?"
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(OrderRow::into_order).collect()
}

/// 全部订单 (运营导出)
pub async fn list_all(pool: &SqlitePool, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM orders
            ORDER BY created_at DESC, order_id DESC
            LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(OrderRow::into_order).collect()
}

/// Conditional terminal transition: pending → approved/rejected
///
/// Returns `false` when the row was not in `pending` (or does not exist);
/// the caller distinguishes the two. Never overwrites a terminal state.
pub async fn mark_decided(
    pool: &SqlitePool,
    order_id: &str,
    outcome: OrderStatus,
    actor_id: i64,
    reason: Option<&str>,
) -> Result<bool, sqlx::Error> {
    debug_assert!(outcome.is_terminal());
    let result = sqlx::query(
        "UPDATE orders
            SET status = ?, decided_at = datetime('now'), decided_by = ?, reject_reason = ?
            WHERE order_id = ? AND status = 'pending'",
    )
    .bind(outcome.as_str())
    .bind(actor_id)
    .bind(reason)
    .bind(order_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// 取票据字节: 优先终稿，回退草稿
pub async fn get_document(
    pool: &SqlitePool,
    order_id: &str,
) -> Result<Option<Vec<u8>>, sqlx::Error> {
    let row: Option<(Vec<u8>,)> = sqlx::query_as(
        "SELECT COALESCE(ticket_final, ticket_draft) FROM orders WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(bytes,)| bytes))
}
