//! User queries

use crate::i18n::Locale;
use shared::models::UserUpsert;
use sqlx::SqlitePool;

/// 注册或更新用户资料 (locale 保持不变)
pub async fn upsert(pool: &SqlitePool, user: &UserUpsert) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (user_id, username, first_name, last_name)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name",
    )
    .bind(user.user_id)
    .bind(&user.username)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .execute(pool)
    .await?;
    Ok(())
}

/// 查询用户语言，未知用户回退 ru
pub async fn get_locale(pool: &SqlitePool, user_id: i64) -> Result<Locale, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT lang FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row
        .and_then(|(lang,)| Locale::parse(&lang))
        .unwrap_or(Locale::Ru))
}

/// 设置用户语言
pub async fn set_locale(pool: &SqlitePool, user_id: i64, locale: Locale) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET lang = ? WHERE user_id = ?")
        .bind(locale.as_str())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// 全部已知用户 ID (广播收件人集合)
pub async fn list_all_ids(pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT DISTINCT user_id FROM users")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn user(id: i64) -> UserUpsert {
        UserUpsert {
            user_id: id,
            username: Some(format!("user{id}")),
            first_name: Some("Имя".into()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_locale() {
        let db = DbService::open_in_memory().await.unwrap();

        upsert(&db.pool, &user(1)).await.unwrap();
        assert_eq!(get_locale(&db.pool, 1).await.unwrap(), Locale::Ru);

        set_locale(&db.pool, 1, Locale::Uz).await.unwrap();
        assert_eq!(get_locale(&db.pool, 1).await.unwrap(), Locale::Uz);

        // Re-upsert must not reset the locale
        upsert(&db.pool, &user(1)).await.unwrap();
        assert_eq!(get_locale(&db.pool, 1).await.unwrap(), Locale::Uz);
    }

    #[tokio::test]
    async fn test_unknown_user_defaults_ru() {
        let db = DbService::open_in_memory().await.unwrap();
        assert_eq!(get_locale(&db.pool, 404).await.unwrap(), Locale::Ru);
    }

    #[tokio::test]
    async fn test_list_all_ids() {
        let db = DbService::open_in_memory().await.unwrap();
        for id in [10, 20, 30] {
            upsert(&db.pool, &user(id)).await.unwrap();
        }
        let mut ids = list_all_ids(&db.pool).await.unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
