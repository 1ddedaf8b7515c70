//! Server configuration
//!
//! All settings come from environment variables (`.env` supported).
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CHANNEL_TOKEN | required | Chat API bot token |
//! | CHANNEL_API_BASE | https://api.telegram.org | Chat API base URL |
//! | STAFF_CHAT_ID | required | Staff queue chat id |
//! | SUPER_ADMIN_ID | required | Super-admin actor id |
//! | SALES_ADMIN_IDS | empty | Comma-separated decision-capable actor ids |
//! | WEBAPP_URL | required | Order web-app URL for the menu button |
//! | BLOB_ENDPOINT | unset | Document mirror endpoint (uploads skipped if unset) |
//! | BLOB_TOKEN | unset | Bearer token for the blob endpoint |
//! | DB_PATH | orders.db | SQLite database file |
//! | LOG_DIR | unset | Directory for rotating file logs |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | RATE_LIMIT_MAX_REQUESTS | 30 | Admissions per actor per window |
//! | RATE_LIMIT_WINDOW_SECS | 60 | Sliding window length |
//! | PENDING_TTL_SECS | 900 | Signature wait expiry |
//! | POLL_TIMEOUT_SECS | 25 | Long-poll window |
//! | TICKET_WIDTH | 48 | Ticket paper width in characters |

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub channel_token: String,
    pub channel_api_base: String,
    pub staff_chat_id: i64,
    pub super_admin_id: i64,
    pub sales_admin_ids: Vec<i64>,
    pub webapp_url: String,
    pub blob_endpoint: Option<String>,
    pub blob_token: Option<String>,
    pub db_path: String,
    pub log_dir: Option<String>,
    pub environment: String,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub pending_ttl_secs: u64,
    pub poll_timeout_secs: u64,
    pub ticket_width: usize,
}

fn required(key: &str) -> AppResult<String> {
    std::env::var(key)
        .map_err(|_| AppError::internal(format!("environment variable {key} not set (.env)")))
}

fn required_i64(key: &str) -> AppResult<i64> {
    required(key)?
        .trim()
        .parse()
        .map_err(|_| AppError::internal(format!("environment variable {key} is not an integer")))
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails fast when a required variable is missing or malformed.
    pub fn from_env() -> AppResult<Self> {
        let sales_admin_ids = std::env::var("SALES_ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let s = s.trim();
                if s.is_empty() { None } else { s.parse().ok() }
            })
            .collect();

        Ok(Self {
            channel_token: required("CHANNEL_TOKEN")?,
            channel_api_base: std::env::var("CHANNEL_API_BASE")
                .unwrap_or_else(|_| "https://api.telegram.org".into()),
            staff_chat_id: required_i64("STAFF_CHAT_ID")?,
            super_admin_id: required_i64("SUPER_ADMIN_ID")?,
            sales_admin_ids,
            webapp_url: required("WEBAPP_URL")?,
            blob_endpoint: std::env::var("BLOB_ENDPOINT").ok(),
            blob_token: std::env::var("BLOB_TOKEN").ok(),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "orders.db".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            rate_limit_max_requests: parse_or("RATE_LIMIT_MAX_REQUESTS", 30),
            rate_limit_window_secs: parse_or("RATE_LIMIT_WINDOW_SECS", 60),
            pending_ttl_secs: parse_or("PENDING_TTL_SECS", 900),
            poll_timeout_secs: parse_or("POLL_TIMEOUT_SECS", 25),
            ticket_width: parse_or("TICKET_WIDTH", 48),
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Minimal config for tests
    pub fn for_tests() -> Self {
        Self {
            channel_token: "test-token".into(),
            channel_api_base: "http://localhost:0".into(),
            staff_chat_id: -1000,
            super_admin_id: 100,
            sales_admin_ids: vec![200, 201],
            webapp_url: "https://shop.example/order".into(),
            blob_endpoint: None,
            blob_token: None,
            db_path: ":memory:".into(),
            log_dir: None,
            environment: "test".into(),
            rate_limit_max_requests: 30,
            rate_limit_window_secs: 60,
            pending_ttl_secs: 900,
            poll_timeout_secs: 0,
            ticket_width: 48,
        }
    }
}
