//! Server state - shared handles over all services
//!
//! `AppState` is cheap to clone (Arc all the way down) and is handed to
//! every spawned update handler.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{RateLimiter, StaffDirectory};
use crate::blob::{BlobSink, HttpBlobSink, NullBlobSink};
use crate::channel::{HttpChannel, MessageChannel};
use crate::core::Config;
use crate::db::DbService;
use crate::orders::PendingSubmissions;
use crate::ticket::OrderTicketRenderer;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub channel: Arc<dyn MessageChannel>,
    pub blob: Arc<dyn BlobSink>,
    pub staff: Arc<StaffDirectory>,
    pub rate_limiter: Arc<RateLimiter>,
    pub pending: Arc<PendingSubmissions>,
    pub renderer: Arc<OrderTicketRenderer>,
}

impl AppState {
    /// Full initialization: store, channel adapter, blob sink
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let db = DbService::new(&config.db_path).await?;

        let channel = HttpChannel::new(&config.channel_api_base, &config.channel_token)
            .map_err(|e| AppError::Channel(e.to_string()))?;

        let blob: Arc<dyn BlobSink> = match &config.blob_endpoint {
            Some(endpoint) => Arc::new(
                HttpBlobSink::new(endpoint, config.blob_token.clone())
                    .map_err(|e| AppError::internal(e.to_string()))?,
            ),
            None => {
                tracing::warn!("BLOB_ENDPOINT not set, document mirroring disabled");
                Arc::new(NullBlobSink)
            }
        };

        Ok(Self::assemble(config, db, Arc::new(channel), blob))
    }

    /// Assemble state from explicit parts (used by initialize and tests)
    pub fn assemble(
        config: Config,
        db: DbService,
        channel: Arc<dyn MessageChannel>,
        blob: Arc<dyn BlobSink>,
    ) -> Self {
        let staff = StaffDirectory::new(config.super_admin_id, config.sales_admin_ids.clone());
        let rate_limiter = RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        );
        let pending = PendingSubmissions::new(Duration::from_secs(config.pending_ttl_secs));
        let renderer = OrderTicketRenderer::new(config.ticket_width);

        Self {
            config: Arc::new(config),
            db,
            channel,
            blob,
            staff: Arc::new(staff),
            rate_limiter: Arc::new(rate_limiter),
            pending: Arc::new(pending),
            renderer: Arc::new(renderer),
        }
    }
}
