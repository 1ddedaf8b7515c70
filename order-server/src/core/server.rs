//! Dispatch loop
//!
//! A single logical stream of inbound events: each admitted update is
//! handed to its own task. The admission check (rate limiter) is
//! synchronous and in-memory; all blocking I/O (render, persist, upload,
//! notify) happens inside the spawned handler, off the admission path.
//! Per-order serialization is the store's job, not an in-process lock.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::AppState;
use crate::handlers;
use crate::i18n;
use crate::utils::AppResult;

pub struct Server {
    state: AppState,
    shutdown: CancellationToken,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops the dispatch loop when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run the polling dispatcher until shutdown
    pub async fn run(&self) -> AppResult<()> {
        info!(
            staff_chat_id = self.state.config.staff_chat_id,
            sales_admins = self.state.config.sales_admin_ids.len(),
            "dispatcher starting"
        );

        // Startup announcement to the staff queue is best-effort
        if let Err(e) = self
            .state
            .channel
            .send_text(
                self.state.config.staff_chat_id,
                &i18n::staff_startup(self.state.config.sales_admin_ids.len()),
                None,
            )
            .await
        {
            warn!(error = %e, "cannot announce startup to staff chat");
        }

        self.spawn_maintenance();

        let mut offset: i64 = 0;
        loop {
            let updates = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                result = self
                    .state
                    .channel
                    .poll_updates(offset, self.state.config.poll_timeout_secs) => {
                    match result {
                        Ok(updates) => updates,
                        Err(e) => {
                            warn!(error = %e, "update poll failed, retrying");
                            tokio::select! {
                                _ = self.shutdown.cancelled() => break,
                                _ = tokio::time::sleep(Duration::from_secs(5)) => continue,
                            }
                        }
                    }
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);

                // Admission gate: staff exempt, everyone else rate-limited
                if let Some(actor_id) = update.actor_id()
                    && !self.state.staff.is_staff(actor_id)
                    && !self.state.rate_limiter.admit(actor_id)
                {
                    info!(actor_id, "update dropped by rate limiter");
                    if let Some(message) = &update.message {
                        let channel = self.state.channel.clone();
                        let chat_id = message.chat.id;
                        tokio::spawn(async move {
                            let _ = channel.send_text(chat_id, i18n::throttle_notice(), None).await;
                        });
                    }
                    continue;
                }

                let state = self.state.clone();
                tokio::spawn(async move {
                    handlers::handle_update(&state, update).await;
                });
            }
        }

        info!("dispatcher stopping");
        if let Err(e) = self
            .state
            .channel
            .send_text(self.state.config.staff_chat_id, i18n::staff_shutdown(), None)
            .await
        {
            warn!(error = %e, "cannot announce shutdown to staff chat");
        }

        Ok(())
    }

    /// Hourly-grade housekeeping: drop idle rate-limiter actors and
    /// expired parked submissions
    fn spawn_maintenance(&self) {
        let state = self.state.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(60));
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tick.tick() => {
                        state.rate_limiter.cleanup();
                        state.pending.prune();
                    }
                }
            }
        });
    }
}
