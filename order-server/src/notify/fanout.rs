//! Delivery fan-out
//!
//! Targeted sends surface failures to the caller. Broadcast iterates the
//! whole recipient set and isolates failures per recipient: one blocked
//! recipient never aborts delivery to the rest. Failures are terminal per
//! recipient per invocation, no retry.

use tracing::warn;

use crate::channel::{Keyboard, MessageChannel, OutboundDocument};
use crate::utils::{AppError, AppResult};

/// Aggregate result of one broadcast invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BroadcastReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Targeted text send; failure surfaces to the caller
pub async fn send_text(
    channel: &dyn MessageChannel,
    chat_id: i64,
    text: &str,
    keyboard: Option<Keyboard>,
) -> AppResult<()> {
    channel
        .send_text(chat_id, text, keyboard)
        .await
        .map_err(|e| AppError::Delivery(e.to_string()))
}

/// Targeted document send; failure surfaces to the caller
pub async fn send_document(
    channel: &dyn MessageChannel,
    chat_id: i64,
    doc: OutboundDocument,
) -> AppResult<()> {
    channel
        .send_document(chat_id, doc)
        .await
        .map_err(|e| AppError::Delivery(e.to_string()))
}

/// Broadcast a text message to every recipient independently
pub async fn broadcast_text(
    channel: &dyn MessageChannel,
    recipients: &[i64],
    text: &str,
) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for &recipient in recipients {
        match channel.send_text(recipient, text, None).await {
            Ok(()) => report.succeeded += 1,
            Err(e) => {
                report.failed += 1;
                warn!(recipient, error = %e, "broadcast delivery failed");
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelError, ChannelResult, Update};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;

    /// Channel fake: records deliveries, fails for a configured set
    struct FlakyChannel {
        blocked: HashSet<i64>,
        delivered: Mutex<Vec<i64>>,
    }

    impl FlakyChannel {
        fn new(blocked: impl IntoIterator<Item = i64>) -> Self {
            Self {
                blocked: blocked.into_iter().collect(),
                delivered: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl crate::channel::MessageChannel for FlakyChannel {
        async fn poll_updates(&self, _offset: i64, _timeout: u64) -> ChannelResult<Vec<Update>> {
            Ok(Vec::new())
        }

        async fn send_text(
            &self,
            chat_id: i64,
            _text: &str,
            _keyboard: Option<Keyboard>,
        ) -> ChannelResult<()> {
            if self.blocked.contains(&chat_id) {
                return Err(ChannelError::Forbidden("blocked".into()));
            }
            self.delivered.lock().push(chat_id);
            Ok(())
        }

        async fn send_document(&self, chat_id: i64, _doc: OutboundDocument) -> ChannelResult<()> {
            if self.blocked.contains(&chat_id) {
                return Err(ChannelError::Forbidden("blocked".into()));
            }
            self.delivered.lock().push(chat_id);
            Ok(())
        }

        async fn edit_caption(&self, _: i64, _: i64, _: &str) -> ChannelResult<()> {
            Ok(())
        }

        async fn answer_callback(&self, _: &str, _: &str, _: bool) -> ChannelResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_broadcast_counts_and_isolation() {
        // Failures at the head and middle of the list
        let channel = FlakyChannel::new([1, 3]);
        let recipients = [1, 2, 3, 4, 5];

        let report = broadcast_text(&channel, &recipients, "hello").await;
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 2);

        // Every non-blocked recipient was served despite earlier failures
        assert_eq!(*channel.delivered.lock(), vec![2, 4, 5]);
    }

    #[tokio::test]
    async fn test_broadcast_empty_recipients() {
        let channel = FlakyChannel::new([]);
        let report = broadcast_text(&channel, &[], "hello").await;
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_targeted_send_surfaces_failure() {
        let channel = FlakyChannel::new([9]);
        let err = send_text(&channel, 9, "hi", None).await.unwrap_err();
        assert!(matches!(err, AppError::Delivery(_)));

        send_text(&channel, 8, "hi", None).await.unwrap();
    }
}
