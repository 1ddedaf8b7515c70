//! Unified Error Handling
//!
//! Application-wide error type covering the pipeline failure taxonomy.

use tracing::error;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Submitter-visible Errors ==========
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== Actor-visible Errors ==========
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    /// Idempotency guard: the order already reached a terminal state
    #[error("Order already decided: {0}")]
    AlreadyDecided(String),

    // ========== Pipeline Errors ==========
    /// Aborts the affected category's sub-order before any store write
    #[error("Ticket rendering failed: {0}")]
    Render(#[from] krill_ticket::TicketError),

    /// Logged and discarded by policy, never user-visible
    #[error("Blob upload failed: {0}")]
    Upload(#[from] crate::blob::UploadError),

    /// A notification send failed (e.g. recipient blocked the channel)
    #[error("Delivery failed: {0}")]
    Delivery(String),

    // ========== System Errors ==========
    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        AppError::PermissionDenied(msg.into())
    }

    /// Create a not found error
    pub fn not_found(order_id: impl Into<String>) -> Self {
        AppError::NotFound(order_id.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Whether the failure should be reported to the acting user
    /// rather than swallowed into logs
    pub fn is_actor_visible(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::PermissionDenied(_)
                | AppError::NotFound(_)
                | AppError::AlreadyDecided(_)
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        error!(target: "database", error = %e, "Database error occurred");
        AppError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Validation(format!("Malformed payload: {e}"))
    }
}

/// Result alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_visibility() {
        assert!(AppError::validation("empty").is_actor_visible());
        assert!(AppError::AlreadyDecided("ORD-1".into()).is_actor_visible());
        assert!(!AppError::Upload(crate::blob::UploadError("offline".into())).is_actor_visible());
        assert!(!AppError::database("locked").is_actor_visible());
    }
}
