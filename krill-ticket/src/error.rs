//! Error types for the ticket library

use thiserror::Error;

/// Ticket rendering error types
#[derive(Debug, Error)]
pub enum TicketError {
    /// A ticket must carry at least one line item
    #[error("Ticket has no line items")]
    EmptyItems,

    /// Paper width too small to lay out the item table
    #[error("Ticket width {width} below minimum {min}")]
    InvalidWidth { width: usize, min: usize },

    /// Tracking token exceeds the QR payload budget
    #[error("Tracking token too long: {len} bytes (max {max})")]
    TokenTooLong { len: usize, max: usize },
}

/// Result type for ticket operations
pub type TicketResult<T> = Result<T, TicketError>;
