//! # krill-ticket
//!
//! Fixed-width order ticket library - low-level rendering capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW a ticket byte payload is built:
//! - ESC/POS command building
//! - CP866 encoding for Cyrillic output
//! - Width-aware wrapping, padding and truncation
//! - QR code emission
//!
//! Business logic (WHAT a ticket contains) stays in application code:
//! - Order document layout → order-server
//!
//! ## Example
//!
//! ```ignore
//! use krill_ticket::TicketBuilder;
//!
//! let mut b = TicketBuilder::new(48);
//! b.center();
//! b.double_size();
//! b.line("Заказ ORD-20250301120000-42-P1");
//! b.reset_size();
//! b.sep_double();
//! b.left();
//! b.line_lr("Итого:", "12 500");
//! b.qr_code("ORDER:ORD-20250301120000-42-P1", 4);
//! b.cut();
//! let payload = b.build();
//! ```

mod builder;
mod encoding;
mod error;

// Re-exports
pub use builder::TicketBuilder;
pub use encoding::{convert_to_cp866, cp866_width, pad_cp866, truncate_cp866, wrap_cp866};
pub use error::{TicketError, TicketResult};
