//! Notification delivery: targeted sends and broadcast fan-out

pub mod fanout;

pub use fanout::{BroadcastReport, broadcast_text, send_document, send_text};
