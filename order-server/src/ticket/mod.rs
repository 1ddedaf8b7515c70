//! Order ticket rendering (WHAT a document contains)
//!
//! Layout lives here; byte-level building lives in `krill-ticket`.

pub mod renderer;

pub use renderer::{OrderTicketRenderer, TicketJob};
