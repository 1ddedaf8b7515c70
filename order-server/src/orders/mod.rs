//! Order domain: classification, splitting, intake and approval

pub mod approval;
pub mod classifier;
pub mod intake;
pub mod pending;
pub mod splitter;

pub use approval::{DecisionOutcome, decide};
pub use classifier::classify;
pub use pending::PendingSubmissions;
pub use splitter::split;
