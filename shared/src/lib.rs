//! Shared types for the Krill order desk
//!
//! Domain models used across the server and the ticket renderer.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
