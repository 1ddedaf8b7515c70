//! Shared infrastructure: logging and error handling

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
