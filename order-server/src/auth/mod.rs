//! Actor capabilities: staff roles and inbound rate limiting

pub mod rate_limit;
pub mod roles;

pub use rate_limit::RateLimiter;
pub use roles::StaffDirectory;
