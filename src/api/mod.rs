pub mod client;

// Re-export main client types
pub use client::{ApiError, Result, SmartThingsClient};
