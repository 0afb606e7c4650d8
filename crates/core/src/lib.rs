//! Shared types for the custom audiences destination: form schema,
//! selection state, configuration, and errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::HubConfig;
pub use error::{AudienceError, AudienceResult};
