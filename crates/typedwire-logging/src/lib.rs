//! typedwire-logging - tracing subscriber setup
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr subscriber at a [`LogLevel`]
//! - [`ReloadHandle`] for changing the level at runtime

mod reload;
mod subscriber;

pub use reload::{ReloadError, ReloadHandle, level_filter};
pub use subscriber::{init_logging, init_logging_from_config};
pub use typedwire_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
