//! Global tracing subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};
use typedwire_core::{LogLevel, MarshallerConfig};

/// Install a stderr `fmt` subscriber filtered at `level`
///
/// Only the first call installs a subscriber. Later calls move the
/// installed filter to `level` instead. Returns true if this call installed
/// the subscriber.
pub fn init_logging(level: LogLevel) -> bool {
    let (filter, handle) = reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true));

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        ReloadHandle::global().set_handle(handle);
        tracing::debug!(%level, "logging initialized");
        true
    } else {
        move_level(ReloadHandle::global(), level);
        false
    }
}

/// Move an installed filter to `level`, returning false if there is none
///
/// Another subscriber may own the global slot, leaving the handle unset.
fn move_level(handle: &ReloadHandle, level: LogLevel) -> bool {
    match handle.reload_level(level) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(%level, %error, "log level not changed");
            false
        }
    }
}

/// Initialize logging at the level named in `config`
pub fn init_logging_from_config(config: &MarshallerConfig) -> bool {
    init_logging(config.log_level())
}
