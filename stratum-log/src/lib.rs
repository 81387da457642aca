// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! The stratum logging facade.
//!
//! Application code logs through the [`Logger`] capability set and never names a backend. A backend
//! (for example the console adapter in `stratum-logger`) is installed once at startup with
//! [`register`] and is then reachable from everywhere via [`logger`], the free functions in this
//! crate and the `*f!` macros.
//!
//! Severities are plain integers so that backends can map them onto their own level model.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

mod trace;

pub use trace::Trace;

/// Environment variable holding the minimum level as a base-10 integer.
pub const ENV_LOG_LEVEL: &str = "STRATUM_LOG_LEVEL";

pub const LEVEL_ERROR: i8 = 1;
pub const LEVEL_WARN: i8 = 2;
pub const LEVEL_INFO: i8 = 3;
pub const LEVEL_DEBUG: i8 = 4;

/// Level used when [`ENV_LOG_LEVEL`] is unset or invalid.
pub const DEFAULT_LEVEL: i8 = LEVEL_INFO;

/// Name of a known level, `None` for anything else.
pub fn level_name(level: i8) -> Option<&'static str> {
    match level {
        LEVEL_ERROR => Some("error"),
        LEVEL_WARN => Some("warn"),
        LEVEL_INFO => Some("info"),
        LEVEL_DEBUG => Some("debug"),
        _ => None,
    }
}

/// The logger capability set every backend implements.
///
/// Calls never fail observably. Whatever goes wrong while writing is the backend's business.
pub trait Logger: Send + Sync {
    fn debug(&self, msg: &str);
    fn debugf(&self, args: fmt::Arguments<'_>);
    fn info(&self, msg: &str);
    fn infof(&self, args: fmt::Arguments<'_>);
    fn warn(&self, msg: &str);
    fn warnf(&self, args: fmt::Arguments<'_>);
    /// Log `msg` together with `err`. `trace` is the application call site.
    fn error(&self, trace: Trace, msg: &str, err: &dyn Error);
    /// Log a formatted message on error level. `trace` is the application call site.
    fn errorf(&self, trace: Trace, args: fmt::Arguments<'_>);
}

/// Logger that discards everything. Active until a backend is registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn debug(&self, _: &str) {}
    fn debugf(&self, _: fmt::Arguments<'_>) {}
    fn info(&self, _: &str) {}
    fn infof(&self, _: fmt::Arguments<'_>) {}
    fn warn(&self, _: &str) {}
    fn warnf(&self, _: fmt::Arguments<'_>) {}
    fn error(&self, _: Trace, _: &str, _: &dyn Error) {}
    fn errorf(&self, _: Trace, _: fmt::Arguments<'_>) {}
}

static LOGGER: RwLock<Option<Arc<dyn Logger>>> = RwLock::new(None);
static NOP: LazyLock<Arc<dyn Logger>> = LazyLock::new(|| Arc::new(NopLogger));

/// Install `logger` as the process wide logger.
///
/// Replaces a previously registered logger, which is returned.
pub fn register(logger: Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
    LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(logger)
}

/// The registered logger or a [`NopLogger`] if none is registered yet.
pub fn logger() -> Arc<dyn Logger> {
    LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or_else(|| Arc::clone(&*NOP), Arc::clone)
}

/// Log `msg` on debug level.
pub fn debug(msg: &str) {
    logger().debug(msg);
}

/// Log `msg` on info level.
pub fn info(msg: &str) {
    logger().info(msg);
}

/// Log `msg` on warn level.
pub fn warn(msg: &str) {
    logger().warn(msg);
}

/// Log `msg` and `err` on error level, traced to the caller.
#[track_caller]
pub fn error(msg: &str, err: &dyn Error) {
    let trace = Trace::caller();
    logger().error(trace, msg, err);
}

/// Log a formatted message on debug level.
///
/// ```
/// stratum_log::debugf!("connected to {}", "db0");
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::Logger::debugf(&*$crate::logger(), format_args!($($arg)+))
    };
}

/// Log a formatted message on info level.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::Logger::infof(&*$crate::logger(), format_args!($($arg)+))
    };
}

/// Log a formatted message on warn level.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::Logger::warnf(&*$crate::logger(), format_args!($($arg)+))
    };
}

/// Log a formatted message on error level, traced to the macro invocation.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::Logger::errorf(
            &*$crate::logger(),
            $crate::Trace::new(file!(), line!()),
            format_args!($($arg)+),
        )
    };
}
