// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use std::{env, io};
use stratum_log::{DEFAULT_LEVEL, ENV_LOG_LEVEL};

/// Hostname used when the OS lookup fails.
pub const DEFAULT_HOSTNAME: &str = "unknown";

/// Settings captured once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub hostname: String,
    /// Abstract level. Not validated until it is translated.
    pub level: i8,
}

impl Config {
    /// Read the hostname from the OS and the level from `STRATUM_LOG_LEVEL`.
    ///
    /// Never fails. Lookup and parse errors fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            hostname: resolve_hostname(hostname()),
            level: resolve_level(env::var(ENV_LOG_LEVEL).ok().as_deref()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            level: DEFAULT_LEVEL,
        }
    }
}

/// Parse the raw environment value. Absent or not a base-10 `i8` yields [`DEFAULT_LEVEL`].
pub fn resolve_level(value: Option<&str>) -> i8 {
    value
        .and_then(|s| s.parse::<i8>().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Unwrap a hostname lookup, substituting [`DEFAULT_HOSTNAME`] on failure.
pub fn resolve_hostname(hostname: io::Result<String>) -> String {
    hostname.unwrap_or_else(|_| DEFAULT_HOSTNAME.to_string())
}

/// Hostname as reported by gethostname(2).
pub fn hostname() -> io::Result<String> {
    let mut buffer = [0u8; 256];
    // Safety: buffer is valid for writes of its full length
    let ret = unsafe { libc::gethostname(buffer.as_mut_ptr().cast(), buffer.len()) };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }

    let len = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    if len == 0 {
        return Err(io::Error::new(io::ErrorKind::NotFound, "empty hostname"));
    }
    String::from_utf8(buffer[..len].to_vec())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "hostname is not utf-8"))
}
