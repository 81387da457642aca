// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Logger setup errors

/// Error returned when the console logger cannot be set up.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The configured abstract level is none of the known levels.
    UnsupportedLevel(i8),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::UnsupportedLevel(level) => write!(f, "unsupported logger level {}", level),
        }
    }
}
