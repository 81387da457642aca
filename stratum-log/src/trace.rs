// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::panic::Location;

/// Source location of the application code that emitted an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    file: &'static str,
    line: u32,
}

impl Trace {
    /// Create a trace from an explicit location. Used by the `*f!` macros with `file!()` and `line!()`.
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Capture the location of the caller.
    ///
    /// Functions that forward to this one must be `#[track_caller]` themselves, otherwise the
    /// reported location is the forwarding function and not the application call site.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
