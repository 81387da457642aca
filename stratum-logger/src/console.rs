// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::fmt;
use log::{Log, Metadata, Record};
use std::io::{self, Write};
use time::OffsetDateTime;

/// Console engine. Writes one line per record to `stdout`.
#[derive(Debug, Default)]
pub struct Console;

impl Log for Console {
    /// Check the level against the global maximum set at initialization.
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // The lock keeps concurrent lines from interleaving.
        let stdout = io::stdout().lock();
        // Logging never fails the caller.
        let _ = fmt::format(OffsetDateTime::now_utc(), record, stdout);
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}
