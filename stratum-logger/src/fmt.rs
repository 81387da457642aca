// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use console::{style, Color};
use log::kv::{self, VisitSource};
use log::{Level, Record};
use std::io;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

/// Write `record` as a single line: timestamp, level, message and the record's fields.
pub fn format<W: io::Write>(
    timestamp: OffsetDateTime,
    record: &Record,
    mut writer: W,
) -> Result<(), io::Error> {
    let timestamp = timestamp
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let level = {
        let level_color = match record.level() {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Color256(243),
            Level::Trace => Color::White,
        };
        style(record.level()).bold().fg(level_color)
    };

    let message = escape_control(&record.args().to_string());
    write!(writer, "{timestamp} {level:<5} {message}")?;

    for (key, value) in fields(record) {
        let key = style(&key).fg(key.as_str().color());
        if needs_quoting(&value) {
            write!(writer, " {key}={value:?}")?;
        } else {
            write!(writer, " {key}={value}")?;
        }
    }

    writeln!(writer)
}

/// Collect the key value pairs attached to `record` in order.
pub fn fields(record: &Record) -> Vec<(String, String)> {
    let mut collect = Collect::default();
    // Collecting into memory never fails.
    let _ = record.key_values().visit(&mut collect);
    collect.0
}

#[derive(Default)]
struct Collect(Vec<(String, String)>);

impl<'kvs> VisitSource<'kvs> for Collect {
    fn visit_pair(&mut self, key: kv::Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Escape control characters so a message never spans more than one line.
fn escape_control(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=')
}

/// Generate a color of `self`.
trait HashColor {
    fn color(&self) -> Color;
}

impl HashColor for &str {
    fn color(&self) -> Color {
        let hash = self.bytes().fold(42u8, |c, x| c ^ x);
        // Some colors are hard to read on (at least) dark terminals.
        let color = match hash {
            c @ 0..=1 => c + 2,
            c @ 16..=21 => c + 6,
            c @ 52..=55 | c @ 126..=129 => c + 4,
            c @ 163..=165 | c @ 200..=201 => c + 3,
            c @ 207 => c + 1,
            c @ 232..=240 => c + 9,
            c => c,
        };
        Color::Color256(color)
    }
}
