// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! The stratum console logger
//!
//! Backend for the `stratum-log` facade. Entries are handed to a `log` engine (by default the
//! stdout [`Console`]) after their level is translated and the fields `hostname`, `trace` and
//! `error_msg` are attached.

use log::{kv, Level, LevelFilter, Log, Record};
use std::fmt::Arguments;
use std::sync::{Arc, Mutex, PoisonError};
use stratum_log::{Logger, Trace, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};

mod config;
mod console;
mod error;
pub mod fmt;

pub use config::{hostname, resolve_hostname, resolve_level, Config, DEFAULT_HOSTNAME};
pub use console::Console;
pub use error::Error;

const TARGET: &str = "stratum";
const FIELD_HOSTNAME: &str = "hostname";
const FIELD_TRACE: &str = "trace";
const FIELD_ERROR_MSG: &str = "error_msg";

/// Held while the engine level and the registered logger are replaced.
static INIT: Mutex<()> = Mutex::new(());

/// Initialize the console logger from the environment and register it with the facade.
///
/// The level is taken from `STRATUM_LOG_LEVEL` and falls back to the facade default. A level
/// that is none of the known levels is an error. Nothing is registered in that case.
pub fn init() -> Result<(), Error> {
    init_with(Config::from_env())
}

/// Like [`init`] with an explicit configuration.
pub fn init_with(config: Config) -> Result<(), Error> {
    install(ConsoleLogger::from_config(config))
}

/// Register `logger` with the facade and set the engine level to the logger's level.
///
/// Concurrent calls are serialized, so the engine level always belongs to the registered logger.
pub fn install<W: Log + 'static>(logger: ConsoleLogger<W>) -> Result<(), Error> {
    let level = native_level(logger.level)?;
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    // Set the maximum level the engine will write.
    log::set_max_level(level);
    // Replace whatever logger the facade had before.
    stratum_log::register(Arc::new(logger));
    Ok(())
}

/// Like [`init`] but panics on a misconfigured level.
pub fn init_or_panic() {
    if let Err(e) = init() {
        panic!("stratum-logger: {e}");
    }
}

/// Translate an abstract level into the engine's level.
pub fn native_level(level: i8) -> Result<LevelFilter, Error> {
    match level {
        LEVEL_ERROR => Ok(LevelFilter::Error),
        LEVEL_WARN => Ok(LevelFilter::Warn),
        LEVEL_INFO => Ok(LevelFilter::Info),
        LEVEL_DEBUG => Ok(LevelFilter::Debug),
        _ => Err(Error::UnsupportedLevel(level)),
    }
}

/// Logger that enriches entries and writes them through a `log` engine.
#[derive(Debug)]
pub struct ConsoleLogger<W = Console> {
    hostname: String,
    level: i8,
    writer: W,
}

impl ConsoleLogger {
    /// Create a logger writing to the stdout [`Console`].
    ///
    /// The console only writes what `log::max_level()` lets through, which [`init`] sets.
    pub fn from_config(config: Config) -> Self {
        Self::new(config, Console)
    }
}

impl<W: Log> ConsoleLogger<W> {
    /// Create a logger writing to `writer`.
    pub fn new(config: Config, writer: W) -> Self {
        let Config { hostname, level } = config;
        Self {
            hostname,
            level,
            writer,
        }
    }

    /// Hostname attached to every entry.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The configured abstract level.
    pub fn level(&self) -> i8 {
        self.level
    }

    /// The engine entries are written to.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn fields(&self) -> Fields<'_> {
        Fields::new(&self.hostname)
    }

    fn write(&self, level: Level, args: Arguments<'_>, fields: &Fields<'_>) {
        self.writer.log(
            &Record::builder()
                .level(level)
                .target(TARGET)
                .args(args)
                .key_values(fields)
                .build(),
        );
    }

    fn write_traced(
        &self,
        trace: Trace,
        args: Arguments<'_>,
        fields: &Fields<'_>,
    ) {
        self.writer.log(
            &Record::builder()
                .level(Level::Error)
                .target(TARGET)
                .file_static(Some(trace.file()))
                .line(Some(trace.line()))
                .args(args)
                .key_values(fields)
                .build(),
        );
    }
}

impl<W: Log> Logger for ConsoleLogger<W> {
    fn debug(&self, msg: &str) {
        self.write(Level::Debug, format_args!("{msg}"), &self.fields());
    }

    fn debugf(&self, args: Arguments<'_>) {
        self.write(Level::Debug, args, &self.fields());
    }

    fn info(&self, msg: &str) {
        self.write(Level::Info, format_args!("{msg}"), &self.fields());
    }

    fn infof(&self, args: Arguments<'_>) {
        self.write(Level::Info, args, &self.fields());
    }

    fn warn(&self, msg: &str) {
        self.write(Level::Warn, format_args!("{msg}"), &self.fields());
    }

    fn warnf(&self, args: Arguments<'_>) {
        self.write(Level::Warn, args, &self.fields());
    }

    fn error(&self, trace: Trace, msg: &str, err: &dyn std::error::Error) {
        let fields = self
            .fields()
            .with_trace(trace.to_string())
            .with_error_msg(err.to_string());
        self.write_traced(trace, format_args!("{msg}"), &fields);
    }

    fn errorf(&self, trace: Trace, args: Arguments<'_>) {
        // No error value here, so no `error_msg`.
        let fields = self.fields().with_trace(trace.to_string());
        self.write_traced(trace, args, &fields);
    }
}

/// Fields attached to a single entry.
#[derive(Debug)]
pub(crate) struct Fields<'a> {
    hostname: &'a str,
    trace: Option<String>,
    error_msg: Option<String>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(hostname: &'a str) -> Self {
        Self {
            hostname,
            trace: None,
            error_msg: None,
        }
    }

    pub(crate) fn with_trace(self, trace: String) -> Self {
        Self {
            trace: Some(trace),
            ..self
        }
    }

    pub(crate) fn with_error_msg(self, error_msg: String) -> Self {
        Self {
            error_msg: Some(error_msg),
            ..self
        }
    }
}

impl kv::Source for Fields<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn kv::VisitSource<'kvs>) -> Result<(), kv::Error> {
        visitor.visit_pair(kv::Key::from_str(FIELD_HOSTNAME), kv::Value::from(self.hostname))?;
        if let Some(trace) = &self.trace {
            visitor.visit_pair(kv::Key::from_str(FIELD_TRACE), kv::Value::from(trace.as_str()))?;
        }
        if let Some(error_msg) = &self.error_msg {
            visitor.visit_pair(
                kv::Key::from_str(FIELD_ERROR_MSG),
                kv::Value::from(error_msg.as_str()),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{native_level, Config, ConsoleLogger, Error};
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::io;
    use std::sync::Mutex;
    use stratum_log::{Logger, Trace, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};

    /// Entry as seen by the engine.
    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        level: Level,
        message: String,
        fields: Vec<(String, String)>,
    }

    impl Entry {
        fn field(&self, key: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }
    }

    /// Engine that keeps every record in memory.
    #[derive(Debug, Default)]
    struct Capture {
        entries: Mutex<Vec<Entry>>,
    }

    impl Capture {
        fn entries(&self) -> Vec<Entry> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl Log for Capture {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.entries.lock().unwrap().push(Entry {
                level: record.level(),
                message: record.args().to_string(),
                fields: crate::fmt::fields(record),
            });
        }

        fn flush(&self) {}
    }

    fn logger() -> ConsoleLogger<Capture> {
        let config = Config {
            hostname: "node-7".to_string(),
            level: LEVEL_DEBUG,
        };
        ConsoleLogger::new(config, Capture::default())
    }

    #[test]
    fn translate_known_levels() {
        assert_eq!(native_level(LEVEL_ERROR), Ok(LevelFilter::Error));
        assert_eq!(native_level(LEVEL_WARN), Ok(LevelFilter::Warn));
        assert_eq!(native_level(LEVEL_INFO), Ok(LevelFilter::Info));
        assert_eq!(native_level(LEVEL_DEBUG), Ok(LevelFilter::Debug));
    }

    #[test]
    fn translate_unknown_levels() {
        for level in [i8::MIN, -1, 0, 5, 6, 42, i8::MAX] {
            assert_eq!(native_level(level), Err(Error::UnsupportedLevel(level)));
        }
        assert_eq!(
            Error::UnsupportedLevel(9).to_string(),
            "unsupported logger level 9"
        );
    }

    #[test]
    fn accessors() {
        let logger = logger();
        assert_eq!(logger.hostname(), "node-7");
        assert_eq!(logger.level(), LEVEL_DEBUG);
    }

    #[test]
    fn hostname_on_every_entry() {
        let logger = logger();
        let err = io::Error::new(io::ErrorKind::Other, "oops");

        logger.debug("d");
        logger.debugf(format_args!("d{}", 1));
        logger.info("i");
        logger.infof(format_args!("i{}", 1));
        logger.warn("w");
        logger.warnf(format_args!("w{}", 1));
        logger.error(Trace::caller(), "e", &err);
        logger.errorf(Trace::caller(), format_args!("e{}", 1));

        let entries = logger.writer().entries();
        let levels: Vec<Level> = entries.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            [
                Level::Debug,
                Level::Debug,
                Level::Info,
                Level::Info,
                Level::Warn,
                Level::Warn,
                Level::Error,
                Level::Error,
            ]
        );
        for entry in entries {
            assert_eq!(entry.field("hostname"), Some("node-7"));
        }
    }

    #[test]
    fn plain_entries_carry_only_hostname() {
        let logger = logger();
        logger.warn("disk almost full");

        assert_eq!(
            logger.writer().entries(),
            vec![Entry {
                level: Level::Warn,
                message: "disk almost full".to_string(),
                fields: vec![("hostname".to_string(), "node-7".to_string())],
            }]
        );
    }

    #[test]
    fn formatted_message() {
        let logger = logger();
        logger.infof(format_args!("count={}", 5));

        let entries = logger.writer().entries();
        assert_eq!(entries[0].message, "count=5");
    }

    #[test]
    fn error_traces_call_site() {
        let logger = logger();
        let err = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let line = line!() + 1;
        logger.error(Trace::caller(), "boom", &err);

        let entries = logger.writer().entries();
        let entry = &entries[0];
        assert_eq!(entry.level, Level::Error);
        assert_eq!(entry.message, "boom");
        assert_eq!(
            entry.field("trace"),
            Some(format!("{}:{}", file!(), line).as_str())
        );
        assert_eq!(entry.field("error_msg"), Some(err.to_string().as_str()));
        assert_eq!(entry.fields.len(), 3);
    }

    #[test]
    fn errorf_has_no_error_msg() {
        let logger = logger();

        let line = line!() + 1;
        logger.errorf(Trace::caller(), format_args!("failed after {} tries", 3));

        let entries = logger.writer().entries();
        let entry = &entries[0];
        assert_eq!(entry.message, "failed after 3 tries");
        assert_eq!(
            entry.field("trace"),
            Some(format!("{}:{}", file!(), line).as_str())
        );
        assert_eq!(entry.field("error_msg"), None);
        assert_eq!(entry.fields.len(), 2);
    }
}
