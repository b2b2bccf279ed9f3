use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Debug topics, one per log target
pub const TOPICS: [&str; 5] = ["arena", "collision", "spawn", "vehicle", "session"];

#[derive(Debug)]
struct MoonPatrolLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl MoonPatrolLogger {
    fn new(level: LevelFilter, debug_filter: Option<&str>) -> Self {
        let debug_filters = debug_filter.map(|filter_str| {
            filter_str
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<HashSet<String>>()
        });
        MoonPatrolLogger {
            level,
            debug_filters,
        }
    }
}

impl log::Log for MoonPatrolLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Filters only narrow debug and trace output
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = tick_context(&message)
            .map(|tick| format!("[T{:05}] ", tick))
            .unwrap_or_default();

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // A closed stdout is not worth crashing the game over
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Pulls N out of a "Tick N" marker in a log message
fn tick_context(message: &str) -> Option<u64> {
    let start = message.find("Tick ")? + 5;
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

static LOGGER: OnceLock<MoonPatrolLogger> = OnceLock::new();

/// Installs the game logger. `debug_filter` is a comma-separated list of topics.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| MoonPatrolLogger::new(level, debug_filter.as_deref()));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Routes log output through the test harness; safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_arena {
    ($($arg:tt)*) => {
        log::debug!(target: "arena", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_collision {
    ($($arg:tt)*) => {
        log::debug!(target: "collision", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_spawn {
    ($($arg:tt)*) => {
        log::debug!(target: "spawn", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_vehicle {
    ($($arg:tt)*) => {
        log::debug!(target: "vehicle", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_session {
    ($($arg:tt)*) => {
        log::debug!(target: "session", $($arg)*)
    };
}
