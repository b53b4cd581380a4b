use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};

/// Browser console sink with a minimum level.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// Debug builds log from `Debug` up, release builds from `Info`.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) { Self::new_development() } else { Self::new_production() }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        let formatted = entry.format_with(get_time_provider());
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => gloo::console::debug!(formatted),
            LogLevel::Info => gloo::console::info!(formatted),
            LogLevel::Warn => gloo::console::warn!(formatted),
            LogLevel::Error => gloo::console::error!(formatted),
        }
    }
}

/// Wall clock from `Date.now()`, formatted as local `HH:MM:SS.mmm`.
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_level_filters() {
        let logger = ConsoleLogger::new_production();
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
    }
}
