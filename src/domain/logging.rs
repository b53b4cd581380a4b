use derive_more::Display;
use std::sync::OnceLock;

/// Severity, ordered from chattiest to most serious. Labels are padded to five
/// columns so console output lines up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace,
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer + sub-component that produced an entry, e.g. `INF:AlphaVantage`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// One line of diagnostics. `timestamp` comes from whichever clock is
/// installed when the entry is built.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub metadata: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.to_owned(),
            metadata: None,
        }
    }

    pub fn new_with_metadata(
        level: LogLevel,
        component: LogComponent,
        message: &str,
        metadata: &str,
    ) -> Self {
        Self::new(level, component, message).with_metadata(metadata)
    }

    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.metadata = Some(metadata.to_owned());
        self
    }

    /// `[ts] LEVEL COMPONENT | message | metadata`
    pub fn format_with(&self, time_provider: &dyn TimeProvider) -> String {
        let mut line = format!(
            "[{}] {} {} | {}",
            time_provider.format_timestamp(self.timestamp),
            self.level,
            self.component,
            self.message
        );
        if let Some(meta) = &self.metadata {
            line.push_str(" | ");
            line.push_str(meta);
        }
        line
    }
}

/// Clock used to stamp entries. The browser build installs one backed by
/// `Date.now()`.
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Diagnostic channel for every layer. Failures that the UI swallows end up
/// here and nowhere else.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn at(&self, level: LogLevel, component: LogComponent, message: &str) {
        self.log(LogEntry::new(level, component, message));
    }

    fn trace(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Trace, component, message);
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Debug, component, message);
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Info, component, message);
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Warn, component, message);
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.at(LogLevel::Error, component, message);
    }

    fn log_with_metadata(
        &self,
        level: LogLevel,
        component: LogComponent,
        message: &str,
        metadata: &str,
    ) {
        self.log(LogEntry::new(level, component, message).with_metadata(metadata));
    }
}

type SharedLogger = Box<dyn Logger + Sync + Send>;
type SharedClock = Box<dyn TimeProvider + Sync + Send>;

static LOGGER: OnceLock<SharedLogger> = OnceLock::new();
static CLOCK: OnceLock<SharedClock> = OnceLock::new();

/// First call wins; later calls are ignored.
pub fn init_logger(logger: SharedLogger) {
    let _ = LOGGER.set(logger);
}

pub fn init_time_provider(time_provider: SharedClock) {
    let _ = CLOCK.set(time_provider);
}

/// Entries are dropped until [`init_logger`] runs.
pub fn get_logger() -> &'static dyn Logger {
    match LOGGER.get() {
        Some(logger) => logger.as_ref(),
        None => &Discard,
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    match CLOCK.get() {
        Some(clock) => clock.as_ref(),
        None => &SequenceClock,
    }
}

struct Discard;

impl Logger for Discard {
    fn log(&self, _entry: LogEntry) {}
}

/// Stamps entries with a process-wide sequence number. Native tests never
/// install a real clock, so this is what they see.
struct SequenceClock;

impl TimeProvider for SequenceClock {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{:06}", timestamp)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().at(
            $crate::domain::logging::LogLevel::$level,
            $component,
            &format!($($arg)*),
        )
    };
}

/// Compiled out of release builds.
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::__log_at!(Trace, $component, $($arg)*);
        }
    };
}

/// Compiled out of release builds.
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::__log_at!(Debug, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!(Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!(Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!(Error, $component, $($arg)*)
    };
}
