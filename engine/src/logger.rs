use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    verbose: bool,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        Self { prefix, verbose }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        if let Some(ref prefix) = self.prefix {
            println!("[{}][{}] {}", timestamp, prefix, message);
        } else {
            println!("[{}] {}", timestamp, message);
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Installs the process-wide logger. Only the first call has any effect.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

// Messages sent before `init_logger` are dropped.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

pub fn debug(message: &str) {
    if let Some(logger) = LOGGER.get()
        && logger.is_verbose()
    {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::logger::is_initialized() {
            $crate::logger::debug(&format!($($arg)*))
        }
    };
}
