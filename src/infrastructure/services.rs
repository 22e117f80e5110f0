use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

/// Console logger: browser console on wasm, stderr natively.
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

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn format_log_entry(entry: &LogEntry, time: &dyn TimeProvider) -> String {
        let timestamp = time.format_timestamp(entry.timestamp);
        format!("[{}] {} {} | {}", timestamp, entry.level, entry.component, entry.message)
    }
}

impl Logger for ConsoleLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        let formatted = Self::format_log_entry(&entry, crate::domain::logging::get_time_provider());

        #[cfg(target_arch = "wasm32")]
        {
            let line = wasm_bindgen::JsValue::from_str(&formatted);
            match entry.level {
                LogLevel::Debug => web_sys::console::debug_1(&line),
                LogLevel::Info => web_sys::console::info_1(&line),
                LogLevel::Warn => web_sys::console::warn_1(&line),
                LogLevel::Error => web_sys::console::error_1(&line),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", formatted);
    }
}

/// Wall-clock time provider for native hosts.
#[cfg(not(target_arch = "wasm32"))]
pub struct SystemTimeProvider;

#[cfg(not(target_arch = "wasm32"))]
impl TimeProvider for SystemTimeProvider {
    fn current_timestamp(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format_clock(timestamp)
    }
}

/// Browser time provider backed by `Date.now()`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserTimeProvider;

#[cfg(target_arch = "wasm32")]
impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format_clock(timestamp)
    }
}

/// `HH:MM:SS.mmm` of a millisecond epoch timestamp, UTC.
pub fn format_clock(timestamp: u64) -> String {
    let millis = timestamp % 1_000;
    let seconds = (timestamp / 1_000) % 60;
    let minutes = (timestamp / 60_000) % 60;
    let hours = (timestamp / 3_600_000) % 24;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}
