//! Display surface - The values and log the window renders
//!
//! Pure presentation state. It is owned by the UI thread and only ever mutated there;
//! background work reaches it through [`super::Simulation::drain`].

use super::console::{ConsoleLog, LogEntry};
use super::reading::ReadingSet;

#[derive(Debug, Clone)]
pub struct DisplaySurface {
    reading: ReadingSet,
    log: ConsoleLog,
    /// Set on every append, cleared when the console panel scrolls
    scroll_pending: bool,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self {
            reading: ReadingSet::BASELINE,
            log: ConsoleLog::with_banner(),
            scroll_pending: true,
        }
    }

    /// Show a new set of readings
    pub fn render_reading(&mut self, reading: ReadingSet) {
        self.reading = reading;
    }

    /// Append a console line and scroll to it
    pub fn append_log(&mut self, entry: LogEntry) {
        self.log.push(entry);
        self.scroll_pending = true;
    }

    /// Zero all readings. The log is left untouched.
    pub fn reset_to_baseline(&mut self) {
        self.reading = ReadingSet::BASELINE;
    }

    pub fn reading(&self) -> ReadingSet {
        self.reading
    }

    pub fn log(&self) -> &ConsoleLog {
        &self.log
    }

    pub fn cpu_label(&self) -> String {
        format!("CPU Usage: {}%", self.reading.cpu_percent)
    }

    pub fn memory_label(&self) -> String {
        format!("Memory Usage: {}%", self.reading.memory_percent)
    }

    pub fn temperature_label(&self) -> String {
        format!("Core Temperature: {}°C", self.reading.temperature_c)
    }

    /// Returns true once after each append
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_reading() -> ReadingSet {
        ReadingSet {
            cpu_percent: 77,
            memory_percent: 45,
            temperature_c: 66,
        }
    }

    #[test]
    fn starts_at_baseline_with_banner() {
        let surface = DisplaySurface::new();
        assert_eq!(surface.reading(), ReadingSet::BASELINE);
        assert_eq!(surface.log().len(), 1);
        assert_eq!(surface.cpu_label(), "CPU Usage: 0%");
        assert_eq!(surface.temperature_label(), "Core Temperature: 0°C");
    }

    #[test]
    fn render_reading_updates_labels() {
        let mut surface = DisplaySurface::new();
        surface.render_reading(busy_reading());
        assert_eq!(surface.cpu_label(), "CPU Usage: 77%");
        assert_eq!(surface.memory_label(), "Memory Usage: 45%");
        assert_eq!(surface.temperature_label(), "Core Temperature: 66°C");
    }

    #[test]
    fn reset_to_baseline_is_idempotent() {
        let mut surface = DisplaySurface::new();
        surface.render_reading(busy_reading());
        surface.append_log(LogEntry::untimestamped("kept"));

        surface.reset_to_baseline();
        let once_reading = surface.reading();
        let once_log = surface.log().entries().to_vec();

        surface.reset_to_baseline();
        assert_eq!(surface.reading(), once_reading);
        assert_eq!(surface.log().entries(), once_log.as_slice());
        assert_eq!(surface.reading(), ReadingSet::BASELINE);
        assert_eq!(surface.log().len(), 2);
    }

    #[test]
    fn scroll_request_is_consumed_once_per_append() {
        let mut surface = DisplaySurface::new();
        assert!(surface.take_scroll_request());
        assert!(!surface.take_scroll_request());

        surface.append_log(LogEntry::untimestamped("x"));
        assert!(surface.take_scroll_request());
        assert!(!surface.take_scroll_request());
    }
}
