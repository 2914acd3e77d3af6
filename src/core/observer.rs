use crate::db::log::ttlog;
use crate::ui::messages::warning;
use rusqlite::Connection;

/// Receives one event per notable pipeline outcome (file loaded, file
/// rejected, batch merged). The CLI forwards them to the internal log table.
pub trait RunObserver {
    fn record(&mut self, operation: &str, target: &str, message: &str);
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn record(&mut self, _: &str, _: &str, _: &str) {}
}

/// Keeps events in memory until the run is over, then writes them to the
/// `log` table in one go.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<(String, String, String)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every buffered event. Failures are reported but never abort.
    pub fn flush_to(&mut self, conn: &Connection) {
        for (operation, target, message) in self.entries.drain(..) {
            if let Err(e) = ttlog(conn, &operation, &target, &message) {
                warning(format!("Failed to write internal log: {e}"));
            }
        }
    }
}

impl RunObserver for EventLog {
    fn record(&mut self, operation: &str, target: &str, message: &str) {
        self.entries
            .push((operation.to_string(), target.to_string(), message.to_string()));
    }
}
