use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rx,
    Tx,
    /// Configuration changes, warnings and other non-traffic lines.
    Status,
}

/// Destination of the emulated console output.
pub trait Sink {
    fn emit(&mut self, direction: Direction, line: &str);
}

/// Prints every line on stdout, the way the simulated hardware reports itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Sink for Console {
    fn emit(&mut self, _direction: Direction, line: &str) {
        println!("{line}");
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, direction: Direction, line: &str) {
        (**self).emit(direction, line);
    }
}

impl<A: Sink, B: Sink> Sink for (A, B) {
    fn emit(&mut self, direction: Direction, line: &str) {
        self.0.emit(direction, line);
        self.1.emit(direction, line);
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub direction: Direction,
    pub line: String,
}

/// In-memory transcript of emitted lines, bounded to `max_entries`.
#[derive(Debug, Clone)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    max_entries: usize,
    filter_rx: bool,
    filter_tx: bool,
}

impl LogStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            filter_rx: true,
            filter_tx: true,
        }
    }

    /// Choose which traffic directions `to_text` renders. Status lines are always shown.
    pub fn set_filter(&mut self, show_rx: bool, show_tx: bool) {
        self.filter_rx = show_rx;
        self.filter_tx = show_tx;
    }

    pub fn push(&mut self, direction: Direction, line: impl Into<String>) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();

        self.entries.push(LogEntry {
            timestamp,
            direction,
            line: line.into(),
        });

        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Recorded lines in emission order, ignoring filters.
    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.line.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn shown(&self, direction: Direction) -> bool {
        match direction {
            Direction::Rx => self.filter_rx,
            Direction::Tx => self.filter_tx,
            Direction::Status => true,
        }
    }

    pub fn to_text(&self, show_timestamp: bool) -> String {
        let mut result = String::new();
        for entry in self.entries.iter().filter(|entry| self.shown(entry.direction)) {
            if show_timestamp {
                let millis = entry.timestamp % 1000;
                let total_secs = entry.timestamp / 1000;
                let hours = (total_secs / 3600) % 24;
                let minutes = (total_secs / 60) % 60;
                let seconds = total_secs % 60;
                result.push_str(&format!("[{hours:02}:{minutes:02}:{seconds:02}.{millis:03}] "));
            }
            result.push_str(&entry.line);
            result.push('\n');
        }
        result
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl Sink for LogStore {
    fn emit(&mut self, direction: Direction, line: &str) {
        self.push(direction, line);
    }
}
