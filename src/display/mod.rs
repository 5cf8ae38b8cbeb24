//! Display/log sink boundary
//!
//! The session layer produces short status lines and state refreshes;
//! rendering them is somebody else's job. [`DisplaySink`] is the fire-and-
//! forget boundary, and [`LogRing`] is the fixed four-line ring the typical
//! OLED sink keeps behind it - provided here so sinks and tests do not each
//! reinvent it.

use heapless::String;

/// Maximum log line length in bytes, sized for a 128 px wide OLED row.
pub const LOG_LINE_LEN: usize = 31;

/// Number of log lines retained.
pub const LOG_LINES: usize = 4;

/// Sink for status output.
///
/// All calls are fire-and-forget; the session layer never consults a return
/// value and never blocks on the sink.
pub trait DisplaySink {
    /// Append one log line of at most [`LOG_LINE_LEN`] bytes.
    fn append_log_line(&mut self, line: &str);

    /// Refresh the joined/not-joined status.
    fn show_status(&mut self, joined: bool);

    /// Report a transmission outcome with a short label.
    fn show_transmission_outcome(&mut self, label: &str, success: bool);

    /// Show free-form debug text.
    fn show_debug(&mut self, text: &str);
}

/// Clip a line to [`LOG_LINE_LEN`] bytes on a character boundary.
pub fn clip_line(line: &str) -> &str {
    if line.len() <= LOG_LINE_LEN {
        return line;
    }
    let mut end = LOG_LINE_LEN;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// Fixed-capacity log line ring: four lines, oldest overwritten.
#[derive(Debug)]
pub struct LogRing {
    lines: [String<LOG_LINE_LEN>; LOG_LINES],
    head: usize,
    len: usize,
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}

impl LogRing {
    /// Create an empty ring.
    pub fn new() -> Self {
        Self {
            lines: [String::new(), String::new(), String::new(), String::new()],
            head: 0,
            len: 0,
        }
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the ring holds no lines.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push a line, clipping it to [`LOG_LINE_LEN`] bytes and overwriting
    /// the oldest line when full.
    pub fn push(&mut self, line: &str) {
        let clipped = clip_line(line);
        let slot = &mut self.lines[self.head];
        slot.clear();
        let _ = slot.push_str(clipped);
        self.head = (self.head + 1) % LOG_LINES;
        if self.len < LOG_LINES {
            self.len += 1;
        }
    }

    /// Iterate over the retained lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let start = (self.head + LOG_LINES - self.len) % LOG_LINES;
        (0..self.len).map(move |i| self.lines[(start + i) % LOG_LINES].as_str())
    }

    /// The most recently pushed line, if any.
    pub fn latest(&self) -> Option<&str> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head + LOG_LINES - 1) % LOG_LINES;
        Some(self.lines[idx].as_str())
    }
}
