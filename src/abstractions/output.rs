//! Output sink for stage prompts and the final environment dump.

use std::sync::Mutex;

pub trait OutputSink: Send + Sync {
    fn write(&self, text: &str);
}

/// Writes each message as a line on stdout.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, text: &str) {
        println!("{text}");
    }
}

/// Captures writes for assertions in tests.
#[derive(Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl OutputSink for BufferSink {
    fn write(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_captures_in_order() {
        let sink = BufferSink::new();
        sink.write("first");
        sink.write("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }
}
