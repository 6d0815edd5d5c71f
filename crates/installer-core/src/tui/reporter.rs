//! Reporter backed by cliclack's inline log output

use crate::report::{write_chunk, OutputStream, Reporter};

/// Frames the run with cliclack intro/outro and leveled log lines
///
/// Subprocess output bypasses cliclack so it reaches the terminal untouched.
pub struct CliclackReporter;

impl CliclackReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliclackReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for CliclackReporter {
    fn intro(&self, title: &str) {
        let _ = cliclack::intro(title);
    }

    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn error(&self, message: &str) {
        let _ = cliclack::log::error(message);
    }

    fn remark(&self, message: &str) {
        let _ = cliclack::log::remark(message);
    }

    fn output(&self, stream: OutputStream, chunk: &[u8]) {
        write_chunk(stream, chunk);
    }

    fn outro(&self, message: &str) {
        let _ = cliclack::outro(message);
    }
}
