//! Message sinks for pipeline progress and subprocess output

use colored::Colorize;
use std::io::Write;

/// Which pipe of the child process a chunk of output came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Leveled message sink consumed by the installer
pub trait Reporter {
    fn intro(&self, title: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    /// Operator guidance, shown as-is
    fn remark(&self, message: &str);
    /// Subprocess output, forwarded byte for byte including its line terminator
    fn output(&self, stream: OutputStream, chunk: &[u8]);
    fn outro(&self, message: &str);
}

/// Plain console reporter using colored output
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Create a reporter; `ansi = false` disables styling process-wide
    pub fn new(ansi: bool) -> Self {
        if !ansi {
            colored::control::set_override(false);
        }
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn intro(&self, title: &str) {
        println!("{}", title.cyan().bold());
        println!();
    }

    fn info(&self, message: &str) {
        println!("{}", message.green());
    }

    fn success(&self, message: &str) {
        println!("{} {}", "Done:".green().bold(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    fn remark(&self, message: &str) {
        println!("{}", message.yellow());
    }

    fn output(&self, stream: OutputStream, chunk: &[u8]) {
        write_chunk(stream, chunk);
    }

    fn outro(&self, message: &str) {
        println!();
        println!("{}", message.yellow().bold());
    }
}

/// Write subprocess output straight to the matching console stream
pub(crate) fn write_chunk(stream: OutputStream, chunk: &[u8]) {
    let _ = match stream {
        OutputStream::Stdout => {
            let mut out = std::io::stdout().lock();
            out.write_all(chunk).and_then(|_| out.flush())
        }
        OutputStream::Stderr => {
            let mut err = std::io::stderr().lock();
            err.write_all(chunk).and_then(|_| err.flush())
        }
    };
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{OutputStream, Reporter};
    use std::sync::Mutex;

    /// A reported event, kept in arrival order
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Intro(String),
        Info(String),
        Success(String),
        Warning(String),
        Error(String),
        Remark(String),
        Output(OutputStream, Vec<u8>),
        Outro(String),
    }

    #[derive(Default)]
    pub struct RecordingReporter {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingReporter {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        /// All stdout chunks concatenated, as raw bytes
        pub fn stdout_bytes(&self) -> Vec<u8> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Output(OutputStream::Stdout, chunk) => Some(chunk),
                    _ => None,
                })
                .flatten()
                .collect()
        }

        /// All stdout chunks concatenated
        pub fn stdout(&self) -> String {
            String::from_utf8_lossy(&self.stdout_bytes()).into_owned()
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl Reporter for RecordingReporter {
        fn intro(&self, title: &str) {
            self.push(Event::Intro(title.to_string()));
        }

        fn info(&self, message: &str) {
            self.push(Event::Info(message.to_string()));
        }

        fn success(&self, message: &str) {
            self.push(Event::Success(message.to_string()));
        }

        fn warning(&self, message: &str) {
            self.push(Event::Warning(message.to_string()));
        }

        fn error(&self, message: &str) {
            self.push(Event::Error(message.to_string()));
        }

        fn remark(&self, message: &str) {
            self.push(Event::Remark(message.to_string()));
        }

        fn output(&self, stream: OutputStream, chunk: &[u8]) {
            self.push(Event::Output(stream, chunk.to_vec()));
        }

        fn outro(&self, message: &str) {
            self.push(Event::Outro(message.to_string()));
        }
    }
}
