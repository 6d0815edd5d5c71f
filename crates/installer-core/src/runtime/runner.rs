//! Provisioning runner
//!
//! Executes an ordered command sequence as one chained shell invocation,
//! streaming its output to the reporter as it is produced.

use crate::error::{InstallError, Result};
use crate::report::{OutputStream, Reporter};
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Ordered shell commands; each runs only if the previous one succeeded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSequence {
    commands: Vec<String>,
}

impl CommandSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Append `suffix` as an extra argument to every command
    pub fn with_suffix(self, suffix: &str) -> Self {
        self.commands
            .into_iter()
            .map(|command| format!("{} {}", command, suffix))
            .collect()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Single shell line with short-circuit chaining
    pub fn to_shell_line(&self) -> String {
        self.commands.join(" && ")
    }
}

impl FromIterator<String> for CommandSequence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// Terminal attachment for the child process
#[derive(Debug)]
pub enum Terminal {
    /// The controlling terminal, handed to the child for interactive prompts
    Interactive(File),
    /// Output captured through pipes and forwarded to the reporter
    Piped,
}

impl Terminal {
    /// Use the controlling terminal when one can be opened for reading and writing
    pub fn detect() -> Self {
        #[cfg(unix)]
        {
            if let Ok(tty) = std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .open("/dev/tty")
            {
                return Terminal::Interactive(tty);
            }
        }
        Terminal::Piped
    }
}

pub struct ProvisioningRunner<'a, R: Reporter + ?Sized> {
    reporter: &'a R,
}

impl<'a, R: Reporter + ?Sized> ProvisioningRunner<'a, R> {
    pub fn new(reporter: &'a R) -> Self {
        Self { reporter }
    }

    /// Run `sequence` as one child process, in `working_dir` when given
    ///
    /// Fails if the child cannot be launched or the chain exits unsuccessfully.
    pub async fn run(
        &self,
        sequence: &CommandSequence,
        working_dir: Option<&Path>,
        terminal: &Terminal,
    ) -> Result<()> {
        if sequence.is_empty() {
            return Ok(());
        }

        let line = sequence.to_shell_line();
        let mut command = shell_command(&line);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        match terminal {
            Terminal::Interactive(tty) => {
                command
                    .stdin(attach(tty)?)
                    .stdout(attach(tty)?)
                    .stderr(attach(tty)?);
            }
            Terminal::Piped => {
                command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
        }

        let mut child = command.spawn().map_err(|e| {
            InstallError::Provisioning(format!("Failed to launch `{}`: {}", line, e))
        })?;

        if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
            self.forward(BufReader::new(stdout), BufReader::new(stderr))
                .await;
        }

        let status = child.wait().await.map_err(|e| {
            InstallError::Provisioning(format!("Failed to wait for `{}`: {}", line, e))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(InstallError::Provisioning(match status.code() {
                Some(code) => format!("`{}` exited with code {}", line, code),
                None => format!("`{}` was terminated by a signal", line),
            }))
        }
    }

    /// Forward both pipes chunk by chunk until each reaches end of file
    ///
    /// A pipe that fails to read is dropped so the child sees a closed pipe
    /// instead of blocking on a full one.
    async fn forward<O, E>(&self, stdout: O, stderr: E)
    where
        O: AsyncBufRead + Unpin,
        E: AsyncBufRead + Unpin,
    {
        let mut stdout = Some(stdout);
        let mut stderr = Some(stderr);
        let mut out_buf = Vec::new();
        let mut err_buf = Vec::new();

        while stdout.is_some() || stderr.is_some() {
            tokio::select! {
                read = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => {
                    if self.emit(OutputStream::Stdout, read, &mut out_buf) {
                        stdout = None;
                    }
                }
                read = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => {
                    if self.emit(OutputStream::Stderr, read, &mut err_buf) {
                        stderr = None;
                    }
                }
            }
        }
    }

    /// Send a completed chunk to the reporter; returns true once the stream is finished
    ///
    /// `buf` may hold bytes left by a read cancelled in `select!`, so it is
    /// flushed before the stream is closed.
    fn emit(&self, stream: OutputStream, read: io::Result<usize>, buf: &mut Vec<u8>) -> bool {
        let finished = match read {
            Ok(0) => true,
            Ok(_) => false,
            Err(e) => {
                self.reporter
                    .warning(&format!("Error reading subprocess output: {}", e));
                true
            }
        };

        if !buf.is_empty() {
            self.reporter.output(stream, buf);
            buf.clear();
        }
        finished
    }
}

/// Read up to the next newline; a missing reader reads as end of file
async fn read_chunk<B: AsyncBufRead + Unpin>(
    reader: &mut Option<B>,
    buf: &mut Vec<u8>,
) -> io::Result<usize> {
    match reader {
        Some(reader) => reader.read_until(b'\n', buf).await,
        None => Ok(0),
    }
}

fn attach(tty: &File) -> Result<Stdio> {
    tty.try_clone()
        .map(Stdio::from)
        .map_err(|e| InstallError::Provisioning(format!("Failed to attach terminal: {}", e)))
}

#[cfg(unix)]
fn shell_command(line: &str) -> TokioCommand {
    let mut command = TokioCommand::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_command(line: &str) -> TokioCommand {
    let mut command = TokioCommand::new("cmd");
    command.arg("/C").arg(line);
    command
}
