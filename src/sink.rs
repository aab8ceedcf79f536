//! Progress and output collaborators for a validation run.
//!
//! The orchestrator only talks to these traits, so the core checks run the
//! same under the console host and under the recording fakes used in tests.
use std::io::{self, Write};

/// Push-based progress channel; advisory only.
pub trait ProgressSink {
    /// Report a step label and, when the step completes a share of the scan,
    /// the percentage it contributes.
    fn report(&mut self, label: &str, increment: Option<f64>);
}

/// Appendable text log that is cleared at run start and shown at run end.
pub trait OutputSink {
    fn clear(&mut self);
    fn append_line(&mut self, line: &str);
    fn show(&mut self);
}

/// Console progress: prints a running percentage to stderr when verbose.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    verbose: bool,
    completed: f64,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            completed: 0.0,
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, label: &str, increment: Option<f64>) {
        if let Some(increment) = increment {
            self.completed = (self.completed + increment).min(100.0);
        }
        tracing::trace!(label, completed = self.completed, "progress");
        if self.verbose {
            eprintln!("[{:>3.0}%] {label}", self.completed);
        }
    }
}

/// Console output: buffers the report and writes it to stdout on `show`.
///
/// With `echo` off the report is still built but never printed, which is how
/// `--json` keeps stdout for the machine-readable summary.
#[derive(Debug, Default)]
pub struct ConsoleOutput {
    echo: bool,
    lines: Vec<String>,
}

impl ConsoleOutput {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            lines: Vec::new(),
        }
    }
}

impl OutputSink for ConsoleOutput {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn show(&mut self) {
        if !self.echo {
            return;
        }
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(err) = write_lines(&mut handle, &self.lines) {
            tracing::debug!(%err, "stdout closed while writing report");
        }
    }
}

fn write_lines<W: Write>(writer: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
