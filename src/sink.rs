//! Output sinks for the protocol and diagnostic streams.
//!
//! TAP output is consumed incrementally by an external harness, so every
//! write is flushed before the call returns. The two streams are
//! independent: harnesses parse the protocol stream, humans read the
//! diagnostic stream.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// ============================================================================
// OUTPUT SINK TRAIT
// ============================================================================

/// Destination for rendered TAP lines.
///
/// Implementations receive fully formatted lines, indentation included,
/// without a trailing newline, and must make each line visible before
/// returning.
pub trait OutputSink {
    /// Write an `ok` / `not ok` result line to the protocol stream.
    fn result(&mut self, passed: bool, line: &str) -> io::Result<()>;

    /// Write a `1..N` plan line to the protocol stream.
    fn plan(&mut self, line: &str) -> io::Result<()>;

    /// Write a comment line to the diagnostic stream.
    fn diag(&mut self, line: &str) -> io::Result<()>;
}

// ============================================================================
// STANDARD SINK: stdout protocol, stderr diagnostics
// ============================================================================

/// Writes the protocol to stdout and diagnostics to stderr, the layout TAP
/// harnesses expect. Failed result lines are colored red when stdout is a
/// terminal; piped output is plain text.
pub struct StandardSink {
    tapout: StandardStream,
    msgout: StandardStream,
}

impl StandardSink {
    /// Color only when the corresponding stream is a terminal.
    pub fn auto() -> Self {
        Self {
            tapout: StandardStream::stdout(color_choice(atty::Stream::Stdout)),
            msgout: StandardStream::stderr(color_choice(atty::Stream::Stderr)),
        }
    }

    pub fn with_color_choice(choice: ColorChoice) -> Self {
        Self {
            tapout: StandardStream::stdout(choice),
            msgout: StandardStream::stderr(choice),
        }
    }
}

fn color_choice(stream: atty::Stream) -> ColorChoice {
    if atty::is(stream) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

impl Default for StandardSink {
    fn default() -> Self {
        Self::auto()
    }
}

impl OutputSink for StandardSink {
    fn result(&mut self, passed: bool, line: &str) -> io::Result<()> {
        if !passed {
            self.tapout
                .set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        }
        writeln!(self.tapout, "{}", line)?;
        if !passed {
            self.tapout.reset()?;
        }
        self.tapout.flush()
    }

    fn plan(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.tapout, "{}", line)?;
        self.tapout.flush()
    }

    fn diag(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.msgout, "{}", line)?;
        self.msgout.flush()
    }
}

// ============================================================================
// BUFFER SINK: capture for tests and programmatic use
// ============================================================================

/// Collects both streams into strings for tests or programmatic capture.
#[derive(Debug, Default)]
pub struct BufferSink {
    protocol: String,
    diagnostic: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the protocol stream so far.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Everything written to the diagnostic stream so far.
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}

impl OutputSink for BufferSink {
    fn result(&mut self, _passed: bool, line: &str) -> io::Result<()> {
        self.protocol.push_str(line);
        self.protocol.push('\n');
        Ok(())
    }

    fn plan(&mut self, line: &str) -> io::Result<()> {
        self.protocol.push_str(line);
        self.protocol.push('\n');
        Ok(())
    }

    fn diag(&mut self, line: &str) -> io::Result<()> {
        self.diagnostic.push_str(line);
        self.diagnostic.push('\n');
        Ok(())
    }
}
