//! `CallContext`: a callable's channel for non-error side output.
//!
//! A callable writes printed text, informational messages and warnings
//! through the context instead of straight to a terminal. In emit mode
//! (the engine's default) they go to `tracing`; in capture mode (used by
//! `quietly`) they are buffered and handed back as data.

use tracing::{info, warn};

/// Side output captured while a context was in capture mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captured {
    /// Printed text, one line per `print` call, newline-terminated.
    pub output: String,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Emit,
    Capture,
}

/// Side-output sink passed to every [`crate::call::callable::Callable::call`].
#[derive(Debug)]
pub struct CallContext {
    mode: Mode,
    captured: Captured,
}

impl CallContext {
    /// Forward side output to `tracing`.
    #[must_use]
    pub fn emitting() -> Self {
        Self {
            mode: Mode::Emit,
            captured: Captured::default(),
        }
    }

    /// Buffer side output for later retrieval.
    #[must_use]
    pub fn capturing() -> Self {
        Self {
            mode: Mode::Capture,
            captured: Captured::default(),
        }
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.mode == Mode::Capture
    }

    /// Printed output. Emitted at `info` on target `tidymap::output`.
    pub fn print(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        match self.mode {
            Mode::Emit => info!(target: "tidymap::output", "{text}"),
            Mode::Capture => {
                self.captured.output.push_str(text);
                self.captured.output.push('\n');
            }
        }
    }

    /// Informational message. Emitted at `info` on target `tidymap::message`.
    pub fn message(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        match self.mode {
            Mode::Emit => info!(target: "tidymap::message", "{text}"),
            Mode::Capture => self.captured.messages.push(text.to_string()),
        }
    }

    /// Non-fatal warning. Emitted at `warn` on target `tidymap::warning`.
    pub fn warn(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        match self.mode {
            Mode::Emit => warn!(target: "tidymap::warning", "{text}"),
            Mode::Capture => self.captured.warnings.push(text.to_string()),
        }
    }

    /// Take everything captured so far, leaving the buffer empty.
    pub fn take_captured(&mut self) -> Captured {
        std::mem::take(&mut self.captured)
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::emitting()
    }
}
