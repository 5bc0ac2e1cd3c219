//! Diagnostic emitters.
//!
//! Only a terminal emitter exists today; the trait keeps the CLI independent
//! of the output format.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in some output format.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Emit a closing summary line.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
