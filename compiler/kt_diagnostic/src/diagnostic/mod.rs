//! The reportable form of a problem.

use std::fmt;

use kt_ir::Span;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a label marks the problem itself or something related to it,
/// like the `(` a missing `)` should match.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub style: LabelStyle,
}

impl Label {
    pub fn is_primary(&self) -> bool {
        self.style == LabelStyle::Primary
    }
}

/// A problem ready for rendering: code, headline, source labels and
/// trailing notes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is emitted"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic::new(code, Severity::Error, message.into())
    }

    #[cold]
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic::new(code, Severity::Warning, message.into())
    }

    fn new(code: ErrorCode, severity: Severity, message: String) -> Self {
        Diagnostic {
            code,
            severity,
            message,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn label(mut self, span: Span, message: impl Into<String>, style: LabelStyle) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            style,
        });
        self
    }

    /// Point at where the problem is.
    pub fn at(self, span: Span, message: impl Into<String>) -> Self {
        self.label(span, message, LabelStyle::Primary)
    }

    pub fn related(self, span: Span, message: impl Into<String>) -> Self {
        self.label(span, message, LabelStyle::Secondary)
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary()).map(|l| l.span)
    }
}

/// Header line only: `error[E1003]: Expecting ')'`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests;
