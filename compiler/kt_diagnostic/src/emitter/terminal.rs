//! Plain-text rendering for terminals.
//!
//! ```text
//! error[E1003]: Expecting ')'
//!   --> Main.kt:2:7
//!   |
//! 2 | foo(a b)
//!   |       ^
//! ```
//!
//! Without attached source text, locations fall back to byte ranges and
//! no snippet is printed.

use std::io::{self, Write};

use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Error,
    Warning,
    Secondary,
    Bold,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Warning => "\x1b[1;33m",
            Style::Secondary => "\x1b[1;34m",
            Style::Bold => "\x1b[1m",
        }
    }

    fn for_label(label: &Label) -> Style {
        if label.is_primary() {
            Style::Error
        } else {
            Style::Secondary
        }
    }
}

const RESET: &str = "\x1b[0m";

/// 1-based position of a byte offset.
struct LineCol {
    line: usize,
    column: usize,
}

struct Source<'s> {
    path: &'s str,
    text: &'s str,
}

impl Source<'_> {
    fn locate(&self, offset: u32) -> LineCol {
        let offset = (offset as usize).min(self.text.len());
        let before = self.text.get(..offset).unwrap_or_default();
        let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
        LineCol {
            line: before.bytes().filter(|&b| b == b'\n').count() + 1,
            column: before.get(line_start..).map_or(0, |s| s.chars().count()) + 1,
        }
    }

    fn line(&self, line: usize) -> &str {
        self.text.lines().nth(line - 1).unwrap_or_default()
    }
}

pub struct TerminalEmitter<'s, W: Write> {
    writer: W,
    colors: bool,
    source: Option<Source<'s>>,
}

impl TerminalEmitter<'_, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

// Write errors are dropped: there is nowhere left to report them.
impl<'s, W: Write> TerminalEmitter<'s, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Resolve label spans against `text`, reported as `path`.
    #[must_use]
    pub fn with_source(mut self, path: &'s str, text: &'s str) -> Self {
        self.source = Some(Source { path, text });
        self
    }

    fn paint(&mut self, style: Style, text: &str) {
        let _ = if self.colors {
            write!(self.writer, "{}{text}{RESET}", style.ansi())
        } else {
            write!(self.writer, "{text}")
        };
    }

    fn header(&mut self, diagnostic: &Diagnostic) {
        let style = match diagnostic.severity {
            Severity::Error => Style::Error,
            Severity::Warning => Style::Warning,
        };
        self.paint(style, diagnostic.severity.as_str());
        self.paint(Style::Bold, &format!("[{}]", diagnostic.code));
        let _ = writeln!(self.writer, ": {}", diagnostic.message);
    }

    fn label(&mut self, label: &Label) {
        let arrow = if label.is_primary() { "-->" } else { ":::" };
        let location = match &self.source {
            Some(source) => {
                let at = source.locate(label.span.start);
                format!("{}:{}:{}", source.path, at.line, at.column)
            }
            None => label.span.to_string(),
        };
        let _ = write!(self.writer, "  {arrow} {location}");
        if !label.message.is_empty() {
            let _ = write!(self.writer, ": ");
            self.paint(Style::for_label(label), &label.message);
        }
        let _ = writeln!(self.writer);
        self.snippet(label);
    }

    fn snippet(&mut self, label: &Label) {
        let Some(source) = &self.source else {
            return;
        };
        let at = source.locate(label.span.start);
        let line = source.line(at.line).to_string();
        let room = line.chars().count().saturating_sub(at.column - 1).max(1);
        let width = (label.span.len() as usize).clamp(1, room);
        let gutter = " ".repeat(at.line.to_string().len());

        let _ = writeln!(self.writer, "{gutter} |");
        let _ = writeln!(self.writer, "{} | {line}", at.line);
        let _ = write!(self.writer, "{gutter} | {}", " ".repeat(at.column - 1));
        let underline = if label.is_primary() { "^" } else { "-" }.repeat(width);
        self.paint(Style::for_label(label), &underline);
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.header(diagnostic);
        for label in &diagnostic.labels {
            self.label(label);
        }
        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.paint(Style::Bold, "note");
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let (style, word, count, verb) = match (error_count, warning_count) {
            (0, 0) => return,
            (0, warnings) => (Style::Warning, "warning", warnings, "emitted"),
            (errors, _) => (Style::Error, "error", errors, "found"),
        };
        let plural = if count == 1 { "" } else { "s" };
        self.paint(style, word);
        let noun = if error_count > 0 { "syntax error" } else { "warning" };
        let _ = writeln!(self.writer, ": {count} {noun}{plural} {verb}");
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use kt_ir::Span;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorCode;

    fn render(emitter_source: Option<&str>, mode: ColorMode, diag: &Diagnostic) -> String {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, true);
        if let Some(text) = emitter_source {
            emitter = emitter.with_source("Main.kt", text);
        }
        emitter.emit(diag);
        emitter.flush();
        String::from_utf8(output).unwrap()
    }

    fn missing_paren() -> Diagnostic {
        Diagnostic::error(ErrorCode::E1003, "Expecting ')'")
            .at(Span::new(8, 9), "expected here")
            .note("parentheses must be balanced")
    }

    #[test]
    fn byte_ranges_without_source() {
        let text = render(None, ColorMode::Never, &missing_paren());
        assert_eq!(
            text,
            "error[E1003]: Expecting ')'\n  --> 8..9: expected here\n  = note: parentheses must be balanced\n\n"
        );
    }

    #[test]
    fn colors_follow_the_mode() {
        assert!(render(None, ColorMode::Auto, &missing_paren()).contains("\x1b[1;31merror"));
        assert!(!render(None, ColorMode::Never, &missing_paren()).contains('\x1b'));
    }

    #[test]
    fn snippet_points_at_the_column() {
        let source = "val x = 1\nfoo(a b)\n";
        let diag = Diagnostic::error(ErrorCode::E1003, "Expecting ','")
            .related(Span::new(13, 14), "")
            .at(Span::point(16), "");
        let text = render(Some(source), ColorMode::Never, &diag);
        assert_eq!(
            text,
            concat!(
                "error[E1003]: Expecting ','\n",
                "  ::: Main.kt:2:4\n",
                "  |\n",
                "2 | foo(a b)\n",
                "  |    -\n",
                "  --> Main.kt:2:7\n",
                "  |\n",
                "2 | foo(a b)\n",
                "  |       ^\n",
                "\n",
            )
        );
    }

    #[test]
    fn summary_counts() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit_summary(2, 0);
        emitter.emit_summary(0, 1);
        emitter.emit_summary(0, 0);
        emitter.emit_summary(1, 3);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "error: 2 syntax errors found\nwarning: 1 warning emitted\nerror: 1 syntax error found\n"
        );
    }
}
