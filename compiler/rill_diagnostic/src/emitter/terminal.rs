//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const CONTEXT: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a terminal.
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

/// Source file a diagnostic's spans point into.
struct SourceFile {
    path: String,
    text: String,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Attach the source so labels render as `path:line:col` with an
    /// excerpt instead of raw byte ranges.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        self.source = Some(SourceFile {
            path: path.into(),
            text,
            lines,
        });
        self
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    /// The first label gets the `-->` marker and error color; the rest
    /// are context.
    fn write_label(&mut self, label: &Label, primary: bool) {
        let marker = if primary { "-->" } else { "   " };
        let color = if primary { colors::ERROR } else { colors::CONTEXT };

        let Some(source) = &self.source else {
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
            return;
        };

        let (line, col) = source.lines.offset_to_line_col(&source.text, label.span.start);
        let excerpt = source
            .lines
            .line_text(&source.text, line)
            .unwrap_or_default()
            .to_string();
        let _ = writeln!(self.writer, "  {marker} {}:{line}:{col}", source.path);

        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());
        let _ = writeln!(self.writer, "  {pad} |");
        let _ = writeln!(self.writer, "  {gutter} | {excerpt}");

        let excerpt_len = excerpt.chars().count();
        let start = (col as usize).saturating_sub(1).min(excerpt_len);
        let width = (label.span.len() as usize).clamp(1, (excerpt_len - start).max(1));
        let carets = format!("{}{}", " ".repeat(start), "^".repeat(width));
        let _ = write!(self.writer, "  {pad} | ");
        self.write_colored(&carets, color);
        let _ = write!(self.writer, " ");
        self.write_colored(&label.message, color);
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for (i, label) in diagnostic.labels.iter().enumerate() {
            self.write_label(label, i == 0);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use rill_ir::Span;

    fn sample_diagnostic() -> Diagnostic {
        Diagnostic::error(ErrorCode::E2001)
            .with_message("type mismatch: expected `bool`, found `int`")
            .with_label(Span::new(7, 8), "expected `bool`")
            .with_note("conditions must be `bool`")
            .with_suggestion("compare against zero: `x != 0`")
    }

    fn render(emitter: TerminalEmitter<&mut Vec<u8>>) -> TerminalEmitter<&mut Vec<u8>> {
        let mut emitter = emitter;
        emitter.emit(&sample_diagnostic());
        emitter.flush();
        emitter
    }

    #[test]
    fn test_terminal_emitter_no_color() {
        let mut output = Vec::new();
        render(TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, true));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error[E2001]: type mismatch"));
        assert!(text.contains("--> 7..8: expected `bool`"));
        assert!(text.contains("note: conditions"));
        assert!(text.contains("help: compare"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_terminal_emitter_with_color() {
        let mut output = Vec::new();
        render(TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("E2001"));
    }

    #[test]
    fn test_source_excerpt_with_caret() {
        let mut output = Vec::new();
        let source = "int x;\nwhile (x) { }";
        render(
            TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
                .with_source("demo.rill", source),
        );

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("--> demo.rill:2:1"), "{text}");
        assert!(text.contains("2 | while (x) { }"), "{text}");
        assert!(text.contains("  | ^ expected `bool`"), "{text}");
    }

    #[test]
    fn test_color_mode_resolution() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }
}
