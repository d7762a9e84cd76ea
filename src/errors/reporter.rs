//! Diagnostic accumulation and rendering.
//!
//! One [`Reporter`] belongs to one parse session. It is handed to the lexer
//! and the parser as `&mut`, so no two sessions ever share counters.

use std::{collections::HashSet, fmt::Display};

use tracing::{debug, error};

use crate::Span;

use super::errors::{ErrorCode, Severity};

/// A single recorded report.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub span: Span,
    pub extra: String,
}

impl Diagnostic {
    fn squiggle(&self) -> String {
        let start = self.span.start.column.max(1) as usize;
        let width = if self.span.start.line == self.span.end.line {
            self.span.end.column.saturating_sub(self.span.start.column) as usize
        } else {
            // Multi-line spans are underlined up to the end of their first line
            self.span.line_text.chars().count().saturating_sub(start - 1)
        };

        let mut line = " ".repeat(start + 1);
        line.push('^');
        if width >= 2 {
            line.push_str(&"~".repeat(width - 1));
        }

        line
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = self.code.category();

        writeln!(
            f,
            "{} at {} {} - {}",
            self.severity, self.span.start.file, self.span.start, self.span.end
        )?;
        write!(
            f,
            "PZ{}{:04}: {}",
            self.severity.letter(),
            self.code.number(),
            self.code.message()
        )?;
        if !self.extra.is_empty() {
            write!(f, ": {}", self.extra)?;
        }
        if category.suppressable() {
            write!(f, " (suppress with -Wno-{})", category.machine_name())?;
        }
        writeln!(f)?;
        writeln!(f, "> {}", self.span.line_text)?;
        write!(f, "{}", self.squiggle())
    }
}

#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
    counts: [usize; 4],
    suppressed: HashSet<String>,
    suppressed_count: usize,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    /// Creates a reporter silencing the given category machine names.
    ///
    /// Names of categories that cannot be suppressed are accepted but have no effect.
    pub fn with_suppressed<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Reporter {
            suppressed: names.into_iter().collect(),
            ..Reporter::default()
        }
    }

    pub fn suppress(&mut self, machine_name: &str) {
        self.suppressed.insert(machine_name.to_string());
    }

    pub fn error(&mut self, code: ErrorCode, span: Span, extra: impl Into<String>) {
        self.emit(Severity::Error, code, span, extra.into());
    }

    pub fn warning(&mut self, code: ErrorCode, span: Span, extra: impl Into<String>) {
        self.emit(Severity::Warning, code, span, extra.into());
    }

    pub fn note(&mut self, code: ErrorCode, span: Span, extra: impl Into<String>) {
        self.emit(Severity::Note, code, span, extra.into());
    }

    pub fn fatal(&mut self, code: ErrorCode, span: Span, extra: impl Into<String>) {
        self.emit(Severity::Fatal, code, span, extra.into());
    }

    /// Reports `code` at the severity the code itself declares.
    pub fn report(&mut self, code: ErrorCode, span: Span, extra: impl Into<String>) {
        self.emit(code.severity(), code, span, extra.into());
    }

    fn emit(&mut self, severity: Severity, code: ErrorCode, span: Span, extra: String) {
        let category = code.category();
        if category.suppressable() && self.suppressed.contains(category.machine_name()) {
            self.suppressed_count += 1;
            return;
        }

        if severity == Severity::Fatal {
            error!(target: "pretzel::diagnostics", code = code.name(), at = %span.start, "{}", code.message());
        } else {
            debug!(target: "pretzel::diagnostics", %severity, code = code.name(), at = %span.start, "{}", code.message());
        }

        self.counts[severity.index()] += 1;

        // Keep source order; equal starts stay in emission order
        let at = self
            .diagnostics
            .partition_point(|d| d.span.start.offset <= span.start.offset);
        self.diagnostics.insert(
            at,
            Diagnostic {
                severity,
                code,
                span,
                extra,
            },
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity.index()]
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error) + self.count(Severity::Fatal)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Renders every recorded diagnostic in source order, separated by blank lines.
    pub fn render(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
