//! Diagnostic rendering

#[cfg(feature = "lsp-types")]
pub mod diag_lsp;

use std::fmt;

use base::{
    ln::LineTable,
    span::{CursorRange, Position, Span},
};
use colored::Colorize;

pub const QUOTE: colored::Color = colored::Color::BrightBlue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        }
    }

    pub fn color(&self) -> colored::Color {
        match self {
            Self::Error => colored::Color::Red,
            Self::Warning => colored::Color::Yellow,
            Self::Info => colored::Color::Blue,
            Self::Hint => colored::Color::Green,
        }
    }
}

pub trait Diagnostic {
    // <severity>[<code>]: <msg>
    fn code(&self) -> &'static str;
    fn severity(&self) -> Severity;
    fn msg(&self) -> String;

    /// Primary location. `None` when the diagnostic is about a node synthesized during lowering.
    fn range(&self) -> Option<CursorRange>;

    //    ^^^^ <reason>
    fn reason(&self) -> String {
        self.msg()
    }

    /// Secondary locations
    fn notes(&self) -> Vec<Note> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    pub range: Option<CursorRange>,
    pub msg: String,
}

/// ```text
/// <severity>[code]: <msg>
/// --> <src_file>:<ln>:<col>
/// ```
#[derive(Debug)]
pub struct Header<'a> {
    pub code: &'static str,
    pub severity: Severity,
    pub msg: String,
    pub src_file: &'a str,
    /// `None` if there's no precise location
    pub pos: Option<Position>,
}

impl<'a> fmt::Display for Header<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_code = format!("{}[{}]", self.severity.as_str(), self.code);

        writeln!(
            f,
            "{}: {}",
            severity_code.color(self.severity.color()).bold(),
            self.msg.bold(),
        )?;

        match self.pos {
            Some(pos) => writeln!(f, "--> {}:{}", self.src_file, pos),
            None => writeln!(f, "--> {} (no precise location)", self.src_file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MsgSpan {
    /// Span within the line string
    pub line_span: Span,
    /// Message for the spanned text
    pub msg: String,
}

/// ```text
///      |
/// <ln> | <line_text>
///      |    ^^^^ <msg>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineSpanMain<'a> {
    pub severity: Severity,
    /// Line number for display
    pub line1: u32,
    pub line_text: &'a str,
    pub main: MsgSpan,
}

impl<'a> fmt::Display for LineSpanMain<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n_digits = self::n_digits(self.line1 as usize);
        let indent = " ".repeat(n_digits);

        let vbar = "|".color(QUOTE).bold();
        let line = format!("{}", self.line1);

        writeln!(f, "{indent} {vbar}")?;
        writeln!(f, "{} {vbar} {}", line.color(QUOTE).bold(), self.line_text)?;
        writeln!(
            f,
            "{indent} {vbar} {} {}",
            self::reason_range_string(self.line_text, self.main.line_span)
                .color(self.severity.color())
                .bold(),
            self.main.msg.color(self.severity.color()).bold(),
        )?;

        Ok(())
    }
}

/// ```text
/// = note: <msg> at <ln>:<col>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteLine {
    pub msg: String,
    pub pos: Option<Position>,
}

impl fmt::Display for NoteLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = "= note".bold();
        match self.pos {
            Some(pos) => writeln!(f, "{note}: {} at {}", self.msg, pos),
            None => writeln!(f, "{note}: {} (no precise location)", self.msg),
        }
    }
}

#[derive(Debug)]
pub struct Render<'a> {
    pub header: Header<'a>,
    /// `None` if there's no precise location
    pub window: Option<LineSpanMain<'a>>,
    pub notes: Vec<NoteLine>,
}

impl<'a> fmt::Display for Render<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NOTE: each format contains the last newline character, so don't use `writeln!`
        write!(f, "{}", self.header)?;
        if let Some(window) = &self.window {
            write!(f, "{}", window)?;
        }
        for note in &self.notes {
            write!(f, "{}", note)?;
        }
        Ok(())
    }
}

/// Line diagnostic window. `src` and `ln_tbl` must be of the text the diagnostic is about.
pub fn render<'a>(
    diag: &impl Diagnostic,
    src_file: &'a str,
    src: &'a str,
    ln_tbl: &LineTable,
) -> Render<'a> {
    let range = diag.range();

    let header = Header {
        code: diag.code(),
        severity: diag.severity(),
        msg: diag.msg(),
        src_file,
        pos: range.map(|r| r.lcur().position()),
    };

    let window = range.map(|range| {
        let span = range.span();
        let line_text_span = ln_tbl.line_span(span.start);
        let line_text = line_text_span.slice(src).trim_end();

        // multi-line spans are cut at the end of the first line. A span starting in trailing
        // whitespace is moved to the end of the trimmed text.
        let line_end = line_text_span.start + line_text.len() as u32;
        let start = span.start.min(line_end);
        let end = span.end.min(line_end).max(start);
        let line_span = Span { start, end } - line_text_span.start;

        LineSpanMain {
            severity: diag.severity(),
            line1: range.lcur().position().line1(),
            line_text,
            main: MsgSpan {
                line_span,
                msg: diag.reason(),
            },
        }
    });

    let notes = diag
        .notes()
        .into_iter()
        .map(|note| NoteLine {
            msg: note.msg,
            pos: note.range.map(|r| r.lcur().position()),
        })
        .collect();

    Render {
        header,
        window,
        notes,
    }
}

/// Carets under `line_span`, counted in chars of `line_text`
fn reason_range_string(line_text: &str, line_span: Span) -> String {
    let n_chars = |start: usize, end: usize| {
        line_text.get(start..end).map_or(0, |s| s.chars().count())
    };

    let start = line_span.start.into_usize();
    let indent = n_chars(0, start);
    let width = n_chars(start, line_span.end.into_usize());

    let mut s = String::new();
    s.push_str(&" ".repeat(indent));
    s.push_str(&"^".repeat(width.max(1)));

    s
}

fn n_digits(mut x: usize) -> usize {
    let mut n_digits = 0;

    loop {
        x /= 10;
        n_digits += 1;

        if x == 0 {
            break;
        }
    }

    n_digits
}
