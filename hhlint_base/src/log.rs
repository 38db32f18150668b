//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
///
/// Every lexical problem is fatal, so errors are the only severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
}

impl Severity {
    fn header(self) -> formatting::Painted<&'static str> {
        match self {
            Self::Error => Color::Red.paint("[error]:"),
        }
        .with_style(Style::Bold)
    }
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.severity.header(),
            Style::Bold.paint(&self.display)
        )
    }
}

fn digits(number: usize) -> usize { number.checked_ilog10().map_or(1, |x| x as usize + 1) }

/// Structure implementing [`Display`] that prints the first line of a span with the spanned
/// columns underlined.
///
/// Lexical errors point at an opening delimiter whose construct may run to the end of the file,
/// so only the line the span starts on is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self.span.start_location();
        let width = digits(start.line);
        let gutter = Color::Cyan.paint("┃").with_style(Style::Bold);

        writeln!(
            f,
            "{:width$} {} {}:{}:{}",
            "",
            Color::Cyan.paint("-->").with_style(Style::Bold),
            self.span.source_file().full_path().display(),
            start.line,
            start.column
        )?;
        writeln!(f, "{:width$} {gutter}", "")?;

        let source_file = self.span.source_file();
        let line_start = source_file.line_start(start.line).unwrap_or_default();
        let line = source_file
            .get_line(start.line)
            .unwrap_or_default()
            .trim_end_matches(['\n', '\r']);

        // the highlighted part stops at the end of the first line
        let from = self.span.start() - line_start;
        let to = (self.span.end() - line_start)
            .min(line.len())
            .max(from + 1);

        write!(
            f,
            "{} {gutter} ",
            Color::Cyan.paint(start.line).with_style(Style::Bold)
        )?;

        let mut underline = String::new();
        for (index, char) in line.char_indices() {
            let highlighted = (from..to).contains(&index);
            let fill = if highlighted { '^' } else { ' ' };

            // if the char is tab, print 4 spaces
            if char == '\t' {
                f.write_str("    ")?;
                underline.extend(std::iter::repeat(fill).take(4));
                continue;
            }

            if highlighted {
                write!(f, "{}", Color::Red.paint(char).with_style(Style::Underline))?;
            } else {
                write!(f, "{char}")?;
            }
            underline.push(fill);
        }
        writeln!(f)?;

        // the span starts at the end of the line, e.g. an unexpected end of file
        if from >= line.len() {
            underline.push('^');
        }

        let underline = underline.trim_end();
        write!(f, "{:width$} {gutter} {}", "", Color::Red.paint(underline))?;

        if let Some(help) = &self.help_display {
            write!(f, " {}: {help}", Style::Bold.paint("help"))?;
        }

        writeln!(f)
    }
}
