//! Contains all kinds of lexical errors that can occur while tokenizing the source code.
//!
//! Every lexical error is fatal for the file being scanned. Each one carries the line (counted
//! from 0) at which scanning failed and the span of the construct that could not be scanned.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use hhlint_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

fn render(
    f: &mut std::fmt::Formatter<'_>,
    message: &str,
    span: &Span,
    help: Option<&str>,
) -> std::fmt::Result {
    write!(
        f,
        "{}\n{}",
        Message::new(Severity::Error, message),
        SourceCodeDisplay::new(span, help)
    )
}

/// No token can be scanned at the cursor, e.g. a stray non-ASCII character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnknownToken {
    /// The span of the character that starts no token.
    pub span: Span,

    /// The line at which scanning failed.
    pub line: usize,
}

impl Display for UnknownToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, "unknown token encountered", &self.span, None)
    }
}

/// The source code contains a `/*` comment or a `<!--` markup comment that is never closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedComment {
    /// The span of the delimiter that opens the comment.
    pub span: Span,

    /// The line at which the end of the input was reached.
    pub line: usize,
}

impl Display for UnterminatedComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(
            f,
            "unterminated comment",
            &self.span,
            Some("this comment is never closed"),
        )
    }
}

/// Is an enumeration of the two quoted string forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Quote {
    Single,
    Double,
}

/// The source code contains a quoted string whose closing quote is never found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedString {
    /// The span of the opening quote.
    pub span: Span,

    /// The line at which the end of the input was reached.
    pub line: usize,

    /// The kind of quote that opened the string.
    pub quote: Quote,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(
            f,
            match self.quote {
                Quote::Single => "unterminated string",
                Quote::Double => "unterminated double-quoted string",
            },
            &self.span,
            Some("this quote is never closed"),
        )
    }
}

/// Is an enumeration of the two identifier-terminated string forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum DocString {
    Heredoc,
    Nowdoc,
}

/// The source code contains a heredoc/nowdoc whose terminator line is never found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedDocString {
    /// The span of the `<<<` marker and the identifier.
    pub span: Span,

    /// The line at which the end of the input was reached.
    pub line: usize,

    /// Whether a heredoc or a nowdoc was being scanned.
    pub doc_string: DocString,
}

impl Display for UnterminatedDocString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(
            f,
            match self.doc_string {
                DocString::Heredoc => "unterminated heredoc",
                DocString::Nowdoc => "unterminated nowdoc",
            },
            &self.span,
            Some("no line starts with this identifier"),
        )
    }
}

/// The `<<<` marker is not followed by a valid identifier line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidDocStringSyntax {
    /// The span of the `<<<` marker.
    pub span: Span,

    /// The line of the marker.
    pub line: usize,
}

impl Display for InvalidDocStringSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(
            f,
            "invalid doc string syntax",
            &self.span,
            Some("expected an identifier matching `[A-Z][A-Z0-9_]+` followed by a new line"),
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnknownToken(UnknownToken),
    UnterminatedComment(UnterminatedComment),
    UnterminatedString(UnterminatedString),
    UnterminatedDocString(UnterminatedDocString),
    InvalidDocStringSyntax(InvalidDocStringSyntax),
}

impl Error {
    /// Gets the line (counted from 0) at which scanning failed.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownToken(err) => err.line,
            Self::UnterminatedComment(err) => err.line,
            Self::UnterminatedString(err) => err.line,
            Self::UnterminatedDocString(err) => err.line,
            Self::InvalidDocStringSyntax(err) => err.line,
        }
    }

    /// Gets the span of the construct that could not be scanned.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnknownToken(err) => &err.span,
            Self::UnterminatedComment(err) => &err.span,
            Self::UnterminatedString(err) => &err.span,
            Self::UnterminatedDocString(err) => &err.span,
            Self::InvalidDocStringSyntax(err) => &err.span,
        }
    }

    /// Gets the plain, uncolored diagnostic message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownToken(..) => "unknown token encountered",
            Self::UnterminatedComment(..) => "unterminated comment",
            Self::UnterminatedString(err) => match err.quote {
                Quote::Single => "unterminated string",
                Quote::Double => "unterminated double-quoted string",
            },
            Self::UnterminatedDocString(err) => match err.doc_string {
                DocString::Heredoc => "unterminated heredoc",
                DocString::Nowdoc => "unterminated nowdoc",
            },
            Self::InvalidDocStringSyntax(..) => "invalid doc string syntax",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownToken(err) => write!(f, "{err}"),
            Self::UnterminatedComment(err) => write!(f, "{err}"),
            Self::UnterminatedString(err) => write!(f, "{err}"),
            Self::UnterminatedDocString(err) => write!(f, "{err}"),
            Self::InvalidDocStringSyntax(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}
