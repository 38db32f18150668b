//! Contains the [`Comment`] records harvested by the lexer.
//!
//! Comments never appear in the token stream; they are collected separately so that lint rules
//! can look them up by offset after lexing.

use hhlint_base::source_file::{ByteIndex, Span};

/// Is an enumeration representing the two kinds of comments in Hack/PHP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommentKind {
    /// A comment that starts with `//` or `#` and ends at the end of the line.
    Line,

    /// A comment that starts with `/*` and ends with `*/`.
    Block,
}

/// Represents a portion of the source code that is ignored by the token stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Comment {
    /// Is the span that makes up the comment.
    ///
    /// A line comment's span includes the line feed that terminates it, if any.
    pub span: Span,

    /// Is the kind of comment.
    pub kind: CommentKind,
}

impl Comment {
    /// Gets the text of the comment including its delimiters, without the terminating line feed
    /// of a line comment.
    #[must_use]
    pub fn text(&self) -> &str {
        match self.kind {
            CommentKind::Line => self.span.str().strip_suffix('\n').unwrap_or(self.span.str()),
            CommentKind::Block => self.span.str(),
        }
    }

    /// Gets the byte index of the comment's first character.
    #[must_use]
    pub fn start(&self) -> ByteIndex { self.span.start() }

    /// Gets the byte index right after the comment.
    #[must_use]
    pub fn end(&self) -> ByteIndex { self.span.end() }
}
