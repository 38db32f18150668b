//! Sub-lexers for quoted strings and doc strings.

use hhlint_base::source_file::ByteIndex;

use super::{pattern, Lexer, Mode, Scanned};
use crate::{
    error::{
        DocString, Error, InvalidDocStringSyntax, Quote, UnterminatedDocString, UnterminatedString,
    },
    token::{Token, TokenKind},
};

/// A string literal whose body may contain interpolation regions, kept on the mode stack while
/// its body is being scanned.
#[derive(Debug)]
pub(super) struct Literal {
    start: ByteIndex,
    line: usize,
    value: String,
    form: Form,
}

#[derive(Debug)]
enum Form {
    DoubleQuoted,
    Heredoc {
        label: String,
        header_end: ByteIndex,
        at_line_start: bool,
    },
}

enum Body {
    Closed,
    Interpolation,
    EndOfInput,
}

impl Literal {
    /// Appends the text of a balanced interpolation region: its tokens joined without the
    /// whitespace and comments between them.
    pub(super) fn append(&mut self, text: &str) { self.value.push_str(text); }

    /// Builds the error reported when the input ends inside this literal.
    pub(super) fn unterminated(&self, lexer: &Lexer) -> Error {
        match &self.form {
            Form::DoubleQuoted => UnterminatedString {
                span: lexer.span(self.start, self.start + 1),
                line: lexer.line,
                quote: Quote::Double,
            }
            .into(),
            Form::Heredoc { header_end, .. } => UnterminatedDocString {
                span: lexer.span(self.start, *header_end),
                line: lexer.line,
                doc_string: DocString::Heredoc,
            }
            .into(),
        }
    }
}

impl Lexer {
    /// Continues scanning the body of the literal on top of the mode stack.
    pub(super) fn scan_literal(&mut self) -> Result<Scanned, Error> {
        let Some(Mode::Literal(mut literal)) = self.modes.pop() else {
            unreachable!("the top of the mode stack must be a literal")
        };

        let body = match &mut literal.form {
            Form::DoubleQuoted => self.scan_double_quoted_body(&mut literal.value),
            Form::Heredoc {
                label,
                at_line_start,
                ..
            } => self.scan_heredoc_body(&mut literal.value, label, at_line_start),
        };

        match body {
            Body::Closed => Ok(Scanned::Token(Token {
                kind: match literal.form {
                    Form::DoubleQuoted => TokenKind::DoubleQuotedString,
                    Form::Heredoc { .. } => TokenKind::Heredoc,
                },
                span: self.span(literal.start, self.cursor),
                line: literal.line,
                literal: Some(literal.value),
            })),
            Body::Interpolation => {
                self.modes.push(Mode::Literal(literal));
                Ok(Scanned::Enter(Mode::Interpolation {
                    text: String::from("{"),
                    depth: 0,
                }))
            }
            Body::EndOfInput => Err(literal.unterminated(self)),
        }
    }

    /// Consumes a backslash and the character it escapes, returning the escaped character.
    fn take_escape(&mut self, text: &str) -> Option<char> {
        let escaped = text[self.cursor + 1..].chars().next();
        self.cursor += 1 + escaped.map_or(0, char::len_utf8);

        if escaped == Some('\n') {
            self.line += 1;
        }

        escaped
    }

    fn scan_double_quoted_body(&mut self, value: &mut String) -> Body {
        let source_file = self.source_file.clone();
        let text = source_file.content();

        loop {
            let Some(character) = text[self.cursor..].chars().next() else {
                return Body::EndOfInput;
            };

            match character {
                '"' => {
                    self.cursor += 1;
                    return Body::Closed;
                }
                '{' => {
                    self.cursor += 1;
                    return Body::Interpolation;
                }
                '\\' => {
                    let Some(escaped) = self.take_escape(text) else {
                        return Body::EndOfInput;
                    };

                    if let Some(translated) = pattern::escape(escaped) {
                        value.push(translated);
                    } else {
                        value.push('\\');
                        value.push(escaped);
                    }
                }
                character => {
                    if character == '\n' {
                        self.line += 1;
                    }

                    self.cursor += character.len_utf8();
                    value.push(character);
                }
            }
        }
    }

    fn scan_heredoc_body(
        &mut self,
        value: &mut String,
        label: &str,
        at_line_start: &mut bool,
    ) -> Body {
        let source_file = self.source_file.clone();
        let text = source_file.content();

        loop {
            if *at_line_start && pattern::is_terminator(&text[self.cursor..], label) {
                self.cursor += label.len();
                return Body::Closed;
            }

            *at_line_start = false;

            let Some(character) = text[self.cursor..].chars().next() else {
                return Body::EndOfInput;
            };

            match character {
                '{' => {
                    self.cursor += 1;
                    return Body::Interpolation;
                }
                '\\' => {
                    let Some(escaped) = self.take_escape(text) else {
                        return Body::EndOfInput;
                    };

                    value.push('\\');
                    value.push(escaped);
                }
                character => {
                    if character == '\n' {
                        self.line += 1;
                        *at_line_start = true;
                    }

                    self.cursor += character.len_utf8();
                    value.push(character);
                }
            }
        }
    }

    /// Scans a single-quoted string; the cursor is at the opening quote.
    pub(super) fn scan_single_quoted(&mut self) -> Result<Token, Error> {
        let source_file = self.source_file.clone();
        let text = source_file.content();
        let bytes = text.as_bytes();

        let start = self.cursor;
        let line = self.line;
        let mut value = String::new();

        self.cursor += 1;
        let mut segment = self.cursor;

        loop {
            match bytes.get(self.cursor) {
                None => {
                    return Err(UnterminatedString {
                        span: self.span(start, start + 1),
                        line: self.line,
                        quote: Quote::Single,
                    }
                    .into())
                }
                Some(b'\'') => {
                    value.push_str(&text[segment..self.cursor]);
                    self.cursor += 1;
                    break;
                }
                Some(b'\\') if matches!(bytes.get(self.cursor + 1), Some(b'\'' | b'\\')) => {
                    value.push_str(&text[segment..self.cursor]);
                    value.push(char::from(bytes[self.cursor + 1]));
                    self.cursor += 2;
                    segment = self.cursor;
                }
                Some(byte) => {
                    if *byte == b'\n' {
                        self.line += 1;
                    }
                    self.cursor += 1;
                }
            }
        }

        Ok(Token {
            kind: TokenKind::QuotedString,
            span: self.span(start, self.cursor),
            line,
            literal: Some(value),
        })
    }

    /// Scans a doc string header; the cursor is at `<<<`.
    ///
    /// A nowdoc is scanned to its end at once, while a heredoc enters a literal mode so that its
    /// interpolation regions can be balanced.
    pub(super) fn scan_doc_string(&mut self) -> Result<Scanned, Error> {
        let source_file = self.source_file.clone();
        let text = source_file.content();

        let start = self.cursor;
        let line = self.line;
        let invalid = |lexer: &Self| -> Error {
            InvalidDocStringSyntax {
                span: lexer.span(start, start + 3),
                line: lexer.line,
            }
            .into()
        };

        let mut position = start + 3;
        let is_nowdoc = text[position..].starts_with('\'');
        if is_nowdoc {
            position += 1;
        }

        let Some(label_length) = pattern::doc_string_label(&text[position..]) else {
            return Err(invalid(self));
        };
        let label = &text[position..position + label_length];
        position += label_length;

        if is_nowdoc {
            if !text[position..].starts_with('\'') {
                return Err(invalid(self));
            }
            position += 1;
        }

        let header_end = position;
        let header = &text[header_end..];
        let line_break = if header.starts_with('\n') {
            1
        } else if header.starts_with("\r\n") {
            2
        } else {
            return Err(invalid(self));
        };

        self.cursor = header_end + line_break;
        self.line += 1;

        if !is_nowdoc {
            return Ok(Scanned::Enter(Mode::Literal(Literal {
                start,
                line,
                value: String::new(),
                form: Form::Heredoc {
                    label: label.to_owned(),
                    header_end,
                    at_line_start: true,
                },
            })));
        }

        let body_start = self.cursor;
        while !pattern::is_terminator(&text[self.cursor..], label) {
            let Some(line_end) = text[self.cursor..].find('\n') else {
                self.cursor = text.len();
                return Err(UnterminatedDocString {
                    span: self.span(start, header_end),
                    line: self.line,
                    doc_string: DocString::Nowdoc,
                }
                .into());
            };

            self.cursor += line_end + 1;
            self.line += 1;
        }

        let body = text[body_start..self.cursor].to_owned();
        self.cursor += label.len();

        Ok(Scanned::Token(Token {
            kind: TokenKind::Nowdoc,
            span: self.span(start, self.cursor),
            line,
            literal: Some(body),
        }))
    }

    /// Opens a double-quoted string; the cursor is at the opening quote.
    pub(super) fn open_double_quoted(&mut self) -> Scanned {
        let start = self.cursor;
        self.cursor += 1;

        Scanned::Enter(Mode::Literal(Literal {
            start,
            line: self.line,
            value: String::new(),
            form: Form::DoubleQuoted,
        }))
    }
}
