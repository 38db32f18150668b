//! Contains the [`Lexer`], the scanner that turns the text of a source file into [`Token`]s and
//! harvests its [`Comment`]s.
//!
//! Scanning is driven by an explicit stack of modes instead of recursion. A double-quoted string
//! or heredoc whose body contains `{` pushes an interpolation mode that balances braces, and a
//! `<name` pushes a markup mode that collects the tokens of one element. Tokens are routed to the
//! top of the stack; only when the stack is empty does [`Lexer::next`] hand them out.

use std::{collections::VecDeque, sync::Arc};

use getset::Getters;
use hhlint_base::source_file::{ByteIndex, SourceFile, Span};

use self::{
    literal::Literal,
    markup::{Markup, Progress},
};
use crate::{
    comment::{Comment, CommentKind},
    error::{Error, UnknownToken, UnterminatedComment},
    token::{KeywordKind, Token, TokenKind},
};

mod literal;
mod markup;
mod pattern;

#[derive(Debug)]
enum Mode {
    /// The body of a double-quoted string or heredoc.
    Literal(Literal),

    /// Balancing the braces of an interpolation region; `text` joins the tokens scanned so far.
    Interpolation { text: String, depth: usize },

    /// Collecting the tokens of a markup element.
    Markup(Markup),
}

#[derive(Debug)]
enum Scanned {
    Token(Token),
    Skipped,
    Enter(Mode),
    End,
}

/// Scans one source file into tokens.
///
/// The lexer is exhausted by calling [`Lexer::next`] until it returns `Ok(None)`. Every error is
/// fatal: the lexer must not be used after [`Lexer::next`] fails.
#[derive(Debug, Getters)]
pub struct Lexer {
    /// Gets the source file being scanned.
    #[get = "pub"]
    source_file: Arc<SourceFile>,

    cursor: ByteIndex,
    line: usize,
    modes: Vec<Mode>,
    pending: VecDeque<Token>,
    comments: Vec<Comment>,
}

impl Lexer {
    /// Creates a lexer positioned at the start of the given source file.
    #[must_use]
    pub fn new(source_file: &Arc<SourceFile>) -> Self {
        Self {
            source_file: source_file.clone(),
            cursor: 0,
            line: 0,
            modes: Vec::new(),
            pending: VecDeque::new(),
            comments: Vec::new(),
        }
    }

    /// Gets the comments harvested so far, in the order they were scanned.
    #[must_use]
    pub fn comments(&self) -> &[Comment] { &self.comments }

    /// Consumes the lexer and returns the harvested comments.
    #[must_use]
    pub fn into_comments(self) -> Vec<Comment> { self.comments }

    /// Scans the next token.
    ///
    /// Returns `Ok(None)` once the end of the input is reached.
    ///
    /// # Errors
    /// Returns the lexical [`Error`] at the cursor, e.g. an unknown character or a string that is
    /// never closed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Token>, Error> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let scanned = match self.modes.last() {
                Some(Mode::Literal(..)) => self.scan_literal()?,
                Some(Mode::Interpolation { .. }) => self.scan(false)?,
                Some(Mode::Markup(..)) | None => self.scan(true)?,
            };

            match scanned {
                Scanned::Token(token) => {
                    if let Some(token) = self.deliver(token)? {
                        return Ok(Some(token));
                    }
                }
                Scanned::Skipped => {}
                Scanned::Enter(mode) => self.modes.push(mode),
                Scanned::End => return self.finish(),
            }
        }
    }

    fn span(&self, start: ByteIndex, end: ByteIndex) -> Span {
        Span::new(self.source_file.clone(), start, end).unwrap()
    }

    fn token(&mut self, kind: TokenKind, length: usize) -> Token {
        let start = self.cursor;
        self.cursor += length;

        Token {
            kind,
            span: self.span(start, self.cursor),
            line: self.line,
            literal: None,
        }
    }

    /// Routes a scanned token to the mode on top of the stack.
    ///
    /// Returns the token back only if no mode is active.
    fn deliver(&mut self, token: Token) -> Result<Option<Token>, Error> {
        match self.modes.last_mut() {
            None => return Ok(Some(token)),

            Some(Mode::Interpolation { text, depth }) => {
                text.push_str(token.span.str());

                match token.kind {
                    TokenKind::LeftBrace => *depth += 1,
                    TokenKind::RightBrace if *depth == 0 => {
                        let Some(Mode::Interpolation { text, .. }) = self.modes.pop() else {
                            unreachable!("the top of the mode stack has just been matched")
                        };

                        match self.modes.last_mut() {
                            Some(Mode::Literal(literal)) => literal.append(&text),
                            _ => unreachable!("an interpolation always sits on a literal"),
                        }
                    }
                    TokenKind::RightBrace => *depth -= 1,
                    _ => {}
                }
            }

            Some(Mode::Markup(..)) => {
                let Some(Mode::Markup(mut markup)) = self.modes.pop() else {
                    unreachable!("the top of the mode stack has just been matched")
                };

                match markup.push(token, self) {
                    Progress::Pending => self.modes.push(Mode::Markup(markup)),
                    Progress::Comment(open) => {
                        markup.push_comment(self.scan_markup_comment(&open)?);
                        self.modes.push(Mode::Markup(markup));
                    }
                    Progress::Complete => self.hand_back(markup),
                }
            }

            Some(Mode::Literal(..)) => unreachable!("a literal never receives tokens"),
        }

        Ok(None)
    }

    /// Hands the tokens of a markup element to the enclosing element, or queues them for output.
    fn hand_back(&mut self, markup: Markup) {
        let tokens = markup.into_tokens();

        match self.modes.last_mut() {
            Some(Mode::Markup(parent)) => parent.extend(tokens),
            _ => self.pending.extend(tokens),
        }
    }

    /// Unwinds the mode stack at the end of the input.
    ///
    /// Unfinished markup elements are given back as they are, while an unfinished literal is an
    /// error.
    fn finish(&mut self) -> Result<Option<Token>, Error> {
        while let Some(mode) = self.modes.pop() {
            match mode {
                Mode::Literal(literal) => return Err(literal.unterminated(self)),
                Mode::Interpolation { .. } => {}
                Mode::Markup(markup) => self.hand_back(markup),
            }
        }

        Ok(self.pending.pop_front())
    }

    /// Scans at the cursor outside of literal bodies.
    fn scan(&mut self, markup_allowed: bool) -> Result<Scanned, Error> {
        let source_file = self.source_file.clone();
        let rest = &source_file.content()[self.cursor..];

        let Some(first) = rest.bytes().next() else {
            return Ok(Scanned::End);
        };

        if pattern::is_whitespace(first) {
            self.cursor += pattern::whitespace(rest);
            return Ok(Scanned::Skipped);
        }

        if first == b'\n' {
            self.cursor += 1;
            self.line += 1;
            return Ok(Scanned::Skipped);
        }

        if let Some((kind, length)) = pattern::suppression_marker(rest) {
            return self.scan_suppression_marker(kind, length).map(Scanned::Token);
        }

        if rest.starts_with("/*") {
            let start = self.cursor;
            self.cursor += 2;
            self.record_block_comment(start, start)?;
            return Ok(Scanned::Skipped);
        }

        if rest.starts_with("//") || first == b'#' {
            let start = self.cursor;
            self.cursor += if first == b'#' { 1 } else { 2 };
            self.record_line_comment(start);
            return Ok(Scanned::Skipped);
        }

        match first {
            b'"' => return Ok(self.open_double_quoted()),
            b'\'' => return self.scan_single_quoted().map(Scanned::Token),
            _ => {}
        }

        if rest.starts_with("<<<") {
            return self.scan_doc_string();
        }

        if let Some((kind, length)) = pattern::number(rest) {
            return Ok(Scanned::Token(self.token(kind, length)));
        }

        if let Some(length) = pattern::word(rest) {
            let kind = rest[..length]
                .parse::<KeywordKind>()
                .map_or(TokenKind::Word, TokenKind::Keyword);

            return Ok(Scanned::Token(self.token(kind, length)));
        }

        if first == b'$' {
            let (kind, length) = pattern::variable(rest)
                .map_or((TokenKind::Dollar, 1), |length| (TokenKind::Lvar, length));

            return Ok(Scanned::Token(self.token(kind, length)));
        }

        if markup_allowed {
            if let Some(length) = pattern::markup_name(rest) {
                let name = self.token(TokenKind::XhpName, length);
                return Ok(Scanned::Enter(Mode::Markup(Markup::new(name))));
            }
        }

        if let Some((kind, length)) = pattern::punctuation(rest) {
            return Ok(Scanned::Token(self.token(kind, length)));
        }

        let length = rest.chars().next().map_or(1, char::len_utf8);

        Err(UnknownToken {
            span: self.span(self.cursor, self.cursor + length),
            line: self.line,
        }
        .into())
    }

    /// Scans a suppression marker and records the rest of its comment.
    fn scan_suppression_marker(&mut self, kind: TokenKind, length: usize) -> Result<Token, Error> {
        let start = self.cursor;
        let marker = self.token(kind, length);

        match kind {
            TokenKind::FixmeExpr => self.record_block_comment(self.cursor, start)?,
            _ => self.record_line_comment(self.cursor),
        }

        Ok(marker)
    }

    /// Records a line comment starting at `from`; the cursor is past its delimiter.
    fn record_line_comment(&mut self, from: ByteIndex) {
        let text = self.source_file.content();

        let end = match text[self.cursor..].find('\n') {
            Some(line_end) => {
                self.line += 1;
                self.cursor + line_end + 1
            }
            None => text.len(),
        };

        self.cursor = end;

        let span = self.span(from, end);
        self.comments.push(Comment {
            span,
            kind: CommentKind::Line,
        });
    }

    /// Records a block comment starting at `from`; the cursor is past its delimiter, which is
    /// the `/*` at `open`.
    fn record_block_comment(&mut self, from: ByteIndex, open: ByteIndex) -> Result<(), Error> {
        let source_file = self.source_file.clone();
        let text = source_file.content();
        let rest = &text[self.cursor..];

        let Some(length) = rest.find("*/") else {
            self.line += pattern::newlines(rest);
            self.cursor = text.len();

            return Err(UnterminatedComment {
                span: self.span(open, open + 2),
                line: self.line,
            }
            .into());
        };

        let end = self.cursor + length + 2;
        self.line += pattern::newlines(&text[self.cursor..end]);
        self.cursor = end;

        let span = self.span(from, end);
        self.comments.push(Comment {
            span,
            kind: CommentKind::Block,
        });

        Ok(())
    }
}
