//! Retokenization of embedded markup elements such as `<div class="x">text</div>`.
//!
//! A markup element is collected as a run of ordinary tokens while its frame sits on the mode
//! stack. Markup comments and closing tags are reshaped into dedicated tokens; once the element
//! is complete, the whole run is handed back to the enclosing level in offset order.

use super::{pattern, Lexer};
use crate::{
    error::{Error, UnterminatedComment},
    token::{Token, TokenKind},
};

#[derive(Debug)]
enum Phase {
    /// Collecting the element name and attributes up to the first `>`.
    OpeningTag,

    /// Collecting the children until a closing tag starts.
    Children,

    /// Collecting the name of the closing tag up to its `>`.
    ClosingTag {
        open: Token,
        slash: Token,
        name: Vec<Token>,
    },

    /// The closing tag has been turned into its token.
    Closed,
}

/// The outcome of handing a token to a [`Markup`] frame.
#[derive(Debug)]
pub(super) enum Progress {
    Pending,

    /// A `<!--` opener has been removed; the carried token is its `<`.
    Comment(Token),

    Complete,
}

/// One markup element under construction.
#[derive(Debug)]
pub(super) struct Markup {
    tokens: Vec<Token>,
    phase: Phase,
}

impl Markup {
    pub(super) fn new(name: Token) -> Self {
        Self {
            tokens: vec![name],
            phase: Phase::OpeningTag,
        }
    }

    fn last_kinds(&self) -> (Option<TokenKind>, Option<TokenKind>) {
        let mut kinds = self.tokens.iter().rev().map(|token| token.kind);
        let last = kinds.next();
        (kinds.next(), last)
    }

    /// Hands a freshly scanned token to the element.
    pub(super) fn push(&mut self, token: Token, lexer: &Lexer) -> Progress {
        match &mut self.phase {
            Phase::OpeningTag => {
                let is_end = token.kind == TokenKind::Gt;
                self.tokens.push(token);

                if !is_end {
                    return Progress::Pending;
                }

                if self.last_kinds().0 == Some(TokenKind::Slash) {
                    return Progress::Complete;
                }

                self.phase = Phase::Children;
                Progress::Pending
            }

            Phase::Children => match (self.last_kinds(), token.kind) {
                ((_, Some(TokenKind::Lt)), TokenKind::Slash) => {
                    let Some(open) = self.tokens.pop() else {
                        unreachable!("the `<` has just been matched")
                    };

                    self.phase = Phase::ClosingTag {
                        open,
                        slash: token,
                        name: Vec::new(),
                    };
                    Progress::Pending
                }
                ((Some(TokenKind::Lt), Some(TokenKind::Bang)), TokenKind::Decrement) => {
                    self.tokens.pop();
                    let Some(open) = self.tokens.pop() else {
                        unreachable!("the `<` has just been matched")
                    };

                    Progress::Comment(open)
                }
                _ => {
                    self.tokens.push(token);
                    Progress::Pending
                }
            },

            Phase::ClosingTag { name, .. } if token.kind != TokenKind::Gt => {
                name.push(token);
                Progress::Pending
            }

            Phase::ClosingTag { .. } => {
                let Phase::ClosingTag { open, name, .. } =
                    std::mem::replace(&mut self.phase, Phase::Closed)
                else {
                    unreachable!("the closing tag phase has just been matched")
                };

                let closing = Token {
                    kind: TokenKind::XhpClosing,
                    span: lexer.span(open.start(), token.end()),
                    line: open.line,
                    literal: Some(name.iter().map(|token| token.span.str()).collect()),
                };

                self.tokens.push(closing);
                Progress::Complete
            }

            Phase::Closed => unreachable!("a closed element receives no tokens"),
        }
    }

    pub(super) fn push_comment(&mut self, comment: Token) { self.tokens.push(comment); }

    /// Appends tokens that bypass the phase tracking, such as a completed nested element.
    pub(super) fn extend(&mut self, tokens: Vec<Token>) {
        match &mut self.phase {
            Phase::ClosingTag { name, .. } => name.extend(tokens),
            _ => self.tokens.extend(tokens),
        }
    }

    /// Dissolves the element into its tokens in offset order.
    ///
    /// A closing tag still unfinished at the end of the input is given back as the plain tokens
    /// it was made of.
    pub(super) fn into_tokens(self) -> Vec<Token> {
        let mut tokens = self.tokens;

        if let Phase::ClosingTag { open, slash, name } = self.phase {
            tokens.push(open);
            tokens.push(slash);
            tokens.extend(name);
        }

        tokens
    }
}

impl Lexer {
    /// Scans the raw body of a markup comment; the cursor is right after `<!--`.
    pub(super) fn scan_markup_comment(&mut self, open: &Token) -> Result<Token, Error> {
        let source_file = self.source_file.clone();
        let text = source_file.content();
        let rest = &text[self.cursor..];

        let Some(length) = rest.find("-->") else {
            let opener_end = self.cursor;
            self.line += pattern::newlines(rest);
            self.cursor = text.len();

            return Err(UnterminatedComment {
                span: self.span(open.start(), opener_end),
                line: self.line,
            }
            .into());
        };

        let body = &rest[..length];
        self.line += pattern::newlines(body);
        self.cursor += length + 3;

        Ok(Token {
            kind: TokenKind::XhpComment,
            span: self.span(open.start(), self.cursor),
            line: open.line,
            literal: Some(body.to_owned()),
        })
    }
}
