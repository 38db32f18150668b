//! Contains the [`TokenStream`] struct, the drained output of a [`Lexer`].

use std::sync::Arc;

use derive_more::Deref;
use hhlint_base::{diagnostic::Handler, source_file::SourceFile};

use crate::{comment::Comment, error, lexer::Lexer, token::Token};

/// Is the list of all tokens of a source file together with its comments.
///
/// This struct is the final output of the lexical analysis phase and is meant to be consumed by
/// the lint rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
    comments: Vec<Comment>,
}

impl TokenStream {
    /// Tokenizes the given source file.
    ///
    /// This function calls [`Lexer::next`] repeatedly until the end of the input is reached.
    ///
    /// # Returns
    /// The stream of tokens, or [`None`] if a lexical error occurred. The error is reported to
    /// the given handler; no partial stream is produced.
    #[must_use]
    pub fn tokenize(
        source_file: &Arc<SourceFile>,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Self> {
        let mut lexer = Lexer::new(source_file);
        let mut tokens = Vec::new();

        loop {
            match lexer.next() {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) => break,
                Err(error) => {
                    handler.receive(error);
                    return None;
                }
            }
        }

        Some(Self {
            tokens,
            comments: lexer.into_comments(),
        })
    }

    /// Gets the comments of the source file in the order they appear.
    #[must_use]
    pub fn comments(&self) -> &[Comment] { &self.comments }

    /// Dissolves this struct into a tuple of its components.
    #[must_use]
    pub fn dissolve(self) -> (Vec<Token>, Vec<Comment>) { (self.tokens, self.comments) }
}
