//! This crate implements the lexical front end of the linter. It turns the text of a Hack/PHP
//! source file into a stream of typed tokens and a separate list of harvested comments.
//!
//! The [`lexer::Lexer`] hands out one token at a time; [`token_stream::TokenStream`] drains a
//! lexer and reports its error, if any, to a diagnostic handler.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod comment;
pub mod error;
pub mod lexer;
pub mod token;
pub mod token_stream;
