//! The token-dump front end of the linter: scans one file and prints its tokens and comments.

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

use std::{fmt::Display, fs::File, path::PathBuf, process::ExitCode};

pub use clap::Parser;
use hhlint_base::{
    diagnostic::Handler,
    log::{Message, Severity},
    source_file::SourceFile,
};
use hhlint_lexical::{comment::Comment, token::Token, token_stream::TokenStream};

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "hhlint",
    about = "Dumps the tokens of a Hack/PHP source file.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The source file to scan.
    pub file: PathBuf,

    /// Also prints the comments harvested from the file.
    #[clap(long = "comments")]
    pub comments: bool,

    /// Prints the byte range of every token and comment.
    #[clap(long = "offsets")]
    pub offsets: bool,
}

/// A struct that implements [`Handler`] but prints all the message to the standard error stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
struct Printer;

impl<E: Display> Handler<E> for Printer {
    fn receive(&self, error: E) { eprintln!("{error}"); }
}

fn report(argument: &Argument, error: impl Display) -> ExitCode {
    let message = Message::new(
        Severity::Error,
        format!("{}: {error}", argument.file.display()),
    );

    eprintln!("{message}");
    ExitCode::FAILURE
}

fn token_line(token: &Token, offsets: bool) -> String {
    let mut line = format!("{}\t{}\t{:?}", token.line, token.kind.name(), token.text());

    if offsets {
        line.push_str(&format!("\t{}..{}", token.start(), token.end()));
    }

    line
}

fn comment_line(comment: &Comment, offsets: bool) -> String {
    let mut line = format!("{:?}\t{:?}", comment.kind, comment.text());

    if offsets {
        line.push_str(&format!("\t{}..{}", comment.start(), comment.end()));
    }

    line
}

/// Runs the program with the given arguments.
///
/// Prints one line per token: its 0-based line, its kind name, and its text.
#[must_use]
pub fn run(argument: &Argument) -> ExitCode {
    let file = match File::open(&argument.file) {
        Ok(file) => file,
        Err(error) => return report(argument, error),
    };

    let source_file = match SourceFile::load(file, argument.file.clone()) {
        Ok(source_file) => source_file,
        Err(error) => return report(argument, error),
    };

    let Some(token_stream) = TokenStream::tokenize(&source_file, &Printer) else {
        return ExitCode::FAILURE;
    };

    for token in token_stream.iter() {
        println!("{}", token_line(token, argument.offsets));
    }

    if argument.comments {
        for comment in token_stream.comments() {
            println!("{}", comment_line(comment, argument.offsets));
        }
    }

    ExitCode::SUCCESS
}
