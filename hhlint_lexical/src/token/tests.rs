use std::{
    collections::HashSet,
    fmt::{Display, Write},
    str::FromStr,
};

use hhlint_base::source_file::SourceFile;
use hhlint_test::input::Input;
use lazy_static::lazy_static;
use proptest::{
    prelude::Arbitrary,
    prop_assert_eq, prop_assume, prop_oneof, proptest,
    strategy::{BoxedStrategy, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};
use strum::IntoEnumIterator;

use super::{KeywordKind, TokenKind};
use crate::lexer::Lexer;

/// Every fixed lexeme and the kind it scans to.
pub const LEXEMES: &[(&str, TokenKind)] = &[
    ("@required", TokenKind::Required),
    ("<?php", TokenKind::Php),
    ("<?hh", TokenKind::Hh),
    ("?>", TokenKind::ClosePhp),
    ("(", TokenKind::LeftParenthesis),
    (")", TokenKind::RightParenthesis),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    ("::", TokenKind::ColonColon),
    ("=", TokenKind::Eq),
    ("==", TokenKind::EqEq),
    ("===", TokenKind::EqEqEq),
    ("!=", TokenKind::BangEq),
    ("!==", TokenKind::BangEqEq),
    ("|=", TokenKind::BarEq),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    (".=", TokenKind::DotEq),
    ("%=", TokenKind::PercentEq),
    ("^=", TokenKind::CaretEq),
    ("&=", TokenKind::AmpEq),
    ("<<=", TokenKind::ShiftLeftEq),
    (">>=", TokenKind::ShiftRightEq),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("^", TokenKind::Caret),
    ("&", TokenKind::Amp),
    ("|", TokenKind::Bar),
    ("~", TokenKind::Tilde),
    ("!", TokenKind::Bang),
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::BarBar),
    ("<<", TokenKind::ShiftLeft),
    (">>", TokenKind::ShiftRight),
    ("++", TokenKind::Increment),
    ("--", TokenKind::Decrement),
    (".", TokenKind::Dot),
    ("...", TokenKind::Ellipsis),
    ("->", TokenKind::Arrow),
    ("?->", TokenKind::NullsafeArrow),
    ("=>", TokenKind::DoubleArrow),
    ("==>", TokenKind::Lambda),
    ("?", TokenKind::Question),
    ("@", TokenKind::At),
    ("`", TokenKind::Backtick),
    ("$", TokenKind::Dollar),
];

/// Represents an input for a [`TokenKind::Word`], possibly namespace-qualified.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word {
    /// The valid word string.
    pub string: String,
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.string) }
}

impl Arbitrary for Word {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "\\\\?[A-Za-z_][A-Za-z0-9_]*(\\\\[A-Za-z_][A-Za-z0-9_]*){0,2}"
            .prop_filter_map(
                "filter out words that are keywords",
                |x| {
                    if KeywordKind::from_str(&x).is_ok() {
                        None
                    } else {
                        Some(Self { string: x })
                    }
                },
            )
            .boxed()
    }
}

/// Represents a valid keyword input for a [`TokenKind::Keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// The kind of keyword.
    pub keyword: KeywordKind,
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword.as_str())
    }
}

impl Arbitrary for Keyword {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        lazy_static! {
            static ref KEYWORDS: Vec<KeywordKind> = KeywordKind::iter().collect();
        }

        proptest::sample::select(KEYWORDS.as_slice())
            .prop_map(|keyword| Self { keyword })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::Lvar`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    /// The name of the variable without the `$`.
    pub name: String,
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.name)
    }
}

impl Arbitrary for Variable {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[A-Za-z_][A-Za-z0-9_]*"
            .prop_map(|name| Self { name })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::Int`] or a [`TokenKind::Float`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeric {
    /// The valid numeric literal string.
    pub value: String,

    /// Whether the literal is a float.
    pub is_float: bool,
}

impl Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.value) }
}

impl Arbitrary for Numeric {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let integer = prop_oneof![
            proptest::num::u64::ANY.prop_map(|x| x.to_string()),
            "0x[0-9a-fA-F]{1,8}",
            "0b[01]{1,16}",
            "0[0-7]{1,6}",
        ]
        .prop_map(|value| Self {
            value,
            is_float: false,
        });

        let float = prop_oneof![
            "[0-9]{1,4}\\.[0-9]{1,4}",
            "\\.[0-9]{1,4}",
            "[1-9][0-9]{0,3}\\.",
            "[0-9]{1,4}[eE][+-]?[0-9]{1,3}",
            "[0-9]{1,3}\\.[0-9]{0,3}[eE]-?[0-9]{1,2}",
        ]
        .prop_map(|value| Self {
            value,
            is_float: true,
        });

        prop_oneof![integer, float].boxed()
    }
}

/// Represents an input for a [`TokenKind::QuotedString`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SingleQuoted {
    /// The decoded value of the string.
    pub value: String,
}

impl Display for SingleQuoted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('\'')?;

        for character in self.value.chars() {
            if matches!(character, '\'' | '\\') {
                f.write_char('\\')?;
            }
            f.write_char(character)?;
        }

        f.write_char('\'')
    }
}

impl Arbitrary for SingleQuoted {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[a-zA-Z0-9 '\"{}$\\\\\\né]{0,16}"
            .prop_map(|value| Self { value })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::DoubleQuotedString`] without interpolation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoubleQuoted {
    /// The decoded value of the string.
    pub value: String,
}

impl Display for DoubleQuoted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('"')?;

        for character in self.value.chars() {
            match character {
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                '"' | '\\' | '$' => {
                    f.write_char('\\')?;
                    f.write_char(character)?;
                }
                character => f.write_char(character)?,
            }
        }

        f.write_char('"')
    }
}

impl Arbitrary for DoubleQuoted {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[a-zA-Z0-9 '\"$\\\\\\n\\tü]{0,16}"
            .prop_map(|value| Self { value })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::Heredoc`] or a [`TokenKind::Nowdoc`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocString {
    /// The label that opens and terminates the body.
    pub label: String,

    /// The body lines, none of which starts with the label.
    pub lines: Vec<String>,

    /// Whether the label is quoted in the header.
    pub is_nowdoc: bool,
}

impl DocString {
    /// Gets the body text, every line keeping its line break.
    #[must_use]
    pub fn body(&self) -> String { self.lines.iter().map(|line| format!("{line}\n")).collect() }
}

impl Display for DocString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_nowdoc {
            writeln!(f, "<<<'{}'", self.label)?;
        } else {
            writeln!(f, "<<<{}", self.label)?;
        }

        write!(f, "{}{}", self.body(), self.label)
    }
}

impl Arbitrary for DocString {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            "[A-Z][A-Z0-9_]{1,5}",
            proptest::collection::vec("[a-z0-9 ]{0,8}", 0..3),
            proptest::bool::ANY,
        )
            .prop_map(|(label, lines, is_nowdoc)| Self {
                label,
                lines,
                is_nowdoc,
            })
            .boxed()
    }
}

const ACCESSORS: &[&str] = &["", "[0]", "->x", "['k']"];

/// Represents an input for a [`TokenKind::DoubleQuotedString`] holding one `{...}` region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interpolated {
    /// The plain text before the region.
    pub before: String,

    /// The variable read in the region.
    pub variable: Variable,

    /// The element or property access applied to the variable, e.g. `[0]` or `->x`.
    pub accessor: &'static str,

    /// Whether the region pads its tokens with spaces.
    pub is_padded: bool,

    /// The plain text after the region.
    pub after: String,
}

impl Interpolated {
    /// Gets the decoded value: the region keeps the text of its tokens but no whitespace.
    #[must_use]
    pub fn value(&self) -> String {
        format!(
            "{}{{{}{}}}{}",
            self.before, self.variable, self.accessor, self.after
        )
    }
}

impl Display for Interpolated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let padding = if self.is_padded { " " } else { "" };

        write!(
            f,
            "\"{}{{{padding}{}{padding}{}{padding}}}{}\"",
            self.before, self.variable, self.accessor, self.after
        )
    }
}

impl Arbitrary for Interpolated {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            "[a-z0-9 ]{0,6}",
            Variable::arbitrary(),
            proptest::sample::select(ACCESSORS),
            proptest::bool::ANY,
            "[a-z0-9 ]{0,6}",
        )
            .prop_map(|(before, variable, accessor, is_padded, after)| Self {
                before,
                variable,
                accessor,
                is_padded,
                after,
            })
            .boxed()
    }
}

/// Represents an input for a fixed lexeme such as an operator or a language marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// The source text of the lexeme.
    pub lexeme: &'static str,

    /// The kind the lexeme scans to.
    pub kind: TokenKind,
}

impl Display for Punctuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.lexeme) }
}

impl Arbitrary for Punctuation {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::sample::select(LEXEMES)
            .prop_map(|(lexeme, kind)| Self { lexeme, kind })
            .boxed()
    }
}

/// Represents an input for any single [`super::Token`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Token {
    Word(Word),
    Keyword(Keyword),
    Variable(Variable),
    Numeric(Numeric),
    SingleQuoted(SingleQuoted),
    DoubleQuoted(DoubleQuoted),
    DocString(DocString),
    Interpolated(Interpolated),
    Punctuation(Punctuation),
}

impl Arbitrary for Token {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Word::arbitrary().prop_map(Self::Word),
            Keyword::arbitrary().prop_map(Self::Keyword),
            Variable::arbitrary().prop_map(Self::Variable),
            Numeric::arbitrary().prop_map(Self::Numeric),
            SingleQuoted::arbitrary().prop_map(Self::SingleQuoted),
            DoubleQuoted::arbitrary().prop_map(Self::DoubleQuoted),
            DocString::arbitrary().prop_map(Self::DocString),
            Interpolated::arbitrary().prop_map(Self::Interpolated),
            Punctuation::arbitrary().prop_map(Self::Punctuation),
        ]
        .boxed()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word(x) => Display::fmt(x, f),
            Self::Keyword(x) => Display::fmt(x, f),
            Self::Variable(x) => Display::fmt(x, f),
            Self::Numeric(x) => Display::fmt(x, f),
            Self::SingleQuoted(x) => Display::fmt(x, f),
            Self::DoubleQuoted(x) => Display::fmt(x, f),
            Self::DocString(x) => Display::fmt(x, f),
            Self::Interpolated(x) => Display::fmt(x, f),
            Self::Punctuation(x) => Display::fmt(x, f),
        }
    }
}

impl Token {
    /// Gets the kind the input scans to.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Word(..) => TokenKind::Word,
            Self::Keyword(x) => TokenKind::Keyword(x.keyword),
            Self::Variable(..) => TokenKind::Lvar,
            Self::Numeric(x) if x.is_float => TokenKind::Float,
            Self::Numeric(..) => TokenKind::Int,
            Self::SingleQuoted(..) => TokenKind::QuotedString,
            Self::DoubleQuoted(..) | Self::Interpolated(..) => TokenKind::DoubleQuotedString,
            Self::DocString(x) if x.is_nowdoc => TokenKind::Nowdoc,
            Self::DocString(..) => TokenKind::Heredoc,
            Self::Punctuation(x) => x.kind,
        }
    }

    /// Gets the text the scanned token reports.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::SingleQuoted(x) => x.value.clone(),
            Self::DoubleQuoted(x) => x.value.clone(),
            Self::DocString(x) => x.body(),
            Self::Interpolated(x) => x.value(),
            token => token.to_string(),
        }
    }
}

impl Input<&super::Token> for &Token {
    fn assert(self, output: &super::Token) -> TestCaseResult {
        prop_assert_eq!(output.kind, self.kind());

        prop_assert_eq!(output.text(), self.text());
        prop_assert_eq!(output.span.str(), self.to_string());

        Ok(())
    }
}

fn lex_single(source: &str) -> Result<super::Token, TestCaseError> {
    let source_file = SourceFile::temp(source)?;
    let mut lexer = Lexer::new(&source_file);

    let token = lexer
        .next()
        .map_err(|error| TestCaseError::fail(error.message()))?
        .ok_or_else(|| TestCaseError::fail("expected a token"))?;

    prop_assert_eq!(lexer.next().map_err(|error| TestCaseError::fail(error.message()))?, None);

    Ok(token)
}

proptest! {
    #[test]
    fn token_test(input in Token::arbitrary()) {
        let token = lex_single(&input.to_string())?;

        input.assert(&token)?;
        prop_assert_eq!(token.line, 0);
        prop_assert_eq!(token.start(), 0);
    }

    #[test]
    fn doc_string_test(input in DocString::arbitrary()) {
        let source_file = SourceFile::temp(format!("{input};\n$x"))?;
        let mut lexer = Lexer::new(&source_file);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next().map_err(|error| TestCaseError::fail(error.message()))? {
            tokens.push(token);
        }

        prop_assert_eq!(
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
            [
                Token::DocString(input.clone()).kind(),
                TokenKind::Semicolon,
                TokenKind::Lvar
            ]
        );
        prop_assert_eq!(tokens[0].text(), input.body());
        prop_assert_eq!(tokens[1].line, input.lines.len() + 1);
        prop_assert_eq!(tokens[2].line, input.lines.len() + 2);
    }

    #[test]
    fn keyword_classification_test(input in Keyword::arbitrary()) {
        let token = lex_single(&input.to_string())?;

        prop_assert_eq!(token.kind, TokenKind::Keyword(input.keyword));
        prop_assert_eq!(token.kind.name(), input.keyword.name());
    }

    #[test]
    fn word_is_not_split_by_keyword_prefix_test(
        keyword in Keyword::arbitrary(),
        suffix in "[a-z0-9]{1,4}",
    ) {
        let source = format!("{keyword}{suffix}");
        prop_assume!(KeywordKind::from_str(&source).is_err());

        let token = lex_single(&source)?;

        prop_assert_eq!(token.kind, TokenKind::Word);
        prop_assert_eq!(token.text(), source.as_str());
    }
}

#[test]
fn keyword_round_trip_test() {
    for keyword in KeywordKind::iter() {
        assert_eq!(KeywordKind::from_str(keyword.as_str()), Ok(keyword));
    }

    assert_eq!(KeywordKind::from_str("bool"), Ok(KeywordKind::BoolCast));
    assert_eq!(KeywordKind::from_str("boolean"), Ok(KeywordKind::BoolCast));
    assert_eq!(KeywordKind::from_str("Class"), Err(super::KeywordParseError));
}

#[test]
fn token_kind_names_are_unique_test() {
    let kinds = TokenKind::all().collect::<Vec<_>>();
    let names = kinds.iter().map(|kind| kind.name()).collect::<HashSet<_>>();

    assert_eq!(names.len(), kinds.len());
    assert_eq!(
        kinds
            .iter()
            .filter(|kind| matches!(kind, TokenKind::Keyword(..)))
            .count(),
        KeywordKind::iter().count()
    );
}

#[test]
fn token_kind_names_test() {
    assert_eq!(TokenKind::EqEqEq.name(), "T_EQEQEQ");
    assert_eq!(TokenKind::Lvar.name(), "T_LVAR");
    assert_eq!(TokenKind::XhpClosing.name(), "T_XHP_CLOSING");
    assert_eq!(TokenKind::Keyword(KeywordKind::BoolCast).name(), "T_BOOL_CAST");
    assert_eq!(TokenKind::Keyword(KeywordKind::ClassConstant).name(), "T_CLASS_C");
}

#[test]
fn lexeme_table_test() {
    for (lexeme, kind) in LEXEMES {
        let token = lex_single(lexeme).unwrap();

        assert_eq!(token.kind, *kind, "lexeme `{lexeme}`");
        assert_eq!(token.text(), *lexeme);
    }
}

#[test]
fn empty_input_test() {
    let source_file = SourceFile::new("empty.php", "");
    let mut lexer = Lexer::new(&source_file);

    assert_eq!(lexer.next(), Ok(None));
    assert_eq!(lexer.next(), Ok(None));
    assert!(lexer.comments().is_empty());
}
