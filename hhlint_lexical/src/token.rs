//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, hash::Hash, str::FromStr};

use hhlint_base::source_file::{ByteIndex, Span};
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Is an enumeration of the reserved words and magic constants of Hack/PHP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    #[default]
    Abstract,
    Array,
    As,
    Async,
    Await,
    BoolCast,
    Break,
    Callable,
    Case,
    Catch,
    Class,
    ClassConstant,
    Clone,
    Const,
    Continue,
    Declare,
    Default,
    DirConstant,
    Do,
    Echo,
    Else,
    ElseIf,
    Empty,
    Exit,
    Extends,
    FileConstant,
    Final,
    Finally,
    For,
    Foreach,
    Function,
    FunctionConstant,
    Global,
    If,
    Implements,
    Include,
    IncludeOnce,
    Instanceof,
    Insteadof,
    Interface,
    Isset,
    LineConstant,
    List,
    Namespace,
    NamespaceConstant,
    New,
    Print,
    Private,
    Protected,
    Public,
    Require,
    RequireOnce,
    Return,
    Static,
    Switch,
    Throw,
    Trait,
    TraitConstant,
    Try,
    Unset,
    Use,
    Var,
    While,
    Yield,
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_KEYWORD_MAP: HashMap<&'static str, KeywordKind> = {
                let mut map = HashMap::new();

                for keyword in KeywordKind::iter() {
                    map.insert(keyword.as_str(), keyword);
                }

                // the only keyword with two spellings
                map.insert("boolean", KeywordKind::BoolCast);

                map
            };
        }
        STRING_KEYWORD_MAP.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the canonical spelling of the keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Array => "array",
            Self::As => "as",
            Self::Async => "async",
            Self::Await => "await",
            Self::BoolCast => "bool",
            Self::Break => "break",
            Self::Callable => "callable",
            Self::Case => "case",
            Self::Catch => "catch",
            Self::Class => "class",
            Self::ClassConstant => "__CLASS__",
            Self::Clone => "clone",
            Self::Const => "const",
            Self::Continue => "continue",
            Self::Declare => "declare",
            Self::Default => "default",
            Self::DirConstant => "__DIR__",
            Self::Do => "do",
            Self::Echo => "echo",
            Self::Else => "else",
            Self::ElseIf => "elseif",
            Self::Empty => "empty",
            Self::Exit => "exit",
            Self::Extends => "extends",
            Self::FileConstant => "__FILE__",
            Self::Final => "final",
            Self::Finally => "finally",
            Self::For => "for",
            Self::Foreach => "foreach",
            Self::Function => "function",
            Self::FunctionConstant => "__FUNCTION__",
            Self::Global => "global",
            Self::If => "if",
            Self::Implements => "implements",
            Self::Include => "include",
            Self::IncludeOnce => "include_once",
            Self::Instanceof => "instanceof",
            Self::Insteadof => "insteadof",
            Self::Interface => "interface",
            Self::Isset => "isset",
            Self::LineConstant => "__LINE__",
            Self::List => "list",
            Self::Namespace => "namespace",
            Self::NamespaceConstant => "__NAMESPACE__",
            Self::New => "new",
            Self::Print => "print",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
            Self::Require => "require",
            Self::RequireOnce => "require_once",
            Self::Return => "return",
            Self::Static => "static",
            Self::Switch => "switch",
            Self::Throw => "throw",
            Self::Trait => "trait",
            Self::TraitConstant => "__TRAIT__",
            Self::Try => "try",
            Self::Unset => "unset",
            Self::Use => "use",
            Self::Var => "var",
            Self::While => "while",
            Self::Yield => "yield",
        }
    }

    /// Gets the stable diagnostic name of the keyword, e.g. `T_ABSTRACT`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Abstract => "T_ABSTRACT",
            Self::Array => "T_ARRAY",
            Self::As => "T_AS",
            Self::Async => "T_ASYNC",
            Self::Await => "T_AWAIT",
            Self::BoolCast => "T_BOOL_CAST",
            Self::Break => "T_BREAK",
            Self::Callable => "T_CALLABLE",
            Self::Case => "T_CASE",
            Self::Catch => "T_CATCH",
            Self::Class => "T_CLASS",
            Self::ClassConstant => "T_CLASS_C",
            Self::Clone => "T_CLONE",
            Self::Const => "T_CONST",
            Self::Continue => "T_CONTINUE",
            Self::Declare => "T_DECLARE",
            Self::Default => "T_DEFAULT",
            Self::DirConstant => "T_DIR",
            Self::Do => "T_DO",
            Self::Echo => "T_ECHO",
            Self::Else => "T_ELSE",
            Self::ElseIf => "T_ELSEIF",
            Self::Empty => "T_EMPTY",
            Self::Exit => "T_EXIT",
            Self::Extends => "T_EXTENDS",
            Self::FileConstant => "T_FILE",
            Self::Final => "T_FINAL",
            Self::Finally => "T_FINALLY",
            Self::For => "T_FOR",
            Self::Foreach => "T_FOREACH",
            Self::Function => "T_FUNCTION",
            Self::FunctionConstant => "T_FUNC_C",
            Self::Global => "T_GLOBAL",
            Self::If => "T_IF",
            Self::Implements => "T_IMPLEMENTS",
            Self::Include => "T_INCLUDE",
            Self::IncludeOnce => "T_INCLUDE_ONCE",
            Self::Instanceof => "T_INSTANCEOF",
            Self::Insteadof => "T_INSTEADOF",
            Self::Interface => "T_INTERFACE",
            Self::Isset => "T_ISSET",
            Self::LineConstant => "T_LINE",
            Self::List => "T_LIST",
            Self::Namespace => "T_NAMESPACE",
            Self::NamespaceConstant => "T_NS_C",
            Self::New => "T_NEW",
            Self::Print => "T_PRINT",
            Self::Private => "T_PRIVATE",
            Self::Protected => "T_PROTECTED",
            Self::Public => "T_PUBLIC",
            Self::Require => "T_REQUIRE",
            Self::RequireOnce => "T_REQUIRE_ONCE",
            Self::Return => "T_RETURN",
            Self::Static => "T_STATIC",
            Self::Switch => "T_SWITCH",
            Self::Throw => "T_THROW",
            Self::Trait => "T_TRAIT",
            Self::TraitConstant => "T_TRAIT_C",
            Self::Try => "T_TRY",
            Self::Unset => "T_UNSET",
            Self::Use => "T_USE",
            Self::Var => "T_VAR",
            Self::While => "T_WHILE",
            Self::Yield => "T_YIELD",
        }
    }
}

/// Is an enumeration containing all kinds of tokens of the Hack/PHP language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum TokenKind {
    // suppression markers
    UnsafeExpr,
    FixmeExpr,

    // literals
    Int,
    Float,
    QuotedString,
    DoubleQuotedString,
    Heredoc,
    Nowdoc,

    // identifier-like
    Word,
    Keyword(KeywordKind),
    Lvar,
    Dollar,
    /// Named in the kind table only; a lone `_` scans as a [`TokenKind::Word`].
    Underscore,

    // language markers
    Php,
    Hh,
    ClosePhp,

    // embedded markup
    XhpName,
    XhpClosing,
    XhpComment,

    // structural punctuation
    LeftParenthesis,
    RightParenthesis,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Colon,
    ColonColon,

    // assignment and comparison
    Eq,
    EqEq,
    EqEqEq,
    BangEq,
    BangEqEq,
    BarEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    DotEq,
    PercentEq,
    CaretEq,
    AmpEq,
    ShiftLeftEq,
    ShiftRightEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // arithmetic, bitwise and logical
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Bar,
    Tilde,
    Bang,
    AmpAmp,
    BarBar,
    ShiftLeft,
    ShiftRight,
    Increment,
    Decrement,

    // member access and arrows
    Dot,
    Ellipsis,
    Arrow,
    NullsafeArrow,
    DoubleArrow,
    Lambda,
    Question,
    At,
    Required,
    Backtick,
}

impl TokenKind {
    /// Returns an iterator over every token kind, with one entry per keyword.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
            .filter(|kind| !matches!(kind, Self::Keyword(..)))
            .chain(KeywordKind::iter().map(Self::Keyword))
    }

    /// Gets the stable name of the token kind used by diagnostics and test fixtures.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnsafeExpr => "T_UNSAFE_EXPR",
            Self::FixmeExpr => "T_FIXME_EXPR",
            Self::Int => "T_INT",
            Self::Float => "T_FLOAT",
            Self::QuotedString => "T_QUOTED_STRING",
            Self::DoubleQuotedString => "T_DOUBLE_QUOTED_STRING",
            Self::Heredoc => "T_HEREDOC",
            Self::Nowdoc => "T_NOWDOC",
            Self::Word => "T_WORD",
            Self::Keyword(keyword) => keyword.name(),
            Self::Lvar => "T_LVAR",
            Self::Dollar => "T_DOLLAR",
            Self::Underscore => "T_UNDERSCORE",
            Self::Php => "T_PHP",
            Self::Hh => "T_HH",
            Self::ClosePhp => "T_CLOSE_PHP",
            Self::XhpName => "T_XHP_NAME",
            Self::XhpClosing => "T_XHP_CLOSING",
            Self::XhpComment => "T_XHP_COMMENT",
            Self::LeftParenthesis => "T_LP",
            Self::RightParenthesis => "T_RP",
            Self::LeftBrace => "T_LCB",
            Self::RightBrace => "T_RCB",
            Self::LeftBracket => "T_LB",
            Self::RightBracket => "T_RB",
            Self::Semicolon => "T_SC",
            Self::Comma => "T_COMMA",
            Self::Colon => "T_COL",
            Self::ColonColon => "T_COLCOL",
            Self::Eq => "T_EQ",
            Self::EqEq => "T_EQEQ",
            Self::EqEqEq => "T_EQEQEQ",
            Self::BangEq => "T_DIFF",
            Self::BangEqEq => "T_DIFF2",
            Self::BarEq => "T_BAREQ",
            Self::PlusEq => "T_PLUSEQ",
            Self::MinusEq => "T_MINUSEQ",
            Self::StarEq => "T_STAREQ",
            Self::SlashEq => "T_SLASHEQ",
            Self::DotEq => "T_DOTEQ",
            Self::PercentEq => "T_PERCENTEQ",
            Self::CaretEq => "T_XOREQ",
            Self::AmpEq => "T_AMPEQ",
            Self::ShiftLeftEq => "T_LSHIFTEQ",
            Self::ShiftRightEq => "T_RSHIFTEQ",
            Self::Lt => "T_LT",
            Self::Gt => "T_GT",
            Self::LtEq => "T_LTE",
            Self::GtEq => "T_GTE",
            Self::Plus => "T_PLUS",
            Self::Minus => "T_MINUS",
            Self::Star => "T_STAR",
            Self::Slash => "T_SLASH",
            Self::Percent => "T_PERCENT",
            Self::Caret => "T_XOR",
            Self::Amp => "T_AMP",
            Self::Bar => "T_BAR",
            Self::Tilde => "T_TILD",
            Self::Bang => "T_EM",
            Self::AmpAmp => "T_AMPAMP",
            Self::BarBar => "T_BARBAR",
            Self::ShiftLeft => "T_LTLT",
            Self::ShiftRight => "T_GTGT",
            Self::Increment => "T_INCR",
            Self::Decrement => "T_DECR",
            Self::Dot => "T_DOT",
            Self::Ellipsis => "T_ELLIPSIS",
            Self::Arrow => "T_ARROW",
            Self::NullsafeArrow => "T_NSARROW",
            Self::DoubleArrow => "T_SARROW",
            Self::Lambda => "T_LAMBDA",
            Self::Question => "T_QM",
            Self::At => "T_AT",
            Self::Required => "T_REQUIRED",
            Self::Backtick => "T_BACKTICK",
        }
    }
}

/// Represents a single lexeme produced by the [`crate::lexer::Lexer`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    /// Is the kind of the token.
    pub kind: TokenKind,

    /// Is the span that makes up the token, delimiters included.
    pub span: Span,

    /// Is the line of the token's first character, counted from 0.
    pub line: usize,

    /// Is the decoded value of string, doc string, and markup closing or comment tokens.
    pub literal: Option<String>,
}

impl Token {
    /// Gets the text of the token.
    ///
    /// String-like tokens yield their decoded value without delimiters; every other token yields
    /// the exact source text it was scanned from.
    #[must_use]
    pub fn text(&self) -> &str { self.literal.as_deref().unwrap_or_else(|| self.span.str()) }

    /// Gets the byte index of the token's first character.
    #[must_use]
    pub fn start(&self) -> ByteIndex { self.span.start() }

    /// Gets the byte index right after the token's last character.
    #[must_use]
    pub fn end(&self) -> ByteIndex { self.span.end() }
}

#[cfg(test)]
pub(crate) mod tests;
