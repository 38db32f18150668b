//! Character classes and fixed-lexeme matchers used by the scanner.
//!
//! Every matcher takes the remaining input starting at the cursor and returns the byte length of
//! the longest lexeme it recognizes there.

use crate::token::TokenKind;

/// Fixed lexemes, ordered so that a lexeme always precedes every lexeme that is a prefix of it.
pub(super) const PUNCTUATIONS: &[(&str, TokenKind)] = &[
    ("@required", TokenKind::Required),
    ("<?php", TokenKind::Php),
    ("<?hh", TokenKind::Hh),
    ("===", TokenKind::EqEqEq),
    ("==>", TokenKind::Lambda),
    ("!==", TokenKind::BangEqEq),
    ("<<=", TokenKind::ShiftLeftEq),
    (">>=", TokenKind::ShiftRightEq),
    ("...", TokenKind::Ellipsis),
    ("?->", TokenKind::NullsafeArrow),
    ("?>", TokenKind::ClosePhp),
    ("::", TokenKind::ColonColon),
    ("==", TokenKind::EqEq),
    ("=>", TokenKind::DoubleArrow),
    ("!=", TokenKind::BangEq),
    ("|=", TokenKind::BarEq),
    ("+=", TokenKind::PlusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    (".=", TokenKind::DotEq),
    ("-=", TokenKind::MinusEq),
    ("%=", TokenKind::PercentEq),
    ("^=", TokenKind::CaretEq),
    ("&=", TokenKind::AmpEq),
    ("||", TokenKind::BarBar),
    ("&&", TokenKind::AmpAmp),
    ("++", TokenKind::Increment),
    ("--", TokenKind::Decrement),
    ("->", TokenKind::Arrow),
    ("<<", TokenKind::ShiftLeft),
    ("<=", TokenKind::LtEq),
    (">>", TokenKind::ShiftRight),
    (">=", TokenKind::GtEq),
    ("@", TokenKind::At),
    ("`", TokenKind::Backtick),
    ("(", TokenKind::LeftParenthesis),
    (")", TokenKind::RightParenthesis),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    ("=", TokenKind::Eq),
    ("!", TokenKind::Bang),
    ("|", TokenKind::Bar),
    ("&", TokenKind::Amp),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("^", TokenKind::Caret),
    ("%", TokenKind::Percent),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    (".", TokenKind::Dot),
    ("?", TokenKind::Question),
    ("~", TokenKind::Tilde),
];

pub(super) fn is_letter(byte: u8) -> bool { byte.is_ascii_alphabetic() || byte == b'_' }

pub(super) fn is_alphanumeric(byte: u8) -> bool { byte.is_ascii_digit() || is_letter(byte) }

/// Whitespace that is skipped without affecting the line counter.
pub(super) fn is_whitespace(byte: u8) -> bool { matches!(byte, b' ' | b'\t' | b'\r' | b'\x0c') }

fn count(bytes: &[u8], predicate: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|byte| predicate(**byte)).count()
}

pub(super) fn whitespace(text: &str) -> usize { count(text.as_bytes(), is_whitespace) }

/// Matches the longest fixed lexeme at the start of the text.
pub(super) fn punctuation(text: &str) -> Option<(TokenKind, usize)> {
    PUNCTUATIONS
        .iter()
        .find(|(lexeme, _)| text.starts_with(*lexeme))
        .map(|(lexeme, kind)| (*kind, lexeme.len()))
}

/// Matches `//` or `/*` followed by optional whitespace and a suppression marker.
pub(super) fn suppression_marker(text: &str) -> Option<(TokenKind, usize)> {
    let (kind, marker) = if text.starts_with("//") {
        (TokenKind::UnsafeExpr, "UNSAFE_EXPR")
    } else if text.starts_with("/*") {
        (TokenKind::FixmeExpr, "HH_FIXME")
    } else {
        return None;
    };

    let padding = 2 + whitespace(&text[2..]);

    text[padding..]
        .starts_with(marker)
        .then_some((kind, padding + marker.len()))
}

/// Matches one identifier atom: either a letter followed by alphanumerics, or a lowercase letter
/// followed by alphanumerics and hyphens that ends with an alphanumeric.
fn atom(bytes: &[u8]) -> usize {
    let Some(&first) = bytes.first() else {
        return 0;
    };

    if !is_letter(first) {
        return 0;
    }

    let plain = 1 + count(&bytes[1..], is_alphanumeric);

    let hyphenated = if first.is_ascii_lowercase() {
        let run = 1 + count(&bytes[1..], |byte| is_alphanumeric(byte) || byte == b'-');

        match bytes[..run].iter().rposition(|byte| is_alphanumeric(*byte)) {
            Some(last) if last > 0 => last + 1,
            _ => 0,
        }
    } else {
        0
    };

    plain.max(hyphenated)
}

/// Matches a possibly namespace-qualified word such as `Foo\Bar` or `\strlen`.
pub(super) fn word(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut length = 0;

    loop {
        if bytes.get(length) == Some(&b'\\') {
            length += 1;
            continue;
        }

        match atom(&bytes[length..]) {
            0 => break,
            atom_length => length += atom_length,
        }
    }

    // a word never ends with a separator
    while length > 0 && bytes[length - 1] == b'\\' {
        length -= 1;
    }

    (length > 0).then_some(length)
}

/// Matches `$` followed by an identifier.
pub(super) fn variable(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();

    (bytes.first() == Some(&b'$') && bytes.get(1).copied().is_some_and(is_letter))
        .then(|| 2 + count(&bytes[2..], is_alphanumeric))
}

/// Matches `<` followed by a markup element name, e.g. `<div`, `<ui:button`, `<x:frag-ment`.
pub(super) fn markup_name(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();

    if bytes.first() != Some(&b'<') {
        return None;
    }

    let mut length = 1;
    if bytes.get(length) == Some(&b'%') {
        length += 1;
    }

    if !bytes.get(length).copied().is_some_and(is_letter) {
        return None;
    }
    length += 1;

    loop {
        match (bytes.get(length).copied(), bytes.get(length + 1).copied()) {
            (Some(byte), _) if is_alphanumeric(byte) || byte == b'-' => length += 1,
            (Some(b':'), Some(next)) if is_letter(next) || next == b'-' => length += 2,
            _ => break,
        }
    }

    Some(length)
}

fn digits(bytes: &[u8]) -> usize { count(bytes, |byte| byte.is_ascii_digit()) }

fn exponent(bytes: &[u8]) -> usize {
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }

    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));

    match digits(&bytes[1 + sign..]) {
        0 => 0,
        digits => 1 + sign + digits,
    }
}

fn integer(bytes: &[u8]) -> usize {
    match bytes {
        [b'0', b'x', rest @ ..] if rest.first().is_some_and(u8::is_ascii_hexdigit) => {
            2 + count(rest, |byte| byte.is_ascii_hexdigit())
        }
        [b'0', b'b', rest @ ..] if matches!(rest.first(), Some(b'0' | b'1')) => {
            2 + count(rest, |byte| matches!(byte, b'0' | b'1'))
        }
        [b'0', rest @ ..] => 1 + count(rest, |byte| matches!(byte, b'0'..=b'7')),
        _ => digits(bytes),
    }
}

fn float(bytes: &[u8]) -> usize {
    let whole = digits(bytes);
    let mut length = whole;
    let mut is_float = false;

    if bytes.get(length) == Some(&b'.') {
        let fraction = digits(&bytes[length + 1..]);

        if whole > 0 || fraction > 0 {
            length += 1 + fraction;
            is_float = true;
        }
    }

    if length == 0 {
        return 0;
    }

    match exponent(&bytes[length..]) {
        0 if is_float => length,
        0 => 0,
        exponent => length + exponent,
    }
}

/// Matches the longest integer or float literal; an integer wins a tie.
pub(super) fn number(text: &str) -> Option<(TokenKind, usize)> {
    let bytes = text.as_bytes();
    let integer = integer(bytes);
    let float = float(bytes);

    if float > integer {
        Some((TokenKind::Float, float))
    } else if integer > 0 {
        Some((TokenKind::Int, integer))
    } else {
        None
    }
}

/// Translates the character following a backslash in a double-quoted string.
///
/// Returns [`None`] for codes that are kept verbatim along with their backslash.
pub(super) fn escape(code: char) -> Option<char> {
    match code {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        'e' => Some('\x1b'),
        'f' => Some('\x0c'),
        '\\' | '$' | '"' => Some(code),
        _ => None,
    }
}

/// Matches a doc string label: an uppercase letter followed by one or more uppercase letters,
/// digits, or underscores.
pub(super) fn doc_string_label(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();

    if !bytes.first().is_some_and(u8::is_ascii_uppercase) {
        return None;
    }

    match count(&bytes[1..], |byte| {
        byte.is_ascii_uppercase() || byte.is_ascii_digit() || byte == b'_'
    }) {
        0 => None,
        rest => Some(1 + rest),
    }
}

/// Checks whether the line starting at the text terminates the doc string with the given label.
pub(super) fn is_terminator(text: &str, label: &str) -> bool {
    text.strip_prefix(label).is_some_and(|rest| {
        !rest
            .as_bytes()
            .first()
            .copied()
            .is_some_and(is_alphanumeric)
    })
}

pub(super) fn newlines(text: &str) -> usize { text.bytes().filter(|byte| *byte == b'\n').count() }
