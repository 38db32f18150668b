//! Contains the ANSI color/style codes used when printing diagnostics to a terminal.

use std::fmt::Display;

/// Represents a style that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
}

impl Style {
    /// Applies the style to the given displayable object.
    pub fn paint<T>(self, display: T) -> Painted<T> {
        Painted {
            display,
            color: None,
            style: Some(self),
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
        }
    }
}

/// Represents a color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Cyan,
}

impl Color {
    /// Applies the color to the given displayable object.
    pub fn paint<T>(self, display: T) -> Painted<T> {
        Painted {
            display,
            color: Some(self),
            style: None,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Red => "\x1B[31m",
            Self::Cyan => "\x1B[36m",
        }
    }
}

/// Is a displayable object with an optional color and style applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Painted<T> {
    /// The displayable object.
    pub display: T,

    /// The color applied to the displayable object.
    pub color: Option<Color>,

    /// The style applied to the displayable object.
    pub style: Option<Style>,
}

impl<T> Painted<T> {
    /// Replaces the style applied to the displayable object.
    #[must_use]
    pub fn with_style(self, style: Style) -> Self {
        Self {
            style: Some(style),
            ..self
        }
    }
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(style) = self.style {
            f.write_str(style.code())?;
        }
        if let Some(color) = self.color {
            f.write_str(color.code())?;
        }

        write!(f, "{}\x1B[0m", self.display)
    }
}
