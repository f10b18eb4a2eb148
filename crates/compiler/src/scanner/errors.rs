// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

use std::fmt::{self, Display};

use crate::span::Span;

/// The scanner's lexical error taxonomy. One variant per diagnosable
/// condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexerErrorKind {
    MixedIndentation,
    UnindentPastPrevious,
    InvalidBase(i64),
    InvalidBlobBase(i64),
    DoubleUnderscoreInDigits,
    DoubleUnderscoreInFraction,
    BadCharacterConstant(String),
    UnterminatedText,
}

impl Display for LexerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerErrorKind::MixedIndentation => {
                write!(f, "Mixed tabs and spaces in indentation")
            }
            LexerErrorKind::UnindentPastPrevious => {
                write!(f, "Unindenting to the right of previous indentation")
            }
            LexerErrorKind::InvalidBase(base) => {
                write!(f, "The base {base} is not valid, not in 2..36")
            }
            LexerErrorKind::InvalidBlobBase(base) => {
                write!(f, "Base {base} is invalid for a blob")
            }
            LexerErrorKind::DoubleUnderscoreInDigits => {
                write!(f, "Two '_' characters in a row look ugly")
            }
            LexerErrorKind::DoubleUnderscoreInFraction => {
                write!(f, "Two _ characters look really ugly")
            }
            LexerErrorKind::BadCharacterConstant(text) => {
                write!(f, "Character constant '{text}' should contain one character")
            }
            LexerErrorKind::UnterminatedText => {
                write!(f, "End of input in the middle of a text")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: Span,
}

impl LexerError {
    pub fn new(kind: LexerErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::error::Error for LexerError {}

impl Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
