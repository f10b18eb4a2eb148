// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

use crate::span::Span;
use crate::value::Literal;

/// The closed set of token kinds the scanner produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Symbol,
    Natural,
    Real,
    Text,
    Character,
    Blob,
    Newline,
    Indent,
    Unindent,
    Open,
    Close,
    Eof,
    Error,
}

/// A scanned token: its kind, source span, and (for literal-bearing kinds)
/// the typed value produced alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: Option<Literal>,
    /// Whitespace context flags the parser consults when deciding whether an
    /// operator is prefix, infix, or postfix.
    pub had_space_before: bool,
    pub had_space_after: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span, value: None, had_space_before: false, had_space_after: false }
    }

    pub fn with_value(mut self, value: Literal) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_spacing(mut self, before: bool, after: bool) -> Self {
        self.had_space_before = before;
        self.had_space_after = after;
        self
    }

    pub fn with_space_after(mut self, after: bool) -> Self {
        self.had_space_after = after;
        self
    }

    pub fn as_name(&self) -> Option<&str> {
        self.value.as_ref().and_then(Literal::as_name)
    }
}
