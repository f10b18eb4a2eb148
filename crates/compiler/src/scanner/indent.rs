// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

//! Indentation state machine: leading-whitespace processing runs at the top
//! of every `read`, deciding whether the line that is about to be scanned
//! opens a deeper block, closes one or more, or is a plain continuation of
//! the current one.
//!
//! The dedent branch below compares the new column against the *current*
//! indent, not against the stack's second-from-top entry — see `DESIGN.md`
//! for why that reading is the one that holds together.

use crate::span::Span;

use super::engine::Scanner;
use super::errors::LexerErrorKind;
use super::token::{Token, TokenKind};

pub(super) enum IndentOutcome {
    /// A structural token (`NEWLINE`/`INDENT`/`UNINDENT`/`ERROR`) was decided.
    Token(Token),
    /// Input ended while measuring whitespace.
    Eof,
    /// Same line, nothing to report — proceed to scan the next token.
    Continue,
}

impl Scanner {
    pub(super) fn consume_whitespace_and_classify_indent(&mut self) -> IndentOutcome {
        self.source.clear();
        loop {
            match self.peek_char(0) {
                Some(b'\n') => {
                    self.eat_char();
                    self.source.push(b'\n');
                    self.checking_indent = true;
                    self.column = 0;
                    self.indent_char = None;
                    self.had_space_before = true;
                }
                Some(b'\r') => {
                    self.eat_char();
                }
                Some(c @ (b' ' | b'\t')) => {
                    self.eat_char();
                    self.had_space_before = true;
                    if self.checking_indent {
                        match self.indent_char {
                            None => self.indent_char = Some(c),
                            Some(existing) if existing != c => {
                                let pos = self.position();
                                self.report(LexerErrorKind::MixedIndentation, pos);
                            }
                            _ => {}
                        }
                        self.column += if c == b'\t' { self.tab_width } else { 1 };
                    }
                }
                Some(_) => {
                    if self.checking_indent {
                        self.checking_indent = false;
                        return IndentOutcome::Token(self.classify_indent_change());
                    }
                    return IndentOutcome::Continue;
                }
                None => return IndentOutcome::Eof,
            }
        }
    }

    fn classify_indent_change(&mut self) -> Token {
        let pos = self.position();

        if self.setting_indent {
            self.indents.push(self.indent);
            self.indent = self.column;
            self.setting_indent = false;
            return Token::new(TokenKind::Newline, Span::new(pos, pos));
        }

        if self.column > self.indent {
            self.indents.push(self.indent);
            self.indent = self.column;
            return Token::new(TokenKind::Indent, Span::new(pos, pos));
        }

        if self.column < self.indent {
            self.indents.pop();
            self.indent = self.column;
            if let Some(&top) = self.indents.last() {
                if top > self.column {
                    self.report(LexerErrorKind::UnindentPastPrevious, pos);
                    return Token::new(TokenKind::Error, Span::new(pos, pos));
                }
            }
            return Token::new(TokenKind::Unindent, Span::new(pos, pos));
        }

        Token::new(TokenKind::Newline, Span::new(pos, pos))
    }

    /// Called once `read` finds the stream exhausted: unwinds any indentation
    /// still open, one `UNINDENT` per call, so `INDENT` and `UNINDENT` counts
    /// stay balanced across a complete input before `EOF` is finally returned.
    pub(super) fn finish_at_eof(&mut self, start: u32) -> Token {
        if self.indents.pop().is_some() {
            return Token::new(TokenKind::Unindent, Span::new(start, start));
        }
        Token::new(TokenKind::Eof, Span::new(start, start))
    }
}
