// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

//! Name/symbol scanning, normalization, and the `is_valid_name` predicate,
//! plus block-open/close detection via the bound `SyntaxTable`.

use std::rc::Rc;

use crate::span::Span;
use crate::value::Literal;

use super::engine::Scanner;
use super::token::{Token, TokenKind};

pub(super) fn is_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c >= 0x80
}

fn is_name_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c >= 0x80
}

/// A run of punctuation, excluding the two quote characters (those start
/// text/character literals instead).
pub(super) fn is_symbol_char(c: u8) -> bool {
    c.is_ascii_punctuation() && c != b'\'' && c != b'"'
}

/// Strips `_` and folds ASCII letters to lowercase. Reuses the original bytes
/// unchanged when the run is already normalized, since that is the common
/// case and avoids an allocation.
fn normalize_name(bytes: &[u8]) -> Rc<str> {
    let needs_work = bytes.iter().any(|&b| b == b'_' || b.is_ascii_uppercase());
    if !needs_work {
        return Rc::from(std::str::from_utf8(bytes).unwrap_or_default());
    }
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'_' {
            continue;
        }
        out.push(b.to_ascii_lowercase());
    }
    Rc::from(String::from_utf8(out).unwrap_or_default().as_str())
}

/// A name is either a single control character (`\n`, `\t`, backspace), a run
/// of punctuation, or a letter-led run of alphanumerics/`_` with no doubled
/// `_`. `had_underscore` is never rechecked once the loop ends, so a single
/// trailing `_` is accepted (`DESIGN.md` records this as a deliberate choice).
pub fn is_valid_name(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() == 1 && matches!(bytes[0], b'\n' | b'\t' | 0x08) {
        return true;
    }
    if is_symbol_char(bytes[0]) {
        return bytes.iter().all(|&b| is_symbol_char(b));
    }
    if bytes[0].is_ascii_alphabetic() || bytes[0] >= 0x80 {
        let mut had_underscore = false;
        for &b in bytes {
            if b == b'_' {
                if had_underscore {
                    return false;
                }
                had_underscore = true;
                continue;
            }
            had_underscore = false;
            if !(b.is_ascii_alphanumeric() || b >= 0x80) {
                return false;
            }
        }
        return true;
    }
    false
}

impl Scanner {
    /// `first` is the already-consumed leading letter.
    pub(super) fn scan_name(&mut self, first: u8, start: u32) -> Token {
        let mut bytes = vec![first];
        loop {
            match self.peek_char(0) {
                Some(c) if is_name_continue(c) => {
                    self.eat_char();
                    bytes.push(c);
                }
                _ => break,
            }
        }
        let had_space_after =
            self.peek_char(0).map_or(true, |c| matches!(c, b' ' | b'\t' | b'\n' | b'\r'));
        let spelling = normalize_name(&bytes);
        self.finish_name_or_symbol(spelling, true, start, had_space_after)
    }

    /// `first` is the already-consumed leading punctuation byte.
    pub(super) fn scan_symbol(&mut self, first: u8, start: u32) -> Token {
        let mut bytes = vec![first];
        loop {
            let Some(c) = self.peek_char(0) else { break };
            if !is_symbol_char(c) {
                break;
            }
            let extends = match &self.syntax {
                Some(table) => {
                    let mut trial = bytes.clone();
                    trial.push(c);
                    let spelling = String::from_utf8_lossy(&trial).into_owned();
                    table.is_operator(&spelling)
                }
                None => true,
            };
            if !extends {
                break;
            }
            self.eat_char();
            bytes.push(c);
        }
        let had_space_after =
            self.peek_char(0).map_or(true, |c| matches!(c, b' ' | b'\t' | b'\n' | b'\r'));
        let spelling: Rc<str> = Rc::from(String::from_utf8_lossy(&bytes).into_owned().as_str());
        self.finish_name_or_symbol(spelling, false, start, had_space_after)
    }

    fn finish_name_or_symbol(
        &mut self,
        spelling: Rc<str>,
        is_identifier: bool,
        start: u32,
        had_space_after: bool,
    ) -> Token {
        let span = Span::new(start, self.position());

        if let Some(table) = self.syntax.clone() {
            if let Some(closer) = table.is_block(&spelling) {
                self.block_close = Some(closer);
                return Token::new(TokenKind::Open, span)
                    .with_value(Literal::Name(spelling))
                    .with_space_after(had_space_after);
            }
            if self.block_close.as_deref() == Some(&*spelling) {
                self.block_close = None;
                return Token::new(TokenKind::Close, span)
                    .with_value(Literal::Name(spelling))
                    .with_space_after(had_space_after);
            }
        }

        let kind = if is_identifier { TokenKind::Name } else { TokenKind::Symbol };
        Token::new(kind, span).with_value(Literal::Name(spelling)).with_space_after(had_space_after)
    }
}
