// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

//! Text and character literal parsing: doubled-quote escaping inside
//! `"..."`/`'...'`, EOF-in-literal recovery, and single-code-point
//! validation for `CHARACTER`.

use crate::span::Span;
use crate::value::Literal;

use super::engine::Scanner;
use super::errors::LexerErrorKind;
use super::token::{Token, TokenKind};

impl Scanner {
    /// `quote` (`'"'` or `'\''`) has already been consumed.
    pub(super) fn scan_text_or_char(&mut self, quote: u8, start: u32) -> Token {
        let mut bytes: Vec<u8> = Vec::new();
        loop {
            match self.eat_char() {
                Some(c) if c == quote => {
                    if self.peek_char(0) == Some(quote) {
                        self.eat_char();
                        bytes.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => bytes.push(c),
                None => {
                    self.report(LexerErrorKind::UnterminatedText, start);
                    break;
                }
            }
        }

        let span = Span::new(start, self.position());

        if quote == b'\'' {
            let single = std::str::from_utf8(&bytes).ok().and_then(|s| {
                let mut chars = s.chars();
                let first = chars.next()?;
                chars.next().is_none().then_some(first)
            });
            match single {
                Some(ch) => Token::new(TokenKind::Character, span).with_value(Literal::Character(ch)),
                None => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    self.report(LexerErrorKind::BadCharacterConstant(text), start);
                    Token::new(TokenKind::Character, span).with_value(Literal::Character('\0'))
                }
            }
        } else {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            Token::new(TokenKind::Text, span).with_value(Literal::Text(text))
        }
    }
}
