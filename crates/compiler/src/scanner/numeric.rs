// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

//! Numeric and blob literal parsing: decimal and based naturals, reals with
//! fraction/exponent, and `$base#digits$` blobs packed into bytes.

use crate::span::Span;
use crate::value::Literal;

use super::engine::Scanner;
use super::errors::LexerErrorKind;
use super::token::{Token, TokenKind};

/// Value of `c` as a digit, or `None` if it isn't one in either alphabet.
/// Base-36 uses `0-9a-zA-Z`; base-64 uses the standard `A-Za-z0-9+/` table.
fn digit_value(c: u8, base64: bool) -> Option<u32> {
    if base64 {
        match c {
            b'A'..=b'Z' => Some((c - b'A') as u32),
            b'a'..=b'z' => Some((c - b'a') as u32 + 26),
            b'0'..=b'9' => Some((c - b'0') as u32 + 52),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    } else {
        match c {
            b'0'..=b'9' => Some((c - b'0') as u32),
            b'a'..=b'z' => Some((c - b'a') as u32 + 10),
            b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
            _ => None,
        }
    }
}

fn bits_per_digit(base: u32) -> u32 {
    match base {
        2 => 1,
        4 => 2,
        8 => 3,
        16 => 4,
        64 => 6,
        _ => 4,
    }
}

/// Packs digit values MSB-first into bytes, flushing every 8 bits. Batching
/// by a base-dependent multiple instead (1 byte at a time for bases 2/4/16,
/// 3 bytes at a time for bases 8/64) produces the same byte stream; larger
/// batches only amortize shifts per byte, they don't change the result.
struct BlobPacker {
    bytes: Vec<u8>,
    bits: u32,
    count: u32,
}

impl BlobPacker {
    fn new() -> Self {
        Self { bytes: Vec::new(), bits: 0, count: 0 }
    }

    fn push_digit(&mut self, value: u32, bits_per_digit: u32) {
        self.bits = (self.bits << bits_per_digit) | value;
        self.count += bits_per_digit;
        while self.count >= 8 {
            let shift = self.count - 8;
            self.bytes.push(((self.bits >> shift) & 0xFF) as u8);
            self.count -= 8;
            self.bits &= (1u32 << self.count) - 1;
        }
    }

    /// Flushes any leftover bits, left-aligned and zero-padded to a full byte.
    fn finish(&mut self) {
        if self.count > 0 {
            let byte = (self.bits << (8 - self.count)) & 0xFF;
            self.bytes.push(byte as u8);
            self.count = 0;
            self.bits = 0;
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Scanner {
    fn consume_integer_digits(
        &mut self,
        base: u32,
        use_base64: bool,
        natural: &mut u64,
        mut blob: Option<&mut BlobPacker>,
        start: u32,
    ) {
        let mut prev_underscore = false;
        loop {
            match self.peek_char(0) {
                Some(b'_') => {
                    self.eat_char();
                    if prev_underscore {
                        self.report(LexerErrorKind::DoubleUnderscoreInDigits, start);
                    }
                    prev_underscore = true;
                }
                Some(c) if blob.is_some() && matches!(c, b' ' | b'\t' | b'\n' | b'\r') => {
                    self.eat_char();
                }
                Some(c) if blob.is_some() && c == b'=' => {
                    self.eat_char();
                }
                Some(c) => {
                    let Some(v) = digit_value(c, use_base64) else { break };
                    if v >= base {
                        break;
                    }
                    self.eat_char();
                    *natural = natural.wrapping_mul(base as u64).wrapping_add(v as u64);
                    if let Some(packer) = blob.as_deref_mut() {
                        packer.push_digit(v, bits_per_digit(base));
                    }
                    prev_underscore = false;
                }
                None => break,
            }
        }
    }

    fn consume_fraction_digits(&mut self, base: u32, use_base64: bool, real: &mut f64, start: u32) {
        let mut scale = 1.0f64 / base as f64;
        let mut prev_underscore = false;
        loop {
            match self.peek_char(0) {
                Some(b'_') => {
                    self.eat_char();
                    if prev_underscore {
                        self.report(LexerErrorKind::DoubleUnderscoreInFraction, start);
                    }
                    prev_underscore = true;
                }
                Some(c) => {
                    let Some(v) = digit_value(c, use_base64) else { break };
                    if v >= base {
                        break;
                    }
                    self.eat_char();
                    *real += v as f64 * scale;
                    scale /= base as f64;
                    prev_underscore = false;
                }
                None => break,
            }
        }
    }

    /// Consumes an optional `e`/`E` exponent, promoting to `REAL` when the
    /// exponent is negative or the base-10 scale can't stay exact as a `u64`.
    fn maybe_scan_exponent(
        &mut self,
        base: u32,
        natural: &mut u64,
        real: &mut f64,
        floating: &mut bool,
        start: u32,
    ) {
        if !matches!(self.peek_char(0), Some(b'e') | Some(b'E')) {
            return;
        }

        let (has_sign, negative, digit_follows) = match self.peek_char(1) {
            Some(b'+') => (true, false, false),
            Some(b'-') => (true, true, false),
            Some(c) if c.is_ascii_digit() => (false, false, true),
            _ => (false, false, false),
        };

        if !has_sign && !digit_follows {
            return;
        }

        if has_sign {
            let e = self.eat_char().unwrap();
            let sign = self.eat_char().unwrap();
            if !matches!(self.peek_char(0), Some(b'0'..=b'9')) {
                self.unget_char(sign);
                self.unget_char(e);
                return;
            }
        } else {
            self.eat_char();
        }

        let mut exponent: i32 = 0;
        let mut prev_underscore = false;
        loop {
            match self.peek_char(0) {
                Some(b'_') => {
                    self.eat_char();
                    if prev_underscore {
                        self.report(LexerErrorKind::DoubleUnderscoreInDigits, start);
                    }
                    prev_underscore = true;
                }
                Some(c @ b'0'..=b'9') => {
                    self.eat_char();
                    exponent = exponent.saturating_mul(10).saturating_add((c - b'0') as i32);
                    prev_underscore = false;
                }
                _ => break,
            }
        }

        if negative {
            if !*floating {
                *real = *natural as f64;
                *floating = true;
            }
            *real *= (base as f64).powi(-exponent);
            return;
        }

        if *floating {
            *real *= (base as f64).powi(exponent);
        } else if let Some(scale) = (base as u64).checked_pow(exponent as u32) {
            *natural = natural.wrapping_mul(scale);
        } else {
            *real = (*natural as f64) * (base as f64).powi(exponent);
            *floating = true;
        }
    }

    /// Entry point for a numeric literal; `first` is the already-consumed
    /// leading digit.
    pub(super) fn scan_number(&mut self, first: u8, start: u32) -> Token {
        let mut natural: u64 = (first - b'0') as u64;
        let mut real: f64 = 0.0;
        let mut floating = false;
        let mut base: u32 = 10;
        let mut based = false;
        let mut use_base64 = false;

        loop {
            self.consume_integer_digits(base, use_base64, &mut natural, None, start);

            if !based && self.peek_char(0) == Some(b'#') {
                self.eat_char();
                let base_val = natural;
                if (2..=36).contains(&base_val) || base_val == 64 {
                    base = base_val as u32;
                } else {
                    self.report(LexerErrorKind::InvalidBase(base_val as i64), start);
                    base = 36;
                }
                based = true;
                use_base64 = base == 64;
                natural = 0;
                continue;
            }
            break;
        }

        if based && self.peek_char(0) == Some(b'#') {
            self.eat_char();
        }

        if self.peek_char(0) == Some(b'.') {
            if let Some(c1) = self.peek_char(1) {
                if digit_value(c1, use_base64).is_some_and(|v| v < base) {
                    self.eat_char();
                    floating = true;
                    real = natural as f64;
                    self.consume_fraction_digits(base, use_base64, &mut real, start);
                }
            }
        }

        self.maybe_scan_exponent(base, &mut natural, &mut real, &mut floating, start);

        let span = Span::new(start, self.position());
        if floating {
            Token::new(TokenKind::Real, span).with_value(Literal::Real(real))
        } else {
            Token::new(TokenKind::Natural, span).with_value(Literal::Natural(natural))
        }
    }

    /// Entry point for a `$...$` blob literal; `$` has already been consumed.
    pub(super) fn scan_blob(&mut self, start: u32) -> Token {
        let mut natural: u64 = 0;
        let mut base: u32 = 10;
        let mut based = false;
        let mut use_base64 = false;
        let mut packer: Option<BlobPacker> = None;

        loop {
            match packer.as_mut() {
                Some(p) => self.consume_integer_digits(base, use_base64, &mut 0, Some(p), start),
                None => self.consume_integer_digits(10, false, &mut natural, None, start),
            }

            if !based && self.peek_char(0) == Some(b'#') {
                self.eat_char();
                let base_val = natural;
                if matches!(base_val, 2 | 4 | 8 | 16 | 64) {
                    base = base_val as u32;
                } else {
                    self.report(LexerErrorKind::InvalidBlobBase(base_val as i64), start);
                    base = 16;
                }
                based = true;
                use_base64 = base == 64;
                packer = Some(BlobPacker::new());
                continue;
            }
            break;
        }

        if based && self.peek_char(0) == Some(b'#') {
            self.eat_char();
        }

        let bytes = match packer {
            Some(mut p) => {
                p.finish();
                p.into_bytes()
            }
            None => Vec::new(),
        };

        if self.peek_char(0) == Some(b'$') {
            self.eat_char();
        }

        Token::new(TokenKind::Blob, Span::new(start, self.position())).with_value(Literal::Blob(bytes))
    }
}
