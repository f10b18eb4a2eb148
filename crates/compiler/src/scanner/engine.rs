// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

//! The `Scanner` itself: state, stream lifecycle, and the `read` dispatcher.
//! Indentation, numeric/blob, text, name/symbol and skip-until logic each live
//! in their own sibling module as `impl Scanner` blocks.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::errors::ErrorSink;
use crate::positions::Positions;
use crate::span::Span;
use crate::syntax::SyntaxTable;
use crate::value::Literal;

use super::reader::Reader;
use super::token::{Token, TokenKind};

/// Saved scanner state across a parser-owned parenthesis, restored by
/// [`Scanner::close_paren`].
#[derive(Debug, Clone, Copy)]
pub struct ParenState {
    pub(crate) indent: i64,
    pub(crate) setting_indent: bool,
}

/// The lexical scanner. Holds no parse tree, no syntax table storage, and no
/// position storage of its own — those are owned by collaborators it only
/// borrows.
pub struct Scanner {
    pub(crate) positions: Rc<RefCell<Positions>>,
    pub(crate) syntax: Option<Rc<dyn SyntaxTable>>,
    pub(crate) sink: Box<dyn ErrorSink>,
    pub(crate) reader: Reader,

    /// Literal spelling of the token currently being assembled.
    pub(crate) source: Vec<u8>,
    /// The most recently produced literal value, kept around for introspection.
    pub(crate) scanned: Option<Literal>,

    /// Stack of indent levels to return to on unindent.
    pub(crate) indents: Vec<i64>,
    /// Name that must close the innermost open block, if any.
    pub(crate) block_close: Option<Rc<str>>,
    /// Current indentation column.
    pub(crate) indent: i64,
    /// Column counted so far on the line currently being measured.
    pub(crate) column: i64,
    /// First whitespace byte (space or tab) seen while measuring indentation on
    /// the current line; used to detect a mix of the two.
    pub(crate) indent_char: Option<u8>,
    /// True while leading whitespace of a fresh line is still being measured.
    pub(crate) checking_indent: bool,
    /// True while inside a parenthesis that suspends indentation sensitivity.
    pub(crate) setting_indent: bool,

    pub(crate) had_space_before: bool,
    /// Columns a tab counts for while measuring indentation. A space always
    /// counts for one; this only changes how tabs are weighed.
    pub(crate) tab_width: i64,
}

impl Scanner {
    pub fn new(
        positions: Rc<RefCell<Positions>>,
        syntax: Option<Rc<dyn SyntaxTable>>,
        sink: Box<dyn ErrorSink>,
    ) -> Self {
        Self {
            positions,
            syntax,
            sink,
            reader: Reader::new(),
            source: Vec::new(),
            scanned: None,
            indents: Vec::new(),
            block_close: None,
            indent: 0,
            column: 0,
            indent_char: None,
            checking_indent: false,
            setting_indent: false,
            had_space_before: false,
            tab_width: 1,
        }
    }

    pub fn set_tab_width(&mut self, tab_width: i64) {
        self.tab_width = tab_width.max(1);
    }

    /// Opens a new input stream, reading from `read_fn` and recording `content`
    /// in the position registry for later diagnostics. Only one stream may be
    /// open at a time.
    pub fn open_source(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        read_fn: Box<dyn FnMut(&mut [u8]) -> io::Result<usize>>,
    ) -> Result<()> {
        if self.reader.is_bound() {
            bail!("a scanner stream is already open");
        }
        self.positions.borrow_mut().open_source_file(name, content);
        self.reader.bind(read_fn);
        self.checking_indent = false;
        self.column = 0;
        self.indent_char = None;
        Ok(())
    }

    /// Convenience wrapper over [`Scanner::open_source`] for in-memory input.
    pub fn open_str(&mut self, name: impl Into<String>, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        let bytes = content.clone().into_bytes();
        let mut cursor = 0usize;
        let read_fn = Box::new(move |buf: &mut [u8]| -> io::Result<usize> {
            if cursor >= bytes.len() {
                return Ok(0);
            }
            buf[0] = bytes[cursor];
            cursor += 1;
            Ok(1)
        });
        self.open_source(name, content, read_fn)
    }

    pub fn close_source(&mut self) {
        self.reader.clear();
    }

    /// The scalar position of the next unread character: the registry's
    /// counter minus whatever is currently pushed back.
    pub fn position(&self) -> u32 {
        self.positions
            .borrow()
            .current_position()
            .saturating_sub(self.reader.pending_count())
    }

    pub(crate) fn eat_char(&mut self) -> Option<u8> {
        let (c, fresh) = self.reader.getchar()?;
        if fresh {
            self.positions.borrow_mut().step();
        }
        Some(c)
    }

    pub(crate) fn unget_char(&mut self, c: u8) {
        self.reader.ungetchar(c);
    }

    /// Looks `offset` bytes ahead (0 or 1) without consuming input, using the
    /// reader's two pushback slots transiently.
    pub(crate) fn peek_char(&mut self, offset: usize) -> Option<u8> {
        match offset {
            0 => {
                let c = self.eat_char();
                if let Some(b) = c {
                    self.unget_char(b);
                }
                c
            }
            1 => {
                let c0 = self.eat_char();
                let c1 = self.eat_char();
                if let Some(b) = c1 {
                    self.unget_char(b);
                }
                if let Some(b) = c0 {
                    self.unget_char(b);
                }
                c1
            }
            _ => unreachable!("the scanner never needs more than two characters of lookahead"),
        }
    }

    pub(crate) fn report(&mut self, kind: super::errors::LexerErrorKind, pos: u32) {
        self.sink.report(pos, kind.to_string());
    }

    fn finalize(&mut self, mut token: Token) -> Token {
        token.had_space_before = self.had_space_before;
        if let Some(value) = &token.value {
            self.scanned = Some(value.clone());
        }
        token
    }

    /// Produces the next token. Always returns a token, including `EOF`;
    /// lexical errors are reported to the sink and surfaced as `ERROR` only
    /// when resuming scanning safely is not possible.
    pub fn read(&mut self) -> Token {
        if let Some(&top) = self.indents.last() {
            if top > self.indent {
                self.indents.pop();
                let pos = self.position();
                let token = Token::new(TokenKind::Unindent, Span::new(pos, pos));
                return self.finalize(token);
            }
        }

        self.had_space_before = false;
        let start = self.position();

        match self.consume_whitespace_and_classify_indent() {
            super::indent::IndentOutcome::Token(token) => return self.finalize(token),
            super::indent::IndentOutcome::Eof => {
                let token = self.finish_at_eof(start);
                return self.finalize(token);
            }
            super::indent::IndentOutcome::Continue => {}
        }

        let start = self.position();
        self.source.clear();

        let c = match self.eat_char() {
            Some(c) => c,
            None => {
                let token = self.finish_at_eof(start);
                return self.finalize(token);
            }
        };
        self.source.push(c);

        let token = self.dispatch_char(c, start);
        self.finalize(token)
    }

    /// Collects every token from `read` up to and including `EOF`.
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.read();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn dispatch_char(&mut self, c: u8, start: u32) -> Token {
        match c {
            b'0'..=b'9' => self.scan_number(c, start),
            b'$' => self.scan_blob(start),
            b'"' | b'\'' => self.scan_text_or_char(c, start),
            c if super::name::is_name_start(c) => self.scan_name(c, start),
            c if super::name::is_symbol_char(c) => self.scan_symbol(c, start),
            _ => {
                let spelling: Rc<str> = Rc::from((c as char).to_string());
                Token::new(TokenKind::Symbol, Span::new(start, self.position()))
                    .with_value(Literal::Name(spelling))
            }
        }
    }

    /// Suspends indentation sensitivity for the life of a parenthesis,
    /// returning the state [`Scanner::close_paren`] must be given back.
    pub fn open_paren(&mut self) -> ParenState {
        let saved = ParenState { indent: self.indent, setting_indent: self.setting_indent };
        self.setting_indent = true;
        saved
    }

    /// Restores indentation state saved by [`Scanner::open_paren`]. If the
    /// restored indent matches the current stack top, that level is popped,
    /// since the parenthesis's contents never pushed their own level back off.
    pub fn close_paren(&mut self, saved: ParenState) {
        self.indent = saved.indent;
        self.setting_indent = saved.setting_indent;
        if !self.setting_indent {
            if let Some(&top) = self.indents.last() {
                if top == self.indent {
                    self.indents.pop();
                }
            }
        }
    }
}
