// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

use std::cell::RefCell;
use std::rc::Rc;

use crate::positions::Positions;

/// Where the scanner pushes diagnostics. Reporting is side-effectful and
/// never interrupts scanning: `read` always returns a token, `ERROR` only
/// when resuming safely is not possible.
pub trait ErrorSink {
    fn report(&mut self, pos: u32, message: String);
}

/// An `ErrorSink` that buffers diagnostics for later inspection, the shape
/// tests want.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub errors: Vec<(u32, String)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ErrorSink for CollectingSink {
    fn report(&mut self, pos: u32, message: String) {
        self.errors.push((pos, message));
    }
}

/// An `ErrorSink` that formats diagnostics against a `Positions` registry and
/// writes them to stderr immediately, the shape the CLI driver uses.
pub struct StderrSink {
    positions: Rc<RefCell<Positions>>,
}

impl StderrSink {
    pub fn new(positions: Rc<RefCell<Positions>>) -> Self {
        Self { positions }
    }
}

impl ErrorSink for StderrSink {
    fn report(&mut self, pos: u32, message: String) {
        match self.positions.borrow().info(pos) {
            Ok(info) => eprintln!("{}:{}:{}: {}", info.file, info.line, info.column, message),
            Err(_) => eprintln!("<unknown position {pos}>: {message}"),
        }
    }
}
