// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

use std::io;

/// A pull-based byte source. Wraps an arbitrary `(buffer) -> nread` callback
/// and supports up to two bytes of pushback — no lookahead in the scanner
/// ever needs more than two characters.
pub(crate) struct Reader {
    read_fn: Option<Box<dyn FnMut(&mut [u8]) -> io::Result<usize>>>,
    pending: [u8; 2],
    pending_len: u8,
}

impl Reader {
    pub(crate) fn new() -> Self {
        Self { read_fn: None, pending: [0; 2], pending_len: 0 }
    }

    pub(crate) fn bind(&mut self, read_fn: Box<dyn FnMut(&mut [u8]) -> io::Result<usize>>) {
        self.read_fn = Some(read_fn);
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.read_fn.is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.read_fn = None;
        self.pending_len = 0;
    }

    pub(crate) fn pending_count(&self) -> u32 {
        self.pending_len as u32
    }

    /// Returns the next byte and whether it was freshly read from the
    /// callback (`true`) or drained from pushback (`false`). Callers must
    /// only advance the position registry on a fresh byte — draining
    /// pushback re-yields a byte whose position was already stepped past.
    pub(crate) fn getchar(&mut self) -> Option<(u8, bool)> {
        if self.pending_len > 0 {
            self.pending_len -= 1;
            return Some((self.pending[self.pending_len as usize], false));
        }

        let read_fn = self.read_fn.as_mut()?;
        let mut buf = [0u8; 1];
        match read_fn(&mut buf) {
            Ok(1) => Some((buf[0], true)),
            _ => {
                self.read_fn = None;
                None
            }
        }
    }

    /// Pushes a byte back. At most two pending bytes may be held at once;
    /// pushing a third is a caller error.
    pub(crate) fn ungetchar(&mut self, c: u8) {
        assert!(
            self.pending_len < 2,
            "ungetchar called with both pushback slots already full"
        );
        self.pending[self.pending_len as usize] = c;
        self.pending_len += 1;
    }
}
