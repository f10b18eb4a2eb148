// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

//! Skip-until scanner: consumes input up to and including a literal
//! delimiter, returning everything skipped. Used for block comments and
//! long/delimited text that the main token loop doesn't itself know the
//! shape of — the parser supplies the delimiter.
//!
//! Delimiter matching uses the standard KMP failure function so that
//! overlapping delimiters (e.g. closing `*/` after a run of `*`) are matched
//! correctly without re-scanning already-consumed bytes.
//!
//! Leading indentation at each line start is elided up to the current
//! `indent` column: elision never consumes past `indent` columns, so a
//! delimiter beginning at or before that column is never swallowed as
//! whitespace (`DESIGN.md` records this as a deliberate choice).

use super::engine::Scanner;

fn kmp_failure(pattern: &[u8]) -> Vec<usize> {
    let mut fail = vec![0usize; pattern.len()];
    let mut k = 0usize;
    for i in 1..pattern.len() {
        while k > 0 && pattern[k] != pattern[i] {
            k = fail[k - 1];
        }
        if pattern[k] == pattern[i] {
            k += 1;
        }
        fail[i] = k;
    }
    fail
}

impl Scanner {
    pub fn skip_until(&mut self, delimiter: &str) -> String {
        let delim = delimiter.as_bytes();
        if delim.is_empty() {
            return String::new();
        }
        let fail = kmp_failure(delim);
        let mut matched = 0usize;
        let mut out: Vec<u8> = Vec::new();
        let mut at_line_start = true;

        loop {
            if at_line_start {
                let mut col = 0i64;
                while col < self.indent {
                    match self.peek_char(0) {
                        Some(b' ') => {
                            self.eat_char();
                            col += 1;
                        }
                        Some(b'\t') => {
                            self.eat_char();
                            col += self.tab_width;
                        }
                        _ => break,
                    }
                }
                at_line_start = false;
            }

            let Some(c) = self.eat_char() else { break };

            loop {
                if c == delim[matched] {
                    matched += 1;
                    break;
                } else if matched == 0 {
                    out.push(c);
                    if c == b'\n' {
                        at_line_start = true;
                    }
                    break;
                } else {
                    // The tentative match is shrinking: the prefix that falls
                    // out of contention was real input, equal to these delim
                    // bytes by construction, and must be flushed rather than
                    // silently dropped.
                    let shrunk = fail[matched - 1];
                    out.extend_from_slice(&delim[..matched - shrunk]);
                    matched = shrunk;
                }
            }

            if matched == delim.len() {
                return String::from_utf8_lossy(&out).into_owned();
            }
        }

        String::from_utf8_lossy(&out).into_owned()
    }
}
