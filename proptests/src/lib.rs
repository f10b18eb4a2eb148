//! Strategies shared by the property tests in `tests/scanner.rs`: numeral and
//! identifier generators for round-tripping naturals, bases, and normalized
//! names through the scanner.

use proptest::prelude::*;

/// Renders `n` in `base` using the scanner's own digit alphabet (`0-9a-z`).
pub fn to_base_digits(mut n: u64, base: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let d = (n % base as u64) as u32;
        let c = if d < 10 { (b'0' + d as u8) as char } else { (b'a' + (d - 10) as u8) as char };
        digits.push(c);
        n /= base as u64;
    }
    digits.iter().rev().collect()
}

/// A natural comfortably under 2^63.
pub fn natural_value() -> impl Strategy<Value = u64> {
    0u64..(1u64 << 62)
}

/// A base in the range the scanner accepts without clamping, 2..=36.
pub fn base_value() -> impl Strategy<Value = u32> {
    2u32..=36
}

prop_compose! {
    /// A lowercase, underscore-free identifier spelling.
    pub fn base_identifier()(s in "[a-z][a-z0-9]{0,11}") -> String { s }
}

prop_compose! {
    /// A second spelling of `base` that normalizes to the same name: letters
    /// randomly uppercased, `_` randomly inserted between characters.
    pub fn folding_variant()
        (base in base_identifier())
        (upper_mask in prop::collection::vec(any::<bool>(), base.len()),
         underscore_mask in prop::collection::vec(any::<bool>(), base.len()),
         base in Just(base))
        -> (String, String)
    {
        let mut variant = String::new();
        for (i, ch) in base.chars().enumerate() {
            if underscore_mask[i] {
                variant.push('_');
            }
            variant.push(if upper_mask[i] { ch.to_ascii_uppercase() } else { ch });
        }
        (base, variant)
    }
}

prop_compose! {
    /// A run of lines with random (even) leading-space indentation widths,
    /// each holding a single identifier. The generator makes no attempt to
    /// track a valid nesting structure, since `Scanner` balances
    /// INDENT/UNINDENT for any complete input via its EOF-unwind.
    pub fn indented_lines()(widths in prop::collection::vec(0usize..5, 1usize..24)) -> String {
        widths.iter().map(|w| format!("{}x\n", " ".repeat(w * 2))).collect()
    }
}

/// Inserts a single `_` at `at` within a digit-only string.
pub fn insert_underscore(digits: &str, at: usize) -> String {
    let mut out = String::with_capacity(digits.len() + 1);
    out.push_str(&digits[..at]);
    out.push('_');
    out.push_str(&digits[at..]);
    out
}
