//! Property tests exercising `willow_compiler::Scanner` directly rather than
//! against any fixture file.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use test_strategy::proptest;

use proptests::{base_identifier, base_value, folding_variant, indented_lines, natural_value, to_base_digits};

use willow_compiler::{CollectingSink, Positions, Scanner, TokenKind};

fn scan_one(src: &str) -> willow_compiler::Token {
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, None, sink);
    scanner.open_str("<proptest>", src).unwrap();
    scanner.read()
}

fn scan_all(src: &str) -> Vec<willow_compiler::Token> {
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, None, sink);
    scanner.open_str("<proptest>", src).unwrap();
    scanner.scan_all()
}

#[proptest]
fn round_trips_decimal_naturals(#[strategy(natural_value())] n: u64) {
    let token = scan_one(&n.to_string());
    prop_assert_eq!(token.kind, TokenKind::Natural);
    prop_assert_eq!(token.value.and_then(|v| v.as_natural()), Some(n));
}

#[proptest]
fn round_trips_based_naturals(
    #[strategy(base_value())] base: u32,
    #[strategy(natural_value())] n: u64,
) {
    let src = format!("{base}#{}", to_base_digits(n, base));
    let token = scan_one(&src);
    prop_assert_eq!(token.kind, TokenKind::Natural);
    prop_assert_eq!(token.value.and_then(|v| v.as_natural()), Some(n));
}

#[proptest]
fn underscore_separators_are_transparent(
    #[strategy(1u64..1_000_000_000)] n: u64,
    #[strategy(0usize..8)] at: usize,
) {
    let digits = n.to_string();
    prop_assume!(digits.len() > 1);
    let at = 1 + at % (digits.len() - 1);
    let with_underscore = proptests::insert_underscore(&digits, at);

    let token = scan_one(&with_underscore);
    prop_assert_eq!(token.kind, TokenKind::Natural);
    prop_assert_eq!(token.value.and_then(|v| v.as_natural()), Some(n));
}

#[proptest]
fn indent_and_unindent_counts_balance(#[strategy(indented_lines())] src: String) {
    let tokens = scan_all(&src);
    let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
    let unindents = tokens.iter().filter(|t| t.kind == TokenKind::Unindent).count();
    prop_assert_eq!(indents, unindents);
}

#[proptest]
fn normalization_is_idempotent(#[strategy(base_identifier())] spelling: String) {
    let once = scan_one(&spelling);
    let value = once.value.clone().and_then(|v| v.as_name().map(str::to_owned));
    let value = value.expect("identifier always produces a NAME literal");

    let twice = scan_one(&value);
    let value_again = twice.value.and_then(|v| v.as_name().map(str::to_owned));
    prop_assert_eq!(Some(value), value_again);
}

#[proptest]
fn case_and_underscore_folding_agree(#[strategy(folding_variant())] pair: (String, String)) {
    let (base, variant) = pair;
    let a = scan_one(&base);
    let b = scan_one(&variant);
    prop_assert_eq!(a.kind, TokenKind::Name);
    prop_assert_eq!(b.kind, TokenKind::Name);
    prop_assert_eq!(a.value, b.value);
}
