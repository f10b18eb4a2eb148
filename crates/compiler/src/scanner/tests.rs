// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::CollectingSink;
use crate::positions::Positions;
use crate::syntax::StaticTable;
use crate::value::Literal;

use super::{Scanner, TokenKind};

fn scan(src: &str) -> Vec<(TokenKind, Option<Literal>)> {
    scan_with(src, None)
}

fn scan_with(src: &str, syntax: Option<Rc<dyn crate::syntax::SyntaxTable>>) -> Vec<(TokenKind, Option<Literal>)> {
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, syntax, sink);
    scanner.open_str("<test>", src).unwrap();
    scanner.scan_all().into_iter().map(|t| (t.kind, t.value)).collect()
}

fn name(s: &str) -> Literal {
    Literal::Name(Rc::from(s))
}

#[test]
fn scenario_1_underscore_natural() {
    let tokens = scan("12_345");
    assert_eq!(
        tokens,
        vec![(TokenKind::Natural, Some(Literal::Natural(12345))), (TokenKind::Eof, None)]
    );
}

#[test]
fn scenario_2_based_number_with_exponent() {
    let tokens = scan("16#FF#E2");
    assert_eq!(tokens[0], (TokenKind::Natural, Some(Literal::Natural(65280))));

    let tokens = scan("16#FF#e2");
    assert_eq!(tokens[0], (TokenKind::Natural, Some(Literal::Natural(65280))));
}

#[test]
fn scenario_3_range_vs_fraction() {
    let tokens = scan("1..3");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Natural, Some(Literal::Natural(1))),
            (TokenKind::Symbol, Some(name(".."))),
            (TokenKind::Natural, Some(Literal::Natural(3))),
            (TokenKind::Eof, None),
        ]
    );
}

#[test]
fn scenario_4_blob_literal() {
    let tokens = scan("$16#DEADBEEF$");
    assert_eq!(
        tokens[0],
        (TokenKind::Blob, Some(Literal::Blob(vec![0xDE, 0xAD, 0xBE, 0xEF])))
    );
}

#[test]
fn scenario_5_doubled_quote_text() {
    let tokens = scan("\"hello \"\"world\"\"\"");
    assert_eq!(
        tokens[0],
        (TokenKind::Text, Some(Literal::Text("hello \"world\"".to_string())))
    );
}

#[test]
fn scenario_6_indent_unindent_sequence() {
    let tokens = scan("a\n  b\n  c\nd\n");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Name, Some(name("a"))),
            (TokenKind::Indent, None),
            (TokenKind::Name, Some(name("b"))),
            (TokenKind::Newline, None),
            (TokenKind::Name, Some(name("c"))),
            (TokenKind::Unindent, None),
            (TokenKind::Name, Some(name("d"))),
            (TokenKind::Eof, None),
        ]
    );
}

#[test]
fn scenario_7_block_open_close_vs_concatenated_name() {
    let table: Rc<dyn crate::syntax::SyntaxTable> =
        Rc::new(StaticTable::new().with_block("if", Rc::from("then")));
    let tokens = scan_with("If_Then", Some(table));
    assert_eq!(tokens, vec![(TokenKind::Name, Some(name("ifthen"))), (TokenKind::Eof, None)]);
}

#[test]
fn scenario_7b_block_open_and_close_when_separate() {
    let table: Rc<dyn crate::syntax::SyntaxTable> =
        Rc::new(StaticTable::new().with_block("if", Rc::from("then")));
    let tokens = scan_with("If Then", Some(table));
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Open, Some(name("if"))),
            (TokenKind::Close, Some(name("then"))),
            (TokenKind::Eof, None),
        ]
    );
}

#[test]
fn scenario_8_float_exponent() {
    let tokens = scan("3.14e-2");
    match &tokens[0] {
        (TokenKind::Real, Some(Literal::Real(v))) => {
            assert!((v - 0.0314).abs() < 1e-12);
        }
        other => panic!("expected REAL(0.0314), got {other:?}"),
    }
}

#[test]
fn mixed_indentation_does_not_abort_scanning() {
    let tokens = scan("a\n\t b\n");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds.first(), Some(&TokenKind::Name));
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
}

#[test]
fn unindent_past_previous_emits_error_token() {
    // Three nested levels (0, 2, 4), then a dedent straight to column 1 skips
    // past the level at column 2 without ever matching it.
    let tokens = scan("a\n  b\n    c\n      d\n e\n");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert!(kinds.contains(&TokenKind::Error));
}

#[test]
fn invalid_base_clamps_to_36() {
    let tokens = scan("99#z#");
    assert_eq!(tokens[0].0, TokenKind::Natural);
}

#[test]
fn double_underscore_is_reported_but_recoverable() {
    let tokens = scan("1__2");
    assert_eq!(tokens[0], (TokenKind::Natural, Some(Literal::Natural(12))));
}

#[test]
fn unterminated_text_synthesizes_close() {
    let tokens = scan("\"hello");
    assert_eq!(tokens[0].0, TokenKind::Text);
    match &tokens[0].1 {
        Some(Literal::Text(s)) => assert_eq!(s, "hello"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bad_character_constant_is_reported() {
    let tokens = scan("'ab'");
    assert_eq!(tokens[0].0, TokenKind::Character);
}

#[test]
fn valid_character_literal() {
    let tokens = scan("'x'");
    assert_eq!(tokens[0], (TokenKind::Character, Some(Literal::Character('x'))));
}

#[test]
fn normalization_strips_underscore_and_folds_case() {
    let a = scan("If_Then");
    let b = scan("ifthen");
    assert_eq!(a[0].1, b[0].1);
}

#[test]
fn skip_until_elides_indentation_and_excludes_delimiter() {
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, None, sink);
    scanner.open_str("<test>", "a\n  one\n  two\nEND").unwrap();
    assert_eq!(scanner.read().kind, TokenKind::Name);
    assert_eq!(scanner.read().kind, TokenKind::Indent);
    let text = scanner.skip_until("END");
    assert_eq!(text, "one\ntwo\n");
}

#[test]
fn skip_until_matches_overlapping_delimiter() {
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, None, sink);
    scanner.open_str("<test>", "a***/rest").unwrap();
    let text = scanner.skip_until("*/");
    assert_eq!(text, "a**");
}

#[test]
fn paren_hooks_suspend_and_restore_indentation() {
    // The closing `)` sits at the same column as its content, so nothing
    // naturally unwinds the level `open_paren` deferred; `close_paren` must
    // pop it itself.
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, None, sink);
    scanner.open_str("<test>", "a(\n  b\n  )\nc").unwrap();

    assert_eq!(scanner.read().kind, TokenKind::Name);
    assert_eq!(scanner.read().kind, TokenKind::Symbol);
    let saved = scanner.open_paren();
    assert_eq!(scanner.read().kind, TokenKind::Newline);
    assert_eq!(scanner.read().kind, TokenKind::Name);
    assert_eq!(scanner.read().kind, TokenKind::Newline);
    assert_eq!(scanner.read().kind, TokenKind::Symbol);
    scanner.close_paren(saved);

    // The indent level opened inside the parenthesis is gone: the next
    // newline at column 0 is a plain NEWLINE, not an UNINDENT.
    assert_eq!(scanner.read().kind, TokenKind::Newline);
    let after = scanner.read();
    assert_eq!(after.kind, TokenKind::Name);
    assert_eq!(after.value, Some(name("c")));
}

#[test]
fn token_spans_count_each_source_byte_once() {
    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let mut scanner = Scanner::new(positions, None, sink);
    scanner.open_str("<test>", "ab cd").unwrap();

    let first = scanner.read();
    assert_eq!(first.kind, TokenKind::Name);
    assert_eq!(first.span.start, 0);
    assert_eq!(first.span.end, 2);

    let second = scanner.read();
    assert_eq!(second.kind, TokenKind::Name);
    assert_eq!(second.span.start, 3);
    assert_eq!(second.span.end, 5);
}

#[test]
fn is_valid_name_accepts_trailing_underscore_but_not_doubled() {
    assert!(super::is_valid_name("foo_"));
    assert!(!super::is_valid_name("fo__o"));
    assert!(super::is_valid_name("foo"));
    assert!(super::is_valid_name("+"));
    assert!(super::is_valid_name("\n"));
    assert!(!super::is_valid_name(""));
}
