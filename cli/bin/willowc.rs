// Copyright 2022 the Gigamono authors. All rights reserved. GPL-3.0 License.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use willow_compiler::syntax::EmptyTable;
use willow_compiler::{CollectingSink, Positions, Scanner, TokenKind};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
    /// Source file to scan.
    path: String,

    /// Scan without a bound syntax table: symbol runs are consumed greedily
    /// instead of being gated by a known operator prefix.
    #[clap(long)]
    discovery: bool,

    /// Columns a tab counts for while measuring indentation.
    #[clap(long, default_value_t = 1)]
    tab_width: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path))?;

    let positions = Rc::new(RefCell::new(Positions::new()));
    let sink = Box::new(CollectingSink::new());
    let syntax = if args.discovery {
        None
    } else {
        Some(Rc::new(EmptyTable) as Rc<dyn willow_compiler::syntax::SyntaxTable>)
    };
    let mut scanner = Scanner::new(positions, syntax, sink);
    scanner.set_tab_width(args.tab_width);
    scanner.open_str(args.path.as_str(), content)?;

    for token in scanner.scan_all() {
        match &token.value {
            Some(value) => println!("{:?} {:?} {:?}", token.kind, token.span, value),
            None => println!("{:?} {:?}", token.kind, token.span),
        }
        if token.kind == TokenKind::Eof {
            break;
        }
    }

    Ok(())
}
