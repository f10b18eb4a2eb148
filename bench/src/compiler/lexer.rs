use std::cell::RefCell;
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use willow_compiler::{CollectingSink, Positions, Scanner};

const SAMPLE: &str = "\
module
  value = 16#FF#E2
  blob = $16#DEADBEEF$
  text = \"hello \"\"world\"\"\"
  if_then = If_Then
  ratio = 1..3
";

fn tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter_batched(
            || SAMPLE,
            |code| {
                let positions = Rc::new(RefCell::new(Positions::new()));
                let sink = Box::new(CollectingSink::new());
                let mut scanner = Scanner::new(positions, None, sink);
                scanner.open_str("<bench>", code).unwrap();
                scanner.scan_all()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, tokenize);

criterion_main!(benches);
