#![no_main]
use std::cell::RefCell;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use willow_compiler::{CollectingSink, Positions, Scanner};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let positions = Rc::new(RefCell::new(Positions::new()));
        let sink = Box::new(CollectingSink::new());
        let mut scanner = Scanner::new(positions, None, sink);
        if scanner.open_str("<fuzz>", s).is_ok() {
            let _ = scanner.scan_all();
        }
    }
});
