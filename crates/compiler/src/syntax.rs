//! The syntax table is an external collaborator: a priority table of operator
//! spellings and block delimiter pairs owned by the parser. The scanner only
//! ever queries it through the two predicates below.

use std::rc::Rc;

/// Queried by the name/symbol parser to decide whether a normalized name
/// opens a block (and what closes it) and whether a punctuation run is a
/// known operator prefix.
pub trait SyntaxTable {
    /// Returns the required closing name if `name` opens a block.
    fn is_block(&self, name: &str) -> Option<Rc<str>>;

    /// Returns whether `spelling` is a prefix of some known operator. Used to
    /// decide whether a punctuation run should keep extending.
    fn is_operator(&self, spelling: &str) -> bool;
}

/// A syntax table with no known operators or blocks. Binding a scanner to
/// `None` (rather than this) puts it in discovery mode, where symbol runs are
/// consumed greedily instead of being prefix-gated; this type exists for
/// callers that want an explicit, always-empty table instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyTable;

impl SyntaxTable for EmptyTable {
    fn is_block(&self, _name: &str) -> Option<Rc<str>> {
        None
    }

    fn is_operator(&self, _spelling: &str) -> bool {
        false
    }
}

/// A small syntax table backed by explicit lists, useful for tests and for
/// embedding a fixed core grammar (`if`/`then`, `(`/`)`-style block words,
/// etc.) without writing a full parser-owned priority table.
#[derive(Debug, Default)]
pub struct StaticTable {
    blocks: Vec<(String, Rc<str>)>,
    operators: Vec<String>,
}

impl StaticTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, opener: impl Into<String>, closer: impl Into<Rc<str>>) -> Self {
        self.blocks.push((opener.into(), closer.into()));
        self
    }

    pub fn with_operator(mut self, spelling: impl Into<String>) -> Self {
        self.operators.push(spelling.into());
        self
    }
}

impl SyntaxTable for StaticTable {
    fn is_block(&self, name: &str) -> Option<Rc<str>> {
        self.blocks
            .iter()
            .find(|(opener, _)| opener == name)
            .map(|(_, closer)| closer.clone())
    }

    fn is_operator(&self, spelling: &str) -> bool {
        self.operators.iter().any(|op| op.starts_with(spelling))
    }
}
