use alloc::string::String;
use core::fmt::{self, Display};

/// Position of a node in the source text.
///
/// Besides line and column, a location stores the source text
/// spanned by the node, which is shown by error messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loc {
    pub line: usize,
    pub col: usize,
    pub txt: String,
}

impl Loc {
    pub fn new(line: usize, col: usize, txt: impl Into<String>) -> Self {
        let txt = txt.into();
        Self { line, col, txt }
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
