//! Common error type.

use crate::Loc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// Diagnostic with an optional source location and nested reasons.
///
/// Errors form a tree: every reason explains why its parent occurred.
/// For example, the failure of two function types to be alpha-equivalent
/// is explained by the failure of their return types to be so.
///
/// ~~~
/// # use depc::{Error, Loc};
/// let loc = Loc::new(3, 5, "x + x");
/// let err = Error::at("Variable has already been used once", Some(&loc))
///     .because(Error::new("`x` is declared with quantity 1"));
/// let expected = "\
/// 3:5: Variable has already been used once
///   | x + x
///   `x` is declared with quantity 1
/// ";
/// assert_eq!(err.to_string(), expected);
/// ~~~
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub msg: String,
    pub loc: Option<Loc>,
    pub reasons: Vec<Error>,
}

impl Error {
    /// Create an error without location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::at(msg, None)
    }

    /// Create an error pointing to the given location.
    pub fn at(msg: impl Into<String>, loc: Option<&Loc>) -> Self {
        Self {
            msg: msg.into(),
            loc: loc.cloned(),
            reasons: Vec::new(),
        }
    }

    /// Attach a reason to the error.
    pub fn because(mut self, reason: Error) -> Self {
        self.reasons.push(reason);
        self
    }

    fn pretty(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        let pad = 2 * depth;
        match &self.loc {
            Some(loc) => writeln!(f, "{:pad$}{}: {}", "", loc, self.msg, pad = pad)?,
            None => writeln!(f, "{:pad$}{}", "", self.msg, pad = pad)?,
        }
        if let Some(loc) = &self.loc {
            for line in loc.txt.lines() {
                writeln!(f, "{:pad$}| {}", "", line, pad = pad + 2)?;
            }
        }
        self.reasons.iter().try_for_each(|r| r.pretty(f, depth + 1))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.pretty(f, 0)
    }
}
