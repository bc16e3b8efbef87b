//! Statements of function bodies.

use crate::expr::App;
use crate::{Expr, Properties};
use alloc::vec::Vec;

/// Sequence of statements, such as the body of a function.
#[derive(Clone, Debug, PartialEq)]
pub struct Body<P: Properties> {
    pub stmts: Vec<Stmt<P>>,
}

/// Conditional statement with optional `else` branch.
#[derive(Clone, Debug, PartialEq)]
pub struct IfElse<P: Properties> {
    pub cond: Expr<P>,
    pub true_branch: Body<P>,
    pub false_branch: Option<Body<P>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt<P: Properties> {
    IfElse(IfElse<P>),
    /// `return;` or `return e;`
    Return(Option<Expr<P>>),
    /// `impossible;` or `impossible because e;`, marking unreachable code
    Impossible(Option<Expr<P>>),
    /// function call whose result is discarded
    App(App<P>),
}

impl<P: Properties> Stmt<P> {
    /// Return true if no statement following this one can be reached.
    pub fn terminates(&self) -> bool {
        matches!(self, Self::Return(_) | Self::Impossible(_))
    }

    /// Return true if every execution path through the statement terminates.
    pub fn always_terminates(&self) -> bool {
        match self {
            Self::IfElse(ie) => match &ie.false_branch {
                Some(fb) => ie.true_branch.always_terminates() && fb.always_terminates(),
                None => false,
            },
            stmt => stmt.terminates(),
        }
    }
}

impl<P: Properties> Body<P> {
    pub fn new(stmts: Vec<Stmt<P>>) -> Self {
        Self { stmts }
    }

    /// Return true if every execution path through the body terminates.
    pub fn always_terminates(&self) -> bool {
        self.stmts.iter().any(Stmt::always_terminates)
    }
}

impl<P: Properties> Default for Body<P> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
