use crate::{Expr, Properties, Var};
use core::ops::{Add, Mul};

/// How often a function argument may be used at run-time.
///
/// Quantities form a semiring, where
/// addition accumulates usages and
/// multiplication scales usages by the quantity of the surrounding context.
/// They are ordered by `Zero < One < Many`.
///
/// ~~~
/// # use depc::Qty::*;
/// assert_eq!(One + One, Many);
/// assert_eq!(Zero + One, One);
/// assert_eq!(Zero * Many, Zero);
/// assert_eq!(One * Many, Many);
/// assert!(One < Many);
/// ~~~
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qty {
    Zero,
    One,
    Many,
}

impl Add for Qty {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Zero, q) | (q, Self::Zero) => q,
            _ => Self::Many,
        }
    }
}

impl Mul for Qty {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Zero, _) | (_, Self::Zero) => Self::Zero,
            (Self::One, q) | (q, Self::One) => q,
            _ => Self::Many,
        }
    }
}

/// Argument binding a type, such as `typename t`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeArg {
    pub var: Option<Var>,
}

/// Argument binding a term, such as `1 i32_t x`.
#[derive(Clone, Debug, PartialEq)]
pub struct TermArg<P: Properties> {
    pub qty: Qty,
    pub ty: Expr<P>,
    pub var: Option<Var>,
}

/// Argument of a binder.
/// For example, the `typename t` and `t x` in the type `(typename t, t x) -> t`.
#[derive(Clone, Debug, PartialEq)]
pub enum FuncArg<P: Properties> {
    Type(TypeArg),
    Term(TermArg<P>),
}

impl<P: Properties> FuncArg<P> {
    /// Variable bound by the argument, if it is named.
    pub fn var(&self) -> Option<&Var> {
        match self {
            Self::Type(arg) => arg.var.as_ref(),
            Self::Term(arg) => arg.var.as_ref(),
        }
    }

    pub(crate) fn var_mut(&mut self) -> &mut Option<Var> {
        match self {
            Self::Type(arg) => &mut arg.var,
            Self::Term(arg) => &mut arg.var,
        }
    }

    /// Return true if the argument binds the given variable.
    pub fn binds(&self, var: &Var) -> bool {
        self.var() == Some(var)
    }

    /// Quantity of the argument, where type arguments are always erased.
    pub fn qty(&self) -> Qty {
        match self {
            Self::Type(_) => Qty::Zero,
            Self::Term(arg) => arg.qty,
        }
    }

    /// Type of a term argument.
    pub fn ty(&self) -> Option<&Expr<P>> {
        match self {
            Self::Type(_) => None,
            Self::Term(arg) => Some(&arg.ty),
        }
    }

    pub(crate) fn ty_mut(&mut self) -> Option<&mut Expr<P>> {
        match self {
            Self::Type(_) => None,
            Self::Term(arg) => Some(&mut arg.ty),
        }
    }
}
