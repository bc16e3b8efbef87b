//! Expressions of DepC.
//!
//! In DepC, types are expressions, too.
//! For example, `array_t(i32_t, n)` is the type of arrays of length `n`, and
//! `(typename t, t x) -> t` is the type of the polymorphic identity function.

use crate::{Body, FuncArg, Loc, Parsed, Properties};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Variable, identified by its name together with an index.
///
/// Two variables are the same if and only if
/// both their names and their indices coincide.
/// The index is used to create variables that are guaranteed to be fresh,
/// without having to invent new names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var {
    pub name: String,
    pub idx: usize,
}

impl Var {
    pub fn new(name: impl Into<String>, idx: usize) -> Self {
        let name = name.into();
        Self { name, idx }
    }

    /// Variable with the same name, but a different index.
    pub fn with_idx(&self, idx: usize) -> Self {
        Self::new(self.name.clone(), idx)
    }
}

/// Name defined at module level, possibly qualified by a module name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Global {
    pub module: Option<String>,
    pub name: String,
}

/// Boolean operators.
#[derive(Clone, Debug, PartialEq)]
pub enum BoolExpr<P: Properties> {
    Not(Box<Expr<P>>),
    And(Box<Expr<P>>, Box<Expr<P>>),
    Or(Box<Expr<P>>, Box<Expr<P>>),
}

/// Comparison operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelationOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Arithmetic operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Minus,
    Mult,
    Div,
}

/// Application of a function to arguments, such as `f(x, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct App<P: Properties> {
    pub func: Box<Expr<P>>,
    pub args: Vec<Expr<P>>,
}

/// Lambda abstraction, such as `[] (i32_t x) -> i32_t { return x; }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Abs<P: Properties> {
    pub args: Vec<FuncArg<P>>,
    pub is_mutable: bool,
    pub ret_type: Box<Expr<P>>,
    pub body: Body<P>,
}

/// Dependent function type, such as `(typename t, t x) -> t`.
#[derive(Clone, Debug, PartialEq)]
pub struct Pi<P: Properties> {
    pub args: Vec<FuncArg<P>>,
    pub is_mutable: bool,
    pub ret_type: Box<Expr<P>>,
}

/// Dependent pair type.
#[derive(Clone, Debug, PartialEq)]
pub struct Sigma<P: Properties> {
    pub args: Vec<FuncArg<P>>,
}

/// Value of an expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprValue<P: Properties> {
    /// the type of types
    Typename,
    Bool,
    Unit,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Cstr,
    /// type to be inferred
    Auto,
    /// type of a proof that the given boolean expression holds
    TrueT(Box<Expr<P>>),
    /// the type of scopes
    Scope,
    Array {
        ty: Box<Expr<P>>,
        size: Box<Expr<P>>,
    },
    /// reference into a scope
    Ref {
        ty: Box<Expr<P>>,
        scope: Box<Expr<P>>,
    },
    Pi(Pi<P>),
    Sigma(Sigma<P>),

    BoolConst(bool),
    NumConst(u64),
    StrLit(String),

    BoolExpr(BoolExpr<P>),
    Relation {
        op: RelationOp,
        lhs: Box<Expr<P>>,
        rhs: Box<Expr<P>>,
    },
    Arith {
        op: ArithOp,
        lhs: Box<Expr<P>>,
        rhs: Box<Expr<P>>,
    },

    Var(Var),
    Global(Global),
    App(App<P>),
    Abs(Abs<P>),

    InitList(Vec<Expr<P>>),
    Member {
        object: Box<Expr<P>>,
        field: String,
    },
    Subscript {
        object: Box<Expr<P>>,
        index: Box<Expr<P>>,
    },
    AddressOf(Box<Expr<P>>),
    Deref(Box<Expr<P>>),
    ScopeOf(Box<Expr<P>>),

    /// `value because reason`, where only `value` exists at run-time
    Because {
        value: Box<Expr<P>>,
        reason: Box<Expr<P>>,
    },
}

impl<P: Properties> ExprValue<P> {
    /// Return true for type formers without subexpressions, such as `i32_t`.
    pub fn is_nullary_type(&self) -> bool {
        use ExprValue::*;
        matches!(
            self,
            Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto | Scope
        )
    }
}

/// Expression node, consisting of a value and annotations.
///
/// Equality of expressions compares only values and disregards annotations.
#[derive(Clone, Debug)]
pub struct Expr<P: Properties> {
    pub value: ExprValue<P>,
    pub props: P::Expr,
}

impl<P: Properties> PartialEq for Expr<P> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<P: Properties> Expr<P> {
    pub fn new(value: ExprValue<P>, props: P::Expr) -> Self {
        Self { value, props }
    }

    pub fn loc(&self) -> Option<&Loc> {
        P::loc(&self.props)
    }

    pub fn get_var(&self) -> Option<&Var> {
        match &self.value {
            ExprValue::Var(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_abs(&self) -> Option<&Abs<P>> {
        match &self.value {
            ExprValue::Abs(abs) => Some(abs),
            _ => None,
        }
    }

    /// Value of a boolean constant.
    pub fn bool_const(&self) -> Option<bool> {
        match self.value {
            ExprValue::BoolConst(b) => Some(b),
            _ => None,
        }
    }
}

impl From<ExprValue<Parsed>> for Expr<Parsed> {
    fn from(value: ExprValue<Parsed>) -> Self {
        Self::new(value, None)
    }
}

impl<P: Properties> From<Abs<P>> for Pi<P> {
    fn from(abs: Abs<P>) -> Self {
        Self {
            args: abs.args,
            is_mutable: abs.is_mutable,
            ret_type: abs.ret_type,
        }
    }
}
