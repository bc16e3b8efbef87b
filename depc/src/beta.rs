//! Beta-normalization.
//!
//! Beta-normalization substitutes the arguments of
//! immediately invoked lambdas into their bodies,
//! inlines lambdas that do nothing but return an expression, and
//! removes branches of conditionals on constants.
//! For example, `([] (i32_t x) -> i32_t { return x + 1; })(5)` becomes `5 + 1`.
//!
//! All functions return whether they changed anything.
//! Normalization never fails; it assumes that its input is well-typed.

use crate::expr::{App, BoolExpr, Pi};
use crate::module::{Entry, TypeDef};
use crate::visit::MaxIndex;
use crate::{Abs, Body, Expr, ExprValue, FuncArg, Module, Properties, Stmt};
use alloc::vec::Vec;
use core::mem;

fn args_beta<P: Properties>(args: &mut [FuncArg<P>]) -> bool {
    args.iter_mut()
        .filter_map(FuncArg::ty_mut)
        .fold(false, |changed, ty| ty.beta_normalize() | changed)
}

impl<P: Properties> Expr<P> {
    /// Beta-normalize the expression.
    ///
    /// ~~~
    /// # use depc::make::*;
    /// # use depc::Qty;
    /// let x = term_arg(Qty::Many, i32_t(), "x");
    /// let lam = abs(vec![x], i32_t(), vec![ret(plus(var("x"), num(1)))]);
    /// let mut e = app(lam, vec![num(5)]);
    /// assert!(e.beta_normalize());
    /// assert_eq!(e, plus(num(5), num(1)));
    /// assert!(!e.beta_normalize());
    /// ~~~
    pub fn beta_normalize(&mut self) -> bool {
        use ExprValue::*;
        let changed = match &mut self.value {
            Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto
            | Scope => false,
            BoolConst(_) | NumConst(_) | StrLit(_) | Var(_) | Global(_) => false,
            TrueT(e) | AddressOf(e) | Deref(e) | ScopeOf(e) => e.beta_normalize(),
            BoolExpr(self::BoolExpr::Not(e)) => e.beta_normalize(),
            BoolExpr(self::BoolExpr::And(a, b) | self::BoolExpr::Or(a, b))
            | Array { ty: a, size: b }
            | Ref { ty: a, scope: b }
            | Relation { lhs: a, rhs: b, .. }
            | Arith { lhs: a, rhs: b, .. }
            | Subscript {
                object: a,
                index: b,
            }
            | Because {
                value: a,
                reason: b,
            } => a.beta_normalize() | b.beta_normalize(),
            Pi(pi) => pi.beta_normalize(),
            Sigma(sigma) => args_beta(&mut sigma.args),
            App(app) => app.beta_normalize(),
            Abs(abs) => abs.beta_normalize(),
            InitList(xs) => xs.iter_mut().fold(false, |c, x| x.beta_normalize() | c),
            Member { object, .. } => object.beta_normalize(),
        };
        self.inline_return() || changed
    }

    /// Replace a lambda without arguments that is immediately invoked and
    /// consists only of `return e;` by `e`.
    fn inline_return(&mut self) -> bool {
        let ret = match &mut self.value {
            ExprValue::App(app) if app.args.is_empty() => match &mut app.func.value {
                ExprValue::Abs(abs) if abs.args.is_empty() => match abs.body.stmts.as_mut_slice() {
                    [Stmt::Return(ret)] => ret.take(),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        };
        match ret {
            Some(ret) => {
                trace!("beta: inline {}", ret);
                *self = ret;
                true
            }
            None => false,
        }
    }
}

impl<P: Properties> App<P> {
    pub(crate) fn beta_normalize(&mut self) -> bool {
        let mut changed = self.func.beta_normalize();
        for arg in self.args.iter_mut() {
            changed |= arg.beta_normalize()
        }

        if let ExprValue::Abs(abs) = &self.func.value {
            if abs.args.is_empty() {
                return changed;
            }
            debug_assert_eq!(abs.args.len(), self.args.len());
            trace!("beta: {}", self);
        } else {
            return changed;
        }

        // rename the arguments of the lambda such that
        // they cannot capture variables of the actual arguments
        let mut mi = MaxIndex::default();
        self.visit(&mut mi);
        let actuals = mem::take(&mut self.args);

        if let ExprValue::Abs(abs) = &mut self.func.value {
            abs.freshen_args(mi.0.unwrap_or(0));
            let params = mem::take(&mut abs.args);
            for (param, actual) in params.iter().zip(&actuals) {
                if let Some(var) = param.var() {
                    abs.ret_type.substitute(var, actual);
                    abs.body.substitute(var, actual)
                }
            }
            abs.beta_normalize();
        }
        true
    }
}

impl<P: Properties> Abs<P> {
    pub fn beta_normalize(&mut self) -> bool {
        args_beta(&mut self.args) | self.ret_type.beta_normalize() | self.body.beta_normalize()
    }
}

impl<P: Properties> Pi<P> {
    pub fn beta_normalize(&mut self) -> bool {
        args_beta(&mut self.args) | self.ret_type.beta_normalize()
    }
}

impl<P: Properties> Stmt<P> {
    pub fn beta_normalize(&mut self) -> bool {
        match self {
            Self::IfElse(ie) => {
                let fb = ie.false_branch.as_mut().map_or(false, Body::beta_normalize);
                ie.cond.beta_normalize() | ie.true_branch.beta_normalize() | fb
            }
            Self::Return(e) | Self::Impossible(e) => e.as_mut().map_or(false, Expr::beta_normalize),
            Self::App(app) => app.beta_normalize(),
        }
    }
}

impl<P: Properties> Body<P> {
    /// Beta-normalize all statements.
    ///
    /// Conditionals on constants are replaced by the statements of the
    /// branch that is taken, and statements after a `return` are removed.
    pub fn beta_normalize(&mut self) -> bool {
        let mut changed = false;
        let mut stmts = Vec::with_capacity(self.stmts.len());
        let mut iter = mem::take(&mut self.stmts).into_iter();
        while let Some(mut stmt) = iter.next() {
            changed |= stmt.beta_normalize();
            match stmt {
                Stmt::IfElse(ie) if ie.cond.bool_const().is_some() => {
                    trace!("beta: branch on constant {}", ie.cond);
                    changed = true;
                    let taken = match ie.cond.bool_const() {
                        Some(true) => Some(ie.true_branch),
                        _ => ie.false_branch,
                    };
                    if let Some(taken) = taken {
                        stmts.extend(taken.stmts)
                    }
                }
                stmt => stmts.push(stmt),
            }
            if stmts.last().map_or(false, Stmt::terminates) {
                if iter.next().is_some() {
                    trace!("beta: removing unreachable statements");
                    changed = true;
                }
                break;
            }
        }
        self.stmts = stmts;
        changed
    }
}

impl<P: Properties> Module<P> {
    /// Beta-normalize all entries.
    pub fn beta_normalize(&mut self) -> bool {
        self.entries.iter_mut().fold(false, |changed, entry| {
            let c = match entry {
                Entry::TypeDef(TypeDef::Integer(_)) => false,
                Entry::TypeDef(TypeDef::Struct(def)) => {
                    let fields = def.fields.iter_mut();
                    fields.fold(false, |c, (_, ty)| ty.beta_normalize() | c)
                }
                Entry::Axiom(decl) | Entry::Extern(decl) | Entry::FuncDecl(decl) => {
                    decl.pi.beta_normalize()
                }
                Entry::FuncDef(def) => def.abs.beta_normalize(),
            };
            c | changed
        })
    }
}
