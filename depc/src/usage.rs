//! Usage tracking of variables.
//!
//! Every function argument is declared with a quantity,
//! bounding how often it may be used at run-time.
//! While walking through a function body,
//! we record how often every variable has been used so far, and
//! fail as soon as a variable is used more often than it was declared.
//!
//! Usages are counted per scope:
//! a child scope records only the usages that happened since it was extended,
//! and the total usage of a variable is the sum over all scopes.
//! This allows us to check the branches of a conditional separately and
//! to add their combined usages to the parent scope afterwards.

use crate::expr::{Abs, App, BoolExpr};
use crate::scope_map::Frame;
use crate::{Error, Expr, ExprValue, FuncArg, Global, Loc, Properties, Qty, ScopeMap, Var};
use alloc::vec::Vec;

/// Declared quantities of variables.
pub type Decls<'p> = ScopeMap<'p, Var, Qty>;

/// Accumulated usages of variables.
pub type Usage<'p> = ScopeMap<'p, Var, Qty>;

/// Name of a function that may be called.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Name {
    Local(Var),
    Global(Global),
}

impl Name {
    /// Module-level name, referred to by a variable with index 0.
    pub fn local(name: &str) -> Self {
        Self::Local(Var::new(name, 0))
    }
}

/// Argument quantities of a function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callee {
    pub qtys: Vec<Qty>,
    /// Can the function be called only at compile-time?
    pub erased: bool,
}

impl Callee {
    pub fn new<P: Properties>(args: &[FuncArg<P>], erased: bool) -> Self {
        let qtys = args.iter().map(FuncArg::qty).collect();
        Self { qtys, erased }
    }
}

/// Known functions.
pub type Callees<'p> = ScopeMap<'p, Name, Callee>;

/// Information needed to record usages.
#[derive(Copy, Clone)]
pub struct UsageCtx<'a> {
    pub decls: &'a Decls<'a>,
    pub callees: &'a Callees<'a>,
}

/// Fail if a lambda mentions a variable whose usages would have to be counted.
///
/// Variables declared with quantity many may be used arbitrarily often,
/// so lambdas mentioning only these need no accounting.
fn check_captures<P: Properties>(ctx: UsageCtx, lam: &Abs<P>, loc: Option<&Loc>) -> Result<(), Error> {
    let captured = ctx
        .decls
        .iter()
        .find(|(v, q)| **q != Qty::Many && lam.occurs_free(v));
    match captured {
        Some((v, _)) => {
            let reason = Error::new(alloc::format!("the lambda mentions `{}`", v));
            Err(Error::at(LAMBDA, loc).because(reason))
        }
        None => Ok(()),
    }
}

const LAMBDA: &str = "Adding usages of lambda abstractions is not yet implemented";
const RUNTIME: &str = "Variable cannot be used at run-time";
const NON_LINEAR: &str = "Cannot use linear variable in non-linear context";
const USED_ONCE: &str = "Variable has already been used once";

impl<'p> ScopeMap<'p, Var, Qty> {
    /// Total usage of a variable, summed over all scopes.
    pub fn total(&self, var: &Var) -> Qty {
        self.values(var).fold(Qty::Zero, |acc, q| acc + *q)
    }

    /// Record `mult` usages of a variable declared with quantity `declared`.
    ///
    /// On failure, the usage is not recorded.
    ///
    /// ~~~
    /// # use depc::usage::Usage;
    /// # use depc::{Qty, Var};
    /// let x = Var::new("x", 0);
    /// let mut usage = Usage::new();
    /// assert!(usage.try_add_var(&x, Qty::One, Qty::One, None).is_ok());
    /// let err = usage.try_add_var(&x, Qty::One, Qty::One, None).unwrap_err();
    /// assert_eq!(err.msg, "Variable has already been used once");
    /// assert_eq!(usage.total(&x), Qty::One);
    /// ~~~
    pub fn try_add_var(
        &mut self,
        var: &Var,
        declared: Qty,
        mult: Qty,
        loc: Option<&Loc>,
    ) -> Result<(), Error> {
        if mult == Qty::Zero {
            return Ok(());
        }
        let old = self.total(var);
        if old + mult > declared {
            let msg = match (declared, old) {
                (Qty::Zero, _) => RUNTIME,
                (_, Qty::Zero) => NON_LINEAR,
                _ => USED_ONCE,
            };
            debug!("{} `{}`: used {}, adding {}, declared {}", msg, var, old, mult, declared);
            return Err(Error::at(msg, loc));
        }
        let local = self.local().get(var).copied().unwrap_or(Qty::Zero);
        self.insert(var.clone(), local + mult);
        Ok(())
    }

    /// Record all variable usages of an expression evaluated `mult` times.
    ///
    /// On failure, no usage of the expression is recorded.
    pub fn try_add_expr<P: Properties>(
        &mut self,
        ctx: UsageCtx,
        expr: &Expr<P>,
        mult: Qty,
    ) -> Result<(), Error> {
        self.transaction(|usage| usage.add_expr(ctx, expr, mult))
    }

    /// Record all variable usages of a function call evaluated `mult` times.
    ///
    /// On failure, no usage of the call is recorded.
    pub fn try_add_app<P: Properties>(
        &mut self,
        ctx: UsageCtx,
        app: &App<P>,
        mult: Qty,
        loc: Option<&Loc>,
    ) -> Result<(), Error> {
        self.transaction(|usage| usage.add_app(ctx, app, mult, loc))
    }

    /// Record the usages of another scope.
    ///
    /// On failure, none of the usages are recorded.
    pub fn try_add_usage(
        &mut self,
        ctx: UsageCtx,
        other: &Frame<Var, Qty>,
        loc: Option<&Loc>,
    ) -> Result<(), Error> {
        self.transaction(|usage| {
            other.iter().try_for_each(|(var, q)| match ctx.decls.get(var) {
                Some(declared) => usage.try_add_var(var, *declared, *q, loc),
                None => Ok(()),
            })
        })
    }

    /// Run `f`, restoring the current scope if `f` fails.
    fn transaction<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        let snapshot = self.local().clone();
        let result = f(self);
        if result.is_err() {
            self.set_local(snapshot)
        }
        result
    }

    fn add_expr<P: Properties>(&mut self, ctx: UsageCtx, expr: &Expr<P>, mult: Qty) -> Result<(), Error> {
        use ExprValue::*;
        if mult == Qty::Zero {
            return Ok(());
        }
        match &expr.value {
            // types do not exist at run-time
            Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto
            | Scope => Ok(()),
            TrueT(_) | Array { .. } | Ref { .. } | Pi(_) | Sigma(_) => Ok(()),
            BoolConst(_) | NumConst(_) | StrLit(_) | Global(_) => Ok(()),
            // variables not declared by the function, such as module-level functions
            Var(v) => match ctx.decls.get(v) {
                Some(declared) => self.try_add_var(v, *declared, mult, expr.loc()),
                None => Ok(()),
            },
            BoolExpr(self::BoolExpr::Not(e)) | AddressOf(e) | Deref(e) => self.add_expr(ctx, e, mult),
            BoolExpr(self::BoolExpr::And(l, r) | self::BoolExpr::Or(l, r))
            | Relation { lhs: l, rhs: r, .. }
            | Arith { lhs: l, rhs: r, .. }
            | Subscript {
                object: l,
                index: r,
            } => {
                self.add_expr(ctx, l, mult)?;
                self.add_expr(ctx, r, mult)
            }
            App(app) => self.add_app(ctx, app, mult, expr.loc()),
            Abs(_) => Err(Error::at(LAMBDA, expr.loc())),
            InitList(xs) => xs.iter().try_for_each(|x| self.add_expr(ctx, x, mult)),
            Member { object, .. } => self.add_expr(ctx, object, mult),
            // the scope of an object is a compile-time notion
            ScopeOf(_) => Ok(()),
            // the reason is erased
            Because { value, .. } => self.add_expr(ctx, value, mult),
        }
    }

    fn add_app<P: Properties>(
        &mut self,
        ctx: UsageCtx,
        app: &App<P>,
        mult: Qty,
        loc: Option<&Loc>,
    ) -> Result<(), Error> {
        if mult == Qty::Zero {
            return Ok(());
        }
        let callee = match &app.func.value {
            // immediately invoked lambda
            ExprValue::Abs(abs) => {
                check_captures(ctx, abs, app.func.loc())?;
                Some(Callee::new(&abs.args, false))
            }
            func => {
                self.add_expr(ctx, &app.func, mult)?;
                match func {
                    ExprValue::Var(v) => ctx.callees.get(&Name::Local(v.clone())).cloned(),
                    ExprValue::Global(g) => ctx.callees.get(&Name::Global(g.clone())).cloned(),
                    _ => None,
                }
            }
        };
        let callee = callee.ok_or_else(|| {
            let msg = alloc::format!("Cannot determine the argument quantities of `{}`", app.func);
            Error::at(msg, loc)
        })?;
        if callee.erased {
            let msg = alloc::format!("Function `{}` can only be used at compile-time", app.func);
            return Err(Error::at(msg, loc));
        }
        if callee.qtys.len() != app.args.len() {
            let (expected, found) = (callee.qtys.len(), app.args.len());
            let msg = alloc::format!("Expected {} arguments but found {}", expected, found);
            return Err(Error::at(msg, loc));
        }
        app.args
            .iter()
            .zip(callee.qtys.iter())
            .try_for_each(|(arg, q)| self.add_expr(ctx, arg, mult * *q))
    }
}
