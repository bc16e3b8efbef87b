//! Delta-reduction, replacing references to functions by their definitions.

use crate::expr::{App, BoolExpr, Pi};
use crate::{Abs, Body, Expr, ExprValue, FuncArg, Properties, ScopeMap, Stmt, Var};

/// What is known about a variable during delta-reduction.
#[derive(Clone, Debug)]
pub enum Delta<P: Properties> {
    /// the variable refers to a function with the given definition
    Abs(Abs<P>),
    /// the variable must not be replaced,
    /// for example because it is a function argument or a recursive function
    SomethingElse,
}

/// Definitions of variables in scope.
pub type DeltaCtx<'p, P> = ScopeMap<'p, Var, Delta<P>>;

/// Delta-reduce the first argument type that can be reduced, or
/// else the scope of the arguments, computed by `rest`.
///
/// Each argument shadows the variable it binds for the subsequent arguments.
fn delta_scope<P, F>(args: &mut [FuncArg<P>], ctx: &DeltaCtx<P>, rest: F) -> bool
where
    P: Properties,
    F: FnOnce(&DeltaCtx<P>) -> bool,
{
    let mut inner = ctx.extend();
    for arg in args.iter_mut() {
        if let Some(ty) = arg.ty_mut() {
            if ty.delta_reduce(&inner) {
                return true;
            }
        }
        if let Some(var) = arg.var() {
            inner.insert(var.clone(), Delta::SomethingElse);
        }
    }
    rest(&inner)
}

impl<P: Properties> Expr<P> {
    /// Replace the first reference to a known function by its definition.
    ///
    /// Return true if a reference was replaced.
    ///
    /// ~~~
    /// # use depc::delta::{Delta, DeltaCtx};
    /// # use depc::make::*;
    /// # use depc::Var;
    /// let f = abs_def(vec![], i32_t(), vec![ret(num(1))]);
    /// let mut ctx = DeltaCtx::new();
    /// ctx.insert(Var::new("f", 0), Delta::Abs(f.clone()));
    ///
    /// let mut e = plus(app(var("f"), vec![]), app(var("f"), vec![]));
    /// assert!(e.delta_reduce(&ctx));
    /// let f = abs(vec![], i32_t(), vec![ret(num(1))]);
    /// assert_eq!(e, plus(app(f, vec![]), app(var("f"), vec![])));
    /// ~~~
    pub fn delta_reduce(&mut self, ctx: &DeltaCtx<P>) -> bool {
        use ExprValue::*;
        if let Some(Delta::Abs(abs)) = self.get_var().and_then(|v| ctx.get(v)) {
            trace!("delta: unfold {}", self);
            self.value = Abs(abs.clone());
            return true;
        }
        match &mut self.value {
            Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto
            | Scope => false,
            BoolConst(_) | NumConst(_) | StrLit(_) | Var(_) | Global(_) => false,
            TrueT(e) | AddressOf(e) | Deref(e) | ScopeOf(e) => e.delta_reduce(ctx),
            BoolExpr(self::BoolExpr::Not(e)) => e.delta_reduce(ctx),
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
            } => a.delta_reduce(ctx) || b.delta_reduce(ctx),
            Pi(pi) => pi.delta_reduce(ctx),
            Sigma(sigma) => delta_scope(&mut sigma.args, ctx, |_| false),
            App(app) => app.delta_reduce(ctx),
            Abs(abs) => abs.delta_reduce(ctx),
            InitList(xs) => xs.iter_mut().any(|x| x.delta_reduce(ctx)),
            Member { object, .. } => object.delta_reduce(ctx),
        }
    }
}

impl<P: Properties> App<P> {
    fn delta_reduce(&mut self, ctx: &DeltaCtx<P>) -> bool {
        self.func.delta_reduce(ctx) || self.args.iter_mut().any(|arg| arg.delta_reduce(ctx))
    }
}

impl<P: Properties> Pi<P> {
    pub fn delta_reduce(&mut self, ctx: &DeltaCtx<P>) -> bool {
        let ret_type = &mut self.ret_type;
        delta_scope(&mut self.args, ctx, |ctx| ret_type.delta_reduce(ctx))
    }
}

impl<P: Properties> Abs<P> {
    pub fn delta_reduce(&mut self, ctx: &DeltaCtx<P>) -> bool {
        let (ret_type, body) = (&mut self.ret_type, &mut self.body);
        delta_scope(&mut self.args, ctx, |ctx| {
            ret_type.delta_reduce(ctx) || body.delta_reduce(ctx)
        })
    }
}

impl<P: Properties> Stmt<P> {
    pub fn delta_reduce(&mut self, ctx: &DeltaCtx<P>) -> bool {
        match self {
            Self::IfElse(ie) => {
                ie.cond.delta_reduce(ctx)
                    || ie.true_branch.delta_reduce(ctx)
                    || ie.false_branch.as_mut().map_or(false, |fb| fb.delta_reduce(ctx))
            }
            Self::Return(e) | Self::Impossible(e) => e.as_mut().map_or(false, |e| e.delta_reduce(ctx)),
            Self::App(app) => app.delta_reduce(ctx),
        }
    }
}

impl<P: Properties> Body<P> {
    pub fn delta_reduce(&mut self, ctx: &DeltaCtx<P>) -> bool {
        self.stmts.iter_mut().any(|stmt| stmt.delta_reduce(ctx))
    }
}
