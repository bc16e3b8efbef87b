//! Scope inference for reference types.
//!
//! Every object lives in a scope, and a reference to an object
//! must not outlive the scope of that object.
//! Scopes are numbered such that inner scopes have larger numbers;
//! the scope `0` is the global scope.
//! The maximal scope of an expression is
//! the innermost scope of any variable it mentions, and
//! thus determines how long the value of the expression may be referenced.

use crate::expr::BoolExpr;
use crate::{Error, Expr, ExprValue, FuncArg, Properties, ScopeMap, Var};
use alloc::format;

/// Number identifying a scope.
pub type ScopeId = usize;

/// Scopes of variables and of the code currently being inspected.
#[derive(Clone, Debug, Default)]
pub struct ScopeCtx<'p> {
    /// scope of every variable, where `None` means
    /// that the variable is not associated with a scope
    pub vars: ScopeMap<'p, Var, Option<ScopeId>>,
    /// scope of the code currently being inspected, if any
    pub current: Option<ScopeId>,
}

impl<'p> ScopeCtx<'p> {
    pub fn new(current: Option<ScopeId>) -> Self {
        let vars = ScopeMap::new();
        Self { vars, current }
    }

    /// Create a child context with the same current scope.
    pub fn extend(&self) -> ScopeCtx<'_> {
        ScopeCtx {
            vars: self.vars.extend(),
            current: self.current,
        }
    }

    /// Associate a variable with a scope.
    pub fn bind(&mut self, var: Var, scope: Option<ScopeId>) {
        self.vars.insert(var, scope);
    }
}

/// Combine the maximal scopes of two expressions.
///
/// The result is the larger scope, or the first error.
pub fn max_scope_combine(
    a: Result<ScopeId, Error>,
    b: Result<ScopeId, Error>,
) -> Result<ScopeId, Error> {
    Ok(a?.max(b?))
}

/// Maximal scope of the types in a telescope and of the expression it binds in.
///
/// Arguments are bound to the global scope.
fn binder_scope<P: Properties>(
    ctx: &ScopeCtx,
    args: &[FuncArg<P>],
    ret: Option<&Expr<P>>,
) -> Result<ScopeId, Error> {
    let mut inner = ctx.extend();
    let mut acc = Ok(0);
    for arg in args {
        if let Some(ty) = arg.ty() {
            acc = max_scope_combine(acc, max_scope(&inner, ty));
        }
        if let Some(var) = arg.var() {
            inner.bind(var.clone(), Some(0));
        }
    }
    match ret {
        Some(ret) => max_scope_combine(acc, max_scope(&inner, ret)),
        None => acc,
    }
}

/// Compute the maximal scope of an expression.
///
/// ~~~
/// # use depc::max_scope::{max_scope, ScopeCtx};
/// # use depc::make::*;
/// # use depc::Var;
/// let mut ctx = ScopeCtx::new(Some(3));
/// ctx.bind(Var::new("x", 0), Some(1));
/// ctx.bind(Var::new("y", 0), Some(2));
///
/// assert_eq!(max_scope(&ctx, &num(42)), Ok(0));
/// assert_eq!(max_scope(&ctx, &plus(var("x"), var("y"))), Ok(2));
/// assert_eq!(max_scope(&ctx, &app(var("f"), vec![])), Ok(3));
/// assert!(max_scope(&ctx, &var("z")).is_err());
/// ~~~
pub fn max_scope<P: Properties>(ctx: &ScopeCtx, expr: &Expr<P>) -> Result<ScopeId, Error> {
    use ExprValue::*;
    let loc = expr.loc();
    match &expr.value {
        Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto | Scope => {
            Ok(0)
        }
        BoolConst(_) | NumConst(_) | StrLit(_) | Global(_) => Ok(0),
        Var(v) => match ctx.vars.get(v) {
            Some(Some(scope)) => Ok(*scope),
            Some(None) => {
                let msg = format!("Variable `{}` is not associated with any scope", v);
                Err(Error::at(msg, loc))
            }
            None => Err(Error::at(format!("Unbound variable `{}`", v), loc)),
        },
        // the result of a call lives in the scope of the caller
        App(_) => ctx.current.ok_or_else(|| {
            let msg = "Cannot determine the scope of a function call outside of any scope";
            Error::at(msg, loc)
        }),
        TrueT(e) | AddressOf(e) | Deref(e) | ScopeOf(e) | Member { object: e, .. } => max_scope(ctx, e),
        BoolExpr(self::BoolExpr::Not(e)) => max_scope(ctx, e),
        BoolExpr(self::BoolExpr::And(a, b) | self::BoolExpr::Or(a, b))
        | Array { ty: a, size: b }
        | Ref { ty: a, scope: b }
        | Relation { lhs: a, rhs: b, .. }
        | Arith { lhs: a, rhs: b, .. }
        | Subscript {
            object: a,
            index: b,
        } => max_scope_combine(max_scope(ctx, a), max_scope(ctx, b)),
        // the reason does not exist at run-time
        Because { value, .. } => max_scope(ctx, value),
        InitList(xs) => xs.iter().map(|x| max_scope(ctx, x)).fold(Ok(0), max_scope_combine),
        Pi(pi) => binder_scope(ctx, &pi.args, Some(&pi.ret_type)),
        Sigma(sigma) => binder_scope(ctx, &sigma.args, None),
        Abs(abs) => binder_scope(ctx, &abs.args, Some(&abs.ret_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make::*;
    use crate::Qty;
    use alloc::vec;

    #[test]
    fn unscoped() {
        let mut ctx = ScopeCtx::new(None);
        ctx.bind(Var::new("s", 0), None);
        assert!(max_scope(&ctx, &app(var("f"), vec![])).is_err());
        let err = max_scope(&ctx, &scope_of(var("s"))).unwrap_err();
        assert_eq!(err.msg, "Variable `s` is not associated with any scope");
    }

    #[test]
    fn first_error() {
        let ctx = ScopeCtx::new(Some(1));
        let e = init_list(vec![num(0), var("a"), var("b")]);
        assert_eq!(max_scope(&ctx, &e).unwrap_err().msg, "Unbound variable `a`");
    }

    #[test]
    fn binders() {
        let mut ctx = ScopeCtx::new(Some(1));
        ctx.bind(Var::new("n", 0), Some(2));
        // (i32_t x, array_t(i32_t, x) a) -> array_t(i32_t, n)
        let args = vec![
            term_arg(Qty::Many, i32_t(), "x"),
            term_arg(Qty::Many, array_t(i32_t(), var("x")), "a"),
        ];
        assert_eq!(max_scope(&ctx, &pi(args.clone(), i32_t())), Ok(0));
        assert_eq!(max_scope(&ctx, &pi(args, array_t(i32_t(), var("n")))), Ok(2));
        // the argument is not visible outside of the binder
        assert!(max_scope(&ctx, &var("x")).is_err());
    }
}
