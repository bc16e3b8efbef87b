//! Substitution and renaming of variables.
//!
//! Substitution stops at binders that rebind the substituted variable,
//! that is, at arguments binding a variable with the same name and index.
//! Argument types preceding such a binder are still substituted.

use crate::expr::{Abs, App, Pi};
use crate::stmt::IfElse;
use crate::{Body, Expr, ExprValue, FuncArg, Properties, Stmt, Var};

type Subst<'a, P> = dyn FnMut(&mut Expr<P>) + 'a;

/// Apply `f` to the argument types of a telescope, stopping after a binder of `var`.
///
/// Return true if the scope after the arguments is reached,
/// meaning that no argument rebinds `var`.
pub(crate) fn subst_args<P: Properties>(
    args: &mut [FuncArg<P>],
    var: &Var,
    f: &mut Subst<P>,
) -> bool {
    for arg in args {
        if let Some(ty) = arg.ty_mut() {
            ty.subst_with(var, f)
        }
        if arg.binds(var) {
            return false;
        }
    }
    true
}

impl<P: Properties> Expr<P> {
    /// Replace all free occurrences of `var` by `with`.
    ///
    /// ~~~
    /// # use depc::make::*;
    /// # use depc::{Qty, Var};
    /// let x = Var::new("x", 0);
    /// let mut e = plus(var("x"), var("y"));
    /// e.substitute(&x, &num(1));
    /// assert_eq!(e, plus(num(1), var("y")));
    ///
    /// // the lambda rebinds `x`
    /// let lam = |b| abs(vec![term_arg(Qty::Many, i32_t(), "x")], i32_t(), vec![ret(b)]);
    /// let mut e = lam(var("x"));
    /// e.substitute(&x, &num(1));
    /// assert_eq!(e, lam(var("x")));
    /// ~~~
    pub fn substitute(&mut self, var: &Var, with: &Expr<P>) {
        self.subst_with(var, &mut |e: &mut Expr<P>| *e = with.clone())
    }

    /// Rename all free occurrences of `from` to `to`.
    ///
    /// In contrast to substitution, renaming keeps the annotations of
    /// the renamed variable nodes.
    pub fn replace(&mut self, from: &Var, to: &Var) {
        self.subst_with(from, &mut |e: &mut Expr<P>| e.value = ExprValue::Var(to.clone()))
    }

    /// Apply `f` to all free occurrences of `var`.
    pub(crate) fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        use ExprValue::*;
        if self.get_var() == Some(var) {
            return f(self);
        }
        match &mut self.value {
            Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto
            | Scope => {}
            BoolConst(_) | NumConst(_) | StrLit(_) | Var(_) | Global(_) => {}
            TrueT(e) | AddressOf(e) | Deref(e) | ScopeOf(e) => e.subst_with(var, f),
            Array { ty: a, size: b }
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
            } => {
                a.subst_with(var, f);
                b.subst_with(var, f)
            }
            BoolExpr(b) => match b {
                crate::expr::BoolExpr::Not(e) => e.subst_with(var, f),
                crate::expr::BoolExpr::And(l, r) | crate::expr::BoolExpr::Or(l, r) => {
                    l.subst_with(var, f);
                    r.subst_with(var, f)
                }
            },
            Pi(pi) => pi.subst_with(var, f),
            Sigma(sigma) => {
                subst_args(&mut sigma.args, var, f);
            }
            App(app) => app.subst_with(var, f),
            Abs(abs) => abs.subst_with(var, f),
            InitList(xs) => xs.iter_mut().for_each(|x| x.subst_with(var, f)),
            Member { object, .. } => object.subst_with(var, f),
        }
    }
}

impl<P: Properties> App<P> {
    pub(crate) fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        self.func.subst_with(var, f);
        self.args.iter_mut().for_each(|arg| arg.subst_with(var, f))
    }
}

impl<P: Properties> Pi<P> {
    pub(crate) fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        if subst_args(&mut self.args, var, f) {
            self.ret_type.subst_with(var, f)
        }
    }
}

impl<P: Properties> Abs<P> {
    pub(crate) fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        if subst_args(&mut self.args, var, f) {
            self.ret_type.subst_with(var, f);
            self.body.subst_with(var, f)
        }
    }

    /// Rename the arguments of the abstraction to variables
    /// with indices strictly greater than `idx`.
    pub(crate) fn freshen_args(&mut self, idx: usize) {
        let mut fresh = idx;
        for i in 0..self.args.len() {
            let var = match self.args[i].var() {
                Some(var) => var.clone(),
                None => continue,
            };
            fresh += 1;
            let to = var.with_idx(fresh);
            let mut f = |e: &mut Expr<P>| e.value = ExprValue::Var(to.clone());
            if subst_args(&mut self.args[i + 1..], &var, &mut f) {
                self.ret_type.subst_with(&var, &mut f);
                self.body.subst_with(&var, &mut f)
            }
            *self.args[i].var_mut() = Some(to);
        }
    }
}

impl<P: Properties> IfElse<P> {
    fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        self.cond.subst_with(var, f);
        self.true_branch.subst_with(var, f);
        if let Some(fb) = &mut self.false_branch {
            fb.subst_with(var, f)
        }
    }
}

impl<P: Properties> FuncArg<P> {
    /// Replace all occurrences of `var` in the type of the argument by `with`.
    pub fn substitute(&mut self, var: &Var, with: &Expr<P>) {
        if let Some(ty) = self.ty_mut() {
            ty.substitute(var, with)
        }
    }

    /// Rename all occurrences of `from` in the type of the argument to `to`.
    pub fn replace(&mut self, from: &Var, to: &Var) {
        if let Some(ty) = self.ty_mut() {
            ty.replace(from, to)
        }
    }
}

impl<P: Properties> Stmt<P> {
    pub fn substitute(&mut self, var: &Var, with: &Expr<P>) {
        self.subst_with(var, &mut |e: &mut Expr<P>| *e = with.clone())
    }

    pub fn replace(&mut self, from: &Var, to: &Var) {
        self.subst_with(from, &mut |e: &mut Expr<P>| e.value = ExprValue::Var(to.clone()))
    }

    pub(crate) fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        match self {
            Self::IfElse(ie) => ie.subst_with(var, f),
            Self::Return(e) | Self::Impossible(e) => {
                if let Some(e) = e {
                    e.subst_with(var, f)
                }
            }
            Self::App(app) => app.subst_with(var, f),
        }
    }
}

impl<P: Properties> Body<P> {
    pub(crate) fn subst_with(&mut self, var: &Var, f: &mut Subst<P>) {
        self.stmts.iter_mut().for_each(|stmt| stmt.subst_with(var, f))
    }

    /// Replace all free occurrences of `var` by `with`.
    pub fn substitute(&mut self, var: &Var, with: &Expr<P>) {
        self.subst_with(var, &mut |e: &mut Expr<P>| *e = with.clone())
    }

    /// Rename all free occurrences of `from` to `to`.
    pub fn replace(&mut self, from: &Var, to: &Var) {
        self.subst_with(from, &mut |e: &mut Expr<P>| e.value = ExprValue::Var(to.clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::make::*;
    use crate::{Qty, Var};
    use alloc::vec;

    #[test]
    fn replace() {
        let t = Var::new("t", 0);
        let mut e = pi(vec![term_arg(Qty::Many, var("t"), "x")], var("t"));
        e.replace(&t, &t.with_idx(2));
        let expected = pi(vec![term_arg(Qty::Many, var_idx("t", 2), "x")], var_idx("t", 2));
        assert_eq!(e, expected);
    }

    #[test]
    fn stop_at_binder() {
        // the argument type before the rebinding is substituted, the rest is not
        let t = Var::new("t", 0);
        let args = |ty| vec![term_arg(Qty::Many, ty, "x"), type_arg("t")];
        let mut e = pi(args(var("t")), var("t"));
        e.replace(&t, &t.with_idx(1));
        assert_eq!(e, pi(args(var_idx("t", 1)), var("t")));
    }

    #[test]
    fn freshen() {
        let x = term_arg(Qty::Many, i32_t(), "x");
        let y = term_arg(Qty::Many, i32_t(), "y");
        let mut lam = abs_def(vec![x, y], i32_t(), vec![ret(minus(var("x"), var("y")))]);
        lam.freshen_args(4);
        let (x, y) = (Var::new("x", 5), Var::new("y", 6));
        assert_eq!(lam.args[0].var(), Some(&x));
        assert_eq!(lam.args[1].var(), Some(&y));
        let body = ret(minus(var_idx("x", 5), var_idx("y", 6)));
        assert_eq!(lam.body.stmts, vec![body]);
    }

    #[test]
    fn statements() {
        let x = Var::new("x", 0);
        let mut s = if_else(lt(var("x"), num(0)), vec![ret(num(0))], Some(vec![ret(var("x"))]));
        s.substitute(&x, &num(3));
        assert_eq!(s, if_else(lt(num(3), num(0)), vec![ret(num(0))], Some(vec![ret(num(3))])));

        let mut arg = term_arg(Qty::Many, array_t(i32_t(), var("x")), "a");
        arg.replace(&x, &x.with_idx(1));
        assert_eq!(arg, term_arg(Qty::Many, array_t(i32_t(), var_idx("x", 1)), "a"));
    }
}
