//! Read-only traversal of expressions.
//!
//! A traversal visits nodes in source order and
//! notifies a [`Visit`] implementation before and after each
//! expression, statement, and function argument.

use crate::expr::{Abs, App, BoolExpr};
use crate::stmt::IfElse;
use crate::{Body, Expr, ExprValue, FuncArg, Properties, Stmt, Var};
use core::cmp::max;

/// Callbacks invoked during traversal, doing nothing by default.
pub trait Visit<P: Properties> {
    fn enter_expr(&mut self, _: &Expr<P>) {}
    fn exit_expr(&mut self, _: &Expr<P>) {}
    fn enter_stmt(&mut self, _: &Stmt<P>) {}
    fn exit_stmt(&mut self, _: &Stmt<P>) {}
    fn enter_arg(&mut self, _: &FuncArg<P>) {}
    fn exit_arg(&mut self, _: &FuncArg<P>) {}
}

fn visit_args<P: Properties, V: Visit<P>>(args: &[FuncArg<P>], v: &mut V) {
    args.iter().for_each(|arg| arg.visit(v))
}

impl<P: Properties> Expr<P> {
    pub fn visit<V: Visit<P>>(&self, v: &mut V) {
        use ExprValue::*;
        v.enter_expr(self);
        match &self.value {
            Typename | Bool | Unit | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | Cstr | Auto
            | Scope => {}
            BoolConst(_) | NumConst(_) | StrLit(_) | Var(_) | Global(_) => {}
            TrueT(e) | AddressOf(e) | Deref(e) | ScopeOf(e) => e.visit(v),
            Array { ty, size } => {
                ty.visit(v);
                size.visit(v)
            }
            Ref { ty, scope } => {
                ty.visit(v);
                scope.visit(v)
            }
            Pi(pi) => {
                visit_args(&pi.args, v);
                pi.ret_type.visit(v)
            }
            Sigma(sigma) => visit_args(&sigma.args, v),
            BoolExpr(b) => b.visit(v),
            Relation { lhs, rhs, .. } | Arith { lhs, rhs, .. } => {
                lhs.visit(v);
                rhs.visit(v)
            }
            App(app) => app.visit(v),
            Abs(abs) => {
                visit_args(&abs.args, v);
                abs.ret_type.visit(v);
                abs.body.visit(v)
            }
            InitList(xs) => xs.iter().for_each(|x| x.visit(v)),
            Member { object, .. } => object.visit(v),
            Subscript { object, index } => {
                object.visit(v);
                index.visit(v)
            }
            Because { value, reason } => {
                value.visit(v);
                reason.visit(v)
            }
        }
        v.exit_expr(self)
    }

    /// Largest index of any variable occurring in the expression, including binders.
    ///
    /// ~~~
    /// # use depc::make::*;
    /// # use depc::Qty;
    /// let e = pi(vec![term_arg(Qty::Many, var_idx("t", 3), "x")], var_idx("t", 1));
    /// assert_eq!(e.max_var_index(), Some(3));
    /// assert_eq!(num(1).max_var_index(), None);
    /// ~~~
    pub fn max_var_index(&self) -> Option<usize> {
        let mut mi = MaxIndex::default();
        self.visit(&mut mi);
        mi.0
    }

    /// Return true if the variable occurs anywhere in the expression.
    pub fn occurs(&self, var: &Var) -> bool {
        let mut oc = Occurs::new(var);
        self.visit(&mut oc);
        oc.found
    }
}

impl<P: Properties> BoolExpr<P> {
    fn visit<V: Visit<P>>(&self, v: &mut V) {
        match self {
            Self::Not(e) => e.visit(v),
            Self::And(l, r) | Self::Or(l, r) => {
                l.visit(v);
                r.visit(v)
            }
        }
    }
}

impl<P: Properties> App<P> {
    pub fn visit<V: Visit<P>>(&self, v: &mut V) {
        self.func.visit(v);
        self.args.iter().for_each(|arg| arg.visit(v))
    }
}

impl<P: Properties> FuncArg<P> {
    pub fn visit<V: Visit<P>>(&self, v: &mut V) {
        v.enter_arg(self);
        if let Some(ty) = self.ty() {
            ty.visit(v)
        }
        v.exit_arg(self)
    }
}

impl<P: Properties> IfElse<P> {
    fn visit<V: Visit<P>>(&self, v: &mut V) {
        self.cond.visit(v);
        self.true_branch.visit(v);
        if let Some(fb) = &self.false_branch {
            fb.visit(v)
        }
    }
}

impl<P: Properties> Stmt<P> {
    pub fn visit<V: Visit<P>>(&self, v: &mut V) {
        v.enter_stmt(self);
        match self {
            Self::IfElse(ie) => ie.visit(v),
            Self::Return(e) | Self::Impossible(e) => {
                if let Some(e) = e {
                    e.visit(v)
                }
            }
            Self::App(app) => app.visit(v),
        }
        v.exit_stmt(self)
    }
}

impl<P: Properties> Body<P> {
    pub fn visit<V: Visit<P>>(&self, v: &mut V) {
        self.stmts.iter().for_each(|stmt| stmt.visit(v))
    }

    pub fn occurs(&self, var: &Var) -> bool {
        let mut oc = Occurs::new(var);
        self.visit(&mut oc);
        oc.found
    }
}

impl<P: Properties> Abs<P> {
    /// Return true if the variable occurs outside the scope of a parameter binding it.
    ///
    /// Argument types up to and including the rebinding parameter are still searched.
    pub fn occurs_free(&self, var: &Var) -> bool {
        for arg in &self.args {
            if arg.ty().map_or(false, |ty| ty.occurs(var)) {
                return true;
            }
            if arg.binds(var) {
                return false;
            }
        }
        self.ret_type.occurs(var) || self.body.occurs(var)
    }
}

/// Largest variable index seen so far.
#[derive(Default)]
pub struct MaxIndex(pub Option<usize>);

impl MaxIndex {
    fn see(&mut self, var: &Var) {
        self.0 = Some(self.0.map_or(var.idx, |i| max(i, var.idx)))
    }
}

impl<P: Properties> Visit<P> for MaxIndex {
    fn enter_expr(&mut self, expr: &Expr<P>) {
        if let Some(var) = expr.get_var() {
            self.see(var)
        }
    }

    fn enter_arg(&mut self, arg: &FuncArg<P>) {
        if let Some(var) = arg.var() {
            self.see(var)
        }
    }
}

/// Whether a variable was seen.
pub struct Occurs<'a> {
    var: &'a Var,
    pub found: bool,
}

impl<'a> Occurs<'a> {
    pub fn new(var: &'a Var) -> Self {
        let found = false;
        Self { var, found }
    }
}

impl<'a, P: Properties> Visit<P> for Occurs<'a> {
    fn enter_expr(&mut self, expr: &Expr<P>) {
        self.found = self.found || expr.get_var() == Some(self.var)
    }
}
