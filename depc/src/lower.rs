//! Conversion of expressions between annotation policies.
//!
//! This is used to turn parsed expressions into typechecked expressions,
//! by computing the annotation of every node from
//! its old annotation and its already converted value.

use crate::expr::{App, BoolExpr, Pi, Sigma};
use crate::stmt::IfElse;
use crate::{Abs, Body, Expr, ExprValue, FuncArg, Properties, Stmt, TermArg};
use alloc::boxed::Box;
use alloc::vec::Vec;

fn map_box<P, Q, E, F>(e: Box<Expr<P>>, f: &mut F) -> Result<Box<Expr<Q>>, E>
where
    P: Properties,
    Q: Properties,
    F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
{
    Ok(Box::new((*e).try_map_props(f)?))
}

fn map_vec<P, Q, E, F>(xs: Vec<Expr<P>>, f: &mut F) -> Result<Vec<Expr<Q>>, E>
where
    P: Properties,
    Q: Properties,
    F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
{
    xs.into_iter().map(|x| x.try_map_props(f)).collect()
}

fn map_args<P, Q, E, F>(args: Vec<FuncArg<P>>, f: &mut F) -> Result<Vec<FuncArg<Q>>, E>
where
    P: Properties,
    Q: Properties,
    F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
{
    args.into_iter().map(|arg| arg.try_map_props(f)).collect()
}

impl<P: Properties> Expr<P> {
    /// Convert the expression to another annotation policy.
    ///
    /// The function `f` is called bottom-up on every node,
    /// receiving the old annotation of the node and its converted value.
    /// The first error returned by `f` aborts the conversion.
    ///
    /// ~~~
    /// # use depc::make::*;
    /// # use depc::{Expr, Loc, Parsed};
    /// let e = plus(var("x"), num(1));
    /// let located: Expr<Parsed> = e.clone().try_map_props(&mut |_, _| {
    ///     Ok::<_, ()>(Some(Loc::new(1, 1, "x + 1")))
    /// }).unwrap();
    /// assert_eq!(located.loc().map(|l| l.col), Some(1));
    /// assert_eq!(located, e);
    /// ~~~
    pub fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<Expr<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        let value = self.value.try_map_props(f)?;
        let props = f(self.props, &value)?;
        Ok(Expr::new(value, props))
    }
}

impl<P: Properties> ExprValue<P> {
    fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<ExprValue<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        use ExprValue::*;
        Ok(match self {
            Typename => Typename,
            Bool => Bool,
            Unit => Unit,
            I8 => I8,
            I16 => I16,
            I32 => I32,
            I64 => I64,
            U8 => U8,
            U16 => U16,
            U32 => U32,
            U64 => U64,
            Cstr => Cstr,
            Auto => Auto,
            Scope => Scope,
            TrueT(e) => TrueT(map_box(e, f)?),
            Array { ty, size } => Array {
                ty: map_box(ty, f)?,
                size: map_box(size, f)?,
            },
            Ref { ty, scope } => Ref {
                ty: map_box(ty, f)?,
                scope: map_box(scope, f)?,
            },
            Pi(pi) => Pi(pi.try_map_props(f)?),
            Sigma(self::Sigma { args }) => Sigma(self::Sigma {
                args: map_args(args, f)?,
            }),
            BoolConst(b) => BoolConst(b),
            NumConst(n) => NumConst(n),
            StrLit(s) => StrLit(s),
            BoolExpr(b) => BoolExpr(match b {
                self::BoolExpr::Not(e) => self::BoolExpr::Not(map_box(e, f)?),
                self::BoolExpr::And(l, r) => self::BoolExpr::And(map_box(l, f)?, map_box(r, f)?),
                self::BoolExpr::Or(l, r) => self::BoolExpr::Or(map_box(l, f)?, map_box(r, f)?),
            }),
            Relation { op, lhs, rhs } => Relation {
                op,
                lhs: map_box(lhs, f)?,
                rhs: map_box(rhs, f)?,
            },
            Arith { op, lhs, rhs } => Arith {
                op,
                lhs: map_box(lhs, f)?,
                rhs: map_box(rhs, f)?,
            },
            Var(v) => Var(v),
            Global(g) => Global(g),
            App(app) => App(app.try_map_props(f)?),
            Abs(abs) => Abs(abs.try_map_props(f)?),
            InitList(xs) => InitList(map_vec(xs, f)?),
            Member { object, field } => Member {
                object: map_box(object, f)?,
                field,
            },
            Subscript { object, index } => Subscript {
                object: map_box(object, f)?,
                index: map_box(index, f)?,
            },
            AddressOf(e) => AddressOf(map_box(e, f)?),
            Deref(e) => Deref(map_box(e, f)?),
            ScopeOf(e) => ScopeOf(map_box(e, f)?),
            Because { value, reason } => Because {
                value: map_box(value, f)?,
                reason: map_box(reason, f)?,
            },
        })
    }
}

impl<P: Properties> FuncArg<P> {
    pub fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<FuncArg<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        Ok(match self {
            Self::Type(arg) => FuncArg::Type(arg),
            Self::Term(TermArg { qty, ty, var }) => FuncArg::Term(TermArg {
                qty,
                ty: ty.try_map_props(f)?,
                var,
            }),
        })
    }
}

impl<P: Properties> App<P> {
    fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<App<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        Ok(App {
            func: map_box(self.func, f)?,
            args: map_vec(self.args, f)?,
        })
    }
}

impl<P: Properties> Pi<P> {
    pub fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<Pi<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        Ok(Pi {
            args: map_args(self.args, f)?,
            is_mutable: self.is_mutable,
            ret_type: map_box(self.ret_type, f)?,
        })
    }
}

impl<P: Properties> Abs<P> {
    pub fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<Abs<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        Ok(Abs {
            args: map_args(self.args, f)?,
            is_mutable: self.is_mutable,
            ret_type: map_box(self.ret_type, f)?,
            body: self.body.try_map_props(f)?,
        })
    }
}

impl<P: Properties> Stmt<P> {
    pub fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<Stmt<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        Ok(match self {
            Self::IfElse(ie) => Stmt::IfElse(IfElse {
                cond: ie.cond.try_map_props(f)?,
                true_branch: ie.true_branch.try_map_props(f)?,
                false_branch: ie.false_branch.map(|fb| fb.try_map_props(f)).transpose()?,
            }),
            Self::Return(e) => Stmt::Return(e.map(|e| e.try_map_props(f)).transpose()?),
            Self::Impossible(e) => Stmt::Impossible(e.map(|e| e.try_map_props(f)).transpose()?),
            Self::App(app) => Stmt::App(app.try_map_props(f)?),
        })
    }
}

impl<P: Properties> Body<P> {
    pub fn try_map_props<Q, E, F>(self, f: &mut F) -> Result<Body<Q>, E>
    where
        Q: Properties,
        F: FnMut(P::Expr, &ExprValue<Q>) -> Result<Q::Expr, E>,
    {
        let stmts = self.stmts.into_iter().map(|s| s.try_map_props(f));
        Ok(Body::new(stmts.collect::<Result<_, _>>()?))
    }
}

#[cfg(test)]
mod tests {
    use crate::make::*;
    use crate::props::{Sort, TypedProps};
    use crate::{Expr, ExprValue, Parsed, Qty, Typed};
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use alloc::vec;

    /// Annotate every node with a made-up sort.
    fn sorted(e: PExpr) -> Result<Expr<Typed>, &'static str> {
        e.try_map_props(&mut |loc, value: &ExprValue<Typed>| {
            if matches!(value, ExprValue::Auto) {
                return Err("cannot infer type");
            }
            let sort = if value.is_nullary_type() {
                Sort::Kind
            } else {
                Sort::Type(Box::new(Expr::new(ExprValue::I32, TypedProps { loc: None, sort: Sort::Kind })))
            };
            Ok(TypedProps { loc, sort })
        })
    }

    #[test]
    fn structure() {
        let x = term_arg(Qty::One, i32_t(), "x");
        let e = abs(vec![x], i32_t(), vec![ret(plus(var("x"), num(1)))]);
        let typed = sorted(e.clone()).unwrap();
        assert_eq!(typed.to_string(), e.to_string());
        assert!(matches!(typed.props.sort, Sort::Type(_)));

        let back: PExpr = typed.try_map_props(&mut |props, _: &ExprValue<Parsed>| Ok::<_, ()>(props.loc)).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn first_error() {
        let e = app(var("f"), vec![num(1), true_t(ExprValue::Auto.into())]);
        assert_eq!(sorted(e).unwrap_err(), "cannot infer type");
    }
}
