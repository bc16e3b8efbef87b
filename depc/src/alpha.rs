//! Alpha-equivalence checking.
//!
//! Two expressions are alpha-equivalent if they are equal
//! up to a consistent renaming of the type variables they bind.
//! For example, `(typename t, t x) -> t` and `(typename u, u y) -> u`
//! are alpha-equivalent, whereas `(typename t, t x) -> t` and
//! `(typename t, t x) -> i32_t` are not.
//!
//! Names of term arguments are ignored, even though
//! later argument types such as `array_t(i32_t, n)` may mention them.
//! Only bound type variables are renamed.

use crate::expr::{BoolExpr, Pi, Sigma};
use crate::subst::subst_args;
use crate::visit::MaxIndex;
use crate::{Abs, Body, Error, Expr, ExprValue, FuncArg, Properties, Var};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

type Constraint<'a, P> = (&'a Expr<P>, &'a Expr<P>);

/// Ordinal number, such as `1st` or `12th`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn mismatch<P: Properties>(x: &Expr<P>, y: &Expr<P>) -> Error {
    let msg = format!("`{}` is not alpha-equivalent to `{}`", x, y);
    Error::at(msg, x.loc())
}

/// Return true if the heads of the given expressions coincide, and if so,
/// add alpha-equivalence constraints for their subexpressions.
///
/// Binders are not handled here.
fn step<'a, P: Properties>((x, y): Constraint<'a, P>, cns: &mut Vec<Constraint<'a, P>>) -> bool {
    use ExprValue::*;
    match (&x.value, &y.value) {
        (a, b) if a.is_nullary_type() => core::mem::discriminant(a) == core::mem::discriminant(b),
        (Var(a), Var(b)) => a == b,
        (Global(a), Global(b)) => a == b,
        (BoolConst(a), BoolConst(b)) => a == b,
        (NumConst(a), NumConst(b)) => a == b,
        (StrLit(a), StrLit(b)) => a == b,
        (TrueT(a), TrueT(b))
        | (AddressOf(a), AddressOf(b))
        | (Deref(a), Deref(b))
        | (ScopeOf(a), ScopeOf(b))
        | (BoolExpr(self::BoolExpr::Not(a)), BoolExpr(self::BoolExpr::Not(b))) => {
            cns.push((a, b));
            true
        }
        (Array { ty: a1, size: a2 }, Array { ty: b1, size: b2 })
        | (Ref { ty: a1, scope: a2 }, Ref { ty: b1, scope: b2 })
        | (BoolExpr(self::BoolExpr::And(a1, a2)), BoolExpr(self::BoolExpr::And(b1, b2)))
        | (BoolExpr(self::BoolExpr::Or(a1, a2)), BoolExpr(self::BoolExpr::Or(b1, b2)))
        | (
            Subscript {
                object: a1,
                index: a2,
            },
            Subscript {
                object: b1,
                index: b2,
            },
        )
        | (
            Because {
                value: a1,
                reason: a2,
            },
            Because {
                value: b1,
                reason: b2,
            },
        ) => {
            cns.push((a1, b1));
            cns.push((a2, b2));
            true
        }
        (Relation { op: o1, lhs: l1, rhs: r1 }, Relation { op: o2, lhs: l2, rhs: r2 }) => {
            cns.push((l1, l2));
            cns.push((r1, r2));
            o1 == o2
        }
        (Arith { op: o1, lhs: l1, rhs: r1 }, Arith { op: o2, lhs: l2, rhs: r2 }) => {
            cns.push((l1, l2));
            cns.push((r1, r2));
            o1 == o2
        }
        (Member { object: o1, field: f1 }, Member { object: o2, field: f2 }) => {
            cns.push((o1, o2));
            f1 == f2
        }
        (InitList(a), InitList(b)) => {
            cns.extend(a.iter().zip(b.iter()));
            a.len() == b.len()
        }
        (App(a), App(b)) => {
            cns.push((&a.func, &b.func));
            cns.extend(a.args.iter().zip(b.args.iter()));
            a.args.len() == b.args.len()
        }
        _ => false,
    }
}

/// Check whether two expressions are alpha-equivalent.
///
/// ~~~
/// # use depc::alpha::is_alpha_equivalent;
/// # use depc::make::*;
/// # use depc::Qty;
/// // (typename t, t x) -> t
/// let id_t = pi(vec![type_arg("t"), term_arg(Qty::Many, var("t"), "x")], var("t"));
/// // (typename u, u y) -> u
/// let id_u = pi(vec![type_arg("u"), term_arg(Qty::Many, var("u"), "y")], var("u"));
/// assert!(is_alpha_equivalent(&id_t, &id_u).is_ok());
///
/// // (typename t, t x) -> i32_t
/// let const_t = pi(vec![type_arg("t"), term_arg(Qty::Many, var("t"), "x")], i32_t());
/// let err = is_alpha_equivalent(&id_t, &const_t).unwrap_err();
/// assert!(err.msg.starts_with("return type"));
/// ~~~
pub fn is_alpha_equivalent<P: Properties>(x: &Expr<P>, y: &Expr<P>) -> Result<(), Error> {
    use ExprValue::*;
    let mut cns = Vec::from([(x, y)]);
    while let Some((x, y)) = cns.pop() {
        trace!("alpha: {} ~? {}", x, y);
        match (&x.value, &y.value) {
            (Pi(px), Pi(py)) => {
                if px.is_mutable != py.is_mutable {
                    return Err(mismatch(x, y));
                }
                let (mut px, mut py) = (px.clone(), py.clone());
                telescopes_equivalent(x, y, Telescope::pi(&mut px), Telescope::pi(&mut py))?
            }
            (Sigma(sx), Sigma(sy)) => {
                let (mut sx, mut sy) = (sx.clone(), sy.clone());
                let (tx, ty) = (Telescope::sigma(&mut sx), Telescope::sigma(&mut sy));
                telescopes_equivalent(x, y, tx, ty)?
            }
            (Abs(ax), Abs(ay)) => {
                if ax.is_mutable != ay.is_mutable {
                    return Err(mismatch(x, y));
                }
                let (mut ax, mut ay) = (ax.clone(), ay.clone());
                let (tx, ty) = (Telescope::abs(&mut ax), Telescope::abs(&mut ay));
                telescopes_equivalent(x, y, tx, ty)?
            }
            _ => {
                if !step((x, y), &mut cns) {
                    return Err(mismatch(x, y));
                }
            }
        }
    }
    Ok(())
}

/// Arguments of a binder together with the scope they bind in.
struct Telescope<'a, P: Properties> {
    args: &'a mut [FuncArg<P>],
    ret: Option<&'a mut Expr<P>>,
    body: Option<&'a mut Body<P>>,
}

impl<'a, P: Properties> Telescope<'a, P> {
    fn pi(pi: &'a mut Pi<P>) -> Self {
        let ret = Some(&mut *pi.ret_type);
        Self {
            args: &mut pi.args,
            ret,
            body: None,
        }
    }

    fn sigma(sigma: &'a mut Sigma<P>) -> Self {
        Self {
            args: &mut sigma.args,
            ret: None,
            body: None,
        }
    }

    fn abs(abs: &'a mut Abs<P>) -> Self {
        Self {
            args: &mut abs.args,
            ret: Some(&mut *abs.ret_type),
            body: Some(&mut abs.body),
        }
    }

    /// Largest index of variables occurring after the `i`th argument.
    fn max_index_after(&self, i: usize) -> Option<usize> {
        let mut mi = MaxIndex::default();
        self.args[i + 1..].iter().for_each(|arg| arg.visit(&mut mi));
        if let Some(ret) = &self.ret {
            ret.visit(&mut mi)
        }
        if let Some(body) = &self.body {
            body.visit(&mut mi)
        }
        mi.0
    }

    /// Rename the variable bound by the `i`th argument.
    fn rename(&mut self, i: usize, from: &Var, to: &Var) {
        let mut f = |e: &mut Expr<P>| e.value = ExprValue::Var(to.clone());
        if subst_args(&mut self.args[i + 1..], from, &mut f) {
            if let Some(ret) = &mut self.ret {
                ret.subst_with(from, &mut f)
            }
            if let Some(body) = &mut self.body {
                body.subst_with(from, &mut f)
            }
        }
        *self.args[i].var_mut() = Some(to.clone());
    }

    /// Rename the variable bound by the `i`th argument to a fresh one.
    fn freshen(&mut self, i: usize, from: &Var) -> Var {
        let to = from.with_idx(self.max_index_after(i).map_or(0, |n| n + 1));
        self.rename(i, from, &to);
        to
    }
}

/// Check whether two telescopes are alpha-equivalent.
///
/// The expressions `x` and `y` are the binders containing the telescopes,
/// used only for error messages.
fn telescopes_equivalent<P: Properties>(
    x: &Expr<P>,
    y: &Expr<P>,
    mut tx: Telescope<P>,
    mut ty: Telescope<P>,
) -> Result<(), Error> {
    let loc = x.loc();
    if tx.args.len() != ty.args.len() {
        let (lx, ly) = (tx.args.len(), ty.args.len());
        let msg = format!(
            "`{}` is not alpha-equivalent to `{}` because they take a different number of arguments: {} vs {}",
            x, y, lx, ly
        );
        return Err(Error::at(msg, loc));
    }

    for i in 0..tx.args.len() {
        let ord = ordinal(i + 1);
        let renaming = match (&tx.args[i], &ty.args[i]) {
            (FuncArg::Type(a), FuncArg::Type(b)) => match (&a.var, &b.var) {
                (None, None) => None,
                (Some(a), Some(b)) if a == b => None,
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => {
                    let msg = format!(
                        "{} argument: comparison of named and anonymous type arguments is not supported",
                        ord
                    );
                    return Err(Error::at(msg, loc));
                }
            },
            (FuncArg::Term(a), FuncArg::Term(b)) => {
                if a.qty != b.qty {
                    let msg = format!("{} argument has quantity {} instead of {}", ord, a.qty, b.qty);
                    return Err(Error::at(msg, loc));
                }
                is_alpha_equivalent(&a.ty, &b.ty).map_err(|e| {
                    let msg = format!(
                        "{} argument type `{}` is not alpha-equivalent to `{}`",
                        ord, a.ty, b.ty
                    );
                    Error::at(msg, loc).because(e)
                })?;
                None
            }
            _ => {
                let msg = format!("{} argument binds a type on one side and a term on the other", ord);
                return Err(Error::at(msg, loc));
            }
        };

        if let Some((a, b)) = renaming {
            let a = tx.freshen(i, &a);
            let b = ty.freshen(i, &b);
            trace!("alpha: renamed {} and {}", a, b);
            // the variable with the larger index is fresh on both sides
            if a.idx >= b.idx {
                ty.rename(i, &b, &a)
            } else {
                tx.rename(i, &a, &b)
            }
        }
    }

    if let (Some(rx), Some(ry)) = (tx.ret.as_deref(), ty.ret.as_deref()) {
        is_alpha_equivalent(rx, ry).map_err(|e| {
            let msg = format!("return type `{}` is not alpha-equivalent to `{}`", rx, ry);
            Error::at(msg, loc).because(e)
        })?;
    }

    if let (Some(bx), Some(by)) = (tx.body.as_deref(), ty.body.as_deref()) {
        if bx != by {
            return Err(Error::at(format!("bodies of `{}` and `{}` differ", x, y), loc));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        let ords: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111]
            .into_iter()
            .map(ordinal)
            .collect();
        let expected = [
            "1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th",
        ];
        assert_eq!(ords, expected);
    }
}
