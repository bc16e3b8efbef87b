//! First-order function signatures.
//!
//! Only functions with first-order signatures can be compiled to machine code:
//! their arguments and return values must be plain data,
//! and they must not be polymorphic.

use crate::module::Entry;
use crate::visit::Visit;
use crate::{Error, Expr, ExprValue, FuncArg, Module, Pi, Properties};
use alloc::format;

/// Whether a type mentions a function type or the type of types.
#[derive(Default)]
struct HigherOrder(bool);

impl<P: Properties> Visit<P> for HigherOrder {
    fn enter_expr(&mut self, expr: &Expr<P>) {
        use ExprValue::{Abs, Pi, Typename};
        self.0 = self.0 || matches!(expr.value, Pi(_) | Abs(_) | Typename)
    }
}

impl<P: Properties> Pi<P> {
    /// Return true if the signature takes no type arguments and
    /// neither its argument types nor its return type
    /// contain function types or `typename`.
    ///
    /// ~~~
    /// # use depc::make::*;
    /// # use depc::Qty;
    /// let id = pi_sig(vec![term_arg(Qty::Many, i32_t(), "x")], i32_t());
    /// assert!(id.is_first_order());
    ///
    /// let poly = pi_sig(vec![type_arg("t"), term_arg(Qty::Many, var("t"), "x")], var("t"));
    /// assert!(!poly.is_first_order());
    /// ~~~
    pub fn is_first_order(&self) -> bool {
        let mut ho = HigherOrder::default();
        for arg in &self.args {
            match arg {
                FuncArg::Type(_) => return false,
                FuncArg::Term(arg) => arg.ty.visit(&mut ho),
            }
        }
        self.ret_type.visit(&mut ho);
        !ho.0
    }
}

/// Fail if a function with the given signature cannot be generated.
pub fn first_order_error<P: Properties>(name: &str, pi: &Pi<P>) -> Result<(), Error> {
    if pi.is_first_order() {
        return Ok(());
    }
    debug!("signature of {} is not first-order", name);
    let msg = format!(
        "Function `{}` is not generatable because its type `{}` is not first-order",
        name, pi
    );
    Err(Error::at(msg, pi.ret_type.loc()))
}

impl<P: Properties> Module<P> {
    /// Check that all functions to be generated have first-order signatures.
    ///
    /// Axioms exist only at compile-time and are therefore exempt.
    pub fn check_generatable(&self) -> Result<(), Error> {
        self.entries.iter().try_for_each(|entry| match entry {
            Entry::Extern(decl) | Entry::FuncDecl(decl) => first_order_error(&decl.name, &decl.pi),
            Entry::FuncDef(def) => {
                // TODO: skip functions that are only called at compile-time
                let pi = Pi::from(def.abs.clone());
                first_order_error(&def.name, &pi)
            }
            Entry::TypeDef(_) | Entry::Axiom(_) => Ok(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::make::*;
    use crate::Qty;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn higher_order() {
        let f = term_arg(Qty::Many, pi(vec![], i32_t()), "f");
        assert!(!pi_sig(vec![f], i32_t()).is_first_order());
        assert!(!pi_sig(vec![], typename()).is_first_order());
        let a = term_arg(Qty::Many, array_t(i32_t(), num(3)), "a");
        assert!(pi_sig(vec![a], unit_t()).is_first_order());
    }

    #[test]
    fn generatable() {
        let x = term_arg(Qty::Many, var("t"), "x");
        let id = abs_def(vec![type_arg("t"), x], var("t"), vec![ret(var("x"))]);
        let m = module(vec![axiom("ax", pi_sig(vec![type_arg("t")], unit_t()))]);
        assert!(m.check_generatable().is_ok());

        let m = module(vec![func_def("id", id)]);
        let err = m.check_generatable().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Function `id` is not generatable because its type `(typename t, t x) -> t` is not first-order\n"
        );
    }
}
