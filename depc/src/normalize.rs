//! Beta-delta normalization of modules.

use crate::delta::{Delta, DeltaCtx};
use crate::expr::Pi;
use crate::module::{Entry, TypeDef};
use crate::{Abs, Body, Expr, Module, Properties};

/// Structures that can be beta-normalized and delta-reduced.
trait Normalize<P: Properties> {
    fn beta(&mut self) -> bool;
    fn delta(&mut self, ctx: &DeltaCtx<P>) -> bool;
}

macro_rules! normalize {
    ($($ty:ident),*) => {
        $(impl<P: Properties> Normalize<P> for $ty<P> {
            fn beta(&mut self) -> bool {
                self.beta_normalize()
            }

            fn delta(&mut self, ctx: &DeltaCtx<P>) -> bool {
                self.delta_reduce(ctx)
            }
        })*
    };
}

normalize!(Expr, Abs, Pi, Body);

/// Beta-delta normalizer.
#[derive(Clone, Debug)]
pub struct Normalizer {
    /// Unfold references to previously defined functions?
    ///
    /// If this is disabled, only beta-normalization is performed.
    pub delta: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { delta: true }
    }
}

impl Normalizer {
    /// Alternate beta-normalization and delta-reduction until
    /// delta-reduction does not change anything anymore.
    fn fixpoint<P: Properties, T: Normalize<P>>(&self, x: &mut T, ctx: &DeltaCtx<P>) -> bool {
        let mut changed = x.beta();
        while self.delta && x.delta(ctx) {
            x.beta();
            changed = true;
        }
        changed
    }

    /// Normalize an expression, given the definitions in scope.
    pub fn normalize_expr<P: Properties>(&self, expr: &mut Expr<P>, ctx: &DeltaCtx<P>) -> bool {
        self.fixpoint(expr, ctx)
    }

    /// Normalize a function definition, given the definitions in scope.
    pub fn normalize_abs<P: Properties>(&self, abs: &mut Abs<P>, ctx: &DeltaCtx<P>) -> bool {
        self.fixpoint(abs, ctx)
    }

    /// Normalize a function signature, given the definitions in scope.
    pub fn normalize_pi<P: Properties>(&self, pi: &mut Pi<P>, ctx: &DeltaCtx<P>) -> bool {
        self.fixpoint(pi, ctx)
    }

    /// Normalize a function body, given the definitions in scope.
    pub fn normalize_body<P: Properties>(&self, body: &mut Body<P>, ctx: &DeltaCtx<P>) -> bool {
        self.fixpoint(body, ctx)
    }

    /// Normalize all entries of a module.
    ///
    /// Every function definition is normalized in the context of
    /// the functions defined before it, and then
    /// made available to the functions defined after it.
    /// Recursive functions are never unfolded.
    pub fn normalize_module<P: Properties>(&self, module: &mut Module<P>) -> bool {
        let mut ctx = DeltaCtx::new();
        let mut changed = false;
        for entry in module.entries.iter_mut() {
            let var = entry.var();
            match entry {
                Entry::TypeDef(TypeDef::Integer(_)) => (),
                Entry::TypeDef(TypeDef::Struct(def)) => {
                    for (_, ty) in def.fields.iter_mut() {
                        changed |= self.normalize_expr(ty, &ctx)
                    }
                }
                Entry::Axiom(decl) | Entry::Extern(decl) | Entry::FuncDecl(decl) => {
                    changed |= self.normalize_pi(&mut decl.pi, &ctx)
                }
                Entry::FuncDef(def) => {
                    debug!("normalizing function {}", def.name);
                    changed |= self.normalize_abs(&mut def.abs, &ctx);
                    let delta = if def.abs.body.occurs(&var) {
                        debug!("function {} is recursive, not unfolding it", def.name);
                        Delta::SomethingElse
                    } else {
                        Delta::Abs(def.abs.clone())
                    };
                    ctx.insert(var, delta);
                }
            }
        }
        changed
    }
}
