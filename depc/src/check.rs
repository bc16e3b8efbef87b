//! Checking that functions use their arguments according to their quantities.

use crate::module::Entry;
use crate::scope_map::{merge, Frame};
use crate::stmt::IfElse;
use crate::usage::{Callee, Callees, Decls, Name, Usage, UsageCtx};
use crate::{Abs, Body, Error, ExprValue, FuncArg, Loc, Module, Properties, Qty, Stmt, Var};
use alloc::format;

/// How to combine the usages of the two branches of a conditional.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BranchPolicy {
    /// take the maximal usage of every variable
    Max,
    /// require every linear variable to be used
    /// either in both branches or in none of them
    #[default]
    Equal,
}

/// Linearity checker.
///
/// The checker walks through the body of a function and
/// records the usages of the function's arguments.
/// It fails if an argument is used more often than its quantity allows, or
/// if a linear argument has not been used when the function returns.
#[derive(Clone, Debug, Default)]
pub struct Checker {
    pub branch: BranchPolicy,
}

/// Quantities of the functions introduced by a module entry.
fn callee<P: Properties>(entry: &Entry<P>) -> Option<(Name, Callee)> {
    let callee = match entry {
        Entry::TypeDef(_) => return None,
        Entry::Axiom(decl) => Callee::new(&decl.pi.args, true),
        Entry::Extern(decl) | Entry::FuncDecl(decl) => Callee::new(&decl.pi.args, false),
        Entry::FuncDef(def) => Callee::new(&def.abs.args, false),
    };
    Some((Name::Local(entry.var()), callee))
}

impl Checker {
    pub fn new(branch: BranchPolicy) -> Self {
        Self { branch }
    }

    /// Check all function definitions of a module.
    ///
    /// Every function may call all functions introduced before it, and itself.
    pub fn check_module<P: Properties>(&self, module: &Module<P>) -> Result<(), Error> {
        let mut callees = Callees::new();
        for entry in &module.entries {
            let callee = callee(entry);
            if let Some((name, callee)) = callee {
                callees.insert(name, callee);
            }
            if let Entry::FuncDef(def) = entry {
                debug!("checking usages in function {}", def.name);
                self.check_func(&callees, &def.abs).map_err(|e| {
                    Error::new(format!("in function `{}`", def.name)).because(e)
                })?
            }
        }
        Ok(())
    }

    /// Check the body of a function, given the functions it may call.
    pub fn check_func<P: Properties>(&self, callees: &Callees, abs: &Abs<P>) -> Result<(), Error> {
        let mut decls = Decls::new();
        let mut callees = callees.extend();
        for arg in &abs.args {
            let var = match arg.var() {
                Some(var) => var,
                None => continue,
            };
            decls.insert(var.clone(), arg.qty());
            // arguments of function type may be called
            if let FuncArg::Term(arg) = arg {
                if let ExprValue::Pi(pi) = &arg.ty.value {
                    callees.insert(Name::Local(var.clone()), Callee::new(&pi.args, false));
                }
            }
        }

        let ctx = UsageCtx {
            decls: &decls,
            callees: &callees,
        };
        let mut usage = Usage::new();
        if self.check_body(ctx, &mut usage, &abs.body)? {
            self.check_consumed(ctx, &usage, None)?
        }
        Ok(())
    }

    /// Check a body, returning whether its end can be reached.
    fn check_body<P: Properties>(&self, ctx: UsageCtx, usage: &mut Usage, body: &Body<P>) -> Result<bool, Error> {
        for stmt in &body.stmts {
            if !self.check_stmt(ctx, usage, stmt)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check a statement, returning whether its end can be reached.
    fn check_stmt<P: Properties>(&self, ctx: UsageCtx, usage: &mut Usage, stmt: &Stmt<P>) -> Result<bool, Error> {
        match stmt {
            Stmt::Return(e) => {
                if let Some(e) = e {
                    usage.try_add_expr(ctx, e, Qty::One)?
                }
                self.check_consumed(ctx, usage, e.as_ref().and_then(|e| e.loc()))?;
                Ok(false)
            }
            // the reason is erased, and unreachable code need not consume anything
            Stmt::Impossible(_) => Ok(false),
            Stmt::App(app) => {
                usage.try_add_app(ctx, app, Qty::One, app.func.loc())?;
                Ok(true)
            }
            Stmt::IfElse(ie) => self.check_if_else(ctx, usage, ie),
        }
    }

    fn check_if_else<P: Properties>(&self, ctx: UsageCtx, usage: &mut Usage, ie: &IfElse<P>) -> Result<bool, Error> {
        let loc = ie.cond.loc();
        usage.try_add_expr(ctx, &ie.cond, Qty::One)?;

        let mut child = usage.extend();
        let true_reachable = self.check_body(ctx, &mut child, &ie.true_branch)?;
        let true_usage = child.into_local();

        let (false_reachable, false_usage) = match &ie.false_branch {
            Some(fb) => {
                let mut child = usage.extend();
                let reachable = self.check_body(ctx, &mut child, fb)?;
                (reachable, child.into_local())
            }
            None => (true, Frame::default()),
        };

        // only branches whose end is reachable contribute to the code after the conditional
        let combined = match (true_reachable, false_reachable) {
            (false, false) => return Ok(false),
            (true, false) => true_usage,
            (false, true) => false_usage,
            (true, true) => self.combine(ctx, &true_usage, &false_usage, loc)?,
        };
        usage.try_add_usage(ctx, &combined, loc)?;
        Ok(true)
    }

    /// Combine the usages of two branches according to the branch policy.
    fn combine(
        &self,
        ctx: UsageCtx,
        a: &Frame<Var, Qty>,
        b: &Frame<Var, Qty>,
        loc: Option<&Loc>,
    ) -> Result<Frame<Var, Qty>, Error> {
        if self.branch == BranchPolicy::Equal {
            let used = |f: &Frame<Var, Qty>, v: &Var| f.get(v).copied().unwrap_or(Qty::Zero);
            let unequal = ctx
                .decls
                .iter()
                .filter(|(_, declared)| **declared == Qty::One)
                .find(|(v, _)| used(a, *v) != used(b, *v));
            if let Some((v, _)) = unequal {
                let msg = "Linear variable must be used either in both branches or in none";
                let reason = Error::new(format!("`{}` is used in only one branch", v));
                return Err(Error::at(msg, loc).because(reason));
            }
        }
        Ok(merge(a, b, core::cmp::max))
    }

    /// Check that all linear arguments have been used.
    fn check_consumed(&self, ctx: UsageCtx, usage: &Usage, loc: Option<&Loc>) -> Result<(), Error> {
        let unused = ctx
            .decls
            .iter()
            .find(|(v, declared)| **declared == Qty::One && usage.total(v) != Qty::One);
        match unused {
            Some((v, _)) => {
                let reason = Error::new(format!("`{}` is declared with quantity 1", v));
                Err(Error::at("Linear variable has not been used", loc).because(reason))
            }
            None => Ok(()),
        }
    }
}
