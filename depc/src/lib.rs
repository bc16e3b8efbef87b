#![no_std]
#![forbid(unsafe_code)]

//! Typechecking core of the DepC language.
//!
//! DepC is a small, C-like language with dependent types and
//! quantity-annotated (linear) arguments.
//! This library contains the parts of the DepC typechecker that
//! operate on the abstract syntax tree once it has been parsed:
//!
//! * the [AST](expr) itself, generic over an annotation policy ([`Properties`]),
//! * [traversal](visit), [substitution](subst), and
//!   [alpha-equivalence](alpha) of types,
//! * [usage tracking](usage) of quantities `0`, `1`, and many,
//!   used by the [linearity checker](check),
//! * [beta](beta) and [delta](delta) normalization,
//!   driven to a fixpoint by the [`Normalizer`], and
//! * [scope inference](max_scope) for reference types.
//!
//! The following example builds the function `b`, which calls
//! a previously defined function `a`, and normalizes the module.
//! (By the way, this example, just as all other code examples in this library,
//! can be executed by running `cargo test`.)
//!
//! ~~~
//! use depc::make::*;
//! use depc::{Normalizer, Qty};
//!
//! // func a() -> i32_t { return 1; }
//! // func b(i32_t x) -> i32_t { return a(); }
//! let a = abs_def(vec![], i32_t(), vec![ret(num(1))]);
//! let b_arg = term_arg(Qty::Many, i32_t(), "x");
//! let b = abs_def(vec![b_arg], i32_t(), vec![ret(app(var("a"), vec![]))]);
//! let mut module = module(vec![func_def("a", a), func_def("b", b)]);
//!
//! assert!(Normalizer::default().normalize_module(&mut module));
//! assert_eq!(module.entries[1].to_string(), "func b : [] (i32_t x) -> i32_t { return 1; }");
//! ~~~
//!
//! # Organisation
//!
//! Expressions are parametrised by a [`Properties`] policy that
//! determines what every node carries besides its value.
//! Freshly parsed expressions use [`Parsed`], carrying only a source location,
//! whereas typechecked expressions use [`Typed`], which additionally
//! records the sort (`Kind` or a type) of every node.
//! All algorithms in this crate are generic over the policy, and
//! comparison of expressions ignores annotations.

extern crate alloc;
#[macro_use]
extern crate log;

pub mod alpha;
pub mod beta;
pub mod check;
pub mod delta;
pub mod error;
pub mod expr;
pub mod first_order;
pub mod make;
pub mod max_scope;
pub mod module;
pub mod normalize;
pub mod props;
pub mod scope_map;
pub mod stmt;
pub mod subst;
pub mod usage;
pub mod visit;

mod arg;
mod fmt;
mod loc;
mod lower;

pub use arg::{FuncArg, Qty, TermArg, TypeArg};
pub use check::{BranchPolicy, Checker};
pub use error::Error;
pub use expr::{Abs, App, Expr, ExprValue, Global, Pi, Sigma, Var};
pub use loc::Loc;
pub use module::{Entry, Module};
pub use normalize::Normalizer;
pub use props::{Parsed, Properties, Typed};
pub use scope_map::ScopeMap;
pub use stmt::{Body, Stmt};
