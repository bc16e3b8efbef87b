//! Construction of parsed expressions without source locations.
//!
//! These functions are a lightweight substitute for a parser,
//! useful to build expressions in tests and benchmarks.

use crate::expr::{App, ArithOp, BoolExpr, RelationOp};
use crate::module::{Decl, FuncDef, IntegerDef, Sign, StructDef, TypeDef};
use crate::stmt::IfElse;
use crate::*;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

pub type PExpr = Expr<Parsed>;
pub type PStmt = Stmt<Parsed>;
pub type PArg = FuncArg<Parsed>;

fn bx(e: PExpr) -> Box<PExpr> {
    Box::new(e)
}

pub fn var(name: &str) -> PExpr {
    var_idx(name, 0)
}

pub fn var_idx(name: &str, idx: usize) -> PExpr {
    ExprValue::Var(Var::new(name, idx)).into()
}

pub fn global(module: Option<&str>, name: &str) -> PExpr {
    let module = module.map(String::from);
    let name = name.to_string();
    ExprValue::Global(Global { module, name }).into()
}

pub fn typename() -> PExpr {
    ExprValue::Typename.into()
}

pub fn bool_t() -> PExpr {
    ExprValue::Bool.into()
}

pub fn unit_t() -> PExpr {
    ExprValue::Unit.into()
}

pub fn i32_t() -> PExpr {
    ExprValue::I32.into()
}

pub fn u32_t() -> PExpr {
    ExprValue::U32.into()
}

pub fn scope_t() -> PExpr {
    ExprValue::Scope.into()
}

pub fn true_t(e: PExpr) -> PExpr {
    ExprValue::TrueT(bx(e)).into()
}

pub fn array_t(ty: PExpr, size: PExpr) -> PExpr {
    ExprValue::Array {
        ty: bx(ty),
        size: bx(size),
    }
    .into()
}

pub fn ref_t(ty: PExpr, scope: PExpr) -> PExpr {
    ExprValue::Ref {
        ty: bx(ty),
        scope: bx(scope),
    }
    .into()
}

pub fn boolean(b: bool) -> PExpr {
    ExprValue::BoolConst(b).into()
}

pub fn num(n: u64) -> PExpr {
    ExprValue::NumConst(n).into()
}

pub fn str_lit(s: &str) -> PExpr {
    ExprValue::StrLit(s.to_string()).into()
}

pub fn not(e: PExpr) -> PExpr {
    ExprValue::BoolExpr(BoolExpr::Not(bx(e))).into()
}

pub fn and(l: PExpr, r: PExpr) -> PExpr {
    ExprValue::BoolExpr(BoolExpr::And(bx(l), bx(r))).into()
}

pub fn or(l: PExpr, r: PExpr) -> PExpr {
    ExprValue::BoolExpr(BoolExpr::Or(bx(l), bx(r))).into()
}

pub fn relation(op: RelationOp, lhs: PExpr, rhs: PExpr) -> PExpr {
    let (lhs, rhs) = (bx(lhs), bx(rhs));
    ExprValue::Relation { op, lhs, rhs }.into()
}

pub fn arith(op: ArithOp, lhs: PExpr, rhs: PExpr) -> PExpr {
    let (lhs, rhs) = (bx(lhs), bx(rhs));
    ExprValue::Arith { op, lhs, rhs }.into()
}

pub fn eq(lhs: PExpr, rhs: PExpr) -> PExpr {
    relation(RelationOp::Eq, lhs, rhs)
}

pub fn lt(lhs: PExpr, rhs: PExpr) -> PExpr {
    relation(RelationOp::Lt, lhs, rhs)
}

pub fn plus(lhs: PExpr, rhs: PExpr) -> PExpr {
    arith(ArithOp::Plus, lhs, rhs)
}

pub fn minus(lhs: PExpr, rhs: PExpr) -> PExpr {
    arith(ArithOp::Minus, lhs, rhs)
}

pub fn mult(lhs: PExpr, rhs: PExpr) -> PExpr {
    arith(ArithOp::Mult, lhs, rhs)
}

pub fn app(func: PExpr, args: Vec<PExpr>) -> PExpr {
    let func = bx(func);
    ExprValue::App(App { func, args }).into()
}

pub fn init_list(xs: Vec<PExpr>) -> PExpr {
    ExprValue::InitList(xs).into()
}

pub fn member(object: PExpr, field: &str) -> PExpr {
    let object = bx(object);
    let field = field.to_string();
    ExprValue::Member { object, field }.into()
}

pub fn subscript(object: PExpr, index: PExpr) -> PExpr {
    let (object, index) = (bx(object), bx(index));
    ExprValue::Subscript { object, index }.into()
}

pub fn address_of(e: PExpr) -> PExpr {
    ExprValue::AddressOf(bx(e)).into()
}

pub fn deref(e: PExpr) -> PExpr {
    ExprValue::Deref(bx(e)).into()
}

pub fn scope_of(e: PExpr) -> PExpr {
    ExprValue::ScopeOf(bx(e)).into()
}

pub fn because(value: PExpr, reason: PExpr) -> PExpr {
    let (value, reason) = (bx(value), bx(reason));
    ExprValue::Because { value, reason }.into()
}

/// Named type argument `typename name`.
pub fn type_arg(name: &str) -> PArg {
    let var = Some(Var::new(name, 0));
    FuncArg::Type(TypeArg { var })
}

pub fn anon_type_arg() -> PArg {
    FuncArg::Type(TypeArg { var: None })
}

/// Named term argument `qty ty name`.
pub fn term_arg(qty: Qty, ty: PExpr, name: &str) -> PArg {
    let var = Some(Var::new(name, 0));
    FuncArg::Term(TermArg { qty, ty, var })
}

pub fn anon_term_arg(qty: Qty, ty: PExpr) -> PArg {
    FuncArg::Term(TermArg { qty, ty, var: None })
}

pub fn pi_sig(args: Vec<PArg>, ret_type: PExpr) -> Pi<Parsed> {
    let ret_type = bx(ret_type);
    let is_mutable = false;
    Pi {
        args,
        is_mutable,
        ret_type,
    }
}

pub fn pi(args: Vec<PArg>, ret_type: PExpr) -> PExpr {
    ExprValue::Pi(pi_sig(args, ret_type)).into()
}

pub fn sigma(args: Vec<PArg>) -> PExpr {
    ExprValue::Sigma(Sigma { args }).into()
}

pub fn abs_def(args: Vec<PArg>, ret_type: PExpr, body: Vec<PStmt>) -> Abs<Parsed> {
    let ret_type = bx(ret_type);
    let body = Body::new(body);
    let is_mutable = false;
    Abs {
        args,
        is_mutable,
        ret_type,
        body,
    }
}

pub fn abs(args: Vec<PArg>, ret_type: PExpr, body: Vec<PStmt>) -> PExpr {
    ExprValue::Abs(abs_def(args, ret_type, body)).into()
}

pub fn ret(e: PExpr) -> PStmt {
    Stmt::Return(Some(e))
}

pub fn ret_unit() -> PStmt {
    Stmt::Return(None)
}

pub fn impossible(reason: Option<PExpr>) -> PStmt {
    Stmt::Impossible(reason)
}

pub fn if_else(cond: PExpr, t: Vec<PStmt>, f: Option<Vec<PStmt>>) -> PStmt {
    Stmt::IfElse(IfElse {
        cond,
        true_branch: Body::new(t),
        false_branch: f.map(Body::new),
    })
}

/// Function call statement `func(args);`.
pub fn call(func: PExpr, args: Vec<PExpr>) -> PStmt {
    let func = bx(func);
    Stmt::App(App { func, args })
}

pub fn integer_def(name: &str, sign: Sign, width: u8) -> Entry<Parsed> {
    let name = name.to_string();
    Entry::TypeDef(TypeDef::Integer(IntegerDef { name, sign, width }))
}

pub fn struct_def(name: &str, fields: Vec<(&str, PExpr)>) -> Entry<Parsed> {
    let name = name.to_string();
    let fields = fields.into_iter().map(|(f, ty)| (f.to_string(), ty)).collect();
    Entry::TypeDef(TypeDef::Struct(StructDef { name, fields }))
}

fn decl(name: &str, pi: Pi<Parsed>) -> Decl<Parsed> {
    let name = name.to_string();
    Decl { name, pi }
}

pub fn axiom(name: &str, pi: Pi<Parsed>) -> Entry<Parsed> {
    Entry::Axiom(decl(name, pi))
}

pub fn extern_decl(name: &str, pi: Pi<Parsed>) -> Entry<Parsed> {
    Entry::Extern(decl(name, pi))
}

pub fn func_decl(name: &str, pi: Pi<Parsed>) -> Entry<Parsed> {
    Entry::FuncDecl(decl(name, pi))
}

pub fn func_def(name: &str, abs: Abs<Parsed>) -> Entry<Parsed> {
    let name = name.to_string();
    Entry::FuncDef(FuncDef { name, abs })
}

pub fn module(entries: Vec<Entry<Parsed>>) -> Module<Parsed> {
    Module::new(entries)
}
