mod common;

use common::init;
use depc::make::*;
use depc::max_scope::{max_scope, max_scope_combine, ScopeCtx};
use depc::{Error, Var};

/// Context with `x` in scope 1, `y` in scope 2, and `g` without scope.
fn ctx(current: Option<usize>) -> ScopeCtx<'static> {
    let mut ctx = ScopeCtx::new(current);
    ctx.bind(Var::new("x", 0), Some(1));
    ctx.bind(Var::new("y", 0), Some(2));
    ctx.bind(Var::new("g", 0), None);
    ctx
}

#[test]
fn constants() {
    init();
    let ctx = ctx(None);
    for e in [num(1), boolean(false), str_lit("hi"), i32_t(), global(Some("m"), "c")] {
        assert_eq!(max_scope(&ctx, &e), Ok(0), "{}", e);
    }
}

#[test]
fn compound() {
    init();
    let ctx = ctx(Some(5));
    assert_eq!(max_scope(&ctx, &address_of(var("x"))), Ok(1));
    assert_eq!(max_scope(&ctx, &member(deref(var("y")), "f")), Ok(2));
    assert_eq!(max_scope(&ctx, &subscript(var("x"), var("y"))), Ok(2));
    assert_eq!(max_scope(&ctx, &init_list(vec![var("x"), num(0)])), Ok(1));
    assert_eq!(max_scope(&ctx, &ref_t(i32_t(), scope_of(var("y")))), Ok(2));
    assert_eq!(max_scope(&ctx, &and(boolean(true), eq(var("x"), num(1)))), Ok(1));
}

#[test]
fn calls() {
    init();
    let call = plus(var("x"), app(var("f"), vec![var("y")]));
    assert_eq!(max_scope(&ctx(Some(3)), &call), Ok(3));
    let err = max_scope(&ctx(None), &call).unwrap_err();
    assert!(err.msg.contains("outside of any scope"));
}

#[test]
fn reasons_ignored() {
    init();
    let ctx = ctx(None);
    // the reason mentions a variable without scope
    assert_eq!(max_scope(&ctx, &because(var("x"), var("g"))), Ok(1));
    let err = max_scope(&ctx, &because(var("g"), var("x"))).unwrap_err();
    assert_eq!(err.msg, "Variable `g` is not associated with any scope");
}

#[test]
fn monotone() {
    init();
    let ctx = ctx(Some(4));
    let exprs = [var("x"), var("y"), num(0), app(var("f"), vec![])];
    for a in &exprs {
        for b in &exprs {
            let (sa, sb) = (max_scope(&ctx, a), max_scope(&ctx, b));
            let c = max_scope_combine(sa.clone(), sb.clone()).unwrap();
            assert!(c >= sa.unwrap() && c >= sb.unwrap());
            assert_eq!(max_scope(&ctx, &plus(a.clone(), b.clone())), Ok(c));
        }
    }
}

#[test]
fn combine_errors() {
    let a = Err(Error::new("a"));
    let b = Err(Error::new("b"));
    assert_eq!(max_scope_combine(a.clone(), b), a);
    assert_eq!(max_scope_combine(Ok(1), Err(Error::new("b"))).unwrap_err().msg, "b");
    assert_eq!(max_scope_combine(Ok(1), Ok(2)), Ok(2));
}
