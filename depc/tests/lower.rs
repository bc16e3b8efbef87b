mod common;

use common::{init, int};
use depc::alpha::is_alpha_equivalent;
use depc::make::*;
use depc::props::{Sort, TypedProps};
use depc::{Expr, ExprValue, Loc, Parsed, Qty::*, Typed};

/// Annotate every node with the line of its position in a pre-order traversal.
fn locate(e: PExpr) -> PExpr {
    let mut line = 0;
    let located: Result<_, ()> = e.try_map_props(&mut |_, value: &ExprValue<Parsed>| {
        line += 1;
        Ok(Some(Loc::new(line, 1, value_kind(value))))
    });
    located.unwrap()
}

fn value_kind(value: &ExprValue<Parsed>) -> &'static str {
    match value {
        ExprValue::Pi(_) => "pi",
        ExprValue::Var(_) => "var",
        _ => "other",
    }
}

/// Type every node as a kind.
fn kinds(e: PExpr) -> Expr<Typed> {
    let typed: Result<_, ()> = e.try_map_props(&mut |loc, _: &ExprValue<Typed>| {
        Ok(TypedProps { loc, sort: Sort::Kind })
    });
    typed.unwrap()
}

#[test]
fn bottom_up() {
    init();
    // (typename t, t x) -> t
    let e = locate(pi(vec![type_arg("t"), term_arg(Many, var("t"), "x")], var("t")));
    // the children are annotated before their parent
    assert_eq!(e.loc(), Some(&Loc::new(3, 1, "pi")));
    match &e.value {
        ExprValue::Pi(pi) => {
            assert_eq!(pi.args[1].ty().and_then(|ty| ty.loc()).map(|l| l.line), Some(1));
            assert_eq!(pi.ret_type.loc().map(|l| l.line), Some(2));
        }
        _ => panic!("expected function type"),
    }
}

#[test]
fn typed_alpha() {
    init();
    let id = |t: &str| pi(vec![type_arg(t), term_arg(Many, var(t), "x")], var(t));
    let (a, b) = (kinds(locate(id("t"))), kinds(locate(id("u"))));
    assert!(matches!(a.props.sort, Sort::Kind));
    assert!(is_alpha_equivalent(&a, &b).is_ok());

    // errors point to the location of the typed expression
    let c = kinds(locate(pi(vec![int(One, "x")], i32_t())));
    let d = kinds(locate(pi(vec![int(Many, "x")], i32_t())));
    let err = is_alpha_equivalent(&c, &d).unwrap_err();
    assert_eq!(err.loc, Some(Loc::new(3, 1, "pi")));
}

#[test]
fn statements() {
    init();
    let x = int(One, "x");
    let body = vec![if_else(var("b"), vec![ret(var("x"))], Some(vec![impossible(None)]))];
    let lam = abs(vec![x], i32_t(), body);
    let typed = kinds(lam.clone());
    assert_eq!(typed.to_string(), lam.to_string());

    let body = match typed.value {
        ExprValue::Abs(abs) => abs.body,
        _ => panic!("expected lambda"),
    };
    let back = body.try_map_props(&mut |props: TypedProps, _: &ExprValue<Parsed>| Ok::<_, ()>(props.loc));
    assert_eq!(back.unwrap().stmts, lam.get_abs().unwrap().body.stmts);
}
