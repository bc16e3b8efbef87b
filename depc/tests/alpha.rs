mod common;

use common::{init, int};
use depc::alpha::is_alpha_equivalent;
use depc::make::*;
use depc::Qty::*;

fn array(ty: PExpr, n: u64) -> PExpr {
    array_t(ty, num(n))
}

#[test]
fn reflexive() {
    init();
    let exprs = vec![
        pi(vec![type_arg("t"), term_arg(Many, var("t"), "x")], var("t")),
        pi(vec![int(Many, "n"), term_arg(One, array_t(i32_t(), var("n")), "a")], unit_t()),
        sigma(vec![int(Many, "n"), term_arg(Many, true_t(lt(var("n"), num(3))), "p")]),
        abs(vec![int(Many, "x")], i32_t(), vec![ret(plus(var("x"), num(1)))]),
        ref_t(i32_t(), scope_of(var("s"))),
    ];
    for e in &exprs {
        assert_eq!(is_alpha_equivalent(e, e), Ok(()), "{}", e);
    }
}

#[test]
fn renaming() {
    init();
    // (typename a, typename b, a x, b y) -> a
    let ab = pi(
        vec![
            type_arg("a"),
            type_arg("b"),
            term_arg(Many, var("a"), "x"),
            term_arg(Many, var("b"), "y"),
        ],
        var("a"),
    );
    // (typename b, typename a, b x, a y) -> b
    let ba = pi(
        vec![
            type_arg("b"),
            type_arg("a"),
            term_arg(Many, var("b"), "x"),
            term_arg(Many, var("a"), "y"),
        ],
        var("b"),
    );
    assert!(is_alpha_equivalent(&ab, &ba).is_ok());
    assert!(is_alpha_equivalent(&ba, &ab).is_ok());

    // (typename b, typename a, b x, a y) -> a
    let ba_a = pi(
        vec![
            type_arg("b"),
            type_arg("a"),
            term_arg(Many, var("b"), "x"),
            term_arg(Many, var("a"), "y"),
        ],
        var("a"),
    );
    assert!(is_alpha_equivalent(&ab, &ba_a).is_err());
}

#[test]
fn renaming_clash() {
    init();
    // the bound `t` must not be confused with a variable `t:1` that is free
    // (typename t, t x) -> t:1
    let t = pi(vec![type_arg("t"), term_arg(Many, var("t"), "x")], var_idx("t", 1));
    // (typename u, u x) -> t:1
    let u = pi(vec![type_arg("u"), term_arg(Many, var("u"), "x")], var_idx("t", 1));
    // (typename u, u x) -> u
    let uu = pi(vec![type_arg("u"), term_arg(Many, var("u"), "x")], var("u"));
    assert!(is_alpha_equivalent(&t, &u).is_ok());
    assert!(is_alpha_equivalent(&t, &uu).is_err());
}

#[test]
fn term_names_ignored() {
    init();
    let x = pi(vec![int(One, "x")], i32_t());
    let y = pi(vec![int(One, "y")], i32_t());
    let anon = pi(vec![anon_term_arg(One, i32_t())], i32_t());
    assert!(is_alpha_equivalent(&x, &y).is_ok());
    assert!(is_alpha_equivalent(&x, &anon).is_ok());
}

#[test]
fn dependent_array() {
    init();
    let f = |t: &str| {
        let args = vec![type_arg(t), term_arg(Many, array(var(t), 3), "a")];
        pi(args, var(t))
    };
    assert!(is_alpha_equivalent(&f("t"), &f("u")).is_ok());
}

#[test]
fn arity() {
    init();
    let one = pi(vec![int(Many, "x")], i32_t());
    let two = pi(vec![int(Many, "x"), int(Many, "y")], i32_t());
    let err = is_alpha_equivalent(&one, &two).unwrap_err();
    assert_eq!(
        err.msg,
        "`(i32_t x) -> i32_t` is not alpha-equivalent to `(i32_t x, i32_t y) -> i32_t` \
         because they take a different number of arguments: 1 vs 2"
    );
}

#[test]
fn quantity() {
    init();
    let linear = pi(vec![int(One, "x")], i32_t());
    let many = pi(vec![int(Many, "x")], i32_t());
    let err = is_alpha_equivalent(&linear, &many).unwrap_err();
    assert_eq!(err.msg, "1st argument has quantity 1 instead of many");
}

#[test]
fn anonymous_type_arg() {
    init();
    let named = pi(vec![type_arg("t")], unit_t());
    let anon = pi(vec![anon_type_arg()], unit_t());
    let err = is_alpha_equivalent(&named, &anon).unwrap_err();
    assert!(err.msg.contains("named and anonymous type arguments"));
    assert!(is_alpha_equivalent(&anon, &anon).is_ok());
}

#[test]
fn type_and_term_binder() {
    init();
    let ty = pi(vec![type_arg("t")], i32_t());
    let term = pi(vec![term_arg(Many, i32_t(), "t")], i32_t());
    for (l, r) in [(&ty, &term), (&term, &ty)] {
        let err = is_alpha_equivalent(l, r).unwrap_err();
        assert_eq!(err.msg, "1st argument binds a type on one side and a term on the other");
    }
}

#[test]
fn explanation() {
    init();
    let sig = |n| pi(vec![int(Many, "x"), term_arg(Many, array(i32_t(), n), "a")], unit_t());
    let err = is_alpha_equivalent(&sig(3), &sig(4)).unwrap_err();
    let expected = "\
2nd argument type `array_t(i32_t, 3)` is not alpha-equivalent to `array_t(i32_t, 4)`
  `3` is not alpha-equivalent to `4`
";
    assert_eq!(err.to_string(), expected);

    // errors in nested function types are explained level by level
    let nested = |ty| pi(vec![term_arg(Many, pi(vec![], ty), "f")], unit_t());
    let err = is_alpha_equivalent(&nested(i32_t()), &nested(bool_t())).unwrap_err();
    assert_eq!(err.reasons.len(), 1);
    assert!(err.reasons[0].msg.starts_with("return type `i32_t`"));
    assert_eq!(err.reasons[0].reasons[0].msg, "`i32_t` is not alpha-equivalent to `bool_t`");
}

#[test]
fn lambdas() {
    init();
    let lam = |x: &str, body| abs(vec![type_arg(x)], typename(), vec![ret(body)]);
    assert!(is_alpha_equivalent(&lam("t", var("t")), &lam("u", var("u"))).is_ok());
    let err = is_alpha_equivalent(&lam("t", var("t")), &lam("u", i32_t())).unwrap_err();
    assert!(err.msg.starts_with("bodies of"));
}
