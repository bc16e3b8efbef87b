mod common;

use common::{init, int};
use depc::make::*;
use depc::{BranchPolicy, Checker, Error, Module, Parsed, Qty::*};

fn check(m: &Module<Parsed>) -> Result<(), Error> {
    Checker::default().check_module(m)
}

/// Message of the innermost error below the "in function" error.
fn reason(m: &Module<Parsed>) -> String {
    let err = check(m).unwrap_err();
    assert!(err.msg.starts_with("in function"), "{}", err);
    err.reasons[0].msg.clone()
}

#[test]
fn linear_once() {
    init();
    let f = abs_def(vec![int(One, "x")], i32_t(), vec![ret(var("x"))]);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}

#[test]
fn linear_twice() {
    init();
    let f = abs_def(vec![int(One, "x")], i32_t(), vec![ret(plus(var("x"), var("x")))]);
    let m = module(vec![func_def("f", f)]);
    assert_eq!(reason(&m), "Variable has already been used once");
}

#[test]
fn linear_unused() {
    init();
    let f = abs_def(vec![int(One, "x")], i32_t(), vec![ret(num(0))]);
    let m = module(vec![func_def("f", f)]);
    let err = check(&m).unwrap_err();
    let expected = "\
in function `f`
  Linear variable has not been used
    `x` is declared with quantity 1
";
    assert_eq!(err.to_string(), expected);
}

#[test]
fn linear_unit_function() {
    init();
    let g = pi_sig(vec![int(One, "y")], unit_t());
    // func f(1 i32_t x) -> unit_t { g(x); }
    let used = abs_def(vec![int(One, "x")], unit_t(), vec![call(var("g"), vec![var("x")])]);
    // func h(1 i32_t x) -> unit_t { }
    let unused = abs_def(vec![int(One, "x")], unit_t(), vec![]);
    let m = module(vec![func_decl("g", g.clone()), func_def("f", used)]);
    assert!(check(&m).is_ok());
    let m = module(vec![func_decl("g", g), func_def("h", unused)]);
    assert_eq!(reason(&m), "Linear variable has not been used");
}

#[test]
fn erased() {
    init();
    let f = abs_def(vec![int(Zero, "x")], i32_t(), vec![ret(var("x"))]);
    let m = module(vec![func_def("f", f)]);
    assert_eq!(reason(&m), "Variable cannot be used at run-time");

    // erased variables may occur in types and in reasons
    let args = vec![
        int(Zero, "n"),
        term_arg(One, array_t(i32_t(), var("n")), "a"),
        term_arg(Zero, true_t(lt(num(0), var("n"))), "p"),
    ];
    let body = vec![ret(because(subscript(var("a"), num(0)), var("p")))];
    let f = abs_def(args, i32_t(), body);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}

#[test]
fn erased_arguments() {
    init();
    // func g(0 i32_t n, 1 i32_t x) -> i32_t { return x; }
    let g = abs_def(vec![int(Zero, "n"), int(One, "x")], i32_t(), vec![ret(var("x"))]);
    // func f(0 i32_t n, 1 i32_t x) -> i32_t { return g(n, x); }
    let call_g = app(var("g"), vec![var("n"), var("x")]);
    let f = abs_def(vec![int(Zero, "n"), int(One, "x")], i32_t(), vec![ret(call_g)]);
    assert!(check(&module(vec![func_def("g", g), func_def("f", f)])).is_ok());
}

#[test]
fn many() {
    init();
    let sq = plus(mult(var("x"), var("x")), var("x"));
    let f = abs_def(vec![int(Many, "x")], i32_t(), vec![ret(sq)]);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}

#[test]
fn non_linear_context() {
    init();
    // func g(i32_t y) -> i32_t;
    let g = pi_sig(vec![int(Many, "y")], i32_t());
    // func f(1 i32_t x) -> i32_t { return g(x); }
    let f = abs_def(vec![int(One, "x")], i32_t(), vec![ret(app(var("g"), vec![var("x")]))]);
    let m = module(vec![func_decl("g", g), func_def("f", f)]);
    assert_eq!(reason(&m), "Cannot use linear variable in non-linear context");
}

#[test]
fn arity() {
    init();
    let g = pi_sig(vec![int(Many, "y")], i32_t());
    let f = abs_def(vec![], i32_t(), vec![ret(app(var("g"), vec![num(1), num(2)]))]);
    let m = module(vec![extern_decl("g", g), func_def("f", f)]);
    assert_eq!(reason(&m), "Expected 1 arguments but found 2");
}

#[test]
fn axioms() {
    init();
    let ax = pi_sig(vec![int(Many, "y")], true_t(boolean(true)));
    let m = |body| {
        let f = abs_def(vec![int(Many, "x")], i32_t(), body);
        module(vec![axiom("ax", ax.clone()), func_def("f", f)])
    };

    let proof = app(var("ax"), vec![var("x")]);
    assert!(check(&m(vec![ret(because(var("x"), proof))])).is_ok());
    assert_eq!(
        reason(&m(vec![call(var("ax"), vec![var("x")]), ret(var("x"))])),
        "Function `ax` can only be used at compile-time"
    );
}

#[test]
fn recursion() {
    init();
    // func f(1 i32_t x) -> i32_t { return f(x); }
    let f = abs_def(vec![int(One, "x")], i32_t(), vec![ret(app(var("f"), vec![var("x")]))]);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());

    // calling a function defined later is not possible without forward declaration
    let g = abs_def(vec![], i32_t(), vec![ret(app(var("h"), vec![]))]);
    let h = abs_def(vec![], i32_t(), vec![ret(num(0))]);
    let m = module(vec![func_def("g", g), func_def("h", h)]);
    assert_eq!(reason(&m), "Cannot determine the argument quantities of `h`");
}

#[test]
fn function_arguments() {
    init();
    // func f((1 i32_t) -> i32_t k, 1 i32_t x) -> i32_t { return k(x); }
    let k = term_arg(Many, pi(vec![anon_term_arg(One, i32_t())], i32_t()), "k");
    let f = abs_def(vec![k, int(One, "x")], i32_t(), vec![ret(app(var("k"), vec![var("x")]))]);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}

/// `func f(bool_t b, 1 i32_t x) -> i32_t { if (b) { g(x); } return 0; }`
fn one_branch() -> Module<Parsed> {
    let g = pi_sig(vec![int(One, "y")], unit_t());
    let args = vec![term_arg(Many, bool_t(), "b"), int(One, "x")];
    let body = vec![
        if_else(var("b"), vec![call(var("g"), vec![var("x")])], None),
        ret(num(0)),
    ];
    module(vec![func_decl("g", g), func_def("f", abs_def(args, i32_t(), body))])
}

#[test]
fn branches_equal() {
    init();
    let m = one_branch();
    assert_eq!(
        reason(&m),
        "Linear variable must be used either in both branches or in none"
    );

    let args = vec![term_arg(Many, bool_t(), "b"), int(One, "x")];
    let body = vec![if_else(
        var("b"),
        vec![ret(var("x"))],
        Some(vec![ret(plus(var("x"), num(1)))]),
    )];
    let f = abs_def(args, i32_t(), body);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}

#[test]
fn branches_max() {
    init();
    let checker = Checker::new(BranchPolicy::Max);
    // with the maximum, `x` counts as used after the conditional
    assert!(checker.check_module(&one_branch()).is_ok());

    // ... which means that it must not be used again afterwards
    let g = pi_sig(vec![int(One, "y")], unit_t());
    let args = vec![term_arg(Many, bool_t(), "b"), int(One, "x")];
    let body = vec![
        if_else(var("b"), vec![call(var("g"), vec![var("x")])], None),
        ret(var("x")),
    ];
    let m = module(vec![func_decl("g", g), func_def("f", abs_def(args, i32_t(), body))]);
    let err = checker.check_module(&m).unwrap_err();
    assert_eq!(err.reasons[0].msg, "Variable has already been used once");
}

#[test]
fn unreachable_branch() {
    init();
    // func f(bool_t b, 1 i32_t x) -> i32_t { if (b) { impossible; } return x; }
    let args = vec![term_arg(Many, bool_t(), "b"), int(One, "x")];
    let body = vec![
        if_else(var("b"), vec![impossible(None)], None),
        ret(var("x")),
    ];
    let f = abs_def(args, i32_t(), body);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}

#[test]
fn linear_in_condition() {
    init();
    // func f(1 bool_t b) -> i32_t { if (b) { return 1; } return 0; }
    let body = vec![if_else(var("b"), vec![ret(num(1))], None), ret(num(0))];
    let f = abs_def(vec![term_arg(One, bool_t(), "b")], i32_t(), body);
    assert!(check(&module(vec![func_def("f", f)])).is_ok());
}
