//! Printing of expressions, statements, and modules in DepC syntax.

use crate::expr::{App, ArithOp, BoolExpr, RelationOp};
use crate::module::{Decl, IntegerDef, Sign, StructDef, TypeDef};
use crate::stmt::IfElse;
use crate::*;
use core::fmt::{self, Display};

fn comma_separated<T: Display>(xs: &[T], f: &mut fmt::Formatter) -> fmt::Result {
    let mut iter = xs.iter();
    if let Some(x) = iter.next() {
        write!(f, "{}", x)?;
    }
    iter.try_for_each(|x| write!(f, ", {}", x))
}

/// Print the arguments and return type shared by lambdas and function types.
fn signature<P: Properties>(
    args: &[FuncArg<P>],
    is_mutable: bool,
    ret_type: &Expr<P>,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    write!(f, "(")?;
    comma_separated(args, f)?;
    write!(f, ")")?;
    if is_mutable {
        write!(f, " mutable")?;
    }
    write!(f, " -> {}", ret_type)
}

impl Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.idx == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.name, self.idx)
        }
    }
}

impl Display for Global {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{}::", module)?;
        }
        write!(f, "{}", self.name)
    }
}

impl Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "0"),
            Self::One => write!(f, "1"),
            Self::Many => write!(f, "many"),
        }
    }
}

impl<P: Properties> Display for FuncArg<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Type(_) => write!(f, "typename")?,
            Self::Term(TermArg { qty: Qty::Many, ty, .. }) => write!(f, "{}", ty)?,
            Self::Term(TermArg { qty, ty, .. }) => write!(f, "{} {}", qty, ty)?,
        }
        match self.var() {
            Some(v) => write!(f, " {}", v),
            None => Ok(()),
        }
    }
}

impl Display for RelationOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        };
        write!(f, "{}", op)
    }
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mult => "*",
            Self::Div => "/",
        };
        write!(f, "{}", op)
    }
}

/// Operand of a binary or prefix operator, parenthesised if it is compound.
struct Operand<'a, P: Properties>(&'a Expr<P>);

impl<'a, P: Properties> Display for Operand<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ExprValue::*;
        match &self.0.value {
            BoolExpr(_) | Relation { .. } | Arith { .. } | Because { .. } | Abs(_) | Pi(_) => {
                write!(f, "({})", self.0)
            }
            _ => write!(f, "{}", self.0),
        }
    }
}

impl<P: Properties> Display for BoolExpr<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Not(e) => write!(f, "not {}", Operand(e)),
            Self::And(l, r) => write!(f, "{} and {}", Operand(l), Operand(r)),
            Self::Or(l, r) => write!(f, "{} or {}", Operand(l), Operand(r)),
        }
    }
}

impl<P: Properties> Display for App<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", Operand(&self.func))?;
        comma_separated(&self.args, f)?;
        write!(f, ")")
    }
}

impl<P: Properties> Display for Abs<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[] ")?;
        signature(&self.args, self.is_mutable, &self.ret_type, f)?;
        write!(f, " {}", self.body)
    }
}

impl<P: Properties> Display for Pi<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        signature(&self.args, self.is_mutable, &self.ret_type, f)
    }
}

impl<P: Properties> Display for Sigma<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        comma_separated(&self.args, f)?;
        write!(f, ")")
    }
}

impl<P: Properties> Display for Expr<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ExprValue::*;
        match &self.value {
            Typename => write!(f, "typename"),
            Bool => write!(f, "bool_t"),
            Unit => write!(f, "unit_t"),
            I8 => write!(f, "i8_t"),
            I16 => write!(f, "i16_t"),
            I32 => write!(f, "i32_t"),
            I64 => write!(f, "i64_t"),
            U8 => write!(f, "u8_t"),
            U16 => write!(f, "u16_t"),
            U32 => write!(f, "u32_t"),
            U64 => write!(f, "u64_t"),
            Cstr => write!(f, "cstr_t"),
            Auto => write!(f, "auto"),
            Scope => write!(f, "scope_t"),
            TrueT(e) => write!(f, "true_t({})", e),
            Array { ty, size } => write!(f, "array_t({}, {})", ty, size),
            Ref { ty, scope } => write!(f, "ref_t({}, {})", ty, scope),
            Pi(pi) => pi.fmt(f),
            Sigma(sigma) => sigma.fmt(f),
            BoolConst(b) => write!(f, "{}", b),
            NumConst(n) => write!(f, "{}", n),
            StrLit(s) => write!(f, "\"{}\"", s),
            BoolExpr(b) => b.fmt(f),
            Relation { op, lhs, rhs } => write!(f, "{} {} {}", Operand(lhs), op, Operand(rhs)),
            Arith { op, lhs, rhs } => write!(f, "{} {} {}", Operand(lhs), op, Operand(rhs)),
            Var(v) => v.fmt(f),
            Global(g) => g.fmt(f),
            App(app) => app.fmt(f),
            Abs(abs) => abs.fmt(f),
            InitList(xs) => {
                write!(f, "{{")?;
                comma_separated(xs, f)?;
                write!(f, "}}")
            }
            Member { object, field } => write!(f, "{}.{}", Operand(object), field),
            Subscript { object, index } => write!(f, "{}[{}]", Operand(object), index),
            AddressOf(e) => write!(f, "&{}", Operand(e)),
            Deref(e) => write!(f, "*{}", Operand(e)),
            ScopeOf(e) => write!(f, "scopeof({})", e),
            Because { value, reason } => write!(f, "{} because {}", Operand(value), reason),
        }
    }
}

impl<P: Properties> Display for Body<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ ")?;
        self.stmts.iter().try_for_each(|s| write!(f, "{} ", s))?;
        write!(f, "}}")
    }
}

impl<P: Properties> Display for IfElse<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "if ({}) {}", self.cond, self.true_branch)?;
        match &self.false_branch {
            Some(fb) => write!(f, " else {}", fb),
            None => Ok(()),
        }
    }
}

impl<P: Properties> Display for Stmt<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::IfElse(ie) => ie.fmt(f),
            Self::Return(None) => write!(f, "return;"),
            Self::Return(Some(e)) => write!(f, "return {};", e),
            Self::Impossible(None) => write!(f, "impossible;"),
            Self::Impossible(Some(e)) => write!(f, "impossible because {};", e),
            Self::App(app) => write!(f, "{};", app),
        }
    }
}

impl Display for IntegerDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = match self.sign {
            Sign::Signed => "signed",
            Sign::Unsigned => "unsigned",
        };
        write!(f, "typedef integer {} ({}, {});", self.name, sign, self.width)
    }
}

impl<P: Properties> Display for StructDef<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "typedef struct {} {{ ", self.name)?;
        for (field, ty) in &self.fields {
            write!(f, "{} {}; ", ty, field)?;
        }
        write!(f, "}};")
    }
}

impl<P: Properties> Display for Decl<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} : {};", self.name, self.pi)
    }
}

impl<P: Properties> Display for Entry<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TypeDef(TypeDef::Integer(def)) => def.fmt(f),
            Self::TypeDef(TypeDef::Struct(def)) => def.fmt(f),
            Self::Axiom(decl) => write!(f, "axiom {}", decl),
            Self::Extern(decl) => write!(f, "extern {}", decl),
            Self::FuncDecl(decl) => write!(f, "func {}", decl),
            Self::FuncDef(def) => write!(f, "func {} : {}", def.name, def.abs),
        }
    }
}

impl<P: Properties> Display for Module<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.entries.iter().try_for_each(|e| writeln!(f, "{}", e))
    }
}

#[cfg(test)]
mod tests {
    use crate::make::*;
    use crate::Qty;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn variables() {
        assert_eq!(var("x").to_string(), "x");
        assert_eq!(var_idx("x", 2).to_string(), "x:2");
    }

    #[test]
    fn function_type() {
        let args = vec![type_arg("t"), term_arg(Qty::One, var("t"), "x")];
        assert_eq!(pi(args, var("t")).to_string(), "(typename t, 1 t x) -> t");
    }

    #[test]
    fn operators() {
        let e = mult(plus(var("x"), num(1)), not(boolean(true)));
        assert_eq!(e.to_string(), "(x + 1) * (not true)");
    }

    #[test]
    fn immediate_invocation() {
        let x = term_arg(Qty::Many, i32_t(), "x");
        let lam = abs(vec![x], i32_t(), vec![ret(plus(var("x"), num(1)))]);
        let e = app(lam, vec![num(5)]);
        assert_eq!(e.to_string(), "([] (i32_t x) -> i32_t { return x + 1; })(5)");
    }

    #[test]
    fn conditional() {
        let s = if_else(boolean(false), vec![ret(num(1))], Some(vec![ret(num(2))]));
        assert_eq!(s.to_string(), "if (false) { return 1; } else { return 2; }");
    }
}
