//! Annotation policies for expressions.
//!
//! Every expression node carries a value and some properties.
//! Which properties are carried is determined by a policy type
//! implementing [`Properties`].

use crate::{Expr, Loc};
use alloc::boxed::Box;
use core::fmt::Debug;

/// Annotation policy of expressions.
pub trait Properties: Clone + Debug + PartialEq {
    /// Annotation attached to every expression node.
    type Expr: Clone + Debug;

    /// Source location of an annotation, if known.
    fn loc(props: &Self::Expr) -> Option<&Loc>;
}

/// Policy of parsed expressions, annotated with their source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed;

impl Properties for Parsed {
    type Expr = Option<Loc>;

    fn loc(props: &Self::Expr) -> Option<&Loc> {
        props.as_ref()
    }
}

/// Policy of typechecked expressions, annotated with location and sort.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typed;

/// Annotation of a typechecked expression.
#[derive(Clone, Debug)]
pub struct TypedProps {
    pub loc: Option<Loc>,
    pub sort: Sort,
}

/// What a typechecked expression is classified by.
#[derive(Clone, Debug, PartialEq)]
pub enum Sort {
    /// the expression is a type, such as `i32_t`
    Kind,
    /// the expression is a term of the given type
    Type(Box<Expr<Typed>>),
}

impl Properties for Typed {
    type Expr = TypedProps;

    fn loc(props: &Self::Expr) -> Option<&Loc> {
        props.loc.as_ref()
    }
}
