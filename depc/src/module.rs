//! Modules, consisting of top-level entries.

use crate::expr::{Abs, Pi};
use crate::{Expr, Properties, Var};
use alloc::string::String;
use alloc::vec::Vec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    Signed,
    Unsigned,
}

/// Definition of an integer type, such as `typedef integer int (signed, 32);`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerDef {
    pub name: String,
    pub sign: Sign,
    pub width: u8,
}

/// Definition of a structure type with named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct StructDef<P: Properties> {
    pub name: String,
    pub fields: Vec<(String, Expr<P>)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeDef<P: Properties> {
    Integer(IntegerDef),
    Struct(StructDef<P>),
}

/// Named function signature without definition.
///
/// Used for axioms, extern functions, and forward declarations,
/// which differ only in how they may be used.
#[derive(Clone, Debug, PartialEq)]
pub struct Decl<P: Properties> {
    pub name: String,
    pub pi: Pi<P>,
}

/// Named function definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef<P: Properties> {
    pub name: String,
    pub abs: Abs<P>,
}

/// Top-level entry of a module.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry<P: Properties> {
    TypeDef(TypeDef<P>),
    /// function that exists only at compile-time
    Axiom(Decl<P>),
    /// function implemented outside of DepC
    Extern(Decl<P>),
    /// forward declaration of a function
    FuncDecl(Decl<P>),
    FuncDef(FuncDef<P>),
}

/// Sequence of entries.
///
/// Later entries may refer to names introduced by earlier ones.
/// Module-level names are referred to by variables with index 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Module<P: Properties> {
    pub entries: Vec<Entry<P>>,
}

impl<P: Properties> Entry<P> {
    /// Name introduced by the entry.
    pub fn name(&self) -> &str {
        match self {
            Self::TypeDef(TypeDef::Integer(def)) => &def.name,
            Self::TypeDef(TypeDef::Struct(def)) => &def.name,
            Self::Axiom(decl) | Self::Extern(decl) | Self::FuncDecl(decl) => &decl.name,
            Self::FuncDef(def) => &def.name,
        }
    }

    /// Variable by which the entry is referred to.
    pub fn var(&self) -> Var {
        Var::new(self.name(), 0)
    }
}

impl<P: Properties> Module<P> {
    pub fn new(entries: Vec<Entry<P>>) -> Self {
        Self { entries }
    }

    /// Find the last entry introducing the given name.
    pub fn get(&self, name: &str) -> Option<&Entry<P>> {
        self.entries.iter().rev().find(|e| e.name() == name)
    }
}
