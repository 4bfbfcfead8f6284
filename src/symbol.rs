//! # Symbols
//!
//! A [`Symbol`] is any named entity resolvable by identifier against the
//! symbol table handed down by the earlier lexical/structural pass (`spec.md`
//! §3). This crate never builds that table -- it only reads it -- so there is
//! no insertion API here beyond what the handful of unit tests need to stand
//! one up.

use std::collections::HashMap;

use crate::types::Type;

/// A mapping from identifier to [`Symbol`], as produced by the earlier pass.
pub type SymbolTable = HashMap<String, Symbol>;

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSymbol {
    pub params: Vec<Type>,
    pub return_type: Type,
    /// Locals visible inside this method's body -- parameters plus whatever
    /// the earlier pass pre-populated. Looked up first by the resolver while
    /// `current_method` names this method.
    pub locals: SymbolTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSymbol {
    pub symbols: SymbolTable,
}

/// Any named entity the resolver can return. No cycles except the
/// module<->method relationship implied by a module's own symbol map
/// containing that module's methods.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Type(Type),
    /// A typed value -- e.g. a variable or constant binding.
    Expression(Type),
    Method(MethodSymbol),
    Module(ModuleSymbol),
}

impl Symbol {
    /// The type this symbol contributes to an expression referencing it.
    /// Methods are never used as operand values in this subset (there is no
    /// call expression in the closed AST node set), so this returns
    /// `Type::NoneType` for them rather than modelling a function type that
    /// nothing in the lattice ever consumes.
    pub fn type_of(&self) -> Type {
        match self {
            Symbol::Type(t) => t.clone(),
            Symbol::Expression(t) => t.clone(),
            Symbol::Method(_) => Type::NoneType,
            Symbol::Module(_) => Type::NoneType,
        }
    }
}
