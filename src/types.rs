//! # Type Lattice
//!
//! The closed set of built-in types recognised by this compiler subset, plus
//! the single parameterised sequence kind. Mirrors `why_lib::typechecker::types`
//! in spirit (a `Type` enum compared structurally, with a `TryFrom` style
//! constructor at the boundary) but the lattice here is closed and flat: there
//! are no user-defined types, so `Type` needs no interner and no `Context`
//! threaded through construction.
//!
//! Built-ins are singletons by construction -- there is exactly one way to
//! write `Type::Integer` -- so equality is simply `derive(PartialEq, Eq)`.
//! Sequence types are the one parameterised case and compare structurally on
//! their `value_type`/`valid_key`, which is exactly identifier-based equality
//! (`Sequence[int] == Sequence[int]`, `Sequence[int] != Sequence[str]`).

use std::fmt::{self, Display, Formatter};

/// The external ABI tag attached to every [`Type`]. Consumed by the code
/// generator / downstream ABI description; this crate only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AbiType {
    Integer,
    Boolean,
    String,
    ByteArray,
    Array,
    Map,
    InteropInterface,
    Any,
}

/// A runtime literal value produced while walking a literal AST node. This is
/// the crate's stand-in for the source language's dynamically-typed values --
/// only what `get_type` needs to classify a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    None,
}

/// A built-in type descriptor. Closed set: the accepted subset has no
/// user-defined types, so there is no escape hatch variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Integer,
    Boolean,
    String,
    NoneType,
    /// A homogeneous sequence with a declared element type and a declared
    /// valid key type (the type an index/subscript operand must have).
    Sequence {
        value_type: Box<Type>,
        valid_key: Box<Type>,
    },
}

impl Type {
    /// Construct the parameterised sequence kind.
    pub fn sequence(value_type: Type, valid_key: Type) -> Type {
        Type::Sequence {
            value_type: Box::new(value_type),
            valid_key: Box::new(valid_key),
        }
    }

    /// Stable identifier string, as recognised at the output boundary (`int`,
    /// `str`, `bool`, `none`, or `<name>[<value_type>]` for sequences).
    pub fn identifier(&self) -> String {
        match self {
            Type::Integer => "int".to_string(),
            Type::Boolean => "bool".to_string(),
            Type::String => "str".to_string(),
            Type::NoneType => "none".to_string(),
            Type::Sequence { value_type, .. } => {
                format!("Sequence[{}]", value_type.identifier())
            }
        }
    }

    /// The external ABI tag for this type.
    pub fn abi_type(&self) -> AbiType {
        match self {
            Type::Integer => AbiType::Integer,
            Type::Boolean => AbiType::Boolean,
            Type::String => AbiType::String,
            Type::NoneType => AbiType::Any,
            // a sequence keyed by consecutive integers is array-shaped at the
            // ABI boundary; anything else is map-shaped.
            Type::Sequence { valid_key, .. } => {
                if valid_key.as_ref() == &Type::Integer {
                    AbiType::Array
                } else {
                    AbiType::Map
                }
            }
        }
    }

    /// Reflective predicate: does `value` belong to this type?
    pub fn is_type_of(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Type::Integer, Value::Int(_))
                | (Type::Boolean, Value::Bool(_))
                | (Type::String, Value::Str(_))
                | (Type::NoneType, Value::None)
        )
    }

    /// Class-side constructor: builds the descriptor for `value` if it
    /// belongs to this type.
    pub fn build(&self, value: &Value) -> Option<Type> {
        if self.is_type_of(value) {
            Some(self.clone())
        } else {
            None
        }
    }

    /// True iff `key` is an acceptable subscript operand type for this
    /// sequence. Non-sequence types are never valid keys of anything (this is
    /// only meaningful when `self` is a `Sequence`).
    pub fn is_valid_key(&self, key: &Type) -> bool {
        match self {
            Type::Sequence { valid_key, .. } => valid_key.as_ref() == key,
            _ => false,
        }
    }

    /// All built-in primitives, in the order `get_type` probes them. Does not
    /// include `Sequence`, which is only ever reached via a declared
    /// annotation, never inferred from a bare runtime value.
    fn builtins() -> [Type; 4] {
        [Type::Boolean, Type::Integer, Type::String, Type::NoneType]
    }

    /// Top-level reflective dispatch: the most specific built-in whose
    /// `is_type_of` accepts `value`, falling back to `Type::NoneType` if
    /// nothing matches.
    pub fn get_type(value: &Value) -> Type {
        Type::builtins()
            .into_iter()
            .find(|t| t.is_type_of(value))
            .unwrap_or(Type::NoneType)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}
