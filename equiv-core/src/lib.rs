//! Core object model for Equiv
//!
//! This crate provides the runtime that the verifier inspects:
//! - Type references describing field types
//! - Class definitions with fields, modifiers and behaviour closures
//! - Heap objects with identity and by-name field access
//! - Values with host-style `equals`/`hashCode` semantics
//! - The class path used to resolve types by name
//!
//! Behaviour closures model the methods of a class. A closure signals an
//! exception by returning `Err(Thrown)`, which the verifier reports verbatim.

pub mod class;
pub mod classpath;
pub mod error;
pub mod object;
pub mod types;
pub mod value;

pub use class::{
    ClassBuilder, ClassDef, ClassKind, ConstructorFn, EqualsFn, FieldDef, FieldModifiers,
    HashCodeFn, Method, Slot, ToStringFn,
};
pub use classpath::{ClassPath, EnumConstant, EnumDef};
pub use error::{MethodResult, ModelError, ModelResult, Thrown};
pub use object::ObjectRef;
pub use types::TypeRef;
pub use value::Value;

/// Name of the implicit root class every class extends
pub const ROOT_CLASS: &str = "Object";

/// Prelude module for common imports
pub mod prelude {
    pub use crate::{
        ClassBuilder, ClassDef, ClassKind, ClassPath, EnumDef, FieldModifiers, MethodResult,
        ObjectRef, Thrown, TypeRef, Value,
    };
}
