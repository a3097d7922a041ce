//! Type references used to describe field types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Value;

/// A reference to a type of the object model
///
/// Class and enum types are referenced by name and resolved through a
/// [`ClassPath`](crate::ClassPath), so recursive type graphs need no
/// special construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Boolean,
    Int,
    Long,
    Double,
    Char,

    /// Nullable, boxed form of a primitive type
    Boxed(Box<TypeRef>),

    String,

    /// The root object type; its instances only have identity
    Object,

    /// A named class or interface
    Class(String),

    /// A named enumeration
    Enum(String),

    List(Box<TypeRef>),
    Optional(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
}

impl TypeRef {
    pub fn class(name: impl Into<String>) -> Self {
        TypeRef::Class(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeRef::Enum(name.into())
    }

    pub fn boxed(inner: TypeRef) -> Self {
        TypeRef::Boxed(Box::new(inner))
    }

    pub fn list(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map(Box::new(key), Box::new(value))
    }

    /// Primitive types can never hold null
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeRef::Boolean | TypeRef::Int | TypeRef::Long | TypeRef::Double | TypeRef::Char
        )
    }

    /// The class name for class types
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeRef::Class(name) => Some(name),
            _ => None,
        }
    }

    /// The value a freshly allocated field of this type holds
    pub fn default_value(&self) -> Value {
        match self {
            TypeRef::Boolean => Value::Boolean(false),
            TypeRef::Int => Value::Int(0),
            TypeRef::Long => Value::Long(0),
            TypeRef::Double => Value::Double(0.0),
            TypeRef::Char => Value::Char('\0'),
            _ => Value::Null,
        }
    }

    /// Whether a value may be stored in a field of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => !self.is_primitive(),
            (TypeRef::Boolean, Value::Boolean(_))
            | (TypeRef::Int, Value::Int(_))
            | (TypeRef::Long, Value::Long(_))
            | (TypeRef::Double, Value::Double(_))
            | (TypeRef::Char, Value::Char(_))
            | (TypeRef::String, Value::String(_))
            | (TypeRef::List(_), Value::List(_))
            | (TypeRef::Optional(_), Value::Optional(_))
            | (TypeRef::Map(_, _), Value::Map(_)) => true,
            (TypeRef::Boxed(inner), value) => inner.accepts(value),
            (TypeRef::Object, _) => true,
            (TypeRef::Class(name), Value::Object(object)) => object.instance_of(name),
            (TypeRef::Enum(name), Value::Enum(constant)) => &*constant.type_name == name,
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Boolean => write!(f, "boolean"),
            TypeRef::Int => write!(f, "int"),
            TypeRef::Long => write!(f, "long"),
            TypeRef::Double => write!(f, "double"),
            TypeRef::Char => write!(f, "char"),
            TypeRef::Boxed(inner) => match inner.as_ref() {
                TypeRef::Boolean => write!(f, "Boolean"),
                TypeRef::Int => write!(f, "Integer"),
                TypeRef::Long => write!(f, "Long"),
                TypeRef::Double => write!(f, "Double"),
                TypeRef::Char => write!(f, "Character"),
                other => write!(f, "{}", other),
            },
            TypeRef::String => write!(f, "String"),
            TypeRef::Object => write!(f, "{}", crate::ROOT_CLASS),
            TypeRef::Class(name) | TypeRef::Enum(name) => write!(f, "{}", name),
            TypeRef::List(element) => write!(f, "List<{}>", element),
            TypeRef::Optional(inner) => write!(f, "Optional<{}>", inner),
            TypeRef::Map(key, value) => write!(f, "Map<{}, {}>", key, value),
        }
    }
}
