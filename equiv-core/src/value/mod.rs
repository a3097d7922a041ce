//! Runtime value representation
//!
//! Values follow host-language reference semantics: primitives compare by
//! value, everything else has an identity ([`Value::same_ref`]) that is
//! distinct from its equality ([`Value::equals`]).

mod hash;

pub use hash::{string_hash, HASH_FALSE, HASH_TRUE};

use std::fmt;
use std::sync::Arc;

use crate::classpath::EnumConstant;
use crate::error::{MethodResult, Thrown};
use crate::object::ObjectRef;

/// Runtime value types
#[derive(Clone)]
pub enum Value {
    /// The null reference
    Null,

    Boolean(bool),

    Int(i32),

    Long(i64),

    Double(f64),

    Char(char),

    /// Immutable string; each `Arc` is a distinct string object
    String(Arc<str>),

    /// Enum constant (a singleton per type and ordinal)
    Enum(EnumConstant),

    /// Immutable list
    List(Arc<Vec<Value>>),

    /// Optional value
    Optional(Option<Arc<Value>>),

    /// Map as an insertion-ordered list of entries
    Map(Arc<Vec<(Value, Value)>>),

    /// Reference to a heap object
    Object(ObjectRef),
}

impl Value {
    /// Create a fresh string object
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    pub fn some(value: Value) -> Self {
        Value::Optional(Some(Arc::new(value)))
    }

    pub fn none() -> Self {
        Value::Optional(None)
    }

    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Arc::new(entries))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Name of the runtime type of this value
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(_) => "boolean".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Long(_) => "long".to_string(),
            Value::Double(_) => "double".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Enum(constant) => constant.type_name.to_string(),
            Value::List(_) => "List".to_string(),
            Value::Optional(_) => "Optional".to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Object(object) => object.class_name().to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumConstant> {
        match self {
            Value::Enum(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// `instanceof` test against a class or interface name
    pub fn instance_of(&self, class_name: &str) -> bool {
        match self {
            Value::Object(object) => object.instance_of(class_name),
            _ => false,
        }
    }

    /// Reference identity (`==` on references, value equality on primitives)
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => Arc::ptr_eq(a, b),
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Optional(None), Value::Optional(None)) => true,
            (Value::Optional(Some(a)), Value::Optional(Some(b))) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.same(b),
            _ => false,
        }
    }

    /// `this.equals(other)`; throws when invoked on null
    pub fn equals(&self, other: &Value) -> MethodResult<bool> {
        match (self, other) {
            (Value::Null, _) => Err(Thrown::null_pointer()),
            (Value::Object(object), _) => object.equals(other),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            (Value::Long(a), Value::Long(b)) => Ok(a == b),
            (Value::Double(a), Value::Double(b)) => {
                Ok(hash::canonical_bits(*a) == hash::canonical_bits(*b))
            }
            (Value::Char(a), Value::Char(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::Enum(a), Value::Enum(b)) => Ok(a == b),
            (Value::List(a), Value::List(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.iter().zip(b.iter()) {
                    if !Value::objects_equals(x, y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::Optional(a), Value::Optional(b)) => match (a, b) {
                (None, None) => Ok(true),
                (Some(x), Some(y)) => Value::objects_equals(x, y),
                _ => Ok(false),
            },
            (Value::Map(a), Value::Map(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (key, value) in a.iter() {
                    let mut found = false;
                    for (other_key, other_value) in b.iter() {
                        if Value::objects_equals(key, other_key)? {
                            found = Value::objects_equals(value, other_value)?;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// `this.hashCode()`; throws when invoked on null
    pub fn hash_code(&self) -> MethodResult<i32> {
        match self {
            Value::Null => Err(Thrown::null_pointer()),
            Value::Boolean(b) => Ok(if *b { HASH_TRUE } else { HASH_FALSE }),
            Value::Int(n) => Ok(*n),
            Value::Long(n) => Ok(hash::long_hash(*n)),
            Value::Double(d) => Ok(hash::long_hash(hash::canonical_bits(*d) as i64)),
            Value::Char(c) => Ok(*c as u32 as i32),
            Value::String(s) => Ok(string_hash(s)),
            Value::Enum(constant) => Ok(string_hash(&constant.type_name)
                .wrapping_mul(31)
                .wrapping_add(constant.ordinal as i32)),
            Value::List(items) => {
                let mut h: i32 = 1;
                for item in items.iter() {
                    h = h.wrapping_mul(31).wrapping_add(Value::objects_hash(item)?);
                }
                Ok(h)
            }
            Value::Optional(inner) => match inner {
                Some(value) => Value::objects_hash(value),
                None => Ok(0),
            },
            Value::Map(entries) => {
                let mut h: i32 = 0;
                for (key, value) in entries.iter() {
                    h = h.wrapping_add(Value::objects_hash(key)? ^ Value::objects_hash(value)?);
                }
                Ok(h)
            }
            Value::Object(object) => object.hash_code(),
        }
    }

    /// Null-safe equality (`Objects.equals`)
    pub fn objects_equals(a: &Value, b: &Value) -> MethodResult<bool> {
        match (a, b) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Null, _) => Ok(false),
            _ if a.same_ref(b) => Ok(true),
            _ => a.equals(b),
        }
    }

    /// Null-safe hash (`Objects.hashCode`)
    pub fn objects_hash(value: &Value) -> MethodResult<i32> {
        match value {
            Value::Null => Ok(0),
            _ => value.hash_code(),
        }
    }

    /// Combined hash of several values (`Objects.hash`)
    pub fn hash_all(values: &[Value]) -> MethodResult<i32> {
        let mut h: i32 = 1;
        for value in values {
            h = h.wrapping_mul(31).wrapping_add(Value::objects_hash(value)?);
        }
        Ok(h)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
            Value::Enum(constant) => write!(f, "{}", constant.name),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Optional(Some(inner)) => write!(f, "Optional[{}]", inner),
            Value::Optional(None) => write!(f, "Optional.empty"),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => write!(f, "{}", object),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Char(c) => write!(f, "{:?}", c),
            _ => write!(f, "{}", self),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl From<EnumConstant> for Value {
    fn from(constant: EnumConstant) -> Self {
        Value::Enum(constant)
    }
}

#[cfg(test)]
#[path = "../value_tests.rs"]
mod tests;
