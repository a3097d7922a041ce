//! Heap objects
//!
//! An [`ObjectRef`] is a shared handle to an allocated object. Cloning the
//! handle does not copy the object; two handles are the same reference when
//! they point at the same allocation.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::class::ClassDef;
use crate::error::{MethodResult, ModelError, ModelResult};
use crate::value::Value;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

struct Object {
    id: u64,
    class: Arc<ClassDef>,
    slots: RwLock<Vec<Value>>,
}

/// Shared reference to a heap object
#[derive(Clone)]
pub struct ObjectRef(Arc<Object>);

impl ObjectRef {
    /// Allocate an instance with every field at its default value.
    /// No constructor runs.
    pub fn allocate(class: &Arc<ClassDef>) -> ModelResult<Self> {
        if class.is_interface() {
            return Err(ModelError::not_instantiable(
                class.name(),
                "it is an interface",
            ));
        }
        if class.is_abstract() {
            return Err(ModelError::not_instantiable(
                class.name(),
                "it is an abstract class",
            ));
        }
        if !class.is_allocatable() {
            return Err(ModelError::not_instantiable(
                class.name(),
                "it cannot be allocated without running its constructor",
            ));
        }
        Ok(Self::allocate_unchecked(class))
    }

    fn allocate_unchecked(class: &Arc<ClassDef>) -> Self {
        let slots = class
            .layout()
            .iter()
            .map(|slot| slot.field.ty.default_value())
            .collect();
        ObjectRef(Arc::new(Object {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            class: class.clone(),
            slots: RwLock::new(slots),
        }))
    }

    /// Allocate an instance and run the class's constructor on it
    pub fn construct(class: &Arc<ClassDef>) -> ModelResult<Self> {
        if class.is_abstract() {
            return Err(ModelError::not_instantiable(
                class.name(),
                "it is abstract",
            ));
        }
        if !class.is_allocatable() && class.constructor().is_none() {
            return Err(ModelError::not_instantiable(
                class.name(),
                "it has no usable constructor",
            ));
        }
        let object = Self::allocate_unchecked(class);
        if let Some(constructor) = class.constructor() {
            constructor(&object).map_err(|thrown| ModelError::ConstructorFailed {
                class: class.name().to_string(),
                thrown,
            })?;
        }
        Ok(object)
    }

    /// Allocate an instance and assign the given field values
    pub fn build<N, I>(class: &Arc<ClassDef>, values: I) -> ModelResult<Self>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let object = Self::allocate(class)?;
        for (name, value) in values {
            object.set(name.as_ref(), value)?;
        }
        Ok(object)
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        &self.0.class
    }

    pub fn class_name(&self) -> &str {
        self.0.class.name()
    }

    /// Unique allocation id
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Hash derived from the allocation, as the root class computes it
    pub fn identity_hash(&self) -> i32 {
        (self.0.id.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 33) as i32
    }

    /// Reference identity
    pub fn same(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn instance_of(&self, class_name: &str) -> bool {
        self.0.class.is_subclass_of(class_name)
    }

    /// Read a field; unknown fields read as null
    pub fn get(&self, name: &str) -> Value {
        self.try_get(name).unwrap_or(Value::Null)
    }

    pub fn try_get(&self, name: &str) -> ModelResult<Value> {
        if let Some(slot) = self.0.class.slot(name) {
            return Ok(self.0.slots.read()[slot.index].clone());
        }
        match self.0.class.static_field(name) {
            Some((owner, _)) => Ok(owner.static_value(name).unwrap_or(Value::Null)),
            None => Err(ModelError::no_such_field(self.class_name(), name)),
        }
    }

    /// Write a field, ignoring `final`
    pub fn set(&self, name: &str, value: Value) -> ModelResult<()> {
        if let Some(slot) = self.0.class.slot(name) {
            check_type(&slot.field.name, &slot.field.ty, &value)?;
            self.0.slots.write()[slot.index] = value;
            return Ok(());
        }
        match self.0.class.static_field(name) {
            Some((owner, field)) => {
                check_type(&field.name, &field.ty, &value)?;
                owner.set_static_value(name, value);
                Ok(())
            }
            None => Err(ModelError::no_such_field(self.class_name(), name)),
        }
    }

    /// Read a slot by layout index
    pub fn get_slot(&self, index: usize) -> Option<Value> {
        self.0.slots.read().get(index).cloned()
    }

    pub fn set_slot(&self, index: usize, value: Value) -> ModelResult<()> {
        let slot = self
            .0
            .class
            .layout()
            .get(index)
            .ok_or_else(|| ModelError::no_such_field(self.class_name(), format!("#{}", index)))?;
        check_type(&slot.field.name, &slot.field.ty, &value)?;
        self.0.slots.write()[index] = value;
        Ok(())
    }

    /// Snapshot of all instance field values in layout order
    pub fn fields(&self) -> Vec<(String, Value)> {
        let slots = self.0.slots.read();
        self.0
            .class
            .layout()
            .iter()
            .map(|slot| (slot.field.name.clone(), slots[slot.index].clone()))
            .collect()
    }

    /// New object of the same class sharing every field value
    pub fn shallow_copy(&self) -> ObjectRef {
        let copy = Self::allocate_unchecked(&self.0.class);
        *copy.0.slots.write() = self.0.slots.read().clone();
        copy
    }

    /// Copy every field of this object into `target`, which must be an
    /// instance of this object's class or one of its subclasses
    pub fn copy_into(&self, target: &ObjectRef) -> ModelResult<()> {
        if !target.instance_of(self.class_name()) {
            return Err(ModelError::TypeMismatch {
                field: "<this>".to_string(),
                expected: self.class_name().to_string(),
                actual: target.class_name().to_string(),
            });
        }
        if self.same(target) {
            return Ok(());
        }
        let source = self.0.slots.read().clone();
        let mut slots = target.0.slots.write();
        for (index, value) in source.into_iter().enumerate() {
            slots[index] = value;
        }
        Ok(())
    }

    /// Invoke `equals`; identity when the class does not override it
    pub fn equals(&self, other: &Value) -> MethodResult<bool> {
        match self.0.class.equals_method() {
            Some(method) => (method.func)(self, other),
            None => Ok(matches!(other, Value::Object(o) if o.same(self))),
        }
    }

    /// Invoke `hashCode`; identity hash when the class does not override it
    pub fn hash_code(&self) -> MethodResult<i32> {
        match self.0.class.hash_code_method() {
            Some(method) => (method.func)(self),
            None => Ok(self.identity_hash()),
        }
    }

    /// Invoke `canEqual`, if the class hierarchy defines one
    pub fn can_equal(&self, other: &Value) -> Option<MethodResult<bool>> {
        self.0
            .class
            .can_equal_method()
            .map(|method| (method.func)(self, other))
    }

    /// Invoke `toString`
    pub fn to_string_repr(&self) -> MethodResult<String> {
        match self.0.class.to_string_method() {
            Some(to_string) => to_string(self),
            None => Ok(self.default_to_string()),
        }
    }

    fn default_to_string(&self) -> String {
        format!("{}@{:x}", self.class_name(), self.identity_hash())
    }
}

fn check_type(field: &str, ty: &crate::TypeRef, value: &Value) -> ModelResult<()> {
    if ty.accepts(value) {
        Ok(())
    } else {
        Err(ModelError::TypeMismatch {
            field: field.to_string(),
            expected: ty.to_string(),
            actual: value.type_name(),
        })
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for ObjectRef {}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_repr() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "{}", self.default_to_string()),
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class_name(), self.0.id)
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
