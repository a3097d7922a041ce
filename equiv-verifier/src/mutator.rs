//! Single-field mutations

use equiv_core::{ObjectRef, Value};

use crate::errors::VerifierResult;
use crate::fields::{FieldAccessor, FieldDescriptor};
use crate::prefab::PrefabRepository;

/// One field and the value to put into it
#[derive(Debug, Clone)]
pub struct FieldMutation {
    pub field: FieldDescriptor,
    pub value: Value,
}

impl FieldMutation {
    /// A copy of `base` that differs in this field only
    pub fn apply(&self, base: &ObjectRef) -> VerifierResult<ObjectRef> {
        let copy = base.shallow_copy();
        copy.set_field(&self.field, self.value.clone())?;
        Ok(copy)
    }
}

/// Derives variants of an instance that differ in exactly one field
pub struct Mutator<'a> {
    repository: &'a mut PrefabRepository,
}

impl<'a> Mutator<'a> {
    pub fn new(repository: &'a mut PrefabRepository) -> Self {
        Self { repository }
    }

    /// The mutation that swaps the field between its red and black value
    pub fn mutation_for(
        &mut self,
        instance: &ObjectRef,
        field: &FieldDescriptor,
    ) -> VerifierResult<FieldMutation> {
        let entry = self.repository.values_for(&field.ty)?;
        let current = instance.get_field(field);
        let is_red = current.same_ref(&entry.red)
            || Value::objects_equals(&current, &entry.red).unwrap_or(false);
        let value = if is_red { entry.black } else { entry.red };
        Ok(FieldMutation {
            field: field.clone(),
            value,
        })
    }

    /// Copy of `instance` with the field swapped red <-> black
    pub fn vary(&mut self, instance: &ObjectRef, field: &FieldDescriptor) -> VerifierResult<ObjectRef> {
        self.mutation_for(instance, field)?.apply(instance)
    }

    /// Copy of `instance` with the field set to null
    pub fn with_null(instance: &ObjectRef, field: &FieldDescriptor) -> VerifierResult<ObjectRef> {
        FieldMutation {
            field: field.clone(),
            value: Value::Null,
        }
        .apply(instance)
    }

    /// Copy of `instance` with no mutation applied
    pub fn unchanged(instance: &ObjectRef) -> ObjectRef {
        instance.shallow_copy()
    }
}

#[cfg(test)]
#[path = "mutator_tests.rs"]
mod tests;
