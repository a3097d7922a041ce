//! The contract checks
//!
//! Each check is a plain function over a [`CheckContext`]. The pipeline runs
//! them in a fixed order and stops at the first error.

use equiv_core::{ClassDef, ObjectRef, TypeRef};
use std::sync::Arc;

use crate::config::{Configuration, Warning};
use crate::errors::{CheckKind, VerifierResult};
use crate::fields::{FieldAccessor, FieldDescriptor, FieldModel};
use crate::instantiator::Instantiator;
use crate::mutator::Mutator;
use crate::prefab::{PrefabEntry, PrefabRepository, Tint};

pub(crate) mod laws;

mod consistency;
mod hash_consistency;
mod hierarchy;
mod null_fields;
mod null_tolerance;
mod preconditions;
mod reflexivity;
mod significant_fields;
mod symmetry;
mod transitivity;
mod type_tolerance;

/// Signature shared by all checks
pub type CheckFn = fn(&mut CheckContext<'_>) -> VerifierResult<()>;

/// Every check, in the order it runs
pub const PIPELINE: &[(CheckKind, CheckFn)] = &[
    (CheckKind::Preconditions, preconditions::check),
    (CheckKind::Reflexivity, reflexivity::check),
    (CheckKind::Symmetry, symmetry::check),
    (CheckKind::Transitivity, transitivity::check),
    (CheckKind::Consistency, consistency::check),
    (CheckKind::NullTolerance, null_tolerance::check),
    (CheckKind::TypeTolerance, type_tolerance::check),
    (CheckKind::NullFields, null_fields::check),
    (CheckKind::HashConsistency, hash_consistency::check),
    (CheckKind::SignificantFields, significant_fields::check),
    (CheckKind::Hierarchy, hierarchy::check),
];

/// State shared by the checks of one run
pub struct CheckContext<'a> {
    pub config: &'a Configuration,
    pub model: FieldModel,
    repository: PrefabRepository,
}

impl<'a> CheckContext<'a> {
    pub fn new(config: &'a Configuration) -> VerifierResult<Self> {
        let model = FieldModel::build(config)?;
        let instantiator = Instantiator::new(config.classpath.clone(), config.examples.clone());
        let repository = PrefabRepository::new(
            config.classpath.clone(),
            config.prefab_values.clone(),
            instantiator,
            config.settings.max_recursion_depth,
        );
        Ok(Self {
            config,
            model,
            repository,
        })
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        self.model.class()
    }

    pub fn suppressed(&self, warning: Warning) -> bool {
        self.config.is_suppressed(warning)
    }

    pub fn instantiator(&self) -> &Instantiator {
        self.repository.instantiator()
    }

    pub fn values_for(&mut self, ty: &TypeRef) -> VerifierResult<PrefabEntry> {
        self.repository.values_for(ty)
    }

    /// A fresh, fully populated instance of the class under test.
    ///
    /// With at least two examples configured the first one serves as red and
    /// the second one as black.
    pub fn instance(&mut self, tint: Tint) -> VerifierResult<ObjectRef> {
        if let [red, black, ..] = self.config.examples.as_slice() {
            return Ok(match tint {
                Tint::Red | Tint::RedCopy => red.shallow_copy(),
                Tint::Black => black.shallow_copy(),
            });
        }
        let class = self.class().clone();
        self.repository.instance_of(&class, tint)
    }

    /// A populated instance of some other class, e.g. a subclass
    pub fn instance_of(&mut self, class: &Arc<ClassDef>, tint: Tint) -> VerifierResult<ObjectRef> {
        self.repository.instance_of(class, tint)
    }

    /// An instance whose fields hold their default values.
    ///
    /// Reference fields that may not be null get their red value instead.
    pub fn zero_instance(&mut self) -> VerifierResult<ObjectRef> {
        let class = self.class().clone();
        let zero = self.repository.instantiator().instantiate(&class)?;
        let nulls_allowed = !self.suppressed(Warning::NullFields);
        let fields = self.model.instance_fields().cloned().collect::<Vec<_>>();
        for field in fields {
            let value = if field.ty.is_primitive() || (field.is_nullable() && nulls_allowed) {
                field.ty.default_value()
            } else {
                self.values_for(&field.ty)?.red
            };
            zero.set_field(&field, value)?;
        }
        Ok(zero)
    }

    /// Copy of `instance` with one field swapped between red and black
    pub fn vary(&mut self, instance: &ObjectRef, field: &FieldDescriptor) -> VerifierResult<ObjectRef> {
        Mutator::new(&mut self.repository).vary(instance, field)
    }

    pub fn with_null(&self, instance: &ObjectRef, field: &FieldDescriptor) -> VerifierResult<ObjectRef> {
        Mutator::with_null(instance, field)
    }

    /// Fields expected to take part in equality
    pub fn significant_fields(&self) -> Vec<FieldDescriptor> {
        self.model.significant_fields().cloned().collect()
    }

    pub fn instance_fields(&self) -> Vec<FieldDescriptor> {
        self.model.instance_fields().cloned().collect()
    }
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
