//! Field model of the class under test
//!
//! Every declared and inherited field is classified exactly once per run.
//! The classification decides what the significant-fields check expects
//! from `equals` and `hashCode`.

use equiv_core::{ClassDef, ModelResult, ObjectRef, TypeRef, Value};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::annotations::FieldCapability;
use crate::config::{Configuration, Warning};
use crate::errors::VerifierResult;

/// Role of a field in the equality contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    /// Expected to influence `equals` and `hashCode`
    Significant,
    /// Expected not to influence them
    Excluded,
    /// Transient: must not influence them
    Transient,
    /// Static: not part of any instance
    Static,
}

/// A field together with everything the checks need to know about it
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
    pub declaring_class: Arc<str>,
    /// Layout index of an instance field; `None` for statics
    pub slot: Option<usize>,
    pub classification: Classification,
    pub is_final: bool,
    pub non_null: bool,
    pub is_id: bool,
}

impl FieldDescriptor {
    pub fn is_significant(&self) -> bool {
        self.classification == Classification::Significant
    }

    pub fn is_static(&self) -> bool {
        self.classification == Classification::Static
    }

    /// Whether the field may legitimately hold null
    pub fn is_nullable(&self) -> bool {
        !self.is_static() && !self.ty.is_primitive() && !self.non_null
    }
}

/// Get/set access to a field, regardless of its finality.
///
/// Instance fields are addressed by slot, so a superclass field stays
/// reachable when a subclass declares a field of the same name.
pub trait FieldAccessor {
    fn get_field(&self, field: &FieldDescriptor) -> Value;
    fn set_field(&self, field: &FieldDescriptor, value: Value) -> ModelResult<()>;
}

impl FieldAccessor for ObjectRef {
    fn get_field(&self, field: &FieldDescriptor) -> Value {
        match field.slot {
            Some(index) => self.get_slot(index).unwrap_or(Value::Null),
            None => self.get(&field.name),
        }
    }

    fn set_field(&self, field: &FieldDescriptor, value: Value) -> ModelResult<()> {
        match field.slot {
            Some(index) => self.set_slot(index, value),
            None => self.set(&field.name, value),
        }
    }
}

/// Classified fields of a class, superclass fields first
#[derive(Debug, Clone)]
pub struct FieldModel {
    class: Arc<ClassDef>,
    fields: Vec<FieldDescriptor>,
    has_id_fields: bool,
}

impl FieldModel {
    pub fn build(config: &Configuration) -> VerifierResult<Self> {
        let class = config.class.clone();
        let selection = &config.settings.fields;
        config.validate_field_names(selection.named_fields())?;

        let declared = class.all_fields();
        let is_id = |owner: &str, name: &str| config.metadata.has(owner, name, FieldCapability::Id);
        let has_id_fields = declared
            .iter()
            .any(|(owner, field)| !field.is_static() && is_id(owner, &field.name));

        let fields = declared
            .into_iter()
            .map(|(owner, field)| {
                let id = !field.is_static() && is_id(&owner, &field.name);
                let excluded_by_identity = has_id_fields
                    && !field.is_static()
                    && if config.is_suppressed(Warning::SurrogateKey) {
                        !id
                    } else {
                        id
                    };

                let classification = if selection.excludes(&field.name) || excluded_by_identity {
                    Classification::Excluded
                } else if field.is_static() {
                    Classification::Static
                } else if field.is_transient() && !config.is_suppressed(Warning::TransientFields)
                {
                    Classification::Transient
                } else {
                    Classification::Significant
                };

                let slot = if field.is_static() {
                    None
                } else {
                    class
                        .layout()
                        .iter()
                        .find(|slot| slot.declaring_class == owner && slot.field.name == field.name)
                        .map(|slot| slot.index)
                };

                FieldDescriptor {
                    slot,
                    non_null: config
                        .metadata
                        .has(&owner, &field.name, FieldCapability::NonNull),
                    is_id: id,
                    is_final: field.is_final(),
                    classification,
                    declaring_class: owner,
                    name: field.name,
                    ty: field.ty,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            class = class.name(),
            fields = fields.len(),
            has_id_fields,
            "Built field model"
        );
        Ok(Self {
            class,
            fields,
            has_id_fields,
        })
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Every non-static field
    pub fn instance_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| !field.is_static())
    }

    pub fn significant_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.is_significant())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().rev().find(|field| field.name == name)
    }

    /// Whether any field carries the identity capability
    pub fn has_id_fields(&self) -> bool {
        self.has_id_fields
    }
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
