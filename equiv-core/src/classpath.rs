//! Class path: resolves class and enum names to their definitions

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::class::ClassDef;
use crate::error::{ModelError, ModelResult};

/// A constant of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    pub type_name: Arc<str>,
    pub name: Arc<str>,
    pub ordinal: usize,
}

/// An enumeration with its constants in declaration order
#[derive(Debug, Clone)]
pub struct EnumDef {
    name: Arc<str>,
    constants: Vec<EnumConstant>,
}

impl EnumDef {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, constants: &[S]) -> Self {
        let name: Arc<str> = Arc::from(name.into());
        let constants = constants
            .iter()
            .enumerate()
            .map(|(ordinal, constant)| EnumConstant {
                type_name: name.clone(),
                name: Arc::from(constant.as_ref()),
                ordinal,
            })
            .collect();
        Self { name, constants }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constants(&self) -> &[EnumConstant] {
        &self.constants
    }

    pub fn constant(&self, name: &str) -> Option<&EnumConstant> {
        self.constants.iter().find(|c| &*c.name == name)
    }
}

/// Registry of the classes and enums known to a verification run
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    classes: FxHashMap<String, Arc<ClassDef>>,
    enums: FxHashMap<String, Arc<EnumDef>>,
}

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class together with its superclass chain.
    ///
    /// Registering the same definition twice is a no-op; a different
    /// definition under a known name is an error.
    pub fn register_class(&mut self, class: Arc<ClassDef>) -> ModelResult<()> {
        if let Some(existing) = self.classes.get(class.name()) {
            if Arc::ptr_eq(existing, &class) {
                return Ok(());
            }
            return Err(ModelError::Duplicate(class.name().to_string()));
        }
        if let Some(superclass) = class.superclass() {
            self.register_class(superclass.clone())?;
        }
        self.classes.insert(class.name().to_string(), class);
        Ok(())
    }

    pub fn register_enum(&mut self, def: EnumDef) -> ModelResult<()> {
        if self.enums.contains_key(def.name()) {
            return Err(ModelError::Duplicate(def.name().to_string()));
        }
        self.enums.insert(def.name().to_string(), Arc::new(def));
        Ok(())
    }

    /// Builder-style registration; a later definition replaces an earlier one
    pub fn with_class(mut self, class: Arc<ClassDef>) -> Self {
        let mut current = Some(class);
        while let Some(class) = current {
            current = class.superclass().cloned();
            self.classes.insert(class.name().to_string(), class);
        }
        self
    }

    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.enums.insert(def.name().to_string(), Arc::new(def));
        self
    }

    pub fn class(&self, name: &str) -> Option<&Arc<ClassDef>> {
        self.classes.get(name)
    }

    pub fn enum_def(&self, name: &str) -> Option<&Arc<EnumDef>> {
        self.enums.get(name)
    }

    pub fn resolve_class(&self, name: &str) -> ModelResult<Arc<ClassDef>> {
        self.class(name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownType(name.to_string()))
    }

    /// All registered strict subtypes of `name`, sorted by name
    pub fn subclasses_of(&self, name: &str) -> Vec<Arc<ClassDef>> {
        let mut result: Vec<_> = self
            .classes
            .values()
            .filter(|class| class.name() != name && class.is_subclass_of(name))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name().cmp(b.name()));
        result
    }

    /// First registered concrete, allocatable subtype of `name`
    pub fn concrete_implementation_of(&self, name: &str) -> Option<Arc<ClassDef>> {
        self.subclasses_of(name)
            .into_iter()
            .find(|class| !class.is_abstract() && class.is_allocatable() && !class.is_synthetic())
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "classpath_tests.rs"]
mod tests;
