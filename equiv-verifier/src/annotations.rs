//! Field metadata lookup
//!
//! Which fields are declared non-null, and which hold an entity's identity,
//! comes from outside the object model. Each convention is a
//! [`MetadataProvider`]; the verifier only asks yes/no questions per field.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;

/// A capability a field can be declared to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCapability {
    /// The field never holds null
    NonNull,
    /// The field is the identity of an entity
    Id,
}

/// Source of per-field capability metadata
pub trait MetadataProvider: Send + Sync {
    /// Name of the convention, used in logs
    fn name(&self) -> &str;

    /// `Some(answer)` when this provider has an opinion, `None` otherwise
    fn lookup(&self, class: &str, field: &str, capability: FieldCapability) -> Option<bool>;
}

/// A metadata provider backed by explicit tables
#[derive(Debug, Clone, Default)]
pub struct FieldMetadataTable {
    name: String,
    marked: FxHashMap<(String, String), FxHashSet<FieldCapability>>,
    class_defaults: FxHashMap<String, FxHashSet<FieldCapability>>,
    unmarked: FxHashSet<(String, String, FieldCapability)>,
}

impl FieldMetadataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Give one field a capability
    pub fn mark(mut self, class: &str, field: &str, capability: FieldCapability) -> Self {
        self.unmarked
            .remove(&(class.to_string(), field.to_string(), capability));
        self.marked
            .entry((class.to_string(), field.to_string()))
            .or_default()
            .insert(capability);
        self
    }

    /// Give every field of a class a capability by default
    pub fn mark_class_default(mut self, class: &str, capability: FieldCapability) -> Self {
        self.class_defaults
            .entry(class.to_string())
            .or_default()
            .insert(capability);
        self
    }

    /// Explicitly deny a capability, overriding a class default
    pub fn unmark(mut self, class: &str, field: &str, capability: FieldCapability) -> Self {
        if let Some(capabilities) = self
            .marked
            .get_mut(&(class.to_string(), field.to_string()))
        {
            capabilities.remove(&capability);
        }
        self.unmarked
            .insert((class.to_string(), field.to_string(), capability));
        self
    }
}

impl MetadataProvider for FieldMetadataTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, class: &str, field: &str, capability: FieldCapability) -> Option<bool> {
        let key = (class.to_string(), field.to_string());
        if self
            .unmarked
            .contains(&(key.0.clone(), key.1.clone(), capability))
        {
            return Some(false);
        }
        if self
            .marked
            .get(&key)
            .map_or(false, |capabilities| capabilities.contains(&capability))
        {
            return Some(true);
        }
        if self
            .class_defaults
            .get(class)
            .map_or(false, |capabilities| capabilities.contains(&capability))
        {
            return Some(true);
        }
        None
    }
}

/// Ordered set of providers; the first one with an opinion wins
#[derive(Clone, Default)]
pub struct MetadataLookup {
    providers: Vec<Arc<dyn MetadataProvider>>,
}

impl MetadataLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_provider(&mut self, provider: Arc<dyn MetadataProvider>) {
        self.providers.push(provider);
    }

    pub fn has(&self, class: &str, field: &str, capability: FieldCapability) -> bool {
        self.providers
            .iter()
            .find_map(|provider| provider.lookup(class, field, capability))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for MetadataLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|provider| provider.name()))
            .finish()
    }
}
