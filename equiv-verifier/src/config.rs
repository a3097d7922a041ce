//! Verification configuration
//!
//! [`VerifierSettings`] holds everything that can be written down in a file:
//! suppressed warnings, field selection and behavioural flags. A
//! [`Configuration`] combines the settings with the runtime-only parts of a
//! run: the class under test, its class path, prefab overrides, metadata
//! providers and example instances.

use equiv_core::{ClassDef, ClassPath, EnumDef, ObjectRef, TypeRef, Value};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::annotations::{MetadataLookup, MetadataProvider};
use crate::errors::{VerifierError, VerifierResult};
use crate::prefab::PrefabEntry;

/// A check that can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Warning {
    /// Instances are allowed to differ from an identical copy (identity equality)
    IdenticalCopy,
    /// An entity with an unassigned identity may differ from its copy
    IdenticalCopyForVersionedEntity,
    /// Significant fields need not all be used by `equals`
    AllFieldsShouldBeUsed,
    /// Fields are assumed never to be null
    NullFields,
    /// Transient fields take part in equality like any other field
    TransientFields,
    /// Non-final classes need not have final `equals` and `hashCode`
    StrictInheritance,
    /// `hashCode` may ignore fields that `equals` uses
    StrictHashcode,
    /// Identity fields, not business keys, define equality of entities
    SurrogateKey,
    /// `hashCode` may be overridden while `equals` stays the root identity comparison
    InheritedDirectlyFromObject,
}

impl Warning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Warning::IdenticalCopy => "IDENTICAL_COPY",
            Warning::IdenticalCopyForVersionedEntity => "IDENTICAL_COPY_FOR_VERSIONED_ENTITY",
            Warning::AllFieldsShouldBeUsed => "ALL_FIELDS_SHOULD_BE_USED",
            Warning::NullFields => "NULL_FIELDS",
            Warning::TransientFields => "TRANSIENT_FIELDS",
            Warning::StrictInheritance => "STRICT_INHERITANCE",
            Warning::StrictHashcode => "STRICT_HASHCODE",
            Warning::SurrogateKey => "SURROGATE_KEY",
            Warning::InheritedDirectlyFromObject => "INHERITED_DIRECTLY_FROM_OBJECT",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which fields are expected to take part in equality.
///
/// Names match every field so named, so a listed name also covers a
/// superclass field that a subclass shadows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSelection {
    /// Every instance field
    AllFields,
    /// Every instance field except the listed ones
    AllExcept(Vec<String>),
    /// Only the listed fields
    OnlyThese(Vec<String>),
}

impl Default for FieldSelection {
    fn default() -> Self {
        FieldSelection::AllFields
    }
}

impl FieldSelection {
    /// Names the selection refers to
    pub fn named_fields(&self) -> &[String] {
        match self {
            FieldSelection::AllFields => &[],
            FieldSelection::AllExcept(names) | FieldSelection::OnlyThese(names) => names,
        }
    }

    /// Whether the selection excludes a field
    pub fn excludes(&self, field: &str) -> bool {
        match self {
            FieldSelection::AllFields => false,
            FieldSelection::AllExcept(names) => names.iter().any(|name| name == field),
            FieldSelection::OnlyThese(names) => !names.iter().any(|name| name == field),
        }
    }
}

/// Serializable verification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierSettings {
    /// Suppressed warnings
    pub suppressed: BTreeSet<Warning>,
    /// Field selection
    pub fields: FieldSelection,
    /// `equals` compares runtime classes instead of using `instanceof`
    pub using_get_class: bool,
    /// The superclass has its own `equals` that instances must not match
    pub redefined_superclass: bool,
    /// Nesting depth after which prefab construction uses placeholders
    pub max_recursion_depth: usize,
    /// How often `equals` and `hashCode` are repeated by the consistency check
    pub consistency_rounds: usize,
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            suppressed: BTreeSet::new(),
            fields: FieldSelection::AllFields,
            using_get_class: false,
            redefined_superclass: false,
            max_recursion_depth: 8,
            consistency_rounds: 5,
        }
    }
}

impl VerifierSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every check enabled
    pub fn strict() -> Self {
        Self::default()
    }

    /// Settings for everyday value classes that are not designed for subclassing
    pub fn lenient() -> Self {
        Self {
            suppressed: [
                Warning::StrictInheritance,
                Warning::StrictHashcode,
                Warning::NullFields,
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }
    }

    /// Settings for persistent entities compared by their identity field
    pub fn jpa_entity() -> Self {
        Self {
            suppressed: [
                Warning::IdenticalCopyForVersionedEntity,
                Warning::SurrogateKey,
                Warning::StrictInheritance,
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }
    }

    pub fn suppress(mut self, warnings: &[Warning]) -> Self {
        self.suppressed.extend(warnings.iter().copied());
        self
    }

    pub fn is_suppressed(&self, warning: Warning) -> bool {
        self.suppressed.contains(&warning)
    }

    pub fn from_json(json: &str) -> VerifierResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VerifierError::config(format!("invalid settings: {}", e)))
    }

    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to a JSON file
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// A fully resolved verification request
#[derive(Clone)]
pub struct Configuration {
    pub class: Arc<ClassDef>,
    pub classpath: ClassPath,
    pub settings: VerifierSettings,
    pub prefab_values: FxHashMap<TypeRef, PrefabEntry>,
    pub metadata: MetadataLookup,
    /// Pre-supplied instances; the first two serve as red and black
    pub examples: Vec<ObjectRef>,
    /// A subclass that redefines `equals`, so instances must not equal it
    pub redefined_subclass: Option<Arc<ClassDef>>,
}

impl Configuration {
    /// Configuration for one class, registering it on a fresh class path
    pub fn for_class(class: Arc<ClassDef>) -> Self {
        let classpath = ClassPath::new().with_class(class.clone());
        Self {
            class,
            classpath,
            settings: VerifierSettings::default(),
            prefab_values: FxHashMap::default(),
            metadata: MetadataLookup::new(),
            examples: Vec::new(),
            redefined_subclass: None,
        }
    }

    /// Use a class path for resolving field types; the class under test is
    /// added to it
    pub fn with_classpath(mut self, classpath: ClassPath) -> Self {
        self.classpath = classpath.with_class(self.class.clone());
        self
    }

    pub fn with_class(mut self, class: Arc<ClassDef>) -> Self {
        self.classpath = self.classpath.with_class(class);
        self
    }

    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.classpath = self.classpath.with_enum(def);
        self
    }

    pub fn with_settings(mut self, settings: VerifierSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn suppress(mut self, warnings: &[Warning]) -> Self {
        self.settings.suppressed.extend(warnings.iter().copied());
        self
    }

    /// All fields except these should be used by `equals`
    pub fn with_ignored_fields(mut self, fields: &[&str]) -> VerifierResult<Self> {
        self.validate_field_names(fields)?;
        self.settings.fields =
            FieldSelection::AllExcept(fields.iter().map(|f| f.to_string()).collect());
        Ok(self)
    }

    /// Only these fields should be used by `equals`
    pub fn with_only_these_fields(mut self, fields: &[&str]) -> VerifierResult<Self> {
        self.validate_field_names(fields)?;
        self.settings.fields =
            FieldSelection::OnlyThese(fields.iter().map(|f| f.to_string()).collect());
        Ok(self)
    }

    /// Register red and black values for a type
    pub fn with_prefab_values(mut self, ty: TypeRef, red: Value, black: Value) -> VerifierResult<Self> {
        if red.is_null() || black.is_null() {
            return Err(VerifierError::config(format!(
                "prefab values for {} must not be null.",
                ty
            )));
        }
        let equal = Value::objects_equals(&red, &black).map_err(|thrown| {
            VerifierError::config(format!(
                "comparing the prefab values of type {} throws {}",
                ty, thrown
            ))
        })?;
        if equal {
            return Err(VerifierError::config(format!(
                "both prefab values of type {} are equal.",
                ty
            )));
        }
        self.prefab_values
            .insert(ty, PrefabEntry::from_pair(red, black));
        Ok(self)
    }

    pub fn with_metadata<P: MetadataProvider + 'static>(mut self, provider: P) -> Self {
        self.metadata.add_provider(Arc::new(provider));
        self
    }

    pub fn with_example(mut self, example: ObjectRef) -> Self {
        self.examples.push(example);
        self
    }

    pub fn using_get_class(mut self) -> Self {
        self.settings.using_get_class = true;
        self
    }

    /// How deeply field types may nest before prefab creation gives up
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.settings.max_recursion_depth = depth;
        self
    }

    pub fn with_redefined_superclass(mut self) -> Self {
        self.settings.redefined_superclass = true;
        self
    }

    pub fn with_redefined_subclass(mut self, subclass: Arc<ClassDef>) -> Self {
        self.classpath = self.classpath.with_class(subclass.clone());
        self.redefined_subclass = Some(subclass);
        self
    }

    pub fn is_suppressed(&self, warning: Warning) -> bool {
        self.settings.is_suppressed(warning)
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Every configured field name must exist on the class
    pub fn validate_field_names<S: AsRef<str>>(&self, fields: &[S]) -> VerifierResult<()> {
        let declared = self.class.all_fields();
        for field in fields {
            let field = field.as_ref();
            if !declared.iter().any(|(_, def)| def.name == field) {
                return Err(VerifierError::config(format!(
                    "Class {} does not contain field {}.",
                    self.class.name(),
                    field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("class", &self.class.name())
            .field("settings", &self.settings)
            .field("prefab_values", &self.prefab_values.len())
            .field("metadata", &self.metadata)
            .field("examples", &self.examples.len())
            .field(
                "redefined_subclass",
                &self.redefined_subclass.as_ref().map(|c| c.name().to_string()),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
