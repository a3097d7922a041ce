//! Prefab value repository
//!
//! For every type the verifier needs a red and a black value that are not
//! equal to each other, plus a red copy: equal to red, but a separately
//! constructed value. Values are created on first request and cached for the
//! lifetime of one run. Recursive type graphs are cut off with placeholders;
//! an acyclic graph nested deeper than the depth limit is a precondition
//! failure.

use equiv_core::{ClassBuilder, ClassDef, ClassPath, ObjectRef, TypeRef, Value, ROOT_CLASS};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

use crate::errors::{CheckKind, VerifierError, VerifierResult, Violation};
use crate::instantiator::Instantiator;

/// Which of the three prefab values to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Red,
    Black,
    RedCopy,
}

/// Red, black and red-copy values of one type
#[derive(Debug, Clone)]
pub struct PrefabEntry {
    pub red: Value,
    pub black: Value,
    pub red_copy: Value,
}

impl PrefabEntry {
    pub fn new(red: Value, black: Value, red_copy: Value) -> Self {
        Self {
            red,
            black,
            red_copy,
        }
    }

    /// Entry whose red copy is derived from red
    pub fn from_pair(red: Value, black: Value) -> Self {
        let red_copy = copy_value(&red);
        Self::new(red, black, red_copy)
    }

    pub fn get(&self, tint: Tint) -> &Value {
        match tint {
            Tint::Red => &self.red,
            Tint::Black => &self.black,
            Tint::RedCopy => &self.red_copy,
        }
    }

    /// Red and black compare equal, so the type carries no state
    pub fn is_stateless(&self) -> bool {
        Value::objects_equals(&self.red, &self.black).unwrap_or(false)
    }
}

/// A separately constructed value equal to the given one
pub fn copy_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::string(&**s),
        Value::List(items) => Value::list(items.iter().cloned().collect()),
        Value::Optional(Some(inner)) => Value::some((**inner).clone()),
        Value::Map(entries) => Value::map(entries.iter().cloned().collect()),
        Value::Object(object) => Value::Object(object.shallow_copy()),
        other => other.clone(),
    }
}

fn precondition(message: String) -> VerifierError {
    Violation::new(CheckKind::Preconditions, message).into()
}

/// Lazily populated cache of prefab values for one verification run
pub struct PrefabRepository {
    classpath: ClassPath,
    overrides: FxHashMap<TypeRef, PrefabEntry>,
    instantiator: Instantiator,
    cache: FxHashMap<TypeRef, PrefabEntry>,
    in_progress: Vec<TypeRef>,
    max_depth: usize,
    root_class: Arc<ClassDef>,
}

impl PrefabRepository {
    pub fn new(
        classpath: ClassPath,
        overrides: FxHashMap<TypeRef, PrefabEntry>,
        instantiator: Instantiator,
        max_depth: usize,
    ) -> Self {
        Self {
            classpath,
            overrides,
            instantiator,
            cache: FxHashMap::default(),
            in_progress: Vec::new(),
            max_depth: max_depth.max(1),
            root_class: ClassBuilder::new(ROOT_CLASS).build(),
        }
    }

    pub fn instantiator(&self) -> &Instantiator {
        &self.instantiator
    }

    pub fn classpath(&self) -> &ClassPath {
        &self.classpath
    }

    /// Number of cached entries
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Red, black and red copy for a type
    pub fn values_for(&mut self, ty: &TypeRef) -> VerifierResult<PrefabEntry> {
        if let Some(entry) = self.overrides.get(ty) {
            return Ok(entry.clone());
        }
        if let Some(entry) = self.cache.get(ty) {
            return Ok(entry.clone());
        }
        if let TypeRef::Class(name) = ty {
            if self.in_progress.contains(ty) {
                return self.placeholder(name);
            }
            if self.in_progress.len() >= self.max_depth {
                return Err(precondition(format!(
                    "values of type {} are nested more than {} levels deep; raise max_recursion_depth or add prefab values for one of: {}.",
                    name,
                    self.max_depth,
                    self.in_progress
                        .iter()
                        .map(|ty| ty.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }

        self.in_progress.push(ty.clone());
        let result = self.create(ty);
        self.in_progress.pop();

        let entry = result?;
        trace!(ty = %ty, red = %entry.red, black = %entry.black, "Created prefab values");
        self.cache.insert(ty.clone(), entry.clone());
        Ok(entry)
    }

    fn create(&mut self, ty: &TypeRef) -> VerifierResult<PrefabEntry> {
        let entry = match ty {
            TypeRef::Boolean => {
                PrefabEntry::new(Value::Boolean(true), Value::Boolean(false), Value::Boolean(true))
            }
            TypeRef::Int => PrefabEntry::new(Value::Int(1), Value::Int(2), Value::Int(1)),
            TypeRef::Long => PrefabEntry::new(Value::Long(1), Value::Long(2), Value::Long(1)),
            TypeRef::Double => {
                PrefabEntry::new(Value::Double(0.5), Value::Double(1.0), Value::Double(0.5))
            }
            TypeRef::Char => PrefabEntry::new(Value::Char('a'), Value::Char('b'), Value::Char('a')),
            TypeRef::Boxed(inner) => self.values_for(inner)?,
            TypeRef::String => PrefabEntry::new(
                Value::string("red"),
                Value::string("black"),
                Value::string("red"),
            ),
            TypeRef::Object => PrefabEntry::new(
                Value::Object(ObjectRef::allocate(&self.root_class)?),
                Value::Object(ObjectRef::allocate(&self.root_class)?),
                Value::Object(ObjectRef::allocate(&self.root_class)?),
            ),
            TypeRef::Enum(name) => {
                let def = self.classpath.enum_def(name).cloned().ok_or_else(|| {
                    precondition(format!("cannot find enum {} on the class path.", name))
                })?;
                match def.constants() {
                    [red, black, ..] => PrefabEntry::new(
                        Value::Enum(red.clone()),
                        Value::Enum(black.clone()),
                        Value::Enum(red.clone()),
                    ),
                    _ => {
                        return Err(precondition(format!(
                            "enum {} has fewer than two constants, so two unequal instances cannot be produced.",
                            name
                        )))
                    }
                }
            }
            TypeRef::List(element) => {
                let e = self.values_for(element)?;
                PrefabEntry::new(
                    Value::list(vec![e.red]),
                    Value::list(vec![e.black]),
                    Value::list(vec![e.red_copy]),
                )
            }
            TypeRef::Optional(inner) => {
                let e = self.values_for(inner)?;
                PrefabEntry::new(Value::some(e.red), Value::some(e.black), Value::some(e.red_copy))
            }
            TypeRef::Map(key, value) => {
                let k = self.values_for(key)?;
                let v = self.values_for(value)?;
                PrefabEntry::new(
                    Value::map(vec![(k.red, v.red)]),
                    Value::map(vec![(k.black, v.black)]),
                    Value::map(vec![(k.red_copy, v.red_copy)]),
                )
            }
            TypeRef::Class(name) => {
                let class = self.resolve(name)?;
                PrefabEntry::new(
                    Value::Object(self.field_value_instance(&class, Tint::Red)?),
                    Value::Object(self.field_value_instance(&class, Tint::Black)?),
                    Value::Object(self.field_value_instance(&class, Tint::RedCopy)?),
                )
            }
        };
        Ok(entry)
    }

    fn resolve(&self, name: &str) -> VerifierResult<Arc<ClassDef>> {
        self.classpath.class(name).cloned().ok_or_else(|| {
            precondition(format!(
                "cannot produce values of type {}: it is not on the class path.",
                name
            ))
        })
    }

    fn field_value_instance(&mut self, class: &Arc<ClassDef>, tint: Tint) -> VerifierResult<ObjectRef> {
        self.instance_of(class, tint).map_err(|e| match e {
            VerifierError::Instantiation { class, reason } => precondition(format!(
                "cannot produce values of type {}: {}",
                class, reason
            )),
            other => other,
        })
    }

    /// Instance of `class` whose instance fields all hold the tinted prefab value
    pub fn instance_of(&mut self, class: &Arc<ClassDef>, tint: Tint) -> VerifierResult<ObjectRef> {
        let object = self.instantiator.instantiate(class)?;
        let layout = object.class().layout().to_vec();
        for slot in layout {
            let entry = self.values_for(&slot.field.ty)?;
            object.set_slot(slot.index, entry.get(tint).clone())?;
        }
        Ok(object)
    }

    /// Stand-in for a type that is already under construction.
    ///
    /// Fields whose type is still being built keep their default value;
    /// placeholders are never cached.
    fn placeholder(&mut self, name: &str) -> VerifierResult<PrefabEntry> {
        trace!(class = name, depth = self.in_progress.len(), "Using placeholder");
        let class = self.resolve(name)?;

        Ok(PrefabEntry::new(
            self.placeholder_instance(&class, Tint::Red)?,
            self.placeholder_instance(&class, Tint::Black)?,
            self.placeholder_instance(&class, Tint::RedCopy)?,
        ))
    }

    fn placeholder_instance(&mut self, class: &Arc<ClassDef>, tint: Tint) -> VerifierResult<Value> {
        let object = self.instantiator.instantiate(class).map_err(|e| {
            precondition(format!(
                "cannot produce a placeholder for {}: {}",
                class.name(),
                e
            ))
        })?;
        let layout = object.class().layout().to_vec();
        for slot in layout {
            let recursive = match &slot.field.ty {
                TypeRef::Class(_) => true,
                ty => self.in_progress.contains(ty),
            };
            if recursive {
                continue;
            }
            let entry = self.values_for(&slot.field.ty)?;
            object.set_slot(slot.index, entry.get(tint).clone())?;
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
#[path = "prefab_tests.rs"]
mod tests;
