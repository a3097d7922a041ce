//! Class definitions
//!
//! A [`ClassDef`] describes the shape of a class (its fields and their
//! modifiers) and its behaviour: `equals`, `hashCode`, `canEqual`,
//! `toString` and an optional constructor, each given as a closure.
//! Behaviour that a class does not define is inherited from its superclass,
//! and ultimately from the root object (identity equality).

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::MethodResult;
use crate::object::ObjectRef;
use crate::types::TypeRef;
use crate::value::Value;
use crate::ROOT_CLASS;

/// `equals` (and `canEqual`) behaviour: receiver, argument
pub type EqualsFn = Arc<dyn Fn(&ObjectRef, &Value) -> MethodResult<bool> + Send + Sync>;

/// `hashCode` behaviour
pub type HashCodeFn = Arc<dyn Fn(&ObjectRef) -> MethodResult<i32> + Send + Sync>;

/// `toString` behaviour
pub type ToStringFn = Arc<dyn Fn(&ObjectRef) -> MethodResult<String> + Send + Sync>;

/// Constructor body, run on a freshly allocated object
pub type ConstructorFn = Arc<dyn Fn(&ObjectRef) -> MethodResult<()> + Send + Sync>;

/// Kind of class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Concrete,
    Abstract,
    Interface,
}

/// Field modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldModifiers {
    pub is_static: bool,
    pub is_transient: bool,
    pub is_final: bool,
}

impl FieldModifiers {
    pub fn final_field() -> Self {
        Self {
            is_final: true,
            ..Self::default()
        }
    }

    pub fn transient() -> Self {
        Self {
            is_transient: true,
            ..Self::default()
        }
    }

    pub fn static_field() -> Self {
        Self {
            is_static: true,
            is_final: true,
            ..Self::default()
        }
    }
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: FieldModifiers,
}

impl FieldDef {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    pub fn is_transient(&self) -> bool {
        self.modifiers.is_transient
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }
}

/// Position of an instance field in an object's slot vector
#[derive(Debug, Clone)]
pub struct Slot {
    pub index: usize,
    pub declaring_class: Arc<str>,
    pub field: FieldDef,
}

/// A behaviour attached to a class
#[derive(Clone)]
pub struct Method<F> {
    pub func: F,
    pub is_final: bool,
    pub declared_in: Arc<str>,
}

/// A class of the object model
pub struct ClassDef {
    name: Arc<str>,
    kind: ClassKind,
    is_final: bool,
    allocatable: bool,
    synthetic: bool,
    superclass: Option<Arc<ClassDef>>,
    interfaces: Vec<String>,
    fields: Vec<FieldDef>,
    layout: Vec<Slot>,
    statics: RwLock<FxHashMap<String, Value>>,
    equals: Option<Method<EqualsFn>>,
    hash_code: Option<Method<HashCodeFn>>,
    can_equal: Option<Method<EqualsFn>>,
    to_string: Option<ToStringFn>,
    constructor: Option<ConstructorFn>,
}

impl ClassDef {
    /// Start building a concrete class
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_abstract(&self) -> bool {
        self.kind != ClassKind::Concrete
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Whether instances can be created without running a constructor
    pub fn is_allocatable(&self) -> bool {
        self.allocatable
    }

    /// Whether this class was generated at runtime
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn superclass(&self) -> Option<&Arc<ClassDef>> {
        self.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Fields declared by this class itself, statics included
    pub fn declared_fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Instance field layout, superclass fields first
    pub fn layout(&self) -> &[Slot] {
        &self.layout
    }

    /// Find the instance slot for a field; subclass fields shadow inherited ones
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.layout.iter().rev().find(|slot| slot.field.name == name)
    }

    /// Find a static field declared on this class or a superclass
    pub fn static_field(&self, name: &str) -> Option<(&ClassDef, &FieldDef)> {
        self.fields
            .iter()
            .find(|field| field.is_static() && field.name == name)
            .map(|field| (self, field))
            .or_else(|| {
                self.superclass
                    .as_ref()
                    .and_then(|superclass| superclass.static_field(name))
            })
    }

    pub(crate) fn static_value(&self, name: &str) -> Option<Value> {
        self.statics.read().get(name).cloned()
    }

    pub(crate) fn set_static_value(&self, name: &str, value: Value) {
        self.statics.write().insert(name.to_string(), value);
    }

    /// Every declared field of this class and its superclasses, superclass first
    pub fn all_fields(&self) -> Vec<(Arc<str>, FieldDef)> {
        let mut result = match &self.superclass {
            Some(superclass) => superclass.all_fields(),
            None => Vec::new(),
        };
        result.extend(
            self.fields
                .iter()
                .map(|field| (self.name.clone(), field.clone())),
        );
        result
    }

    /// `equals` in effect for instances of this class
    pub fn equals_method(&self) -> Option<&Method<EqualsFn>> {
        self.equals.as_ref().or_else(|| {
            self.superclass
                .as_ref()
                .and_then(|superclass| superclass.equals_method())
        })
    }

    /// `hashCode` in effect for instances of this class
    pub fn hash_code_method(&self) -> Option<&Method<HashCodeFn>> {
        self.hash_code.as_ref().or_else(|| {
            self.superclass
                .as_ref()
                .and_then(|superclass| superclass.hash_code_method())
        })
    }

    /// `canEqual` in effect for instances of this class
    pub fn can_equal_method(&self) -> Option<&Method<EqualsFn>> {
        self.can_equal.as_ref().or_else(|| {
            self.superclass
                .as_ref()
                .and_then(|superclass| superclass.can_equal_method())
        })
    }

    pub fn to_string_method(&self) -> Option<&ToStringFn> {
        self.to_string.as_ref().or_else(|| {
            self.superclass
                .as_ref()
                .and_then(|superclass| superclass.to_string_method())
        })
    }

    pub fn constructor(&self) -> Option<&ConstructorFn> {
        self.constructor.as_ref()
    }

    /// Whether this class itself overrides `equals`
    pub fn declares_equals(&self) -> bool {
        self.equals.is_some()
    }

    pub fn declares_hash_code(&self) -> bool {
        self.hash_code.is_some()
    }

    /// Whether `equals` is still the identity comparison of the root class
    pub fn inherits_root_equals(&self) -> bool {
        self.equals_method().is_none()
    }

    /// `instanceof` semantics against a class or interface name
    pub fn is_subclass_of(&self, name: &str) -> bool {
        if name == ROOT_CLASS || &*self.name == name {
            return true;
        }
        if self.interfaces.iter().any(|interface| interface == name) {
            return true;
        }
        self.superclass
            .as_ref()
            .map_or(false, |superclass| superclass.is_subclass_of(name))
    }

    /// Generate a concrete subclass that adds no fields and no behaviour
    pub fn synthesize_subclass(parent: &Arc<ClassDef>, name: impl Into<String>) -> Arc<ClassDef> {
        let mut builder = ClassBuilder::new(name).extends(parent.clone());
        builder.synthetic = true;
        builder.build()
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("is_final", &self.is_final)
            .field(
                "superclass",
                &self.superclass.as_ref().map(|superclass| superclass.name()),
            )
            .field("fields", &self.fields)
            .field("declares_equals", &self.declares_equals())
            .finish()
    }
}

/// Builder for [`ClassDef`]
pub struct ClassBuilder {
    name: String,
    kind: ClassKind,
    is_final: bool,
    allocatable: bool,
    synthetic: bool,
    superclass: Option<Arc<ClassDef>>,
    interfaces: Vec<String>,
    fields: Vec<FieldDef>,
    static_values: Vec<(String, Value)>,
    equals: Option<(EqualsFn, bool)>,
    hash_code: Option<(HashCodeFn, bool)>,
    can_equal: Option<EqualsFn>,
    to_string: Option<ToStringFn>,
    constructor: Option<ConstructorFn>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Concrete,
            is_final: false,
            allocatable: true,
            synthetic: false,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            static_values: Vec::new(),
            equals: None,
            hash_code: None,
            can_equal: None,
            to_string: None,
            constructor: None,
        }
    }

    pub fn final_class(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.kind = ClassKind::Abstract;
        self
    }

    pub fn interface(mut self) -> Self {
        self.kind = ClassKind::Interface;
        self
    }

    /// Instances can only be obtained through the constructor
    pub fn not_allocatable(mut self) -> Self {
        self.allocatable = false;
        self
    }

    pub fn extends(mut self, superclass: Arc<ClassDef>) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Declare a final instance field
    pub fn field(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.field_with(name, ty, FieldModifiers::final_field())
    }

    /// Declare a non-final instance field
    pub fn mutable_field(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.field_with(name, ty, FieldModifiers::default())
    }

    pub fn transient_field(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.field_with(name, ty, FieldModifiers::transient())
    }

    /// Declare a static final field with its value
    pub fn static_field(mut self, name: impl Into<String>, ty: TypeRef, value: Value) -> Self {
        let name = name.into();
        self.static_values.push((name.clone(), value));
        self.field_with(name, ty, FieldModifiers::static_field())
    }

    pub fn field_with(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        modifiers: FieldModifiers,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty,
            modifiers,
        });
        self
    }

    pub fn equals<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef, &Value) -> MethodResult<bool> + Send + Sync + 'static,
    {
        self.equals = Some((Arc::new(f), false));
        self
    }

    pub fn final_equals<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef, &Value) -> MethodResult<bool> + Send + Sync + 'static,
    {
        self.equals = Some((Arc::new(f), true));
        self
    }

    pub fn hash_code<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef) -> MethodResult<i32> + Send + Sync + 'static,
    {
        self.hash_code = Some((Arc::new(f), false));
        self
    }

    pub fn final_hash_code<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef) -> MethodResult<i32> + Send + Sync + 'static,
    {
        self.hash_code = Some((Arc::new(f), true));
        self
    }

    pub fn can_equal<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef, &Value) -> MethodResult<bool> + Send + Sync + 'static,
    {
        self.can_equal = Some(Arc::new(f));
        self
    }

    pub fn to_string<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef) -> MethodResult<String> + Send + Sync + 'static,
    {
        self.to_string = Some(Arc::new(f));
        self
    }

    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&ObjectRef) -> MethodResult<()> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<ClassDef> {
        let name: Arc<str> = Arc::from(self.name.as_str());

        let mut layout = match &self.superclass {
            Some(superclass) => superclass.layout.clone(),
            None => Vec::new(),
        };
        for field in self.fields.iter().filter(|field| !field.is_static()) {
            layout.push(Slot {
                index: layout.len(),
                declaring_class: name.clone(),
                field: field.clone(),
            });
        }

        let statics = self.static_values.into_iter().collect::<FxHashMap<_, _>>();

        let method = |func, is_final| Method {
            func,
            is_final,
            declared_in: name.clone(),
        };

        Arc::new(ClassDef {
            kind: self.kind,
            is_final: self.is_final,
            allocatable: self.allocatable,
            synthetic: self.synthetic,
            superclass: self.superclass,
            interfaces: self.interfaces,
            fields: self.fields,
            layout,
            statics: RwLock::new(statics),
            equals: self.equals.map(|(func, is_final)| method(func, is_final)),
            hash_code: self.hash_code.map(|(func, is_final)| Method {
                func,
                is_final,
                declared_in: name.clone(),
            }),
            can_equal: self.can_equal.map(|func| method(func, false)),
            to_string: self.to_string,
            constructor: self.constructor,
            name,
        })
    }
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;
