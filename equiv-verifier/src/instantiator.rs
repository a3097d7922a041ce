//! Instantiation of arbitrary classes
//!
//! The [`Instantiator`] produces an instance of a class without relying on
//! any particular constructor. It tries a list of [`InstantiationStrategy`]s
//! in order; the engine only ever talks to the strategy interface.

use equiv_core::{ClassDef, ClassPath, ModelResult, ObjectRef};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

use crate::errors::{VerifierError, VerifierResult};

/// A way of producing an instance of a class
pub trait InstantiationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when the strategy does not apply to the class
    fn instantiate(&self, class: &Arc<ClassDef>, classpath: &ClassPath)
        -> Option<ModelResult<ObjectRef>>;
}

/// Generates and caches runtime subclasses
#[derive(Debug, Default)]
pub struct SubclassFactory {
    synthesized: RwLock<FxHashMap<String, Arc<ClassDef>>>,
}

impl SubclassFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn synthesize(&self, parent: &Arc<ClassDef>, suffix: &str) -> Arc<ClassDef> {
        let name = format!("{}${}", parent.name(), suffix);
        if let Some(class) = self.synthesized.read().get(&name) {
            return class.clone();
        }
        let mut synthesized = self.synthesized.write();
        synthesized
            .entry(name.clone())
            .or_insert_with(|| {
                trace!(parent = parent.name(), "Synthesizing {}", name);
                ClassDef::synthesize_subclass(parent, name.clone())
            })
            .clone()
    }

    /// Minimal concrete subtype of an abstract class or interface
    pub fn concrete(&self, parent: &Arc<ClassDef>) -> Arc<ClassDef> {
        self.synthesize(parent, "Concrete")
    }

    /// Subclass that adds neither state nor behaviour
    pub fn trivial_subclass(&self, parent: &Arc<ClassDef>) -> Arc<ClassDef> {
        self.synthesize(parent, "Subclass")
    }
}

/// Plain allocation without running a constructor
pub struct AllocationStrategy;

impl InstantiationStrategy for AllocationStrategy {
    fn name(&self) -> &'static str {
        "allocation"
    }

    fn instantiate(&self, class: &Arc<ClassDef>, _: &ClassPath) -> Option<ModelResult<ObjectRef>> {
        if class.is_abstract() || !class.is_allocatable() {
            return None;
        }
        Some(ObjectRef::allocate(class))
    }
}

/// Allocation of a concrete subtype for abstract classes and interfaces
pub struct SubclassStrategy {
    factory: Arc<SubclassFactory>,
}

impl SubclassStrategy {
    pub fn new(factory: Arc<SubclassFactory>) -> Self {
        Self { factory }
    }
}

impl InstantiationStrategy for SubclassStrategy {
    fn name(&self) -> &'static str {
        "synthesized-subclass"
    }

    fn instantiate(
        &self,
        class: &Arc<ClassDef>,
        classpath: &ClassPath,
    ) -> Option<ModelResult<ObjectRef>> {
        if !class.is_abstract() {
            return None;
        }
        let concrete = classpath
            .concrete_implementation_of(class.name())
            .unwrap_or_else(|| self.factory.concrete(class));
        Some(ObjectRef::allocate(&concrete))
    }
}

/// Copy of an externally supplied example of exactly this class
pub struct ExampleStrategy {
    examples: Vec<ObjectRef>,
}

impl ExampleStrategy {
    pub fn new(examples: Vec<ObjectRef>) -> Self {
        Self { examples }
    }
}

impl InstantiationStrategy for ExampleStrategy {
    fn name(&self) -> &'static str {
        "example"
    }

    fn instantiate(&self, class: &Arc<ClassDef>, _: &ClassPath) -> Option<ModelResult<ObjectRef>> {
        self.examples
            .iter()
            .find(|example| example.class_name() == class.name())
            .map(|example| Ok(example.shallow_copy()))
    }
}

/// Run the class's own constructor
pub struct DefaultConstructorStrategy;

impl InstantiationStrategy for DefaultConstructorStrategy {
    fn name(&self) -> &'static str {
        "default-constructor"
    }

    fn instantiate(&self, class: &Arc<ClassDef>, _: &ClassPath) -> Option<ModelResult<ObjectRef>> {
        class.constructor()?;
        Some(ObjectRef::construct(class))
    }
}

/// Produces instances by trying strategies in order
pub struct Instantiator {
    classpath: ClassPath,
    factory: Arc<SubclassFactory>,
    strategies: Vec<Box<dyn InstantiationStrategy>>,
}

impl Instantiator {
    /// Instantiator with the standard strategies: allocation, synthesized
    /// subclass, example copy, default constructor
    pub fn new(classpath: ClassPath, examples: Vec<ObjectRef>) -> Self {
        let factory = Arc::new(SubclassFactory::new());
        let strategies: Vec<Box<dyn InstantiationStrategy>> = vec![
            Box::new(AllocationStrategy),
            Box::new(SubclassStrategy::new(factory.clone())),
            Box::new(ExampleStrategy::new(examples)),
            Box::new(DefaultConstructorStrategy),
        ];
        Self {
            classpath,
            factory,
            strategies,
        }
    }

    /// Replace the strategy list
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn InstantiationStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn classpath(&self) -> &ClassPath {
        &self.classpath
    }

    pub fn subclasses(&self) -> &SubclassFactory {
        &self.factory
    }

    /// Produce an instance of `class` (or of a concrete subtype when it is abstract)
    pub fn instantiate(&self, class: &Arc<ClassDef>) -> VerifierResult<ObjectRef> {
        let mut reasons = Vec::new();
        for strategy in &self.strategies {
            match strategy.instantiate(class, &self.classpath) {
                Some(Ok(object)) => {
                    trace!(class = class.name(), strategy = strategy.name(), "Instantiated");
                    return Ok(object);
                }
                Some(Err(e)) => reasons.push(format!("{}: {}", strategy.name(), e)),
                None => {}
            }
        }
        let reason = if reasons.is_empty() {
            "no instantiation strategy applies".to_string()
        } else {
            reasons.join("; ")
        };
        Err(VerifierError::instantiation(class.name(), reason))
    }

    /// Instance of a subclass of `class` that adds nothing
    pub fn instantiate_trivial_subclass(&self, class: &Arc<ClassDef>) -> VerifierResult<ObjectRef> {
        let subclass = self.factory.trivial_subclass(class);
        Ok(ObjectRef::allocate(&subclass)?)
    }
}

#[cfg(test)]
#[path = "instantiator_tests.rs"]
mod tests;
