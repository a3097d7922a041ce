//! Verification from explicit examples
//!
//! For classes whose equality is coarser than their state (a fraction that
//! equals its reduced form, say) the caller supplies a group of examples that
//! must all be equal to each other and, optionally, examples that must be
//! unequal to those and to each other.

use equiv_core::{ObjectRef, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::checks::laws::{equals, hash_matches, symmetric};
use crate::errors::{CheckKind, ThrownExt, VerifierError, VerifierResult, Violation};
use crate::report::{describe, ReportSink, VerificationReport};

const CHECK: CheckKind = CheckKind::Examples;

fn precondition(message: String) -> VerifierError {
    Violation::new(CheckKind::Preconditions, message).into()
}

fn example(value: Value) -> VerifierResult<ObjectRef> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Null => Err(VerifierError::config("examples must not be null.")),
        other => Err(VerifierError::config(format!(
            "examples must be objects, got {}.",
            other.type_name()
        ))),
    }
}

/// Verifier driven by equal and unequal example groups
pub struct RelaxedVerifier {
    equal: Vec<ObjectRef>,
    unequal: Vec<ObjectRef>,
    sink: Option<Arc<dyn ReportSink>>,
}

impl RelaxedVerifier {
    /// Start from at least two examples that must be equal to each other
    pub fn for_relaxed_equal_examples(
        first: Value,
        second: Value,
        more: Vec<Value>,
    ) -> VerifierResult<Self> {
        let equal = [first, second]
            .into_iter()
            .chain(more)
            .map(example)
            .collect::<VerifierResult<Vec<_>>>()?;
        Ok(Self {
            equal,
            unequal: Vec::new(),
            sink: None,
        })
    }

    pub fn and_unequal_example(self, example: Value) -> VerifierResult<Self> {
        self.and_unequal_examples(vec![example])
    }

    pub fn and_unequal_examples(mut self, examples: Vec<Value>) -> VerifierResult<Self> {
        for value in examples {
            self.unequal.push(example(value)?);
        }
        Ok(self)
    }

    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn class_name(&self) -> &str {
        self.equal
            .first()
            .map(|object| object.class_name())
            .unwrap_or_default()
    }

    pub fn verify(&self) -> VerifierResult<()> {
        info!(
            class = self.class_name(),
            equal = self.equal.len(),
            unequal = self.unequal.len(),
            "Verifying relaxed equality"
        );
        self.check_preconditions()?;
        debug!(class = self.class_name(), "Example preconditions hold");
        self.check_examples()
    }

    /// Run and deliver the outcome to the sink, if any
    pub fn report(&self) -> VerificationReport {
        let report = match self.verify() {
            Ok(()) => VerificationReport::success(self.class_name(), 2),
            Err(err) => {
                let passed = match err.violation() {
                    Some(violation) if violation.check == CheckKind::Examples => 1,
                    _ => 0,
                };
                VerificationReport::failure(self.class_name(), passed, err)
            }
        };
        if let Some(sink) = &self.sink {
            sink.deliver(&report);
        }
        report
    }

    fn check_preconditions(&self) -> VerifierResult<()> {
        let first = &self.equal[0];
        for other in self.equal.iter().chain(&self.unequal) {
            if other.class_name() != first.class_name() {
                return Err(precondition(format!(
                    "{} and {} are of different classes",
                    other.class_name(),
                    first.class_name()
                )));
            }
        }

        for (i, a) in self.equal.iter().enumerate() {
            for b in &self.equal[i + 1..] {
                if a.same(b) {
                    return Err(appears_twice(a));
                }
                if identical(a, b) {
                    return Err(precondition(format!(
                        "two identical objects appear in the equal examples of {}:\n  {}",
                        a.class_name(),
                        describe(a)
                    )));
                }
                if !equals(CheckKind::Preconditions, a, b)? {
                    return Err(precondition(format!(
                        "not all equal objects are equal: {} and {}",
                        describe(a),
                        describe(b)
                    )));
                }
            }
        }

        for (i, a) in self.unequal.iter().enumerate() {
            for b in &self.unequal[i + 1..] {
                if a.same(b) {
                    return Err(appears_twice(a));
                }
                if equals(CheckKind::Preconditions, a, b)? {
                    return Err(precondition(format!(
                        "two objects are equal to each other: {} and {}",
                        describe(a),
                        describe(b)
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_examples(&self) -> VerifierResult<()> {
        for object in self.equal.iter().chain(&self.unequal) {
            if !equals(CHECK, object, object)? {
                return Err(Violation::new(
                    CHECK,
                    format!("object does not equal itself:\n  {}", describe(object)),
                )
                .with_property("Reflexivity")
                .into());
            }
            if object.equals(&Value::Null).during(CHECK, "equals(null)")? {
                return Err(Violation::new(CHECK, "true returned for null value")
                    .with_property("Non-nullity")
                    .into());
            }
        }

        for (i, a) in self.equal.iter().enumerate() {
            for b in &self.equal[i + 1..] {
                symmetric(CHECK, a, b)?;
                hash_matches(CHECK, a, b)?;
            }
        }

        for a in &self.equal {
            for b in &self.unequal {
                if symmetric(CHECK, a, b)? {
                    return Err(Violation::new(
                        CHECK,
                        format!("{} should not equal {}", describe(a), describe(b)),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }
}

fn appears_twice(object: &ObjectRef) -> VerifierError {
    precondition(format!(
        "the same object appears twice in the examples of {}:\n  {}",
        object.class_name(),
        describe(object)
    ))
}

/// Every field holds an equal value
fn identical(a: &ObjectRef, b: &ObjectRef) -> bool {
    a.fields()
        .iter()
        .zip(b.fields().iter())
        .all(|((_, x), (_, y))| Value::objects_equals(x, y).unwrap_or(false))
}

#[cfg(test)]
#[path = "relaxed_tests.rs"]
mod tests;
