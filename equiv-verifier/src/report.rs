//! Verification reports and the sinks they are delivered to

use equiv_core::{ObjectRef, Value};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

use crate::errors::{VerifierError, Violation};

const MAX_DESCRIBE_DEPTH: usize = 3;

/// Outcome of verifying one class
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub class_name: String,
    /// Checks that completed before the run stopped
    pub checks_passed: usize,
    /// First contract violation, if any
    #[serde(skip)]
    pub violation: Option<Violation>,
    /// Configuration or instantiation failure, if any
    pub error: Option<String>,
}

impl VerificationReport {
    pub fn success(class_name: impl Into<String>, checks_passed: usize) -> Self {
        Self {
            class_name: class_name.into(),
            checks_passed,
            violation: None,
            error: None,
        }
    }

    pub fn failure(class_name: impl Into<String>, checks_passed: usize, err: VerifierError) -> Self {
        let (violation, error) = match err {
            VerifierError::Violation(violation) => (Some(violation), None),
            other => (None, Some(other.to_string())),
        };
        Self {
            class_name: class_name.into(),
            checks_passed,
            violation,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.violation.is_none() && self.error.is_none()
    }

    /// One-string rendering of the outcome
    pub fn message(&self) -> String {
        match (&self.violation, &self.error) {
            (Some(violation), _) => format!(
                "Equality contract violated in class {}.\n-> {}",
                self.class_name, violation
            ),
            (None, Some(error)) => {
                format!("Could not verify class {}.\n-> {}", self.class_name, error)
            }
            (None, None) => format!("Class {} honours the equality contract.", self.class_name),
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Human readable description of an object for violation messages.
///
/// Uses the class's own `toString` when it defines one, otherwise lists the
/// field values.
pub fn describe(object: &ObjectRef) -> String {
    describe_at(object, 0)
}

fn describe_at(object: &ObjectRef, depth: usize) -> String {
    if object.class().to_string_method().is_some() {
        return match object.to_string_repr() {
            Ok(s) => s,
            Err(thrown) => format!(
                "{}-throws {}({})",
                object.class_name(),
                thrown.exception,
                thrown.message()
            ),
        };
    }
    if depth >= MAX_DESCRIBE_DEPTH {
        return format!("{}{{...}}", object.class_name());
    }
    let fields = object
        .fields()
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, describe_value(&value, depth + 1)))
        .collect::<Vec<_>>();
    format!("{}{{{}}}", object.class_name(), fields.join(", "))
}

fn describe_value(value: &Value, depth: usize) -> String {
    match value {
        Value::Object(object) => describe_at(object, depth),
        other => other.to_string(),
    }
}

/// Destination for finished reports
pub trait ReportSink: Send + Sync {
    fn deliver(&self, report: &VerificationReport);
}

/// Logs every report through `tracing`
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn deliver(&self, report: &VerificationReport) {
        if report.is_success() {
            info!(
                class = %report.class_name,
                checks = report.checks_passed,
                "Verification succeeded"
            );
        } else {
            error!(class = %report.class_name, "{}", report.message());
        }
    }
}

/// Keeps reports in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<VerificationReport>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<VerificationReport> {
        self.reports.lock().clone()
    }
}

impl ReportSink for CollectingSink {
    fn deliver(&self, report: &VerificationReport) {
        self.reports.lock().push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CheckKind;
    use equiv_core::{ClassBuilder, Thrown, TypeRef};

    #[test]
    fn test_report_messages() {
        let ok = VerificationReport::success("Point", 11);
        assert!(ok.is_success());

        let violation = Violation::new(CheckKind::Symmetry, "objects are not symmetric.");
        let failed = VerificationReport::failure("Point", 2, violation.into());
        assert!(!failed.is_success());
        assert_eq!(
            failed.message(),
            "Equality contract violated in class Point.\n-> Symmetry: objects are not symmetric."
        );

        let broken = VerificationReport::failure("Point", 0, VerifierError::config("bad"));
        assert!(broken.violation.is_none());
        assert_eq!(broken.message(), "Could not verify class Point.\n-> Precondition: bad");
    }

    #[test]
    fn test_describe() {
        let inner = ClassBuilder::new("Inner").field("n", TypeRef::Int).build();
        let outer = ClassBuilder::new("Outer")
            .field("name", TypeRef::String)
            .field("inner", TypeRef::class("Inner"))
            .build();
        let object = ObjectRef::build(
            &outer,
            [
                ("name", Value::string("x")),
                ("inner", ObjectRef::build(&inner, [("n", Value::Int(3))]).unwrap().into()),
            ],
        )
        .unwrap();
        assert_eq!(describe(&object), "Outer{name=x, inner=Inner{n=3}}");

        let custom = ClassBuilder::new("Custom")
            .to_string(|_| Ok("custom!".to_string()))
            .build();
        assert_eq!(describe(&ObjectRef::allocate(&custom).unwrap()), "custom!");

        let throwing = ClassBuilder::new("Throwing")
            .to_string(|_| Err(Thrown::null_pointer()))
            .build();
        assert_eq!(
            describe(&ObjectRef::allocate(&throwing).unwrap()),
            "Throwing-throws NullPointerException()"
        );
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.deliver(&VerificationReport::success("A", 1));
        sink.deliver(&VerificationReport::success("B", 1));
        let names: Vec<_> = sink.reports().into_iter().map(|r| r.class_name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
