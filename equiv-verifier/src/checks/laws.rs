//! Probes shared by several checks

use equiv_core::{ObjectRef, Value};

use crate::errors::{CheckKind, ThrownExt, VerifierResult, Violation};
use crate::report::describe;

/// `a.equals(b)`, with exceptions attributed to `check`
pub fn equals(check: CheckKind, a: &ObjectRef, b: &ObjectRef) -> VerifierResult<bool> {
    a.equals(&Value::Object(b.clone())).during(check, "equals")
}

pub fn hash(check: CheckKind, object: &ObjectRef) -> VerifierResult<i32> {
    object.hash_code().during(check, "hashCode")
}

/// `a.equals(b)` and `b.equals(a)` must agree
pub fn symmetric(check: CheckKind, a: &ObjectRef, b: &ObjectRef) -> VerifierResult<bool> {
    let forward = equals(check, a, b)?;
    let backward = equals(check, b, a)?;
    if forward != backward {
        return Err(Violation::new(
            check,
            format!(
                "objects are not symmetric:\n  {}\nand\n  {}",
                describe(a),
                describe(b)
            ),
        )
        .with_property("Symmetry")
        .into());
    }
    Ok(forward)
}

/// Equal objects must have equal hash codes
pub fn hash_matches(check: CheckKind, a: &ObjectRef, b: &ObjectRef) -> VerifierResult<()> {
    if !equals(check, a, b)? {
        return Ok(());
    }
    let (hash_a, hash_b) = (hash(check, a)?, hash(check, b)?);
    if hash_a != hash_b {
        return Err(Violation::new(
            check,
            format!(
                "hashCodes should be equal:\n  {} ({})\nand\n  {} ({})",
                describe(a),
                hash_a,
                describe(b),
                hash_b
            ),
        )
        .with_property("hashCode")
        .into());
    }
    Ok(())
}
