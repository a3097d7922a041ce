//! `equals`, `hashCode` and `toString` must cope with null fields

use equiv_core::{MethodResult, ObjectRef, Thrown, Value};

use super::CheckContext;
use crate::config::Warning;
use crate::errors::{CheckKind, VerifierResult, Violation};
use crate::fields::FieldDescriptor;
use crate::mutator::Mutator;
use crate::prefab::Tint;

const CHECK: CheckKind = CheckKind::NullFields;

pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    if ctx.suppressed(Warning::NullFields) {
        return Ok(());
    }
    let red = ctx.instance(Tint::Red)?;
    let has_to_string = ctx.class().to_string_method().is_some();

    for field in ctx.instance_fields() {
        if !field.is_nullable() {
            continue;
        }
        let nulled = ctx.with_null(&red, &field)?;
        let nulled_copy = Mutator::unchanged(&nulled);

        let as_value = |object: &ObjectRef| Value::Object(object.clone());
        probe(&field, "equals", nulled.equals(&as_value(&nulled_copy)))?;
        probe(&field, "equals", nulled.equals(&as_value(&red)))?;
        probe(&field, "equals", red.equals(&as_value(&nulled)))?;
        probe(&field, "hashCode", nulled.hash_code())?;
        if has_to_string {
            probe(&field, "toString", nulled.to_string_repr())?;
        }
    }
    Ok(())
}

fn probe<T>(field: &FieldDescriptor, method: &str, result: MethodResult<T>) -> VerifierResult<()> {
    result.map(|_| ()).map_err(|thrown: Thrown| {
        Violation::new(
            CHECK,
            format!("{} throws {} on field {}.", method, thrown.exception, field.name),
        )
        .with_field(field.name.clone())
        .with_cause(thrown)
        .into()
    })
}
