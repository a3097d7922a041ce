//! Each field's effect on `equals` and `hashCode` must match its classification

use equiv_core::ObjectRef;

use super::laws::{equals, hash};
use super::CheckContext;
use crate::config::Warning;
use crate::errors::{CheckKind, VerifierError, VerifierResult, Violation};
use crate::fields::{Classification, FieldAccessor, FieldDescriptor};
use crate::mutator::Mutator;
use crate::prefab::Tint;
use crate::report::describe;

const CHECK: CheckKind = CheckKind::SignificantFields;

/// How a mutant was derived from the reference instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Swap,
    Null,
}

pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let base = ctx.instance(Tint::Red)?;
    let copy = Mutator::unchanged(&base);
    let equal_to_itself = equals(CHECK, &base, &copy)?;
    let base_hash = hash(CHECK, &base)?;
    let all_fields_used = !ctx.suppressed(Warning::AllFieldsShouldBeUsed);
    let nulls_allowed = !ctx.suppressed(Warning::NullFields);

    for field in ctx.instance_fields() {
        let mut mutants = vec![(Probe::Swap, ctx.vary(&copy, &field)?)];
        if nulls_allowed && field.is_nullable() && !base.get_field(&field).is_null() {
            mutants.push((Probe::Null, ctx.with_null(&copy, &field)?));
        }

        for (probe, mutant) in mutants {
            let equals_changed = equal_to_itself != equals(CHECK, &base, &mutant)?;
            let hash_changed = base_hash != hash(CHECK, &mutant)?;

            // Hash codes only mean something for objects that equal their copy
            if equal_to_itself {
                if equals_changed && !hash_changed && !ctx.suppressed(Warning::StrictHashcode) {
                    return Err(violation(
                        &field,
                        format!("equals relies on {}, but hashCode does not.", field.name),
                        &base,
                        &mutant,
                    ));
                }
                if !equals_changed && hash_changed {
                    return Err(violation(
                        &field,
                        format!(
                            "hashCode relies on {}, but equals does not.\nThese objects are equal, but probably shouldn't be:",
                            field.name
                        ),
                        &base,
                        &mutant,
                    ));
                }
                if field.classification == Classification::Transient
                    && (equals_changed || hash_changed)
                {
                    return Err(violation(
                        &field,
                        format!(
                            "Transient field {} should not be included in equals/hashCode contract.",
                            field.name
                        ),
                        &base,
                        &mutant,
                    ));
                }
            }
            if !all_fields_used {
                continue;
            }
            match field.classification {
                Classification::Significant if probe == Probe::Swap && !equals_changed => {
                    if !ctx.values_for(&field.ty)?.is_stateless() {
                        return Err(violation(
                            &field,
                            format!("equals does not use {}, or it is stateless.", field.name),
                            &base,
                            &mutant,
                        ));
                    }
                }
                Classification::Excluded if equals_changed => {
                    return Err(violation(
                        &field,
                        format!("equals should not use {}, but it does.", field.name),
                        &base,
                        &mutant,
                    ));
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn violation(
    field: &FieldDescriptor,
    message: String,
    base: &ObjectRef,
    mutant: &ObjectRef,
) -> VerifierError {
    Violation::new(
        CHECK,
        format!("{}\n  {}\nand\n  {}", message, describe(base), describe(mutant)),
    )
    .with_field(field.name.clone())
    .into()
}
