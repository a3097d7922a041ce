//! `x.equals(x)`, for an ordinary and for a zero-valued instance

use equiv_core::ObjectRef;
use tracing::warn;

use super::laws::equals;
use super::CheckContext;
use crate::config::Warning;
use crate::errors::{CheckKind, VerifierError, VerifierResult, Violation};
use crate::mutator::Mutator;
use crate::prefab::Tint;
use crate::report::describe;

const CHECK: CheckKind = CheckKind::Reflexivity;

pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    if !equals(CHECK, &red, &red)? {
        return Err(Violation::new(
            CHECK,
            format!("object does not equal itself:\n  {}", describe(&red)),
        )
        .into());
    }
    if ctx.class().inherits_root_equals() {
        return Ok(());
    }

    let copy = Mutator::unchanged(&red);
    let equal_to_copy = equals(CHECK, &red, &copy)?;
    if ctx.suppressed(Warning::IdenticalCopy) {
        if equal_to_copy {
            return Err(unnecessary(
                Warning::IdenticalCopy,
                "Two identical copies are equal.",
            ));
        }
    } else if !equal_to_copy {
        return Err(not_equal_to_copy(&red));
    }

    check_zero_instance(ctx)
}

fn check_zero_instance(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let zero = ctx.zero_instance()?;
    let copy = Mutator::unchanged(&zero);

    if ctx.suppressed(Warning::IdenticalCopyForVersionedEntity) {
        if !ctx.model.has_id_fields() && equals(CHECK, &zero, &copy)? {
            return Err(unnecessary(
                Warning::IdenticalCopyForVersionedEntity,
                "The class has no identity field and an instance with default values equals its copy.",
            ));
        }
        return Ok(());
    }
    if ctx.suppressed(Warning::IdenticalCopy) {
        return Ok(());
    }

    if !equals(CHECK, &zero, &copy)? {
        return Err(not_equal_to_copy(&zero));
    }
    Ok(())
}

fn not_equal_to_copy(object: &ObjectRef) -> VerifierError {
    Violation::new(
        CHECK,
        format!(
            "object does not equal an identical copy of itself:\n  {}\nIf this is intentional, consider suppressing Warning.{}",
            describe(object),
            Warning::IdenticalCopy
        ),
    )
    .into()
}

fn unnecessary(warning: Warning, reason: &str) -> VerifierError {
    warn!(warning = %warning, "Suppressed warning would not have fired");
    Violation::unnecessary_suppression(CHECK, format!("{}. {}", warning, reason)).into()
}
