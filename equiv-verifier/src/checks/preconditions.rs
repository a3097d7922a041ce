use equiv_core::ROOT_CLASS;

use super::CheckContext;
use crate::config::Warning;
use crate::errors::{CheckKind, VerifierResult, Violation};
use crate::prefab::Tint;

/// Values can be produced for every field, and the overrides make sense
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let class = ctx.class().clone();
    if class.inherits_root_equals()
        && class.hash_code_method().is_some()
        && !ctx.suppressed(Warning::InheritedDirectlyFromObject)
    {
        return Err(Violation::new(
            CheckKind::Preconditions,
            format!(
                "{} overrides hashCode, but equals is inherited directly from {}.\nIf this is intentional, consider suppressing Warning.{}",
                class.name(),
                ROOT_CLASS,
                Warning::InheritedDirectlyFromObject
            ),
        )
        .into());
    }

    for field in ctx.instance_fields() {
        ctx.values_for(&field.ty)?;
    }
    ctx.instance(Tint::Red)?;
    ctx.instance(Tint::Black)?;
    Ok(())
}
