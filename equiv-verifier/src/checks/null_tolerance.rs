use equiv_core::Value;

use super::CheckContext;
use crate::errors::{CheckKind, ThrownExt, VerifierResult, Violation};
use crate::prefab::Tint;

const CHECK: CheckKind = CheckKind::NullTolerance;

/// `x.equals(null)` is false and does not throw
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    if red.equals(&Value::Null).during(CHECK, "equals(null)")? {
        return Err(Violation::new(CHECK, "true returned for null value").into());
    }
    Ok(())
}
