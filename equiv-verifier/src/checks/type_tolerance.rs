use equiv_core::{ClassBuilder, ObjectRef, TypeRef, Value};

use super::CheckContext;
use crate::errors::{CheckKind, ThrownExt, VerifierResult, Violation};
use crate::prefab::Tint;

const CHECK: CheckKind = CheckKind::TypeTolerance;

/// `x.equals(y)` is false for `y` of an unrelated class and does not throw
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    let unrelated_class = ClassBuilder::new(format!("{}$Unrelated", ctx.class().name()))
        .field("x", TypeRef::Int)
        .build();
    let unrelated = ObjectRef::build(&unrelated_class, [("x", Value::Int(1))])?;

    if red
        .equals(&Value::Object(unrelated))
        .during(CHECK, "equals for an unrelated type")?
    {
        return Err(Violation::new(
            CHECK,
            format!(
                "equals returns true for an object of unrelated type {}.",
                unrelated_class.name()
            ),
        )
        .into());
    }
    Ok(())
}
