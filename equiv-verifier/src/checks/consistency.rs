use super::laws::{equals, hash};
use super::CheckContext;
use crate::errors::{CheckKind, VerifierResult, Violation};
use crate::mutator::Mutator;
use crate::prefab::Tint;
use crate::report::describe;

const CHECK: CheckKind = CheckKind::Consistency;

/// Repeated calls on unchanged objects give the same answer
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    let black = ctx.instance(Tint::Black)?;
    let copy = Mutator::unchanged(&red);
    let rounds = ctx.config.settings.consistency_rounds.max(1);

    for other in [&black, &copy] {
        let first = equals(CHECK, &red, other)?;
        for _ in 0..rounds {
            if equals(CHECK, &red, other)? != first {
                return Err(Violation::new(
                    CHECK,
                    format!(
                        "equals is not consistent when comparing\n  {}\nand\n  {}",
                        describe(&red),
                        describe(other)
                    ),
                )
                .into());
            }
        }
    }

    let first = hash(CHECK, &red)?;
    for _ in 0..rounds {
        if hash(CHECK, &red)? != first {
            return Err(Violation::new(
                CHECK,
                format!("hashCode is not consistent for\n  {}", describe(&red)),
            )
            .into());
        }
    }
    Ok(())
}
