use super::laws::hash_matches;
use super::CheckContext;
use crate::errors::{CheckKind, VerifierResult};
use crate::mutator::Mutator;
use crate::prefab::Tint;

const CHECK: CheckKind = CheckKind::HashConsistency;

/// Equal objects have equal hash codes
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    let black = ctx.instance(Tint::Black)?;
    let red_copy = ctx.instance(Tint::RedCopy)?;

    hash_matches(CHECK, &red, &Mutator::unchanged(&red))?;
    hash_matches(CHECK, &red, &red_copy)?;
    hash_matches(CHECK, &red, &black)?;
    hash_matches(CHECK, &black, &Mutator::unchanged(&black))
}
