use super::laws::symmetric;
use super::CheckContext;
use crate::errors::{CheckKind, VerifierResult};
use crate::mutator::Mutator;
use crate::prefab::Tint;

const CHECK: CheckKind = CheckKind::Symmetry;

/// `x.equals(y) == y.equals(x)`, also across declared subclasses
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    let black = ctx.instance(Tint::Black)?;
    let red_copy = ctx.instance(Tint::RedCopy)?;

    symmetric(CHECK, &red, &black)?;
    symmetric(CHECK, &red, &red_copy)?;
    symmetric(CHECK, &red, &Mutator::unchanged(&red))?;

    let subclasses = ctx.config.classpath.subclasses_of(ctx.class().name());
    let mut others = Vec::with_capacity(subclasses.len());
    for subclass in &subclasses {
        let other = ctx.instance_of(subclass, Tint::Red)?;
        symmetric(CHECK, &red, &other)?;
        others.push(other);
    }
    for (i, a) in others.iter().enumerate() {
        for b in &others[i + 1..] {
            symmetric(CHECK, a, b)?;
        }
    }
    Ok(())
}
