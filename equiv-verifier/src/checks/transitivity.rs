use equiv_core::ObjectRef;

use super::laws::equals;
use super::CheckContext;
use crate::errors::{CheckKind, VerifierResult, Violation};
use crate::prefab::Tint;
use crate::report::describe;

const CHECK: CheckKind = CheckKind::Transitivity;

const ORDERINGS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// For every pair of significant fields, build three instances that differ
/// in one field at a time and check that equality chains
pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let red = ctx.instance(Tint::Red)?;
    let fields = ctx.significant_fields();

    for (i, first) in fields.iter().enumerate() {
        for second in &fields[i + 1..] {
            let b = ctx.vary(&red, first)?;
            let c = ctx.vary(&b, second)?;
            chain(&[red.clone(), b, c])?;
        }
    }
    Ok(())
}

fn chain(objects: &[ObjectRef; 3]) -> VerifierResult<()> {
    for [x, y, z] in ORDERINGS {
        let (x, y, z) = (&objects[x], &objects[y], &objects[z]);
        if equals(CHECK, x, y)? && equals(CHECK, y, z)? && !equals(CHECK, x, z)? {
            return Err(Violation::new(
                CHECK,
                format!(
                    "two of these three instances are equal to each other, so the third should be equal too:\n  {}\n  {}\n  {}",
                    describe(x),
                    describe(y),
                    describe(z)
                ),
            )
            .into());
        }
    }
    Ok(())
}
