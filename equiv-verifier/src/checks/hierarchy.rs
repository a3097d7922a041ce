//! Equality across the class hierarchy
//!
//! Compares the class under test with its superclass and with subclasses:
//! a trivial synthesized one, and the redefined subclass if one is
//! configured. The `canEqual` hook is invoked directly so exceptions thrown
//! from it surface even when `equals` would never reach it.

use equiv_core::{ClassDef, ObjectRef, Slot, Value};

use super::laws::{equals, hash_matches, symmetric};
use super::CheckContext;
use crate::config::Warning;
use crate::errors::{CheckKind, ThrownExt, VerifierError, VerifierResult, Violation};
use crate::mutator::Mutator;
use crate::prefab::Tint;
use crate::report::describe;

const CHECK: CheckKind = CheckKind::Hierarchy;

pub fn check(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    check_superclass(ctx)?;
    if ctx.class().is_final() {
        return Ok(());
    }
    check_subclass(ctx)
}

/// Copy the values of the given slots from one object to another
fn copy_slots(from: &ObjectRef, to: &ObjectRef, layout: &[Slot]) -> VerifierResult<()> {
    for slot in layout {
        if let Some(value) = from.get_slot(slot.index) {
            to.set_slot(slot.index, value)?;
        }
    }
    Ok(())
}

fn check_superclass(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let class = ctx.class().clone();
    let superclass = match class.superclass() {
        Some(superclass) if !superclass.inherits_root_equals() && class.declares_equals() => {
            superclass.clone()
        }
        _ => return Ok(()),
    };

    let red = ctx.instance(Tint::Red)?;
    let parent = ctx.instantiator().instantiate(&superclass)?;
    copy_slots(&red, &parent, superclass.layout())?;

    if ctx.config.settings.redefined_superclass {
        if equals(CHECK, &red, &parent)? || equals(CHECK, &parent, &red)? {
            return Err(Violation::new(
                CHECK,
                format!(
                    "instance\n  {}\nshould not equal superclass instance\n  {}",
                    describe(&red),
                    describe(&parent)
                ),
            )
            .with_property("Redefined superclass")
            .into());
        }
        return Ok(());
    }

    if symmetric(CHECK, &red, &parent)? {
        hash_matches(CHECK, &red, &parent)?;
    }
    Ok(())
}

fn check_subclass(ctx: &mut CheckContext<'_>) -> VerifierResult<()> {
    let class = ctx.class().clone();
    let red = ctx.instance(Tint::Red)?;

    if let Some(redefined) = ctx.config.redefined_subclass.clone() {
        let other = ctx.instance_of(&redefined, Tint::Red)?;
        copy_slots(&red, &other, class.layout())?;
        if equals(CHECK, &red, &other)? {
            return Err(Violation::new(
                CHECK,
                format!(
                    "instance\n  {}\nshould not equal subclass instance\n  {}",
                    describe(&red),
                    describe(&other)
                ),
            )
            .with_property("Redefined subclass")
            .into());
        }
    } else if !ctx.suppressed(Warning::StrictInheritance) && !class.inherits_root_equals() {
        check_finality(&class)?;
    }

    if class.inherits_root_equals() || !equals(CHECK, &red, &Mutator::unchanged(&red))? {
        return Ok(());
    }

    let sub = ctx.instantiator().instantiate_trivial_subclass(red.class())?;
    red.copy_into(&sub)?;

    let red_value = Value::Object(red.clone());
    let sub_value = Value::Object(sub.clone());
    if let Some(result) = red.can_equal(&sub_value) {
        result.during(CHECK, "canEqual")?;
    }
    if let Some(result) = sub.can_equal(&red_value) {
        result.during(CHECK, "canEqual")?;
    }

    let forward = equals(CHECK, &red, &sub)?;
    let backward = equals(CHECK, &sub, &red)?;
    if ctx.config.settings.using_get_class {
        if forward || backward {
            return Err(Violation::new(
                CHECK,
                format!(
                    "object is equal to an instance of a trivial subclass with equal fields:\n  {}\nThis should not happen when using getClass().",
                    describe(&red)
                ),
            )
            .into());
        }
        return Ok(());
    }
    if !(forward && backward) {
        return Err(Violation::new(
            CHECK,
            format!(
                "object is not equal to an instance of a trivial subclass with equal fields:\n  {}\nMaybe you forgot to add usingGetClass(). Otherwise, consider making the class final.",
                describe(&red)
            ),
        )
        .into());
    }
    hash_matches(CHECK, &red, &sub)
}

fn check_finality(class: &ClassDef) -> VerifierResult<()> {
    let not_final = |method: &str| -> VerifierError {
        Violation::new(
            CHECK,
            format!(
                "{} is not final.\nMake your class or your {} method final, or supply an instance of a redefined subclass if {} cannot be final.",
                method, method, method
            ),
        )
        .into()
    };
    if class.equals_method().map_or(false, |method| !method.is_final) {
        return Err(not_final("equals"));
    }
    if class.hash_code_method().map_or(false, |method| !method.is_final) {
        return Err(not_final("hashCode"));
    }
    Ok(())
}
