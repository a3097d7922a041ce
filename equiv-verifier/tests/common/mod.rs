//! Shared fixtures for the verifier integration tests
#![allow(dead_code)]

use equiv_core::{ClassBuilder, ClassDef, EnumDef, MethodResult, ObjectRef, Thrown, TypeRef, Value};
use equiv_verifier::{
    Configuration, ContractVerifier, FieldCapability, FieldMetadataTable, VerificationReport,
};
use std::sync::Arc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn expect_success(config: Configuration) {
    init_tracing();
    let report = ContractVerifier::new(config).report();
    assert!(report.is_success(), "expected success, got:\n{}", report);
}

/// Verify and assert the report mentions every fragment
pub fn expect_failure(config: Configuration, fragments: &[&str]) -> VerificationReport {
    init_tracing();
    let report = ContractVerifier::new(config).report();
    assert!(!report.is_success(), "expected a failure for {}", report.class_name);
    let message = report.message();
    for fragment in fragments {
        assert!(
            message.contains(fragment),
            "expected {:?} in:\n{}",
            fragment,
            message
        );
    }
    report
}

/// `other` as an instance of `class`, if it is one
pub fn instance<'a>(other: &'a Value, class: &str) -> Option<&'a ObjectRef> {
    other.as_object().filter(|object| object.instance_of(class))
}

pub fn int(object: &ObjectRef, field: &str) -> i32 {
    object.get(field).as_int().unwrap_or(0)
}

pub fn long(object: &ObjectRef, field: &str) -> i64 {
    object.get(field).as_long().unwrap_or(0)
}

pub fn field_equals(a: &ObjectRef, b: &ObjectRef, field: &str) -> MethodResult<bool> {
    Value::objects_equals(&a.get(field), &b.get(field))
}

/// Hash over every instance field, like a generated `hashCode`
pub fn default_hash(object: &ObjectRef) -> MethodResult<i32> {
    let values: Vec<Value> = object.fields().into_iter().map(|(_, value)| value).collect();
    Value::hash_all(&values)
}

pub fn float_bits(id: i64) -> i32 {
    (id as f32).to_bits() as i32
}

/// Marks `id` as the identity of each class
pub fn jpa_ids(classes: &[&str]) -> FieldMetadataTable {
    classes.iter().fold(FieldMetadataTable::new("jpa"), |table, class| {
        table.mark(class, "id", FieldCapability::Id)
    })
}

pub fn color() -> EnumDef {
    EnumDef::new("Color", &["RED", "BLACK", "INDIGO"])
}

// Versioned entities

pub fn otherwise_stateless_versioned_entity() -> Arc<ClassDef> {
    const NAME: &str = "OtherwiseStatelessVersionedEntity";
    ClassBuilder::new(NAME)
        .final_class()
        .field("id", TypeRef::Long)
        .equals(|this, obj| {
            let other = match instance(obj, NAME) {
                Some(other) => other,
                None => return Ok(false),
            };
            if long(this, "id") == 0 && long(other, "id") == 0 {
                return Ok(this.same(other));
            }
            Ok(long(this, "id") == long(other, "id"))
        })
        .hash_code(default_hash)
        .build()
}

pub fn string_versioned_entity() -> Arc<ClassDef> {
    const NAME: &str = "StringVersionedEntity";
    ClassBuilder::new(NAME)
        .final_class()
        .field("id", TypeRef::Long)
        .field("s", TypeRef::String)
        .equals(|this, obj| {
            let other = match instance(obj, NAME) {
                Some(other) => other,
                None => return Ok(false),
            };
            if long(this, "id") == 0 && long(other, "id") == 0 {
                return Ok(false);
            }
            Ok(long(this, "id") == long(other, "id"))
        })
        .hash_code(|this| Ok(float_bits(long(this, "id"))))
        .build()
}

pub fn weak_string_versioned_entity() -> Arc<ClassDef> {
    const NAME: &str = "WeakStringVersionedEntity";
    ClassBuilder::new(NAME)
        .final_class()
        .field("id", TypeRef::Long)
        .field("s", TypeRef::String)
        .equals(|this, obj| {
            let other = match instance(obj, NAME) {
                Some(other) => other,
                None => return Ok(false),
            };
            if long(this, "id") == 0 && long(other, "id") == 0 {
                return field_equals(this, other, "s");
            }
            Ok(long(this, "id") == long(other, "id"))
        })
        .hash_code(|this| Ok(float_bits(long(this, "id"))))
        .build()
}

pub fn null_check_string_versioned_entity() -> Arc<ClassDef> {
    const NAME: &str = "NullCheckStringVersionedEntity";
    ClassBuilder::new(NAME)
        .final_class()
        .field("id", TypeRef::boxed(TypeRef::Long))
        .field("s", TypeRef::String)
        .equals(|this, obj| {
            let other = match instance(obj, NAME) {
                Some(other) => other,
                None => return Ok(false),
            };
            let id = this.get("id");
            Ok(!id.is_null() && id.equals(&other.get("id"))?)
        })
        .hash_code(|this| Ok(this.get("id").as_long().map_or(0, float_bits)))
        .build()
}

pub fn business_key_string_versioned_entity() -> Arc<ClassDef> {
    const NAME: &str = "BusinessKeyStringVersionedEntity";
    ClassBuilder::new(NAME)
        .final_class()
        .field("id", TypeRef::boxed(TypeRef::Long))
        .field("s", TypeRef::String)
        .equals(|this, obj| match instance(obj, NAME) {
            Some(other) => field_equals(this, other, "s"),
            None => Ok(false),
        })
        .hash_code(|this| Value::hash_all(&[this.get("s")]))
        .build()
}

pub fn can_equal_versioned_entity() -> Arc<ClassDef> {
    const NAME: &str = "CanEqualVersionedEntity";
    ClassBuilder::new(NAME)
        .field("id", TypeRef::boxed(TypeRef::Long))
        .final_equals(|this, obj| {
            let other = match instance(obj, NAME) {
                Some(other) => other,
                None => return Ok(false),
            };
            let id = this.get("id");
            if !id.is_null() {
                return id.equals(&other.get("id"));
            }
            if other.get("id").is_null() {
                return other
                    .can_equal(&Value::Object(this.clone()))
                    .unwrap_or(Ok(false));
            }
            Ok(false)
        })
        .can_equal(|_, obj| Ok(obj.instance_of(NAME)))
        .final_hash_code(default_hash)
        .build()
}

pub fn non_reflexive_can_equal_versioned_entity() -> Arc<ClassDef> {
    ClassBuilder::new("NonReflexiveCanEqualVersionedEntity")
        .extends(can_equal_versioned_entity())
        .can_equal(|_, _| Err(Thrown::illegal_state("catch me if you can")))
        .build()
}

// Significant fields

fn xy_equals(this: &ObjectRef, other: &ObjectRef) -> bool {
    int(this, "x") == int(other, "x") && int(this, "y") == int(other, "y")
}

fn xy_hash(this: &ObjectRef) -> i32 {
    int(this, "x").wrapping_mul(31).wrapping_add(int(this, "y"))
}

/// Final two-dimensional point
pub fn final_point() -> Arc<ClassDef> {
    ClassBuilder::new("FinalPoint")
        .final_class()
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int)
        .equals(|this, obj| Ok(instance(obj, "FinalPoint").map_or(false, |other| xy_equals(this, other))))
        .hash_code(|this| Ok(xy_hash(this)))
        .build()
}

pub fn extra_field_in_equals() -> Arc<ClassDef> {
    ClassBuilder::new("ExtraFieldInEquals")
        .final_class()
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int)
        .equals(|this, obj| {
            Ok(instance(obj, "ExtraFieldInEquals").map_or(false, |other| xy_equals(this, other)))
        })
        .hash_code(|this| Ok(int(this, "x")))
        .build()
}

pub fn extra_field_in_hash_code() -> Arc<ClassDef> {
    ClassBuilder::new("ExtraFieldInHashCode")
        .final_class()
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int)
        .equals(|this, obj| {
            Ok(instance(obj, "ExtraFieldInHashCode")
                .map_or(false, |other| int(this, "x") == int(other, "x")))
        })
        .hash_code(|this| Ok(xy_hash(this)))
        .build()
}

/// Point with a colour that neither `equals` nor `hashCode` looks at
pub fn one_field_unused() -> Arc<ClassDef> {
    ClassBuilder::new("OneFieldUnused")
        .final_class()
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int)
        .field("colorNotUsed", TypeRef::enumeration("Color"))
        .equals(|this, obj| {
            Ok(instance(obj, "OneFieldUnused").map_or(false, |other| xy_equals(this, other)))
        })
        .hash_code(|this| Ok(xy_hash(this)))
        .build()
}

/// No `equals` or `hashCode` at all
pub fn no_fields_used() -> Arc<ClassDef> {
    ClassBuilder::new("NoFieldsUsed")
        .final_class()
        .field("color", TypeRef::enumeration("Color"))
        .build()
}

/// `equals` treats a null on either side as a wildcard
pub fn bug_when_field_is_null() -> Arc<ClassDef> {
    ClassBuilder::new("BugWhenFieldIsNull")
        .final_class()
        .field("s", TypeRef::String)
        .equals(|this, obj| {
            let other = match instance(obj, "BugWhenFieldIsNull") {
                Some(other) => other,
                None => return Ok(false),
            };
            let (s, t) = (this.get("s"), other.get("s"));
            if s.is_null() || t.is_null() {
                return Ok(true);
            }
            s.equals(&t)
        })
        .hash_code(|this| Value::objects_hash(&this.get("s")))
        .build()
}

/// Holds a field whose type has no state of its own
pub fn stateless_container() -> (Arc<ClassDef>, Arc<ClassDef>) {
    let stateless = ClassBuilder::new("Stateless")
        .final_class()
        .equals(|_, obj| Ok(obj.instance_of("Stateless")))
        .hash_code(|_| Ok(42))
        .build();
    let container = ClassBuilder::new("StatelessContainer")
        .final_class()
        .field("stateless", TypeRef::class("Stateless"))
        .equals(|this, obj| match instance(obj, "StatelessContainer") {
            Some(other) => field_equals(this, other, "stateless"),
            None => Ok(false),
        })
        .hash_code(|this| Value::objects_hash(&this.get("stateless")))
        .build();
    (container, stateless)
}

/// Uses `equals` of its fields without null checks
pub fn null_unsafe() -> Arc<ClassDef> {
    ClassBuilder::new("NullUnsafe")
        .final_class()
        .field("s", TypeRef::String)
        .equals(|this, obj| {
            let other = match instance(obj, "NullUnsafe") {
                Some(other) => other,
                None => return Ok(false),
            };
            let s = this.get("s");
            if s.is_null() {
                return Err(Thrown::null_pointer());
            }
            s.equals(&other.get("s"))
        })
        .hash_code(|this| {
            let s = this.get("s");
            if s.is_null() {
                return Err(Thrown::null_pointer());
            }
            s.hash_code()
        })
        .build()
}

// Hierarchy

/// Point whose `equals` accepts any instance of `Point`
pub fn point(final_methods: bool) -> Arc<ClassDef> {
    fn equals(this: &ObjectRef, obj: &Value) -> MethodResult<bool> {
        Ok(instance(obj, "Point").map_or(false, |other| xy_equals(this, other)))
    }
    fn hash(this: &ObjectRef) -> MethodResult<i32> {
        Ok(xy_hash(this))
    }
    let builder = ClassBuilder::new("Point")
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int);
    if final_methods {
        builder.final_equals(equals).final_hash_code(hash).build()
    } else {
        builder.equals(equals).hash_code(hash).build()
    }
}

/// Point that only equals instances of exactly its own class
pub fn get_class_point() -> Arc<ClassDef> {
    ClassBuilder::new("GetClassPoint")
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int)
        .final_equals(|this, obj| {
            Ok(match obj.as_object() {
                Some(other) if other.class_name() == this.class_name() => xy_equals(this, other),
                _ => false,
            })
        })
        .final_hash_code(|this| Ok(xy_hash(this)))
        .build()
}

/// Point that asks the other side whether it may be equal
pub fn can_equal_point() -> Arc<ClassDef> {
    ClassBuilder::new("Point")
        .field("x", TypeRef::Int)
        .field("y", TypeRef::Int)
        .equals(|this, obj| {
            let other = match instance(obj, "Point") {
                Some(other) => other,
                None => return Ok(false),
            };
            let accepted = other
                .can_equal(&Value::Object(this.clone()))
                .unwrap_or(Ok(true))?;
            Ok(accepted && xy_equals(this, other))
        })
        .can_equal(|_, obj| Ok(obj.instance_of("Point")))
        .hash_code(|this| Ok(xy_hash(this)))
        .build()
}

fn color_equals(this: &ObjectRef, other: &ObjectRef) -> MethodResult<bool> {
    Ok(xy_equals(this, other) && field_equals(this, other, "color")?)
}

fn color_hash(this: &ObjectRef) -> MethodResult<i32> {
    let color = Value::objects_hash(&this.get("color"))?;
    Ok(xy_hash(this).wrapping_mul(31).wrapping_add(color))
}

/// Coloured point following the `canEqual` protocol of its parent
pub fn can_equal_color_point(parent: Arc<ClassDef>) -> Arc<ClassDef> {
    ClassBuilder::new("ColorPoint")
        .final_class()
        .extends(parent)
        .field("color", TypeRef::enumeration("Color"))
        .equals(|this, obj| {
            let other = match instance(obj, "ColorPoint") {
                Some(other) => other,
                None => return Ok(false),
            };
            let accepted = other
                .can_equal(&Value::Object(this.clone()))
                .unwrap_or(Ok(true))?;
            Ok(accepted && color_equals(this, other)?)
        })
        .can_equal(|_, obj| Ok(obj.instance_of("ColorPoint")))
        .hash_code(color_hash)
        .build()
}

/// Coloured point that only equals other coloured points
pub fn naive_color_point(parent: Arc<ClassDef>) -> Arc<ClassDef> {
    ClassBuilder::new("ColorPoint")
        .final_class()
        .extends(parent)
        .field("color", TypeRef::enumeration("Color"))
        .equals(|this, obj| match instance(obj, "ColorPoint") {
            Some(other) => color_equals(this, other),
            None => Ok(false),
        })
        .hash_code(color_hash)
        .build()
}

/// Coloured point that compares only coordinates against plain points
pub fn mixed_color_point(parent: Arc<ClassDef>) -> Arc<ClassDef> {
    ClassBuilder::new("ColorPoint")
        .final_class()
        .extends(parent)
        .field("color", TypeRef::enumeration("Color"))
        .equals(|this, obj| {
            if let Some(other) = instance(obj, "ColorPoint") {
                return color_equals(this, other);
            }
            Ok(instance(obj, "Point").map_or(false, |other| xy_equals(this, other)))
        })
        .hash_code(|this| Ok(xy_hash(this)))
        .build()
}
