use super::*;
use crate::class::ClassBuilder;
use crate::classpath::EnumDef;
use crate::types::TypeRef;

// ===== Equality =====

#[test]
fn test_primitive_equality() {
    assert!(Value::Int(1).equals(&Value::Int(1)).unwrap());
    assert!(!Value::Int(1).equals(&Value::Int(2)).unwrap());
    assert!(!Value::Int(1).equals(&Value::Long(1)).unwrap());
    assert!(Value::Char('a').equals(&Value::Char('a')).unwrap());
    assert!(Value::Boolean(true).equals(&Value::Boolean(true)).unwrap());
}

#[test]
fn test_double_equality_uses_bits() {
    assert!(Value::Double(f64::NAN).equals(&Value::Double(f64::NAN)).unwrap());
    assert!(!Value::Double(0.0).equals(&Value::Double(-0.0)).unwrap());
}

#[test]
fn test_strings_equal_but_not_same() {
    let a = Value::string("red");
    let b = Value::string("red");
    assert!(a.equals(&b).unwrap());
    assert!(!a.same_ref(&b));
    assert!(a.same_ref(&a.clone()));
}

#[test]
fn test_equals_on_null_throws() {
    let err = Value::Null.equals(&Value::Int(1)).unwrap_err();
    assert_eq!(err.exception, "NullPointerException");
}

#[test]
fn test_objects_equals_is_null_safe() {
    assert!(Value::objects_equals(&Value::Null, &Value::Null).unwrap());
    assert!(!Value::objects_equals(&Value::Null, &Value::Int(1)).unwrap());
    assert!(!Value::objects_equals(&Value::Int(1), &Value::Null).unwrap());
}

#[test]
fn test_list_and_optional_equality() {
    let a = Value::list(vec![Value::string("x"), Value::Null]);
    let b = Value::list(vec![Value::string("x"), Value::Null]);
    let c = Value::list(vec![Value::string("y"), Value::Null]);
    assert!(a.equals(&b).unwrap());
    assert!(!a.equals(&c).unwrap());

    assert!(Value::some(Value::Int(1)).equals(&Value::some(Value::Int(1))).unwrap());
    assert!(!Value::some(Value::Int(1)).equals(&Value::none()).unwrap());
}

#[test]
fn test_map_equality_ignores_order() {
    let a = Value::map(vec![
        (Value::string("k1"), Value::Int(1)),
        (Value::string("k2"), Value::Int(2)),
    ]);
    let b = Value::map(vec![
        (Value::string("k2"), Value::Int(2)),
        (Value::string("k1"), Value::Int(1)),
    ]);
    assert!(a.equals(&b).unwrap());
    assert_eq!(a.hash_code().unwrap(), b.hash_code().unwrap());
}

#[test]
fn test_enum_equality() {
    let color = EnumDef::new("Color", &["RED", "BLACK"]);
    let red = Value::Enum(color.constants()[0].clone());
    let black = Value::Enum(color.constants()[1].clone());
    assert!(red.equals(&red.clone()).unwrap());
    assert!(!red.equals(&black).unwrap());
    assert_eq!(red.type_name(), "Color");
}

// ===== Hashing =====

#[test]
fn test_host_compatible_hashes() {
    assert_eq!(Value::Int(42).hash_code().unwrap(), 42);
    assert_eq!(Value::Long(1).hash_code().unwrap(), 1);
    assert_eq!(Value::Long(1 << 32).hash_code().unwrap(), 1);
    assert_eq!(Value::Boolean(true).hash_code().unwrap(), 1231);
    assert_eq!(Value::Boolean(false).hash_code().unwrap(), 1237);
    assert_eq!(Value::Char('a').hash_code().unwrap(), 97);
    assert_eq!(Value::string("ab").hash_code().unwrap(), 3105);
    assert_eq!(Value::string("").hash_code().unwrap(), 0);
}

#[test]
fn test_combined_hashes() {
    let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(list.hash_code().unwrap(), 994);
    assert_eq!(Value::hash_all(&[Value::Int(1), Value::Int(2)]).unwrap(), 994);
    assert_eq!(Value::objects_hash(&Value::Null).unwrap(), 0);
    assert_eq!(Value::none().hash_code().unwrap(), 0);
}

// ===== Objects =====

#[test]
fn test_object_without_equals_uses_identity() {
    let class = ClassBuilder::new("Plain")
        .field("x", TypeRef::Int)
        .build();
    let a = Value::Object(ObjectRef::allocate(&class).unwrap());
    let b = Value::Object(ObjectRef::allocate(&class).unwrap());
    assert!(a.equals(&a.clone()).unwrap());
    assert!(!a.equals(&b).unwrap());
    assert!(a.instance_of("Plain"));
    assert!(a.instance_of(crate::ROOT_CLASS));
    assert!(!Value::Int(1).instance_of("Plain"));
}

#[test]
fn test_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::list(vec![Value::Int(1), Value::string("a")]).to_string(), "[1, a]");
    assert_eq!(Value::some(Value::Int(3)).to_string(), "Optional[3]");
    assert_eq!(Value::none().to_string(), "Optional.empty");
    assert_eq!(format!("{:?}", Value::string("a")), "\"a\"");
}

// ===== Properties =====

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn equal_strings_hash_equally(s in ".*") {
            let a = Value::string(&s);
            let b = Value::string(&s);
            prop_assert!(a.equals(&b).unwrap());
            prop_assert_eq!(a.hash_code().unwrap(), b.hash_code().unwrap());
        }

        #[test]
        fn int_hash_is_identity(n in any::<i32>()) {
            prop_assert_eq!(Value::Int(n).hash_code().unwrap(), n);
        }

        #[test]
        fn long_equality_matches_hash(a in any::<i64>(), b in any::<i64>()) {
            let (x, y) = (Value::Long(a), Value::Long(b));
            if x.equals(&y).unwrap() {
                prop_assert_eq!(x.hash_code().unwrap(), y.hash_code().unwrap());
            }
        }
    }
}
