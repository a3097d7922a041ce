use super::*;
use crate::class::ClassBuilder;

#[test]
fn test_register_class_registers_superclasses() {
    let base = ClassBuilder::new("Base").abstract_class().build();
    let child = ClassBuilder::new("Child").extends(base.clone()).build();

    let mut classpath = ClassPath::new();
    classpath.register_class(child.clone()).unwrap();
    assert!(classpath.class("Base").is_some());
    assert!(classpath.class("Child").is_some());

    // same definition again is fine
    classpath.register_class(child).unwrap();

    let impostor = ClassBuilder::new("Child").build();
    assert!(matches!(
        classpath.register_class(impostor),
        Err(ModelError::Duplicate(_))
    ));
}

#[test]
fn test_subclasses_are_sorted() {
    let base = ClassBuilder::new("Base").abstract_class().build();
    let b = ClassBuilder::new("B").extends(base.clone()).build();
    let a = ClassBuilder::new("A").extends(base.clone()).build();
    let classpath = ClassPath::new().with_class(b).with_class(a);

    let names: Vec<_> = classpath
        .subclasses_of("Base")
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(
        classpath.concrete_implementation_of("Base").unwrap().name(),
        "A"
    );
    assert!(classpath.concrete_implementation_of("A").is_none());
}

#[test]
fn test_enums() {
    let classpath = ClassPath::new().with_enum(EnumDef::new("Color", &["RED", "BLACK"]));
    let color = classpath.enum_def("Color").unwrap();
    assert_eq!(color.constants().len(), 2);
    assert_eq!(color.constant("BLACK").unwrap().ordinal, 1);
    assert!(classpath.enum_def("Shade").is_none());
    assert!(matches!(
        classpath.resolve_class("Nope"),
        Err(ModelError::UnknownType(_))
    ));
}
