use super::*;
use crate::annotations::FieldMetadataTable;
use equiv_core::ClassBuilder;

fn entity() -> Arc<ClassDef> {
    let base = ClassBuilder::new("Base")
        .abstract_class()
        .field("id", TypeRef::Long)
        .build();
    ClassBuilder::new("Entity")
        .extends(base)
        .field("name", TypeRef::String)
        .transient_field("cache", TypeRef::Int)
        .static_field("COUNT", TypeRef::Int, Value::Int(0))
        .build()
}

fn classification(model: &FieldModel, name: &str) -> Classification {
    model.field(name).unwrap().classification
}

#[test]
fn test_default_classification() {
    let model = FieldModel::build(&Configuration::for_class(entity())).unwrap();
    let names: Vec<_> = model.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "cache", "COUNT"]);

    assert_eq!(classification(&model, "id"), Classification::Significant);
    assert_eq!(classification(&model, "name"), Classification::Significant);
    assert_eq!(classification(&model, "cache"), Classification::Transient);
    assert_eq!(classification(&model, "COUNT"), Classification::Static);
    assert_eq!(&*model.field("id").unwrap().declaring_class, "Base");
    assert_eq!(model.instance_fields().count(), 3);
    assert!(!model.has_id_fields());
}

#[test]
fn test_transient_fields_warning() {
    let config = Configuration::for_class(entity()).suppress(&[Warning::TransientFields]);
    let model = FieldModel::build(&config).unwrap();
    assert_eq!(classification(&model, "cache"), Classification::Significant);
}

#[test]
fn test_configured_exclusions_win() {
    let config = Configuration::for_class(entity())
        .with_ignored_fields(&["name", "COUNT"])
        .unwrap();
    let model = FieldModel::build(&config).unwrap();
    assert_eq!(classification(&model, "name"), Classification::Excluded);
    assert_eq!(classification(&model, "COUNT"), Classification::Excluded);

    let config = Configuration::for_class(entity())
        .with_only_these_fields(&["id"])
        .unwrap();
    let model = FieldModel::build(&config).unwrap();
    assert_eq!(classification(&model, "id"), Classification::Significant);
    assert_eq!(classification(&model, "name"), Classification::Excluded);
    assert_eq!(model.significant_fields().count(), 1);
}

#[test]
fn test_unknown_selected_field() {
    let mut config = Configuration::for_class(entity());
    config.settings.fields = crate::config::FieldSelection::AllExcept(vec!["nope".to_string()]);
    let err = FieldModel::build(&config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Precondition: Class Entity does not contain field nope."
    );
}

#[test]
fn test_identity_fields() {
    let jpa = FieldMetadataTable::new("jpa").mark("Base", "id", FieldCapability::Id);

    let config = Configuration::for_class(entity()).with_metadata(jpa.clone());
    let model = FieldModel::build(&config).unwrap();
    assert!(model.has_id_fields());
    assert!(model.field("id").unwrap().is_id);
    assert_eq!(classification(&model, "id"), Classification::Excluded);
    assert_eq!(classification(&model, "name"), Classification::Significant);

    let config = Configuration::for_class(entity())
        .with_metadata(jpa)
        .suppress(&[Warning::SurrogateKey]);
    let model = FieldModel::build(&config).unwrap();
    assert_eq!(classification(&model, "id"), Classification::Significant);
    assert_eq!(classification(&model, "name"), Classification::Excluded);
    assert_eq!(classification(&model, "COUNT"), Classification::Static);
}

#[test]
fn test_nullability() {
    let nonnull = FieldMetadataTable::new("nonnull").mark("Entity", "name", FieldCapability::NonNull);
    let model = FieldModel::build(&Configuration::for_class(entity()).with_metadata(nonnull)).unwrap();
    assert!(!model.field("id").unwrap().is_nullable());
    assert!(!model.field("name").unwrap().is_nullable());
    assert!(model.field("name").unwrap().non_null);
    assert!(!model.field("COUNT").unwrap().is_nullable());
}

#[test]
fn test_field_accessor_ignores_finality() {
    let class = entity();
    let model = FieldModel::build(&Configuration::for_class(class.clone())).unwrap();
    let object = ObjectRef::allocate(&class).unwrap();
    let id = model.field("id").unwrap();
    assert!(id.is_final);
    object.set_field(id, Value::Long(5)).unwrap();
    assert_eq!(object.get_field(id).as_long(), Some(5));
}

#[test]
fn test_shadowed_superclass_field_is_settable() {
    let parent = ClassBuilder::new("Parent").field("x", TypeRef::Int).build();
    let child = ClassBuilder::new("Child")
        .extends(parent)
        .field("x", TypeRef::Int)
        .build();
    let model = FieldModel::build(&Configuration::for_class(child.clone())).unwrap();
    let fields = model.fields();
    assert_eq!(&*fields[0].declaring_class, "Parent");
    assert_eq!(fields[0].slot, Some(0));
    assert_eq!(fields[1].slot, Some(1));

    let object = ObjectRef::allocate(&child).unwrap();
    object.set_field(&fields[0], Value::Int(5)).unwrap();
    assert_eq!(object.get_slot(0).and_then(|v| v.as_int()), Some(5));
    assert_eq!(object.get_slot(1).and_then(|v| v.as_int()), Some(0));
    assert_eq!(object.get_field(&fields[0]).as_int(), Some(5));

    let statics = FieldModel::build(&Configuration::for_class(entity())).unwrap();
    assert_eq!(statics.field("COUNT").unwrap().slot, None);
}
