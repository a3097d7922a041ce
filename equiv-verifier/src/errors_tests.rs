use super::*;

#[test]
fn test_violation_display() {
    let violation = Violation::new(CheckKind::SignificantFields, "equals does not use y.")
        .with_field("y");
    assert_eq!(
        violation.to_string(),
        "Significant fields: equals does not use y."
    );
    assert_eq!(violation.fields, vec!["y"]);
}

#[test]
fn test_thrown_keeps_message_verbatim() {
    let thrown = Thrown::illegal_state("catch me if you can");
    let violation = Violation::thrown(CheckKind::Hierarchy, "canEqual", thrown.clone());
    assert_eq!(
        violation.to_string(),
        "Subclass: canEqual throws IllegalStateException: catch me if you can"
    );
    assert_eq!(violation.cause, Some(thrown));
}

#[test]
fn test_unnecessary_suppression_property() {
    let violation = Violation::unnecessary_suppression(CheckKind::Reflexivity, "IDENTICAL_COPY.");
    assert!(violation.to_string().starts_with("Unnecessary suppression: "));
    assert_eq!(violation.check, CheckKind::Reflexivity);
}

#[test]
fn test_during_wraps_thrown() {
    let result: MethodResult<bool> = Err(Thrown::null_pointer());
    let err = result.during(CheckKind::NullTolerance, "equals(null)").unwrap_err();
    assert!(err.is_violation());
    assert_eq!(
        err.to_string(),
        "Non-nullity: equals(null) throws NullPointerException"
    );

    let ok: MethodResult<bool> = Ok(true);
    assert!(ok.during(CheckKind::NullTolerance, "equals").unwrap());
}

#[test]
fn test_error_helpers() {
    let err = VerifierError::config("Class A does not contain field b.");
    assert_eq!(err.to_string(), "Precondition: Class A does not contain field b.");
    assert!(err.violation().is_none());

    let err = VerifierError::instantiation("Native", "no strategy");
    assert_eq!(err.to_string(), "Could not instantiate Native: no strategy");

    let err: VerifierError = ModelError::no_such_field("A", "b").into();
    assert!(matches!(err, VerifierError::Model(_)));
}
