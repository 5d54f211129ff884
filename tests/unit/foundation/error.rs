use super::*;

#[test]
fn display_is_verbatim_for_model_errors() {
    assert_eq!(
        RecipeError::validation("PIPELINE missing color attachment").to_string(),
        "PIPELINE missing color attachment"
    );
    assert_eq!(
        RecipeError::codec("Invalid float bits for CopyValueToBuffer").to_string(),
        "Invalid float bits for CopyValueToBuffer"
    );
}

#[test]
fn parse_errors_are_line_prefixed() {
    let err = RecipeError::parse(7, "Unknown command: foo");
    assert_eq!(err.to_string(), "7: Unknown command: foo");
    assert_eq!(err.message(), "Unknown command: foo");
}

#[test]
fn at_line_keeps_existing_line() {
    let err = RecipeError::parse(3, "x").at_line(9);
    assert_eq!(err.to_string(), "3: x");

    let err = RecipeError::validation("y").at_line(9);
    assert_eq!(err.to_string(), "9: y");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RecipeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
