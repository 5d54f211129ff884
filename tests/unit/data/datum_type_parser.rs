use super::*;
use crate::data::format::Layout;
use crate::data::format_type::FormatType;

#[test]
fn scalar_names() {
    let cases = [
        ("int", FormatMode::SInt, 32),
        ("uint", FormatMode::UInt, 32),
        ("int8_t", FormatMode::SInt, 8),
        ("uint8_t", FormatMode::UInt, 8),
        ("int16_t", FormatMode::SInt, 16),
        ("uint16_t", FormatMode::UInt, 16),
        ("int64_t", FormatMode::SInt, 64),
        ("uint64_t", FormatMode::UInt, 64),
        ("float", FormatMode::SFloat, 32),
        ("double", FormatMode::SFloat, 64),
    ];
    for (name, mode, bits) in cases {
        let ty = parse_datum_type(name).unwrap();
        assert_eq!(ty, Type::Number(Number::new(mode, bits)), "{name}");
    }
}

#[test]
fn vector_names() {
    let ty = parse_datum_type("vec3").unwrap();
    assert_eq!(ty, Type::Number(Number::float(32).with_rows(3)));

    let ty = parse_datum_type("i16vec2").unwrap();
    assert_eq!(ty, Type::Number(Number::int(16).with_rows(2)));

    let ty = parse_datum_type("u8vec4").unwrap();
    assert_eq!(ty, Type::Number(Number::uint(8).with_rows(4)));

    let ty = parse_datum_type("dvec2").unwrap();
    assert_eq!(ty, Type::Number(Number::float(64).with_rows(2)));
}

#[test]
fn matrix_names() {
    let ty = parse_datum_type("mat4").unwrap();
    assert_eq!(ty.column_count(), 4);
    assert_eq!(ty.row_count(), 4);

    let ty = parse_datum_type("dmat2x3").unwrap();
    assert_eq!(ty.column_count(), 2);
    assert_eq!(ty.row_count(), 3);
    assert_eq!(ty.as_number().unwrap().bits, 64);
}

#[test]
fn falls_back_to_format_names() {
    let ty = parse_datum_type("R8G8B8A8_UNORM").unwrap();
    assert!(ty.as_list().is_some());
}

#[test]
fn bad_names_report_the_token() {
    let err = parse_datum_type("vec9").unwrap_err();
    assert_eq!(err.to_string(), "Invalid type provided: vec9");
    assert!(parse_datum_type("qvec2").is_err());
    assert!(parse_datum_type("blah").is_err());
}

#[test]
fn vec3_format_pads_but_needs_three_inputs() {
    let fmt = parse_datum_format("vec3").unwrap();
    assert_eq!(fmt.format_type(), FormatType::R32G32B32_SFLOAT);
    assert_eq!(fmt.layout(), Layout::Std430);
    assert_eq!(fmt.input_needed_per_element(), 3);
    assert_eq!(fmt.size_in_bytes(), 16);
}

#[test]
fn matrix_formats_have_no_vulkan_name() {
    let fmt = parse_datum_format("mat2").unwrap();
    assert_eq!(fmt.format_type(), FormatType::Unknown);
}
