use super::*;

#[test]
fn single_red_channel_is_a_number() {
    let ty = parse_type("R32_SFLOAT").unwrap();
    assert_eq!(ty, Type::Number(Number::float(32)));
    let ty = parse_type("R8_SINT").unwrap();
    assert_eq!(ty, Type::Number(Number::int(8)));
}

#[test]
fn multi_channel_names_become_lists() {
    let ty = parse_type("B8G8R8A8_UNORM").unwrap();
    let list = ty.as_list().unwrap();
    assert!(!list.is_packed());
    let names: Vec<_> = list.members.iter().map(|m| m.name).collect();
    assert_eq!(
        names,
        vec![
            FormatComponentType::B,
            FormatComponentType::G,
            FormatComponentType::R,
            FormatComponentType::A
        ]
    );
    assert!(list.members.iter().all(|m| m.mode == FormatMode::UNorm && m.bits == 8));
}

#[test]
fn mode_applies_to_preceding_components() {
    let ty = parse_type("D32_SFLOAT_S8_UINT").unwrap();
    let list = ty.as_list().unwrap();
    assert_eq!(list.members.len(), 2);
    assert_eq!(list.members[0].name, FormatComponentType::D);
    assert_eq!(list.members[0].mode, FormatMode::SFloat);
    assert_eq!(list.members[0].bits, 32);
    assert_eq!(list.members[1].name, FormatComponentType::S);
    assert_eq!(list.members[1].mode, FormatMode::UInt);
}

#[test]
fn packed_names_record_pack_size() {
    let ty = parse_type("A2B10G10R10_UINT_PACK32").unwrap();
    let list = ty.as_list().unwrap();
    assert_eq!(list.pack_size_in_bits, 32);
    assert_eq!(list.members[0].bits, 2);
    assert_eq!(list.members[3].bits, 10);

    let ty = parse_type("X8_D24_UNORM_PACK32").unwrap();
    let list = ty.as_list().unwrap();
    assert_eq!(list.members[0].name, FormatComponentType::X);
    assert_eq!(list.members[1].name, FormatComponentType::D);
}

#[test]
fn glsl_pairs_expand_to_format_names() {
    assert_eq!(parse_type("float/vec2"), parse_type("R32G32_SFLOAT"));
    assert_eq!(parse_type("ubyte/vec4"), parse_type("R8G8B8A8_UINT"));
    assert_eq!(parse_type("int/int"), parse_type("R32_SINT"));
    assert!(parse_type("float/vec5").is_none());
    assert!(parse_type("bogus/vec2").is_none());
}

#[test]
fn rejects_garbage() {
    assert!(parse_type("").is_none());
    assert!(parse_type("R8__UINT").is_none());
    assert!(parse_type("Q8_UINT").is_none());
    assert!(parse_type("PACK7").is_none());
}

#[test]
fn parse_format_tags_known_names() {
    let fmt = parse_format("B8G8R8A8_UNORM").unwrap();
    assert_eq!(fmt.format_type(), FormatType::B8G8R8A8_UNORM);
    assert_eq!(fmt.size_in_bytes(), 4);

    let fmt = parse_format("D32_SFLOAT_S8_UINT").unwrap();
    assert!(fmt.has_stencil_component());
    assert_eq!(fmt.size_in_bytes(), 5);
}
