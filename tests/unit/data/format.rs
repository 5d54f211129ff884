use super::*;
use crate::data::types::List;

fn vec(rows: u32) -> Type {
    Type::Number(Number::float(32).with_rows(rows))
}

#[test]
fn scalar_and_vec4_have_no_padding() {
    let f = Format::new(Type::Number(Number::int(32)));
    assert_eq!(f.segments().len(), 1);
    assert_eq!(f.size_in_bytes(), 4);

    let f = Format::new(vec(4));
    assert_eq!(f.size_in_bytes(), 16);
    assert_eq!(f.input_needed_per_element(), 4);
}

#[test]
fn vec3_pads_to_vec4_except_when_packed() {
    let mut f = Format::new(vec(3));
    assert_eq!(f.size_in_bytes(), 16);
    assert_eq!(f.input_needed_per_element(), 3);
    assert_eq!(f.component_count(), 3);
    assert!(f.segments()[3].is_padding());

    f.set_layout(Layout::Std140);
    assert_eq!(f.size_in_bytes(), 16);

    f.set_layout(Layout::Packed);
    assert_eq!(f.size_in_bytes(), 12);
    assert!(f.segments().iter().all(|s| !s.is_padding()));
}

#[test]
fn std140_matrix_columns_round_up() {
    let mat = Type::Number(Number::float(32).with_rows(2).with_columns(2));
    let mut f = Format::new(mat);
    assert_eq!(f.size_in_bytes(), 16);

    f.set_layout(Layout::Std140);
    assert_eq!(f.size_in_bytes(), 32);
    assert_eq!(f.input_needed_per_element(), 4);
}

#[test]
fn packed_list_is_one_segment() {
    let mut l = List {
        pack_size_in_bits: 16,
        ..List::default()
    };
    l.add_member(FormatComponentType::R, FormatMode::UNorm, 5);
    l.add_member(FormatComponentType::G, FormatMode::UNorm, 6);
    l.add_member(FormatComponentType::B, FormatMode::UNorm, 5);
    let f = Format::new(Type::List(l));
    assert!(f.is_packed());
    assert_eq!(f.pack_size(), Some(16));
    assert_eq!(f.segments().len(), 1);
    assert_eq!(f.size_in_bytes(), 2);
    assert_eq!(f.input_needed_per_element(), 1);
    assert_eq!(f.generate_name().as_deref(), Some("R5G6B5_UNORM_PACK16"));
}

#[test]
fn equality_is_structural() {
    let a = Format::new(vec(2));
    let b = Format::new(vec(2));
    assert!(a.equal(&b));

    let mut c = Format::new(vec(2));
    c.set_layout(Layout::Std140);
    assert!(!a.equal(&c));

    let d = Format::new(Type::Number(Number::int(32).with_rows(2)));
    assert!(!a.equal(&d));
}

#[test]
fn generated_names_match_vulkan_spelling() {
    let f = Format::with_derived_format_type(vec(3));
    assert_eq!(f.generate_name().as_deref(), Some("R32G32B32_SFLOAT"));
    assert_eq!(f.format_type(), FormatType::R32G32B32_SFLOAT);

    let mat = Type::Number(Number::float(32).with_rows(4).with_columns(4));
    assert_eq!(Format::new(mat).generate_name(), None);
}

#[test]
fn width_predicates_only_apply_to_numbers() {
    let f = Format::new(Type::Number(Number::uint(8).with_rows(4)));
    assert!(f.is_uint8());
    assert!(!f.is_int8());
    assert!(f.are_all_components(FormatMode::UInt, 8));

    let f = Format::new(Type::Number(Number::float(64)));
    assert!(f.is_float64());
    assert!(!f.is_normalized());
}
