use super::*;
use crate::data::datum_type_parser::parse_datum_format;
use crate::data::type_parser::parse_format;
use crate::data::types::{List, Type};

fn buffer(fmt: &str) -> Buffer {
    Buffer::with_format("buf", parse_datum_format(fmt).unwrap())
}

#[test]
fn defaults() {
    let mut b = Buffer::new("b");
    assert_eq!(b.width, 1);
    assert_eq!(b.mip_levels, 1);
    assert_eq!(b.element_count(), 0);
    assert_eq!(b.value_count(), 0);
    assert_eq!(b.size_in_bytes(), 0);
    assert!(b.format().is_none());
    assert!(b.set_data(&[Value::from_int(1)]).is_err());
}

#[test]
fn set_format_clears_default_flag() {
    let mut b = buffer("int");
    b.set_format_is_default(true);
    b.set_format(parse_datum_format("float").unwrap());
    assert!(!b.format_is_default());
}

#[test]
fn formats_without_components_are_rejected() {
    let empty = Format::new(Type::List(List::default()));
    let mut b = Buffer::with_format("empty", empty);
    let other = buffer("int");

    let err = b.set_data_with_offset(&[Value::from_int(1)], 4).unwrap_err();
    assert_eq!(err.to_string(), "buffer empty format has no components");
    assert!(b.recalculate_max_size_in_bytes(&[Value::from_int(1)], 0).is_err());
    assert!(b.set_value_count(4).is_err());
    assert!(b.set_size_in_bytes(8).is_err());
    assert!(b.set_data_from_buffer(&other, 0).is_err());
    assert_eq!(b.element_count(), 0);
}

#[test]
fn vec3_values_skip_padding() {
    let mut b = buffer("vec3");
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0].map(Value::from_double);
    b.set_data(&values).unwrap();
    assert_eq!(b.element_count(), 2);
    assert_eq!(b.value_count(), 6);
    assert_eq!(b.size_in_bytes(), 32);

    let floats: Vec<f32> = b
        .bytes()
        .chunks(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(floats, vec![1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0]);
}

#[test]
fn integer_literals_are_converted_for_float_components() {
    let mut b = buffer("float");
    b.set_data(&[Value::from_int(2)]).unwrap();
    assert_eq!(b.bytes(), &2.0f32.to_le_bytes());

    let mut b = buffer("int16_t");
    b.set_data(&[Value::from_double(-3.0)]).unwrap();
    assert_eq!(b.bytes(), &(-3i16).to_le_bytes());
}

#[test]
fn offset_writes_grow_but_never_shrink() {
    let mut b = buffer("uint");
    b.set_size_in_elements(8).unwrap();
    b.set_data_with_offset(&[Value::from_int(7)], 4).unwrap();
    assert_eq!(b.element_count(), 8);
    assert_eq!(&b.bytes()[4..8], &7u32.to_le_bytes());

    b.set_data_with_offset(&[Value::from_int(9)], 40).unwrap();
    assert_eq!(b.element_count(), 11);
    assert_eq!(b.size_in_bytes(), 44);
}

#[test]
fn packed_formats_take_one_value_per_element() {
    let mut b = Buffer::with_format("p", parse_format("A2B10G10R10_UINT_PACK32").unwrap());
    b.set_data(&[Value::from_int(0xdead_beef), Value::from_int(1)])
        .unwrap();
    assert_eq!(b.element_count(), 2);
    assert_eq!(b.value_count(), 2);
    assert_eq!(&b.bytes()[..4], &0xdead_beefu32.to_le_bytes());
}

#[test]
fn max_size_tracks_the_largest_write() {
    let mut b = buffer("vec3");
    assert_eq!(b.max_size_in_bytes(), 0);
    let values = [1.0, 2.0, 3.0].map(Value::from_double);
    b.recalculate_max_size_in_bytes(&values, 16).unwrap();
    assert_eq!(b.max_size_in_bytes(), 32);
    b.recalculate_max_size_in_bytes(&values, 0).unwrap();
    assert_eq!(b.max_size_in_bytes(), 32);
}

#[test]
fn size_in_bytes_must_be_whole_elements() {
    let mut b = buffer("uint");
    b.set_size_in_bytes(12).unwrap();
    assert_eq!(b.element_count(), 3);
    assert!(b.set_size_in_bytes(13).is_err());
}

#[test]
fn copy_from_buffer_and_copy_to() {
    let mut src = buffer("uint8_t");
    src.set_data(&[1, 2, 3].map(Value::from_int)).unwrap();

    let mut dst = buffer("uint8_t");
    dst.set_data_from_buffer(&src, 2).unwrap();
    assert_eq!(dst.bytes(), &[0, 0, 1, 2, 3]);
    assert_eq!(dst.element_count(), 5);

    let mut other = buffer("uint8_t");
    assert_eq!(
        src.copy_to(&mut other).unwrap_err().to_string(),
        "Buffer::CopyBaseFields() buffers have a different size"
    );
    other.set_size_in_elements(3).unwrap();
    src.copy_to(&mut other).unwrap();
    src.is_equal(&other).unwrap();
}

#[test]
fn equality_reports_first_difference() {
    let mut a = buffer("uint8_t");
    a.set_data(&[1, 2, 3].map(Value::from_int)).unwrap();
    let mut b = buffer("uint8_t");
    b.set_data(&[1, 5, 6].map(Value::from_int)).unwrap();
    assert_eq!(
        a.is_equal(&b).unwrap_err().to_string(),
        "Buffers have different values. 2 values differed, first difference at byte 1 values 2 != 5"
    );

    let c = buffer("int");
    assert_eq!(
        a.is_equal(&c).unwrap_err().to_string(),
        "Buffers have a different format"
    );
}

#[test]
fn rmse_over_signed_components() {
    let mut a = buffer("int");
    a.set_data(&[Value::from_signed(-2), Value::from_int(4)])
        .unwrap();
    let mut b = buffer("int");
    b.set_data(&[Value::from_signed(-4), Value::from_int(2)])
        .unwrap();
    a.compare_rmse(&b, 2.0).unwrap();
    let err = a.compare_rmse(&b, 1.5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Root Mean Square Error of 2.000000 is greater than tolerance of 1.500000"
    );
}

#[test]
fn histogram_emd_needs_four_byte_channels() {
    let mut a = Buffer::with_format("a", parse_format("R8G8B8A8_UNORM").unwrap());
    a.set_data(&[10, 20, 30, 40, 10, 20, 30, 40].map(Value::from_int))
        .unwrap();
    let mut b = a.clone();
    a.compare_histogram_emd(&b, 0.0).unwrap();

    b.set_data(&[11, 20, 30, 40, 10, 20, 30, 40].map(Value::from_int))
        .unwrap();
    assert!(a.compare_histogram_emd(&b, 0.0).is_err());
    a.compare_histogram_emd(&b, 0.01).unwrap();

    let f = buffer("float");
    assert_eq!(
        f.compare_histogram_emd(&f, 1.0).unwrap_err().to_string(),
        "EMD comparison only supports 8bit unorm format with four channels."
    );
}
