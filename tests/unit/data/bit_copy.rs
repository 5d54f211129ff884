use super::*;
use crate::data::small_float::hex_float_to_float;

fn read_back(src: &[u8], offset: u32, bits: u32) -> u64 {
    let mut out = [0u8; 8];
    copy_memory_to_buffer(&mut out, src, offset, bits).unwrap();
    u64::from_le_bytes(out)
}

#[test]
fn integers_land_at_bit_offsets() {
    let mut buf = [0u8; 4];
    copy_value_to_buffer(&mut buf, &Value::from_int(0b101), 0, 3).unwrap();
    copy_value_to_buffer(&mut buf, &Value::from_int(0x3ff), 3, 10).unwrap();
    copy_value_to_buffer(&mut buf, &Value::from_int(1), 13, 1).unwrap();

    assert_eq!(read_back(&buf, 0, 3), 0b101);
    assert_eq!(read_back(&buf, 3, 10), 0x3ff);
    assert_eq!(read_back(&buf, 13, 1), 1);
    assert_eq!(buf[2], 0);
    assert_eq!(buf[3], 0);
}

#[test]
fn bytes_outside_the_field_are_preserved() {
    let mut buf = [0xffu8; 3];
    copy_value_to_buffer(&mut buf, &Value::from_int(0), 4, 8).unwrap();
    assert_eq!(buf, [0x0f, 0xf0, 0xff]);
}

#[test]
fn whole_byte_offsets_advance_the_destination() {
    let mut buf = [0u8; 8];
    copy_value_to_buffer(&mut buf, &Value::from_int(0xabcd), 32, 16).unwrap();
    assert_eq!(&buf[4..6], &[0xcd, 0xab]);
    assert_eq!(&buf[..4], &[0, 0, 0, 0]);
}

#[test]
fn negative_integers_are_truncated_twos_complement() {
    let mut buf = [0u8; 2];
    copy_value_to_buffer(&mut buf, &Value::from_signed(-1), 0, 16).unwrap();
    assert_eq!(buf, [0xff, 0xff]);
}

#[test]
fn wide_values_round_trip() {
    let mut buf = [0u8; 8];
    copy_value_to_buffer(&mut buf, &Value::from_int(0x0123_4567_89ab_cdef), 0, 64).unwrap();
    assert_eq!(read_back(&buf, 0, 64), 0x0123_4567_89ab_cdef);

    let mut buf = [0u8; 8];
    copy_value_to_buffer(&mut buf, &Value::from_double(-1.5), 0, 64).unwrap();
    assert_eq!(f64::from_le_bytes(buf), -1.5);

    let mut buf = [0u8; 4];
    copy_value_to_buffer(&mut buf, &Value::from_double(2.25), 0, 32).unwrap();
    assert_eq!(f32::from_le_bytes(buf), 2.25);
}

#[test]
fn small_floats_use_the_hex_codec() {
    let mut buf = [0u8; 4];
    copy_value_to_buffer(&mut buf, &Value::from_double(14.0), 0, 11).unwrap();
    copy_value_to_buffer(&mut buf, &Value::from_double(0.117_187_5), 11, 10).unwrap();

    let f11 = read_back(&buf, 0, 11) as u16;
    let f10 = read_back(&buf, 11, 10) as u16;
    assert_eq!(f11, 1200);
    assert_eq!(f10, 380);
    assert_eq!(hex_float_to_float(f11, 11).unwrap(), 14.0);
}

#[test]
fn float16_sign_is_kept() {
    let mut buf = [0u8; 2];
    copy_value_to_buffer(&mut buf, &Value::from_double(-6.0), 0, 16).unwrap();
    assert_eq!(u16::from_le_bytes(buf), 0xC600);
}

#[test]
fn invalid_widths_fail() {
    let mut buf = [0u8; 16];
    let err = copy_value_to_buffer(&mut buf, &Value::from_double(1.0), 0, 12).unwrap_err();
    assert_eq!(err.to_string(), "Invalid float bits for CopyValueToBuffer");
    let err = copy_value_to_buffer(&mut buf, &Value::from_int(1), 0, 65).unwrap_err();
    assert_eq!(err.to_string(), "Invalid int bits for CopyValueToBuffer");
}

#[test]
fn short_destination_is_an_error() {
    let mut buf = [0u8; 1];
    assert!(copy_value_to_buffer(&mut buf, &Value::from_int(1), 4, 8).is_err());
}
