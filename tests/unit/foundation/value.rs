use super::*;

#[test]
fn integer_accessors_truncate() {
    let v = Value::from_int(0x1_2345_6789);
    assert!(v.is_int());
    assert!(!v.is_float());
    assert_eq!(v.as_uint8(), 0x89);
    assert_eq!(v.as_uint16(), 0x6789);
    assert_eq!(v.as_uint32(), 0x2345_6789);
    assert_eq!(v.as_uint64(), 0x1_2345_6789);
}

#[test]
fn negative_integers_round_trip_through_signed_accessors() {
    let v = Value::from_signed(-2);
    assert_eq!(v.as_int8(), -2);
    assert_eq!(v.as_int16(), -2);
    assert_eq!(v.as_int32(), -2);
    assert_eq!(v.as_int64(), -2);
    assert_eq!(v.as_uint8(), 0xfe);
    assert_eq!(v.as_double(), -2.0);
}

#[test]
fn doubles_narrow_to_float() {
    let v = Value::from_double(2.5);
    assert!(v.is_float());
    assert_eq!(v.as_float(), 2.5f32);
    assert_eq!(v.as_double(), 2.5);
    assert_eq!(v.as_int32(), 2);
}

#[test]
fn setters_replace_the_tag() {
    let mut v = Value::default();
    assert!(v.is_int());
    v.set_double(1.25);
    assert!(v.is_float());
    v.set_int(3);
    assert_eq!(v, Value::Int(3));
}
