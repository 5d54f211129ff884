use super::*;

#[test]
fn encodes_reference_values() {
    assert_eq!(float_to_hex_float16(-6.0), 0xC600);
    assert_eq!(float_to_hex_float11(14.0), 1200);
    assert_eq!(float_to_hex_float10(0.117_187_5), 380);
}

#[test]
fn float16_fields_land_where_expected() {
    let h = u32::from(float_to_hex_float16(-6.0));
    assert_eq!(h >> 15, 1);
    assert_eq!((h >> 10) & 0x1f, 17);
    assert_eq!(h & 0x3ff, 512);
}

#[test]
fn decode_reverses_encode_for_representable_values() {
    for v in [1.0f32, -2.5, 0.5, 1024.0, 3.140625] {
        let h = float_to_hex_float16(v);
        assert_eq!(hex_float_to_float(h, 16).unwrap(), v);
    }
    assert_eq!(hex_float_to_float(1200, 11).unwrap(), 14.0);
    assert_eq!(hex_float_to_float(380, 10).unwrap(), 0.117_187_5);
}

#[test]
fn float16_round_trip_within_precision() {
    for v in [0.1f32, 1.1, 3.3, 123.456, -7.77] {
        let back = hex_float_to_float(float_to_hex_float16(v), 16).unwrap();
        // 10 mantissa bits, truncated.
        let ulp = 2f32.powi(v.abs().log2().floor() as i32 - 10);
        assert!((back - v).abs() <= 1.1 * ulp, "{v} -> {back}");
    }
}

#[test]
fn zero_and_out_of_range_values() {
    assert_eq!(float_to_hex_float16(0.0), 0);
    assert_eq!(float_to_hex_float16(-0.0), 0x8000);
    assert_eq!(hex_float_to_float(0, 16).unwrap(), 0.0);
    assert_eq!(float_to_hex_float16(1.0e-10), 0);
    assert_eq!(float_to_hex_float16(1.0e10), 0x7C00);
    assert!(hex_float_to_float(0x7C00, 16).unwrap().is_infinite());
    assert_eq!(float_to_hex_float11(-1.0), 0);
    assert_eq!(float_to_hex_float10(-1.0), 0);
}

#[test]
fn rejects_unknown_widths() {
    assert!(float_to_hex_float(1.0, 12).is_err());
    assert!(hex_float_to_float(0, 32).is_err());
    assert_eq!(float_to_hex_float(14.0, 11).unwrap(), 1200);
}
