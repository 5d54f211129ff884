use serde::Serialize;

/// Tagged scalar read from a script: an integer or a double.
///
/// The value carries no width. Consumers pick the width when they extract it, and every
/// accessor is an explicit narrowing cast of the stored representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Integer stored as its 64-bit two's complement bit pattern.
    Int(u64),
    /// Floating point value.
    Double(f64),
}

impl Default for Value {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl Value {
    /// Integer value from an unsigned 64-bit pattern.
    pub fn from_int(v: u64) -> Self {
        Self::Int(v)
    }

    /// Integer value from a signed number, stored sign-extended.
    pub fn from_signed(v: i64) -> Self {
        Self::Int(v as u64)
    }

    /// Floating point value.
    pub fn from_double(v: f64) -> Self {
        Self::Double(v)
    }

    /// Replace the content with an integer.
    pub fn set_int(&mut self, v: u64) {
        *self = Self::Int(v);
    }

    /// Replace the content with a double.
    pub fn set_double(&mut self, v: f64) {
        *self = Self::Double(v);
    }

    /// True when the value holds an integer.
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// True when the value holds a double.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Double(_))
    }

    fn bits(&self) -> u64 {
        match *self {
            Self::Int(v) => v,
            Self::Double(d) => d as i64 as u64,
        }
    }

    /// Low 8 bits.
    pub fn as_uint8(&self) -> u8 {
        self.bits() as u8
    }

    /// Low 16 bits.
    pub fn as_uint16(&self) -> u16 {
        self.bits() as u16
    }

    /// Low 32 bits.
    pub fn as_uint32(&self) -> u32 {
        self.bits() as u32
    }

    /// Full 64-bit pattern.
    pub fn as_uint64(&self) -> u64 {
        self.bits()
    }

    /// Low 8 bits, signed.
    pub fn as_int8(&self) -> i8 {
        self.bits() as i8
    }

    /// Low 16 bits, signed.
    pub fn as_int16(&self) -> i16 {
        self.bits() as i16
    }

    /// Low 32 bits, signed.
    pub fn as_int32(&self) -> i32 {
        self.bits() as i32
    }

    /// Full 64-bit pattern, signed.
    pub fn as_int64(&self) -> i64 {
        self.bits() as i64
    }

    /// Narrowed to `f32`. Integers convert through their signed value.
    pub fn as_float(&self) -> f32 {
        self.as_double() as f32
    }

    /// As `f64`. Integers convert through their signed value.
    pub fn as_double(&self) -> f64 {
        match *self {
            Self::Int(v) => v as i64 as f64,
            Self::Double(d) => d,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
