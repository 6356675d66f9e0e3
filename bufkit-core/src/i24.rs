//! Packed signed 24-bit integer.
//!
//! [`I24`] stores three little-endian bytes, making it layout-compatible
//! with packed 24-bit sample buffers. Conversions from wider types keep the
//! low 24 bits; conversions to wider types sign-extend from bit 23.

/// A signed 24-bit integer stored as three little-endian bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct I24([u8; 3]);

const _: () = assert!(std::mem::size_of::<I24>() == 3);

impl I24 {
    /// Smallest representable value (`-8_388_608`).
    pub const MIN: I24 = I24::from_i32(-0x80_0000);
    /// Largest representable value (`8_388_607`).
    pub const MAX: I24 = I24::from_i32(0x7F_FFFF);

    /// Build from the low 24 bits of an `i32`.
    pub const fn from_i32(value: i32) -> Self {
        Self([value as u8, (value >> 8) as u8, (value >> 16) as u8])
    }

    /// Sign-extend into an `i32`.
    pub const fn to_i32(self) -> i32 {
        (((self.0[2] as i8) as i32) << 16) | ((self.0[1] as i32) << 8) | (self.0[0] as i32)
    }

    /// Widen into the full 32-bit range.
    ///
    /// The value moves into the high three bytes and the low byte is filled
    /// with the complement of the sign, so `MAX` widens to `i32::MAX` and
    /// `MIN` widens to `i32::MIN`.
    pub const fn scale_up_to_i32(self) -> i32 {
        let sign_fill = !(((self.0[2] as i8) >> 7) as u8);
        (((self.0[2] as u32) << 24)
            | ((self.0[1] as u32) << 16)
            | ((self.0[0] as u32) << 8)
            | (sign_fill as u32)) as i32
    }

    /// The raw little-endian bytes.
    pub const fn to_le_bytes(self) -> [u8; 3] {
        self.0
    }

    /// Build from raw little-endian bytes.
    pub const fn from_le_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }
}

impl From<i32> for I24 {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<I24> for i32 {
    fn from(value: I24) -> Self {
        value.to_i32()
    }
}

impl From<f32> for I24 {
    fn from(value: f32) -> Self {
        Self::from_i32(value as i32)
    }
}

impl From<f64> for I24 {
    fn from(value: f64) -> Self {
        Self::from_i32(value as i32)
    }
}

impl From<I24> for f32 {
    fn from(value: I24) -> Self {
        value.to_i32() as f32
    }
}

impl From<I24> for f64 {
    fn from(value: I24) -> Self {
        value.to_i32() as f64
    }
}
