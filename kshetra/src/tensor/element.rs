//! Scalar element types a tensor can hold.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

/// Runtime tag of a tensor's scalar type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// 64-bit float
    Float64,
    /// 32-bit float
    Float32,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 8-bit unsigned integer
    UInt8,
}

impl DType {
    /// Size of one element in bytes
    pub const fn size_bytes(self) -> usize {
        match self {
            DType::Float64 => 8,
            DType::Float32 | DType::Int32 | DType::UInt32 => 4,
            DType::UInt8 => 1,
        }
    }

    /// Little-endian array-interface type string (`"<f8"`, `"<i4"`, ...)
    pub const fn format(self) -> &'static str {
        match self {
            DType::Float64 => "<f8",
            DType::Float32 => "<f4",
            DType::Int32 => "<i4",
            DType::UInt32 => "<u4",
            DType::UInt8 => "|u1",
        }
    }

    /// One-byte tag used in binary dumps
    pub(crate) const fn tag(self) -> u8 {
        match self {
            DType::Float64 => 0,
            DType::Float32 => 1,
            DType::Int32 => 2,
            DType::UInt32 => 3,
            DType::UInt8 => 4,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(DType::Float64),
            1 => Some(DType::Float32),
            2 => Some(DType::Int32),
            3 => Some(DType::UInt32),
            4 => Some(DType::UInt8),
            _ => None,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Int32 => "int32",
            DType::UInt32 => "uint32",
            DType::UInt8 => "uint8",
        };
        f.write_str(name)
    }
}

/// A plain scalar that can live in a tensor buffer.
///
/// Each implementor has a fixed [`DType`]; there is no coercion between
/// element types.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag for this type
    const DTYPE: DType;

    /// Write the value in little-endian byte order.
    fn write_le<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;

    /// Read a value stored in little-endian byte order.
    fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self>;
}

macro_rules! impl_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn write_le<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
                writer.write_all(&self.to_le_bytes())
            }

            #[inline]
            fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self> {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                reader.read_exact(&mut buf)?;
                Ok(<$ty>::from_le_bytes(buf))
            }
        }
    };
}

impl_element!(f64, DType::Float64);
impl_element!(f32, DType::Float32);
impl_element!(i32, DType::Int32);
impl_element!(u32, DType::UInt32);
impl_element!(u8, DType::UInt8);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_sizes_match_rust_types() {
        assert_eq!(f64::DTYPE.size_bytes(), std::mem::size_of::<f64>());
        assert_eq!(f32::DTYPE.size_bytes(), std::mem::size_of::<f32>());
        assert_eq!(i32::DTYPE.size_bytes(), std::mem::size_of::<i32>());
        assert_eq!(u32::DTYPE.size_bytes(), std::mem::size_of::<u32>());
        assert_eq!(u8::DTYPE.size_bytes(), std::mem::size_of::<u8>());
    }

    #[test]
    fn test_tags() {
        for dtype in [
            DType::Float64,
            DType::Float32,
            DType::Int32,
            DType::UInt32,
            DType::UInt8,
        ] {
            assert_eq!(DType::from_tag(dtype.tag()), Some(dtype));
        }
        assert_eq!(DType::from_tag(42), None);
    }

    #[test]
    fn test_little_endian_bytes() {
        let mut buf = Vec::new();
        0x0102_0304i32.write_le(&mut buf).unwrap();
        assert_eq!(buf, vec![0x04, 0x03, 0x02, 0x01]);

        let value = i32::read_le(&mut Cursor::new(buf)).unwrap();
        assert_eq!(value, 0x0102_0304);
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::Float64.to_string(), "float64");
        assert_eq!(DType::UInt32.format(), "<u4");
    }
}
