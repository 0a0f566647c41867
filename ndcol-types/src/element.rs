use std::fmt;

use ndcol_result::{Error, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::buffer::ArrayBuffer;

/// Stable one-byte tag for every element category a column can hold.
///
/// The numeric codes are recorded by engines next to each variable, so they
/// must never be renumbered. Using `num_enum` gives the `u8` conversions
/// without hand-written matches.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum ElementType {
    Bool = 1,
    UInt8 = 2,
    Int8 = 3,
    UInt16 = 4,
    Int16 = 5,
    UInt32 = 6,
    Int32 = 7,
    UInt64 = 8,
    Int64 = 9,
    Float32 = 10,
    Float64 = 11,
    Complex32 = 12,
    Complex64 = 13,
    Text = 14,
}

impl ElementType {
    /// Width of one element in bytes, `None` for variable-width text.
    pub fn byte_width(self) -> Option<usize> {
        use ElementType::*;
        let width = match self {
            Bool | UInt8 | Int8 => 1,
            UInt16 | Int16 => 2,
            UInt32 | Int32 | Float32 => 4,
            UInt64 | Int64 | Float64 | Complex32 => 8,
            Complex64 => 16,
            Text => return None,
        };
        Some(width)
    }

    #[inline]
    pub fn is_text(self) -> bool {
        matches!(self, ElementType::Text)
    }

    /// Decode a tag previously produced with `u8::from`.
    pub fn from_code(code: u8) -> Result<Self> {
        ElementType::try_from(code)
            .map_err(|_| Error::Internal(format!("unknown element type code {code}")))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Bool => "bool",
            ElementType::UInt8 => "u8",
            ElementType::Int8 => "i8",
            ElementType::UInt16 => "u16",
            ElementType::Int16 => "i16",
            ElementType::UInt32 => "u32",
            ElementType::Int32 => "i32",
            ElementType::UInt64 => "u64",
            ElementType::Int64 => "i64",
            ElementType::Float32 => "f32",
            ElementType::Float64 => "f64",
            ElementType::Complex32 => "complex32",
            ElementType::Complex64 => "complex64",
            ElementType::Text => "text",
        };
        f.write_str(name)
    }
}

/// Single-precision complex value.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

impl Complex32 {
    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// Double-precision complex value.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex64 {
    pub re: f64,
    pub im: f64,
}

impl Complex64 {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// A fixed-width element category that can be moved through an
/// [`ArrayBuffer`] without reinterpretation.
///
/// Text is deliberately not an `Element`: engines cannot store it as a
/// native array, so it goes through the column layer's text codec instead.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag for this category.
    const TYPE: ElementType;

    /// Move typed values into a tagged buffer.
    fn into_buffer(values: Vec<Self>) -> ArrayBuffer;

    /// Take typed values out of a tagged buffer, failing if the buffer holds
    /// a different category.
    fn from_buffer(buffer: ArrayBuffer) -> Result<Vec<Self>>;
}

/// Invokes `$macro` once per fixed-width element category.
///
/// The callback receives `(native type, ArrayBuffer/ElementType variant)`.
#[macro_export]
macro_rules! ndcol_for_each_element {
    ($macro:ident) => {
        $macro!(bool, Bool);
        $macro!(u8, UInt8);
        $macro!(i8, Int8);
        $macro!(u16, UInt16);
        $macro!(i16, Int16);
        $macro!(u32, UInt32);
        $macro!(i32, Int32);
        $macro!(u64, UInt64);
        $macro!(i64, Int64);
        $macro!(f32, Float32);
        $macro!(f64, Float64);
        $macro!($crate::Complex32, Complex32);
        $macro!($crate::Complex64, Complex64);
    };
}

macro_rules! impl_element {
    ($native:ty, $variant:ident) => {
        impl Element for $native {
            const TYPE: ElementType = ElementType::$variant;

            #[inline]
            fn into_buffer(values: Vec<Self>) -> ArrayBuffer {
                ArrayBuffer::$variant(values)
            }

            fn from_buffer(buffer: ArrayBuffer) -> Result<Vec<Self>> {
                match buffer {
                    ArrayBuffer::$variant(values) => Ok(values),
                    other => Err(Error::type_mismatch(ElementType::$variant, other.element_type())),
                }
            }
        }
    };
}

ndcol_for_each_element!(impl_element);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 1u8..=14 {
            let ty = ElementType::from_code(code).unwrap();
            assert_eq!(u8::from(ty), code);
        }
        assert!(ElementType::from_code(0).is_err());
        assert!(ElementType::from_code(15).is_err());
    }

    #[test]
    fn from_buffer_rejects_other_categories() {
        let buf = <f64 as Element>::into_buffer(vec![1.0, 2.0]);
        let err = <i32 as Element>::from_buffer(buf).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn complex_widths() {
        assert_eq!(ElementType::Complex32.byte_width(), Some(8));
        assert_eq!(ElementType::Complex64.byte_width(), Some(16));
        assert_eq!(ElementType::Text.byte_width(), None);
    }
}
