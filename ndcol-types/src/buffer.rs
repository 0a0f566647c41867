use ndcol_result::{Error, Result};

use crate::element::{Complex32, Complex64, ElementType};

/// A flat element buffer tagged with its element category.
///
/// This is the only currency exchanged with an engine. Element order is the
/// engine's row-major order over the selection's dimensions.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayBuffer {
    Bool(Vec<bool>),
    UInt8(Vec<u8>),
    Int8(Vec<i8>),
    UInt16(Vec<u16>),
    Int16(Vec<i16>),
    UInt32(Vec<u32>),
    Int32(Vec<i32>),
    UInt64(Vec<u64>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Complex32(Vec<Complex32>),
    Complex64(Vec<Complex64>),
    Text(Vec<String>),
}

/// Expands `$body` once per variant with `$v` bound to the inner `Vec`.
macro_rules! each_variant {
    ($value:expr, $v:ident => $body:expr) => {
        match $value {
            ArrayBuffer::Bool($v) => $body,
            ArrayBuffer::UInt8($v) => $body,
            ArrayBuffer::Int8($v) => $body,
            ArrayBuffer::UInt16($v) => $body,
            ArrayBuffer::Int16($v) => $body,
            ArrayBuffer::UInt32($v) => $body,
            ArrayBuffer::Int32($v) => $body,
            ArrayBuffer::UInt64($v) => $body,
            ArrayBuffer::Int64($v) => $body,
            ArrayBuffer::Float32($v) => $body,
            ArrayBuffer::Float64($v) => $body,
            ArrayBuffer::Complex32($v) => $body,
            ArrayBuffer::Complex64($v) => $body,
            ArrayBuffer::Text($v) => $body,
        }
    };
}

/// Like `each_variant!` but rebuilds a buffer of the same variant from the
/// body's `Vec`.
macro_rules! map_variant {
    ($value:expr, $v:ident => $body:expr) => {
        match $value {
            ArrayBuffer::Bool($v) => ArrayBuffer::Bool($body),
            ArrayBuffer::UInt8($v) => ArrayBuffer::UInt8($body),
            ArrayBuffer::Int8($v) => ArrayBuffer::Int8($body),
            ArrayBuffer::UInt16($v) => ArrayBuffer::UInt16($body),
            ArrayBuffer::Int16($v) => ArrayBuffer::Int16($body),
            ArrayBuffer::UInt32($v) => ArrayBuffer::UInt32($body),
            ArrayBuffer::Int32($v) => ArrayBuffer::Int32($body),
            ArrayBuffer::UInt64($v) => ArrayBuffer::UInt64($body),
            ArrayBuffer::Int64($v) => ArrayBuffer::Int64($body),
            ArrayBuffer::Float32($v) => ArrayBuffer::Float32($body),
            ArrayBuffer::Float64($v) => ArrayBuffer::Float64($body),
            ArrayBuffer::Complex32($v) => ArrayBuffer::Complex32($body),
            ArrayBuffer::Complex64($v) => ArrayBuffer::Complex64($body),
            ArrayBuffer::Text($v) => ArrayBuffer::Text($body),
        }
    };
}

impl ArrayBuffer {
    /// A buffer of `len` default-valued elements of category `ty`.
    pub fn filled_default(ty: ElementType, len: usize) -> Self {
        match ty {
            ElementType::Bool => ArrayBuffer::Bool(vec![false; len]),
            ElementType::UInt8 => ArrayBuffer::UInt8(vec![0; len]),
            ElementType::Int8 => ArrayBuffer::Int8(vec![0; len]),
            ElementType::UInt16 => ArrayBuffer::UInt16(vec![0; len]),
            ElementType::Int16 => ArrayBuffer::Int16(vec![0; len]),
            ElementType::UInt32 => ArrayBuffer::UInt32(vec![0; len]),
            ElementType::Int32 => ArrayBuffer::Int32(vec![0; len]),
            ElementType::UInt64 => ArrayBuffer::UInt64(vec![0; len]),
            ElementType::Int64 => ArrayBuffer::Int64(vec![0; len]),
            ElementType::Float32 => ArrayBuffer::Float32(vec![0.0; len]),
            ElementType::Float64 => ArrayBuffer::Float64(vec![0.0; len]),
            ElementType::Complex32 => ArrayBuffer::Complex32(vec![Complex32::default(); len]),
            ElementType::Complex64 => ArrayBuffer::Complex64(vec![Complex64::default(); len]),
            ElementType::Text => ArrayBuffer::Text(vec![String::new(); len]),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayBuffer::Bool(_) => ElementType::Bool,
            ArrayBuffer::UInt8(_) => ElementType::UInt8,
            ArrayBuffer::Int8(_) => ElementType::Int8,
            ArrayBuffer::UInt16(_) => ElementType::UInt16,
            ArrayBuffer::Int16(_) => ElementType::Int16,
            ArrayBuffer::UInt32(_) => ElementType::UInt32,
            ArrayBuffer::Int32(_) => ElementType::Int32,
            ArrayBuffer::UInt64(_) => ElementType::UInt64,
            ArrayBuffer::Int64(_) => ElementType::Int64,
            ArrayBuffer::Float32(_) => ElementType::Float32,
            ArrayBuffer::Float64(_) => ElementType::Float64,
            ArrayBuffer::Complex32(_) => ElementType::Complex32,
            ArrayBuffer::Complex64(_) => ElementType::Complex64,
            ArrayBuffer::Text(_) => ElementType::Text,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload size in bytes; text counts its UTF-8 bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            ArrayBuffer::Text(v) => v.iter().map(String::len).sum(),
            other => {
                let width = other.element_type().byte_width().unwrap_or(0);
                other.len() * width
            }
        }
    }

    /// Copy out the elements at `positions`, in order.
    pub fn gather(&self, positions: &[usize]) -> Result<ArrayBuffer> {
        let len = self.len();
        if let Some(&bad) = positions.iter().find(|&&p| p >= len) {
            return Err(Error::Internal(format!(
                "gather position {bad} out of bounds for buffer of {len}"
            )));
        }
        Ok(map_variant!(self, v => positions.iter().map(|&p| v[p].clone()).collect()))
    }

    /// Overwrite the elements at `positions` with `src`, element by element.
    pub fn scatter(&mut self, positions: &[usize], src: &ArrayBuffer) -> Result<()> {
        if self.element_type() != src.element_type() {
            return Err(Error::type_mismatch(self.element_type(), src.element_type()));
        }
        if positions.len() != src.len() {
            return Err(Error::InvalidArgumentError(format!(
                "scatter of {} elements into {} positions",
                src.len(),
                positions.len()
            )));
        }
        let len = self.len();
        if let Some(&bad) = positions.iter().find(|&&p| p >= len) {
            return Err(Error::Internal(format!(
                "scatter position {bad} out of bounds for buffer of {len}"
            )));
        }
        macro_rules! scatter_into {
            ($($variant:ident),*) => {
                match (self, src) {
                    $(
                        (ArrayBuffer::$variant(dst), ArrayBuffer::$variant(values)) => {
                            for (&p, value) in positions.iter().zip(values) {
                                dst[p] = value.clone();
                            }
                        }
                    )*
                    _ => unreachable!("element types checked above"),
                }
            };
        }
        scatter_into!(
            Bool, UInt8, Int8, UInt16, Int16, UInt32, Int32, UInt64, Int64, Float32, Float64,
            Complex32, Complex64, Text
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_and_scatter_follow_positions() {
        let mut buf = ArrayBuffer::Int32(vec![0, 1, 2, 3, 4, 5]);
        let picked = buf.gather(&[5, 0, 3]).unwrap();
        assert_eq!(picked, ArrayBuffer::Int32(vec![5, 0, 3]));

        buf.scatter(&[1, 4], &ArrayBuffer::Int32(vec![10, 40]))
            .unwrap();
        assert_eq!(buf, ArrayBuffer::Int32(vec![0, 10, 2, 3, 40, 5]));
    }

    #[test]
    fn scatter_rejects_other_type() {
        let mut buf = ArrayBuffer::filled_default(ElementType::Float64, 4);
        let err = buf
            .scatter(&[0], &ArrayBuffer::Float32(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn gather_out_of_bounds_is_error() {
        let buf = ArrayBuffer::Text(vec!["a".into()]);
        assert!(buf.gather(&[1]).is_err());
    }

    #[test]
    fn byte_len_counts_text_bytes() {
        let buf = ArrayBuffer::Text(vec!["ab".into(), "cde".into()]);
        assert_eq!(buf.byte_len(), 5);
        let buf = ArrayBuffer::filled_default(ElementType::Complex64, 3);
        assert_eq!(buf.byte_len(), 48);
    }
}
