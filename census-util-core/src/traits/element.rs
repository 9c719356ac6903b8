//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be
//! stored as matrix values.

use crate::format::DataType;

/// Trait for types that can be stored as matrix elements
///
/// All matrix element types must be plain old data so chunk buffers can
/// be handed to writers as raw bytes without copying.
pub trait MatrixElement:
    Copy + PartialEq + core::fmt::Debug + bytemuck::Pod + Send + Sync + Sized
{
    /// Get the DataType tag for this element type
    fn data_type() -> DataType;

    /// The additive identity
    fn zero() -> Self;

    /// Whether this value counts as an implicit zero
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;
}

macro_rules! impl_matrix_element {
    ($ty:ty, $tag:expr, $zero:expr) => {
        impl MatrixElement for $ty {
            fn data_type() -> DataType {
                $tag
            }

            fn zero() -> Self {
                $zero
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_matrix_element!(f32, DataType::F32, 0.0);
impl_matrix_element!(f64, DataType::F64, 0.0);
impl_matrix_element!(i32, DataType::I32, 0);
impl_matrix_element!(i64, DataType::I64, 0);
impl_matrix_element!(u32, DataType::U32, 0);
impl_matrix_element!(u64, DataType::U64, 0);
