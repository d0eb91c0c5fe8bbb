//! Vector widening and mixed-precision arithmetic.
//!
//! Mixing a small single-precision delta with a large integer offset loses
//! the fractional part if the sum is formed in single precision. All the
//! arithmetic here widens both operands to `f64` first and operates only in
//! double precision.
//!
//! The integer operand is three-dimensional. In the 4D variants it never
//! contributes to the homogeneous component. A sum of a single-precision
//! vector and an integer offset is a point (`w = 1`) and a difference between
//! them is a displacement (`w = 0`); when the other operand is already a
//! 4-vector its `w` is carried through, negated when it is subtracted.

use crate::{
    engine::{EngineIntVector, EngineVector},
    matrix::CoordinateConverter,
};
use nalgebra::{Vector3, Vector4};

impl CoordinateConverter {
    /// Widens the given single-precision vector. Exact for all values.
    pub fn vector_from_float(v: &EngineVector) -> Vector3<f64> {
        Vector3::new(f64::from(v.x), f64::from(v.y), f64::from(v.z))
    }

    /// Widens the given integer vector.
    ///
    /// Exact for every `i32`, since the magnitudes stay far below 2^53.
    pub fn vector_from_int(v: &EngineIntVector) -> Vector3<f64> {
        Vector3::new(f64::from(v.x), f64::from(v.y), f64::from(v.z))
    }

    /// Narrows the given vector, rounding each component to the nearest
    /// single-precision value.
    pub fn vector_to_engine(v: &Vector3<f64>) -> EngineVector {
        EngineVector::new(v.x as f32, v.y as f32, v.z as f32)
    }

    pub fn add_3d(f: &EngineVector, i: &EngineIntVector) -> Vector3<f64> {
        Self::vector_from_float(f) + Self::vector_from_int(i)
    }

    pub fn add_3d_int_first(i: &EngineIntVector, f: &EngineVector) -> Vector3<f64> {
        Self::vector_from_int(i) + Self::vector_from_float(f)
    }

    pub fn add_3d_double(d: &Vector3<f64>, i: &EngineIntVector) -> Vector3<f64> {
        d + Self::vector_from_int(i)
    }

    pub fn add_3d_int_double(i: &EngineIntVector, d: &Vector3<f64>) -> Vector3<f64> {
        Self::vector_from_int(i) + d
    }

    /// Computes `f - i` in double precision.
    pub fn subtract_3d(f: &EngineVector, i: &EngineIntVector) -> Vector3<f64> {
        Self::vector_from_float(f) - Self::vector_from_int(i)
    }

    /// Computes `i - f` in double precision.
    pub fn subtract_3d_int_first(i: &EngineIntVector, f: &EngineVector) -> Vector3<f64> {
        Self::vector_from_int(i) - Self::vector_from_float(f)
    }

    /// Computes `d - i`.
    pub fn subtract_3d_double(d: &Vector3<f64>, i: &EngineIntVector) -> Vector3<f64> {
        d - Self::vector_from_int(i)
    }

    /// Computes `i - d`.
    pub fn subtract_3d_int_double(i: &EngineIntVector, d: &Vector3<f64>) -> Vector3<f64> {
        Self::vector_from_int(i) - d
    }

    /// Adds an integer offset to a position, giving a point with `w = 1`.
    pub fn add_4d(f: &EngineVector, i: &EngineIntVector) -> Vector4<f64> {
        Self::add_3d(f, i).push(1.0)
    }

    pub fn add_4d_int_first(i: &EngineIntVector, f: &EngineVector) -> Vector4<f64> {
        Self::add_3d_int_first(i, f).push(1.0)
    }

    /// Adds an integer offset to the spatial part of `d`, keeping `d.w`.
    pub fn add_4d_double(d: &Vector4<f64>, i: &EngineIntVector) -> Vector4<f64> {
        d + Self::homogeneous_offset(i)
    }

    pub fn add_4d_int_double(i: &EngineIntVector, d: &Vector4<f64>) -> Vector4<f64> {
        Self::homogeneous_offset(i) + d
    }

    /// Computes the displacement `f - i`, with `w = 0`.
    pub fn subtract_4d(f: &EngineVector, i: &EngineIntVector) -> Vector4<f64> {
        Self::subtract_3d(f, i).push(0.0)
    }

    /// Computes the displacement `i - f`, with `w = 0`.
    pub fn subtract_4d_int_first(i: &EngineIntVector, f: &EngineVector) -> Vector4<f64> {
        Self::subtract_3d_int_first(i, f).push(0.0)
    }

    /// Computes `d - (i, 0)`.
    pub fn subtract_4d_double(d: &Vector4<f64>, i: &EngineIntVector) -> Vector4<f64> {
        d - Self::homogeneous_offset(i)
    }

    /// Computes `(i, 0) - d`.
    pub fn subtract_4d_int_double(i: &EngineIntVector, d: &Vector4<f64>) -> Vector4<f64> {
        Self::homogeneous_offset(i) - d
    }

    fn homogeneous_offset(i: &EngineIntVector) -> Vector4<f64> {
        Self::vector_from_int(i).push(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_integer_offset_keeps_fraction() {
        let f = EngineVector::new(1.5, -2.25, 0.0);
        let i = EngineIntVector::new(1_000_000, -1_000_000, 0);

        let sum = CoordinateConverter::add_3d(&f, &i);

        assert_eq!(sum, Vector3::new(1000001.5, -1000002.25, 0.0));
    }

    #[test]
    fn test_single_precision_sum_would_lose_fraction() {
        let f = EngineVector::new(0.125, 0.0, 0.0);
        let i = EngineIntVector::new(100_000_000, 0, 0);

        let lossy = f.x + i.x as f32;
        let exact = CoordinateConverter::add_3d(&f, &i);

        assert_ne!(f64::from(lossy), exact.x);
        assert_eq!(exact.x, 100_000_000.125);
    }

    #[test]
    fn test_int_widening_is_exact_at_extremes() {
        let v = CoordinateConverter::vector_from_int(&EngineIntVector::new(i32::MIN, i32::MAX, 0));
        assert_eq!(v, Vector3::new(-2147483648.0, 2147483647.0, 0.0));
    }

    #[test]
    fn test_addition_order_does_not_matter() {
        let f = EngineVector::new(0.1, -7.75, 3.0e-5);
        let i = EngineIntVector::new(-3, 123_456, 9);
        let d = Vector3::new(0.1, 0.2, 0.3);

        assert_eq!(
            CoordinateConverter::add_3d(&f, &i),
            CoordinateConverter::add_3d_int_first(&i, &f)
        );
        assert_eq!(
            CoordinateConverter::add_3d_double(&d, &i),
            CoordinateConverter::add_3d_int_double(&i, &d)
        );
        assert_eq!(
            CoordinateConverter::add_4d(&f, &i),
            CoordinateConverter::add_4d_int_first(&i, &f)
        );
    }

    #[test]
    fn test_subtraction_orders_are_negations() {
        let f = EngineVector::new(0.1, -7.75, 3.0e-5);
        let i = EngineIntVector::new(-3, 123_456, 9);

        assert_eq!(
            CoordinateConverter::subtract_3d(&f, &i),
            -CoordinateConverter::subtract_3d_int_first(&i, &f)
        );
        assert_eq!(
            CoordinateConverter::subtract_4d(&f, &i),
            -CoordinateConverter::subtract_4d_int_first(&i, &f)
        );
    }

    #[test]
    fn test_mixed_4d_homogeneous_component() {
        let f = EngineVector::new(1.0, 2.0, 3.0);
        let i = EngineIntVector::new(10, 20, 30);
        let d = Vector4::new(1.0, 2.0, 3.0, 0.5);

        assert_eq!(
            CoordinateConverter::add_4d(&f, &i),
            Vector4::new(11.0, 22.0, 33.0, 1.0)
        );
        assert_eq!(CoordinateConverter::subtract_4d(&f, &i).w, 0.0);
        assert_eq!(
            CoordinateConverter::add_4d_double(&d, &i),
            Vector4::new(11.0, 22.0, 33.0, 0.5)
        );
        assert_eq!(
            CoordinateConverter::add_4d_int_double(&i, &d),
            CoordinateConverter::add_4d_double(&d, &i)
        );
        assert_eq!(
            CoordinateConverter::subtract_4d_double(&d, &i),
            Vector4::new(-9.0, -18.0, -27.0, 0.5)
        );
        assert_eq!(
            CoordinateConverter::subtract_4d_int_double(&i, &d),
            Vector4::new(9.0, 18.0, 27.0, -0.5)
        );
    }

    #[test]
    fn test_double_subtraction() {
        let d = Vector3::new(0.5, 1e9, -4.0);
        let i = EngineIntVector::new(1, 2, 3);

        assert_eq!(
            CoordinateConverter::subtract_3d_double(&d, &i),
            Vector3::new(-0.5, 999999998.0, -7.0)
        );
        assert_eq!(
            CoordinateConverter::subtract_3d_int_double(&i, &d),
            -CoordinateConverter::subtract_3d_double(&d, &i)
        );
    }

    #[test]
    fn test_narrowing_vector_rounds_to_nearest() {
        let v = Vector3::new(0.1, 1.0 / 3.0, 16777217.0);
        assert_eq!(
            CoordinateConverter::vector_to_engine(&v),
            EngineVector::new(0.1, 1.0 / 3.0, 16777216.0)
        );
    }

    #[test]
    fn test_non_finite_values_propagate() {
        let f = EngineVector::new(f32::NAN, f32::INFINITY, 0.0);
        let sum = CoordinateConverter::add_3d(&f, &EngineIntVector::new(1, 1, 1));
        assert!(sum.x.is_nan());
        assert_eq!(sum.y, f64::INFINITY);
    }
}
