//! Matrix conversions between the engine transform and `nalgebra` matrices.
//!
//! The engine stores transforms row-major and multiplies row vectors from the
//! left, while `nalgebra` stores matrices column-major and multiplies column
//! vectors from the right. Row `r` of an engine matrix therefore maps onto
//! column `r` of the double-precision matrix, which keeps the storage order
//! identical and the transform's action unchanged.

use crate::{
    engine::{EngineMatrix, EngineVector},
    error::ConversionError,
};
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// Stateless conversions between engine-native single-precision values and
/// double-precision `nalgebra` values.
#[derive(Debug)]
pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Widens the given engine matrix to a double-precision matrix.
    ///
    /// Every component is preserved exactly.
    pub fn to_double_matrix(m: &EngineMatrix) -> Matrix4<f64> {
        Matrix4::from_fn(|row, column| f64::from(m.m[column][row]))
    }

    /// Widens the given engine matrix, replacing its translation with the
    /// given vector and a homogeneous component of 1.
    pub fn to_double_matrix_with_translation(
        m: &EngineMatrix,
        translation: &Vector3<f64>,
    ) -> Matrix4<f64> {
        Self::to_double_matrix_with_translation_components(
            m,
            translation.x,
            translation.y,
            translation.z,
            1.0,
        )
    }

    /// Widens the given engine matrix, replacing its translation column with
    /// the given 4-vector.
    pub fn to_double_matrix_with_translation_4d(
        m: &EngineMatrix,
        translation: &Vector4<f64>,
    ) -> Matrix4<f64> {
        Self::to_double_matrix_with_translation_components(
            m,
            translation.x,
            translation.y,
            translation.z,
            translation.w,
        )
    }

    /// Widens the given engine matrix, replacing its translation column with
    /// `(tx, ty, tz, tw)`.
    ///
    /// `tw` is usually 1.0 but is left to the caller for projective use.
    pub fn to_double_matrix_with_translation_components(
        m: &EngineMatrix,
        tx: f64,
        ty: f64,
        tz: f64,
        tw: f64,
    ) -> Matrix4<f64> {
        let mut result = Self::to_double_matrix(m);
        result.set_column(3, &Vector4::new(tx, ty, tz, tw));
        result
    }

    /// Creates the identity matrix with its translation column set to
    /// `(tx, ty, tz, tw)`.
    pub fn translation_matrix(tx: f64, ty: f64, tz: f64, tw: f64) -> Matrix4<f64> {
        let mut result = Matrix4::identity();
        result.set_column(3, &Vector4::new(tx, ty, tz, tw));
        result
    }

    /// Narrows the given 3x3 rotation/scale block into the upper-left corner
    /// of an engine identity matrix.
    ///
    /// This loses precision; do not rely on it for bit-exact round trips.
    pub fn to_engine_matrix_3x3(m: &Matrix3<f64>) -> EngineMatrix {
        Self::engine_matrix_from_columns(
            &m.column(0).into_owned(),
            &m.column(1).into_owned(),
            &m.column(2).into_owned(),
        )
    }

    /// Narrows the given double-precision matrix to an engine matrix.
    ///
    /// Each component is rounded to the nearest single-precision value.
    /// Finite components beyond the single-precision range become infinite;
    /// use [`Self::try_to_engine_matrix`] to detect that.
    pub fn to_engine_matrix(m: &Matrix4<f64>) -> EngineMatrix {
        EngineMatrix::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|column| m[(column, row)] as f32)
        }))
    }

    /// Like [`Self::to_engine_matrix`], but fails if a finite component does
    /// not fit in single precision.
    ///
    /// Non-finite components are passed through unchanged.
    ///
    /// # Errors
    /// Returns [`ConversionError::NarrowingOverflow`] naming the first
    /// offending component, in engine (row-major) coordinates.
    pub fn try_to_engine_matrix(m: &Matrix4<f64>) -> Result<EngineMatrix, ConversionError> {
        let narrowed = Self::to_engine_matrix(m);
        for (row, values) in narrowed.m.iter().enumerate() {
            for (column, value) in values.iter().enumerate() {
                let source = m[(column, row)];
                if source.is_finite() && !value.is_finite() {
                    log::debug!(
                        "Rejecting narrowing of component ({row}, {column}) with value {source}"
                    );
                    return Err(ConversionError::NarrowingOverflow {
                        row,
                        column,
                        value: source,
                    });
                }
            }
        }
        Ok(narrowed)
    }

    /// Creates an engine identity matrix whose rotation/scale block is built
    /// from the given double-precision columns.
    pub fn engine_matrix_from_columns(
        column_0: &Vector3<f64>,
        column_1: &Vector3<f64>,
        column_2: &Vector3<f64>,
    ) -> EngineMatrix {
        EngineMatrix::from_axes(
            Self::vector_to_engine(column_0),
            Self::vector_to_engine(column_1),
            Self::vector_to_engine(column_2),
            EngineVector::zeros(),
        )
    }
}
