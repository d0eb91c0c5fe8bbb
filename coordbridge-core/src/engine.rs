//! Single-precision value types laid out the way the host engine stores them.
//!
//! All types are `#[repr(C)]` and [`Pod`], so buffers handed over by the host
//! can be reinterpreted with [`bytemuck`] instead of copied component by
//! component.

use crate::error::ConversionError;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use bytemuck::{Pod, Zeroable};

/// A 3-component single-precision vector.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct EngineVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A 3-component integer vector.
///
/// Used for coarse, large-magnitude offsets such as tile or chunk origins,
/// which have to stay exact no matter how far they are from the world origin.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable, Pod)]
pub struct EngineIntVector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A single-precision 4x4 transform in the host engine's convention.
///
/// Storage is row-major and points are treated as row vectors, so a position
/// `p` is transformed as `p * M` and the translation occupies the last row.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct EngineMatrix {
    pub m: [[f32; 4]; 4],
}

impl EngineVector {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for EngineVector {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<EngineVector> for [f32; 3] {
    fn from(v: EngineVector) -> Self {
        v.to_array()
    }
}

impl TryFrom<&[f32]> for EngineVector {
    type Error = ConversionError;

    fn try_from(components: &[f32]) -> Result<Self, Self::Error> {
        let array: [f32; 3] = components
            .try_into()
            .map_err(|_| ConversionError::SliceLength {
                expected: 3,
                actual: components.len(),
            })?;
        Ok(array.into())
    }
}

impl AbsDiffEq for EngineVector {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for EngineVector {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for EngineVector {
    fn default_max_ulps() -> u32 {
        f32::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}

impl EngineIntVector {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn zeros() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for EngineIntVector {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<EngineIntVector> for [i32; 3] {
    fn from(v: EngineIntVector) -> Self {
        v.to_array()
    }
}

impl TryFrom<&[i32]> for EngineIntVector {
    type Error = ConversionError;

    fn try_from(components: &[i32]) -> Result<Self, Self::Error> {
        let array: [i32; 3] = components
            .try_into()
            .map_err(|_| ConversionError::SliceLength {
                expected: 3,
                actual: components.len(),
            })?;
        Ok(array.into())
    }
}

impl EngineMatrix {
    /// Creates the identity matrix.
    pub const fn identity() -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Creates a matrix whose first three rows hold the given basis axes and
    /// whose last row holds the given origin.
    ///
    /// The homogeneous column is `(0, 0, 0, 1)`, so the result is an affine
    /// transform.
    pub const fn from_axes(
        x_axis: EngineVector,
        y_axis: EngineVector,
        z_axis: EngineVector,
        origin: EngineVector,
    ) -> Self {
        Self::from_rows([
            [x_axis.x, x_axis.y, x_axis.z, 0.0],
            [y_axis.x, y_axis.y, y_axis.z, 0.0],
            [z_axis.x, z_axis.y, z_axis.z, 0.0],
            [origin.x, origin.y, origin.z, 1.0],
        ])
    }

    /// The row at the given index.
    ///
    /// # Panics
    /// If `index` is not less than 4.
    pub const fn row(&self, index: usize) -> [f32; 4] {
        self.m[index]
    }

    /// The translation part, stored in the last row.
    pub const fn translation(&self) -> EngineVector {
        EngineVector::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    /// The 16 components in row-major order.
    pub fn as_flat(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.m)
    }

    /// Transforms the given position as the row vector `(p, 1) * M`.
    ///
    /// No perspective division is performed; the homogeneous component of the
    /// product is dropped.
    pub fn transform_position(&self, position: &EngineVector) -> EngineVector {
        let p = [position.x, position.y, position.z, 1.0];
        let mut out = [0.0_f32; 3];
        for (column, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|row| p[row] * self.m[row][column]).sum();
        }
        out.into()
    }
}

impl Default for EngineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f32; 4]; 4]> for EngineMatrix {
    fn from(m: [[f32; 4]; 4]) -> Self {
        Self::from_rows(m)
    }
}

impl TryFrom<&[f32]> for EngineMatrix {
    type Error = ConversionError;

    /// Reads 16 components in row-major order.
    fn try_from(components: &[f32]) -> Result<Self, Self::Error> {
        let flat: [f32; 16] = components
            .try_into()
            .map_err(|_| ConversionError::SliceLength {
                expected: 16,
                actual: components.len(),
            })?;
        Ok(bytemuck::cast(flat))
    }
}

impl AbsDiffEq for EngineMatrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.as_flat()
            .iter()
            .zip(other.as_flat())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for EngineMatrix {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.as_flat()
            .iter()
            .zip(other.as_flat())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl UlpsEq for EngineMatrix {
    fn default_max_ulps() -> u32 {
        f32::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
        self.as_flat()
            .iter()
            .zip(other.as_flat())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}
