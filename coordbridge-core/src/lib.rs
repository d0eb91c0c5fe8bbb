//! Coordbridge core library: precision-safe conversions between an engine's
//! single-precision transforms and double-precision `nalgebra` types.
//!
//! All conversions are stateless associated functions of
//! [`CoordinateConverter`]. Widening conversions are exact; narrowing
//! conversions round to the nearest single-precision value.

pub mod engine;
pub mod error;
pub mod matrix;
pub mod vector;

// Re-export commonly used types
pub use engine::{EngineIntVector, EngineMatrix, EngineVector};
pub use error::ConversionError;
pub use matrix::CoordinateConverter;
