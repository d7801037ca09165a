//! Planar projective transformations (homography, affine, similarity) as 3x3 matrices
//! acting on points in homogeneous coordinates,
//! with composition and estimation from point correspondences.

mod error;
pub use error::{Result, TransformError};

mod matrix;
pub use matrix::Matrix3;

pub mod elementary;
pub use elementary::Angle;

mod kind;
pub use kind::Kind;

mod traits;
pub use traits::Transformation;

mod homography;
pub use homography::Homography;
mod affine;
pub use affine::Affine;
mod similarity;
pub use similarity::Similarity;
mod transform;
pub use transform::Transform;
mod ops;

pub mod estimate;
pub use estimate::RCOND;

#[cfg(feature = "ndarray")]
mod ndarr;

/// A 2D point `[x, y]`.
pub type Point = [f64; 2];

/// Tolerance for approximate checks of subgroup membership.
pub const EPSILON: f64 = 1e-10;
