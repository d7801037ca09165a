//! Canonical 3x3 matrices for the elementary planar transforms.
//!
//! The variant builders left-multiply these onto their current matrix,
//! so each new elementary transform is applied after everything accumulated so far.

use crate::{Matrix3, Result, TransformError};

/// A planar angle.
///
/// Bare `f64`s convert to [Angle::Degrees], which is the default unit throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Degrees(f64),
    Radians(f64),
}

impl Angle {
    pub fn degrees(value: f64) -> Self {
        Self::Degrees(value)
    }

    pub fn radians(value: f64) -> Self {
        Self::Radians(value)
    }

    pub fn to_radians(self) -> f64 {
        match self {
            Self::Degrees(d) => d.to_radians(),
            Self::Radians(r) => r,
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Self::Degrees(value)
    }
}

pub fn translation(tx: f64, ty: f64) -> Matrix3 {
    let mut m = Matrix3::IDENTITY;
    m[(0, 2)] = tx;
    m[(1, 2)] = ty;
    m
}

/// Axis-aligned scaling; both factors must be finite and non-zero.
pub fn scaling(sx: f64, sy: f64) -> Result<Matrix3> {
    for s in [sx, sy] {
        if s.is_nan() {
            return Err(TransformError::InvalidParameter("scale is NaN".into()));
        }
        if s.is_infinite() {
            return Err(TransformError::InvalidParameter("scale is infinite".into()));
        }
    }
    if sx * sy == 0.0 {
        return Err(TransformError::InvalidParameter(
            "scale factors should be non-zero".into(),
        ));
    }
    let mut m = Matrix3::IDENTITY;
    m[(0, 0)] = sx;
    m[(1, 1)] = sy;
    Ok(m)
}

/// Counter-clockwise rotation about the origin (for a y-up, right-handed frame).
pub fn rotation(theta: impl Into<Angle>) -> Matrix3 {
    let (s, c) = theta.into().to_radians().sin_cos();
    let mut m = Matrix3::IDENTITY;
    m[(0, 0)] = c;
    m[(0, 1)] = -s;
    m[(1, 0)] = s;
    m[(1, 1)] = c;
    m
}

/// `theta_x` shears along x (angle with the y axis), `theta_y` along y (angle with the x axis).
pub fn shear(theta_x: impl Into<Angle>, theta_y: impl Into<Angle>) -> Matrix3 {
    let mut m = Matrix3::IDENTITY;
    m[(0, 1)] = theta_x.into().to_radians().tan();
    m[(1, 0)] = theta_y.into().to_radians().tan();
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation() {
        let m = translation(1.5, 2.5);
        assert_eq!(
            m.to_rows(),
            [[1.0, 0.0, 1.5], [0.0, 1.0, 2.5], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn test_scaling() {
        let m = scaling(1.5, 2.5).unwrap();
        assert_eq!(m[(0, 0)], 1.5);
        assert_eq!(m[(1, 1)], 2.5);
        assert!(matches!(
            scaling(0.0, 2.0),
            Err(TransformError::InvalidParameter(_))
        ));
        assert!(matches!(
            scaling(1.0, f64::NAN),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_negative_scale_is_allowed() {
        let m = scaling(-1.0, 1.0).unwrap();
        assert_eq!(m.transform_point([2.0, 3.0]), [-2.0, 3.0]);
    }

    #[test]
    fn test_rotation_radians() {
        let theta = 35f64.to_radians();
        let m = rotation(Angle::radians(theta));
        assert_eq!(m[(0, 0)], m[(1, 1)]);
        assert_eq!(m[(1, 0)], -m[(0, 1)]);
        assert_relative_eq!(m[(0, 0)].acos(), theta, epsilon = 1e-12);
        assert_relative_eq!(m[(1, 0)].asin(), theta, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let [x, y] = rotation(Angle::radians(FRAC_PI_2)).transform_point([1.0, 0.0]);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degrees_are_default() {
        assert_eq!(rotation(90.0), rotation(Angle::degrees(90.0)));
        assert_eq!(
            shear(30.0, 0.0),
            shear(Angle::radians(30f64.to_radians()), 0.0)
        );
    }

    #[test]
    fn test_shear() {
        let (theta_x, theta_y) = (35f64.to_radians(), 65f64.to_radians());
        let m = shear(Angle::radians(theta_x), Angle::radians(theta_y));
        assert_relative_eq!(m[(0, 1)].atan(), theta_x, epsilon = 1e-12);
        assert_relative_eq!(m[(1, 0)].atan(), theta_y, epsilon = 1e-12);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 1)], 1.0);
    }
}
