use log::debug;

use crate::{
    Angle, Kind, Matrix3, Point, Result, TransformError, Transformation, elementary, estimate,
};

/// A general planar projective transformation (homography).
///
/// Builder methods mutate in place and return `&mut Self` for chaining;
/// clone first if the original is still needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    /// Normalized so that the bottom-right entry is 1.
    matrix: Matrix3,
}

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

impl Homography {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::IDENTITY,
        }
    }

    /// Normalizes the matrix by its bottom-right entry,
    /// failing with [TransformError::DegenerateInput] if that entry is 0.
    pub fn try_from_matrix(matrix: Matrix3) -> Result<Self> {
        Ok(Self {
            matrix: matrix.normalized()?,
        })
    }

    /// Wrap a matrix whose bottom-right entry is already 1.
    pub(crate) fn from_normalized(matrix: Matrix3) -> Self {
        debug_assert_eq!(matrix[(2, 2)], 1.0);
        Self { matrix }
    }

    pub fn try_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::try_from_matrix(Matrix3::try_from_rows(rows)?)
    }

    /// Row-major coefficients: either all 9,
    /// or the first 8 with the bottom-right entry implicitly 1.
    pub fn from_elements(elements: &[f64]) -> Result<Self> {
        match elements.len() {
            9 => Self::try_from_matrix(Matrix3::try_new(elements, 3)?),
            8 => {
                let mut data = [1.0; 9];
                data[..8].copy_from_slice(elements);
                Self::try_from_matrix(Matrix3::try_new(&data, 3)?)
            }
            n => Err(TransformError::Shape(format!(
                "homography needs 8 or 9 elements, got {n}"
            ))),
        }
    }

    /// Estimate the homography mapping `src` onto `dst` (at least 4 correspondences).
    pub fn from_points(src: &[Point], dst: &[Point]) -> Result<Self> {
        Ok(Self {
            matrix: estimate::fit_homography(src, dst)?,
        })
    }

    pub fn reset(&mut self) {
        self.matrix = Matrix3::IDENTITY;
    }

    fn push(&mut self, elem: &Matrix3) -> &mut Self {
        self.matrix = elem * &self.matrix;
        self
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.push(&elementary::translation(tx, ty))
    }

    /// Fails with [TransformError::InvalidParameter] for a zero factor, leaving `self` untouched.
    pub fn scale(&mut self, sx: f64, sy: f64) -> Result<&mut Self> {
        let elem = elementary::scaling(sx, sy)?;
        Ok(self.push(&elem))
    }

    pub fn rotate(&mut self, theta: impl Into<Angle>) -> &mut Self {
        self.push(&elementary::rotation(theta))
    }

    pub fn shear(&mut self, theta_x: impl Into<Angle>, theta_y: impl Into<Angle>) -> &mut Self {
        self.push(&elementary::shear(theta_x, theta_y))
    }

    /// `self ∘ other`: the result applies `other` first.
    ///
    /// Any operand composed with a homography is a homography.
    pub fn compose<T: Transformation>(&self, other: &T) -> Result<Self> {
        Self::try_from_matrix(self.matrix * other.matrix())
    }
}

impl Transformation for Homography {
    fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    fn kind(&self) -> Kind {
        Kind::General
    }

    /// Fails with [TransformError::DegenerateInput] when the linear block is singular,
    /// since the inverse then maps the line at infinity onto finite points.
    fn invert(&self) -> Result<Self> {
        if self.is_degenerate() {
            return Err(TransformError::DegenerateMatrix);
        }
        let inv = self
            .matrix
            .inverse()
            .ok_or(TransformError::DegenerateMatrix)?;
        debug!("inverted homography with determinant {}", self.determinant());
        Self::try_from_matrix(inv)
    }
}
