use crate::{
    Angle, Kind, Matrix3, Point, Result, Similarity, TransformError, Transformation, elementary,
    estimate,
};

/// A planar affine transformation.
///
/// Only the top two rows of the augmented matrix are stored;
/// the bottom row is always `[0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// Row-major `[a, b, c, d, e, f]` for the augmented matrix
    /// `[[a, b, c], [d, e, f], [0, 0, 1]]`.
    coefficients: [f64; 6],
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    pub fn identity() -> Self {
        Self {
            coefficients: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// The 6 coefficients of the top two rows, row-major.
    pub fn from_elements(elements: &[f64]) -> Result<Self> {
        let coefficients: [f64; 6] = elements.try_into().map_err(|_| {
            TransformError::Shape(format!(
                "affine transform needs 6 elements, got {}",
                elements.len()
            ))
        })?;
        Ok(Self { coefficients })
    }

    /// Create an Affine transform from an augmented matrix,
    /// i.e. which includes the translation as the last column
    /// and a bottom row of `[0, 0, 1]` (after normalization).
    ///
    /// Fails with [TransformError::UnsupportedOperand] if the matrix is projective.
    pub fn try_from_matrix(matrix: Matrix3) -> Result<Self> {
        let matrix = matrix.normalized()?;
        if !matrix.is_affine() {
            return Err(TransformError::UnsupportedOperand(
                "matrix bottom row is not [0, 0, 1]".into(),
            ));
        }
        Ok(Self::project(&matrix))
    }

    /// Estimate the least-squares affine transform mapping `src` onto `dst`
    /// (at least 3 non-collinear correspondences).
    pub fn from_points(src: &[Point], dst: &[Point]) -> Result<Self> {
        Ok(Self {
            coefficients: estimate::fit_affine(src, dst)?,
        })
    }

    /// Keep the top two rows of a matrix known to be affine.
    pub(crate) fn project(matrix: &Matrix3) -> Self {
        let m = matrix.as_slice();
        Self {
            coefficients: [m[0], m[1], m[2], m[3], m[4], m[5]],
        }
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.coefficients
    }

    /// The translation column.
    pub fn translation(&self) -> [f64; 2] {
        [self.coefficients[2], self.coefficients[5]]
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    fn push(&mut self, elem: &Matrix3) -> &mut Self {
        *self = Self::project(&(elem * &self.matrix()));
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
    pub fn compose(&self, other: &Affine) -> Affine {
        self * other
    }
}

impl From<Similarity> for Affine {
    fn from(value: Similarity) -> Self {
        Self::project(&value.matrix())
    }
}

impl Transformation for Affine {
    #[rustfmt::skip]
    fn matrix(&self) -> Matrix3 {
        let [a, b, c, d, e, f] = self.coefficients;
        Matrix3::from_rows([
            [a, b, c],
            [d, e, f],
            [0.0, 0.0, 1.0],
        ])
    }

    fn kind(&self) -> Kind {
        Kind::Affine
    }

    /// Determinant of the linear block; equal to the full determinant.
    fn determinant(&self) -> f64 {
        let [a, b, _, d, e, _] = self.coefficients;
        a * e - b * d
    }

    fn invert(&self) -> Result<Self> {
        if self.is_degenerate() {
            return Err(TransformError::DegenerateMatrix);
        }
        let inv = self
            .matrix()
            .inverse()
            .ok_or(TransformError::DegenerateMatrix)?;
        // the inverse of an affine matrix is affine; renormalize for rounding in the bottom-right
        Ok(Self::project(&inv.normalized()?))
    }

    fn transform_point(&self, pt: Point) -> Point {
        let [a, b, c, d, e, f] = self.coefficients;
        let [x, y] = pt;
        [a * x + b * y + c, d * x + e * y + f]
    }

    fn apply(&self, pts: &[Point]) -> Vec<Point> {
        pts.iter().map(|pt| self.transform_point(*pt)).collect()
    }
}
