use crate::{
    Angle, Kind, Matrix3, Point, Result, TransformError, Transformation, elementary, estimate,
};

/// A planar similarity: uniform scale and rotation, then translation.
///
/// Stored as the parameters `(a, b, c, d)` of `[[a, -b, c], [b, a, d], [0, 0, 1]]`,
/// so the linear block is always a scaled rotation.
/// Shearing and non-uniform scaling leave this subgroup, so they are not offered here;
/// convert into an [crate::Affine] first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Default for Similarity {
    fn default() -> Self {
        Self::identity()
    }
}

impl Similarity {
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// The 4 parameters `[a, b, c, d]`.
    pub fn from_elements(elements: &[f64]) -> Result<Self> {
        let [a, b, c, d]: [f64; 4] = elements.try_into().map_err(|_| {
            TransformError::Shape(format!(
                "similarity transform needs 4 elements, got {}",
                elements.len()
            ))
        })?;
        Ok(Self::new(a, b, c, d))
    }

    /// Fails with [TransformError::UnsupportedOperand] if the (normalized) matrix
    /// is not of the form `[[a, -b, c], [b, a, d], [0, 0, 1]]`.
    pub fn try_from_matrix(matrix: Matrix3) -> Result<Self> {
        let matrix = matrix.normalized()?;
        if !matrix.is_similarity() {
            return Err(TransformError::UnsupportedOperand(
                "matrix is not a similarity transform".into(),
            ));
        }
        Ok(Self::project(&matrix))
    }

    /// Estimate the least-squares similarity mapping `src` onto `dst` (at least 2 correspondences).
    pub fn from_points(src: &[Point], dst: &[Point]) -> Result<Self> {
        let [a, b, c, d] = estimate::fit_similarity(src, dst)?;
        Ok(Self::new(a, b, c, d))
    }

    /// Read the parameters from a matrix known to be a similarity.
    pub(crate) fn project(matrix: &Matrix3) -> Self {
        Self::new(
            matrix[(0, 0)],
            matrix[(1, 0)],
            matrix[(0, 2)],
            matrix[(1, 2)],
        )
    }

    pub fn parameters(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn scale_factor(&self) -> f64 {
        self.a.hypot(self.b)
    }

    pub fn rotation_angle(&self) -> Angle {
        Angle::radians(self.b.atan2(self.a))
    }

    pub fn translation(&self) -> [f64; 2] {
        [self.c, self.d]
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

    /// Uniform scaling about the origin.
    ///
    /// Fails with [TransformError::InvalidParameter] for a zero factor, leaving `self` untouched.
    pub fn scale(&mut self, s: f64) -> Result<&mut Self> {
        let elem = elementary::scaling(s, s)?;
        Ok(self.push(&elem))
    }

    pub fn rotate(&mut self, theta: impl Into<Angle>) -> &mut Self {
        self.push(&elementary::rotation(theta))
    }

    /// `self ∘ other`: the result applies `other` first.
    pub fn compose(&self, other: &Similarity) -> Similarity {
        self * other
    }
}

impl Transformation for Similarity {
    fn matrix(&self) -> Matrix3 {
        let Self { a, b, c, d } = *self;
        Matrix3::from_rows([[a, -b, c], [b, a, d], [0.0, 0.0, 1.0]])
    }

    fn kind(&self) -> Kind {
        Kind::Similarity
    }

    fn determinant(&self) -> f64 {
        self.a * self.a + self.b * self.b
    }

    fn invert(&self) -> Result<Self> {
        if self.is_degenerate() {
            return Err(TransformError::DegenerateMatrix);
        }
        let inv = self
            .matrix()
            .inverse()
            .ok_or(TransformError::DegenerateMatrix)?;
        Ok(Self::project(&inv.normalized()?))
    }

    fn transform_point(&self, pt: Point) -> Point {
        let [x, y] = pt;
        [
            self.a * x - self.b * y + self.c,
            self.b * x + self.a * y + self.d,
        ]
    }

    fn apply(&self, pts: &[Point]) -> Vec<Point> {
        pts.iter().map(|pt| self.transform_point(*pt)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Similarity;
    use crate::{
        Affine, Matrix3, TransformError, Transformation,
        tests::{
            POINTS_100, SMALL_NUMBER, assert_matrix_eq, check_estimate_roundtrip,
            check_inverse_roundtrip, init_logger,
        },
    };
    use approx::assert_relative_eq;

    fn make_transform() -> Similarity {
        let mut s = Similarity::identity();
        s.translate(2.0, 3.0).rotate(45.0).scale(2.0).unwrap();
        s
    }

    #[test]
    fn test_from_elements() {
        let s = Similarity::from_elements(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(
            s.matrix().to_rows(),
            [[1.0, -2.0, 3.0], [2.0, 1.0, 4.0], [0.0, 0.0, 1.0]]
        );
        assert!(matches!(
            Similarity::from_elements(&[1.0; 6]),
            Err(TransformError::Shape(_))
        ));
    }

    #[test]
    fn test_try_from_matrix() {
        let ok = Matrix3::from_rows([[1.0, -2.0, 3.0], [2.0, 1.0, 4.0], [0.0, 0.0, 1.0]]);
        assert_eq!(
            Similarity::try_from_matrix(ok).unwrap().parameters(),
            [1.0, 2.0, 3.0, 4.0]
        );
        let sheared = Matrix3::from_rows([[1.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(matches!(
            Similarity::try_from_matrix(sheared),
            Err(TransformError::UnsupportedOperand(_))
        ));
    }

    #[test]
    fn test_builders_stay_in_subgroup() {
        let s = make_transform();
        assert!(s.matrix().is_similarity());
        assert_relative_eq!(s.scale_factor(), 2.0, epsilon = SMALL_NUMBER);
        assert_relative_eq!(
            s.rotation_angle().to_radians(),
            45f64.to_radians(),
            epsilon = SMALL_NUMBER
        );
    }

    #[test]
    fn test_matches_affine_builders() {
        let mut a = Affine::identity();
        a.translate(2.0, 3.0).rotate(45.0).scale(2.0, 2.0).unwrap();
        assert_matrix_eq(&make_transform().matrix(), &a.matrix(), SMALL_NUMBER);
    }

    #[test]
    fn test_zero_scale() {
        let mut s = make_transform();
        assert!(matches!(
            s.scale(0.0),
            Err(TransformError::InvalidParameter(_))
        ));
        assert_eq!(s, make_transform());
    }

    #[test]
    fn test_invert() {
        check_inverse_roundtrip(&make_transform());
        assert_eq!(
            Similarity::new(0.0, 0.0, 1.0, 1.0).invert(),
            Err(TransformError::DegenerateMatrix)
        );
    }

    #[test]
    fn test_from_points() {
        init_logger();
        let a = make_transform();
        let p = &POINTS_100[..10];
        let b = Similarity::from_points(p, &a.apply(p)).unwrap();
        assert_matrix_eq(&a.matrix(), &b.matrix(), 1e-8);
        check_estimate_roundtrip(&a.into());
    }

    #[test]
    fn test_from_two_points() {
        let s = Similarity::from_points(&[[0.0, 0.0], [1.0, 0.0]], &[[1.0, 1.0], [1.0, 3.0]]).unwrap();
        // scale 2, quarter turn, then shift by (1, 1)
        let [a, b, c, d] = s.parameters();
        assert_relative_eq!(a, 0.0, epsilon = SMALL_NUMBER);
        assert_relative_eq!(b, 2.0, epsilon = SMALL_NUMBER);
        assert_relative_eq!(c, 1.0, epsilon = SMALL_NUMBER);
        assert_relative_eq!(d, 1.0, epsilon = SMALL_NUMBER);
    }
}
