use crate::{Kind, Matrix3, Point, Result, TransformError};

/// Core planar transformation interface, shared by every transform variant.
///
/// Every implementor holds a matrix normalized so that its bottom-right entry is 1.
pub trait Transformation: std::fmt::Debug + Send + Sync {
    /// Read-only snapshot of the underlying 3x3 matrix.
    fn matrix(&self) -> Matrix3;

    fn kind(&self) -> Kind;

    /// Return the inverse transformation, of the same variant.
    ///
    /// Fails with [TransformError::DegenerateMatrix] if [Transformation::is_degenerate].
    /// A homography whose linear (top-left 2x2) block is singular has an inverse
    /// with a zero bottom-right entry, which cannot be normalized;
    /// that fails with [TransformError::DegenerateInput].
    fn invert(&self) -> Result<Self>
    where
        Self: Sized;

    /// Transform a single point, including the perspective division.
    fn transform_point(&self, pt: Point) -> Point {
        self.matrix().transform_point(pt)
    }

    /// Transform an ordered sequence of points.
    fn apply(&self, pts: &[Point]) -> Vec<Point> {
        let m = self.matrix();
        pts.iter().map(|pt| m.transform_point(*pt)).collect()
    }

    /// Transform points given in columnar format, i.e. `[xs, ys]`.
    ///
    /// Fails with [TransformError::Shape] unless there are exactly two columns of equal length.
    fn apply_columns(&self, columns: &[&[f64]]) -> Result<[Vec<f64>; 2]> {
        let [xs, ys] = columns else {
            return Err(TransformError::Shape(format!(
                "expected 2 coordinate columns, got {}",
                columns.len()
            )));
        };
        if xs.len() != ys.len() {
            return Err(TransformError::Shape(format!(
                "coordinate columns have different lengths: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        let m = self.matrix();
        let mut out_x = Vec::with_capacity(xs.len());
        let mut out_y = Vec::with_capacity(ys.len());
        for (x, y) in xs.iter().zip(ys.iter()) {
            let [u, v] = m.transform_point([*x, *y]);
            out_x.push(u);
            out_y.push(v);
        }
        Ok([out_x, out_y])
    }

    /// Transform an `N x 2` array of points.
    ///
    /// Fails with [TransformError::Shape] if the array does not have 2 columns.
    #[cfg(feature = "ndarray")]
    fn apply_array(&self, pts: ndarray::ArrayView2<f64>) -> Result<ndarray::Array2<f64>> {
        let pts = crate::ndarr::points_from_array(pts)?;
        Ok(crate::ndarr::points_to_array(&self.apply(&pts)))
    }

    fn determinant(&self) -> f64 {
        self.matrix().determinant()
    }

    /// Whether the determinant is exactly zero, i.e. the transform has no inverse.
    fn is_degenerate(&self) -> bool {
        self.determinant() == 0.0
    }

    /// `true` means it definitely is an identity; rounding error may cause false negatives.
    fn is_identity(&self) -> bool {
        self.matrix().is_identity()
    }
}
