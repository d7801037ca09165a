use std::ops::{Index, IndexMut, Mul};

use crate::{EPSILON, Point, Result, TransformError};

const NDIM: usize = 3;

/// A 3x3 real matrix acting on 2D points in homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    /// Row-major / C-ordered matrix data.
    data: [f64; NDIM * NDIM],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0 * NDIM + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.data[index.0 * NDIM + index.1]
    }
}

impl Matrix3 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ],
    };

    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [[a, b, c], [d, e, f], [g, h, i]] = rows;
        Self {
            data: [a, b, c, d, e, f, g, h, i],
        }
    }

    /// Row-major / C order data.
    ///
    /// Fails unless the data describes exactly 3 rows of 3 columns.
    pub fn try_new(data: &[f64], ncols: usize) -> Result<Self> {
        if ncols != NDIM || data.len() != NDIM * NDIM {
            return Err(TransformError::Shape(format!(
                "expected 3x3 matrix, got {} values in {} columns",
                data.len(),
                ncols
            )));
        }
        let mut out = [0.0; NDIM * NDIM];
        out.copy_from_slice(data);
        Ok(Self { data: out })
    }

    /// Build from a sequence of rows, e.g. `&[Vec<f64>]` or `&[[f64; 3]]`.
    pub fn try_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != NDIM {
            return Err(TransformError::Shape(format!(
                "expected 3 rows, got {}",
                rows.len()
            )));
        }
        let mut out = [0.0; NDIM * NDIM];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != NDIM {
                return Err(TransformError::Shape(format!(
                    "expected 3 columns in row {r}, got {}",
                    row.len()
                )));
            }
            out[r * NDIM..(r + 1) * NDIM].copy_from_slice(row);
        }
        Ok(Self { data: out })
    }

    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let d = &self.data;
        [[d[0], d[1], d[2]], [d[3], d[4], d[5]], [d[6], d[7], d[8]]]
    }

    /// Row-major view of the data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Divide every entry by the bottom-right (projective scale) entry.
    pub fn normalized(&self) -> Result<Self> {
        let scale = self[(2, 2)];
        if scale == 0.0 {
            return Err(TransformError::DegenerateInput);
        }
        if scale == 1.0 {
            return Ok(*self);
        }
        Ok(Self {
            data: self.data.map(|v| v / scale),
        })
    }

    pub fn matmul(&self, other: &Self) -> Self {
        let mut out = [0.0; NDIM * NDIM];
        for (idx, o) in out.iter_mut().enumerate() {
            let r = idx / NDIM;
            let c = idx % NDIM;
            *o = (0..NDIM).map(|k| self[(r, k)] * other[(k, c)]).sum();
        }
        Self { data: out }
    }

    /// Map a 2D point through the matrix, including the perspective division.
    pub fn transform_point(&self, pt: Point) -> Point {
        let [x, y] = pt;
        let d = &self.data;
        let u = d[0] * x + d[1] * y + d[2];
        let v = d[3] * x + d[4] * y + d[5];
        let w = d[6] * x + d[7] * y + d[8];
        [u / w, v / w]
    }

    /// Laplace expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..NDIM)
            .map(|c| self[(0, c)] * self.cofactor(0, c))
            .sum()
    }

    /// Determinant of the top-left 2x2 (linear) block.
    pub fn minor_determinant(&self) -> f64 {
        self.minor(2, 2)
    }

    /// Inverse via the adjugate; `None` if the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let mut out = [0.0; NDIM * NDIM];
        for r in 0..NDIM {
            for c in 0..NDIM {
                // adjugate is the transposed cofactor matrix
                out[c * NDIM + r] = self.cofactor(r, c) / det;
            }
        }
        Some(Self { data: out })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether the bottom row is `[0, 0, 1]` (within [EPSILON]).
    pub fn is_affine(&self) -> bool {
        self[(2, 0)].abs() <= EPSILON
            && self[(2, 1)].abs() <= EPSILON
            && (self[(2, 2)] - 1.0).abs() <= EPSILON
    }

    /// Whether the matrix is affine with a linear block of the form `[[a, -b], [b, a]]`.
    pub fn is_similarity(&self) -> bool {
        self.is_affine()
            && (self[(0, 0)] - self[(1, 1)]).abs() <= EPSILON
            && (self[(0, 1)] + self[(1, 0)]).abs() <= EPSILON
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col)
    }

    /// Determinant of the 2x2 submatrix left after removing `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f64 {
        let r0 = rectify_idx(0, row);
        let r1 = rectify_idx(1, row);
        let c0 = rectify_idx(0, col);
        let c1 = rectify_idx(1, col);
        self[(r0, c0)] * self[(r1, c1)] - self[(r0, c1)] * self[(r1, c0)]
    }
}

/// Converts a submatrix index into the corresponding full matrix index.
fn rectify_idx(idx: usize, skipped: usize) -> usize {
    if skipped <= idx { idx + 1 } else { idx }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Self) -> Self::Output {
        self.matmul(&rhs)
    }
}

impl Mul<&Matrix3> for &Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Self::Output {
        self.matmul(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_relative_eq, assert_ulps_eq};
    use faer::rand::SeedableRng;
    use faer::rand::{Rng, rngs::SmallRng};

    fn new_rng() -> SmallRng {
        SmallRng::seed_from_u64(1991)
    }

    fn random_matrix(rng: &mut SmallRng) -> Matrix3 {
        let data: Vec<f64> = (0..9).map(|_| rng.random::<f64>() * 10.0 - 5.0).collect();
        Matrix3::try_new(&data, 3).unwrap()
    }

    #[test]
    fn test_determinant() {
        let mut rng = new_rng();
        for idx in 0..100 {
            let my_mat = random_matrix(&mut rng);
            let my_det = my_mat.determinant();

            let faer_mat = faer::Mat::from_fn(3, 3, |row, col| my_mat[(row, col)]);
            let faer_det = faer_mat.determinant();
            println!("iteration={idx}, my_det={my_det}, faer_det={faer_det}");
            assert_relative_eq!(my_det, faer_det, epsilon = 1e-10, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_inverse() {
        let mut rng = new_rng();
        for _ in 0..100 {
            let m = random_matrix(&mut rng);
            let inv = m.inverse().unwrap();
            assert_ulps_eq!(
                (m * inv).as_slice(),
                Matrix3::IDENTITY.as_slice(),
                epsilon = 1e-8
            );
        }
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let m = Matrix3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m.determinant(), 0.0);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_try_new_shape() {
        assert!(matches!(
            Matrix3::try_new(&[1.0; 8], 3),
            Err(TransformError::Shape(_))
        ));
        assert!(matches!(
            Matrix3::try_new(&[1.0; 12], 4),
            Err(TransformError::Shape(_))
        ));
        assert!(matches!(
            Matrix3::try_from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]),
            Err(TransformError::Shape(_))
        ));
        assert!(matches!(
            Matrix3::try_from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0, 1.0]]),
            Err(TransformError::Shape(_))
        ));
    }

    #[test]
    fn test_normalized() {
        let m = Matrix3::from_rows([[2.0, 0.0, 4.0], [0.0, 2.0, 6.0], [0.0, 0.0, 2.0]]);
        let n = m.normalized().unwrap();
        assert_eq!(
            n.to_rows(),
            [[1.0, 0.0, 2.0], [0.0, 1.0, 3.0], [0.0, 0.0, 1.0]]
        );

        let zero_scale = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(
            zero_scale.normalized(),
            Err(TransformError::DegenerateInput)
        );
    }

    #[test]
    fn test_transform_point_perspective() {
        let m = Matrix3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0]]);
        let [x, y] = m.transform_point([2.0, 1.0]);
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, 0.5);
    }

    #[test]
    fn test_matmul_matches_faer() {
        let mut rng = new_rng();
        let a = random_matrix(&mut rng);
        let b = random_matrix(&mut rng);
        let fa = faer::Mat::from_fn(3, 3, |r, c| a[(r, c)]);
        let fb = faer::Mat::from_fn(3, 3, |r, c| b[(r, c)]);
        let fc = &fa * &fb;
        let c = a * b;
        for r in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(c[(r, col)], fc[(r, col)], max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_minor_determinant() {
        let m = Matrix3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [0.0, 0.0, 1.0]]);
        assert_relative_eq!(m.minor_determinant(), -3.0);
        assert_relative_eq!(m.determinant(), -3.0);
    }
}
