//! Fit transforms to point correspondences.
//!
//! Affine and similarity transforms are linear in their parameters and solved by least squares;
//! homographies are solved with the direct linear transform (DLT).
//! No outlier rejection is attempted: every correspondence is trusted.

use faer::Mat;
use log::{debug, warn};

use crate::{EPSILON, Kind, Matrix3, Point, Result, TransformError};

/// Singular values below `RCOND * σ_max` are treated as zero when solving least squares.
pub const RCOND: f64 = 1e-12;

/// Check that `src` and `dst` pair up and that there are enough of them.
fn check_correspondences(src: &[Point], dst: &[Point], kind: Kind) -> Result<()> {
    if src.len() != dst.len() {
        return Err(TransformError::ShapeMismatch(format!(
            "{} source points but {} destination points",
            src.len(),
            dst.len()
        )));
    }
    let required = kind.min_points();
    if src.len() < required {
        return Err(TransformError::InsufficientPoints {
            required,
            actual: src.len(),
        });
    }
    debug!(
        "fitting {kind} transform to {} correspondences",
        src.len()
    );
    Ok(())
}

/// Least-squares affine fit.
///
/// Returns the row-major top two rows `[a, b, c, d, e, f]` of the augmented matrix.
pub fn fit_affine(src: &[Point], dst: &[Point]) -> Result<[f64; 6]> {
    check_correspondences(src, dst, Kind::Affine)?;

    // x' = a x + b y + c
    // y' = d x + e y + f
    let n = src.len();
    let mut mat_a = Mat::<f64>::zeros(2 * n, 6);
    let mut rhs = Vec::with_capacity(2 * n);
    for (i, ([x, y], [xp, yp])) in src.iter().zip(dst.iter()).enumerate() {
        mat_a[(2 * i, 0)] = *x;
        mat_a[(2 * i, 1)] = *y;
        mat_a[(2 * i, 2)] = 1.0;
        mat_a[(2 * i + 1, 3)] = *x;
        mat_a[(2 * i + 1, 4)] = *y;
        mat_a[(2 * i + 1, 5)] = 1.0;
        rhs.push(*xp);
        rhs.push(*yp);
    }

    let params = solve_least_squares(&mat_a, &rhs)?;
    let mut out = [0.0; 6];
    out.copy_from_slice(&params);
    Ok(out)
}

/// Least-squares similarity fit.
///
/// Returns `[a, b, c, d]` for the matrix `[[a, -b, c], [b, a, d], [0, 0, 1]]`.
pub fn fit_similarity(src: &[Point], dst: &[Point]) -> Result<[f64; 4]> {
    check_correspondences(src, dst, Kind::Similarity)?;

    // x' = a x - b y + c
    // y' = b x + a y + d
    let n = src.len();
    let mut mat_a = Mat::<f64>::zeros(2 * n, 4);
    let mut rhs = Vec::with_capacity(2 * n);
    for (i, ([x, y], [xp, yp])) in src.iter().zip(dst.iter()).enumerate() {
        mat_a[(2 * i, 0)] = *x;
        mat_a[(2 * i, 1)] = -*y;
        mat_a[(2 * i, 2)] = 1.0;
        mat_a[(2 * i + 1, 0)] = *y;
        mat_a[(2 * i + 1, 1)] = *x;
        mat_a[(2 * i + 1, 3)] = 1.0;
        rhs.push(*xp);
        rhs.push(*yp);
    }

    let params = solve_least_squares(&mat_a, &rhs)?;
    Ok([params[0], params[1], params[2], params[3]])
}

/// Normalized DLT homography fit.
///
/// Both point sets are conditioned with [normalize_points] before building the system,
/// and the solution is mapped back to the original frames.
/// The returned matrix is normalized so that its bottom-right entry is 1.
pub fn fit_homography(src: &[Point], dst: &[Point]) -> Result<Matrix3> {
    check_correspondences(src, dst, Kind::General)?;

    let (src_n, t_src) = normalize_points(src);
    let (dst_n, t_dst) = normalize_points(dst);

    let (h, rank_deficient) = solve_dlt(&src_n, &dst_n)?;
    if rank_deficient {
        warn!(
            "DLT system has more than one null vector; \
             points may be collinear or coincident, the fit is not unique"
        );
    }
    let h_norm = Matrix3::try_new(&h, 3)?;

    let t_dst_inv = t_dst.inverse().ok_or(TransformError::DegenerateMatrix)?;
    let homography = t_dst_inv * h_norm * t_src;

    let max_abs = homography
        .as_slice()
        .iter()
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    if homography[(2, 2)].abs() <= EPSILON * max_abs {
        warn!(
            "homography bottom-right entry {} is close to zero; the fit is likely degenerate",
            homography[(2, 2)]
        );
    }
    homography.normalized()
}

/// Solve the DLT system for conditioned correspondences.
///
/// Returns the row-major homography entries and whether the system's null space
/// has more than one dimension, i.e. the second-smallest singular value
/// is below `RCOND * σ_max`.
fn solve_dlt(src: &[Point], dst: &[Point]) -> Result<(Vec<f64>, bool)> {
    // Two rows per correspondence from x' × (H x) = 0.
    // With exactly 4 correspondences the system is 8x9;
    // pad with a zero row so the SVD is square and V's last column spans the null space.
    let n = src.len();
    let nrows = (2 * n).max(9);
    let mut mat_a = Mat::<f64>::zeros(nrows, 9);
    for (i, ([x, y], [xp, yp])) in src.iter().zip(dst.iter()).enumerate() {
        mat_a[(2 * i, 0)] = *x;
        mat_a[(2 * i, 1)] = *y;
        mat_a[(2 * i, 2)] = 1.0;
        mat_a[(2 * i, 6)] = -xp * x;
        mat_a[(2 * i, 7)] = -xp * y;
        mat_a[(2 * i, 8)] = -xp;

        mat_a[(2 * i + 1, 3)] = *x;
        mat_a[(2 * i + 1, 4)] = *y;
        mat_a[(2 * i + 1, 5)] = 1.0;
        mat_a[(2 * i + 1, 6)] = -yp * x;
        mat_a[(2 * i + 1, 7)] = -yp * y;
        mat_a[(2 * i + 1, 8)] = -yp;
    }

    let svd = mat_a.svd().map_err(|_| TransformError::NoConvergence)?;
    let s = svd.S().column_vector();
    let rank_deficient = s[7] <= RCOND * s[0];

    // right-singular vector of the smallest singular value
    let v = svd.V();
    let h = (0..9).map(|r| v[(r, 8)]).collect();
    Ok((h, rank_deficient))
}

/// Hartley normalization: translate the centroid to the origin
/// and scale so the mean distance from it is √2.
///
/// Returns the conditioned points and the similarity matrix which produced them.
pub fn normalize_points(pts: &[Point]) -> (Vec<Point>, Matrix3) {
    if pts.is_empty() {
        return (Vec::new(), Matrix3::IDENTITY);
    }
    let n = pts.len() as f64;
    let (mut mx, mut my) = (0.0f64, 0.0f64);
    for [x, y] in pts {
        mx += x;
        my += y;
    }
    mx /= n;
    my /= n;

    let mean_dist = pts
        .iter()
        .map(|[x, y]| (x - mx).hypot(y - my))
        .sum::<f64>()
        / n;
    let scale = if mean_dist > 0.0 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };

    let normalized = pts
        .iter()
        .map(|[x, y]| [(x - mx) * scale, (y - my) * scale])
        .collect();
    let t = Matrix3::from_rows([
        [scale, 0.0, -scale * mx],
        [0.0, scale, -scale * my],
        [0.0, 0.0, 1.0],
    ]);
    (normalized, t)
}

/// Minimum-norm least-squares solution of `A x = b` via the SVD pseudo-inverse.
fn solve_least_squares(mat_a: &Mat<f64>, rhs: &[f64]) -> Result<Vec<f64>> {
    let nrows = mat_a.nrows();
    let ncols = mat_a.ncols();
    let svd = mat_a.svd().map_err(|_| TransformError::NoConvergence)?;
    let u = svd.U();
    let v = svd.V();
    let s = svd.S().column_vector();

    let n_singular = nrows.min(ncols);
    let cutoff = RCOND * s[0];
    let mut x = vec![0.0; ncols];
    let mut rank = 0;
    for i in 0..n_singular {
        let sigma = s[i];
        if sigma <= cutoff {
            continue;
        }
        rank += 1;
        let coeff = (0..nrows).map(|r| u[(r, i)] * rhs[r]).sum::<f64>() / sigma;
        for (j, xj) in x.iter_mut().enumerate() {
            *xj += coeff * v[(j, i)];
        }
    }
    if rank < ncols {
        warn!(
            "least-squares system is rank deficient (rank {rank} of {ncols}); \
             points may be collinear or coincident, returning the minimum-norm solution"
        );
    }
    Ok(x)
}
