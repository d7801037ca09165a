//! Interop with `ndarray`, where point sets are `N x 2` arrays.

use ndarray::{Array2, ArrayView2};

use crate::{Affine, Homography, Kind, Point, Result, Similarity, Transform, TransformError};

/// Fails with [TransformError::Shape] unless the array has exactly 2 columns.
pub(crate) fn points_from_array(arr: ArrayView2<f64>) -> Result<Vec<Point>> {
    if arr.ncols() != 2 {
        return Err(TransformError::Shape(format!(
            "expected an N x 2 array of points, got shape {:?}",
            arr.shape()
        )));
    }
    Ok(arr.rows().into_iter().map(|row| [row[0], row[1]]).collect())
}

pub(crate) fn points_to_array(pts: &[Point]) -> Array2<f64> {
    Array2::from_shape_fn((pts.len(), 2), |(r, c)| pts[r][c])
}

/// Fails with [TransformError::ShapeMismatch] unless both arrays are `N x 2` with the same `N`.
fn correspondences_from_arrays(
    src: ArrayView2<f64>,
    dst: ArrayView2<f64>,
) -> Result<(Vec<Point>, Vec<Point>)> {
    if src.shape() != dst.shape() {
        return Err(TransformError::ShapeMismatch(format!(
            "source shape {:?} does not match destination shape {:?}",
            src.shape(),
            dst.shape()
        )));
    }
    let as_mismatch = |e: TransformError| TransformError::ShapeMismatch(e.to_string());
    Ok((
        points_from_array(src).map_err(as_mismatch)?,
        points_from_array(dst).map_err(as_mismatch)?,
    ))
}

impl Homography {
    pub fn from_point_arrays(src: ArrayView2<f64>, dst: ArrayView2<f64>) -> Result<Self> {
        let (src, dst) = correspondences_from_arrays(src, dst)?;
        Self::from_points(&src, &dst)
    }
}

impl Affine {
    pub fn from_point_arrays(src: ArrayView2<f64>, dst: ArrayView2<f64>) -> Result<Self> {
        let (src, dst) = correspondences_from_arrays(src, dst)?;
        Self::from_points(&src, &dst)
    }
}

impl Similarity {
    pub fn from_point_arrays(src: ArrayView2<f64>, dst: ArrayView2<f64>) -> Result<Self> {
        let (src, dst) = correspondences_from_arrays(src, dst)?;
        Self::from_points(&src, &dst)
    }
}

impl Transform {
    pub fn from_point_arrays(
        kind: Kind,
        src: ArrayView2<f64>,
        dst: ArrayView2<f64>,
    ) -> Result<Self> {
        let (src, dst) = correspondences_from_arrays(src, dst)?;
        Self::from_points(kind, &src, &dst)
    }
}
