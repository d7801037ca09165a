use crate::{
    Affine, Angle, Homography, Kind, Matrix3, Point, Result, Similarity, TransformError,
    Transformation, elementary,
};

/// Any planar transform, tagged with its variant.
///
/// Composition picks the result variant with [Kind::join].
/// Builders which would leave a variant's subgroup fail instead of silently promoting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    General(Homography),
    Affine(Affine),
    Similarity(Similarity),
}

impl Transform {
    pub fn identity(kind: Kind) -> Self {
        match kind {
            Kind::General => Homography::identity().into(),
            Kind::Affine => Affine::identity().into(),
            Kind::Similarity => Similarity::identity().into(),
        }
    }

    /// See the variants' `from_elements` for the accepted lengths.
    pub fn from_elements(kind: Kind, elements: &[f64]) -> Result<Self> {
        Ok(match kind {
            Kind::General => Homography::from_elements(elements)?.into(),
            Kind::Affine => Affine::from_elements(elements)?.into(),
            Kind::Similarity => Similarity::from_elements(elements)?.into(),
        })
    }

    pub fn try_from_matrix(kind: Kind, matrix: Matrix3) -> Result<Self> {
        Ok(match kind {
            Kind::General => Homography::try_from_matrix(matrix)?.into(),
            Kind::Affine => Affine::try_from_matrix(matrix)?.into(),
            Kind::Similarity => Similarity::try_from_matrix(matrix)?.into(),
        })
    }

    /// Estimate a transform of the given kind mapping `src` onto `dst`.
    pub fn from_points(kind: Kind, src: &[Point], dst: &[Point]) -> Result<Self> {
        Ok(match kind {
            Kind::General => Homography::from_points(src, dst)?.into(),
            Kind::Affine => Affine::from_points(src, dst)?.into(),
            Kind::Similarity => Similarity::from_points(src, dst)?.into(),
        })
    }

    /// Wrap the product of two matrices in the given kind.
    ///
    /// Products within the affine subgroup always have a bottom row of `[0, 0, 1]`.
    fn from_product(kind: Kind, product: Matrix3) -> Result<Self> {
        Ok(match kind {
            Kind::General => Homography::try_from_matrix(product)?.into(),
            Kind::Affine => Affine::project(&product).into(),
            Kind::Similarity => Similarity::project(&product).into(),
        })
    }

    /// `self ∘ other`: the result applies `other` first.
    ///
    /// Fails with [TransformError::DegenerateInput] only if a projective product
    /// cannot be normalized.
    pub fn compose(&self, other: &Transform) -> Result<Transform> {
        let kind = self.kind().join(other.kind());
        Self::from_product(kind, self.matrix() * other.matrix())
    }

    pub fn reset(&mut self) {
        *self = Self::identity(self.kind());
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        match self {
            Transform::General(t) => {
                t.translate(tx, ty);
            }
            Transform::Affine(t) => {
                t.translate(tx, ty);
            }
            Transform::Similarity(t) => {
                t.translate(tx, ty);
            }
        }
        self
    }

    pub fn rotate(&mut self, theta: impl Into<Angle>) -> &mut Self {
        let theta = theta.into();
        match self {
            Transform::General(t) => {
                t.rotate(theta);
            }
            Transform::Affine(t) => {
                t.rotate(theta);
            }
            Transform::Similarity(t) => {
                t.rotate(theta);
            }
        }
        self
    }

    /// Fails with [TransformError::InvalidParameter] for a zero factor,
    /// or [TransformError::UnsupportedOperation] for non-uniform scaling of a similarity.
    pub fn scale(&mut self, sx: f64, sy: f64) -> Result<&mut Self> {
        match self {
            Transform::General(t) => {
                t.scale(sx, sy)?;
            }
            Transform::Affine(t) => {
                t.scale(sx, sy)?;
            }
            Transform::Similarity(t) => {
                elementary::scaling(sx, sy)?;
                if sx != sy {
                    return Err(TransformError::UnsupportedOperation(
                        "similarity transforms only scale uniformly; use the affine variant"
                            .into(),
                    ));
                }
                t.scale(sx)?;
            }
        }
        Ok(self)
    }

    /// Fails with [TransformError::UnsupportedOperation] for a similarity.
    pub fn shear(
        &mut self,
        theta_x: impl Into<Angle>,
        theta_y: impl Into<Angle>,
    ) -> Result<&mut Self> {
        match self {
            Transform::General(t) => {
                t.shear(theta_x, theta_y);
            }
            Transform::Affine(t) => {
                t.shear(theta_x, theta_y);
            }
            Transform::Similarity(_) => {
                return Err(TransformError::UnsupportedOperation(
                    "similarity transforms cannot shear; use the affine variant".into(),
                ));
            }
        }
        Ok(self)
    }
}

impl Transformation for Transform {
    fn matrix(&self) -> Matrix3 {
        match self {
            Transform::General(t) => t.matrix(),
            Transform::Affine(t) => t.matrix(),
            Transform::Similarity(t) => t.matrix(),
        }
    }

    fn kind(&self) -> Kind {
        match self {
            Transform::General(_) => Kind::General,
            Transform::Affine(_) => Kind::Affine,
            Transform::Similarity(_) => Kind::Similarity,
        }
    }

    fn invert(&self) -> Result<Self> {
        Ok(match self {
            Transform::General(t) => t.invert()?.into(),
            Transform::Affine(t) => t.invert()?.into(),
            Transform::Similarity(t) => t.invert()?.into(),
        })
    }

    fn transform_point(&self, pt: Point) -> Point {
        match self {
            Transform::General(t) => t.transform_point(pt),
            Transform::Affine(t) => t.transform_point(pt),
            Transform::Similarity(t) => t.transform_point(pt),
        }
    }

    fn apply(&self, pts: &[Point]) -> Vec<Point> {
        match self {
            Transform::General(t) => t.apply(pts),
            Transform::Affine(t) => t.apply(pts),
            Transform::Similarity(t) => t.apply(pts),
        }
    }

    fn determinant(&self) -> f64 {
        match self {
            Transform::General(t) => t.determinant(),
            Transform::Affine(t) => t.determinant(),
            Transform::Similarity(t) => t.determinant(),
        }
    }
}

impl From<Homography> for Transform {
    fn from(value: Homography) -> Self {
        Self::General(value)
    }
}

impl From<Affine> for Transform {
    fn from(value: Affine) -> Self {
        Self::Affine(value)
    }
}

impl From<Similarity> for Transform {
    fn from(value: Similarity) -> Self {
        Self::Similarity(value)
    }
}

/// Every transform widens to a homography.
impl From<Transform> for Homography {
    fn from(value: Transform) -> Self {
        match value {
            Transform::General(t) => t,
            // already normalized, so the bottom-right entry is 1
            other => Homography::from_normalized(other.matrix()),
        }
    }
}

/// Fails with [TransformError::UnsupportedOperand] for a general transform,
/// even if its matrix happens to be affine.
impl TryFrom<Transform> for Affine {
    type Error = TransformError;

    fn try_from(value: Transform) -> Result<Self> {
        match value {
            Transform::Affine(t) => Ok(t),
            Transform::Similarity(t) => Ok(t.into()),
            Transform::General(_) => Err(TransformError::UnsupportedOperand(
                "cannot narrow a general transform to affine".into(),
            )),
        }
    }
}

/// Fails with [TransformError::UnsupportedOperand] unless the variant is a similarity.
impl TryFrom<Transform> for Similarity {
    type Error = TransformError;

    fn try_from(value: Transform) -> Result<Self> {
        match value {
            Transform::Similarity(t) => Ok(t),
            other => Err(TransformError::UnsupportedOperand(format!(
                "cannot narrow a {} transform to similarity",
                other.kind()
            ))),
        }
    }
}
