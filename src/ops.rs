//! `*` composes transforms: `(a * b).apply(p) == a.apply(&b.apply(p))`.
//!
//! Output types follow [crate::Kind::join].
//! Products within the affine subgroup are infallible;
//! products involving a homography may fail to normalize, so they return a [Result].

use std::ops::Mul;

use crate::{Affine, Homography, Result, Similarity, Transform, Transformation};

macro_rules! impl_closed_mul {
    ($lhs:ty, $rhs:ty => $out:ty) => {
        impl Mul<&$rhs> for &$lhs {
            type Output = $out;

            fn mul(self, rhs: &$rhs) -> Self::Output {
                <$out>::project(&(self.matrix() * rhs.matrix()))
            }
        }

        impl Mul<$rhs> for $lhs {
            type Output = $out;

            fn mul(self, rhs: $rhs) -> Self::Output {
                &self * &rhs
            }
        }
    };
}

impl_closed_mul!(Similarity, Similarity => Similarity);
impl_closed_mul!(Similarity, Affine => Affine);
impl_closed_mul!(Affine, Similarity => Affine);
impl_closed_mul!(Affine, Affine => Affine);

macro_rules! impl_projective_mul {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<&$rhs> for &$lhs {
            type Output = Result<Homography>;

            fn mul(self, rhs: &$rhs) -> Self::Output {
                Homography::try_from_matrix(self.matrix() * rhs.matrix())
            }
        }

        impl Mul<$rhs> for $lhs {
            type Output = Result<Homography>;

            fn mul(self, rhs: $rhs) -> Self::Output {
                &self * &rhs
            }
        }
    };
}

impl_projective_mul!(Homography, Homography);
impl_projective_mul!(Homography, Affine);
impl_projective_mul!(Homography, Similarity);
impl_projective_mul!(Affine, Homography);
impl_projective_mul!(Similarity, Homography);

impl Mul<&Transform> for &Transform {
    type Output = Result<Transform>;

    fn mul(self, rhs: &Transform) -> Self::Output {
        self.compose(rhs)
    }
}

impl Mul for Transform {
    type Output = Result<Transform>;

    fn mul(self, rhs: Transform) -> Self::Output {
        self.compose(&rhs)
    }
}
