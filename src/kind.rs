use std::fmt;

/// Which subgroup of planar projective transforms a transform is restricted to.
///
/// Ordered by inclusion: `Similarity ⊂ Affine ⊂ General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Uniform scale, rotation and translation; 4 degrees of freedom.
    Similarity,
    /// Bottom row fixed to `[0, 0, 1]`; 6 degrees of freedom.
    Affine,
    /// Full homography; 8 degrees of freedom.
    General,
}

impl Kind {
    /// The most specific kind which contains both operands,
    /// and is therefore closed under their composition (in either order).
    pub fn join(self, other: Kind) -> Kind {
        use Kind::*;
        match (self, other) {
            (Similarity, Similarity) => Similarity,
            (Similarity, Affine) | (Affine, Similarity) | (Affine, Affine) => Affine,
            (General, _) | (_, General) => General,
        }
    }

    /// Whether every transform of kind `other` is also of this kind.
    pub fn contains(self, other: Kind) -> bool {
        self.join(other) == self
    }

    pub fn degrees_of_freedom(self) -> usize {
        match self {
            Kind::Similarity => 4,
            Kind::Affine => 6,
            Kind::General => 8,
        }
    }

    /// Minimum number of point correspondences needed to estimate a transform of this kind.
    pub fn min_points(self) -> usize {
        match self {
            Kind::Similarity => 2,
            Kind::Affine => 3,
            Kind::General => 4,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Similarity => "similarity",
            Kind::Affine => "affine",
            Kind::General => "general",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Kind;

    const ALL: [Kind; 3] = [Kind::Similarity, Kind::Affine, Kind::General];

    #[test]
    fn test_join_is_symmetric() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a.join(b), b.join(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_join_table() {
        assert_eq!(Kind::Similarity.join(Kind::Similarity), Kind::Similarity);
        assert_eq!(Kind::Similarity.join(Kind::Affine), Kind::Affine);
        assert_eq!(Kind::Affine.join(Kind::Affine), Kind::Affine);
        for k in ALL {
            assert_eq!(k.join(Kind::General), Kind::General);
        }
    }

    #[test]
    fn test_contains() {
        assert!(Kind::General.contains(Kind::Similarity));
        assert!(Kind::Affine.contains(Kind::Similarity));
        assert!(!Kind::Similarity.contains(Kind::Affine));
        assert!(!Kind::Affine.contains(Kind::General));
    }

    #[test]
    fn test_min_points_determine_system() {
        for k in ALL {
            // each correspondence contributes two equations
            assert_eq!(2 * k.min_points(), k.degrees_of_freedom());
        }
    }
}
