/// Errors raised by transform construction, application, composition and estimation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Matrix or point data of the wrong dimensionality.
    #[error("shape error: {0}")]
    Shape(String),

    /// The bottom-right (projective scale) entry was 0, so the matrix cannot be normalized.
    #[error("degenerate input: bottom-right matrix entry is zero")]
    DegenerateInput,

    /// Inversion of a matrix with zero determinant.
    #[error("non-invertible matrix: determinant is zero")]
    DegenerateMatrix,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The operand cannot be represented by the requested transform variant.
    #[error("unsupported operand: {0}")]
    UnsupportedOperand(String),

    #[error("singular value decomposition did not converge")]
    NoConvergence,
}

pub type Result<T> = std::result::Result<T, TransformError>;
