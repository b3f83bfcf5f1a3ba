use thiserror::Error;

/// Errors rejected at the BVH construction boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Cannot build a BVH over an empty triangle set")]
    EmptyScene,

    #[error("Too many triangles: {count} (at most {max} are addressable)")]
    TooManyTriangles { count: usize, max: usize },
}

/// Errors while reading a `.tri` scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read scene: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed scene at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
