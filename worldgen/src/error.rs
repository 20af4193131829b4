use thiserror::Error;

/// Rejected generation parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamsError {
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("parameter '{name}' must be positive, got {got}")]
    NotPositive { name: &'static str, got: f64 },
    #[error("parameter '{name}' must not be negative, got {got}")]
    Negative { name: &'static str, got: f64 },
    #[error("parameter '{name}' must be at least {min}, got {got}")]
    TooSmall { name: &'static str, got: f64, min: f64 },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// A guide that survived the length filter still fits no building slot.
    #[error("guide of length {length} fits no building slot")]
    EmptyBuildingSlot { length: f64 },
    #[error("guide of length {length} needs {count} building slots, limit is {max}")]
    TooManyBuildingSlots { length: f64, count: f64, max: usize },
}

/// Failure while loading a persisted graph or world.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field '{field}' is out of bounds")]
    OutOfBounds { field: &'static str },
    #[error("{what} count {got} exceeds limit {max}")]
    TooMany { what: &'static str, got: usize, max: usize },
    #[error("segment {index} references a point that is not in the graph")]
    DanglingEndpoint { index: usize },
    #[error("segment {index} has equal endpoints")]
    DegenerateSegment { index: usize },
    #[error(transparent)]
    Params(#[from] ParamsError),
}
