/// Crate-wide error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Indices outside the bounds of the series they address.
    RangeError { start: usize, end: usize, len: usize },
    /// Zoom factor outside the configured extent; the gesture layer must clamp.
    InvalidZoom(f64),
    ConfigError(String),
    RenderingError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::RangeError { start, end, len } => {
                write!(f, "Range Error: [{}, {}] outside series of length {}", start, end, len)
            }
            AppError::InvalidZoom(factor) => write!(f, "Invalid Zoom: {}", factor),
            AppError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

// Simple convenience type aliases
pub type ChartResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
