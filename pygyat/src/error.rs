use std::path::PathBuf;

/// Error types for the transpiler
#[derive(Debug)]
pub enum GyatError {
    /// A source file could not be read or an output file could not be written
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid mapping table, malformed configuration file or bad driver arguments
    Config(String),
}

impl GyatError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GyatError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for GyatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GyatError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            GyatError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GyatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GyatError::Io { source, .. } => Some(source),
            GyatError::Config(_) => None,
        }
    }
}

/// Result type for transpiler operations
pub type GyatResult<T> = Result<T, GyatError>;
