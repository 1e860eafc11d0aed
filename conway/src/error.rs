use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid grid dimension: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("Cell ({x}, {y}) is outside a {width}x{height} grid")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid resolution format: {0:?}")]
    InvalidFormat(String),

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
