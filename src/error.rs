/// Errors produced while configuring or rendering a styled QR code.
///
/// Configuration problems are always reported before anything is drawn, so a
/// failed render never yields partial output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An option is missing, out of range or malformed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The payload could not be turned into a QR symbol.
    #[error("failed to encode QR symbol: {0}")]
    Encode(String),

    /// Module data does not describe a valid square QR matrix.
    #[error("invalid module matrix: {0}")]
    InvalidMatrix(String),

    /// The configured logo could not be read or decoded.
    #[error("failed to load logo '{location}': {reason}")]
    LogoLoad { location: String, reason: String },

    /// The drawing surface could not be created.
    #[error("drawing surface unavailable: {0}")]
    Surface(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
