use thiserror::Error;

/// Errors raised while reading layer metadata.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("band {band} out of range (layer has {band_count} bands)")]
    BandOutOfRange { band: usize, band_count: usize },
    #[error("data provider unavailable for layer '{0}'")]
    ProviderUnavailable(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, LayerError>;
