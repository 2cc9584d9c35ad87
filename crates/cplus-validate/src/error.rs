use cplus_model::{LayerError, RuleType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to read layer metadata for '{dataset}'")]
    Layer {
        dataset: String,
        #[source]
        source: LayerError,
    },
    #[error("no rule validator registered for rule type '{0}'")]
    UnregisteredRule(RuleType),
    #[error("{0}")]
    Message(String),
}

impl ValidateError {
    pub fn layer(dataset: impl Into<String>, source: LayerError) -> Self {
        Self::Layer {
            dataset: dataset.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidateError>;
