//! Error kinds surfaced by the pipeline.
//!
//! Harvest, classify and provider errors abort an assessment and are shown
//! to the user. Search errors never leave the `search` module.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no model provider configured")]
    NotConfigured,

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("model request failed: {0}")]
    Request(String),

    #[error("model returned empty text")]
    EmptyResponse,

    #[error("model did not answer within {}s", .0.as_secs())]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("description is empty")]
    EmptyDescription,

    #[error("could not parse harvested record: {reason}")]
    Malformed { reason: String, raw: String },

    #[error("harvested record is missing required field `{field}`")]
    MissingField { field: String, raw: String },
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("model returned unrecognized risk tier {tier:?}")]
    UnrecognizedTier { tier: String, raw: String },

    #[error("could not parse classification: {reason}")]
    Malformed { reason: String, raw: String },
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unsupported search provider: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum AssessError {
    #[error(transparent)]
    Harvest(#[from] HarvestError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AssessError {
    /// Whether resubmitting the same input can succeed. Configuration and
    /// empty-input errors need the user to change something first.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            AssessError::Harvest(HarvestError::EmptyDescription)
                | AssessError::Provider(ProviderError::NotConfigured)
                | AssessError::Provider(ProviderError::UnknownProvider(_))
        )
    }

    /// Model output that failed to parse, for manual correction.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            AssessError::Harvest(HarvestError::Malformed { raw, .. })
            | AssessError::Harvest(HarvestError::MissingField { raw, .. })
            | AssessError::Classify(ClassifyError::UnrecognizedTier { raw, .. })
            | AssessError::Classify(ClassifyError::Malformed { raw, .. }) => Some(raw),
            _ => None,
        }
    }
}
