pub mod engine;
pub mod error;
mod parse;
mod prompt;
pub mod search;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use aiact_core::{ClassificationResult, HarvestedRecord, Report, Settings, SystemDescription};
use serde_json::Value;

use engine::{LlmProvider, Provider};
use error::{AssessError, ClassifyError, HarvestError, ProviderError};
use search::{Augmentation, Searcher};

pub use error::SearchError;

/// Check a hand-corrected record with the same rules applied to harvested
/// model output, so both paths into the classifier accept the same shapes.
pub fn validate_record(value: Value) -> Result<HarvestedRecord, HarvestError> {
    let raw = value.to_string();
    parse::record_from_value(value, &raw)
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Harvest → (optional) search → classify, one model call per stage.
pub struct Assessor {
    provider: Arc<dyn Provider>,
    searcher: Option<Arc<dyn Searcher>>,
    timeout: Duration,
    search_limit: usize,
}

impl Assessor {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            searcher: None,
            timeout: DEFAULT_TIMEOUT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_searcher(mut self, searcher: Arc<dyn Searcher>) -> Self {
        self.searcher = Some(searcher);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// Live assessor for the configured model and search providers. A broken
    /// search configuration only disables search.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let provider = LlmProvider::new(settings.ai.clone())?;
        let mut assessor = Assessor::new(Arc::new(provider))
            .with_timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .with_search_limit(settings.search.max_results);
        match search::from_settings(&settings.search) {
            Ok(Some(searcher)) => assessor.searcher = Some(searcher),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "search disabled"),
        }
        Ok(assessor)
    }

    #[cfg(test)]
    fn search_available(&self) -> bool {
        self.searcher.is_some()
    }

    async fn call(&self, system: &str, user_msg: &str) -> Result<String, ProviderError> {
        match tokio::time::timeout(self.timeout, self.provider.generate(system, user_msg)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        }
    }

    /// Stage 1: extract the structured profile from free text.
    pub async fn harvest(&self, desc: &SystemDescription) -> Result<HarvestedRecord, AssessError> {
        if desc.validate().is_err() {
            return Err(HarvestError::EmptyDescription.into());
        }
        let raw = self
            .call(&prompt::harvest_system_prompt(), &prompt::harvest_user_message(desc))
            .await?;
        debug!(raw = %raw, "harvest output");
        let record = parse::parse_harvest(&raw)?;
        info!(
            sector = %record.sector,
            autonomy = record.autonomy.as_str(),
            contexts = record.high_risk_contexts.len(),
            "harvested record"
        );
        Ok(record)
    }

    /// Optional stage: never fails, returns `Augmentation::none()` when
    /// search is off, unavailable or fruitless.
    pub async fn augment(
        &self,
        desc: &SystemDescription,
        record: &HarvestedRecord,
    ) -> Augmentation {
        let Some(searcher) = self.searcher.as_deref().filter(|_| desc.enable_search) else {
            return Augmentation::none();
        };
        let queries = search::queries(desc, record);
        let aug = search::augment(searcher, &queries, self.search_limit).await;
        if aug.is_empty() {
            info!("search found nothing, classifying without web context");
        } else {
            info!(sources = aug.sources.len(), "search augmentation");
        }
        aug
    }

    /// Stage 2: apply the decision tree to the profile.
    pub async fn classify(
        &self,
        record: &HarvestedRecord,
        augmentation: &Augmentation,
    ) -> Result<ClassificationResult, AssessError> {
        let raw = self
            .call(
                &prompt::classify_system_prompt(),
                &prompt::classify_user_message(record, augmentation),
            )
            .await?;
        debug!(raw = %raw, "classify output");
        let result = parse::parse_classification(&raw).inspect_err(|e| {
            if let ClassifyError::UnrecognizedTier { tier, .. } = e {
                warn!(tier = %tier, "model answered outside the tier set");
            }
        })?;
        info!(tier = %result.tier, confidence = result.confidence.label(), "classified");
        Ok(result)
    }

    /// Run the whole pipeline for one description.
    #[tracing::instrument(skip_all, fields(system = %desc.display_name()))]
    pub async fn assess(&self, desc: &SystemDescription) -> Result<Report, AssessError> {
        let profile = self.harvest(desc).await?;
        let augmentation = self.augment(desc, &profile).await;
        let classification = self.classify(&profile, &augmentation).await?;
        Ok(Report {
            generated_at: Utc::now(),
            system: desc.clone(),
            profile,
            classification,
            sources: augmentation.sources,
        })
    }
}
