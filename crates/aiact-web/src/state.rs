use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use aiact_classify::engine::Provider;
use aiact_classify::error::ProviderError;
use aiact_classify::search::Searcher;
use aiact_classify::Assessor;
use aiact_core::settings::write_settings;
use aiact_core::{CoreError, Settings};

/// How an [`Assessor`] is obtained for each request.
#[derive(Clone)]
enum Connector {
    /// Built from the current settings on every request.
    Live,
    /// Injected collaborators, settings only supply timeouts and limits.
    Fixed {
        provider: Arc<dyn Provider>,
        searcher: Option<Arc<dyn Searcher>>,
    },
}

/// Shared application state. Settings are the only mutable part.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Mutex<Settings>>,
    settings_path: Option<PathBuf>,
    connector: Connector,
}

impl AppState {
    /// Live state persisting settings changes to `settings_path`.
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            settings_path: Some(settings_path),
            connector: Connector::Live,
        }
    }

    /// State with a fixed model (and optional search) provider. Settings
    /// changes stay in memory when `settings_path` is `None`.
    pub fn with_provider(
        settings: Settings,
        settings_path: Option<PathBuf>,
        provider: Arc<dyn Provider>,
        searcher: Option<Arc<dyn Searcher>>,
    ) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            settings_path,
            connector: Connector::Fixed { provider, searcher },
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `update`, then write the result to disk when a path is set.
    /// The in-memory value only changes if the write succeeds. Keys that
    /// came from the environment stay in memory only.
    pub fn update_settings<F>(&self, update: F) -> Result<Settings, CoreError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        update(&mut next);
        if let Some(path) = &self.settings_path {
            write_settings(path, &next)?;
        }
        *guard = next.clone();
        Ok(next)
    }

    pub fn assessor(&self) -> Result<Assessor, ProviderError> {
        let settings = self.settings();
        match &self.connector {
            Connector::Live => Assessor::from_settings(&settings),
            Connector::Fixed { provider, searcher } => {
                let mut assessor = Assessor::new(provider.clone())
                    .with_timeout(Duration::from_secs(settings.timeout_secs.max(1)))
                    .with_search_limit(settings.search.max_results);
                if let Some(searcher) = searcher {
                    assessor = assessor.with_searcher(searcher.clone());
                }
                Ok(assessor)
            }
        }
    }
}
