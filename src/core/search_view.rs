use crate::core::render::render_table_results;
use crate::domain::model::ResultSet;
use crate::domain::ports::FlightSearch;
use crate::utils::error::ErrorSeverity;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const TITLE: &str = "Flight Search";
pub const TIMEZONE_NOTE: &str = "All flight times are in UTC timezone";
pub const PLACEHOLDER: &str = "Search by Airport Code (SGN, HAN, ...)";
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch flight data";
pub const NO_RESULTS_MESSAGE: &str = "No results found";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub results: ResultSet,
    pub loading: bool,
    pub error: Option<String>,
}

/// What the view shows under the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Error(String),
    Results(ResultSet),
    NoResults,
    Pending,
}

impl SearchOutcome {
    /// Failed fetches are network or server problems; every other outcome is a success.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            SearchOutcome::Error(_) => Some(ErrorSeverity::Medium),
            _ => None,
        }
    }
}

/// Search form state driven by submissions.
///
/// Overlapping submissions are not serialized: each runs to completion and the last one to
/// resolve decides the displayed results. Previous results stay visible while a new search
/// is in flight.
pub struct SearchView<F: FlightSearch> {
    source: F,
    state: Mutex<SearchState>,
}

impl<F: FlightSearch> SearchView<F> {
    pub fn new(source: F) -> Self {
        Self {
            source,
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn set_term(&self, term: impl Into<String>) {
        self.lock().term = term.into();
    }

    pub fn state(&self) -> SearchState {
        self.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Sets `term` and submits it.
    pub async fn search(&self, term: impl Into<String>) {
        self.set_term(term);
        self.submit().await;
    }

    /// Runs a search for the current term. Errors are captured in the state, never returned.
    pub async fn submit(&self) {
        let term = {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
            state.term.clone()
        };
        let _loading = LoadingGuard { state: &self.state };

        match self.source.flights_by_country(&term).await {
            Ok(results) => {
                tracing::info!("🔎 '{}': {} countries", term, results.len());
                self.lock().results = results;
            }
            Err(e) => {
                tracing::error!("🔎 '{}': {}", term, e);
                self.lock().error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn outcome(&self) -> SearchOutcome {
        let state = self.lock();
        if let Some(error) = &state.error {
            SearchOutcome::Error(error.clone())
        } else if !state.results.is_empty() {
            SearchOutcome::Results(state.results.clone())
        } else if !state.loading {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Pending
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            "Searching..."
        } else {
            "Search"
        }
    }

    pub fn render(&self) -> String {
        let term = self.lock().term.clone();
        let input = if term.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            term
        };

        let mut lines = vec![
            TITLE.to_string(),
            TIMEZONE_NOTE.to_string(),
            format!("[ {} ] [{}]", input, self.button_label()),
        ];

        match self.outcome() {
            SearchOutcome::Error(message) => lines.push(format!("Error: {}", message)),
            SearchOutcome::Results(results) => lines.push(render_table_results(&results)),
            SearchOutcome::NoResults => lines.push(NO_RESULTS_MESSAGE.to_string()),
            SearchOutcome::Pending => {}
        }

        lines.join("\n")
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `loading` when the submission ends, including when its future is dropped.
struct LoadingGuard<'a> {
    state: &'a Mutex<SearchState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}
