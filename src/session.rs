//! Search interaction flow.
//!
//! A `SearchSession` is one page view: it owns the form (query text and
//! category filter) and publishes a [`SearchState`] over a `watch` channel.
//! Every submission takes a ticket; only the latest ticket may write its result,
//! so a slow stale response can never overwrite a newer one. `teardown` cancels
//! in-flight submissions and freezes the state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::api::{AppResult, SearchBackend, SearchRequest, SearchResponse};
use crate::category::CategoryFilter;
use crate::error::{FailureKind, RequestError};

/// Suggestions shown while there is nothing else to display.
pub const EXAMPLE_QUERIES: [&str; 5] = [
    "Fitness için kalori takip uygulaması",
    "Offline çalışan GPS navigasyon",
    "Bütçe yönetimi ve tasarruf uygulaması",
    "İngilizce öğrenme için oyun",
    "Sosyal medya fotoğraf düzenleme",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub query: String,
    pub category: CategoryFilter,
}

impl SearchForm {
    pub fn is_submittable(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// Results of the last successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    /// Query echoed by the server.
    pub query: String,
    pub results: Vec<AppResult>,
    /// Markdown, empty when the server sent none.
    pub analysis: String,
    pub total_found: u64,
    pub processing_time: f64,
    pub language_detected: String,
    pub received_at: DateTime<Utc>,
}

impl SearchSnapshot {
    pub fn from_response(response: SearchResponse) -> Self {
        Self {
            query: response.query,
            results: response.results.unwrap_or_default(),
            analysis: response.llm_analysis.unwrap_or_default(),
            total_found: response.total_found,
            processing_time: response.processing_time,
            language_detected: response.language_detected,
            received_at: Utc::now(),
        }
    }

    /// Equality ignoring `received_at`.
    pub fn same_content(&self, other: &SearchSnapshot) -> bool {
        self.query == other.query
            && self.results == other.results
            && self.analysis == other.analysis
            && self.total_found == other.total_found
            && self.processing_time == other.processing_time
            && self.language_detected == other.language_detected
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
}

impl From<&RequestError> for SearchFailure {
    fn from(e: &RequestError) -> Self {
        Self {
            kind: e.kind(),
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Populated(SearchSnapshot),
    Failed(SearchFailure),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn results(&self) -> &[AppResult] {
        match self {
            SearchState::Populated(snapshot) => &snapshot.results,
            _ => &[],
        }
    }

    pub fn analysis(&self) -> &str {
        match self {
            SearchState::Populated(snapshot) => &snapshot.analysis,
            _ => "",
        }
    }
}

/// How a call to [`SearchSession::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank query, nothing was sent.
    Rejected,
    Populated,
    Failed,
    /// A newer submission was issued before this one settled.
    Superseded,
    /// The session was torn down.
    Cancelled,
}

pub struct SearchSession<B> {
    backend: B,
    form: Mutex<SearchForm>,
    max_results: Option<u32>,
    issued: AtomicU64,
    state: watch::Sender<SearchState>,
    teardown: CancellationToken,
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            backend,
            form: Mutex::new(SearchForm::default()),
            max_results: None,
            issued: AtomicU64::new(0),
            state,
            teardown: CancellationToken::new(),
        }
    }

    pub fn with_max_results(mut self, max_results: Option<u32>) -> Self {
        self.max_results = max_results;
        self
    }

    fn lock_form(&self) -> MutexGuard<'_, SearchForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn form(&self) -> SearchForm {
        self.lock_form().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.lock_form().query = query.into();
    }

    pub fn set_category(&self, category: CategoryFilter) {
        self.lock_form().category = category;
    }

    /// Copies a suggested query into the form. Does not search.
    pub fn choose_example(&self, example: &str) {
        self.set_query(example);
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_torn_down() && !self.state.borrow().is_loading() && self.lock_form().is_submittable()
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Sends the current form as one search request and applies the result.
    ///
    /// Request failures never escape: they are logged and turned into
    /// [`SearchState::Failed`].
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let form = self.lock_form();
            if !form.is_submittable() {
                debug!("blank query, not searching");
                return SubmitOutcome::Rejected;
            }
            SearchRequest::new(form.query.clone(), form.category).with_max_results(self.max_results)
        };

        // Checked under the state lock so a concurrent teardown either sees
        // this Loading and resets it, or is seen here.
        let mut ticket = 0;
        let started = self.state.send_if_modified(|state| {
            if self.teardown.is_cancelled() {
                return false;
            }
            ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Loading;
            true
        });
        if !started {
            return SubmitOutcome::Cancelled;
        }
        info!(
            ticket,
            query = %request.query,
            category = request.category.param_value(),
            "search started"
        );

        let result = tokio::select! {
            biased;
            _ = self.teardown.cancelled() => {
                debug!(ticket, "session torn down while searching");
                return SubmitOutcome::Cancelled;
            }
            result = self.backend.search(&request) => result,
        };

        let (next, outcome) = match result {
            Ok(response) => {
                let snapshot = SearchSnapshot::from_response(response);
                info!(
                    ticket,
                    results = snapshot.results.len(),
                    total_found = snapshot.total_found,
                    language = %snapshot.language_detected,
                    "search completed"
                );
                (SearchState::Populated(snapshot), SubmitOutcome::Populated)
            }
            Err(e) => {
                error!(ticket, status = ?e.status(), error = %e, "search failed");
                (SearchState::Failed(SearchFailure::from(&e)), SubmitOutcome::Failed)
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.teardown.is_cancelled() || self.issued.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = next;
            true
        });

        if applied {
            outcome
        } else if self.is_torn_down() {
            SubmitOutcome::Cancelled
        } else {
            debug!(ticket, "discarding response from superseded search");
            SubmitOutcome::Superseded
        }
    }

    /// Ends the page view. In-flight searches stop waiting and never write
    /// state again; a pending `Loading` falls back to `Idle`.
    pub fn teardown(&self) {
        self.teardown.cancel();
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = SearchState::Idle;
                true
            } else {
                false
            }
        });
    }
}

impl<B> Drop for SearchSession<B> {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}
