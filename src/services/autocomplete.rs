//! Debounced, race-safe address autocomplete for one text field.
//!
//! [`SearchSession`] is the synchronous state machine. It hands out a
//! debounce token on every keystroke and a generation-tagged [`QueryTicket`]
//! when a query is issued; a completion is applied only while its ticket is
//! still the live one. [`AutocompleteSearch`] drives a session with tokio
//! timers and a [`GeocodingProvider`]. Superseded timers and requests are
//! never aborted, their results are simply ignored.

use crate::config::AutocompleteConfig;
use crate::error::{AppError, Result};
use crate::models::{Prediction, SelectedPlace};
use crate::services::geocoder::GeocodingProvider;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Debouncing,
    Fetching,
    Populated,
    Failed,
}

/// What an input field renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub text: String,
    pub predictions: Vec<Prediction>,
    pub phase: SearchPhase,
    pub loading: bool,
}

/// One issued query, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct SearchSession {
    text: String,
    predictions: Vec<Prediction>,
    phase: SearchPhase,
    min_query_chars: usize,
    debounce_token: u64,
    /// A debounce timer is running for the current token
    debounce_pending: bool,
    last_generation: u64,
    in_flight: Option<u64>,
}

impl SearchSession {
    pub fn new(min_query_chars: usize) -> Self {
        SearchSession {
            text: String::new(),
            predictions: Vec::new(),
            phase: SearchPhase::Idle,
            min_query_chars,
            debounce_token: 0,
            debounce_pending: false,
            last_generation: 0,
            in_flight: None,
        }
    }

    pub fn view(&self) -> SearchView {
        SearchView {
            text: self.text.clone(),
            predictions: self.predictions.clone(),
            phase: self.phase,
            loading: self.phase == SearchPhase::Fetching,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Record a keystroke. Returns the token the debounce timer must present
    /// when it fires, or `None` when the text is too short to search.
    pub fn text_changed(&mut self, text: &str) -> Option<u64> {
        self.text = text.to_string();
        self.debounce_token += 1;

        if text.chars().count() < self.min_query_chars {
            self.predictions.clear();
            self.debounce_pending = false;
            self.in_flight = None;
            self.phase = SearchPhase::Idle;
            return None;
        }

        self.debounce_pending = true;
        self.phase = SearchPhase::Debouncing;
        Some(self.debounce_token)
    }

    /// The debounce timer for `token` elapsed. Issues a query for the current
    /// text unless another keystroke came in meanwhile.
    pub fn debounce_elapsed(&mut self, token: u64) -> Option<QueryTicket> {
        if token != self.debounce_token || !self.debounce_pending {
            return None;
        }
        self.debounce_pending = false;

        self.last_generation += 1;
        self.in_flight = Some(self.last_generation);
        self.phase = SearchPhase::Fetching;
        Some(QueryTicket {
            generation: self.last_generation,
            query: self.text.clone(),
        })
    }

    /// Apply a finished query. Returns `false` when the ticket has been
    /// superseded and the result was dropped.
    pub fn complete(&mut self, ticket: &QueryTicket, result: Result<Vec<Prediction>>) -> bool {
        if self.in_flight != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.last_generation,
                "Discarding stale autocomplete response for '{}'",
                ticket.query
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(predictions) => {
                tracing::debug!(
                    generation = ticket.generation,
                    results = predictions.len(),
                    "Autocomplete populated for '{}'",
                    ticket.query
                );
                self.predictions = predictions;
                self.phase = self.settled_phase(SearchPhase::Populated);
            }
            Err(e) => {
                tracing::warn!(
                    generation = ticket.generation,
                    "Autocomplete failed for '{}': {}",
                    ticket.query, e
                );
                self.predictions.clear();
                self.phase = self.settled_phase(SearchPhase::Failed);
            }
        }
        true
    }

    /// Choose a prediction. On success the list closes, the field shows the
    /// place name and anything pending is invalidated. A prediction whose
    /// coordinates don't parse leaves the session untouched.
    pub fn select(&mut self, prediction: &Prediction) -> Result<SelectedPlace> {
        let coordinate = prediction.coordinate().map_err(AppError::Parse)?;

        self.text = prediction.input_text().to_string();
        self.clear_pending();

        Ok(SelectedPlace {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            address: prediction.display_name.clone(),
        })
    }

    /// Empty the field and drop all pending work.
    pub fn reset(&mut self) {
        self.text.clear();
        self.clear_pending();
    }

    /// A newer keystroke still waiting on its timer keeps the field debouncing.
    fn settled_phase(&self, outcome: SearchPhase) -> SearchPhase {
        if self.debounce_pending {
            SearchPhase::Debouncing
        } else {
            outcome
        }
    }

    fn clear_pending(&mut self) {
        self.predictions.clear();
        self.debounce_token += 1;
        self.debounce_pending = false;
        self.in_flight = None;
        self.phase = SearchPhase::Idle;
    }
}

/// A [`SearchSession`] wired to a geocoder and tokio timers.
#[derive(Clone)]
pub struct AutocompleteSearch {
    provider: Arc<dyn GeocodingProvider>,
    session: Arc<Mutex<SearchSession>>,
    debounce: Duration,
}

impl AutocompleteSearch {
    pub fn new(provider: Arc<dyn GeocodingProvider>, config: &AutocompleteConfig) -> Self {
        AutocompleteSearch {
            provider,
            session: Arc::new(Mutex::new(SearchSession::new(config.min_query_chars))),
            debounce: config.debounce,
        }
    }

    fn session(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> SearchView {
        self.session().view()
    }

    /// Feed a keystroke. Must be called inside a tokio runtime.
    pub fn on_text_change(&self, text: &str) {
        let token = self.session().text_changed(text);
        let Some(token) = token else {
            tracing::debug!("Query '{}' below minimum length, cleared", text);
            return;
        };

        let this = self.clone();
        tokio::spawn(async move { this.fire_after_debounce(token).await });
    }

    async fn fire_after_debounce(self, token: u64) {
        tokio::time::sleep(self.debounce).await;

        let ticket = self.session().debounce_elapsed(token);
        let Some(ticket) = ticket else {
            return;
        };

        tracing::debug!(
            generation = ticket.generation,
            "Issuing autocomplete query '{}'",
            ticket.query
        );
        let result = self.provider.autocomplete(&ticket.query).await;
        self.session().complete(&ticket, result);
    }

    /// Select a prediction and hand the place to `on_select`. The callback
    /// runs after the session lock is released.
    pub fn select<F>(&self, prediction: &Prediction, on_select: F) -> Result<SelectedPlace>
    where
        F: FnOnce(&SelectedPlace),
    {
        let place = self.session().select(prediction)?;
        on_select(&place);
        Ok(place)
    }

    /// Select the `index`-th visible prediction.
    pub fn select_index<F>(&self, index: usize, on_select: F) -> Result<SelectedPlace>
    where
        F: FnOnce(&SelectedPlace),
    {
        let place = {
            let mut session = self.session();
            let prediction = session.predictions().get(index).cloned().ok_or_else(|| {
                AppError::NotFound(format!("No prediction at index {}", index))
            })?;
            session.select(&prediction)?
        };
        on_select(&place);
        Ok(place)
    }

    pub fn reset(&self) {
        self.session().reset();
    }
}
