use crate::client::{ClientError, LogStore};
use crate::filter::FilterCriteria;
use crate::model::Record;
use crate::pager::Direction;
use crate::submission::{self, SubmissionError, SubmissionInput};

use super::{apply, ViewEvent, ViewState};

/// Result of a submission the remote store accepted.
#[derive(Debug)]
pub struct Submitted {
    pub record: Record,
    /// Set when the follow-up reload failed; the view then still shows the
    /// list from before the submission.
    pub reload_error: Option<ClientError>,
}

/// Pairs a [`LogStore`] with the view state and sequences the remote
/// round-trips against state transitions.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    state: ViewState,
}

impl<S: LogStore> Session<S> {
    pub fn new(store: S, page_size: usize) -> Self {
        Self {
            store,
            state: ViewState::new(page_size),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = apply(state, event);
    }

    /// Replaces the record store with a fresh remote list. On failure the
    /// previous list stays in place.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.store.list().await {
            Ok(records) => {
                self.dispatch(ViewEvent::RecordsLoaded(records));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch logs");
                Err(e)
            }
        }
    }

    /// Fetches the list, then applies `criteria` and moves to `page`.
    ///
    /// Filtering resets to page 1, so the page is only applied after the
    /// filter. Empty criteria keep whatever filter is already applied.
    pub async fn browse(
        &mut self,
        criteria: FilterCriteria,
        page: Option<usize>,
    ) -> Result<(), ClientError> {
        self.load().await?;
        if !criteria.is_empty() {
            self.dispatch(ViewEvent::FilterChanged(criteria));
        }
        if let Some(page) = page {
            self.dispatch(ViewEvent::Navigate(Direction::GoTo(page)));
        }
        Ok(())
    }

    /// Creates an entry from `input` and reloads once it is acknowledged.
    ///
    /// Input that fails validation leaves the form untouched. Valid input is
    /// kept as the form contents until the store accepts it, so a failed
    /// attempt can be retried as-is.
    pub async fn submit(&mut self, input: SubmissionInput) -> Result<Submitted, SubmissionError> {
        if let Err(e) = input.to_record() {
            tracing::warn!(error = %e, "rejected log entry");
            return Err(SubmissionError::Validation(e));
        }
        self.dispatch(ViewEvent::FormEdited(input));
        let record = match submission::submit(&self.store, self.state.form()).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(error = %e, "failed to submit log entry");
                return Err(e);
            }
        };
        self.dispatch(ViewEvent::SubmissionAccepted);
        let reload_error = self.load().await.err();
        if reload_error.is_some() {
            tracing::warn!("entry created but the list could not be refreshed");
        }
        Ok(Submitted {
            record,
            reload_error,
        })
    }
}
