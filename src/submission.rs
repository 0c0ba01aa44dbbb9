use thiserror::Error;

use crate::client::{ClientError, LogStore};
use crate::filter::dates;
use crate::model::{Record, FORM_EVENT_TYPE};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("event date-time is required")]
    MissingEventDateTime,

    #[error("description is required")]
    MissingDescription,

    #[error("invalid event date-time '{value}', expected YYYY-MM-DDTHH:MM[:SS]")]
    InvalidEventDateTime { value: String },
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// What the user typed into the entry form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub event_date_time: String,
    pub description: String,
}

impl SubmissionInput {
    pub fn new(event_date_time: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            event_date_time: event_date_time.into(),
            description: description.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.event_date_time.trim().is_empty() && self.description.trim().is_empty()
    }

    /// Builds the record to create, or reports the first invalid field.
    pub fn to_record(&self) -> Result<Record, ValidationError> {
        let raw = self.event_date_time.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingEventDateTime);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        let when = dates::parse_form_datetime(raw).ok_or_else(|| {
            ValidationError::InvalidEventDateTime {
                value: raw.to_string(),
            }
        })?;
        Ok(Record::new(
            FORM_EVENT_TYPE,
            self.description.clone(),
            dates::format_canonical(&when),
        ))
    }
}

/// Validates `input` and asks `store` to create it.
///
/// Nothing reaches the store when validation fails. Returns the record that
/// was sent.
pub async fn submit<S: LogStore>(
    store: &S,
    input: &SubmissionInput,
) -> Result<Record, SubmissionError> {
    let record = input.to_record()?;
    let response = store.create(&record).await?;
    tracing::info!(
        event_date = %record.event_date,
        response = %response,
        "log entry submitted"
    );
    Ok(record)
}
