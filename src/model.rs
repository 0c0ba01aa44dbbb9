use serde::Deserialize;
use serde::Serialize;

/// Event type attached to every entry created through the submission form.
pub const FORM_EVENT_TYPE: &str = "FORMULARIO";

/// One logged event as stored by the remote API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    pub event_date: String,
    #[serde(
        rename = "create_at",
        alias = "created_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

impl Record {
    /// A record that has not been submitted yet (no id, no creation stamp).
    pub fn new(
        event_type: impl Into<String>,
        description: impl Into<String>,
        event_date: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            event_type: event_type.into(),
            description: description.into(),
            event_date: event_date.into(),
            created_at: None,
        }
    }
}

/// Body of `GET /logs`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ListResponse {
    #[serde(default)]
    pub logs: Vec<Record>,
}
