use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::client::{ClientError, LogStore};
use crate::controller::{Session, ViewEvent};
use crate::model::Record;
use crate::output::OutputFormat;
use crate::pager::Direction;
use crate::submission::{SubmissionError, SubmissionInput, ValidationError};

#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<Record>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
}

fn unavailable(endpoint: &str) -> ClientError {
    ClientError::Status {
        endpoint: endpoint.to_string(),
        status: 503,
        body: "unavailable".to_string(),
    }
}

impl MemoryStore {
    fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl LogStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Record>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable("/logs"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, record: &Record) -> Result<serde_json::Value, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(unavailable("/logs/log"));
        }
        let mut records = self.records.lock().unwrap();
        let mut stored = record.clone();
        stored.id = Some(format!("id-{}", records.len()));
        records.push(stored.clone());
        Ok(serde_json::to_value(stored).unwrap())
    }
}

fn entries(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let kind = if i % 2 == 0 { "Alert" } else { "Info" };
            let mut r = Record::new(kind, format!("entry {i}"), "2024-01-05T10:00:00Z");
            r.id = Some(format!("seed-{i}"));
            r
        })
        .collect()
}

#[tokio::test]
async fn twelve_entries_make_three_pages() {
    let mut session = Session::new(MemoryStore::with_records(entries(12)), 5);
    session.load().await.unwrap();
    let page = session.state().page_state();
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.current_page(), 1);
    assert_eq!(session.state().window(), vec![1, 2, 3]);
}

#[tokio::test]
async fn submission_creates_form_entry_and_reloads_once() {
    let mut session = Session::new(MemoryStore::default(), 5);
    let done = session
        .submit(SubmissionInput::new("2024-03-01T12:00", "test"))
        .await
        .unwrap();

    assert_eq!(done.record.event_type, "FORMULARIO");
    assert_eq!(done.record.event_date, "2024/03/01 12:00:00");
    assert_eq!(done.record.description, "test");
    assert!(done.reload_error.is_none());

    assert_eq!(session.store().creates(), 1);
    assert_eq!(session.store().lists(), 1);
    assert_eq!(session.state().records().len(), 1);
    assert_eq!(session.state().records()[0].id.as_deref(), Some("id-0"));
    assert!(session.state().form().is_blank());
}

#[tokio::test]
async fn failed_submission_keeps_input_and_view() {
    let store = MemoryStore::with_records(entries(12));
    let mut session = Session::new(store, 5);
    session.load().await.unwrap();
    session.dispatch(ViewEvent::Navigate(Direction::GoTo(2)));
    let before_records = session.state().records().to_vec();
    let before_page = *session.state().page_state();

    session.store().fail_create.store(true, Ordering::SeqCst);
    let input = SubmissionInput::new("2024-03-01T12:00", "retry me");
    let err = session.submit(input.clone()).await.unwrap_err();

    assert!(matches!(err, SubmissionError::Transport(_)));
    assert_eq!(session.state().form(), &input);
    assert_eq!(session.state().records(), before_records.as_slice());
    assert_eq!(session.state().page_state(), &before_page);
    assert_eq!(session.store().lists(), 1);
}

#[tokio::test]
async fn invalid_input_never_reaches_store() {
    let mut session = Session::new(MemoryStore::default(), 5);
    let err = session
        .submit(SubmissionInput::new("", "no date"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Validation(ValidationError::MissingEventDateTime)
    ));
    assert_eq!(session.store().creates(), 0);
    assert_eq!(session.store().lists(), 0);
    assert!(session.state().form().is_blank());
}

#[tokio::test]
async fn rejected_input_keeps_previous_form() {
    let mut session = Session::new(MemoryStore::default(), 5);
    session.dispatch(ViewEvent::FormEdited(SubmissionInput::new(
        "2024-03-01T12:00",
        "draft",
    )));
    let err = session
        .submit(SubmissionInput::new("not a date", "typo"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Validation(ValidationError::InvalidEventDateTime { .. })
    ));
    assert_eq!(session.store().creates(), 0);
    assert_eq!(
        session.state().form(),
        &SubmissionInput::new("2024-03-01T12:00", "draft")
    );
}

#[tokio::test]
async fn reload_failure_after_create_keeps_previous_list() {
    let mut session = Session::new(MemoryStore::with_records(entries(3)), 5);
    session.load().await.unwrap();
    session.store().fail_list.store(true, Ordering::SeqCst);

    let done = session
        .submit(SubmissionInput::new("2024-03-01 09:30:00", "late"))
        .await
        .unwrap();
    assert!(done.reload_error.is_some());
    assert_eq!(session.store().creates(), 1);
    assert_eq!(session.state().records().len(), 3);
    assert!(session.state().form().is_blank());
}

#[tokio::test]
async fn failed_load_leaves_state_untouched() {
    let mut session = Session::new(MemoryStore::with_records(entries(6)), 5);
    session.load().await.unwrap();
    session.store().fail_list.store(true, Ordering::SeqCst);
    assert!(session.load().await.is_err());
    assert_eq!(session.state().records().len(), 6);
}

#[tokio::test]
async fn reload_clamps_current_page() {
    let mut session = Session::new(MemoryStore::with_records(entries(12)), 5);
    session.load().await.unwrap();
    session.dispatch(ViewEvent::Navigate(Direction::GoTo(3)));
    *session.store().records.lock().unwrap() = entries(6);
    session.load().await.unwrap();
    assert_eq!(session.state().page_state().current_page(), 2);
    assert_eq!(session.state().visible().len(), 1);
}

#[tokio::test]
async fn shell_applies_one_event_per_line() {
    colored::control::set_override(false);
    let mut session = Session::new(MemoryStore::with_records(entries(12)), 5);
    session.load().await.unwrap();

    let script = "type alert\nnext\nnext\npage 9\nbogus\nsubmit 2024-03-01T12:00 from shell\nquit\nnext\n";
    let mut out: Vec<u8> = Vec::new();
    crate::shell::run(&mut session, script.as_bytes(), &mut out, OutputFormat::Text)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains(":: page 2 of 2 :: 6 matching / 12 total ::"));
    assert!(text.contains("unknown command 'bogus'"));
    assert!(text.contains("created entry for 2024/03/01 12:00:00"));
    assert_eq!(session.store().creates(), 1);
    assert_eq!(session.state().records().len(), 13);
    // the submitted FORMULARIO entry does not match the "alert" filter
    assert_eq!(session.state().filtered().len(), 6);
    assert_eq!(session.state().page_state().current_page(), 2);
}

#[tokio::test]
async fn shell_stops_at_end_of_input() {
    let mut session = Session::new(MemoryStore::with_records(entries(2)), 5);
    session.load().await.unwrap();
    let mut out: Vec<u8> = Vec::new();
    crate::shell::run(&mut session, &b"help\n"[..], &mut out, OutputFormat::Json)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"total_items\": 2"));
    assert!(text.contains("commands:"));
}
