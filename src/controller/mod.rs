pub mod session;

use chrono::NaiveDate;

use crate::filter::{self, FilterCriteria};
use crate::model::Record;
use crate::pager::{self, Direction, PageState};
use crate::submission::SubmissionInput;

pub use session::{Session, Submitted};

/// Everything the table view shows, derived from the last good fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    records: Vec<Record>,
    criteria: FilterCriteria,
    filtered: Vec<Record>,
    page: PageState,
    form: SubmissionInput,
}

/// One user or network event. Events are applied one at a time, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    TypeFilterChanged(String),
    DateFilterChanged(Option<NaiveDate>),
    FilterChanged(FilterCriteria),
    FiltersCleared,
    Navigate(Direction),
    /// A fresh list from the remote store; replaces the old one wholesale.
    RecordsLoaded(Vec<Record>),
    FormEdited(SubmissionInput),
    SubmissionAccepted,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: PageState::new(page_size),
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn form(&self) -> &SubmissionInput {
        &self.form
    }

    /// Rows on the current page.
    pub fn visible(&self) -> &[Record] {
        pager::page(&self.filtered, &self.page)
    }

    pub fn window(&self) -> Vec<usize> {
        pager::page_window(&self.page)
    }

    fn refilter(mut self) -> Self {
        self.filtered = filter::filter(&self.records, &self.criteria);
        self.page = self.page.with_total(self.filtered.len());
        self
    }

    fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self.page = self.page.reset();
        self.refilter()
    }
}

/// Pure transition: current state plus one event gives the next state.
pub fn apply(state: ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::TypeFilterChanged(type_substring) => {
            let criteria = FilterCriteria {
                type_substring,
                ..state.criteria.clone()
            };
            state.with_criteria(criteria)
        }
        ViewEvent::DateFilterChanged(date) => {
            let criteria = FilterCriteria {
                date,
                ..state.criteria.clone()
            };
            state.with_criteria(criteria)
        }
        ViewEvent::FilterChanged(criteria) => state.with_criteria(criteria),
        ViewEvent::FiltersCleared => state.with_criteria(FilterCriteria::default()),
        ViewEvent::Navigate(direction) => ViewState {
            page: pager::advance(direction, state.page),
            ..state
        },
        ViewEvent::RecordsLoaded(records) => ViewState { records, ..state }.refilter(),
        ViewEvent::FormEdited(form) => ViewState { form, ..state },
        ViewEvent::SubmissionAccepted => ViewState {
            form: SubmissionInput::default(),
            ..state
        },
    }
}
