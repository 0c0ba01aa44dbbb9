use colored::Colorize;
use serde::Serialize;

use crate::controller::ViewState;
use crate::model::Record;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" | "table" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FilterView {
    #[serde(rename = "type")]
    pub type_substring: String,
    pub date: Option<String>,
}

/// Serializable snapshot of the current page.
#[derive(Clone, Debug, Serialize)]
pub struct PageView {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub window: Vec<usize>,
    pub filter: FilterView,
    pub records: Vec<Record>,
}

impl PageView {
    pub fn from_state(state: &ViewState) -> Self {
        let page = state.page_state();
        let criteria = state.criteria();
        Self {
            page: page.current_page(),
            page_size: page.page_size(),
            total_items: page.total_items(),
            total_pages: page.total_pages(),
            window: state.window(),
            filter: FilterView {
                type_substring: criteria.type_substring.clone(),
                date: criteria.date.map(|d| d.format("%Y-%m-%d").to_string()),
            },
            records: state.visible().to_vec(),
        }
    }
}

pub fn render(state: &ViewState, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(state).into_bytes(),
        OutputFormat::Json => render_json(state),
    }
}

pub fn render_json(state: &ViewState) -> Vec<u8> {
    let mut out =
        serde_json::to_vec_pretty(&PageView::from_state(state)).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

fn width_of(values: impl Iterator<Item = usize>, header: &str) -> usize {
    values.fold(header.chars().count(), usize::max)
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

/// Navigation controls: previous, the page window, next.
pub fn render_nav(state: &ViewState) -> String {
    let page = state.page_state();
    let current = page.current_page();
    let mut parts: Vec<String> = Vec::new();
    if current > 1 {
        parts.push("< prev".to_string());
    } else {
        parts.push("< prev".dimmed().to_string());
    }
    for n in state.window() {
        if n == current {
            parts.push(format!("[{n}]").bold().cyan().to_string());
        } else {
            parts.push(n.to_string());
        }
    }
    if current < page.total_pages() {
        parts.push("next >".to_string());
    } else {
        parts.push("next >".dimmed().to_string());
    }
    parts.join("  ")
}

pub fn render_text(state: &ViewState) -> String {
    let rows = state.visible();
    let page = state.page_state();
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str(&format!("{}\n", "no entries".dimmed()));
    } else {
        let type_w = width_of(rows.iter().map(|r| r.event_type.chars().count()), "TYPE");
        let date_w = width_of(rows.iter().map(|r| r.event_date.chars().count()), "DATE");
        let (start, _) = page.bounds(state.filtered().len());
        let idx_w = width_of(
            std::iter::once((start + rows.len()).to_string().len()),
            "#",
        );

        let header = format!(
            "{}  {}  {}  {}",
            pad("#", idx_w),
            pad("TYPE", type_w),
            pad("DATE", date_w),
            "DESCRIPTION"
        );
        out.push_str(&format!("{}\n", header.bold().white()));
        for (i, r) in rows.iter().enumerate() {
            out.push_str(&format!(
                "{}  {}  {}  {}\n",
                pad(&(start + i + 1).to_string(), idx_w),
                pad(&r.event_type, type_w).yellow(),
                pad(&r.event_date, date_w),
                r.description
            ));
        }
    }

    out.push('\n');
    out.push_str(&render_nav(state));
    out.push('\n');
    out.push_str(&format!(
        ":: page {} of {} :: {} matching / {} total ::\n",
        if page.total_pages() == 0 {
            0
        } else {
            page.current_page()
        },
        page.total_pages(),
        page.total_items(),
        state.records().len()
    ));
    out
}
