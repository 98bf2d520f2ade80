//! Visible-subset criteria over the task collection.
//!
//! # Responsibility
//! - Hold the transient status-filter and search-text criteria.
//! - Derive the visible subset without mutating the collection.
//! - Mirror the criteria into a shareable URL query string and back.
//!
//! # Invariants
//! - A task is visible iff it passes the status filter AND the search.
//! - The default criteria render as the empty query string.
//!
//! # See also
//! - `query::text` for the folding the search criterion relies on.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::model::task::{Task, TaskStatus};
use crate::query::text::contains_folded;

/// Wire value for the all-statuses sentinel.
pub const STATUS_VALUE_ALL: &str = "all";
/// Wire value selecting [`TaskStatus::NotStarted`].
pub const STATUS_VALUE_NOT_STARTED: &str = "not-started";
/// Wire value selecting [`TaskStatus::InProgress`].
pub const STATUS_VALUE_IN_PROGRESS: &str = "in-progress";
/// Wire value selecting [`TaskStatus::Done`].
pub const STATUS_VALUE_DONE: &str = "done";

const STATUS_PARAM: &str = "status";
const SEARCH_PARAM: &str = "q";

// Conservative superset of the characters that would break a key=value pair.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

/// Status criterion: the `all` sentinel or exactly one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Passes every task.
    #[default]
    All,
    /// Passes only tasks in exactly this status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Stable URL value for this criterion.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => STATUS_VALUE_ALL,
            Self::Only(TaskStatus::NotStarted) => STATUS_VALUE_NOT_STARTED,
            Self::Only(TaskStatus::InProgress) => STATUS_VALUE_IN_PROGRESS,
            Self::Only(TaskStatus::Done) => STATUS_VALUE_DONE,
        }
    }

    /// Parses a URL value; unknown values yield `None`.
    pub fn parse_query_value(value: &str) -> Option<Self> {
        match value {
            STATUS_VALUE_ALL => Some(Self::All),
            STATUS_VALUE_NOT_STARTED => Some(Self::Only(TaskStatus::NotStarted)),
            STATUS_VALUE_IN_PROGRESS => Some(Self::Only(TaskStatus::InProgress)),
            STATUS_VALUE_DONE => Some(Self::Only(TaskStatus::Done)),
            _ => None,
        }
    }

    /// Returns whether `status` passes this criterion.
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Transient filter and search criteria for one list view.
///
/// Holds no tasks itself; [`QueryState::visible_tasks`] projects whatever
/// collection the store currently exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    status: StatusFilter,
    search: String,
}

impl QueryState {
    /// Creates the default criteria: all statuses, empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the status criterion.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status = filter;
    }

    /// Replaces the search text, kept as entered (folding happens at
    /// match time).
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Current status criterion.
    pub fn status_filter(&self) -> StatusFilter {
        self.status
    }

    /// Current search text as entered.
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Returns whether one task passes both criteria.
    ///
    /// The search matches on the folded title or the folded description;
    /// empty search text passes every task.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status)
            && (contains_folded(&task.title, &self.search)
                || contains_folded(&task.description, &self.search))
    }

    /// Derives the visible subset, preserving collection order.
    pub fn visible_tasks<'t>(&self, tasks: &'t [Task]) -> Vec<&'t Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// Renders the criteria as a shareable query string.
    ///
    /// Default criteria are omitted, so the default state renders as `""`.
    /// The search value is percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if self.status != StatusFilter::All {
            pairs.push(format!("{STATUS_PARAM}={}", self.status.as_query_value()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(format!(
                "{SEARCH_PARAM}={}",
                utf8_percent_encode(search, QUERY_ENCODE_SET)
            ));
        }
        pairs.join("&")
    }

    /// Seeds criteria from a query string, with or without a leading `?`.
    ///
    /// Unknown parameters are ignored; absent or unparsable values fall
    /// back to the defaults. Spaces arrive as either `%20` or `+`.
    pub fn from_query_string(query: &str) -> Self {
        let mut state = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((name, raw_value)) = pair.split_once('=') else {
                continue;
            };
            let value = decode_query_value(raw_value);
            match name {
                STATUS_PARAM => {
                    if let Some(filter) = StatusFilter::parse_query_value(&value) {
                        state.status = filter;
                    }
                }
                SEARCH_PARAM => state.search = value,
                _ => {}
            }
        }
        state
    }
}

/// Decodes one query value. `+` is folded to a space before percent
/// decoding so `%2B` still comes out as a literal plus.
fn decode_query_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_handles_plus_and_percent_forms() {
        assert_eq!(decode_query_value("a+b"), "a b");
        assert_eq!(decode_query_value("a%20b"), "a b");
        assert_eq!(decode_query_value("a%2Bb"), "a+b");
        assert_eq!(decode_query_value("%C4%90i"), "Đi");
    }

    #[test]
    fn status_values_round_trip() {
        for filter in [
            StatusFilter::All,
            StatusFilter::Only(TaskStatus::NotStarted),
            StatusFilter::Only(TaskStatus::InProgress),
            StatusFilter::Only(TaskStatus::Done),
        ] {
            assert_eq!(
                StatusFilter::parse_query_value(filter.as_query_value()),
                Some(filter)
            );
        }
        assert_eq!(StatusFilter::parse_query_value("archived"), None);
    }
}
