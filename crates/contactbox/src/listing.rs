//! The listing pipeline: snapshot → filter → sort → render.
//!
//! A [`ListingView`] loads the record store once and then recomputes the
//! visible list from that snapshot on every interaction. Writes made after
//! the view was opened are not picked up.

use std::fmt;

use maud::Markup;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collate::locale_cmp;
use crate::config::DisplayConfig;
use crate::record::{self, Record};
use crate::render::render_list;
use crate::store::RecordStore;

/// Sort selection for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Ascending by `nombre`.
    Name,
    /// Ascending by `interes`.
    Interes,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Interes => write!(f, "interes"),
        }
    }
}

impl SortMode {
    fn key(self, record: &Record) -> &str {
        let value = match self {
            Self::Name => record.nombre(),
            Self::Interes => record.interes(),
        };
        value.unwrap_or_default()
    }
}

/// Filter and sort a copy of `snapshot`.
///
/// A non-empty `filter` keeps records whose `interes` equals it exactly. The
/// sort is stable and runs after filtering; `None` keeps insertion order.
#[must_use]
pub fn recompute(snapshot: &[Record], filter: &str, sort: Option<SortMode>) -> Vec<Record> {
    let mut view: Vec<Record> = if filter.is_empty() {
        snapshot.to_vec()
    } else {
        snapshot
            .iter()
            .filter(|r| r.interes() == Some(filter))
            .cloned()
            .collect()
    };

    if let Some(mode) = sort {
        view.sort_by(|a, b| locale_cmp(mode.key(a), mode.key(b)));
    }

    debug!(
        "Recomputed listing: {} of {} records (filter={:?}, sort={:?})",
        view.len(),
        snapshot.len(),
        filter,
        sort
    );
    view
}

/// State of one open listing: the snapshot plus the current controls.
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    snapshot: Vec<Record>,
    filter: String,
    sort: Option<SortMode>,
}

impl ListingView {
    /// Open a listing over the current contents of `store`.
    #[must_use]
    pub fn open(store: &RecordStore) -> Self {
        Self::from_snapshot(store.load())
    }

    /// Open a listing over an explicit snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: Vec<Record>) -> Self {
        Self {
            snapshot,
            filter: String::new(),
            sort: None,
        }
    }

    /// The records loaded when the view was opened.
    #[must_use]
    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    /// Current filter value, empty when unfiltered.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Current sort mode.
    #[must_use]
    pub fn sort(&self) -> Option<SortMode> {
        self.sort
    }

    /// The records currently visible.
    #[must_use]
    pub fn visible(&self) -> Vec<Record> {
        recompute(&self.snapshot, &self.filter, self.sort)
    }

    /// Change the filter, keeping the sort. Returns the new visible list.
    pub fn set_filter(&mut self, value: impl Into<String>) -> Vec<Record> {
        self.filter = value.into();
        self.visible()
    }

    /// Change the sort, keeping the filter. Returns the new visible list.
    pub fn sort_by(&mut self, mode: SortMode) -> Vec<Record> {
        self.sort = Some(mode);
        self.visible()
    }

    /// Values the filter control can offer.
    #[must_use]
    pub fn interests(&self) -> Vec<String> {
        record::distinct_interests(&self.snapshot)
    }

    /// Render the visible list as HTML.
    #[must_use]
    pub fn render(&self, display: &DisplayConfig) -> Markup {
        render_list(&self.visible(), display)
    }
}
