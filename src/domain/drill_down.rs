// Drill-down session - which slice of detail data the modal shows
use serde::Serialize;

use super::asset::PagedAssetResult;

pub const DEFAULT_SORT_FIELD: &str = "serie";
const DESCENDING_MARKER: char = '-';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Clicking the active ascending column flips it to descending; any
    /// other click (including the active descending column) sorts ascending.
    pub fn toggled_by(&self, field: &str) -> Self {
        if self.field == field && !self.descending {
            Self {
                field: self.field.clone(),
                descending: true,
            }
        } else {
            Self::ascending(field)
        }
    }

    /// Backend ordering parameter, e.g. `serie` or `-serie`.
    pub fn as_ordering(&self) -> String {
        if self.descending {
            format!("{}{}", DESCENDING_MARKER, self.field)
        } else {
            self.field.clone()
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::ascending(DEFAULT_SORT_FIELD)
    }
}

/// The full tuple sent to the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQuery {
    pub category: String,
    pub ordering: String,
    pub page: u32,
}

/// A fetch the caller must issue, tagged so that only the newest result lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub token: u64,
    pub query: DetailQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillDownPhase {
    Closed,
    Loading,
    Ready,
    /// Fetch failed; the modal shows its empty state.
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrillDownSnapshot {
    pub phase: DrillDownPhase,
    pub category: Option<String>,
    pub title: String,
    pub ordering: String,
    pub page: u32,
    pub is_loading: bool,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub data: Option<PagedAssetResult>,
}

#[derive(Debug, Clone)]
pub struct DrillDownSession {
    category: Option<String>,
    title: String,
    sort: SortOrder,
    page: u32,
    phase: DrillDownPhase,
    data: Option<PagedAssetResult>,
    // Monotonic across open/close so late results from an earlier session
    // can never match.
    token: u64,
}

impl Default for DrillDownSession {
    fn default() -> Self {
        Self {
            category: None,
            title: String::new(),
            sort: SortOrder::default(),
            page: 1,
            phase: DrillDownPhase::Closed,
            data: None,
            token: 0,
        }
    }
}

impl DrillDownSession {
    pub fn is_open(&self) -> bool {
        self.category.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == DrillDownPhase::Loading
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn phase(&self) -> DrillDownPhase {
        self.phase
    }

    pub fn data(&self) -> Option<&PagedAssetResult> {
        self.data.as_ref()
    }

    pub fn open(&mut self, category: impl Into<String>, title: impl Into<String>) -> DetailRequest {
        self.category = Some(category.into());
        self.title = title.into();
        self.sort = SortOrder::default();
        self.page = 1;
        self.data = None;
        self.begin_fetch()
    }

    /// Changing the sort always returns to the first page. `None` when closed.
    pub fn set_sort(&mut self, field: &str) -> Option<DetailRequest> {
        if !self.is_open() {
            return None;
        }
        self.sort = self.sort.toggled_by(field);
        self.page = 1;
        Some(self.begin_fetch())
    }

    /// Pages past the end are the server's to report; only zero is lifted to one.
    pub fn set_page(&mut self, page: u32) -> Option<DetailRequest> {
        if !self.is_open() {
            return None;
        }
        self.page = page.max(1);
        Some(self.begin_fetch())
    }

    pub fn close(&mut self) {
        let token = self.token.wrapping_add(1);
        *self = Self {
            token,
            ..Self::default()
        };
    }

    /// Applies a finished fetch. Returns false, leaving the session untouched,
    /// when the result belongs to a superseded request or a closed session.
    pub fn complete(&mut self, token: u64, result: Option<PagedAssetResult>) -> bool {
        if token != self.token || !self.is_open() {
            tracing::debug!(token, current = self.token, "Discarding stale drill-down result");
            return false;
        }

        self.phase = if result.is_some() {
            DrillDownPhase::Ready
        } else {
            DrillDownPhase::Empty
        };
        self.data = result;
        true
    }

    pub fn snapshot(&self) -> DrillDownSnapshot {
        DrillDownSnapshot {
            phase: self.phase(),
            category: self.category.clone(),
            title: self.title.clone(),
            ordering: self.sort.as_ordering(),
            page: self.page(),
            is_loading: self.is_loading(),
            has_next_page: self.data().is_some_and(|d| d.has_next_page()),
            has_previous_page: self.data().is_some_and(|d| d.has_previous_page()),
            data: self.data().cloned(),
        }
    }

    fn begin_fetch(&mut self) -> DetailRequest {
        self.token = self.token.wrapping_add(1);
        self.phase = DrillDownPhase::Loading;
        DetailRequest {
            token: self.token,
            query: DetailQuery {
                category: self.category.clone().unwrap_or_default(),
                ordering: self.sort.as_ordering(),
                page: self.page,
            },
        }
    }
}
