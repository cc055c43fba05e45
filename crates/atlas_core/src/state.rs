use std::fmt;

use crate::country::{Country, CountryFilter, SortOrder};
use crate::pipeline::{apply_filter, derive_filtered, page_count, visible_slice};
use crate::view_model::{AppViewModel, CountryRowView};

/// Load phase of the session. The transition is one-way: `Loading` is left
/// exactly once, on fetch completion (success or surfaced failure), and is
/// never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
}

/// Fetch progress stage, as reported by the engine while `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Downloading,
    Decoding,
}

/// Last progress report of the in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub stage: LoadStage,
    pub bytes: Option<u64>,
}

/// Why the initial load produced no dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedPayload,
}

impl fmt::Display for LoadFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailureKind::Network => write!(f, "network error"),
            LoadFailureKind::Timeout => write!(f, "timed out"),
            LoadFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            LoadFailureKind::MalformedPayload => write!(f, "malformed payload"),
        }
    }
}

/// A surfaced load failure. The session stays interactive with zero records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: LoadFailureKind,
    pub message: String,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

/// The browser's whole mutable state. Everything displayed is derived from
/// these fields through the pipeline; nothing derived is stored back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    countries: Vec<Country>,
    sort_order: SortOrder,
    filter: CountryFilter,
    current_page: usize,
    phase: LoadPhase,
    load_failure: Option<LoadFailure>,
    progress: Option<LoadProgress>,
    fetch_issued: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the view model for the current state.
    pub fn view(&self) -> AppViewModel {
        let filtered = derive_filtered(&self.countries, self.filter, self.sort_order);
        let visible = visible_slice(&filtered, self.current_page)
            .iter()
            .map(|country| CountryRowView {
                name: country.name.clone(),
                region: country.region.clone(),
                area_sq_km: country.area_sq_km,
                flag_url: country.flag_url.clone(),
            })
            .collect();

        AppViewModel {
            phase: self.phase,
            load_failure: self.load_failure.clone(),
            progress: self.progress,
            sort_order: self.sort_order,
            filter: self.filter,
            country_count: filtered.len(),
            visible,
            page_count: page_count(filtered.len()),
            current_page: self.current_page,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub(crate) fn fetch_issued(&self) -> bool {
        self.fetch_issued
    }

    pub(crate) fn note_fetch_issued(&mut self) {
        self.fetch_issued = true;
    }

    pub(crate) fn record_progress(&mut self, progress: LoadProgress) {
        self.progress = Some(progress);
        self.dirty = true;
    }

    /// Replace the dataset wholesale and leave `Loading`. Sort, filter and
    /// page settings are kept; the derive applies them to the new data.
    pub(crate) fn finish_load(&mut self, countries: Vec<Country>) {
        self.countries = countries;
        self.phase = LoadPhase::Ready;
        self.progress = None;
        self.dirty = true;
    }

    /// Leave `Loading` with a surfaced failure and an empty dataset.
    pub(crate) fn fail_load(&mut self, failure: LoadFailure) {
        self.load_failure = Some(failure);
        self.phase = LoadPhase::Ready;
        self.progress = None;
        self.dirty = true;
    }

    pub(crate) fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.dirty = true;
    }

    /// Apply a membership filter. The current page always returns to 0;
    /// re-picking the active filter while already on page 0 changes nothing.
    pub(crate) fn set_filter(&mut self, filter: CountryFilter) {
        let changed = self.filter != filter || self.current_page != 0;
        self.filter = filter;
        self.current_page = 0;
        if changed {
            self.dirty = true;
        }
    }

    /// Move to `page` when it exists for the current filtered set; an
    /// out-of-range index is rejected and the state is left untouched.
    pub(crate) fn select_page(&mut self, page: usize) {
        let pages = page_count(apply_filter(&self.countries, self.filter).len());
        if page >= pages || page == self.current_page {
            return;
        }
        self.current_page = page;
        self.dirty = true;
    }
}
