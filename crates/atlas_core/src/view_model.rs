use crate::{CountryFilter, LoadFailure, LoadPhase, LoadProgress, SortOrder};

/// Everything the rendering surface needs, derived from [`crate::AppState`].
///
/// `country_count` and `page_count` describe the filtered set; `visible` is
/// the slice for `current_page` (zero-based; the renderer labels pages
/// starting at 1).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: LoadPhase,
    pub load_failure: Option<LoadFailure>,
    pub progress: Option<LoadProgress>,
    pub sort_order: SortOrder,
    pub filter: CountryFilter,
    pub country_count: usize,
    pub visible: Vec<CountryRowView>,
    pub page_count: usize,
    pub current_page: usize,
    pub dirty: bool,
}

/// One country row of the visible page, display fields only.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRowView {
    pub name: String,
    pub region: String,
    pub area_sq_km: f64,
    pub flag_url: String,
}
