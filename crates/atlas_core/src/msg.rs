#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session start: request the one-shot country fetch.
    LoadRequested,
    /// Engine progress for the in-flight fetch.
    LoadProgress {
        stage: crate::LoadStage,
        bytes: Option<u64>,
    },
    /// Fetch completed with a usable dataset (records in source order).
    CountriesLoaded(Vec<crate::Country>),
    /// Fetch completed without a usable dataset.
    LoadFailed(crate::LoadFailure),
    /// User toggled the alphabetical sort direction.
    SortToggled,
    /// User picked a membership filter.
    FilterPicked(crate::CountryFilter),
    /// User selected a page (zero-based) from the paginator.
    PageSelected(usize),
    /// Fallback for placeholder wiring.
    NoOp,
}
