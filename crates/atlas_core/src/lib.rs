//! Atlas core: pure state machine and view-model helpers.
mod country;
mod effect;
mod msg;
mod pipeline;
mod state;
mod update;
mod view_model;

pub use country::{Country, CountryFilter, SortOrder, LITHUANIA_AREA_SQ_KM, OCEANIA_REGION};
pub use effect::Effect;
pub use msg::Msg;
pub use pipeline::{
    apply_filter, collation_key, derive_filtered, page_count, sort_by_name, visible_slice,
    PAGE_SIZE,
};
pub use state::{AppState, LoadFailure, LoadFailureKind, LoadPhase, LoadProgress, LoadStage};
pub use update::update;
pub use view_model::{AppViewModel, CountryRowView};
