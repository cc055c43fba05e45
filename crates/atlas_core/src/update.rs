use crate::{AppState, Effect, LoadPhase, LoadProgress, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            // One fetch per session: a repeated request, or one arriving
            // after the load already resolved, is a no-op.
            if state.phase() == LoadPhase::Loading && !state.fetch_issued() {
                state.note_fetch_issued();
                vec![Effect::FetchCountries]
            } else {
                Vec::new()
            }
        }
        Msg::LoadProgress { stage, bytes } => {
            if state.phase() == LoadPhase::Loading {
                state.record_progress(LoadProgress { stage, bytes });
            }
            Vec::new()
        }
        Msg::CountriesLoaded(countries) => {
            // The Loading -> Ready transition is one-way; late duplicates
            // must not replace an already-settled dataset.
            if state.phase() == LoadPhase::Loading {
                state.finish_load(countries);
            }
            Vec::new()
        }
        Msg::LoadFailed(failure) => {
            if state.phase() == LoadPhase::Loading {
                state.fail_load(failure);
            }
            Vec::new()
        }
        Msg::SortToggled => {
            // Sorting changes order only, never membership, so the current
            // page stays where it is.
            state.toggle_sort();
            Vec::new()
        }
        Msg::FilterPicked(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::PageSelected(page) => {
            state.select_page(page);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
