use std::sync::Once;

use atlas_core::{update, AppState, Country, CountryFilter, Msg, LITHUANIA_AREA_SQ_KM};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(atlas_logging::initialize_for_tests);
}

fn country(name: &str, region: &str, area_sq_km: f64) -> Country {
    Country {
        name: name.to_string(),
        region: region.to_string(),
        area_sq_km,
        flag_url: format!("https://flags.example/{}.svg", name.to_lowercase()),
    }
}

fn sample() -> Vec<Country> {
    vec![
        country("Fiji", "Oceania", 18_272.0),
        country("Peru", "Americas", 1_285_216.0),
        country("Nauru", "Oceania", 21.0),
    ]
}

fn loaded(countries: Vec<Country>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(state, Msg::CountriesLoaded(countries));
    state
}

fn visible_names(state: &AppState) -> Vec<String> {
    state
        .view()
        .visible
        .iter()
        .map(|row| row.name.clone())
        .collect()
}

#[test]
fn oceania_filter_keeps_exact_region_matches() {
    init_logging();
    let state = loaded(sample());
    let (state, effects) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.filter, CountryFilter::Oceania);
    assert_eq!(view.country_count, 2);
    assert_eq!(visible_names(&state), vec!["Fiji", "Nauru"]);
}

#[test]
fn oceania_filter_respects_the_current_sort_direction() {
    init_logging();
    let state = loaded(sample());
    let (state, _) = update(state, Msg::SortToggled);
    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    assert_eq!(visible_names(&state), vec!["Nauru", "Fiji"]);
}

#[test]
fn region_match_is_case_sensitive() {
    init_logging();
    let mut records = sample();
    records.push(country("Lowercasia", "oceania", 10.0));
    let state = loaded(records);
    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    assert_eq!(visible_names(&state), vec!["Fiji", "Nauru"]);
}

#[test]
fn area_filter_is_strictly_below_the_threshold() {
    init_logging();
    let mut records = sample();
    // Exactly on the threshold: excluded. A hair under: included.
    records.push(country("Lithuania", "Europe", LITHUANIA_AREA_SQ_KM));
    records.push(country("Justunder", "Europe", LITHUANIA_AREA_SQ_KM - 0.1));
    let state = loaded(records);

    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::SmallerThanLithuania));
    assert_eq!(visible_names(&state), vec!["Fiji", "Justunder", "Nauru"]);
}

#[test]
fn picking_the_same_filter_twice_is_idempotent() {
    init_logging();
    let state = loaded(sample());

    let (mut state, _) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    state.consume_dirty();
    let first = state.view();

    let (mut state, _) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    // Nothing changed, so nothing became dirty.
    assert!(!state.consume_dirty());
    assert_eq!(state.view(), first);
}

#[test]
fn picking_a_filter_resets_to_the_first_page() {
    init_logging();
    let records: Vec<Country> = (0..30)
        .map(|i| country(&format!("Island {i:02}"), "Oceania", 50.0 + i as f64))
        .collect();
    let state = loaded(records);

    let (state, _) = update(state, Msg::PageSelected(2));
    assert_eq!(state.view().current_page, 2);

    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    assert_eq!(state.view().current_page, 0);
    assert_eq!(state.view().page_count, 3);

    // Re-picking the active filter also returns to the first page.
    let (state, _) = update(state, Msg::PageSelected(1));
    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::Oceania));
    assert_eq!(state.view().current_page, 0);
}

#[test]
fn all_filter_restores_every_record() {
    init_logging();
    let state = loaded(sample());
    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::SmallerThanLithuania));
    assert_eq!(state.view().country_count, 2);

    let (state, _) = update(state, Msg::FilterPicked(CountryFilter::All));
    assert_eq!(state.view().country_count, 3);
    assert_eq!(visible_names(&state), vec!["Fiji", "Nauru", "Peru"]);
}
