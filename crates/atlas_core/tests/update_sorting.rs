use std::collections::BTreeMap;

use atlas_core::{
    derive_filtered, update, AppState, Country, CountryFilter, Msg, SortOrder,
};

fn init_logging() {
    atlas_logging::initialize_for_tests();
}

fn country(name: &str, region: &str, area_sq_km: f64) -> Country {
    Country {
        name: name.to_string(),
        region: region.to_string(),
        area_sq_km,
        flag_url: format!("https://flags.example/{}.svg", name.to_lowercase()),
    }
}

/// Accented names straight from the live dataset, deliberately unsorted.
fn accented_sample() -> Vec<Country> {
    vec![
        country("Réunion", "Africa", 2_511.0),
        country("Zimbabwe", "Africa", 390_757.0),
        country("Åland Islands", "Europe", 1_580.0),
        country("Côte d'Ivoire", "Africa", 322_463.0),
        country("Albania", "Europe", 28_748.0),
        country("São Tomé and Príncipe", "Africa", 964.0),
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
fn default_order_is_ascending_and_accent_aware() {
    init_logging();
    let state = loaded(accented_sample());
    // Byte order would push "Åland Islands" past "Zimbabwe"; the folded
    // comparator keeps it at the front, where an alphabetizer expects it.
    assert_eq!(
        visible_names(&state),
        vec![
            "Åland Islands",
            "Albania",
            "Côte d'Ivoire",
            "Réunion",
            "São Tomé and Príncipe",
            "Zimbabwe",
        ]
    );
    assert_eq!(state.view().sort_order, SortOrder::Ascending);
}

#[test]
fn toggle_flips_to_descending() {
    init_logging();
    let state = loaded(accented_sample());
    let (state, effects) = update(state, Msg::SortToggled);
    assert!(effects.is_empty());
    assert_eq!(state.view().sort_order, SortOrder::Descending);
    assert_eq!(
        visible_names(&state),
        vec![
            "Zimbabwe",
            "São Tomé and Príncipe",
            "Réunion",
            "Côte d'Ivoire",
            "Albania",
            "Åland Islands",
        ]
    );
}

#[test]
fn double_toggle_restores_order_and_direction() {
    init_logging();
    let state = loaded(accented_sample());
    let before = visible_names(&state);

    let (state, _) = update(state, Msg::SortToggled);
    let (state, _) = update(state, Msg::SortToggled);

    assert_eq!(state.view().sort_order, SortOrder::Ascending);
    assert_eq!(visible_names(&state), before);
}

#[test]
fn sorting_preserves_the_record_multiset() {
    let records: Vec<Country> = (0..30)
        .map(|i| country(&format!("Country {:02}", (i * 7) % 30), "Europe", i as f64))
        .collect();

    for order in [SortOrder::Ascending, SortOrder::Descending] {
        let sorted = derive_filtered(&records, CountryFilter::All, order);
        assert_eq!(sorted.len(), records.len());

        let mut expected: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &records {
            *expected.entry(record.name.as_str()).or_default() += 1;
        }
        let mut actual: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &sorted {
            *actual.entry(record.name.as_str()).or_default() += 1;
        }
        assert_eq!(actual, expected);
    }
}

#[test]
fn toggling_sort_keeps_the_current_page() {
    init_logging();
    let records: Vec<Country> = (0..25)
        .map(|i| country(&format!("Country {i:02}"), "Europe", 100.0 + i as f64))
        .collect();
    let state = loaded(records);

    let (state, _) = update(state, Msg::PageSelected(2));
    assert_eq!(state.view().current_page, 2);

    // Order changes, membership does not, so the page index survives.
    let (state, _) = update(state, Msg::SortToggled);
    assert_eq!(state.view().current_page, 2);
    assert_eq!(state.view().page_count, 3);
}

#[test]
fn names_equal_after_folding_order_deterministically() {
    // Distinct names with identical collation keys fall back to raw string
    // order, so repeated derives agree.
    let records = vec![
        country("Åland", "Europe", 1.0),
        country("Aland", "Europe", 2.0),
    ];
    let first = derive_filtered(&records, CountryFilter::All, SortOrder::Ascending);
    let second = derive_filtered(&records, CountryFilter::All, SortOrder::Ascending);
    let names: Vec<&str> = first.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Aland", "Åland"]);
    assert_eq!(first, second);
}
