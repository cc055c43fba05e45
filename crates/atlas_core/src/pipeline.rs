//! Pure derive pipeline: membership filter, name sort, pagination.
//!
//! Every function here is a total function of its arguments; the state
//! record calls into this module to derive the visible page and never
//! stores derived data.

use std::cmp::Ordering;

use crate::country::{Country, CountryFilter, SortOrder, LITHUANIA_AREA_SQ_KM, OCEANIA_REGION};

/// Maximum number of records per page; the last page may hold fewer.
pub const PAGE_SIZE: usize = 10;

/// Collation key for name comparison: Unicode transliterated to ASCII and
/// lowercased, so accents and case do not split the alphabet the way raw
/// byte order would ("Åland" sorts with "Aland", not after "Zimbabwe").
pub fn collation_key(name: &str) -> String {
    deunicode::deunicode(name).to_lowercase()
}

/// Case- and accent-aware name comparison. Folded keys decide; raw string
/// order breaks fold ties so the ordering stays total and deterministic.
/// Identical names compare equal and keep their prior relative order under
/// a stable sort.
fn compare_names(a: &Country, b: &Country) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.cmp(&b.name))
}

/// Records passing the membership filter, in their incoming order.
pub fn apply_filter(countries: &[Country], filter: CountryFilter) -> Vec<Country> {
    countries
        .iter()
        .filter(|country| match filter {
            CountryFilter::All => true,
            CountryFilter::Oceania => country.region == OCEANIA_REGION,
            CountryFilter::SmallerThanLithuania => country.area_sq_km < LITHUANIA_AREA_SQ_KM,
        })
        .cloned()
        .collect()
}

/// Stable name sort in the requested direction.
pub fn sort_by_name(mut countries: Vec<Country>, order: SortOrder) -> Vec<Country> {
    match order {
        SortOrder::Ascending => countries.sort_by(compare_names),
        // Swapped arguments reverse the direction while ties stay Equal,
        // so the stable sort still preserves prior order of equal names.
        SortOrder::Descending => countries.sort_by(|a, b| compare_names(b, a)),
    }
    countries
}

/// The full derive: filter membership, then order by name.
pub fn derive_filtered(
    countries: &[Country],
    filter: CountryFilter,
    order: SortOrder,
) -> Vec<Country> {
    sort_by_name(apply_filter(countries, filter), order)
}

/// Number of pages needed for `filtered_len` records; zero for an empty set.
pub fn page_count(filtered_len: usize) -> usize {
    filtered_len.div_ceil(PAGE_SIZE)
}

/// The records visible on `page` (zero-based). Out-of-range pages yield an
/// empty slice rather than panicking.
pub fn visible_slice(filtered: &[Country], page: usize) -> &[Country] {
    let start = page.saturating_mul(PAGE_SIZE);
    if start >= filtered.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

#[cfg(test)]
mod tests {
    use super::{collation_key, page_count, visible_slice, PAGE_SIZE};
    use crate::country::Country;

    fn country(name: &str) -> Country {
        Country {
            name: name.to_string(),
            region: "Europe".to_string(),
            area_sq_km: 1.0,
            flag_url: "https://flags.example/x.svg".to_string(),
        }
    }

    #[test]
    fn collation_key_folds_accents_and_case() {
        assert_eq!(collation_key("Åland Islands"), "aland islands");
        assert_eq!(collation_key("Côte d'Ivoire"), "cote d'ivoire");
        assert_eq!(collation_key("ZIMBABWE"), "zimbabwe");
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(PAGE_SIZE), 1);
        assert_eq!(page_count(PAGE_SIZE + 1), 2);
        assert_eq!(page_count(3 * PAGE_SIZE), 3);
    }

    #[test]
    fn visible_slice_clamps_to_data() {
        let data: Vec<Country> = (0..12).map(|i| country(&format!("c{i:02}"))).collect();
        assert_eq!(visible_slice(&data, 0).len(), PAGE_SIZE);
        assert_eq!(visible_slice(&data, 1).len(), 2);
        assert!(visible_slice(&data, 2).is_empty());
        assert!(visible_slice(&[], 0).is_empty());
    }
}
