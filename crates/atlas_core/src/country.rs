/// Approximate area of Lithuania in square kilometers, used as the fixed
/// threshold for the area filter.
pub const LITHUANIA_AREA_SQ_KM: f64 = 65_300.0;

/// Region string matched by the Oceania filter. Exact, case-sensitive,
/// as delivered by the data source.
pub const OCEANIA_REGION: &str = "Oceania";

/// One country as delivered by the data source and displayed by the browser.
///
/// `name` is unique within a session's dataset; nothing else identifies a
/// record. The area unit is square kilometers.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: String,
    pub region: String,
    pub area_sq_km: f64,
    pub flag_url: String,
}

/// Direction of the alphabetical name sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction; used by the sort toggle.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Membership filter applied before sorting and pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryFilter {
    /// Keep every record.
    #[default]
    All,
    /// Keep records whose region is exactly [`OCEANIA_REGION`].
    Oceania,
    /// Keep records strictly smaller than [`LITHUANIA_AREA_SQ_KM`].
    SmallerThanLithuania,
}
