/// Side effects requested by `update`, executed by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Issue the one outbound read against the country data source.
    FetchCountries,
}
