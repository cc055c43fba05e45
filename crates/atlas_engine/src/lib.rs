//! Atlas engine: country download and decode pipeline.
mod engine;
mod decode;
mod fetch;
mod types;

pub use engine::EngineHandle;
pub use decode::{decode_countries, DecodeError, DecodedCountries};
pub use fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
pub use types::{
    CountryRecord, EngineEvent, FetchError, FetchMetadata, FetchOutput, FailureKind, LoadOutcome,
    LoadProgress, Stage,
};
