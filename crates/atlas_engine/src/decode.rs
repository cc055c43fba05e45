use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::CountryRecord;

/// Validated records plus the count of malformed elements dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCountries {
    pub records: Vec<CountryRecord>,
    pub dropped: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("payload is not a JSON array")]
    NotAnArray,
    #[error("payload held no usable record ({dropped} malformed elements dropped)")]
    NoUsableRecords { dropped: usize },
}

/// Wire shape of one array element. Every field is optional so a partial
/// object deserializes and fails validation on its own instead of failing
/// the whole array.
#[derive(Debug, Deserialize)]
struct RawCountry {
    name: Option<String>,
    region: Option<String>,
    area: Option<f64>,
    flag: Option<String>,
}

/// Decode a JSON payload into country records.
///
/// Malformed elements are dropped and counted rather than failing the load.
/// The payload as a whole is an error only when it is not JSON, not an
/// array, or yields nothing but malformed elements.
pub fn decode_countries(bytes: &[u8]) -> Result<DecodedCountries, DecodeError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::InvalidJson(err.to_string()))?;
    let Value::Array(items) = root else {
        return Err(DecodeError::NotAnArray);
    };

    let mut records = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in items {
        match serde_json::from_value::<RawCountry>(item) {
            Ok(raw) => match validate(raw) {
                Some(record) => records.push(record),
                None => dropped += 1,
            },
            Err(_) => dropped += 1,
        }
    }

    if records.is_empty() && dropped > 0 {
        return Err(DecodeError::NoUsableRecords { dropped });
    }
    Ok(DecodedCountries { records, dropped })
}

/// A record is usable when all four fields are present and plausible: a
/// non-empty name, a region string, a finite non-negative area and a flag
/// reference that parses as an absolute URL.
fn validate(raw: RawCountry) -> Option<CountryRecord> {
    let name = raw.name.filter(|name| !name.trim().is_empty())?;
    let region = raw.region?;
    let area_sq_km = raw.area.filter(|area| area.is_finite() && *area >= 0.0)?;
    let flag_url = raw.flag.filter(|flag| Url::parse(flag).is_ok())?;
    Some(CountryRecord {
        name,
        region,
        area_sq_km,
        flag_url,
    })
}
