//! Derived record fields: progress, location, identifiers

use sha2::{Digest, Sha256};

/// Markers searched for, in order, inside an investment name
const LOCATION_MARKERS: [&str; 2] = ["DISTRITO", "PROVINCIA"];

/// Parse a numeric cell; blank, malformed and non-finite values are `None`
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accrued spend over updated cost as a percentage, rounded to 2 decimals
///
/// Yields 0.0 when the cost is not positive or either value is not a number.
pub fn calculate_progress(devengado_acumulado: &str, costo_actualizado: &str) -> f64 {
    match (
        parse_number(devengado_acumulado),
        parse_number(costo_actualizado),
    ) {
        (Some(devengado), Some(costo)) if costo > 0.0 => round2(devengado / costo * 100.0),
        _ => 0.0,
    }
}

/// Half-way cases go to the even neighbour: 0.125 -> 0.12, 0.375 -> 0.38
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Guess a location from the investment name
///
/// Takes the upper-cased text following the first `DISTRITO` (else
/// `PROVINCIA`) marker, up to the next comma or repeat of the marker.
pub fn extract_location(investment_name: &str, default_region: &str) -> String {
    let upper = investment_name.to_uppercase();

    for marker in LOCATION_MARKERS {
        if let Some(pos) = upper.find(marker) {
            let rest = &upper[pos + marker.len()..];
            let segment = rest.split(marker).next().unwrap_or(rest);
            let segment = segment.split(',').next().unwrap_or(segment);
            return segment.trim().to_string();
        }
    }

    default_region.to_string()
}

/// Record id salted with a timestamp; not stable across runs
pub fn project_id(prefix: &str, name: &str, timestamp_millis: i64) -> String {
    format!("{}{}", prefix, short_hash(&format!("{}{}", name, timestamp_millis)))
}

/// Category id derived from the name alone
pub fn category_id(name: &str) -> String {
    short_hash(name)
}

/// First 8 hex characters of the SHA-256 digest
fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(&digest[..4])
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
