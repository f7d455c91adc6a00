use crate::entities::Confidence;

/// Non-negative integer from provider text. Accepts "123" and "123.4".
pub fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();

    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }

    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64)
}

pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Like [`parse_count`], but falls back to 0 and marks the result as
/// defaulted instead of failing.
pub fn coerce_count(raw: &str, field: &str, confidence: &mut Confidence) -> u64 {
    match parse_count(raw) {
        Some(n) => n,
        None => {
            tracing::warn!(field, raw, "non-numeric provider value read as 0");
            *confidence = Confidence::Defaulted;
            0
        }
    }
}

pub fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
