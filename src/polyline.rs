use crate::entities::Coordinates;

/// Decodes a `"lng,lat;lng,lat;..."` path into `(lat, lng)` pairs.
///
/// Chunks that are not exactly two finite, in-range numbers are skipped. When
/// no chunk decodes, the string is read as a flat list of numbers and
/// consecutive numbers are paired as `lng, lat`. Never fails; garbage in
/// gives an empty path out.
pub fn decode(encoded: &str) -> Vec<(f64, f64)> {
    decode_coordinates(encoded)
        .into_iter()
        .map(|c| (c.lat, c.lng))
        .collect()
}

fn decode_coordinates(encoded: &str) -> Vec<Coordinates> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return vec![];
    }

    let points: Vec<Coordinates> = encoded.split(';').filter_map(decode_chunk).collect();

    if !points.is_empty() {
        return points;
    }

    decode_flat(encoded)
}

fn decode_chunk(chunk: &str) -> Option<Coordinates> {
    let mut parts = chunk.split(',');

    let lng = parts.next()?.trim().parse::<f64>().ok()?;
    let lat = parts.next()?.trim().parse::<f64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    let coordinates = Coordinates::new(lng, lat);
    coordinates.is_valid().then_some(coordinates)
}

fn decode_flat(encoded: &str) -> Vec<Coordinates> {
    let numbers: Vec<f64> = encoded
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .collect();

    numbers
        .chunks_exact(2)
        .map(|pair| Coordinates::new(pair[0], pair[1]))
        .filter(Coordinates::is_valid)
        .collect()
}
