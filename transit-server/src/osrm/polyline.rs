//! Encoded polyline codec.
//!
//! Each coordinate is stored as a delta from the previous one, scaled by
//! 1e5, zig-zag encoded and split into 5-bit chunks offset by 63. Latitude
//! comes first in every pair.

use crate::domain::Coordinate;

const PRECISION: f64 = 1e5;

/// Error decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// A byte outside the `?`..`~` alphabet
    #[error("invalid character at byte {0}")]
    InvalidCharacter(usize),

    /// The string ended in the middle of a value or pair
    #[error("truncated polyline")]
    Truncated,

    /// A value or running coordinate does not fit in 64 bits
    #[error("polyline value out of range")]
    Overflow,
}

/// Read one zig-zag encoded value starting at `*pos`.
fn read_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*pos).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter(*pos));
        }
        // Twelve chunks carry 60 bits; a thirteenth would spill past 63.
        if shift >= 60 {
            return Err(PolylineError::Overflow);
        }
        *pos += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Decode a polyline into coordinates.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coordinates = Vec::new();

    while pos < bytes.len() {
        lat = lat
            .checked_add(read_value(bytes, &mut pos)?)
            .ok_or(PolylineError::Overflow)?;
        if pos >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        lng = lng
            .checked_add(read_value(bytes, &mut pos)?)
            .ok_or(PolylineError::Overflow)?;

        coordinates.push(Coordinate::new(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(coordinates)
}

fn write_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}

/// Encode coordinates as a polyline.
pub fn encode(coordinates: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for c in coordinates {
        let lat = (c.lat * PRECISION).round() as i64;
        let lng = (c.lng * PRECISION).round() as i64;
        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}
