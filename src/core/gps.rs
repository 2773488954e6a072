use crate::core::metadata::GPS_KEY;
use crate::models::{TagMap, TagValue};

// Hemisphere letters that flip the coordinate sign. W/w also negates
// latitude and S/s also negates longitude; kept bug-for-bug compatible
// with the legacy resolver pending product confirmation.
const LATITUDE_NEGATING_REFS: [&str; 4] = ["S", "s", "W", "w"];
const LONGITUDE_NEGATING_REFS: [&str; 4] = ["W", "w", "S", "s"];

/// Decoded GPS block plus whatever could be derived from it. Every field
/// degrades independently; a missing or unparsable piece never takes the
/// rest down with it.
#[derive(Clone, Debug)]
pub struct GpsResolution {
    pub tags: TagMap,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_url: Option<String>,
}

/// Locates the GPS sub-directory in an extracted tag map and resolves it.
/// Returns `None` when the metadata carries no GPS block at all — a normal
/// outcome, not an error.
pub fn resolve(metadata: &TagMap) -> Option<GpsResolution> {
    let Some(TagValue::Nested(raw)) = metadata.get(GPS_KEY) else {
        return None;
    };

    let tags = decode_block(raw);
    let latitude = signed_coordinate(&tags, "GPSLatitude", "GPSLatitudeRef", &LATITUDE_NEGATING_REFS);
    let longitude = signed_coordinate(
        &tags,
        "GPSLongitude",
        "GPSLongitudeRef",
        &LONGITUDE_NEGATING_REFS,
    );
    let map_url = maps_url(latitude, longitude);

    Some(GpsResolution {
        tags,
        latitude,
        longitude,
        map_url,
    })
}

/// Rewrites raw numeric GPS tag ids to their names. Ids the table does not
/// know stay under their raw key.
fn decode_block(raw: &TagMap) -> TagMap {
    raw.iter()
        .map(|(key, value)| {
            let name = key
                .parse::<u16>()
                .ok()
                .and_then(gps_tag_name)
                .map(str::to_string)
                .unwrap_or_else(|| key.clone());
            (name, value.clone())
        })
        .collect()
}

fn signed_coordinate(
    tags: &TagMap,
    value_key: &str,
    ref_key: &str,
    negating_refs: &[&str],
) -> Option<f64> {
    let degrees = convert_to_degrees(tags.get(value_key)?)?;
    let negate = matches!(
        tags.get(ref_key),
        Some(TagValue::Text(r)) if negating_refs.contains(&r.as_str())
    );
    Some(if negate { -degrees } else { degrees })
}

/// Converts one raw coordinate value to decimal degrees, accepting every
/// shape cameras have been seen to write. Any shape or arithmetic problem
/// (short sequence, zero denominator, unparsable text) yields `None` —
/// conversion failure is silent by contract.
pub fn convert_to_degrees(value: &TagValue) -> Option<f64> {
    match value {
        TagValue::Rationals(parts) if parts.len() >= 3 => {
            let d = ratio(parts[0])?;
            let m = ratio(parts[1])?;
            let s = ratio(parts[2])?;
            Some(dms_to_decimal(d, m, s))
        }
        TagValue::Numbers(parts) if parts.len() >= 3 => {
            Some(dms_to_decimal(parts[0], parts[1], parts[2]))
        }
        TagValue::Integer(v) => Some(*v as f64),
        TagValue::Float(v) => Some(*v),
        TagValue::Text(s) => parse_text(s),
        _ => None,
    }
}

/// Convert DMS components to decimal degrees.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Map link for a resolved position; absent unless both coordinates are.
pub fn maps_url(latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(format!(
            "https://www.google.com/maps/search/?api=1&query={lat},{lon}"
        )),
        _ => None,
    }
}

fn ratio((numerator, denominator): (u32, u32)) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

fn parse_text(s: &str) -> Option<f64> {
    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() < 3 {
            return None;
        }
        let d: f64 = parts[0].trim().parse().ok()?;
        let m: f64 = parts[1].trim().parse().ok()?;
        let sec: f64 = parts[2].trim().parse().ok()?;
        Some(dms_to_decimal(d, m, sec))
    } else {
        s.trim().parse().ok()
    }
}

/// GPS IFD tag id to name table.
fn gps_tag_name(id: u16) -> Option<&'static str> {
    let name = match id {
        0x0000 => "GPSVersionID",
        0x0001 => "GPSLatitudeRef",
        0x0002 => "GPSLatitude",
        0x0003 => "GPSLongitudeRef",
        0x0004 => "GPSLongitude",
        0x0005 => "GPSAltitudeRef",
        0x0006 => "GPSAltitude",
        0x0007 => "GPSTimeStamp",
        0x0008 => "GPSSatellites",
        0x0009 => "GPSStatus",
        0x000A => "GPSMeasureMode",
        0x000B => "GPSDOP",
        0x000C => "GPSSpeedRef",
        0x000D => "GPSSpeed",
        0x000E => "GPSTrackRef",
        0x000F => "GPSTrack",
        0x0010 => "GPSImgDirectionRef",
        0x0011 => "GPSImgDirection",
        0x0012 => "GPSMapDatum",
        0x0013 => "GPSDestLatitudeRef",
        0x0014 => "GPSDestLatitude",
        0x0015 => "GPSDestLongitudeRef",
        0x0016 => "GPSDestLongitude",
        0x0017 => "GPSDestBearingRef",
        0x0018 => "GPSDestBearing",
        0x0019 => "GPSDestDistanceRef",
        0x001A => "GPSDestDistance",
        0x001B => "GPSProcessingMethod",
        0x001C => "GPSAreaInformation",
        0x001D => "GPSDateStamp",
        0x001E => "GPSDifferential",
        0x001F => "GPSHPositioningError",
        _ => return None,
    };

    Some(name)
}
