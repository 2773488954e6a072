use std::path::Path;

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata as ExifMetadata;

use crate::models::{TagMap, TagValue};

/// Key under which the raw GPS sub-directory is stored in the extracted map.
pub const GPS_KEY: &str = "GPSInfo";

/// Key used for the single placeholder entry when the decode itself fails.
pub const ERROR_KEY: &str = "Error";

/// Highest tag id defined in the GPS IFD. Ids at or below this never occur
/// in the main image directories, so unknown tags in this range are routed
/// into the GPS block.
const GPS_IFD_MAX_ID: u16 = 0x001F;

/// Reads the EXIF directory of the image at `path` into a flat tag map.
///
/// Extraction never fails: if the file cannot be decoded the returned map
/// contains a single `"Error"` entry carrying the stringified cause, and the
/// caller renders whatever it got.
pub fn extract(path: &Path) -> TagMap {
    match ExifMetadata::new_from_path(path) {
        Ok(exif) => collect_tags(&exif),
        Err(err) => {
            let mut map = TagMap::new();
            map.insert(ERROR_KEY.to_string(), TagValue::Text(err.to_string()));
            map
        }
    }
}

fn collect_tags(exif: &ExifMetadata) -> TagMap {
    let mut map = TagMap::new();
    let mut gps = TagMap::new();

    for tag in exif {
        let id = tag.as_u16();

        // GPS sub-IFD entries keep their raw numeric ids here; the resolver
        // decodes them through the GPS tag name table.
        match tag {
            ExifTag::GPSLatitudeRef(s) | ExifTag::GPSLongitudeRef(s) => {
                gps.insert(id.to_string(), TagValue::Text(clean_string(s)));
                continue;
            }
            ExifTag::GPSLatitude(v) | ExifTag::GPSLongitude(v) | ExifTag::GPSAltitude(v) => {
                gps.insert(id.to_string(), rational_value(v));
                continue;
            }
            ExifTag::GPSAltitudeRef(v) => {
                gps.insert(
                    id.to_string(),
                    TagValue::Integer(v.first().copied().unwrap_or(0) as i64),
                );
                continue;
            }
            _ => {}
        }

        // Internal IFD offset pointers and thumbnail bookkeeping
        if matches!(
            tag,
            ExifTag::ExifOffset(_)
                | ExifTag::GPSInfo(_)
                | ExifTag::InteropOffset(_)
                | ExifTag::ThumbnailOffset(..)
                | ExifTag::ThumbnailLength(_)
                | ExifTag::StripOffsets(..)
                | ExifTag::StripByteCounts(_)
        ) {
            continue;
        }

        if id <= GPS_IFD_MAX_ID {
            if let Some(value) = unknown_value(tag) {
                gps.insert(id.to_string(), value);
                continue;
            }
        }

        if let Some((name, value)) = tag_entry(tag) {
            map.insert(name, value);
        }
    }

    if !gps.is_empty() {
        map.insert(GPS_KEY.to_string(), TagValue::Nested(gps));
    }

    map
}

// ---------------------------------------------------------------------------
// EXIF tag naming
// ---------------------------------------------------------------------------

/// Resolves one decoded tag to its human-readable name and raw value.
/// Unknown tags keep their raw numeric id, formatted as `0xNNNN`.
fn tag_entry(tag: &ExifTag) -> Option<(String, TagValue)> {
    if let Some(value) = unknown_value(tag) {
        return Some((format!("0x{:04X}", tag.as_u16()), value));
    }

    let (name, value) = match tag {
        // -- String tags --
        ExifTag::Make(s) => ("Make", TagValue::Text(clean_string(s))),
        ExifTag::Model(s) => ("Model", TagValue::Text(clean_string(s))),
        ExifTag::Software(s) => ("Software", TagValue::Text(clean_string(s))),
        ExifTag::Artist(s) => ("Artist", TagValue::Text(clean_string(s))),
        ExifTag::Copyright(s) => ("Copyright", TagValue::Text(clean_string(s))),
        ExifTag::ImageDescription(s) => ("ImageDescription", TagValue::Text(clean_string(s))),
        ExifTag::LensMake(s) => ("LensMake", TagValue::Text(clean_string(s))),
        ExifTag::LensModel(s) => ("LensModel", TagValue::Text(clean_string(s))),
        ExifTag::LensSerialNumber(s) => ("LensSerialNumber", TagValue::Text(clean_string(s))),
        ExifTag::OwnerName(s) => ("OwnerName", TagValue::Text(clean_string(s))),
        ExifTag::SerialNumber(s) => ("SerialNumber", TagValue::Text(clean_string(s))),

        // -- Date/time tags --
        ExifTag::DateTimeOriginal(s) => ("DateTimeOriginal", TagValue::Text(clean_string(s))),
        ExifTag::CreateDate(s) => ("CreateDate", TagValue::Text(clean_string(s))),
        ExifTag::ModifyDate(s) => ("ModifyDate", TagValue::Text(clean_string(s))),
        ExifTag::OffsetTime(s) => ("OffsetTime", TagValue::Text(clean_string(s))),
        ExifTag::OffsetTimeOriginal(s) => ("OffsetTimeOriginal", TagValue::Text(clean_string(s))),
        ExifTag::OffsetTimeDigitized(s) => {
            ("OffsetTimeDigitized", TagValue::Text(clean_string(s)))
        }
        ExifTag::SubSecTime(s) => ("SubSecTime", TagValue::Text(clean_string(s))),
        ExifTag::SubSecTimeOriginal(s) => ("SubSecTimeOriginal", TagValue::Text(clean_string(s))),
        ExifTag::SubSecTimeDigitized(s) => {
            ("SubSecTimeDigitized", TagValue::Text(clean_string(s)))
        }

        // -- Small integer tags --
        ExifTag::Orientation(v) => ("Orientation", first_u16(v)),
        ExifTag::ISO(v) => ("ISO", first_u16(v)),
        ExifTag::ExposureProgram(v) => ("ExposureProgram", first_u16(v)),
        ExifTag::MeteringMode(v) => ("MeteringMode", first_u16(v)),
        ExifTag::Flash(v) => ("Flash", first_u16(v)),
        ExifTag::ColorSpace(v) => ("ColorSpace", first_u16(v)),
        ExifTag::ExposureMode(v) => ("ExposureMode", first_u16(v)),
        ExifTag::WhiteBalance(v) => ("WhiteBalance", first_u16(v)),
        ExifTag::SceneCaptureType(v) => ("SceneCaptureType", first_u16(v)),
        ExifTag::Contrast(v) => ("Contrast", first_u16(v)),
        ExifTag::Saturation(v) => ("Saturation", first_u16(v)),
        ExifTag::Sharpness(v) => ("Sharpness", first_u16(v)),
        ExifTag::LightSource(v) => ("LightSource", first_u16(v)),
        ExifTag::FocalLengthIn35mmFormat(v) => ("FocalLengthIn35mmFormat", first_u16(v)),
        ExifTag::Compression(v) => ("Compression", first_u16(v)),
        ExifTag::ResolutionUnit(v) => ("ResolutionUnit", first_u16(v)),
        ExifTag::SensingMethod(v) => ("SensingMethod", first_u16(v)),
        ExifTag::CustomRendered(v) => ("CustomRendered", first_u16(v)),
        ExifTag::GainControl(v) => ("GainControl", first_u16(v)),
        ExifTag::SubjectDistanceRange(v) => ("SubjectDistanceRange", first_u16(v)),

        ExifTag::ImageWidth(v) => (
            "ImageWidth",
            TagValue::Integer(v.first().copied().unwrap_or(0) as i64),
        ),
        ExifTag::ImageHeight(v) => (
            "ImageHeight",
            TagValue::Integer(v.first().copied().unwrap_or(0) as i64),
        ),

        // -- Unsigned rational tags --
        ExifTag::ExposureTime(v) => ("ExposureTime", first_rational(v)?),
        ExifTag::FNumber(v) => ("FNumber", first_rational(v)?),
        ExifTag::FocalLength(v) => ("FocalLength", first_rational(v)?),
        ExifTag::ApertureValue(v) => ("ApertureValue", first_rational(v)?),
        ExifTag::MaxApertureValue(v) => ("MaxApertureValue", first_rational(v)?),
        ExifTag::XResolution(v) => ("XResolution", first_rational(v)?),
        ExifTag::YResolution(v) => ("YResolution", first_rational(v)?),
        ExifTag::SubjectDistance(v) => ("SubjectDistance", first_rational(v)?),
        ExifTag::DigitalZoomRatio(v) => ("DigitalZoomRatio", first_rational(v)?),
        ExifTag::CompressedBitsPerPixel(v) => ("CompressedBitsPerPixel", first_rational(v)?),
        ExifTag::LensInfo(v) if !v.is_empty() => ("LensInfo", rational_value(v)),

        // -- Signed rational tags, surfaced as floats --
        ExifTag::ShutterSpeedValue(v) => {
            let r = v.first()?;
            let value = if r.denominator != 0 {
                r.nominator as f64 / r.denominator as f64
            } else {
                0.0
            };
            ("ShutterSpeedValue", TagValue::Float(value))
        }
        ExifTag::BrightnessValue(v) => {
            let r = v.first()?;
            let value = if r.denominator != 0 {
                r.nominator as f64 / r.denominator as f64
            } else {
                0.0
            };
            ("BrightnessValue", TagValue::Float(value))
        }
        ExifTag::ExposureCompensation(v) => {
            let r = v.first()?;
            let value = if r.denominator != 0 {
                r.nominator as f64 / r.denominator as f64
            } else {
                0.0
            };
            ("ExposureCompensation", TagValue::Float(value))
        }

        // -- Opaque / versioned tags --
        ExifTag::MakerNote(v) => ("MakerNote", TagValue::Binary(v.clone())),
        ExifTag::ComponentsConfiguration(v) => {
            ("ComponentsConfiguration", TagValue::Binary(v.clone()))
        }
        ExifTag::ExifVersion(v) => {
            ("ExifVersion", TagValue::Text(String::from_utf8_lossy(v).to_string()))
        }
        ExifTag::FlashpixVersion(v) => (
            "FlashpixVersion",
            TagValue::Text(String::from_utf8_lossy(v).to_string()),
        ),

        _ => return None,
    };

    Some((name.to_string(), value))
}

/// Values for the `Unknown*` variants, which carry the raw tag id alongside
/// the undecoded payload.
fn unknown_value(tag: &ExifTag) -> Option<TagValue> {
    let value = match tag {
        ExifTag::UnknownSTRING(s, ..) => TagValue::Text(clean_string(s)),
        ExifTag::UnknownINT8U(v, ..) => TagValue::Binary(v.clone()),
        ExifTag::UnknownINT16U(v, ..) => integer_sequence(v.iter().map(|n| *n as i64)),
        ExifTag::UnknownINT32U(v, ..) => integer_sequence(v.iter().map(|n| *n as i64)),
        ExifTag::UnknownRATIONAL64U(v, ..) => rational_value(v),
        ExifTag::UnknownRATIONAL64S(v, ..) => {
            let floats: Vec<f64> = v
                .iter()
                .map(|r| {
                    if r.denominator != 0 {
                        r.nominator as f64 / r.denominator as f64
                    } else {
                        0.0
                    }
                })
                .collect();

            if floats.len() == 1 {
                TagValue::Float(floats[0])
            } else {
                TagValue::Numbers(floats)
            }
        }
        ExifTag::UnknownUNDEF(v, ..) => TagValue::Binary(v.clone()),
        _ => return None,
    };

    Some(value)
}

// ---------------------------------------------------------------------------
// Value shaping helpers
// ---------------------------------------------------------------------------

fn first_u16(values: &[u16]) -> TagValue {
    TagValue::Integer(values.first().copied().unwrap_or(0) as i64)
}

fn first_rational(values: &[little_exif::rational::uR64]) -> Option<TagValue> {
    let r = values.first()?;
    Some(TagValue::Rational(r.nominator, r.denominator))
}

fn rational_value(values: &[little_exif::rational::uR64]) -> TagValue {
    if values.len() == 1 {
        TagValue::Rational(values[0].nominator, values[0].denominator)
    } else {
        TagValue::Rationals(
            values
                .iter()
                .map(|r| (r.nominator, r.denominator))
                .collect(),
        )
    }
}

fn integer_sequence<I: IntoIterator<Item = i64>>(values: I) -> TagValue {
    let values: Vec<i64> = values.into_iter().collect();
    if values.len() == 1 {
        TagValue::Integer(values[0])
    } else {
        TagValue::Numbers(values.into_iter().map(|n| n as f64).collect())
    }
}

fn clean_string(s: &str) -> String {
    s.trim_end_matches('\0').trim().to_string()
}
