pub mod formats;
pub mod gps;
pub mod metadata;

use std::path::Path;

use crate::models::{LocationReport, TagMap};

/// Runs the whole per-request pipeline for one stored upload: extract the
/// tag map, resolve the GPS block, and assemble the report handed to the
/// presentation layer. Pure composition; failure modes are already baked
/// into the extractor and resolver contracts.
pub fn inspect(path: &Path, filename: &str) -> LocationReport {
    let metadata = metadata::extract(path);
    let resolution = gps::resolve(&metadata);

    let (gps, latitude, longitude, map_url) = match resolution {
        Some(res) => (Some(res.tags), res.latitude, res.longitude, res.map_url),
        None => (None, None, None, None),
    };

    let metadata: TagMap = metadata
        .into_iter()
        .filter(|(key, _)| key != metadata::GPS_KEY)
        .collect();

    LocationReport {
        filename: filename.to_string(),
        metadata,
        gps,
        latitude,
        longitude,
        map_url,
    }
}
