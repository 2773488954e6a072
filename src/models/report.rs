use serde::{Deserialize, Serialize};

use crate::models::TagMap;

/// Everything the result page needs for one uploaded photo: the metadata
/// table (with the GPS sub-directory split out), the decoded GPS block, the
/// signed decimal coordinates, and the map link when both are known.
/// Built once per request and discarded after rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationReport {
    pub filename: String,
    pub metadata: TagMap,
    pub gps: Option<TagMap>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_url: Option<String>,
}
