mod report;
mod tag;

pub use report::LocationReport;
pub use tag::{TagMap, TagValue};
