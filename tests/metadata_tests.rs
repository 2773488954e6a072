use std::fs;
use std::path::Path;

use geopeek::core::metadata::{extract, ERROR_KEY};
use geopeek::core::{formats, inspect};
use geopeek::models::TagValue;

#[test]
fn missing_file_reports_single_error_entry() {
    let metadata = extract(Path::new("/definitely/not/here.jpg"));

    assert_eq!(metadata.len(), 1);
    let Some(TagValue::Text(message)) = metadata.get(ERROR_KEY) else {
        panic!("expected an Error text entry, got {metadata:?}");
    };
    assert!(!message.is_empty());
}

#[test]
fn undecodable_file_reports_error_instead_of_panicking() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.jpg");
    fs::write(&path, b"this is not an image at all").expect("write");

    let metadata = extract(&path);
    assert!(metadata.contains_key(ERROR_KEY), "got {metadata:?}");
}

#[test]
fn inspect_on_undecodable_file_yields_empty_location() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.jpg");
    fs::write(&path, b"garbage bytes").expect("write");

    let report = inspect(&path, "broken.jpg");

    assert_eq!(report.filename, "broken.jpg");
    assert!(report.metadata.contains_key(ERROR_KEY));
    assert!(report.gps.is_none());
    assert!(report.latitude.is_none());
    assert!(report.longitude.is_none());
    assert!(report.map_url.is_none());
}

#[test]
fn report_serializes_to_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.jpg");
    fs::write(&path, b"garbage bytes").expect("write");

    let report = inspect(&path, "broken.jpg");
    let json = serde_json::to_value(&report).expect("serialize");

    assert_eq!(json["filename"], "broken.jpg");
    assert!(json["latitude"].is_null());
    assert!(json["map_url"].is_null());
}

#[test]
fn upload_allow_list_matches_the_supported_extensions() {
    for name in [
        "photo.png",
        "photo.jpg",
        "photo.JPEG",
        "scan.tiff",
        "shot.BMP",
    ] {
        assert!(formats::is_allowed(name), "{name} should be allowed");
    }

    for name in ["photo.gif", "photo.tif", "archive.zip", "README", "photo."] {
        assert!(!formats::is_allowed(name), "{name} should be rejected");
    }
}

#[test]
fn detect_format_reads_the_extension_case_insensitively() {
    assert_eq!(formats::detect_format("a.JpG"), formats::UploadFormat::Jpeg);
    assert_eq!(formats::detect_format("a.png"), formats::UploadFormat::Png);
    assert!(formats::detect_format("noext").is_unknown());
}
