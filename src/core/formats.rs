pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UploadFormat {
    Png,
    Jpeg,
    Tiff,
    Bmp,
    Unknown,
}

impl UploadFormat {
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Tiff => "TIFF",
            Self::Bmp => "BMP",
            Self::Unknown => "Unknown",
        }
    }
}

/// Classifies an upload by its filename extension. A name without a dot has
/// no extension and is never accepted.
pub fn detect_format(filename: &str) -> UploadFormat {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return UploadFormat::Unknown;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => UploadFormat::Jpeg,
        "png" => UploadFormat::Png,
        "tiff" => UploadFormat::Tiff,
        "bmp" => UploadFormat::Bmp,
        _ => UploadFormat::Unknown,
    }
}

pub fn is_allowed(filename: &str) -> bool {
    !detect_format(filename).is_unknown()
}
