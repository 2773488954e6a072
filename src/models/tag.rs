use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat mapping from a human-readable tag name to its raw value, as produced
/// by one image decode. Never mutated after extraction.
pub type TagMap = BTreeMap<String, TagValue>;

/// Raw EXIF tag value. The shapes mirror what camera firmware actually
/// writes: single numbers, rational pairs, sequences of either, text,
/// opaque bytes, and the nested GPS sub-directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Rational(u32, u32),
    Rationals(Vec<(u32, u32)>),
    Numbers(Vec<f64>),
    Binary(Vec<u8>),
    Nested(TagMap),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Rational(n, d) => write!(f, "{n}/{d}"),
            Self::Rationals(parts) => {
                let joined = parts
                    .iter()
                    .map(|(n, d)| format!("{n}/{d}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{joined}")
            }
            Self::Numbers(parts) => {
                let joined = parts
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{joined}")
            }
            Self::Binary(v) => write!(f, "<{} bytes>", v.len()),
            Self::Nested(map) => write!(f, "<{} tags>", map.len()),
        }
    }
}
