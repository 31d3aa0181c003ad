//! Shared types written to the JSON manifests.
//!
//! The web gallery reads these files directly, so field names and key order
//! are part of the output format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gallery category inferred from the folder path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Deportiva,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::General => f.write_str("general"),
            Category::Deportiva => f.write_str("deportiva"),
        }
    }
}

/// Sport of a `deportiva` folder. Serialized with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sport {
    #[serde(rename = "Fútbol Sala")]
    FutbolSala,
    #[serde(rename = "Baloncesto")]
    Baloncesto,
    #[serde(rename = "Surf")]
    Surf,
    #[serde(rename = "Rugby")]
    Rugby,
    #[serde(rename = "Atletismo")]
    Atletismo,
    #[serde(rename = "Tenis")]
    Tenis,
    #[serde(rename = "Ciclismo")]
    Ciclismo,
}

impl Sport {
    pub fn name(self) -> &'static str {
        match self {
            Sport::FutbolSala => "Fútbol Sala",
            Sport::Baloncesto => "Baloncesto",
            Sport::Surf => "Surf",
            Sport::Rugby => "Rugby",
            Sport::Atletismo => "Atletismo",
            Sport::Tenis => "Tenis",
            Sport::Ciclismo => "Ciclismo",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendar date as the zero-padded strings the gallery filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

/// One successfully processed photo.
///
/// Key order matches what the gallery front-end has always received.
/// `sport` is omitted entirely (not `null`) when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Web-relative path of the optimized copy (`optimized/...`)
    pub src: String,
    /// Web-relative path of the thumbnail (`thumbs/...`)
    pub thumb: String,
    pub title: String,
    pub category: Category,
    pub event: String,
    pub year: String,
    pub month: String,
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<Sport>,
}

/// Summary of one source folder's contribution, keyed by folder id in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDescriptor {
    /// Folder path relative to the source root, forward slashes.
    pub path: String,
    pub event: String,
    pub category: Category,
    /// Serialized as `null` when the folder has no sport.
    pub sport: Option<Sport>,
    /// Manifest path relative to the output root (`json/<id>.json`).
    pub json_file: String,
    pub photo_count: usize,
}
