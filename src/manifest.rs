//! JSON manifests consumed by the web gallery.
//!
//! ## Output Structure
//!
//! ```text
//! <output>/
//! ├── photos-data.json        # every PhotoRecord, folder-then-file order
//! └── json/
//!     ├── index.json          # folder id → FolderDescriptor
//!     ├── makax-2024.json     # PhotoRecords of one folder
//!     └── futbol-sala-2023.json
//! ```
//!
//! All files are pretty-printed with a 4-space indent and UTF-8 text written
//! as-is (`"Fútbol Sala"`, not `"F\u00fatbol Sala"`).
//!
//! `generated_at` in the index holds the working directory the tool ran
//! from, as it always has. It is not a timestamp.

use crate::types::{FolderDescriptor, PhotoRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directory (below the output root) holding per-folder manifests and the index.
pub const JSON_DIR: &str = "json";
/// Aggregate manifest file name, at the output root.
pub const AGGREGATE_FILE: &str = "photos-data.json";
/// Index manifest file name, inside [`JSON_DIR`].
pub const INDEX_FILE: &str = "index.json";

/// Contents of `json/index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub folders: BTreeMap<String, FolderDescriptor>,
    pub total_folders: usize,
    pub generated_at: String,
}

impl IndexManifest {
    pub fn new(folders: BTreeMap<String, FolderDescriptor>, generated_at: String) -> Self {
        Self {
            total_folders: folders.len(),
            folders,
            generated_at,
        }
    }
}

/// Serialize with a 4-space indent.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, ManifestError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_string(value)?)?;
    Ok(())
}

/// Manifest path of a folder, relative to the output root (`json/<id>.json`).
pub fn folder_manifest_path(folder_id: &str) -> String {
    format!("{JSON_DIR}/{folder_id}.json")
}

/// Write one folder's records to `json/<id>.json`, replacing any earlier file.
///
/// Returns the manifest path relative to the output root.
pub fn write_folder_manifest(
    output_root: &Path,
    folder_id: &str,
    records: &[PhotoRecord],
) -> Result<String, ManifestError> {
    let relative = folder_manifest_path(folder_id);
    write_json(&output_root.join(&relative), records)?;
    Ok(relative)
}

/// Write every record to `photos-data.json`.
pub fn write_aggregate_manifest(
    output_root: &Path,
    records: &[PhotoRecord],
) -> Result<(), ManifestError> {
    write_json(&output_root.join(AGGREGATE_FILE), records)
}

/// Write `json/index.json`.
pub fn write_index_manifest(output_root: &Path, index: &IndexManifest) -> Result<(), ManifestError> {
    write_json(&output_root.join(JSON_DIR).join(INDEX_FILE), index)
}

/// The `generated_at` value: the current working directory as a string.
pub fn generated_at() -> String {
    std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Sport};
    use tempfile::TempDir;

    fn record(title: &str, sport: Option<Sport>) -> PhotoRecord {
        PhotoRecord {
            src: format!("optimized/f/{title}.jpg"),
            thumb: format!("thumbs/f/{title}.jpg"),
            title: title.to_string(),
            category: if sport.is_some() {
                Category::Deportiva
            } else {
                Category::General
            },
            event: "Evento".to_string(),
            year: "2024".to_string(),
            month: "01".to_string(),
            day: "01".to_string(),
            sport,
        }
    }

    #[test]
    fn json_uses_four_space_indent() {
        let json = to_json_string(&[record("A", None)]).unwrap();
        assert!(json.starts_with("[\n    {\n        \"src\": \"optimized/f/A.jpg\",\n"));
        assert!(json.ends_with("    }\n]"));
    }

    #[test]
    fn json_keeps_non_ascii_literal() {
        let json = to_json_string(&record("Señal", Some(Sport::FutbolSala))).unwrap();
        assert!(json.contains("\"sport\": \"Fútbol Sala\""));
        assert!(json.contains("\"title\": \"Señal\""));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn empty_list_serializes_compactly() {
        let records: Vec<PhotoRecord> = Vec::new();
        assert_eq!(to_json_string(&records).unwrap(), "[]");
    }

    #[test]
    fn folder_manifest_written_under_json_dir() {
        let tmp = TempDir::new().unwrap();
        let rel = write_folder_manifest(tmp.path(), "makax-2024", &[record("A", None)]).unwrap();

        assert_eq!(rel, "json/makax-2024.json");
        let content = fs::read_to_string(tmp.path().join(&rel)).unwrap();
        let parsed: Vec<PhotoRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![record("A", None)]);
    }

    #[test]
    fn folder_manifest_overwrites_same_id() {
        let tmp = TempDir::new().unwrap();
        write_folder_manifest(tmp.path(), "fotos", &[record("A", None)]).unwrap();
        write_folder_manifest(tmp.path(), "fotos", &[record("B", None)]).unwrap();

        let content = fs::read_to_string(tmp.path().join("json/fotos.json")).unwrap();
        let parsed: Vec<PhotoRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0].title, "B");
    }

    #[test]
    fn aggregate_manifest_at_output_root() {
        let tmp = TempDir::new().unwrap();
        let records = vec![record("A", None), record("B", Some(Sport::Surf))];
        write_aggregate_manifest(tmp.path(), &records).unwrap();

        let content = fs::read_to_string(tmp.path().join(AGGREGATE_FILE)).unwrap();
        let parsed: Vec<PhotoRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn index_counts_folders() {
        let tmp = TempDir::new().unwrap();
        let mut folders = BTreeMap::new();
        folders.insert(
            "makax-2024".to_string(),
            FolderDescriptor {
                path: "makax-2024".to_string(),
                event: "Makax".to_string(),
                category: Category::General,
                sport: None,
                json_file: "json/makax-2024.json".to_string(),
                photo_count: 2,
            },
        );
        let index = IndexManifest::new(folders, "/home/fotos".to_string());
        write_index_manifest(tmp.path(), &index).unwrap();

        let content = fs::read_to_string(tmp.path().join("json/index.json")).unwrap();
        assert!(content.contains("\"total_folders\": 1"));
        assert!(content.contains("\"generated_at\": \"/home/fotos\""));
        assert!(content.contains("\"sport\": null"));
        let parsed: IndexManifest = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, index);
    }

    #[test]
    fn generated_at_is_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(generated_at(), cwd.to_string_lossy());
    }
}
