//! Source tree discovery.
//!
//! Walks the source root and finds every *photo folder*: a directory that
//! directly contains at least one `.jpg`/`.jpeg` file (any case). Folders
//! can nest arbitrarily; a folder holding both photos and subfolders is a
//! photo folder and its subfolders are visited too.
//!
//! ```text
//! links/
//! ├── makax-2024/                    # photo folder
//! │   ├── 15032024-Concierto.jpg
//! │   └── notas.txt                  # ignored
//! └── deportiva/                     # no photos of its own, not listed
//!     ├── futbol-sala-2023/          # photo folder
//!     │   └── foto1.JPG
//!     └── surf/                      # photo folder
//!         └── ola.jpeg
//! ```
//!
//! Folders are listed top-down (a folder before its children), siblings in
//! file-name order. Filenames inside a folder are sorted, so manifests come
//! out in the same order on every run.
//!
//! A subfolder that can't be read (`.Trashes`, `System Volume Information`,
//! a folder without permissions) is logged and skipped along with anything
//! below it. Only an unreadable source root is an error.

use log::warn;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source folder not found: {0}")]
    SourceNotFound(PathBuf),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// A directory with at least one photo.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFolder {
    /// The directory on disk.
    pub path: PathBuf,
    /// Path below the source root with forward slashes; `.` for the root itself.
    pub relative: String,
    /// Photo filenames, sorted.
    pub images: Vec<String>,
}

/// Find every photo folder under `root`.
pub fn scan(root: &Path) -> Result<Vec<PhotoFolder>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }

    let mut folders = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let images = match collect_images(entry.path()) {
            Ok(images) => images,
            Err(e) if entry.depth() == 0 => return Err(e),
            Err(e) => {
                warn!("Skipping unreadable folder {}: {}", entry.path().display(), e);
                continue;
            }
        };
        if images.is_empty() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map(web_path)
            .unwrap_or_default();
        folders.push(PhotoFolder {
            path: entry.path().to_path_buf(),
            relative: if relative.is_empty() {
                ".".to_string()
            } else {
                relative
            },
            images,
        });
    }

    Ok(folders)
}

fn collect_images(dir: &Path) -> Result<Vec<String>, ScanError> {
    let mut images: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();

    images.sort();
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Join the normal components of a relative path with `/`, whatever the host separator.
pub fn web_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
