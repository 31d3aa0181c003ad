//! Filename and folder-name conventions.
//!
//! Photographers name files `DDMMYYYY-Some-Description.jpg` and folders after
//! the event they covered (`makax-2024`, `Tamborrada 2026`, ...). This module
//! holds the pure parsing helpers for those conventions:
//!
//! - `15032024-Concierto-Rock.jpg` → date 2024-03-15, title "Concierto Rock"
//! - `foto_1.jpeg` → no date, title "Foto 1"
//! - `Aste Nagusia` (folder) → id `aste-nagusia`

use crate::types::PhotoDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{4})").unwrap());

static DATED_TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}-").unwrap());

/// Filename without its extension, as a lossy string.
fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a leading `DDMMYYYY` from the filename stem.
///
/// The digits are returned as-is; `99132024` yields month `13`.
pub fn extract_date(filename: &str) -> Option<PhotoDate> {
    let stem = file_stem(filename);
    let caps = DATE_PREFIX.captures(&stem)?;
    Some(PhotoDate {
        year: caps[3].to_string(),
        month: caps[2].to_string(),
        day: caps[1].to_string(),
    })
}

/// Display title for a photo file.
///
/// Drops the extension and a leading `DDDDDDDD-` date, turns `-`/`_` into
/// spaces and title-cases the rest.
pub fn photo_title(filename: &str) -> String {
    let stem = file_stem(filename);
    let name = DATED_TITLE_PREFIX.replace(&stem, "");
    title_case(&separators_to_spaces(&name))
}

/// Folder id: the final path segment, lower-cased, spaces → hyphens.
///
/// Used as the manifest filename stem and the index key. Distinct folders
/// can map to the same id.
pub fn folder_id(folder_name: &str) -> String {
    folder_name.to_lowercase().replace(' ', "-")
}

pub(crate) fn separators_to_spaces(name: &str) -> String {
    name.replace(['-', '_'], " ")
}

/// Title-case every word.
///
/// A letter is upper-cased when the character before it is not a letter and
/// lower-cased otherwise, so digits and apostrophes start a new word:
/// `"foto1"` → `"Foto1"`, `"rock's"` → `"Rock'S"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
