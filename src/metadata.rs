//! Metadata inference from folder and file names.
//!
//! Nothing is read from the image itself. Every field comes from naming
//! conventions:
//!
//! ## Event
//!
//! The photo folder's own name. Four recurring events have canonical names
//! that win regardless of how the folder was spelled; anything else is the
//! title-cased folder name with its year removed:
//!
//! ```text
//! tamborrada-donostia-2026  → Tamborrada
//! SanFermin_2024            → San Fermín
//! concierto-verano-2024     → Concierto Verano
//! ```
//!
//! ## Category and sport
//!
//! Any path segment mentioning `deportiva`/`deporte` makes the folder a
//! sports folder; the sport itself is picked by keyword.
//!
//! ## Date
//!
//! Each field is resolved in priority order, first available wins:
//!
//! 1. `DDMMYYYY` prefix of the filename
//! 2. first `20YY` in the folder path, on January 1st
//! 3. today's date
//!
//! Category, sport and year look at the folder path as walked, source root
//! included (`links/deportiva/surf-2024`).
//!
//! Keyword rules are ordered tables of `(keywords, result)`; the first row
//! with a matching keyword wins.

use crate::naming;
use crate::types::{Category, PhotoDate, Sport};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static YEAR_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"20[0-9]{2}").unwrap());

/// Event name used when the folder path has no final segment.
pub const FALLBACK_EVENT: &str = "Evento";

const EVENT_RULES: &[(&[&str], &str)] = &[
    (&["tamborrada"], "Tamborrada"),
    (&["fermin", "sanfermin"], "San Fermín"),
    (&["makax", "makas"], "Makax"),
    (&["aste nagusia", "astenagusia"], "Aste Nagusia"),
];

const SPORTS_MARKERS: &[&str] = &["deportiva", "deporte"];

const SPORT_RULES: &[(&[&str], Sport)] = &[
    (
        &["futbol", "football", "futsal", "sala"],
        Sport::FutbolSala,
    ),
    (&["basket"], Sport::Baloncesto),
    (&["surf"], Sport::Surf),
    (&["rugby"], Sport::Rugby),
    (&["athletic", "atletismo"], Sport::Atletismo),
    (&["tennis", "tenis"], Sport::Tenis),
    (&["ciclismo", "cycling"], Sport::Ciclismo),
];

/// Return the result of the first rule with a keyword contained in `haystack`.
fn first_match<T: Copy>(haystack: &str, rules: &[(&[&str], T)]) -> Option<T> {
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, result)| *result)
}

/// Metadata shared by every photo of one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMetadata {
    pub event: String,
    pub category: Category,
    pub sport: Option<Sport>,
}

/// Infer event, category and sport for a photo folder.
///
/// `folder` is the folder itself (its final segment names the event);
/// `path_text` is the whole path as walked, source root included, scanned
/// for sport keywords.
pub fn infer_folder(folder: &Path, path_text: &str) -> FolderMetadata {
    let (category, sport) = detect_category_and_sport(path_text);
    FolderMetadata {
        event: detect_event(folder),
        category,
        sport,
    }
}

/// Event name from the final segment of `folder`.
pub fn detect_event(folder: &Path) -> String {
    let Some(name) = folder.file_name().map(|n| n.to_string_lossy()) else {
        return FALLBACK_EVENT.to_string();
    };

    if let Some(canonical) = first_match(&name.to_lowercase(), EVENT_RULES) {
        return canonical.to_string();
    }

    let event = naming::title_case(&naming::separators_to_spaces(&name));
    match YEAR_TOKEN.find(&name) {
        Some(year) => event.replace(year.as_str(), "").trim().to_string(),
        None => event,
    }
}

/// Category and optional sport from a path string.
///
/// Sport is only ever set for [`Category::Deportiva`].
pub fn detect_category_and_sport(path: &str) -> (Category, Option<Sport>) {
    let lower = path.to_lowercase();
    if !SPORTS_MARKERS.iter().any(|m| lower.contains(m)) {
        return (Category::General, None);
    }
    (Category::Deportiva, first_match(&lower, SPORT_RULES))
}

/// Resolve a photo's date from its filename, then its folder path, then `today`.
pub fn resolve_date(filename: &str, folder_path: &str, today: NaiveDate) -> PhotoDate {
    if let Some(date) = naming::extract_date(filename) {
        return date;
    }
    if let Some(year) = YEAR_TOKEN.find(folder_path) {
        return PhotoDate {
            year: year.as_str().to_string(),
            month: "01".to_string(),
            day: "01".to_string(),
        };
    }
    PhotoDate {
        year: today.year().to_string(),
        month: format!("{:02}", today.month()),
        day: format!("{:02}", today.day()),
    }
}

/// Local calendar date, the last-resort photo date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
