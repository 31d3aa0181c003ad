//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! Found 2 photo folders
//!
//! [1/2] deportiva/futbol-sala-2023/
//!     Event: Futbol Sala | Category: deportiva | Sport: Fútbol Sala
//!     ✓ foto1.jpg
//!     ✗ rota.jpg: Failed to decode ...
//!     Wrote json/futbol-sala-2023.json (1 photos)
//!
//! [2/2] makax-2024/
//!     Event: Makax | Category: general
//!     ✓ 15032024-Concierto-Rock.jpg
//!     Wrote json/makax-2024.json (1 photos)
//!
//! ═══════════════════════════════════════════════════════
//! Wrote photos-data.json (2 photos)
//! Wrote json/index.json (2 folders)
//!
//! Done: 2 photos in 2 folders
//!     • Futbol Sala: 1 photos → json/futbol-sala-2023.json
//!     • Makax: 1 photos → json/makax-2024.json
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 makax-2024/ (3 photos)
//!     Event: Makax | Category: general
//!     Manifest: json/makax-2024.json
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions do no I/O.

use crate::manifest::{AGGREGATE_FILE, INDEX_FILE, JSON_DIR, folder_manifest_path};
use crate::metadata::FolderMetadata;
use crate::process::{FolderPlan, Gallery, ProcessEvent};

/// Width of the horizontal rules around the run.
const RULE_WIDTH: usize = 55;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Trailing slash for folders; the source root stays `.`.
fn folder_label(relative: &str) -> String {
    if relative == "." {
        relative.to_string()
    } else {
        format!("{relative}/")
    }
}

/// `Event: X | Category: y` plus `| Sport: z` when there is one.
fn metadata_line(metadata: &FolderMetadata) -> String {
    let mut line = format!("Event: {} | Category: {}", metadata.event, metadata.category);
    if let Some(sport) = metadata.sport {
        line.push_str(&format!(" | Sport: {sport}"));
    }
    line
}

pub fn format_rule() -> String {
    "═".repeat(RULE_WIDTH)
}

/// Banner printed before a run.
pub fn format_banner(version: &str, source: &str, output: &str) -> Vec<String> {
    vec![
        format!("auto-gallery {version}"),
        format!("Source: {source}"),
        format!("Output: {output}"),
        format_rule(),
        String::new(),
    ]
}

pub fn print_banner(version: &str, source: &str, output: &str) {
    for line in format_banner(version, source, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Run output
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ScanComplete { folder_count } => {
            vec![format!("Found {folder_count} photo folders"), String::new()]
        }
        ProcessEvent::FolderStarted {
            index,
            total,
            relative,
            event,
            category,
            sport,
        } => {
            let metadata = FolderMetadata {
                event: event.clone(),
                category: *category,
                sport: *sport,
            };
            vec![
                format!("[{index}/{total}] {}", folder_label(relative)),
                format!("    {}", metadata_line(&metadata)),
            ]
        }
        ProcessEvent::ImageProcessed { filename } => vec![format!("    ✓ {filename}")],
        ProcessEvent::ImageFailed { filename, error } => {
            vec![format!("    ✗ {filename}: {error}")]
        }
        ProcessEvent::ManifestWritten {
            json_file,
            photo_count,
        } => vec![
            format!("    Wrote {json_file} ({photo_count} photos)"),
            String::new(),
        ],
    }
}

pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

/// Lines reporting the aggregate and index manifests.
pub fn format_manifests_written(gallery: &Gallery) -> Vec<String> {
    vec![
        format_rule(),
        format!("Wrote {} ({} photos)", AGGREGATE_FILE, gallery.photos.len()),
        format!(
            "Wrote {}/{} ({} folders)",
            JSON_DIR,
            INDEX_FILE,
            gallery.folders.len()
        ),
        String::new(),
    ]
}

/// Final summary: totals, then one line per folder in the index.
pub fn format_summary(gallery: &Gallery) -> Vec<String> {
    let mut lines = vec![format!(
        "Done: {} photos in {} folders",
        gallery.photos.len(),
        gallery.folders.len()
    )];
    for descriptor in gallery.folders.values() {
        lines.push(format!(
            "    • {}: {} photos → {}",
            descriptor.event, descriptor.photo_count, descriptor.json_file
        ));
    }
    lines
}

pub fn print_summary(gallery: &Gallery) {
    for line in format_manifests_written(gallery)
        .into_iter()
        .chain(format_summary(gallery))
    {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the `check` listing: every photo folder with what it will become.
pub fn format_check_output(plans: &[FolderPlan]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, plan) in plans.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} photos)",
            format_index(i + 1),
            folder_label(&plan.folder.relative),
            plan.folder.images.len()
        ));
        lines.push(format!("    {}", metadata_line(&plan.metadata)));
        lines.push(format!("    Manifest: {}", folder_manifest_path(&plan.id)));
    }
    let photos: usize = plans.iter().map(|p| p.folder.images.len()).sum();
    lines.push(format!("{} photo folders, {} photos", plans.len(), photos));
    lines
}

pub fn print_check_output(plans: &[FolderPlan]) {
    for line in format_check_output(plans) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
