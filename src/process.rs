//! Photo processing and per-folder manifests.
//!
//! Takes the photo folders found by [`scan`](crate::scan) and, for every
//! photo, writes a thumbnail and an optimized copy and builds its
//! [`PhotoRecord`]. Each folder's manifest is written as soon as the folder
//! is done.
//!
//! ## Output Structure
//!
//! Source paths are mirrored under two trees:
//!
//! ```text
//! links/deportiva/surf/ola.jpg
//!   → thumbs/deportiva/surf/ola.jpg      600px wide
//!   → optimized/deportiva/surf/ola.jpg   at most 1600px wide
//!   → json/surf.json                     the folder's records
//! ```
//!
//! ## Failure Policy
//!
//! A photo that fails to decode or encode is logged and skipped; it gets no
//! record, and the run continues. Both derivatives are always attempted, so a
//! half-written pair may remain on disk. A folder whose photos all fail gets
//! no manifest and no index entry.
//!
//! ## Folder ids
//!
//! Manifests are named after the folder's own name only, so `a/fotos` and
//! `b/fotos` share the id `fotos`: the later folder's manifest and index
//! entry replace the earlier one. Their photos stay in the aggregate list.

use crate::config::GalleryConfig;
use crate::imaging::{
    BackendError, ImageBackend, OptimizedConfig, Quality, RustBackend, ThumbnailConfig,
    create_optimized, create_thumbnail,
};
use crate::manifest::{self, IndexManifest, ManifestError};
use crate::metadata::{self, FolderMetadata};
use crate::naming;
use crate::scan::{self, PhotoFolder, ScanError};
use crate::types::{Category, FolderDescriptor, PhotoRecord, Sport};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Web-relative directory holding thumbnails.
pub const THUMBS_DIR: &str = "thumbs";
/// Web-relative directory holding optimized copies.
pub const OPTIMIZED_DIR: &str = "optimized";

/// Configuration for image processing
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub thumbnail: ThumbnailConfig,
    pub optimized: OptimizedConfig,
}

impl ProcessConfig {
    /// Build a ProcessConfig from GalleryConfig values.
    pub fn from_gallery_config(config: &GalleryConfig) -> Self {
        Self {
            source: config.source.clone(),
            output: config.output.clone(),
            thumbnail: ThumbnailConfig {
                width: config.thumbnails.width,
                quality: Quality::new(config.thumbnails.quality),
            },
            optimized: OptimizedConfig {
                max_width: config.optimized.max_width,
                quality: Quality::new(config.optimized.quality),
            },
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::from_gallery_config(&GalleryConfig::default())
    }
}

/// Progress events, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// The source tree was walked.
    ScanComplete { folder_count: usize },
    /// A folder is about to be processed (`index` is 1-based).
    FolderStarted {
        index: usize,
        total: usize,
        relative: String,
        event: String,
        category: Category,
        sport: Option<Sport>,
    },
    ImageProcessed { filename: String },
    ImageFailed { filename: String, error: String },
    /// A folder's manifest was written.
    ManifestWritten { json_file: String, photo_count: usize },
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    /// All records in folder-then-file order.
    pub photos: Vec<PhotoRecord>,
    /// Descriptors of folders that produced a manifest, keyed by folder id.
    pub folders: BTreeMap<String, FolderDescriptor>,
}

impl Gallery {
    /// Build the index manifest for this gallery.
    pub fn index(&self, generated_at: String) -> IndexManifest {
        IndexManifest::new(self.folders.clone(), generated_at)
    }

    /// Write `photos-data.json` and `json/index.json` under `output_root`.
    pub fn write_manifests(
        &self,
        output_root: &Path,
        generated_at: String,
    ) -> Result<(), ManifestError> {
        manifest::write_aggregate_manifest(output_root, &self.photos)?;
        manifest::write_index_manifest(output_root, &self.index(generated_at))
    }
}

/// How a full run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The source folder doesn't exist. Nothing was written.
    SourceNotFound(PathBuf),
    /// No photo could be processed. Aggregate and index were not written.
    NoPhotos,
    /// All manifests were written.
    Completed(Gallery),
}

/// Full conversion with the `image`-crate backend: process every folder,
/// then write the aggregate and index manifests.
pub fn run(
    config: &ProcessConfig,
    on_event: impl FnMut(ProcessEvent),
) -> Result<RunOutcome, ProcessError> {
    run_with_backend(
        &RustBackend::new(),
        config,
        metadata::today(),
        manifest::generated_at(),
        on_event,
    )
}

/// [`run`] with an explicit backend, date and `generated_at` value.
pub fn run_with_backend(
    backend: &impl ImageBackend,
    config: &ProcessConfig,
    today: NaiveDate,
    generated_at: String,
    on_event: impl FnMut(ProcessEvent),
) -> Result<RunOutcome, ProcessError> {
    let gallery = match process_with_backend(backend, config, today, on_event) {
        Ok(gallery) => gallery,
        Err(ProcessError::Scan(ScanError::SourceNotFound(path))) => {
            return Ok(RunOutcome::SourceNotFound(path));
        }
        Err(e) => return Err(e),
    };

    if gallery.photos.is_empty() {
        warn!("No photos processed; photos-data.json and index not written");
        return Ok(RunOutcome::NoPhotos);
    }

    gallery.write_manifests(&config.output, generated_at)?;
    Ok(RunOutcome::Completed(gallery))
}

/// Derivatives, records and per-folder manifests for every photo folder.
/// The aggregate and index are left to [`run_with_backend`].
///
/// `today` is the date given to photos with no date in their filename or
/// folder path.
pub fn process_with_backend(
    backend: &impl ImageBackend,
    config: &ProcessConfig,
    today: NaiveDate,
    mut on_event: impl FnMut(ProcessEvent),
) -> Result<Gallery, ProcessError> {
    let plans = plan_folders(&config.source)?;
    on_event(ProcessEvent::ScanComplete {
        folder_count: plans.len(),
    });

    let mut gallery = Gallery::default();
    let total = plans.len();

    for (i, plan) in plans.into_iter().enumerate() {
        let FolderPlan {
            folder,
            id: folder_id,
            metadata: folder_meta,
        } = plan;

        info!("Processing folder {} (id {})", folder.relative, folder_id);
        on_event(ProcessEvent::FolderStarted {
            index: i + 1,
            total,
            relative: folder.relative.clone(),
            event: folder_meta.event.clone(),
            category: folder_meta.category,
            sport: folder_meta.sport,
        });

        let mut folder_photos = Vec::new();
        for filename in &folder.images {
            match process_image(backend, config, &folder, filename, &folder_meta, today) {
                Ok(record) => {
                    on_event(ProcessEvent::ImageProcessed {
                        filename: filename.clone(),
                    });
                    folder_photos.push(record);
                }
                Err(e) => {
                    on_event(ProcessEvent::ImageFailed {
                        filename: filename.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if folder_photos.is_empty() {
            warn!("No photos processed in {}, no manifest written", folder.relative);
            continue;
        }

        let json_file = manifest::write_folder_manifest(&config.output, &folder_id, &folder_photos)?;
        on_event(ProcessEvent::ManifestWritten {
            json_file: json_file.clone(),
            photo_count: folder_photos.len(),
        });

        if gallery.folders.contains_key(&folder_id) {
            warn!(
                "Folder id '{}' reused by {}; replacing the earlier manifest",
                folder_id, folder.relative
            );
        }
        gallery.folders.insert(
            folder_id,
            FolderDescriptor {
                path: folder.relative.clone(),
                event: folder_meta.event.clone(),
                category: folder_meta.category,
                sport: folder_meta.sport,
                json_file,
                photo_count: folder_photos.len(),
            },
        );
        gallery.photos.extend(folder_photos);
    }

    Ok(gallery)
}

/// A photo folder with its id and inferred metadata, before any processing.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderPlan {
    pub folder: PhotoFolder,
    /// Manifest name: the folder's own name, lower-cased, spaces to hyphens.
    pub id: String,
    pub metadata: FolderMetadata,
}

/// Scan `source` and infer what each photo folder will be filed as.
///
/// Writes nothing; used on its own by `check`.
pub fn plan_folders(source: &Path) -> Result<Vec<FolderPlan>, ProcessError> {
    let plans = scan::scan(source)?
        .into_iter()
        .map(|folder| {
            let named = named_folder_path(&folder);
            let metadata = metadata::infer_folder(&named, &folder.path.to_string_lossy());
            let id = naming::folder_id(
                &named
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            FolderPlan {
                folder,
                id,
                metadata,
            }
        })
        .collect();
    Ok(plans)
}

/// The folder path to take names from. A source root given as `.` has no
/// final segment of its own, so it is resolved first.
fn named_folder_path(folder: &PhotoFolder) -> PathBuf {
    if folder.path.file_name().is_some() {
        return folder.path.clone();
    }
    std::fs::canonicalize(&folder.path).unwrap_or_else(|_| folder.path.clone())
}

/// Photo path relative to the source root, forward slashes.
fn relative_photo_path(folder: &PhotoFolder, filename: &str) -> String {
    if folder.relative == "." {
        filename.to_string()
    } else {
        format!("{}/{}", folder.relative, filename)
    }
}

/// Write both derivatives of one photo and build its record.
///
/// Both derivatives are attempted even when the first fails.
fn process_image(
    backend: &impl ImageBackend,
    config: &ProcessConfig,
    folder: &PhotoFolder,
    filename: &str,
    folder_meta: &FolderMetadata,
    today: NaiveDate,
) -> Result<PhotoRecord, BackendError> {
    let source = folder.path.join(filename);
    let relative = relative_photo_path(folder, filename);
    let thumb = format!("{THUMBS_DIR}/{relative}");
    let optimized = format!("{OPTIMIZED_DIR}/{relative}");

    let thumb_result = create_thumbnail(
        backend,
        &source,
        &config.output.join(&thumb),
        &config.thumbnail,
    );
    log_result(&source, &thumb, &thumb_result);
    let optimized_result = create_optimized(
        backend,
        &source,
        &config.output.join(&optimized),
        &config.optimized,
    );
    log_result(&source, &optimized, &optimized_result);
    thumb_result?;
    optimized_result?;

    let date = metadata::resolve_date(filename, &folder.path.to_string_lossy(), today);
    Ok(PhotoRecord {
        src: optimized,
        thumb,
        title: naming::photo_title(filename),
        category: folder_meta.category,
        event: folder_meta.event.clone(),
        year: date.year,
        month: date.month,
        day: date.day,
        sport: folder_meta.sport,
    })
}

fn log_result<T: std::fmt::Debug>(
    source: &Path,
    output: &str,
    result: &Result<T, BackendError>,
) {
    match result {
        Ok(dims) => debug!("{} → {} {:?}", source.display(), output, dims),
        Err(e) => warn!("Skipping {}: {} ({})", source.display(), e, output),
    }
}
