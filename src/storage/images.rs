//! Image listing for curated categories and private upload galleries.

use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use uuid::Uuid;

use crate::config::Categories;
use crate::error::StorageError;
use crate::tournament::{ImageRef, ParticipantId, Scope};
use crate::utils::logging::log_storage_operation;
use crate::utils::validation::{image_extension, validate_gallery_file_name, SUPPORTED_EXTENSIONS};

/// Supplies the candidate images of a scope.
pub trait ImageSource: Send + Sync {
    fn list_images(&self, scope: &Scope) -> Result<Vec<ImageRef>, StorageError>;
}

/// Supported images directly inside `dir` with their modification time.
/// A missing directory holds zero images.
fn scan_images(dir: &Path) -> Result<Vec<(PathBuf, SystemTime)>, StorageError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        let metadata = entry.metadata()?;
        let path = entry.path();
        if !metadata.is_file() || image_extension(&path).is_none() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        images.push((path, modified));
    }

    Ok(images)
}

/// Upload time encoded in a gallery file name (`<unix_millis>_<id>.<ext>`).
pub fn uploaded_at(image: &ImageRef) -> Option<DateTime<Utc>> {
    let (millis, _) = image.file_name()?.split_once('_')?;
    Utc.timestamp_millis_opt(millis.parse().ok()?).single()
}

/// Per-participant upload directories under one root.
#[derive(Debug, Clone)]
pub struct PhotoGallery {
    root: PathBuf,
    max_photos: usize,
}

impl PhotoGallery {
    pub fn new(root: impl Into<PathBuf>, max_photos: usize) -> Self {
        Self {
            root: root.into(),
            max_photos,
        }
    }

    pub fn max_photos(&self) -> usize {
        self.max_photos
    }

    pub fn dir_for(&self, participant: ParticipantId) -> PathBuf {
        self.root.join(participant.to_string())
    }

    /// Creates the participant's directory if needed. Idempotent.
    pub fn ensure_dir(&self, participant: ParticipantId) -> Result<PathBuf, StorageError> {
        let dir = self.dir_for(participant);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// The participant's photos, oldest upload first.
    pub fn list(&self, participant: ParticipantId) -> Result<Vec<ImageRef>, StorageError> {
        let dir = self.ensure_dir(participant)?;
        let mut images = scan_images(&dir)?;
        images.sort_by(|(a_path, a_time), (b_path, b_time)| {
            a_time.cmp(b_time).then_with(|| a_path.cmp(b_path))
        });
        Ok(images.into_iter().map(|(path, _)| ImageRef::new(path)).collect())
    }

    pub fn count(&self, participant: ParticipantId) -> Result<usize, StorageError> {
        Ok(scan_images(&self.dir_for(participant))?.len())
    }

    /// Stores an uploaded image. `extension` is the original file's extension.
    pub fn upload(
        &self,
        participant: ParticipantId,
        bytes: &[u8],
        extension: &str,
    ) -> Result<ImageRef, StorageError> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(StorageError::UnsupportedFormat(extension));
        }
        if bytes.is_empty() {
            return Err(StorageError::EmptyUpload);
        }

        let dir = self.ensure_dir(participant)?;
        if scan_images(&dir)?.len() >= self.max_photos {
            return Err(StorageError::GalleryFull {
                limit: self.max_photos,
            });
        }

        let file_name = format!(
            "{}_{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );
        let path = dir.join(&file_name);
        fs::write(&path, bytes)?;

        log_storage_operation("upload", &path.display().to_string(), Some(&format!("{} bytes", bytes.len())));
        Ok(ImageRef::new(path))
    }

    /// Deletes one photo by file name. Returns `false` if it did not exist.
    pub fn delete(&self, participant: ParticipantId, file_name: &str) -> Result<bool, StorageError> {
        validate_gallery_file_name(file_name)
            .map_err(|_| StorageError::InvalidFileName(file_name.to_string()))?;

        let path = self.dir_for(participant).join(file_name);
        match fs::remove_file(&path) {
            Ok(()) => {
                log_storage_operation("delete", &path.display().to_string(), None);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes every photo of the participant. Returns how many were removed.
    pub fn delete_all(&self, participant: ParticipantId) -> Result<usize, StorageError> {
        let dir = self.dir_for(participant);
        let images = scan_images(&dir)?;
        let mut removed = 0;
        for (path, _) in images {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        log_storage_operation("delete_all", &dir.display().to_string(), Some(&format!("{removed} removed")));
        Ok(removed)
    }
}

/// Filesystem-backed [`ImageSource`]: `<images_root>/<category>` for curated
/// categories and the [`PhotoGallery`] for private scopes.
pub struct FsImageSource {
    images_root: PathBuf,
    categories: Categories,
    gallery: Arc<PhotoGallery>,
}

impl FsImageSource {
    pub fn new(images_root: impl Into<PathBuf>, categories: Categories, gallery: Arc<PhotoGallery>) -> Self {
        Self {
            images_root: images_root.into(),
            categories,
            gallery,
        }
    }

    pub fn images_root(&self) -> &Path {
        &self.images_root
    }

    pub fn category_dir(&self, key: &str) -> PathBuf {
        self.images_root.join(key)
    }
}

impl ImageSource for FsImageSource {
    fn list_images(&self, scope: &Scope) -> Result<Vec<ImageRef>, StorageError> {
        match scope {
            Scope::Category(key) => {
                if self.categories.get(key).is_none() {
                    return Err(StorageError::UnknownCategory(key.clone()));
                }
                let mut paths: Vec<PathBuf> = scan_images(&self.category_dir(key))?
                    .into_iter()
                    .map(|(path, _)| path)
                    .collect();
                paths.sort();
                Ok(paths.into_iter().map(ImageRef::new).collect())
            }
            Scope::Gallery(owner) => self.gallery.list(*owner),
        }
    }
}
