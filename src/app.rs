use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Categories, Config};
use crate::services::game::GameService;
use crate::storage::{FsImageSource, ImageSource, PhotoGallery, StatsStore};
use crate::tournament::{ParticipantLocks, SessionRegistry, Shuffler, ThreadRngShuffler};

/// Everything the handlers share. Built once in `main` and passed around as
/// `Arc<AppContext>`.
pub struct AppContext {
    pub game: GameService,
    pub locks: ParticipantLocks,
    pub stats: Arc<StatsStore>,
    pub gallery: Arc<PhotoGallery>,
    pub images_root: PathBuf,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Self {
        Self::with_parts(
            config.images_root.clone(),
            Arc::new(PhotoGallery::new(&config.uploads_root, config.max_gallery_photos)),
            Arc::new(StatsStore::load(&config.stats_file)),
            config.categories.clone(),
            Arc::new(ThreadRngShuffler),
        )
    }

    /// Assembles a context from explicit parts; tests use it to inject a
    /// deterministic shuffler and temporary directories.
    pub fn with_parts(
        images_root: PathBuf,
        gallery: Arc<PhotoGallery>,
        stats: Arc<StatsStore>,
        categories: Categories,
        shuffler: Arc<dyn Shuffler>,
    ) -> Self {
        let images: Arc<dyn ImageSource> = Arc::new(FsImageSource::new(
            images_root.clone(),
            categories.clone(),
            gallery.clone(),
        ));
        let registry = Arc::new(SessionRegistry::with_shuffler(shuffler));

        Self {
            game: GameService::new(registry, images, categories),
            locks: ParticipantLocks::new(),
            stats,
            gallery,
            images_root,
        }
    }

    pub fn categories(&self) -> &Categories {
        self.game.categories()
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        self.game.registry()
    }
}
