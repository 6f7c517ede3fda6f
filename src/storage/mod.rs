//! Filesystem-backed storage: candidate images, upload galleries and usage stats.

pub mod images;
pub mod stats;

pub use images::{FsImageSource, ImageSource, PhotoGallery};
pub use stats::{StatsEntry, StatsStore, StatsSummary};
