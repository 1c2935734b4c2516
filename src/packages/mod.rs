//! Seeded practice packages
//!
//! The deterministic core of the app: a seeded shuffle of the question pool,
//! cut into reproducible packages, with per-package progress persisted
//! across sessions.

pub mod generate;
pub mod model;
pub mod pool;
pub mod shuffle;
pub mod store;

pub use generate::{SizeError, generate, generate_with_seed, validate_size};
pub use model::{
    ALL_PACKAGE_ID, Package, PackageConfig, PackageProgress, PackageStats, stats_for,
};
pub use pool::extract_pool;
pub use shuffle::{Mulberry32, generate_seed, hash_seed, seeded_shuffle};
pub use store::PackageStore;
