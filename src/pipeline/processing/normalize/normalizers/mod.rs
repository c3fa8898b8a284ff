// Base trait and utilities for level-specific normalizers
pub mod base;

// One normalizer per survey level
pub mod l1;
pub mod l2;
pub mod l3;

// Re-export the main components
pub use base::{LevelNormalizer, MetricsNormalizer, NormalizerUtils};
pub use l1::L1Normalizer;
pub use l2::L2Normalizer;
pub use l3::L3Normalizer;
