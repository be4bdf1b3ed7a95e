//! Image processing module
//!
//! Normalizes user-submitted photos: decode, aspect-preserving downscale,
//! lossy re-encode, with a fixed two-pass size policy.

pub mod normalizer;

pub use normalizer::{ImageNormalizer, NormalizedImage};
