//! Plaza processing library
//!
//! Image normalization (resize, lossy re-encode, byte-budget fallback) and
//! upload validation. Validation is caller-side policy; the normalizer only
//! transforms what it is given.

pub mod image;
pub mod validator;

pub use crate::image::{ImageNormalizer, NormalizedImage};
pub use crate::validator::{ImageValidator, ValidationError};
