//! Plaza storage library
//!
//! Storage abstraction for uploaded media: the [`Storage`] trait, a local
//! filesystem backend, object-key generation, and CDN resize-URL
//! construction.

pub mod keys;
pub mod local;
pub mod traits;
pub mod transform;

pub use keys::generate_object_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
pub use transform::{transformed_url, ResizeMode, ResizeParams};
