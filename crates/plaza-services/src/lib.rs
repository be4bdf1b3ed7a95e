//! Plaza Services Layer
//!
//! This crate is the **business service layer**: it hosts the upload
//! orchestrator and re-exports a unified API from core, processing, storage,
//! and promo so that callers depend on a single service facade.

pub mod uploader;

pub use plaza_core::{
    Account, AppError, CategoryRule, DiscountKind, ErrorMetadata, NormalizerConfig, OrderContext,
    PromoCode, PromoValidation, UploadFile, UploadPolicy, UploadResult,
};
pub use plaza_processing::{ImageNormalizer, ImageValidator, NormalizedImage, ValidationError};
pub use plaza_promo::{seed_catalog, PromoError, PromoRegistry};
pub use plaza_storage::{
    generate_object_key, transformed_url, LocalStorage, ResizeMode, ResizeParams, Storage,
    StorageError, StorageResult,
};
pub use uploader::UploadOrchestrator;
