//! Plaza Core Library
//!
//! This crate provides core domain models, error types, configuration, and
//! constants that are shared across all Plaza components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{NormalizerConfig, UploadPolicy};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    Account, CategoryRule, ClientProfile, DiscountKind, OrderContext, PromoCode, PromoValidation,
    ProviderProfile, UploadFile, UploadResult, UserProfile,
};
