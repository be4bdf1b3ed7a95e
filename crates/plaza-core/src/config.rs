//! Configuration module
//!
//! This module provides configuration structures for uploads and image
//! normalization. Values come from the environment with sensible defaults;
//! call sites pick the policy matching their upload surface (profile photos
//! vs. service gallery photos).

use std::env;
use std::time::Duration;

use crate::constants::{
    DECODE_TIMEOUT_SECS, IMAGE_BYTE_BUDGET, PROFILE_PHOTO_MAX_BYTES, SERVICE_PHOTO_MAX_BYTES,
};

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    env::var(key)
        .ok()
        .map(|v| v.split(',').map(|s| s.trim().to_lowercase()).collect())
        .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
}

/// Per-call-site upload constraints.
///
/// The normalizer itself does not enforce these; callers validate before
/// compressing or uploading.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

impl UploadPolicy {
    /// Policy for profile photo uploads (5 MB ceiling by default).
    pub fn profile_photos() -> Self {
        Self {
            max_file_size: env_usize("PLAZA_PROFILE_PHOTO_MAX_BYTES", PROFILE_PHOTO_MAX_BYTES),
            allowed_extensions: env_list(
                "PLAZA_IMAGE_ALLOWED_EXTENSIONS",
                &["jpg", "jpeg", "png", "webp"],
            ),
            allowed_content_types: env_list(
                "PLAZA_IMAGE_ALLOWED_CONTENT_TYPES",
                &["image/jpeg", "image/png", "image/webp"],
            ),
        }
    }

    /// Policy for service gallery photo uploads (10 MB ceiling by default).
    pub fn service_photos() -> Self {
        Self {
            max_file_size: env_usize("PLAZA_SERVICE_PHOTO_MAX_BYTES", SERVICE_PHOTO_MAX_BYTES),
            ..Self::profile_photos()
        }
    }
}

/// One resize-and-encode attempt: bounding dimensions plus encoder quality
/// as a fraction in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionPass {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: f32,
}

/// Image normalizer configuration: a primary pass, a fallback pass used when
/// the primary result exceeds the byte budget, and a decode timeout.
#[derive(Clone, Debug)]
pub struct NormalizerConfig {
    pub primary: CompressionPass,
    pub fallback: CompressionPass,
    pub byte_budget: usize,
    pub decode_timeout: Duration,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            primary: CompressionPass {
                max_width: 800,
                max_height: 600,
                quality: 0.7,
            },
            fallback: CompressionPass {
                max_width: 600,
                max_height: 400,
                quality: 0.5,
            },
            byte_budget: IMAGE_BYTE_BUDGET,
            decode_timeout: Duration::from_secs(DECODE_TIMEOUT_SECS),
        }
    }
}

impl NormalizerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            byte_budget: env_usize("PLAZA_IMAGE_BYTE_BUDGET", defaults.byte_budget),
            decode_timeout: Duration::from_secs(
                env_usize("PLAZA_DECODE_TIMEOUT_SECS", DECODE_TIMEOUT_SECS as usize) as u64,
            ),
            ..defaults
        }
    }
}
