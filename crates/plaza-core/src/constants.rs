//! Shared constants.

/// Byte budget the normalizer aims for after the first compression pass.
pub const IMAGE_BYTE_BUDGET: usize = 200 * 1024;

/// Ceiling for profile photo uploads.
pub const PROFILE_PHOTO_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Ceiling for service gallery photo uploads.
pub const SERVICE_PHOTO_MAX_BYTES: usize = 10 * 1024 * 1024;

/// How long a decode/encode cycle may run before it is abandoned.
pub const DECODE_TIMEOUT_SECS: u64 = 30;

/// Validity window for issued loyalty codes, in days.
pub const LOYALTY_CODE_VALIDITY_DAYS: i64 = 30;
