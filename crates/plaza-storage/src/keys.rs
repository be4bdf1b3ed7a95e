//! Object-key generation for storage backends.
//!
//! Key format: `{folder}/{filename}` or, when an owner is given,
//! `{folder}/{owner}/{filename}`. Filenames are unique per call:
//! millisecond timestamp plus a random suffix, keeping the original
//! extension.

use rand::{distr::Alphanumeric, Rng};

const SUFFIX_LEN: usize = 8;

/// Generate a unique storage key for an uploaded file.
///
/// The original filename contributes only its extension; the stored name is
/// `{timestamp_ms}-{random}.{ext}` so collisions across rapid uploads are
/// avoided without coordinating state.
pub fn generate_object_key(folder: &str, owner: Option<&str>, original_filename: &str) -> String {
    let extension = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string());

    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();

    let filename = format!("{}-{}.{}", timestamp, suffix, extension);

    match owner {
        Some(owner) => format!("{}/{}/{}", folder, owner, filename),
        None => format!("{}/{}", folder, filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_has_folder_prefix_and_extension() {
        let key = generate_object_key("services", None, "photo.JPG");
        assert!(key.starts_with("services/"));
        assert!(key.ends_with(".jpg"));
        assert_eq!(key.matches('/').count(), 1);
    }

    #[test]
    fn test_key_includes_owner_segment() {
        let key = generate_object_key("profiles", Some("user-42"), "avatar.png");
        assert!(key.starts_with("profiles/user-42/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_missing_extension_falls_back() {
        let key = generate_object_key("services", None, "noextension");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_keys_are_unique() {
        let a = generate_object_key("services", None, "photo.jpg");
        let b = generate_object_key("services", None, "photo.jpg");
        assert_ne!(a, b);
    }
}
