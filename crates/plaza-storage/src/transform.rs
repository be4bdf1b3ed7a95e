//! CDN resize-URL construction.
//!
//! The storage provider serves transformed variants of stored images through
//! query parameters on the public URL, so no separate copy is stored. This
//! module builds those URLs.

/// How the transform layer fits the image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Fill the box, cropping overflow.
    Cover,
    /// Fit inside the box, preserving the whole image.
    Contain,
}

impl ResizeMode {
    fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Cover => "cover",
            ResizeMode::Contain => "contain",
        }
    }
}

/// Requested output geometry. Either dimension may be omitted; the transform
/// layer scales the other proportionally.
#[derive(Debug, Clone, Copy)]
pub struct ResizeParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mode: ResizeMode,
}

impl ResizeParams {
    pub fn cover(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            mode: ResizeMode::Cover,
        }
    }

    pub fn contain_width(width: u32) -> Self {
        Self {
            width: Some(width),
            height: None,
            mode: ResizeMode::Contain,
        }
    }
}

/// Append resize query parameters to a stored file's public URL.
pub fn transformed_url(url: &str, params: &ResizeParams) -> String {
    let mut query = Vec::new();
    if let Some(w) = params.width {
        query.push(format!("width={}", w));
    }
    if let Some(h) = params.height {
        query.push(format!("height={}", h));
    }
    query.push(format!("resize={}", params.mode.as_str()));

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query.join("&"))
}
