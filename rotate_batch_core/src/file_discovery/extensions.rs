//! Supported source image extensions

/// Extensions of the image formats a batch picks up, matched in any case
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"];

/// Convert extensions to glob patterns
///
/// Patterns are meant for a case-insensitive [`super::ImageMatcher`], so
/// only the lowercase form is emitted.
pub(crate) fn extensions_to_patterns(extensions: &[&str]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| format!("*.{}", ext.to_lowercase()))
        .collect()
}
