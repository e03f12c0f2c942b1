//! MIME utilities for image payloads

/// Pick an upload file name from the payload's magic bytes. Unknown formats
/// are treated as JPEG, which is what the image hosts serve.
#[must_use]
pub fn image_file_name(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "motivation.png"
    } else if bytes.starts_with(b"GIF8") {
        "motivation.gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "motivation.webp"
    } else {
        "motivation.jpg"
    }
}

/// MIME type matching [`image_file_name`].
#[must_use]
pub fn image_mime(bytes: &[u8]) -> String {
    mime_guess::from_path(image_file_name(bytes))
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Returns whether a `Content-Type` header value names an image.
#[must_use]
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}
