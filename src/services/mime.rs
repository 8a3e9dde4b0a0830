/// Static extension -> MIME mapping for common web, image, document, and
/// archive formats. Lookup is by lower-cased extension.
const MIME_TABLE: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("ico", "image/x-icon"),
    ("bmp", "image/bmp"),
    ("tiff", "image/tiff"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("md", "text/markdown"),
    ("zip", "application/zip"),
];

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Infer a MIME type from a filename extension.
/// Unknown or missing extensions map to `application/octet-stream`.
pub fn mime_type_for(filename: &str) -> &'static str {
    let ext = match filename.rsplit('.').next() {
        Some(ext) if ext.len() < filename.len() => ext.to_ascii_lowercase(),
        _ => return OCTET_STREAM,
    };
    MIME_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, m)| *m)
        .unwrap_or(OCTET_STREAM)
}
