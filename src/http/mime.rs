//! MIME type detection based on file extensions.

/// Guesses the MIME type for a path from its file extension.
///
/// Unknown or missing extensions fall back to `application/octet-stream`.
pub fn guess_type(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain",
        "xml" => "text/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(guess_type("/index.html"), "text/html");
        assert_eq!(guess_type("/assets/app.JS"), "application/javascript");
        assert_eq!(guess_type("photo.jpeg"), "image/jpeg");
    }

    #[test]
    fn unknown_extension_falls_back() {
        assert_eq!(guess_type("/archive.tar.xz"), "application/octet-stream");
        assert_eq!(guess_type("/no-extension"), "application/octet-stream");
    }
}
