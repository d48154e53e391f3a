//! File-to-embeddable-content resolver
//!
//! Turns a raw file selection into a base64 data URI suitable for embedding
//! in a value set, and validates resolver *output* on behalf of the `file`
//! coercion rule. Validation never reads files itself.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

/// Upload ceiling, in bytes.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for embedding.
const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "application/pdf",
];

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("unsupported file type{0}")]
    UnsupportedType(String),

    #[error("file too large: {0} bytes (limit {MAX_FILE_BYTES})")]
    TooLarge(usize),

    #[error("malformed data URI: {0}")]
    MalformedDataUri(String),
}

/// Resolve raw file bytes into a data URI.
///
/// Sniffs the MIME type from magic bytes; the file name is only used in
/// error messages. Rejects unsupported types and payloads over the ceiling.
pub fn resolve_file(name: &str, bytes: &[u8]) -> Result<String, ResolveError> {
    if bytes.len() > MAX_FILE_BYTES {
        return Err(ResolveError::TooLarge(bytes.len()));
    }
    let mime = sniff_mime(bytes)
        .ok_or_else(|| ResolveError::UnsupportedType(format!(" for '{}'", name)))?;
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

/// Validate a data URI produced by [`resolve_file`] (or an equivalent
/// upstream resolver): syntax, known MIME type, payload within the ceiling,
/// valid base64.
pub fn check_data_uri(uri: &str) -> Result<(), ResolveError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ResolveError::MalformedDataUri("missing data: prefix".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| ResolveError::MalformedDataUri("missing base64 payload".to_string()))?;

    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(ResolveError::UnsupportedType(format!(": {}", mime)));
    }

    // Decoded size bound before paying for the decode.
    let approx_len = payload.len() / 4 * 3;
    if approx_len > MAX_FILE_BYTES {
        return Err(ResolveError::TooLarge(approx_len));
    }

    let decoded = BASE64
        .decode(payload)
        .map_err(|e| ResolveError::MalformedDataUri(e.to_string()))?;
    if decoded.len() > MAX_FILE_BYTES {
        return Err(ResolveError::TooLarge(decoded.len()));
    }
    Ok(())
}

/// Identify the payload from magic bytes.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    if bytes.starts_with(&PNG_MAGIC) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"%PDF-") {
        Some("application/pdf")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn test_resolve_png_round_trips_through_check() {
        let uri = resolve_file("logo.png", PNG_1X1).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        check_data_uri(&uri).unwrap();
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = resolve_file("notes.txt", b"plain text").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedType(_)));
    }

    #[test]
    fn test_size_ceiling_enforced() {
        let oversized = vec![0u8; MAX_FILE_BYTES + 1];
        let err = resolve_file("big.png", &oversized).unwrap_err();
        assert!(matches!(err, ResolveError::TooLarge(_)));
    }

    #[test]
    fn test_check_rejects_foreign_mime() {
        let uri = format!("data:text/html;base64,{}", BASE64.encode(b"<p>hi</p>"));
        let err = check_data_uri(&uri).unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedType(_)));
    }

    #[test]
    fn test_check_rejects_bad_base64() {
        let err = check_data_uri("data:image/png;base64,!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedDataUri(_)));
    }
}
