use tracing::debug;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{file_extension, FileData},
};

pub const JPEG_MIME: &str = "image/jpeg";

const ALLOWED_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Leading-byte signatures, checked in order.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\xFF\xD8\xFF", JPEG_MIME),
    (b"\x89PNG\r\n\x1A\n", "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
];

/// Checks the extension, then the sniffed content type, and returns the
/// accepted extension. The extension is rejected before any byte is inspected.
pub fn validate_upload(file: &FileData) -> Result<String, ApplicationError> {
    let extension = validate_extension(&file.filename)?;

    let content_type = sniff_content_type(file.sniff_window());
    if content_type != JPEG_MIME {
        debug!("Rejected '{}' sniffed as {}", file.filename, content_type);
        return Err(ApplicationError::UnsupportedMediaType(
            "file is not a valid JPEG image".to_string(),
        ));
    }

    Ok(extension)
}

pub fn validate_extension(filename: &str) -> Result<String, ApplicationError> {
    match file_extension(filename) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext) => Ok(ext.to_string()),
        _ => Err(ApplicationError::UnsupportedMediaType(
            "only JPEG files are allowed".to_string(),
        )),
    }
}

pub fn sniff_content_type(data: &[u8]) -> &'static str {
    if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return "image/webp";
    }

    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| data.starts_with(sig)) {
        return mime;
    }

    let binary = data
        .iter()
        .any(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | 0x1B));
    if binary {
        "application/octet-stream"
    } else {
        "text/plain; charset=utf-8"
    }
}
