use bytes::Bytes;
use sha2::{Digest, Sha256};

/// Content sniffing never looks past this many leading bytes.
pub const SNIFF_LEN: usize = 512;

/// Extension of the final path segment, dot included. Everything from the
/// last `.` onward counts, so `photo.tar.jpg` yields `.jpg` and a bare `.jpg`
/// yields `.jpg`.
pub fn file_extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    name.rfind('.').map(|idx| &name[idx..])
}

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Bytes,
    pub filename: String,
}

impl FileData {
    pub fn new(content: Bytes, filename: String) -> Self {
        Self { content, filename }
    }

    pub fn sniff_window(&self) -> &[u8] {
        let end = self.content.len().min(SNIFF_LEN);
        &self.content[..end]
    }

    /// Lowercase hex SHA-256 of the full content.
    pub fn content_hash(&self) -> String {
        hex::encode(Sha256::digest(&self.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &'static [u8]) -> FileData {
        FileData::new(Bytes::from_static(content), name.to_string())
    }

    #[test]
    fn test_extension_takes_last_dot_of_final_segment() {
        assert_eq!(file_extension("photo.jpg"), Some(".jpg"));
        assert_eq!(file_extension("archive.tar.jpeg"), Some(".jpeg"));
        assert_eq!(file_extension("dir.v2/photo"), None);
        assert_eq!(file_extension("C:\\pics\\cat.JPG"), Some(".JPG"));
        assert_eq!(file_extension(".jpg"), Some(".jpg"));
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn test_content_hash_is_lowercase_sha256_hex() {
        let hash = file("a.jpg", b"abc").content_hash();
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_sniff_window_is_capped() {
        let big = FileData::new(Bytes::from(vec![0u8; 2048]), "a.jpg".to_string());
        assert_eq!(big.sniff_window().len(), SNIFF_LEN);
        assert_eq!(file("a.jpg", b"\xff\xd8").sniff_window(), b"\xff\xd8");
    }
}
