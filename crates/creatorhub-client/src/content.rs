//! Classify decrypted media by its leading bytes

/// Broad kind of a decrypted file, used to pick a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image(&'static str),
    Video(&'static str),
    Pdf,
    Unknown,
}

impl ContentKind {
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF-") {
            ContentKind::Pdf
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            ContentKind::Image("image/png")
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ContentKind::Image("image/jpeg")
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            ContentKind::Image("image/gif")
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            ContentKind::Image("image/webp")
        } else if bytes.len() >= 8 && &bytes[4..8] == b"ftyp" {
            ContentKind::Video("video/mp4")
        } else if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
            ContentKind::Video("video/webm")
        } else {
            ContentKind::Unknown
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentKind::Image(mime) | ContentKind::Video(mime) => *mime,
            ContentKind::Pdf => "application/pdf",
            ContentKind::Unknown => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_formats() {
        assert_eq!(ContentKind::sniff(b"%PDF-1.7\n"), ContentKind::Pdf);
        assert_eq!(
            ContentKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]),
            ContentKind::Image("image/jpeg")
        );
        assert_eq!(
            ContentKind::sniff(b"\x00\x00\x00\x18ftypmp42"),
            ContentKind::Video("video/mp4")
        );
        assert_eq!(
            ContentKind::sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            ContentKind::Image("image/webp")
        );
    }

    #[test]
    fn unknown_and_empty() {
        assert_eq!(ContentKind::sniff(b""), ContentKind::Unknown);
        assert_eq!(ContentKind::sniff(b"hello"), ContentKind::Unknown);
        assert_eq!(ContentKind::Unknown.mime_type(), "application/octet-stream");
        assert_eq!(ContentKind::Pdf.mime_type(), "application/pdf");
    }
}
