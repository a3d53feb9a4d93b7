//! Image format identification

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Identify a format from the leading bytes of an encoded image.
    ///
    /// Sniffing is used instead of trusting file extensions because the
    /// acquisition layer hands over raw bytes (file drops, camera frames,
    /// data URLs), not vetted filenames.
    pub fn sniff(bytes: &[u8]) -> Self {
        const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
        if bytes.starts_with(&PNG_SIGNATURE) {
            Self::Png
        } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
            Self::Jpeg
        } else {
            Self::Unknown
        }
    }
}
