//! Media files selected for upload.

/// Raw bytes of a selected file plus its original name. Transient input only.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Original file name as selected by the user.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl MediaFile {
    /// Creates a media file.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-byte file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
