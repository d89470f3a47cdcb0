use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::validate::{ValidationError, Validator};

/// A validated `modrinth.index.json`.
///
/// There is no way to deserialize this directly: go through
/// [`Manifest::validate`] (or [`str::parse`]), which reports every schema
/// violation instead of bailing on the first one. Serializing produces the
/// same `camelCase` document that was validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Manifest {
    pub format_version: u32,
    pub game: String,
    pub name: String,
    pub version_id: String,
    pub summary: Option<String>,
    pub files: Vec<FileEntry>,
    pub dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Parse and validate raw document bytes.
    ///
    /// A leading UTF-8 byte order mark is tolerated.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the bytes aren't JSON, the root isn't
    /// an object, or any required field is missing or has the wrong type.
    pub fn validate(bytes: impl AsRef<[u8]>) -> Result<Self, ValidationError> {
        const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";
        let bytes = bytes.as_ref();
        let bytes = bytes.strip_prefix(BYTE_ORDER_MARK).unwrap_or(bytes);
        let document: serde_json::Value = serde_json::from_slice(bytes)?;
        Validator::default().manifest(&document)
    }

    /// The file at `index` in the `files` array, if there is one.
    #[must_use]
    pub fn file(&self, index: usize) -> Option<&FileEntry> {
        self.files.get(index)
    }
}

impl FromStr for Manifest {
    type Err = ValidationError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        Self::validate(str)
    }
}

/// An entry in the `files` array of the [`Manifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct FileEntry {
    /// The **runtime** path of this file, relative to the instance directory.
    pub path: String,

    /// Hex digests of the file, keyed by algorithm (`sha1`, `sha512`, ...).
    pub hashes: BTreeMap<String, String>,

    /// Client- and server-side applicability of the file.
    pub env: BTreeMap<String, String>,

    /// URLs this file may be downloaded from. The first one is canonical.
    pub downloads: Vec<String>,

    /// The size of the file, in bytes.
    pub file_size: u64,
}

impl FileEntry {
    /// The first URL of [`downloads`](Self::downloads), if any.
    #[must_use]
    pub fn canonical_download(&self) -> Option<&str> {
        self.downloads.first().map(String::as_str)
    }
}
