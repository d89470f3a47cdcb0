//! The fixed mapping between our field names and the ones used in
//! `modrinth.index.json`.
//!
//! The document uses `camelCase`, we use `snake_case`. Every field of
//! [`Manifest`] and [`FileEntry`] appears here exactly once, and the
//! validator only ever looks keys up through this table. Keys that aren't
//! listed here are ignored.
//!
//! [`Manifest`]: crate::Manifest
//! [`FileEntry`]: crate::FileEntry

/// A single entry of the name mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// The name of the field on our side.
    pub internal: &'static str,
    /// The key this field is stored under in the document.
    pub external: &'static str,
}

impl Field {
    const fn new(internal: &'static str, external: &'static str) -> Self {
        Self { internal, external }
    }
}

pub const FORMAT_VERSION: Field = Field::new("format_version", "formatVersion");
pub const GAME: Field = Field::new("game", "game");
pub const NAME: Field = Field::new("name", "name");
pub const VERSION_ID: Field = Field::new("version_id", "versionId");
pub const SUMMARY: Field = Field::new("summary", "summary");
pub const FILES: Field = Field::new("files", "files");
pub const DEPENDENCIES: Field = Field::new("dependencies", "dependencies");

pub const PATH: Field = Field::new("path", "path");
pub const HASHES: Field = Field::new("hashes", "hashes");
pub const ENV: Field = Field::new("env", "env");
pub const DOWNLOADS: Field = Field::new("downloads", "downloads");
pub const FILE_SIZE: Field = Field::new("file_size", "fileSize");

/// Every field of a [`Manifest`](crate::Manifest).
pub const MANIFEST_FIELDS: [Field; 7] = [
    FORMAT_VERSION,
    GAME,
    NAME,
    VERSION_ID,
    SUMMARY,
    FILES,
    DEPENDENCIES,
];

/// Every field of a [`FileEntry`](crate::FileEntry).
pub const FILE_FIELDS: [Field; 5] = [PATH, HASHES, ENV, DOWNLOADS, FILE_SIZE];
