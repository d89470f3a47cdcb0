use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Where a modpack file came from: a project, one of its versions, and the
/// name of the file in that version.
///
/// This is derived from the file's canonical download URL, which has to be a
/// [modrinth CDN] URL of the following shape:
///
/// ```not-rust
/// https://cdn.modrinth.com/data/<project id>/versions/<version id>/<filename>
/// ```
///
/// No other hosting provider is understood.
///
/// [modrinth CDN]: https://cdn.modrinth.com
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Provenance {
    pub project_id: String,
    /// The ID of the project's version, not to be confused with the pack's.
    pub version_id: String,
    pub filename: String,
}

impl Provenance {
    /// Position of the project ID among the `/`-separated path segments.
    ///
    /// The path starts with a `/`, so the segment at index 0 is always empty.
    pub const PROJECT_ID_SEGMENT: usize = 2;
    pub const VERSION_ID_SEGMENT: usize = 4;
    pub const FILENAME_SEGMENT: usize = 5;
    pub const MIN_SEGMENTS: usize = Self::FILENAME_SEGMENT + 1;

    /// Decompose a single download URL.
    ///
    /// # Errors
    ///
    /// This function will return an error if the URL can't be parsed as an
    /// absolute one, if it has no path, or if its path is shorter than the
    /// shape described on [`Provenance`].
    pub fn resolve(download_url: &str) -> Result<Self, ResolutionError> {
        let url = Url::parse(download_url).map_err(|source| ResolutionError::InvalidUrl {
            url: download_url.to_owned(),
            source,
        })?;

        let path = url.path();
        if url.cannot_be_a_base() || path.is_empty() || path == "/" {
            return Err(ResolutionError::MissingPath { url });
        }

        let segments: Vec<&str> = path.split('/').collect();
        tracing::debug!(?segments, "Split the download path into segments");
        if segments.len() < Self::MIN_SEGMENTS {
            let shape = Shape::TooFewSegments(segments.len());
            return Err(ResolutionError::ShapeMismatch { url, shape });
        }

        let segment = |index: usize| match segments[index] {
            "" => Err(Shape::EmptySegment(index)),
            segment => Ok(segment.to_owned()),
        };
        let resolve = || -> Result<Self, Shape> {
            Ok(Self {
                project_id: segment(Self::PROJECT_ID_SEGMENT)?,
                version_id: segment(Self::VERSION_ID_SEGMENT)?,
                filename: segment(Self::FILENAME_SEGMENT)?,
            })
        };

        resolve().map_err(|shape| ResolutionError::ShapeMismatch { url, shape })
    }
}

/// Errors that may occur when resolving a [`Provenance`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("The file has no download URLs")]
    NoDownloads,

    #[error("{url:?} is not a valid absolute URL")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("{url} has no path to extract anything from")]
    MissingPath { url: Url },

    #[error("{url} does not look like a modrinth CDN URL: {shape}")]
    ShapeMismatch { url: Url, shape: Shape },
}

/// How exactly a download path failed to match the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// The path had this many segments, less than [`Provenance::MIN_SEGMENTS`].
    TooFewSegments(usize),
    /// The segment at this position was empty.
    EmptySegment(usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSegments(count) => write!(
                formatter,
                "expected at least {} path segments, found {count}",
                Provenance::MIN_SEGMENTS
            ),
            Self::EmptySegment(index) => write!(formatter, "path segment {index} is empty"),
        }
    }
}
