use std::fmt;

use color_eyre::owo_colors::OwoColorize;
use mrinspect_component::{Provenance, ResolutionError, SupportInfo};
use mrinspect_index::{Manifest, ValidationError};
use mrinspect_repository::{ClientError, SupportCatalog};
use serde::Serialize;
use tracing::instrument;

/// Everything we found out about one file of a pack.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Inspection {
    pub file_count: usize,
    pub path: String,
    pub file_size: u64,
    pub download_url: String,
    pub provenance: Provenance,
    pub support: SupportInfo,
}

/// Errors that may occur along the way, one variant per stage.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The pack has {file_count} file(s), there's no file at index {index}")]
    NoSuchFile { index: usize, file_count: usize },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl InspectError {
    /// The process exit code for this error. `1` and `2` are left for
    /// everything else and for usage errors.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 3,
            Self::NoSuchFile { .. } => 4,
            Self::Resolution(_) => 5,
            Self::Client(ClientError::Network { .. } | ClientError::Status { .. }) => 6,
            Self::Client(ClientError::NotFound { .. }) => 7,
            Self::Client(ClientError::Malformed { .. }) => 8,
        }
    }
}

/// Validate `raw`, pick the file at `index`, figure out where it came from
/// and ask `catalog` about it.
///
/// Every stage fails fast, there is no partial result.
#[instrument(skip(raw, catalog), fields(bytes = raw.len()))]
pub fn inspect(
    raw: &[u8],
    index: usize,
    catalog: &impl SupportCatalog,
) -> Result<Inspection, InspectError> {
    let manifest = Manifest::validate(raw)?;
    let file_count = manifest.files.len();
    tracing::debug!(pack = %manifest.name, file_count, "Validated the manifest");

    let file = manifest
        .file(index)
        .ok_or(InspectError::NoSuchFile { index, file_count })?;
    let download_url = file
        .canonical_download()
        .ok_or(ResolutionError::NoDownloads)?;
    let provenance = Provenance::resolve(download_url)?;
    tracing::debug!(?provenance, "Resolved the canonical download");

    let support = catalog.fetch_support(&provenance.project_id)?;

    Ok(Inspection {
        file_count,
        path: file.path.clone(),
        file_size: file.file_size,
        download_url: download_url.to_owned(),
        provenance,
        support,
    })
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = |label: &'static str| format!("{label:>16}").bold().to_string();
        writeln!(
            f,
            "{}",
            format!("Found {} files in modpack", self.file_count).green()
        )?;
        writeln!(
            f,
            "{} {} ({} bytes)",
            label("file"),
            self.path.bold(),
            self.file_size
        )?;
        writeln!(f, "{} {}", label("download"), self.download_url.underline())?;
        writeln!(
            f,
            "{} {}",
            label("project id"),
            self.provenance.project_id.cyan()
        )?;
        writeln!(
            f,
            "{} {}",
            label("version id"),
            self.provenance.version_id.cyan()
        )?;
        writeln!(f, "{} {}", label("filename"), self.provenance.filename)?;
        writeln!(
            f,
            "{} {}",
            label("client support"),
            self.support.client_side.purple()
        )?;
        writeln!(
            f,
            "{} {}",
            label("server support"),
            self.support.server_side.purple()
        )?;
        write!(f, "{} {}", label("environment"), self.support.bold())
    }
}
