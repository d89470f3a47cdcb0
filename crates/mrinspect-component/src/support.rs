use std::fmt;

use nutype::nutype;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a project relates to one side (client or server), as reported by the
/// catalog.
///
/// This is kept as the raw string the catalog sent: the set of values is
/// small, but not one we control. See [`SupportLevel::requirement`] for the
/// values we know about.
#[nutype(
    derive(
        From,
        Into,
        Serialize,
        Deserialize,
        PartialEq,
        Eq,
        Hash,
        Deref,
        Display,
        Clone,
        Debug,
    )
)]
pub struct SupportLevel(String);

impl SupportLevel {
    /// Interpret this level, if it's one of the known ones. Surrounding
    /// whitespace is ignored here, but kept in the level itself.
    #[must_use]
    pub fn requirement(&self) -> Option<Requirement> {
        self.trim().parse().ok()
    }
}

/// The support levels modrinth is known to report.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Requirement {
    Required,
    Optional,
    #[serde(alias = "incompatible")]
    #[strum(to_string = "unsupported", serialize = "incompatible")]
    Unsupported,
    Unknown,
}

impl Requirement {
    /// Whether the project can be loaded on this side at all.
    ///
    /// [`Requirement::Unknown`] gives no answer.
    #[must_use]
    pub const fn is_supported(self) -> Option<bool> {
        match self {
            Self::Required | Self::Optional => Some(true),
            Self::Unsupported => Some(false),
            Self::Unknown => None,
        }
    }
}

/// Client- and server-side support of a project.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Debug)]
#[must_use]
pub struct SupportInfo {
    pub client_side: SupportLevel,
    pub server_side: SupportLevel,
}

impl SupportInfo {
    pub fn new(client_side: impl Into<String>, server_side: impl Into<String>) -> Self {
        Self {
            client_side: SupportLevel::new(client_side.into()),
            server_side: SupportLevel::new(server_side.into()),
        }
    }
}

impl fmt::Display for SupportInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let client = self
            .client_side
            .requirement()
            .and_then(Requirement::is_supported);
        let server = self
            .server_side
            .requirement()
            .and_then(Requirement::is_supported);
        let repr = match (client, server) {
            (Some(true), Some(true)) => "client/server",
            (Some(true), Some(false)) => "client",
            (Some(false), Some(true)) => "server",
            (Some(false), Some(false)) => "nowhere",
            _ => return write!(f, "client: {}, server: {}", self.client_side, self.server_side),
        };
        write!(f, "{repr}")
    }
}
