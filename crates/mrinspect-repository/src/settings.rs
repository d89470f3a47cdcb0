//! Per-directory configuration interface for **mrinspect**.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ModrinthRepository;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the modrinth API, projects are looked up under
    /// `{api_base}/project/{id}`.
    pub api_base: Url,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: ModrinthRepository::default_api_base(),
        }
    }
}
