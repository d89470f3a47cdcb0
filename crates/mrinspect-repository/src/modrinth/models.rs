use mrinspect_component::{SupportInfo, SupportLevel};
use serde::Deserialize;

/// The part of a `GET /v2/project/{id}` response we care about.
///
/// Modrinth sends a lot more than that, all of it is ignored.
#[derive(Deserialize, Debug)]
pub struct Project {
    pub client_side: SupportLevel,
    pub server_side: SupportLevel,
}

impl From<Project> for SupportInfo {
    fn from(project: Project) -> Self {
        Self {
            client_side: project.client_side,
            server_side: project.server_side,
        }
    }
}
