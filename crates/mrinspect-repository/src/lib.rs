#![allow(clippy::missing_errors_doc)]

mod modrinth;
pub mod persist;
mod settings;
pub use modrinth::*;
pub use settings::*;

use crate::persist::PersistedEntity;

impl PersistedEntity for Settings {
    const FILE_PATH: &'static str = "mrinspect.yml";
}
