//! This crate is a part of **[mrinspect]**.
//!
//! ## What's an index?
//!
//! Every [`.mrpack`] carries a `modrinth.index.json` at its root, describing
//! the pack itself and every file a launcher has to download to assemble it.
//! This crate turns the raw bytes of such a document into a [`Manifest`],
//! or explains precisely why it can't.
//!
//! Validation is done in two phases: the bytes are first parsed into a
//! loosely-typed [`serde_json::Value`], which is then walked field by field
//! against the [`schema`] table. Every problem found along the way is
//! collected, so a broken index is reported in one go.
//!
//! [mrinspect]: https://github.com/exoumoon/mrinspect
//! [`.mrpack`]: https://support.modrinth.com/en/articles/8802351-modrinth-modpack-format-mrpack

mod manifest;
pub mod schema;
mod validate;

pub use manifest::*;
pub use validate::{Issue, IssueKind, ValidationError};
