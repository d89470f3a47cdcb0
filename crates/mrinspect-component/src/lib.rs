//! This crate is a part of **[mrinspect]**.
//!
//! ## What's a component?
//!
//! Every file of a modpack came from *somewhere*. For files hosted on
//! [modrinth.com], that somewhere is a project, and a specific version of
//! it. This crate holds the types describing where a file came from
//! ([`Provenance`]) and how its project behaves on clients and servers
//! ([`SupportInfo`]).
//!
//! This crate does not talk to any remote API, it only provides types and
//! the pure logic around them to be used by other parts of **[mrinspect]**.
//!
//! [mrinspect]: https://github.com/exoumoon/mrinspect
//! [modrinth.com]: https://modrinth.com

mod provenance;
mod support;
pub use provenance::*;
pub use support::*;
