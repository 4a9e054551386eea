//! Client-side program-introspection cache.
//!
//! Shader reflection queries (attribute/uniform locations, uniform-block
//! layout, link status) are hot-path calls an application makes repeatedly
//! after linking a program. Each one would otherwise be a synchronous
//! round trip to the out-of-process rendering service. This crate fetches a
//! program's reflection data in bulk exactly once per category per link,
//! decodes it with [`glc_reflect_proto`], and answers subsequent queries from
//! memory with the same results (including the documented quirks) as the
//! direct, uncached query path.
//!
//! The public surface is [`ProgramInfoManager`]; the service boundary is the
//! [`GlClient`] trait, whose bulk-fetch and direct-query calls are the only
//! operations that leave the process.

pub mod client;
pub mod manager;
mod name_query;
pub mod program;

/// Opaque identifier for a program object in the rendering service.
pub type ProgramHandle = u32;

pub use client::GlClient;
pub use glc_reflect_proto::glenum;
pub use manager::ProgramInfoManager;
pub use program::{ProgramEntry, ReflectCategory};
