//! Reflection wire formats for the GL command-stream client.
//!
//! After a program links, the rendering service serializes its reflection
//! data (attribute/uniform tables, uniform-block layout, link status) into
//! compact binary buffers that the client fetches in bulk, once per category
//! per link. This crate holds the two buffer layouts and their pure decoders:
//!
//! - [`program_info`] — attributes, uniforms and link status. Fixed header
//!   plus fixed-size descriptors whose payloads (locations, name bytes) are
//!   addressed by explicit offsets into the same buffer.
//! - [`uniform_blocks`] — uniform-block layout. Fixed header plus fixed-size
//!   descriptors followed by a single variable-length data region walked with
//!   a sequential cursor.
//!
//! The buffers come from the trusted service side, but the decoders still
//! validate every offset and cursor step: a malformed buffer produces a
//! [`ReflectDecodeError`], never a panic or an out-of-bounds read. Callers
//! treat a decode error as "nothing decoded" and keep their previous state.

pub mod error;
pub mod glenum;
pub mod program_info;
pub mod uniform_blocks;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests_program_info;
#[cfg(test)]
mod tests_uniform_blocks;

pub use error::ReflectDecodeError;
pub use program_info::{decode_program_info, ActiveUniform, ProgramInfoUpdate, VertexAttrib};
pub use uniform_blocks::{decode_uniform_blocks, UniformBlock, UniformBlocksUpdate};
