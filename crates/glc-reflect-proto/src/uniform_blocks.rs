//! Uniform-block reflection buffer.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! header:  { num_uniform_blocks: u32 }
//! entries: num_uniform_blocks descriptors, 24 bytes each:
//!          { binding: u32, data_size: u32, active_uniform_count: u32,
//!            referenced_by_vertex: u32, referenced_by_fragment: u32,
//!            name_length: u32 }
//! data:    per block, in entry order:
//!          name_length name bytes (no terminator), then
//!          active_uniform_count u32 uniform indices
//! ```
//!
//! Unlike the basic-reflection buffer there are no embedded offsets: the data
//! region is walked with a running cursor, which must never pass the end of
//! the buffer.
//!
//! `num_uniform_blocks == 0` cannot be told apart from "the previous link
//! failed"; the decoder returns an empty list either way and the caller
//! counts the category as cached. Disambiguating would require a status flag
//! in the wire contract.

use crate::error::{ReflectDecodeError, Result};
use crate::program_info::read_u32_le;

pub const UNIFORM_BLOCKS_HEADER_LEN: usize = 4;
pub const UNIFORM_BLOCK_ENTRY_LEN: usize = 24;

/// One active uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBlock {
    pub binding: u32,
    pub data_size: u32,
    pub name: String,
    /// Indices into the program's active-uniform table.
    pub active_uniform_indices: Vec<u32>,
    pub referenced_by_vertex_shader: bool,
    pub referenced_by_fragment_shader: bool,
}

/// Decoded contents of one uniform-block fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformBlocksUpdate {
    /// The service produced nothing (lost context); keep previous state.
    NoData,
    /// The block list, possibly empty (no blocks, or the link failed).
    Blocks(Vec<UniformBlock>),
}

pub fn decode_uniform_blocks(bytes: &[u8]) -> Result<UniformBlocksUpdate> {
    if bytes.is_empty() {
        return Ok(UniformBlocksUpdate::NoData);
    }

    let num_blocks = read_u32_le(bytes, 0)? as usize;
    if num_blocks == 0 {
        return Ok(UniformBlocksUpdate::Blocks(Vec::new()));
    }

    let entries_len = num_blocks
        .checked_mul(UNIFORM_BLOCK_ENTRY_LEN)
        .ok_or(ReflectDecodeError::OffsetOverflow)?;
    let data_start = UNIFORM_BLOCKS_HEADER_LEN
        .checked_add(entries_len)
        .ok_or(ReflectDecodeError::OffsetOverflow)?;
    if data_start > bytes.len() {
        return Err(ReflectDecodeError::Truncated {
            offset: UNIFORM_BLOCKS_HEADER_LEN,
            need: entries_len,
            len: bytes.len(),
        });
    }

    let mut blocks = Vec::with_capacity(num_blocks);
    let mut cursor = data_start;
    for index in 0..num_blocks {
        let base = UNIFORM_BLOCKS_HEADER_LEN + index * UNIFORM_BLOCK_ENTRY_LEN;
        let binding = read_u32_le(bytes, base)?;
        let data_size = read_u32_le(bytes, base + 4)?;
        let active_uniform_count = read_u32_le(bytes, base + 8)? as usize;
        let referenced_by_vertex_shader = read_u32_le(bytes, base + 12)? != 0;
        let referenced_by_fragment_shader = read_u32_le(bytes, base + 16)? != 0;
        let name_length = read_u32_le(bytes, base + 20)? as usize;

        let name_end = cursor
            .checked_add(name_length)
            .ok_or(ReflectDecodeError::OffsetOverflow)?;
        let name_bytes = bytes
            .get(cursor..name_end)
            .ok_or(ReflectDecodeError::CursorOverrun {
                cursor: name_end,
                len: bytes.len(),
            })?;
        let name = std::str::from_utf8(name_bytes)
            .map(str::to_owned)
            .map_err(|_| ReflectDecodeError::BadName {
                offset: cursor,
                end: name_end,
            })?;
        cursor = name_end;

        // The count is an unvalidated wire field; cap the reservation at what
        // the remaining bytes could possibly hold so a corrupt buffer cannot
        // force a huge allocation before the cursor check rejects it.
        let mut active_uniform_indices =
            Vec::with_capacity(active_uniform_count.min((bytes.len() - cursor) / 4));
        for _ in 0..active_uniform_count {
            let next = cursor
                .checked_add(4)
                .ok_or(ReflectDecodeError::OffsetOverflow)?;
            if next > bytes.len() {
                return Err(ReflectDecodeError::CursorOverrun {
                    cursor: next,
                    len: bytes.len(),
                });
            }
            active_uniform_indices.push(read_u32_le(bytes, cursor)?);
            cursor = next;
        }

        blocks.push(UniformBlock {
            binding,
            data_size,
            name,
            active_uniform_indices,
            referenced_by_vertex_shader,
            referenced_by_fragment_shader,
        });
    }

    Ok(UniformBlocksUpdate::Blocks(blocks))
}
