//! Basic (attribute/uniform) reflection buffer.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! header:  { link_status: u32, num_attribs: u32, num_uniforms: u32 }
//! inputs:  num_attribs + num_uniforms descriptors, 20 bytes each:
//!          { type: u32, size: i32, location_offset: u32,
//!            name_offset: u32, name_length: u32 }
//! ```
//!
//! `location_offset` and `name_offset` address bytes elsewhere in the *same*
//! buffer. The first `num_attribs` descriptors are attributes and locate one
//! `i32`; the remaining `num_uniforms` descriptors are uniforms and locate
//! `size` contiguous `i32` locations, one per array element (`size == 1` for
//! non-array uniforms).
//!
//! On link failure the service emits a header with `link_status == 0` and the
//! descriptor region is undefined; the decoder must not read past the header.

use crate::error::{ReflectDecodeError, Result};

pub const PROGRAM_INFO_HEADER_LEN: usize = 12;
pub const PROGRAM_INPUT_LEN: usize = 20;

/// One active vertex attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttrib {
    pub size: i32,
    pub ty: u32,
    pub name: String,
    pub location: i32,
}

/// One active uniform, with one location per array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUniform {
    pub size: i32,
    pub ty: u32,
    pub name: String,
    /// True iff the name's final character is `]`.
    pub is_array: bool,
    /// `element_locations.len() == size as usize`.
    pub element_locations: Vec<i32>,
}

/// Decoded contents of one basic-reflection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramInfoUpdate {
    /// The service produced nothing, typically because the rendering context
    /// was lost. The caller keeps its previous state and stays uncached.
    NoData,
    /// The last link failed. Descriptor contents are undefined and unread;
    /// the caller clears its tables and still counts the category as cached.
    LinkFailed,
    /// A successful link's full reflection snapshot.
    Linked {
        attribs: Vec<VertexAttrib>,
        uniforms: Vec<ActiveUniform>,
    },
}

pub fn decode_program_info(bytes: &[u8]) -> Result<ProgramInfoUpdate> {
    if bytes.is_empty() {
        return Ok(ProgramInfoUpdate::NoData);
    }

    let link_status = read_u32_le(bytes, 0)?;
    let num_attribs = read_u32_le(bytes, 4)? as usize;
    let num_uniforms = read_u32_le(bytes, 8)? as usize;
    if link_status == 0 {
        return Ok(ProgramInfoUpdate::LinkFailed);
    }

    let num_inputs = num_attribs
        .checked_add(num_uniforms)
        .ok_or(ReflectDecodeError::OffsetOverflow)?;

    let mut attribs = Vec::with_capacity(num_attribs.min(bytes.len() / PROGRAM_INPUT_LEN));
    let mut uniforms = Vec::with_capacity(num_uniforms.min(bytes.len() / PROGRAM_INPUT_LEN));

    for index in 0..num_inputs {
        let base = index
            .checked_mul(PROGRAM_INPUT_LEN)
            .and_then(|o| o.checked_add(PROGRAM_INFO_HEADER_LEN))
            .ok_or(ReflectDecodeError::OffsetOverflow)?;

        let ty = read_u32_le(bytes, base)?;
        let size = read_i32_le(bytes, base + 4)?;
        let location_offset = read_u32_le(bytes, base + 8)? as usize;
        let name_offset = read_u32_le(bytes, base + 12)? as usize;
        let name_length = read_u32_le(bytes, base + 16)? as usize;

        let name = read_name(bytes, name_offset, name_length)?;

        if index < num_attribs {
            let location = read_i32_le(bytes, location_offset)?;
            attribs.push(VertexAttrib {
                size,
                ty,
                name,
                location,
            });
        } else {
            if size < 1 {
                return Err(ReflectDecodeError::BadDescriptor {
                    index,
                    reason: "uniform size must be at least 1",
                });
            }
            // `size` is an unvalidated wire field; cap the reservation at
            // what the buffer could possibly hold so a corrupt descriptor
            // cannot force a huge allocation before the reads reject it.
            let mut element_locations =
                Vec::with_capacity((size as usize).min(bytes.len() / 4));
            for element in 0..size as usize {
                let offset = element
                    .checked_mul(4)
                    .and_then(|o| o.checked_add(location_offset))
                    .ok_or(ReflectDecodeError::OffsetOverflow)?;
                element_locations.push(read_i32_le(bytes, offset)?);
            }
            let is_array = name.ends_with(']');
            uniforms.push(ActiveUniform {
                size,
                ty,
                name,
                is_array,
                element_locations,
            });
        }
    }

    Ok(ProgramInfoUpdate::Linked { attribs, uniforms })
}

fn read_name(bytes: &[u8], offset: usize, len: usize) -> Result<String> {
    let end = offset
        .checked_add(len)
        .ok_or(ReflectDecodeError::OffsetOverflow)?;
    let slice = bytes
        .get(offset..end)
        .ok_or(ReflectDecodeError::Truncated {
            offset,
            need: len,
            len: bytes.len(),
        })?;
    std::str::from_utf8(slice)
        .map(str::to_owned)
        .map_err(|_| ReflectDecodeError::BadName { offset, end })
}

pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32> {
    let end = offset
        .checked_add(4)
        .ok_or(ReflectDecodeError::OffsetOverflow)?;
    let slice = bytes
        .get(offset..end)
        .ok_or(ReflectDecodeError::Truncated {
            offset,
            need: 4,
            len: bytes.len(),
        })?;
    Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

pub(crate) fn read_i32_le(bytes: &[u8], offset: usize) -> Result<i32> {
    read_u32_le(bytes, offset).map(|v| v as i32)
}
