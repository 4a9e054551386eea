//! Builders that assemble valid reflection buffers for tests.
//!
//! Offsets in the basic-reflection buffer and the sequential data region of
//! the uniform-block buffer are computed here so tests don't hand-count byte
//! positions.

/// One attribute or uniform for [`build_program_info`].
///
/// Attributes take exactly one entry in `locations`; uniforms take one per
/// array element (`locations.len()` becomes the descriptor's `size`).
pub struct InputSpec<'a> {
    pub ty: u32,
    pub name: &'a str,
    pub locations: &'a [i32],
}

/// One block for [`build_uniform_blocks`].
pub struct BlockSpec<'a> {
    pub binding: u32,
    pub data_size: u32,
    pub name: &'a str,
    pub active_uniform_indices: &'a [u32],
    pub referenced_by_vertex_shader: bool,
    pub referenced_by_fragment_shader: bool,
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Builds a successfully-linked basic-reflection buffer.
pub fn build_program_info(attribs: &[InputSpec], uniforms: &[InputSpec]) -> Vec<u8> {
    let num_inputs = attribs.len() + uniforms.len();
    let descriptors_end = crate::program_info::PROGRAM_INFO_HEADER_LEN
        + num_inputs * crate::program_info::PROGRAM_INPUT_LEN;

    let mut buf = Vec::new();
    push_u32(&mut buf, 1); // link_status
    push_u32(&mut buf, attribs.len() as u32);
    push_u32(&mut buf, uniforms.len() as u32);

    // Location and name payloads are appended after the descriptor table.
    let mut payload = Vec::new();
    for input in attribs.iter().chain(uniforms) {
        let location_offset = descriptors_end + payload.len();
        for &loc in input.locations {
            push_i32(&mut payload, loc);
        }
        let name_offset = descriptors_end + payload.len();
        payload.extend_from_slice(input.name.as_bytes());

        push_u32(&mut buf, input.ty);
        push_i32(&mut buf, input.locations.len() as i32); // size
        push_u32(&mut buf, location_offset as u32);
        push_u32(&mut buf, name_offset as u32);
        push_u32(&mut buf, input.name.len() as u32);
    }
    buf.extend_from_slice(&payload);
    buf
}

/// Builds a basic-reflection buffer whose header reports a failed link.
pub fn build_link_failed_program_info() -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, 0); // link_status
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    buf
}

/// Builds a uniform-block reflection buffer.
pub fn build_uniform_blocks(blocks: &[BlockSpec]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, blocks.len() as u32);
    for block in blocks {
        push_u32(&mut buf, block.binding);
        push_u32(&mut buf, block.data_size);
        push_u32(&mut buf, block.active_uniform_indices.len() as u32);
        push_u32(&mut buf, block.referenced_by_vertex_shader as u32);
        push_u32(&mut buf, block.referenced_by_fragment_shader as u32);
        push_u32(&mut buf, block.name.len() as u32);
    }
    for block in blocks {
        buf.extend_from_slice(block.name.as_bytes());
        for &idx in block.active_uniform_indices {
            push_u32(&mut buf, idx);
        }
    }
    buf
}
