use crate::error::ReflectDecodeError;
use crate::test_utils::{build_uniform_blocks, BlockSpec};
use crate::uniform_blocks::{decode_uniform_blocks, UniformBlocksUpdate};

#[test]
fn empty_buffer_is_no_data() {
    assert_eq!(decode_uniform_blocks(&[]), Ok(UniformBlocksUpdate::NoData));
}

#[test]
fn zero_blocks_decodes_to_empty_list() {
    // Indistinguishable from a failed link; both decode to an empty list.
    let buf = 0u32.to_le_bytes().to_vec();
    assert_eq!(
        decode_uniform_blocks(&buf),
        Ok(UniformBlocksUpdate::Blocks(Vec::new()))
    );
}

#[test]
fn decodes_blocks_with_names_and_indices() {
    let buf = build_uniform_blocks(&[
        BlockSpec {
            binding: 1,
            data_size: 128,
            name: "Lights",
            active_uniform_indices: &[0, 2, 5],
            referenced_by_vertex_shader: true,
            referenced_by_fragment_shader: false,
        },
        BlockSpec {
            binding: 3,
            data_size: 64,
            name: "Camera",
            active_uniform_indices: &[7],
            referenced_by_vertex_shader: true,
            referenced_by_fragment_shader: true,
        },
    ]);

    let UniformBlocksUpdate::Blocks(blocks) = decode_uniform_blocks(&buf).unwrap() else {
        panic!("expected Blocks");
    };
    assert_eq!(blocks.len(), 2);

    assert_eq!(blocks[0].binding, 1);
    assert_eq!(blocks[0].data_size, 128);
    assert_eq!(blocks[0].name, "Lights");
    assert_eq!(blocks[0].active_uniform_indices, vec![0, 2, 5]);
    assert!(blocks[0].referenced_by_vertex_shader);
    assert!(!blocks[0].referenced_by_fragment_shader);

    assert_eq!(blocks[1].binding, 3);
    assert_eq!(blocks[1].name, "Camera");
    assert_eq!(blocks[1].active_uniform_indices, vec![7]);
    assert!(blocks[1].referenced_by_fragment_shader);
}

#[test]
fn truncated_entry_table_is_rejected() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&2u32.to_le_bytes());
    buf.extend_from_slice(&[0u8; 24]); // one entry, two declared
    let err = decode_uniform_blocks(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::Truncated { .. }));
}

#[test]
fn name_overrunning_data_region_is_rejected() {
    let mut buf = build_uniform_blocks(&[BlockSpec {
        binding: 0,
        data_size: 16,
        name: "Block",
        active_uniform_indices: &[],
        referenced_by_vertex_shader: false,
        referenced_by_fragment_shader: false,
    }]);
    // Inflate the declared name_length past the end of the buffer.
    let name_length_pos = 4 + 20;
    buf[name_length_pos..name_length_pos + 4].copy_from_slice(&100u32.to_le_bytes());
    let err = decode_uniform_blocks(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::CursorOverrun { .. }));
}

#[test]
fn huge_declared_index_count_is_rejected_without_allocating() {
    let mut buf = build_uniform_blocks(&[BlockSpec {
        binding: 0,
        data_size: 16,
        name: "Block",
        active_uniform_indices: &[],
        referenced_by_vertex_shader: false,
        referenced_by_fragment_shader: false,
    }]);
    // A corrupt count near u32::MAX must produce a decode error, not a
    // multi-gigabyte reservation.
    let count_pos = 4 + 8;
    buf[count_pos..count_pos + 4].copy_from_slice(&u32::MAX.to_le_bytes());
    let err = decode_uniform_blocks(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::CursorOverrun { .. }));
}

#[test]
fn indices_overrunning_data_region_are_rejected() {
    let mut buf = build_uniform_blocks(&[BlockSpec {
        binding: 0,
        data_size: 16,
        name: "Block",
        active_uniform_indices: &[1, 2],
        referenced_by_vertex_shader: false,
        referenced_by_fragment_shader: false,
    }]);
    // Declare more indices than the data region holds.
    let count_pos = 4 + 8;
    buf[count_pos..count_pos + 4].copy_from_slice(&9u32.to_le_bytes());
    let err = decode_uniform_blocks(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::CursorOverrun { .. }));
}
