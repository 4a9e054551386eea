use crate::error::ReflectDecodeError;
use crate::program_info::{decode_program_info, ProgramInfoUpdate, PROGRAM_INFO_HEADER_LEN};
use crate::test_utils::{build_link_failed_program_info, build_program_info, InputSpec};
use crate::glenum;

#[test]
fn empty_buffer_is_no_data() {
    assert_eq!(decode_program_info(&[]), Ok(ProgramInfoUpdate::NoData));
}

#[test]
fn truncated_header_is_rejected() {
    let err = decode_program_info(&[1, 0, 0, 0, 2]).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::Truncated { .. }));
}

#[test]
fn link_failed_header_skips_descriptors() {
    // A failed link leaves the descriptor region undefined; nonzero counts
    // with no descriptor bytes at all must still decode as LinkFailed.
    let mut buf = Vec::new();
    buf.extend_from_slice(&0u32.to_le_bytes()); // link_status
    buf.extend_from_slice(&3u32.to_le_bytes()); // num_attribs
    buf.extend_from_slice(&7u32.to_le_bytes()); // num_uniforms
    assert_eq!(decode_program_info(&buf), Ok(ProgramInfoUpdate::LinkFailed));
}

#[test]
fn decodes_attribs_and_uniforms() {
    let buf = build_program_info(
        &[
            InputSpec {
                ty: glenum::FLOAT_VEC4,
                name: "position",
                locations: &[0],
            },
            InputSpec {
                ty: glenum::FLOAT_VEC2,
                name: "uv",
                locations: &[1],
            },
        ],
        &[
            InputSpec {
                ty: glenum::FLOAT,
                name: "opacity",
                locations: &[3],
            },
            InputSpec {
                ty: glenum::FLOAT_MAT4,
                name: "bones[0]",
                locations: &[10, 11, 12, 13],
            },
        ],
    );

    let ProgramInfoUpdate::Linked { attribs, uniforms } = decode_program_info(&buf).unwrap()
    else {
        panic!("expected Linked");
    };

    assert_eq!(attribs.len(), 2);
    assert_eq!(attribs[0].name, "position");
    assert_eq!(attribs[0].location, 0);
    assert_eq!(attribs[0].ty, glenum::FLOAT_VEC4);
    assert_eq!(attribs[0].size, 1);
    assert_eq!(attribs[1].name, "uv");
    assert_eq!(attribs[1].location, 1);

    assert_eq!(uniforms.len(), 2);
    assert_eq!(uniforms[0].name, "opacity");
    assert!(!uniforms[0].is_array);
    assert_eq!(uniforms[0].element_locations, vec![3]);
    assert_eq!(uniforms[1].name, "bones[0]");
    assert!(uniforms[1].is_array);
    assert_eq!(uniforms[1].size, 4);
    assert_eq!(uniforms[1].element_locations, vec![10, 11, 12, 13]);
}

#[test]
fn uniform_array_keeps_per_element_locations() {
    let buf = build_program_info(
        &[],
        &[InputSpec {
            ty: glenum::FLOAT_MAT4,
            name: "matrix[4]",
            locations: &[20, 21, 22, 23, 24, 25],
        }],
    );
    let ProgramInfoUpdate::Linked { uniforms, .. } = decode_program_info(&buf).unwrap() else {
        panic!("expected Linked");
    };
    assert!(uniforms[0].is_array);
    assert_eq!(uniforms[0].size, 6);
    assert_eq!(uniforms[0].element_locations, vec![20, 21, 22, 23, 24, 25]);
}

#[test]
fn name_offset_outside_buffer_is_rejected() {
    let mut buf = build_program_info(
        &[InputSpec {
            ty: glenum::FLOAT_VEC4,
            name: "position",
            locations: &[0],
        }],
        &[],
    );
    // Patch the attribute's name_offset to point past the end.
    let name_offset_pos = PROGRAM_INFO_HEADER_LEN + 12;
    let bogus = (buf.len() as u32).to_le_bytes();
    buf[name_offset_pos..name_offset_pos + 4].copy_from_slice(&bogus);
    let err = decode_program_info(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::Truncated { .. }));
}

#[test]
fn location_offset_outside_buffer_is_rejected() {
    let mut buf = build_program_info(
        &[InputSpec {
            ty: glenum::FLOAT_VEC4,
            name: "position",
            locations: &[0],
        }],
        &[],
    );
    let location_offset_pos = PROGRAM_INFO_HEADER_LEN + 8;
    let bogus = (buf.len() as u32 - 1).to_le_bytes();
    buf[location_offset_pos..location_offset_pos + 4].copy_from_slice(&bogus);
    let err = decode_program_info(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::Truncated { .. }));
}

#[test]
fn huge_uniform_size_is_rejected_without_allocating() {
    let mut buf = build_program_info(
        &[],
        &[InputSpec {
            ty: glenum::FLOAT,
            name: "opacity",
            locations: &[3],
        }],
    );
    // A corrupt size must produce a decode error once the location reads run
    // off the end, not a multi-gigabyte reservation up front.
    let size_pos = PROGRAM_INFO_HEADER_LEN + 4;
    buf[size_pos..size_pos + 4].copy_from_slice(&i32::MAX.to_le_bytes());
    let err = decode_program_info(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::Truncated { .. }));
}

#[test]
fn zero_size_uniform_is_rejected() {
    let mut buf = build_program_info(
        &[],
        &[InputSpec {
            ty: glenum::FLOAT,
            name: "opacity",
            locations: &[3],
        }],
    );
    let size_pos = PROGRAM_INFO_HEADER_LEN + 4;
    buf[size_pos..size_pos + 4].copy_from_slice(&0i32.to_le_bytes());
    let err = decode_program_info(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::BadDescriptor { .. }));
}

#[test]
fn invalid_utf8_name_is_rejected() {
    let mut buf = build_program_info(
        &[InputSpec {
            ty: glenum::FLOAT_VEC4,
            name: "pos",
            locations: &[0],
        }],
        &[],
    );
    let name_pos = buf.len() - 3;
    buf[name_pos] = 0xFF;
    let err = decode_program_info(&buf).unwrap_err();
    assert!(matches!(err, ReflectDecodeError::BadName { .. }));
}
