//! The GLenum values the reflection cache dispatches on.
//!
//! Only the program-introspection subset is mirrored here; the values match
//! the GL ES headers so cached answers are byte-compatible with the direct
//! (uncached) query path.

pub const LINK_STATUS: u32 = 0x8B82;
pub const ACTIVE_UNIFORMS: u32 = 0x8B86;
pub const ACTIVE_UNIFORM_MAX_LENGTH: u32 = 0x8B87;
pub const ACTIVE_ATTRIBUTES: u32 = 0x8B89;
pub const ACTIVE_ATTRIBUTE_MAX_LENGTH: u32 = 0x8B8A;

pub const ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH: u32 = 0x8A35;
pub const ACTIVE_UNIFORM_BLOCKS: u32 = 0x8A36;

pub const UNIFORM_BLOCK_BINDING: u32 = 0x8A3F;
pub const UNIFORM_BLOCK_DATA_SIZE: u32 = 0x8A40;
pub const UNIFORM_BLOCK_NAME_LENGTH: u32 = 0x8A41;
pub const UNIFORM_BLOCK_ACTIVE_UNIFORMS: u32 = 0x8A42;
pub const UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES: u32 = 0x8A43;
pub const UNIFORM_BLOCK_REFERENCED_BY_VERTEX_SHADER: u32 = 0x8A44;
pub const UNIFORM_BLOCK_REFERENCED_BY_FRAGMENT_SHADER: u32 = 0x8A45;

/// Sentinel returned by uniform-block index lookups that find nothing.
pub const INVALID_INDEX: u32 = 0xFFFF_FFFF;

// A few common type enums, mostly for tests and debug output.
pub const FLOAT: u32 = 0x1406;
pub const FLOAT_VEC2: u32 = 0x8B50;
pub const FLOAT_VEC4: u32 = 0x8B52;
pub const FLOAT_MAT4: u32 = 0x8B5C;
