//! The external GL client boundary.

use crate::ProgramHandle;

/// Synchronous calls into the out-of-process rendering service.
///
/// Two kinds of operation:
/// - the two bulk fetches, returning raw buffers in the wire formats of
///   [`glc_reflect_proto`] (an empty buffer means the service produced
///   nothing, typically on a lost context);
/// - one direct/uncached call per query, used whenever the cache cannot
///   answer. These reproduce the plain GL query contracts.
///
/// Implementations may re-enter the calling thread or depend on another
/// thread while a call is outstanding, which is why [`ProgramInfoManager`]
/// never holds its lock across any of these methods' bulk fetches.
///
/// [`ProgramInfoManager`]: crate::ProgramInfoManager
pub trait GlClient {
    /// Bulk-fetches the basic (attribute/uniform) reflection buffer.
    fn fetch_program_info(&self, program: ProgramHandle) -> Vec<u8>;

    /// Bulk-fetches the uniform-block reflection buffer.
    fn fetch_uniform_blocks(&self, program: ProgramHandle) -> Vec<u8>;

    fn get_program_iv(&self, program: ProgramHandle, pname: u32) -> i32;

    fn get_attrib_location(&self, program: ProgramHandle, name: &str) -> i32;

    fn get_uniform_location(&self, program: ProgramHandle, name: &str) -> i32;

    fn get_frag_data_location(&self, program: ProgramHandle, name: &str) -> i32;

    #[allow(clippy::too_many_arguments)]
    fn get_active_attrib(
        &self,
        program: ProgramHandle,
        index: u32,
        bufsize: usize,
        length: Option<&mut usize>,
        size: Option<&mut i32>,
        ty: Option<&mut u32>,
        name: Option<&mut [u8]>,
    ) -> bool;

    #[allow(clippy::too_many_arguments)]
    fn get_active_uniform(
        &self,
        program: ProgramHandle,
        index: u32,
        bufsize: usize,
        length: Option<&mut usize>,
        size: Option<&mut i32>,
        ty: Option<&mut u32>,
        name: Option<&mut [u8]>,
    ) -> bool;

    fn get_uniform_block_index(&self, program: ProgramHandle, name: &str) -> u32;

    fn get_active_uniform_block_name(
        &self,
        program: ProgramHandle,
        index: u32,
        bufsize: usize,
        length: Option<&mut usize>,
        name: Option<&mut [u8]>,
    ) -> bool;

    fn get_active_uniform_block_iv(
        &self,
        program: ProgramHandle,
        index: u32,
        pname: u32,
        params: &mut [i32],
    ) -> bool;
}
