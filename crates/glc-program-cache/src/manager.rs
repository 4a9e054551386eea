//! The public cache surface and its locking discipline.

use std::collections::HashMap;
use std::sync::Mutex;

use glc_reflect_proto::{decode_program_info, decode_uniform_blocks};
use tracing::{debug, warn};

use crate::client::GlClient;
use crate::name_query::copy_bounded_name;
use crate::program::{ProgramEntry, ReflectCategory};
use crate::{glenum, ProgramHandle};

/// Program-reflection cache keyed by program handle.
///
/// One exclusive lock guards the entry table for the duration of every
/// public operation, with a single exception: the lock is released across
/// each bulk-fetch call into the [`GlClient`], because the transport may
/// re-enter this thread or need another thread to make progress while the
/// call is outstanding. Two threads may therefore race to fetch the same
/// uncached category; both decode independently and the second commit is a
/// no-op, which is accepted over adding an in-flight marker since decode is
/// a pure function of already-correct bytes.
#[derive(Debug, Default)]
pub struct ProgramInfoManager {
    programs: Mutex<HashMap<ProgramHandle, ProgramEntry>>,
}

impl ProgramInfoManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh, fully-uncached entry for `program`, discarding any
    /// previous one. Called after a successful program registration or
    /// (re)link, which invalidates all previously cached reflection.
    pub fn create_info(&self, program: ProgramHandle) {
        let mut programs = self.programs.lock().unwrap();
        programs.insert(program, ProgramEntry::new());
    }

    /// Removes the entry for `program`, if present. Called on deletion.
    pub fn delete_info(&self, program: ProgramHandle) {
        let mut programs = self.programs.lock().unwrap();
        programs.remove(&program);
    }

    /// Runs `f` against the entry for `program` once `category` is cached.
    ///
    /// `None` means the cache cannot answer (no entry, or the fetch produced
    /// nothing decodable) and the caller must use the direct path. At most
    /// one bulk fetch is issued per call; the table lock is dropped for its
    /// duration and the entry re-looked-up afterwards, since it may have
    /// been deleted or already populated by a racing thread in between.
    fn with_cached_entry<R>(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        category: ReflectCategory,
        f: impl FnOnce(&ProgramEntry) -> R,
    ) -> Option<R> {
        let programs = self.programs.lock().unwrap();
        match programs.get(&program) {
            None => return None,
            Some(entry) if entry.is_cached(category) => return Some(f(entry)),
            Some(_) => {}
        }
        drop(programs);

        debug!(program, ?category, "bulk-fetching program reflection");
        let bytes = match category {
            ReflectCategory::Basic => gl.fetch_program_info(program),
            ReflectCategory::UniformBlocks => gl.fetch_uniform_blocks(program),
        };

        let mut programs = self.programs.lock().unwrap();
        let entry = programs.get_mut(&program)?;
        match category {
            ReflectCategory::Basic => match decode_program_info(&bytes) {
                Ok(update) => entry.apply_basic(update),
                Err(error) => {
                    warn!(program, %error, "rejecting program info buffer");
                }
            },
            ReflectCategory::UniformBlocks => match decode_uniform_blocks(&bytes) {
                Ok(update) => entry.apply_uniform_blocks(update),
                Err(error) => {
                    warn!(program, %error, "rejecting uniform block buffer");
                }
            },
        }
        if entry.is_cached(category) {
            Some(f(entry))
        } else {
            None
        }
    }

    /// Scalar program query. A pname outside the cached set goes straight to
    /// the direct path without triggering a fetch.
    pub fn get_program_iv(&self, gl: &impl GlClient, program: ProgramHandle, pname: u32) -> i32 {
        let category = match pname {
            glenum::LINK_STATUS
            | glenum::ACTIVE_ATTRIBUTES
            | glenum::ACTIVE_ATTRIBUTE_MAX_LENGTH
            | glenum::ACTIVE_UNIFORMS
            | glenum::ACTIVE_UNIFORM_MAX_LENGTH => ReflectCategory::Basic,
            glenum::ACTIVE_UNIFORM_BLOCKS | glenum::ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH => {
                ReflectCategory::UniformBlocks
            }
            _ => return gl.get_program_iv(program, pname),
        };
        match self.with_cached_entry(gl, program, category, |entry| entry.program_property(pname)) {
            Some(Some(value)) => value,
            _ => gl.get_program_iv(program, pname),
        }
    }

    /// A cached entry answers authoritatively, including "not found" (-1).
    pub fn get_attrib_location(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        name: &str,
    ) -> i32 {
        self.with_cached_entry(gl, program, ReflectCategory::Basic, |entry| {
            entry.attrib_location(name)
        })
        .unwrap_or_else(|| gl.get_attrib_location(program, name))
    }

    pub fn get_uniform_location(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        name: &str,
    ) -> i32 {
        self.with_cached_entry(gl, program, ReflectCategory::Basic, |entry| {
            entry.uniform_location(name)
        })
        .unwrap_or_else(|| gl.get_uniform_location(program, name))
    }

    /// Fragment-output locations are not part of any bulk fetch; each name is
    /// memoized on first successful resolution. Negative results are never
    /// stored, so they re-query the direct path every time.
    pub fn get_frag_data_location(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        name: &str,
    ) -> i32 {
        {
            let programs = self.programs.lock().unwrap();
            if let Some(entry) = programs.get(&program) {
                if let Some(location) = entry.frag_data_location(name) {
                    return location;
                }
            }
        }
        let location = gl.get_frag_data_location(program, name);
        if location >= 0 {
            let mut programs = self.programs.lock().unwrap();
            if let Some(entry) = programs.get_mut(&program) {
                entry.cache_frag_data_location(name, location);
            }
        }
        location
    }

    #[allow(clippy::too_many_arguments)]
    pub fn get_active_attrib(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        index: u32,
        bufsize: usize,
        mut length: Option<&mut usize>,
        mut size: Option<&mut i32>,
        mut ty: Option<&mut u32>,
        mut name: Option<&mut [u8]>,
    ) -> bool {
        let served = self.with_cached_entry(gl, program, ReflectCategory::Basic, |entry| {
            let Some(info) = entry.attrib(index) else {
                return false;
            };
            if let Some(out) = size.as_deref_mut() {
                *out = info.size;
            }
            if let Some(out) = ty.as_deref_mut() {
                *out = info.ty;
            }
            copy_bounded_name(&info.name, bufsize, length.as_deref_mut(), name.as_deref_mut());
            true
        });
        match served {
            Some(true) => true,
            // Out-of-range indices go to the direct path so its error
            // reporting stays identical to the uncached behavior.
            _ => gl.get_active_attrib(program, index, bufsize, length, size, ty, name),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn get_active_uniform(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        index: u32,
        bufsize: usize,
        mut length: Option<&mut usize>,
        mut size: Option<&mut i32>,
        mut ty: Option<&mut u32>,
        mut name: Option<&mut [u8]>,
    ) -> bool {
        let served = self.with_cached_entry(gl, program, ReflectCategory::Basic, |entry| {
            let Some(info) = entry.uniform(index) else {
                return false;
            };
            if let Some(out) = size.as_deref_mut() {
                *out = info.size;
            }
            if let Some(out) = ty.as_deref_mut() {
                *out = info.ty;
            }
            copy_bounded_name(&info.name, bufsize, length.as_deref_mut(), name.as_deref_mut());
            true
        });
        match served {
            Some(true) => true,
            _ => gl.get_active_uniform(program, index, bufsize, length, size, ty, name),
        }
    }

    pub fn get_uniform_block_index(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        name: &str,
    ) -> u32 {
        self.with_cached_entry(gl, program, ReflectCategory::UniformBlocks, |entry| {
            entry.uniform_block_index(name)
        })
        .unwrap_or_else(|| gl.get_uniform_block_index(program, name))
    }

    pub fn get_active_uniform_block_name(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        index: u32,
        bufsize: usize,
        mut length: Option<&mut usize>,
        mut name: Option<&mut [u8]>,
    ) -> bool {
        // A missing output buffer behaves as a zero-sized one.
        let bufsize = if name.is_some() { bufsize } else { 0 };
        let served = self.with_cached_entry(gl, program, ReflectCategory::UniformBlocks, |entry| {
            let Some(block) = entry.uniform_block(index) else {
                return false;
            };
            copy_bounded_name(&block.name, bufsize, length.as_deref_mut(), name.as_deref_mut());
            true
        });
        match served {
            Some(true) => true,
            _ => gl.get_active_uniform_block_name(program, index, bufsize, length, name),
        }
    }

    pub fn get_active_uniform_block_iv(
        &self,
        gl: &impl GlClient,
        program: ProgramHandle,
        index: u32,
        pname: u32,
        params: &mut [i32],
    ) -> bool {
        let served = self.with_cached_entry(gl, program, ReflectCategory::UniformBlocks, |entry| {
            entry.uniform_block_property(index, pname, &mut *params)
        });
        match served {
            Some(true) => true,
            _ => gl.get_active_uniform_block_iv(program, index, pname, params),
        }
    }
}
