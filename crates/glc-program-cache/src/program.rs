//! Per-program decoded reflection snapshot.

use std::collections::HashMap;

use glc_reflect_proto::glenum;
use glc_reflect_proto::program_info::{ActiveUniform, ProgramInfoUpdate, VertexAttrib};
use glc_reflect_proto::uniform_blocks::{UniformBlock, UniformBlocksUpdate};

use crate::name_query::parse_uniform_name;

/// The independently-cached categories of reflection data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectCategory {
    /// Attributes, uniforms and link status.
    Basic,
    /// Uniform-block layout.
    UniformBlocks,
}

/// One program's in-memory reflection data.
///
/// An entry is created fresh (nothing cached) when its program is registered
/// or relinked and destroyed when the program is deleted. Each category is
/// populated at most once; a cached flag is never cleared short of recreating
/// the whole entry, because only a relink can invalidate reflection data.
#[derive(Debug, Default)]
pub struct ProgramEntry {
    link_status: bool,
    attribs: Vec<VertexAttrib>,
    uniforms: Vec<ActiveUniform>,
    max_attrib_name_length: i32,
    max_uniform_name_length: i32,
    frag_data_locations: HashMap<String, i32>,
    uniform_blocks: Vec<UniformBlock>,
    max_uniform_block_name_length: i32,
    basic_cached: bool,
    uniform_blocks_cached: bool,
}

impl ProgramEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, category: ReflectCategory) -> bool {
        match category {
            ReflectCategory::Basic => self.basic_cached,
            ReflectCategory::UniformBlocks => self.uniform_blocks_cached,
        }
    }

    /// Commits one basic-reflection decode. No-op if already cached or the
    /// buffer carried no data.
    pub fn apply_basic(&mut self, update: ProgramInfoUpdate) {
        if self.basic_cached {
            return;
        }
        match update {
            ProgramInfoUpdate::NoData => {}
            ProgramInfoUpdate::LinkFailed => {
                self.link_status = false;
                self.attribs.clear();
                self.uniforms.clear();
                // Cached despite the empty tables: a failed link has no
                // reflection data, and refetching would not change that.
                self.basic_cached = true;
            }
            ProgramInfoUpdate::Linked { attribs, uniforms } => {
                self.link_status = true;
                self.max_attrib_name_length = attribs
                    .iter()
                    .map(|a| a.name.len() as i32 + 1)
                    .max()
                    .unwrap_or(0);
                self.max_uniform_name_length = uniforms
                    .iter()
                    .map(|u| u.name.len() as i32 + 1)
                    .max()
                    .unwrap_or(0);
                self.attribs = attribs;
                self.uniforms = uniforms;
                self.basic_cached = true;
            }
        }
    }

    /// Commits one uniform-block decode. No-op if already cached or the
    /// buffer carried no data.
    pub fn apply_uniform_blocks(&mut self, update: UniformBlocksUpdate) {
        if self.uniform_blocks_cached {
            return;
        }
        match update {
            UniformBlocksUpdate::NoData => {}
            UniformBlocksUpdate::Blocks(blocks) => {
                self.max_uniform_block_name_length = blocks
                    .iter()
                    .map(|b| b.name.len() as i32 + 1)
                    .max()
                    .unwrap_or(0);
                self.uniform_blocks = blocks;
                self.uniform_blocks_cached = true;
            }
        }
    }

    pub fn attrib(&self, index: u32) -> Option<&VertexAttrib> {
        self.attribs.get(index as usize)
    }

    pub fn uniform(&self, index: u32) -> Option<&ActiveUniform> {
        self.uniforms.get(index as usize)
    }

    pub fn uniform_block(&self, index: u32) -> Option<&UniformBlock> {
        self.uniform_blocks.get(index as usize)
    }

    /// Exact-name scan; attribute names are unique so the first match is the
    /// only match. -1 when absent.
    pub fn attrib_location(&self, name: &str) -> i32 {
        for info in &self.attribs {
            if info.name == name {
                return info.location;
            }
        }
        -1
    }

    /// Uniform lookup, `name` possibly of the form `base[index]`.
    ///
    /// The matching rules are load-bearing and deliberately quirky: a stored
    /// array uniform whose name minus its last three bytes (the `[0]`) equals
    /// the query always answers with element 0, even when the query carries
    /// an explicit non-zero index. Only when that shortcut misses does the
    /// bracket-position comparison select the requested element.
    pub fn uniform_location(&self, name: &str) -> i32 {
        let Some(parsed) = parse_uniform_name(name) else {
            return -1;
        };
        let name_bytes = name.as_bytes();
        for info in &self.uniforms {
            let stored = info.name.as_bytes();
            if stored == name_bytes
                || (info.is_array
                    && stored.len() >= 3
                    && &stored[..stored.len() - 3] == name_bytes)
            {
                return info.element_locations.first().copied().unwrap_or(-1);
            }
            if parsed.array_element && info.is_array {
                let Some(stored_open) = info.name.rfind('[') else {
                    continue;
                };
                if stored_open == parsed.open_pos
                    && stored[..stored_open] == name_bytes[..parsed.open_pos]
                {
                    if let Some(&location) = info.element_locations.get(parsed.index) {
                        return location;
                    }
                }
            }
        }
        -1
    }

    /// Exact-name scan over the block list. `INVALID_INDEX` when absent.
    pub fn uniform_block_index(&self, name: &str) -> u32 {
        for (index, block) in self.uniform_blocks.iter().enumerate() {
            if block.name == name {
                return index as u32;
            }
        }
        glenum::INVALID_INDEX
    }

    /// Memoized fragment-output location, if this name has been resolved
    /// before. Negative results are never memoized.
    pub fn frag_data_location(&self, name: &str) -> Option<i32> {
        self.frag_data_locations.get(name).copied()
    }

    pub fn cache_frag_data_location(&mut self, name: &str, location: i32) {
        debug_assert!(location >= 0);
        self.frag_data_locations.insert(name.to_owned(), location);
    }

    /// Scalar program property, or `None` for a pname this category does not
    /// carry (distinct from "entry not cached").
    pub fn program_property(&self, pname: u32) -> Option<i32> {
        match pname {
            glenum::LINK_STATUS => Some(self.link_status as i32),
            glenum::ACTIVE_ATTRIBUTES => Some(self.attribs.len() as i32),
            glenum::ACTIVE_ATTRIBUTE_MAX_LENGTH => Some(self.max_attrib_name_length),
            glenum::ACTIVE_UNIFORMS => Some(self.uniforms.len() as i32),
            glenum::ACTIVE_UNIFORM_MAX_LENGTH => Some(self.max_uniform_name_length),
            glenum::ACTIVE_UNIFORM_BLOCKS => Some(self.uniform_blocks.len() as i32),
            glenum::ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH => {
                Some(self.max_uniform_block_name_length)
            }
            _ => None,
        }
    }

    /// Scalar (or index-list) uniform-block property. False when the block
    /// index is out of range, the pname is unrecognized, or `params` is
    /// empty; the caller then falls back to the direct path.
    pub fn uniform_block_property(&self, index: u32, pname: u32, params: &mut [i32]) -> bool {
        let Some(block) = self.uniform_blocks.get(index as usize) else {
            return false;
        };
        if params.is_empty() {
            return false;
        }
        match pname {
            glenum::UNIFORM_BLOCK_BINDING => params[0] = block.binding as i32,
            glenum::UNIFORM_BLOCK_DATA_SIZE => params[0] = block.data_size as i32,
            glenum::UNIFORM_BLOCK_NAME_LENGTH => params[0] = block.name.len() as i32 + 1,
            glenum::UNIFORM_BLOCK_ACTIVE_UNIFORMS => {
                params[0] = block.active_uniform_indices.len() as i32
            }
            glenum::UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES => {
                for (out, &idx) in params.iter_mut().zip(&block.active_uniform_indices) {
                    *out = idx as i32;
                }
            }
            glenum::UNIFORM_BLOCK_REFERENCED_BY_VERTEX_SHADER => {
                params[0] = block.referenced_by_vertex_shader as i32
            }
            glenum::UNIFORM_BLOCK_REFERENCED_BY_FRAGMENT_SHADER => {
                params[0] = block.referenced_by_fragment_shader as i32
            }
            _ => return false,
        }
        true
    }
}
