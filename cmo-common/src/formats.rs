//! CMO binary layout (.cmo)
//!
//! Compiled mesh object format produced by the Visual Studio content
//! pipeline. No magic bytes, no section table; the file is one ordered
//! stream of records whose sizes are gated by the counts that precede them.
//!
//! # Layout
//! ```text
//! mesh_count u32
//! per mesh:
//!   name            wide string
//!   material_count  u32
//!   per material:
//!     name              wide string
//!     shading block     132 bytes
//!     shader reference  wide string
//!     texture refs      8 x wide string (unused slots are zero-length)
//!     skeleton flag     u8
//!     submesh_count u32 + submeshes (20 bytes each)
//!     ib_count u32,  per buffer: index_count u32  + indices (2 bytes each)
//!     vb_count u32,  per buffer: vertex_count u32 + vertices (52 bytes each)
//!     svb_count u32, per buffer: vertex_count u32 + vertices (32 bytes each)
//!     mesh extents      40 bytes
//!     if skeleton flag:
//!       bone_count u32, per bone: name wide string + bone block (196 bytes)
//!       animation clips to end of file (opaque)
//! ```
//!
//! Wide strings are a `u32` code-unit count followed by that many UTF-16LE
//! code units; see [`crate::wide`].

/// Number of texture-reference slots in every material record, used or not.
pub const MAX_TEXTURE_SLOTS: usize = 8;

/// Shading-parameter block: ambient, diffuse and specular colors (4 x f32
/// each), specular power (f32), emissive color (4 x f32), UV transform
/// (16 x f32).
pub const SHADING_BLOCK_SIZE: u64 = 132;

/// Submesh record: material, index-buffer and vertex-buffer indices, start
/// index, primitive count (5 x u32).
pub const SUBMESH_SIZE: u64 = 20;

/// Static vertex: position, normal, tangent, color, texture coordinate.
pub const VERTEX_SIZE: u64 = 52;

/// Skinning vertex: 4 x u32 bone indices + 4 x f32 bone weights.
pub const SKIN_VERTEX_SIZE: u64 = 32;

/// Index element (u16).
pub const INDEX_SIZE: u64 = 2;

/// Bounding extents: center, radius, min and max corners (10 x f32).
pub const MESH_EXTENTS_SIZE: u64 = 40;

/// Bone record body after the name: i32 parent index plus inverse bind,
/// bind and local transform matrices (3 x 16 x f32).
pub const BONE_BLOCK_SIZE: u64 = 196;
