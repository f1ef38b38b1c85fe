//! GLB/GLTF generation utilities for the procedural asset tools
//!
//! This library provides builder-pattern APIs for constructing GLB files:
//! - BufferBuilder: Pack binary data with automatic alignment
//! - MeshBuilder: Shared vertex stream with per-material primitives
//! - GltfBuilder: Top-level GLTF document with materials and nodes
//!
//! # Example
//!
//! ```no_run
//! use glb_builder::*;
//!
//! let mut buffer = BufferBuilder::new();
//! let mesh = MeshBuilder::new()
//!     .positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]])
//!     .normals(&[[0.0, 0.0, 1.0]; 3])
//!     .triangles(&[0, 1, 2], None)
//!     .build(&mut buffer);
//!
//! let gltf = GltfBuilder::new()
//!     .buffer_byte_length(buffer.data().len() as u64)
//!     .add_mesh_from_accessors("Triangle", &mesh);
//!
//! // Build final document with accessors and views
//! let root = gltf.build(buffer.views(), buffer.accessors(), "glb-builder");
//! let glb_bytes = assemble_glb(&root, buffer.data())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod buffer;
pub mod document;
pub mod mesh;
pub mod utils;

pub use buffer::{AccessorIndex, BufferBuilder};
pub use document::{mesh_node, GltfBuilder, MaterialDesc};
pub use mesh::{MeshAccessors, MeshBuilder, PrimitiveAccessors};
pub use utils::{align_buffer, assemble_glb, compute_bounds, extras_from_json};

// Re-export commonly used gltf-json types
pub use gltf_json as json;
pub use gltf_json::validation::Checked::Valid;
