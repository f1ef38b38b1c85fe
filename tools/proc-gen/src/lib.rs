//! Procedural asset generation for the bulldozer and plow
//!
//! Geometry is built from 2D profiles lofted through placed cross-sections,
//! closed stadium path curves for the tracks, and tapered attachments for
//! plow wings and teeth. Raster textures come from layered compositing
//! passes. Every generated entity carries a contract tag so downstream code
//! can find it by semantic id.
//!
//! # Mesh Example
//! ```no_run
//! use proc_gen::mesh::*;
//! use glam::Vec3;
//!
//! let blade = ProfileCurve::closed(&[
//!     (0.2, 1.5), (-0.1, 0.8), (0.4, 0.0), (0.0, 0.0), (-0.3, 0.8), (0.0, 1.5),
//! ])?;
//! let segment = extrude(&blade, Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0), &LoftOptions::default())?;
//! assert_eq!(segment.face_count(), 6);
//!
//! let wing = generate_attachment(&blade, &AttachmentParams::wing(Side::Right))?;
//! # Ok::<(), proc_gen::GenError>(())
//! ```
//!
//! # Scene Example
//! ```no_run
//! use proc_gen::contract::vocabulary;
//! use proc_gen::mesh::*;
//! use proc_gen::scene::*;
//! use glam::Vec3;
//!
//! let mut scene = SceneBuilder::new();
//! let path = generate_stadium(&StadiumParams::default())?;
//! scene.path("Path_L", path, Vec3::new(-1.5, 0.0, 0.5), vocabulary::PATH_L)?;
//! write_glb(&scene.build(), std::path::Path::new("tracks.glb"))?;
//! # Ok::<(), proc_gen::GenError>(())
//! ```

pub mod contract;
pub mod error;
pub mod mesh;
pub mod scene;
pub mod texture;

pub use error::{GenError, Result};
