//! Mesh generation and composition
//!
//! Meshes here are polygon meshes: faces keep their quads and n-gons until
//! export, where they are split into unshared flat-shaded vertices and
//! fan-triangulated.

use crate::scene::MaterialId;
use glam::Vec3;

pub mod attachment;
pub mod combine;
pub mod loft;
pub mod path;
pub mod profile;

pub use attachment::{generate_attachment, AttachmentParams, Side, TaperLaw};
pub use combine::{combine, combine_translated, transformed};
pub use loft::{extrude, loft, Caps, LoftOptions, LoftRing, Placement, Winding};
pub use path::{generate_stadium, PathCurve, StadiumParams};
pub use profile::{ProfileCurve, ProfilePlane};

/// A polygon face: vertex indices in winding order plus an optional material
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub indices: Vec<u32>,
    pub material: Option<MaterialId>,
}

/// Contiguous run of vertices created for one cross-section instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    start: u32,
    len: u32,
}

impl Ring {
    /// Vertex index of point `j`, wrapping around the ring
    #[inline]
    pub fn index(&self, j: usize) -> u32 {
        self.start + (j as u32 % self.len)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Vertex indices in profile order
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.start..self.start + self.len
    }
}

/// Polygon mesh with flat vertex storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Append one cross-section worth of vertices; never welds
    pub fn push_ring(&mut self, points: impl IntoIterator<Item = Vec3>) -> Ring {
        let start = self.positions.len() as u32;
        self.positions.extend(points);
        Ring {
            start,
            len: self.positions.len() as u32 - start,
        }
    }

    pub fn push_face(&mut self, indices: Vec<u32>) {
        debug_assert!(indices.len() >= 3);
        self.faces.push(Face {
            indices,
            material: None,
        });
    }

    /// Assign a material to every face
    pub fn with_material(mut self, material: MaterialId) -> Self {
        for face in &mut self.faces {
            face.material = Some(material);
        }
        self
    }

    /// True when every face has 3+ indices and all indices are in range
    pub fn is_valid(&self) -> bool {
        let count = self.positions.len() as u32;
        self.faces
            .iter()
            .all(|f| f.indices.len() >= 3 && f.indices.iter().all(|&i| i < count))
    }

    /// Face normal via Newell's method (robust for non-planar quads)
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let mut normal = Vec3::ZERO;
        let n = face.indices.len();
        for k in 0..n {
            let a = self.positions[face.indices[k] as usize];
            let b = self.positions[face.indices[(k + 1) % n] as usize];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal.normalize_or_zero()
    }

    /// Axis-aligned bounds, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.push_ring([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        mesh.push_face(vec![0, 1, 2, 3]);
        mesh
    }

    #[test]
    fn test_ring_wraps() {
        let mut mesh = Mesh::new();
        mesh.push_ring([Vec3::ZERO; 2]);
        let ring = mesh.push_ring([Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(ring.index(0), 2);
        assert_eq!(ring.index(3), 2);
        assert_eq!(ring.indices().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_face_normal_ccw_is_positive_z() {
        let mesh = quad();
        assert!((mesh.face_normal(&mesh.faces[0]) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_validity() {
        let mut mesh = quad();
        assert!(mesh.is_valid());
        mesh.faces[0].indices.push(9);
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Mesh::new().bounds(), None);
        assert_eq!(quad().bounds(), Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));
    }
}
