//! Mesh combining utilities
//!
//! Pure composition: inputs are borrowed and a new mesh is returned with face
//! indices remapped into the concatenated vertex list.

use super::Mesh;
use glam::{Mat4, Vec3};

/// Combine multiple meshes into one
///
/// Vertices are concatenated in input order and never welded; materials stay
/// attached to their faces.
///
/// # Example
/// ```no_run
/// use proc_gen::mesh::*;
/// use glam::Vec3;
///
/// let plate = ProfileCurve::rectangle(0.3, 0.05)?;
/// let grouser = ProfileCurve::rectangle(0.05, 0.1)?;
/// let opts = LoftOptions::default().caps(Caps::BOTH);
/// let a = extrude(&plate, Vec3::new(-0.4, 0.0, 0.0), Vec3::new(0.4, 0.0, 0.0), &opts)?;
/// let b = extrude(&grouser, Vec3::new(-0.4, 0.0, 0.05), Vec3::new(0.4, 0.0, 0.05), &opts)?;
/// let link = combine(&[&a, &b]);
/// # Ok::<(), proc_gen::GenError>(())
/// ```
pub fn combine(meshes: &[&Mesh]) -> Mesh {
    let total_vertices: usize = meshes.iter().map(|m| m.positions.len()).sum();
    let total_faces: usize = meshes.iter().map(|m| m.faces.len()).sum();

    let mut result = Mesh::new();
    result.positions.reserve(total_vertices);
    result.faces.reserve(total_faces);

    for mesh in meshes {
        let vertex_offset = result.positions.len() as u32;
        result.positions.extend_from_slice(&mesh.positions);
        result.faces.extend(mesh.faces.iter().map(|face| {
            let mut face = face.clone();
            for idx in &mut face.indices {
                *idx += vertex_offset;
            }
            face
        }));
    }

    result
}

/// Combine meshes after moving each by an offset
pub fn combine_translated(meshes: &[(&Mesh, Vec3)]) -> Mesh {
    let moved: Vec<Mesh> = meshes
        .iter()
        .map(|(mesh, offset)| transformed(mesh, Mat4::from_translation(*offset)))
        .collect();
    let refs: Vec<&Mesh> = moved.iter().collect();
    combine(&refs)
}

/// Copy of `mesh` with every position transformed
///
/// Mirroring matrices (negative determinant) reverse each face so normals
/// keep pointing outward.
pub fn transformed(mesh: &Mesh, matrix: Mat4) -> Mesh {
    let mut out = mesh.clone();
    for p in &mut out.positions {
        *p = matrix.transform_point3(*p);
    }
    if matrix.determinant() < 0.0 {
        for face in &mut out.faces {
            face.indices.reverse();
        }
    }
    out
}
