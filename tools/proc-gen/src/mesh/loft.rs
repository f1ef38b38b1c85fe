//! Cross-section lofting
//!
//! Skins rings of profile points into quads. Every solid part of the vehicle
//! is built here: the plow blade, chassis blocks, wheels and the cabin.
//!
//! # Example
//! ```no_run
//! use proc_gen::mesh::*;
//! use glam::Vec3;
//!
//! let blade = ProfileCurve::closed(&[(0.2, 1.5), (-0.1, 0.8), (0.4, 0.0), (0.0, 0.0)])?;
//! let mesh = extrude(
//!     &blade,
//!     Vec3::new(-0.5, 0.0, 0.0),
//!     Vec3::new(0.5, 0.0, 0.0),
//!     &LoftOptions::default(),
//! )?;
//! assert_eq!(mesh.face_count(), 4);
//! # Ok::<(), proc_gen::GenError>(())
//! ```

use super::{Mesh, ProfileCurve, ProfilePlane, Ring};
use crate::error::{GenError, Result};
use glam::{Vec2, Vec3};

/// Face orientation for skinned quads
///
/// The loft never infers which side is outside; mirrored parts pass the
/// opposite winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// `(a_j, b_j, b_j+1, a_j+1)`
    #[default]
    Forward,
    /// `(a_j+1, b_j+1, b_j, a_j)`
    Reversed,
}

/// Which ends of the loft get closing n-gons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caps {
    pub start: bool,
    pub end: bool,
}

impl Caps {
    /// Open tube, for parts that tile side by side
    pub const NONE: Self = Self {
        start: false,
        end: false,
    };
    pub const BOTH: Self = Self {
        start: true,
        end: true,
    };
}

/// Where a ring sits: translation plus per-axis profile scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Vec3,
    pub scale: Vec2,
}

impl Placement {
    pub fn at(origin: Vec3) -> Self {
        Self {
            origin,
            scale: Vec2::ONE,
        }
    }

    pub fn scaled(origin: Vec3, scale: Vec2) -> Self {
        Self { origin, scale }
    }
}

/// One cross-section instance
#[derive(Debug, Clone, Copy)]
pub struct LoftRing<'a> {
    pub profile: &'a ProfileCurve,
    pub placement: Placement,
}

impl<'a> LoftRing<'a> {
    pub fn new(profile: &'a ProfileCurve, placement: Placement) -> Self {
        Self { profile, placement }
    }
}

/// Loft settings shared by every ring pair
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftOptions {
    pub plane: ProfilePlane,
    pub winding: Winding,
    pub caps: Caps,
}

impl LoftOptions {
    pub fn plane(mut self, plane: ProfilePlane) -> Self {
        self.plane = plane;
        self
    }

    pub fn winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    pub fn caps(mut self, caps: Caps) -> Self {
        self.caps = caps;
        self
    }
}

/// Skin two or more placed profiles into a mesh
///
/// Each ring contributes its own vertices. A closed ring pair of `n` points
/// yields `n` quads, an open pair `n - 1`.
pub fn loft(rings: &[LoftRing<'_>], options: &LoftOptions) -> Result<Mesh> {
    let first = rings.first().ok_or(GenError::TooFewRings(0))?;
    if rings.len() < 2 {
        return Err(GenError::TooFewRings(rings.len()));
    }

    let expected = first.profile.len();
    let closed = first.profile.is_closed();
    for (i, ring) in rings.iter().enumerate().skip(1) {
        if ring.profile.len() != expected || ring.profile.is_closed() != closed {
            return Err(GenError::ShapeMismatch {
                ring: i,
                expected,
                got: ring.profile.len(),
            });
        }
    }

    let mut mesh = Mesh::new();
    let placed: Vec<Ring> = rings
        .iter()
        .map(|ring| push_profile(&mut mesh, ring.profile, &options.plane, ring.placement))
        .collect();

    for pair in placed.windows(2) {
        skin_pair(&mut mesh, pair[0], pair[1], closed, options.winding);
    }

    if closed {
        if options.caps.start {
            push_cap(&mut mesh, placed[0], options.winding, false);
        }
        if options.caps.end {
            push_cap(&mut mesh, placed[placed.len() - 1], options.winding, true);
        }
    } else if options.caps.start || options.caps.end {
        tracing::debug!("caps skipped for open profile");
    }

    tracing::trace!(
        rings = rings.len(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "lofted"
    );
    Ok(mesh)
}

/// Loft a single profile between two origins
pub fn extrude(profile: &ProfileCurve, from: Vec3, to: Vec3, options: &LoftOptions) -> Result<Mesh> {
    loft(
        &[
            LoftRing::new(profile, Placement::at(from)),
            LoftRing::new(profile, Placement::at(to)),
        ],
        options,
    )
}

/// Place a profile in 3D and append its vertices as a ring
pub(crate) fn push_profile(
    mesh: &mut Mesh,
    profile: &ProfileCurve,
    plane: &ProfilePlane,
    placement: Placement,
) -> Ring {
    mesh.push_ring(
        profile
            .points()
            .iter()
            .map(|&p| plane.place(p, placement.origin, placement.scale)),
    )
}

/// Connect corresponding points of two rings with quads
pub(crate) fn skin_pair(mesh: &mut Mesh, a: Ring, b: Ring, closed: bool, winding: Winding) {
    let edges = if closed { a.len() } else { a.len() - 1 };
    for j in 0..edges {
        let quad = [a.index(j), b.index(j), b.index(j + 1), a.index(j + 1)];
        let indices = match winding {
            Winding::Forward => quad.to_vec(),
            Winding::Reversed => quad.iter().rev().copied().collect(),
        };
        mesh.push_face(indices);
    }
}

/// Close a ring with one n-gon
///
/// Start caps keep profile order, end caps reverse it; `Reversed` winding
/// swaps both.
pub(crate) fn push_cap(mesh: &mut Mesh, ring: Ring, winding: Winding, end: bool) {
    let reverse = end ^ (winding == Winding::Reversed);
    let indices: Vec<u32> = if reverse {
        ring.indices().rev().collect()
    } else {
        ring.indices().collect()
    };
    mesh.push_face(indices);
}
