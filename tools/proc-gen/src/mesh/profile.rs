//! Cross-section profiles
//!
//! A profile is a list of 2D points in a part-local plane. The loft engine
//! places copies of it in 3D space and skins consecutive copies together.

use crate::error::{GenError, Result};
use glam::{Vec2, Vec3};

/// Ordered 2D cross-section used as the basis for lofting
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
    points: Vec<Vec2>,
    closed: bool,
}

impl ProfileCurve {
    /// Build a profile, dropping consecutive duplicate points
    ///
    /// For closed profiles a trailing point equal to the first is dropped too.
    /// Fails with `DegenerateProfile` when fewer than 3 points remain.
    pub fn new(points: impl IntoIterator<Item = Vec2>, closed: bool) -> Result<Self> {
        let mut deduped: Vec<Vec2> = Vec::new();
        for p in points {
            if deduped.last() != Some(&p) {
                deduped.push(p);
            }
        }
        if closed && deduped.len() > 1 && deduped.first() == deduped.last() {
            deduped.pop();
        }

        if deduped.len() < 3 {
            return Err(GenError::DegenerateProfile(deduped.len()));
        }

        Ok(Self {
            points: deduped,
            closed,
        })
    }

    /// Closed profile from `(u, v)` pairs
    pub fn closed(points: &[(f32, f32)]) -> Result<Self> {
        Self::new(points.iter().map(|&(u, v)| Vec2::new(u, v)), true)
    }

    /// Open profile from `(u, v)` pairs
    pub fn open(points: &[(f32, f32)]) -> Result<Self> {
        Self::new(points.iter().map(|&(u, v)| Vec2::new(u, v)), false)
    }

    /// Axis-aligned rectangle centered on the origin, counter-clockwise
    pub fn rectangle(width: f32, height: f32) -> Result<Self> {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::closed(&[(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)])
    }

    /// Regular polygon approximating a circle, counter-clockwise from +u
    pub fn regular_polygon(radius: f32, sides: u32) -> Result<Self> {
        let step = std::f32::consts::TAU / sides.max(1) as f32;
        Self::new(
            (0..sides).map(|i| {
                let angle = i as f32 * step;
                Vec2::new(angle.cos() * radius, angle.sin() * radius)
            }),
            true,
        )
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Shoelace area; positive when the points run counter-clockwise in (u, v)
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        0.5 * (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum::<f32>()
    }

    /// Number of edges between consecutive points (wrapping when closed)
    pub fn edge_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }
}

/// The plane a profile lives in, expressed as two world axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePlane {
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl ProfilePlane {
    /// Profile `u` maps to +Y (forward), `v` to +Z (up); lofts run along X
    pub const YZ: Self = Self {
        u_axis: Vec3::Y,
        v_axis: Vec3::Z,
    };

    /// Profile `u` maps to +X (lateral), `v` to +Z (up); lofts run along Y
    pub const XZ: Self = Self {
        u_axis: Vec3::X,
        v_axis: Vec3::Z,
    };

    /// Map a profile point into 3D with a per-axis scale
    #[inline]
    pub fn place(&self, point: Vec2, origin: Vec3, scale: Vec2) -> Vec3 {
        origin + self.u_axis * (point.x * scale.x) + self.v_axis * (point.y * scale.y)
    }
}

impl Default for ProfilePlane {
    fn default() -> Self {
        Self::YZ
    }
}
