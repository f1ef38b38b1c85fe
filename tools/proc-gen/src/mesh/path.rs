//! Closed stadium path curves for track loops
//!
//! The track path is reference data for the runtime, which walks track links
//! along it. Straight runs are sampled explicitly: a loop made of arcs alone
//! leaves the straights to the consumer's spline fit, which can bend them.

use crate::error::{GenError, Result};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

/// Stadium dimensions and sampling resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StadiumParams {
    /// Arc radius (half the loop height)
    pub radius: f32,
    /// Distance between the two arc centers
    pub length: f32,
    /// Samples per semicircle, endpoints included
    pub segments_arc: u32,
    /// Samples per straight run, endpoints included
    pub segments_straight: u32,
}

impl Default for StadiumParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            length: 4.0,
            segments_arc: 16,
            segments_straight: 8,
        }
    }
}

/// Ordered loop of points in the YZ plane (X is the width axis)
#[derive(Debug, Clone, PartialEq)]
pub struct PathCurve {
    points: Vec<Vec3>,
}

impl PathCurve {
    /// Every emitted sample, including the shared section endpoints
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance from the last sample back to the first
    pub fn closing_gap(&self) -> f32 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.distance(*last),
            _ => 0.0,
        }
    }

    /// Distinct loop vertices for an implicitly closed line loop
    ///
    /// Junction samples shared by two sections appear once and the closing
    /// sample is dropped, so the edge from last to first closes the loop.
    pub fn loop_vertices(&self) -> Vec<Vec3> {
        let mut out: Vec<Vec3> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if out.last() != Some(&p) {
                out.push(p);
            }
        }
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }

    /// Total polyline length of the closed loop
    pub fn perimeter(&self) -> f32 {
        let verts = self.loop_vertices();
        let n = verts.len();
        (0..n).map(|i| verts[i].distance(verts[(i + 1) % n])).sum()
    }
}

/// Generate a stadium loop centered at the origin
///
/// Order: top straight (back to front), front arc, bottom straight (front to
/// back), back arc. Section junctions are bit-identical and the last sample
/// equals the first.
pub fn generate_stadium(params: &StadiumParams) -> Result<PathCurve> {
    if params.segments_arc < 2 {
        return Err(GenError::InsufficientResolution {
            which: "arc",
            got: params.segments_arc,
        });
    }
    if params.segments_straight < 2 {
        return Err(GenError::InsufficientResolution {
            which: "straight",
            got: params.segments_straight,
        });
    }

    let r = params.radius;
    let h = params.length / 2.0;

    // (y, z) corners where straights meet arcs
    let top_back = Vec2::new(-h, r);
    let top_front = Vec2::new(h, r);
    let bottom_front = Vec2::new(h, -r);
    let bottom_back = Vec2::new(-h, -r);

    let mut yz = Vec::with_capacity(2 * (params.segments_arc + params.segments_straight) as usize);
    straight(&mut yz, top_back, top_front, params.segments_straight);
    arc(&mut yz, Vec2::new(h, 0.0), r, 0.0, top_front, bottom_front, params.segments_arc);
    straight(&mut yz, bottom_front, bottom_back, params.segments_straight);
    arc(&mut yz, Vec2::new(-h, 0.0), r, PI, bottom_back, top_back, params.segments_arc);

    Ok(PathCurve {
        points: yz.into_iter().map(|p| Vec3::new(0.0, p.x, p.y)).collect(),
    })
}

fn straight(out: &mut Vec<Vec2>, start: Vec2, end: Vec2, samples: u32) {
    let last = samples - 1;
    for i in 0..samples {
        out.push(match i {
            0 => start,
            i if i == last => end,
            _ => {
                let t = i as f32 / last as f32;
                start * (1.0 - t) + end * t
            }
        });
    }
}

/// Half circle from `base` to `base + PI`; endpoints come from the corners
fn arc(out: &mut Vec<Vec2>, center: Vec2, radius: f32, base: f32, start: Vec2, end: Vec2, samples: u32) {
    let last = samples - 1;
    for i in 0..samples {
        out.push(match i {
            0 => start,
            i if i == last => end,
            _ => {
                let angle = base + (i as f32 / last as f32) * PI;
                center + Vec2::new(angle.sin(), angle.cos()) * radius
            }
        });
    }
}
