//! Tapered, curving appendages (plow wings and teeth)
//!
//! An attachment is a stack of profile copies marching forward along +Y. Each
//! section shrinks vertically and drifts laterally on a quadratic, so the
//! curve tightens toward the tip like a horn.

use super::loft::{push_cap, push_profile, skin_pair, Placement, Winding};
use super::{Mesh, ProfileCurve, ProfilePlane};
use crate::error::{GenError, Result};
use glam::{Vec2, Vec3};

/// Which side of the parent part the attachment hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// -X
    Left,
    /// +X
    Right,
}

impl Side {
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Left-side geometry is mirrored, so its faces wind the other way
    pub fn winding(self) -> Winding {
        match self {
            Side::Right => Winding::Forward,
            Side::Left => Winding::Reversed,
        }
    }
}

/// Vertical scale law along the attachment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperLaw {
    /// Scale at the tip relative to the base
    pub tip_scale: f32,
}

impl Default for TaperLaw {
    fn default() -> Self {
        Self { tip_scale: 0.4 }
    }
}

impl TaperLaw {
    /// `1 - (1 - tip_scale) * t`
    #[inline]
    pub fn scale_at(&self, t: f32) -> f32 {
        1.0 - (1.0 - self.tip_scale) * t
    }
}

/// Attachment shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentParams {
    pub side: Side,
    /// Number of skinned spans; `sections + 1` rings are emitted
    pub sections: u32,
    /// Forward reach of the tip
    pub length: f32,
    /// Lateral drift of the tip toward the parent's center line
    pub inward_curve: f32,
    pub taper: TaperLaw,
    /// Base ring position
    pub origin: Vec3,
}

impl AttachmentParams {
    /// Box-plow side wing
    pub fn wing(side: Side) -> Self {
        Self {
            side,
            sections: 8,
            length: 0.8,
            inward_curve: 0.3,
            taper: TaperLaw::default(),
            origin: Vec3::ZERO,
        }
    }

    /// Short cutting-edge tooth
    pub fn tooth() -> Self {
        Self {
            side: Side::Right,
            sections: 4,
            length: 0.25,
            inward_curve: 0.05,
            taper: TaperLaw::default(),
            origin: Vec3::ZERO,
        }
    }

    pub fn at(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Lateral offset at parameter `t`: `-t^2 * inward_curve * side`
    #[inline]
    pub fn lateral_offset(&self, t: f32) -> f32 {
        -t * t * self.inward_curve * self.side.sign()
    }

    /// Placement of ring `i` (0 = base, `sections` = tip)
    ///
    /// The profile's lateral axis is multiplied by the side sign, which
    /// mirrors left-side attachments.
    pub fn section_placement(&self, i: u32) -> Placement {
        let t = i as f32 / self.sections as f32;
        Placement::scaled(
            self.origin + Vec3::new(self.lateral_offset(t), t * self.length, 0.0),
            Vec2::new(self.side.sign(), self.taper.scale_at(t)),
        )
    }
}

/// Build an attachment from a base profile in the XZ plane
///
/// Faces: `n * sections` quads plus one tip cap. The base stays open since it
/// sits flush against the parent part.
pub fn generate_attachment(profile: &ProfileCurve, params: &AttachmentParams) -> Result<Mesh> {
    if params.sections < 1 {
        return Err(GenError::DegenerateAttachment(params.sections));
    }

    let winding = params.side.winding();
    let mut mesh = Mesh::new();
    let rings: Vec<_> = (0..=params.sections)
        .map(|i| push_profile(&mut mesh, profile, &ProfilePlane::XZ, params.section_placement(i)))
        .collect();

    for pair in rings.windows(2) {
        skin_pair(&mut mesh, pair[0], pair[1], profile.is_closed(), winding);
    }
    push_cap(&mut mesh, rings[rings.len() - 1], winding, true);

    tracing::trace!(
        side = ?params.side,
        sections = params.sections,
        faces = mesh.face_count(),
        "attachment built"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate() -> ProfileCurve {
        ProfileCurve::closed(&[(-0.05, 0.0), (0.05, 0.0), (0.05, 1.0), (-0.05, 1.0)]).unwrap()
    }

    #[test]
    fn test_counts() {
        let params = AttachmentParams::wing(Side::Right);
        let mesh = generate_attachment(&plate(), &params).unwrap();
        assert_eq!(mesh.vertex_count(), 4 * 9);
        assert_eq!(mesh.face_count(), 4 * 8 + 1);
        assert_eq!(mesh.faces.last().unwrap().indices.len(), 4);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_taper_is_monotonic() {
        let params = AttachmentParams {
            sections: 16,
            ..AttachmentParams::wing(Side::Right)
        };
        let placements: Vec<_> = (0..=16).map(|i| params.section_placement(i)).collect();
        for pair in placements.windows(2) {
            assert!(pair[1].origin.x.abs() >= pair[0].origin.x.abs());
            assert!(pair[1].scale.y <= pair[0].scale.y);
            assert!(pair[1].origin.y > pair[0].origin.y);
        }
        let tip = placements.last().unwrap();
        assert!((tip.scale.y - 0.4).abs() < 1e-6);
        assert!((tip.origin.y - params.length).abs() < 1e-6);
        assert!((tip.origin.x + params.inward_curve).abs() < 1e-6);
    }

    #[test]
    fn test_lateral_offset_is_quadratic() {
        let params = AttachmentParams::wing(Side::Right);
        assert_eq!(params.lateral_offset(0.0), 0.0);
        let half = params.lateral_offset(0.5);
        let full = params.lateral_offset(1.0);
        assert!((half - full * 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_left_mirrors_right() {
        let right = generate_attachment(&plate(), &AttachmentParams::wing(Side::Right)).unwrap();
        let left = generate_attachment(&plate(), &AttachmentParams::wing(Side::Left)).unwrap();
        for (r, l) in right.positions.iter().zip(&left.positions) {
            assert!((*l - Vec3::new(-r.x, r.y, r.z)).length() < 1e-6);
        }
    }

    #[test]
    fn test_winding_flips_on_left() {
        let right = generate_attachment(&plate(), &AttachmentParams::wing(Side::Right)).unwrap();
        let left = generate_attachment(&plate(), &AttachmentParams::wing(Side::Left)).unwrap();
        let mut flipped = right.faces[0].indices.clone();
        flipped.reverse();
        assert_eq!(left.faces[0].indices, flipped);
    }

    #[test]
    fn test_tip_cap_faces_forward_on_both_sides() {
        for side in [Side::Left, Side::Right] {
            let mesh = generate_attachment(&plate(), &AttachmentParams::wing(side)).unwrap();
            let tip = mesh.faces.last().unwrap();
            assert!(mesh.face_normal(tip).y > 0.9, "{side:?} tip faces backward");
        }
    }

    #[test]
    fn test_degenerate_attachment() {
        let params = AttachmentParams {
            sections: 0,
            ..AttachmentParams::tooth()
        };
        let err = generate_attachment(&plate(), &params).unwrap_err();
        assert!(matches!(err, GenError::DegenerateAttachment(0)));
    }
}
