//! Plow blade segment and its upgrade attachments

use crate::config::PlowSection;
use anyhow::{ensure, Result};
use glam::{Vec2, Vec3};
use proc_gen::contract::vocabulary;
use proc_gen::mesh::*;
use proc_gen::scene::{Material, Scene, SceneBuilder};

/// Wing plate thickness and height, tooth half-width and height
const WING_THICKNESS: f32 = 0.05;
const TOOTH_HALF_WIDTH: f32 = 0.04;
const TOOTH_HEIGHT: f32 = 0.06;

pub fn blade_profile(plow: &PlowSection) -> proc_gen::Result<ProfileCurve> {
    ProfileCurve::new(plow.profile.iter().map(|&p| Vec2::from_array(p)), true)
}

/// Quads of a +X sweep face outward when the (forward, up) profile is clockwise
fn sweep_winding(profile: &ProfileCurve) -> Winding {
    if profile.signed_area() > 0.0 {
        Winding::Reversed
    } else {
        Winding::Forward
    }
}

/// Blade cross-section lofted across its width, ends left open for tiling
pub fn segment(plow: &PlowSection) -> proc_gen::Result<Mesh> {
    let profile = blade_profile(plow)?;
    let half = plow.segment_width * 0.5;
    extrude(
        &profile,
        Vec3::new(-half, 0.0, 0.0),
        Vec3::new(half, 0.0, 0.0),
        &LoftOptions::default()
            .winding(sweep_winding(&profile))
            .caps(Caps::NONE),
    )
}

fn wing_params(plow: &PlowSection, side: Side) -> AttachmentParams {
    AttachmentParams {
        sections: plow.wing_sections,
        length: plow.wing_length,
        inward_curve: plow.wing_curve,
        taper: TaperLaw {
            tip_scale: plow.tip_scale,
        },
        ..AttachmentParams::wing(side)
    }
    .at(Vec3::new(side.sign() * plow.segment_width * 0.5, 0.0, 0.0))
}

/// Side plate running forward from a blade end, as tall as the blade
pub fn wing(plow: &PlowSection, side: Side) -> proc_gen::Result<Mesh> {
    let height = plow.profile.iter().map(|p| p[1]).fold(0.0, f32::max);
    let plate = ProfileCurve::closed(&[
        (0.0, 0.0),
        (WING_THICKNESS, 0.0),
        (WING_THICKNESS, height),
        (0.0, height),
    ])?;
    generate_attachment(&plate, &wing_params(plow, side))
}

/// Cutting teeth spread evenly along the blade's leading edge
pub fn teeth(plow: &PlowSection) -> proc_gen::Result<Vec<Mesh>> {
    let wedge = ProfileCurve::closed(&[
        (-TOOTH_HALF_WIDTH, 0.0),
        (TOOTH_HALF_WIDTH, 0.0),
        (0.0, TOOTH_HEIGHT),
    ])?;
    // Teeth start at the most forward point of the profile's floor
    let edge = plow
        .profile
        .iter()
        .filter(|p| p[1] <= f32::EPSILON)
        .map(|p| p[0])
        .fold(0.0, f32::max);

    let pitch = plow.segment_width / plow.teeth as f32;
    (0..plow.teeth)
        .map(|i| {
            let x = -plow.segment_width * 0.5 + pitch * (i as f32 + 0.5);
            // Each half curves toward the blade's center line
            let side = if x < 0.0 { Side::Left } else { Side::Right };
            let params = AttachmentParams {
                side,
                ..AttachmentParams::tooth()
            };
            generate_attachment(&wedge, &params.at(Vec3::new(x, edge, 0.0)))
        })
        .collect()
}

/// Build the tagged plow scene
pub fn build(plow: &PlowSection) -> Result<Scene> {
    ensure!(plow.segment_width > 0.0, "plow segment_width must be positive");
    let mut scene = SceneBuilder::new();

    let steel = scene.material(
        Material::new("PlowSteel", [0.45, 0.45, 0.48, 1.0]).with_roughness(0.5),
        vocabulary::PLOW,
    )?;

    scene.mesh(
        "Plow_Segment",
        segment(plow)?.with_material(steel),
        Vec3::ZERO,
        vocabulary::PLOW_SEGMENT,
    )?;

    for (name, side) in [("Plow_Wing_L", Side::Left), ("Plow_Wing_R", Side::Right)] {
        scene.mesh(
            name,
            wing(plow, side)?.with_material(steel),
            Vec3::ZERO,
            vocabulary::PLOW_WING,
        )?;
    }

    for (i, tooth) in teeth(plow)?.into_iter().enumerate() {
        scene.mesh(
            format!("Plow_Tooth_{i}"),
            tooth.with_material(steel),
            Vec3::ZERO,
            vocabulary::PLOW_TOOTH,
        )?;
    }

    Ok(scene.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_matches_blade_scenario() {
        let mesh = segment(&PlowSection::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.faces[0].indices, vec![0, 6, 7, 1]);
    }

    #[test]
    fn test_segment_faces_point_away_from_blade_core() {
        let mesh = segment(&PlowSection::default()).unwrap();
        // The heel edge (0,0)->(-0.3,0.8) on the back faces backward
        let back = mesh.face_normal(&mesh.faces[3]);
        assert!(back.y < 0.0);
        // The bottom run (0.4,0)->(0,0) faces down
        assert!(mesh.face_normal(&mesh.faces[2]).z < 0.0);
    }

    #[test]
    fn test_wings_mirror() {
        let plow = PlowSection::default();
        let left = wing(&plow, Side::Left).unwrap();
        let right = wing(&plow, Side::Right).unwrap();
        assert_eq!(left.vertex_count(), right.vertex_count());
        for (l, r) in left.positions.iter().zip(&right.positions) {
            assert!((l.x + r.x).abs() < 1e-6);
            assert_eq!((l.y, l.z), (r.y, r.z));
        }
        // Mirrored faces keep pointing the same way relative to the geometry
        for (lf, rf) in left.faces.iter().zip(&right.faces) {
            let (ln, rn) = (left.face_normal(lf), right.face_normal(rf));
            assert!((ln.x + rn.x).abs() < 1e-5);
            assert!((ln.y - rn.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_teeth_spread_across_width() {
        let plow = PlowSection::default();
        let teeth = teeth(&plow).unwrap();
        assert_eq!(teeth.len(), 5);
        let first = teeth[0].positions[0];
        let last = teeth[4].positions[0];
        assert!(first.x < -0.3 && last.x > 0.3);
        assert_eq!(first.y, 0.4);
    }

    #[test]
    fn test_teeth_curve_toward_center() {
        let plow = PlowSection::default();
        let teeth = teeth(&plow).unwrap();
        let drift = |mesh: &Mesh| {
            let n = mesh.positions.len();
            let tip: f32 = mesh.positions[n - 3..].iter().map(|p| p.x).sum::<f32>() / 3.0;
            let base: f32 = mesh.positions[..3].iter().map(|p| p.x).sum::<f32>() / 3.0;
            tip - base
        };
        assert!(drift(&teeth[0]) > 0.0);
        assert!(drift(&teeth[4]) < 0.0);
        assert!((drift(&teeth[0]) + drift(&teeth[4])).abs() < 1e-5);
    }

    #[test]
    fn test_scene_tags() {
        let scene = build(&PlowSection::default()).unwrap();
        assert!(scene.untagged().is_empty());
        assert_eq!(scene.objects_tagged(vocabulary::PLOW_SEGMENT).count(), 1);
        assert_eq!(scene.objects_tagged(vocabulary::PLOW_WING).count(), 2);
        assert_eq!(scene.objects_tagged(vocabulary::PLOW_TOOTH).count(), 5);
    }
}
