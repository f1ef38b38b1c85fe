//! Bulldozer component scene
//!
//! Static body parts plus the two assets the runtime instances: a single
//! track link and one path loop per side that the links are laid along.

use crate::config::{AssetGenConfig, ChassisSection, TracksSection};
use anyhow::Result;
use glam::Vec3;
use proc_gen::contract::vocabulary;
use proc_gen::mesh::*;
use proc_gen::scene::{Material, MaterialId, Scene, SceneBuilder};

pub const BODY_TEXTURE: &str = "bulldozer_texture.png";
pub const TRACK_TEXTURE: &str = "tracks_texture.png";

/// Axis-aligned box centered at the origin, outward-facing with both ends capped
pub fn block(size: [f32; 3]) -> proc_gen::Result<Mesh> {
    let [w, l, h] = size;
    let options = LoftOptions::default()
        .plane(ProfilePlane::XZ)
        .caps(Caps::BOTH);
    extrude(
        &ProfileCurve::rectangle(w, h)?,
        Vec3::new(0.0, -l * 0.5, 0.0),
        Vec3::new(0.0, l * 0.5, 0.0),
        &options,
    )
}

/// Plate with a grouser ridge on top, pivot at the plate center
pub fn track_link(tracks: &TracksSection) -> proc_gen::Result<Mesh> {
    let plate = block(tracks.plate)?;
    let grouser = block(tracks.grouser)?;
    Ok(combine_translated(&[
        (&plate, Vec3::ZERO),
        (&grouser, Vec3::new(0.0, 0.0, tracks.plate[2])),
    ]))
}

/// Polygonal road wheel, axle along X
pub fn wheel(chassis: &ChassisSection) -> proc_gen::Result<Mesh> {
    let rim = ProfileCurve::regular_polygon(chassis.wheel_radius, chassis.wheel_sides)?;
    let half = chassis.wheel_width * 0.5;
    // CCW in (y, z) faces +X, so a +X sweep needs reversed quads
    let options = LoftOptions::default()
        .winding(Winding::Reversed)
        .caps(Caps::BOTH);
    extrude(&rim, Vec3::new(-half, 0.0, 0.0), Vec3::new(half, 0.0, 0.0), &options)
}

fn add_wheels(
    scene: &mut SceneBuilder,
    config: &AssetGenConfig,
    metal: MaterialId,
) -> Result<()> {
    let (chassis, tracks) = (&config.chassis, &config.tracks);
    let mesh = wheel(chassis)?.with_material(metal);
    let count = chassis.wheels_per_side.max(1);
    let spacing = if count > 1 {
        tracks.length / (count - 1) as f32
    } else {
        0.0
    };

    for (side, x) in [("L", -tracks.offset), ("R", tracks.offset)] {
        for i in 0..count {
            let y = if count > 1 { -tracks.length * 0.5 + spacing * i as f32 } else { 0.0 };
            scene.mesh(
                format!("Wheel_{side}{i}"),
                mesh.clone(),
                Vec3::new(x, y, tracks.height),
                vocabulary::WHEEL,
            )?;
        }
    }
    Ok(())
}

/// Build the tagged bulldozer scene
pub fn build(config: &AssetGenConfig) -> Result<Scene> {
    let (chassis, tracks) = (&config.chassis, &config.tracks);
    let mut scene = SceneBuilder::new();

    let paint = scene.material(
        Material::new("YellowPaint", [1.0, 0.6, 0.0, 1.0])
            .with_texture(format!("{}/{BODY_TEXTURE}", config.output.textures)),
        vocabulary::BODY_PAINT,
    )?;
    let metal = scene.material(
        Material::new("DarkMetal", [0.2, 0.2, 0.2, 1.0])
            .with_texture(format!("{}/{TRACK_TEXTURE}", config.output.textures)),
        vocabulary::TRACK_METAL,
    )?;

    scene.mesh(
        "Bulldozer_Body",
        block(chassis.size)?.with_material(paint),
        Vec3::new(0.0, 0.0, chassis.elevation),
        vocabulary::CHASSIS,
    )?;

    // Cabin sits on the roof toward the rear
    let roof = chassis.elevation + chassis.size[2] * 0.5;
    scene.mesh(
        "Cabin",
        block(chassis.cabin_size)?.with_material(paint),
        Vec3::new(
            0.0,
            -(chassis.size[1] - chassis.cabin_size[1]) * 0.5,
            roof + chassis.cabin_size[2] * 0.5,
        ),
        vocabulary::CABIN,
    )?;

    add_wheels(&mut scene, config, metal)?;

    scene.mesh(
        "Asset_TrackLink",
        track_link(tracks)?.with_material(metal),
        Vec3::from_array(tracks.link_position),
        vocabulary::TRACK_LINK,
    )?;

    let path = generate_stadium(&StadiumParams {
        radius: tracks.radius,
        length: tracks.length,
        segments_arc: tracks.segments_arc,
        segments_straight: tracks.segments_straight,
    })?;
    scene.path(
        "Asset_TrackPath_L",
        path.clone(),
        Vec3::new(-tracks.offset, 0.0, tracks.height),
        vocabulary::PATH_L,
    )?;
    scene.path(
        "Asset_TrackPath_R",
        path,
        Vec3::new(tracks.offset, 0.0, tracks.height),
        vocabulary::PATH_R,
    )?;

    Ok(scene.build())
}
