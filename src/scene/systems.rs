use std::f32::consts::TAU;

use bevy::prelude::*;

use super::SceneConfig;
use crate::focus::{BodyCollider, BodyInfo, Focusable};

/// Golden angle in radians, for an even but irregular belt.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Spawns the sun, planets, sunlight and the asteroid belt.
pub fn spawn_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<SceneConfig>,
) {
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(48, 24));

    for body in &cfg.bodies {
        let material = materials.add(StandardMaterial {
            base_color: body.color,
            emissive: LinearRgba::from(body.color) * body.glow,
            ..default()
        });
        commands.spawn((
            Name::new(body.name.clone()),
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(body.position()).with_scale(Vec3::splat(body.radius)),
            Focusable,
            BodyInfo {
                description: body.description.clone(),
            },
            BodyCollider::sphere(1.0),
        ));
    }

    commands.spawn((
        Name::new("Sunlight"),
        PointLight {
            intensity: 2.0e9,
            range: 2000.0,
            ..default()
        },
        Transform::default(),
    ));

    let rock = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let rock_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.3, 0.28),
        perceptual_roughness: 0.9,
        ..default()
    });
    for i in 0..cfg.asteroid_count {
        let t = i as f32;
        let angle = (t * GOLDEN_ANGLE) % TAU;
        let spread = ((t * 0.618_034) % 1.0 - 0.5) * cfg.belt_width;
        let r = cfg.belt_radius + spread;
        let size = 0.6 + (t * 0.37) % 1.4;
        let position = Vec3::new(angle.cos() * r, spread * 0.2, angle.sin() * r);
        commands.spawn((
            Name::new(format!("Asteroid {i}")),
            Mesh3d(rock.clone()),
            MeshMaterial3d(rock_material.clone()),
            Transform::from_translation(position)
                .with_rotation(Quat::from_euler(EulerRot::YXZ, t, t * 0.5, 0.0))
                .with_scale(Vec3::splat(size)),
            BodyCollider {
                half_extents: Vec3::splat(0.5),
            },
        ));
    }

    info!(
        "spawned {} bodies and {} asteroids",
        cfg.bodies.len(),
        cfg.asteroid_count
    );
}
