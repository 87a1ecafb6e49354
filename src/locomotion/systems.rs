use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::ecs::query::QuerySingleError;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use super::LocomotionConfig;
use super::entities::{CharacterBody, LocomotionInput, PlayerRig, RigCamera, RigStatus, SetupError};
use crate::math::{self, MoveScale};
use crate::pause::PauseGate;

/// Local camera rotation for a pitch in degrees.
pub fn pitch_rotation(pitch: f32) -> Quat {
    Quat::from_rotation_x(pitch.to_radians())
}

/// Spawns the rig with its collision body and the bloom camera as a child.
pub fn spawn_rig(mut commands: Commands, cfg: Res<LocomotionConfig>) {
    let look_at = Vec3::new(cfg.spawn_look_at.x, cfg.spawn_position.y, cfg.spawn_look_at.z);
    commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(cfg.spawn_position).looking_at(look_at, Vec3::Y),
            Visibility::default(),
            PlayerRig::default(),
            CharacterBody {
                radius: cfg.body_radius,
            },
        ))
        .with_children(|rig| {
            rig.spawn((
                Name::new("Camera"),
                Camera3d::default(),
                Hdr,
                Tonemapping::TonyMcMapface,
                Bloom {
                    intensity: cfg.bloom_intensity,
                    composite_mode: BloomCompositeMode::Additive,
                    ..Bloom::NATURAL
                },
                Transform::default(),
                RigCamera,
            ));
        });
}

fn check_rig(
    rigs: &Query<(Entity, Has<CharacterBody>), With<PlayerRig>>,
    cameras: &Query<&ChildOf, With<RigCamera>>,
) -> Result<(), SetupError> {
    let (rig, has_body) = rigs.single().map_err(|err| match err {
        QuerySingleError::NoEntities(_) => SetupError::MissingRig,
        QuerySingleError::MultipleEntities(_) => SetupError::MultipleRigs,
    })?;
    if !has_body {
        return Err(SetupError::MissingBody(rig));
    }
    if !cameras.iter().any(|child_of| child_of.parent() == rig) {
        return Err(SetupError::MissingCamera(rig));
    }
    Ok(())
}

/// Checks the rig once at startup; a broken rig leaves the controller inert.
pub fn validate_rig(
    mut status: ResMut<RigStatus>,
    rigs: Query<(Entity, Has<CharacterBody>), With<PlayerRig>>,
    cameras: Query<&ChildOf, With<RigCamera>>,
) {
    *status = match check_rig(&rigs, &cameras) {
        Ok(()) => RigStatus::Ready,
        Err(err) => {
            error!("{err}; locomotion disabled");
            RigStatus::Inert
        }
    };
}

/// WASD + mouse look + Q/E altitude, skipped entirely while paused.
pub fn locomote(
    input: LocomotionInput,
    mut rigs: Query<(&mut Transform, &mut PlayerRig, &CharacterBody), Without<RigCamera>>,
    mut cameras: Query<&mut Transform, (With<RigCamera>, Without<PlayerRig>)>,
) {
    if input.gate.is_paused() {
        return;
    }
    let Ok((mut transform, mut rig, body)) = rigs.single_mut() else {
        return;
    };
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };
    let cfg = &input.cfg;
    let sample = &input.sample;
    let dt = input.time.delta_secs();

    // Movement in the camera's planar forward/right basis
    let view = transform.rotation * camera.rotation;
    let (forward, right) = math::planar_basis(view * Vec3::NEG_Z, view * Vec3::X);
    let delta = math::movement_delta(
        forward,
        right,
        (sample.move_x, sample.move_z),
        math::vertical_step(sample.ascend, sample.descend),
        MoveScale {
            move_speed: cfg.move_speed,
            vertical_speed: cfg.vertical_speed,
            dt,
        },
    );
    if delta != Vec3::ZERO {
        let obstacles = input
            .obstacles
            .iter()
            .map(|(gt, collider)| (gt.translation(), collider.world_radius(gt)));
        transform.translation = math::resolve_move(transform.translation, delta, body.radius, obstacles);
    }

    // Pitch is absolute from the accumulator, yaw is incremental
    let look = sample.mouse_delta * cfg.mouse_sensitivity * dt;
    rig.pitch = math::clamp_pitch(rig.pitch, -look.y, cfg.pitch_limit);
    camera.rotation = pitch_rotation(rig.pitch);
    if look.x != 0.0 {
        transform.rotate_y(-look.x.to_radians());
    }
}

/// Locks and hides the cursor while exploring, frees it while paused.
///
/// Asserted every frame so external cursor changes are undone.
pub fn assert_cursor(gate: Res<PauseGate>, mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    let (grab_mode, visible) = if gate.is_paused() {
        (CursorGrabMode::None, true)
    } else {
        (CursorGrabMode::Locked, false)
    };
    for mut opts in &mut cursors {
        if opts.grab_mode != grab_mode {
            opts.grab_mode = grab_mode;
        }
        if opts.visible != visible {
            opts.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::input::InputSample;
    use crate::locomotion::LocomotionPlugin;
    use crate::ExplorePlugin;

    #[test]
    fn zero_pitch_is_identity() {
        assert!(pitch_rotation(0.0).abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn positive_pitch_looks_up() {
        let forward = pitch_rotation(30.0) * Vec3::NEG_Z;
        assert!(forward.y > 0.0);
        assert!((forward.y - 0.5).abs() < 1e-5);
    }

    // ── validate_rig ────────────────────────────────────────────────

    fn spawn_rig_with(world: &mut World, body: bool, camera: bool) -> Entity {
        let mut rig = world.spawn((Transform::default(), PlayerRig::default()));
        if body {
            rig.insert(CharacterBody { radius: 1.0 });
        }
        if camera {
            rig.with_children(|parent| {
                parent.spawn((Transform::default(), RigCamera));
            });
        }
        rig.id()
    }

    fn checked(world: &mut World) -> Result<(), SetupError> {
        world
            .run_system_once(
                |rigs: Query<(Entity, Has<CharacterBody>), With<PlayerRig>>,
                 cameras: Query<&ChildOf, With<RigCamera>>| check_rig(&rigs, &cameras),
            )
            .unwrap()
    }

    fn validated(world: &mut World) -> RigStatus {
        world.insert_resource(RigStatus::Ready);
        world.run_system_once(validate_rig).unwrap();
        *world.resource::<RigStatus>()
    }

    #[test]
    fn complete_rig_is_ready() {
        let mut world = World::new();
        spawn_rig_with(&mut world, true, true);
        assert_eq!(validated(&mut world), RigStatus::Ready);
    }

    #[test]
    fn rig_without_camera_is_inert() {
        let mut world = World::new();
        let rig = spawn_rig_with(&mut world, true, false);
        world.spawn((Transform::default(), RigCamera));
        assert_eq!(validated(&mut world), RigStatus::Inert);

        assert_eq!(checked(&mut world), Err(SetupError::MissingCamera(rig)));
    }

    #[test]
    fn rig_without_body_is_inert() {
        let mut world = World::new();
        let rig = spawn_rig_with(&mut world, false, true);
        assert_eq!(validated(&mut world), RigStatus::Inert);
        assert_eq!(checked(&mut world), Err(SetupError::MissingBody(rig)));
    }

    #[test]
    fn missing_or_duplicate_rig_is_inert() {
        let mut world = World::new();
        assert_eq!(validated(&mut world), RigStatus::Inert);

        spawn_rig_with(&mut world, true, true);
        spawn_rig_with(&mut world, true, true);
        assert_eq!(validated(&mut world), RigStatus::Inert);
        assert_eq!(checked(&mut world), Err(SetupError::MultipleRigs));
    }

    // ── locomote / assert_cursor ────────────────────────────────────

    fn moving_world(paused: bool) -> (World, Entity, Entity) {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_millis(100));
        world.insert_resource(time);
        world.insert_resource(LocomotionConfig::default());
        world.insert_resource(InputSample {
            move_z: 1.0,
            ascend: true,
            mouse_delta: Vec2::new(40.0, -25.0),
            ..default()
        });
        let mut gate = PauseGate::default();
        if paused {
            gate.raise();
        }
        world.insert_resource(gate);

        let rig = world
            .spawn((
                Transform::from_xyz(0.0, 10.0, 100.0),
                PlayerRig { pitch: -12.5 },
                CharacterBody { radius: 1.0 },
            ))
            .id();
        let camera = world.spawn((Transform::from_rotation(pitch_rotation(-12.5)), RigCamera)).id();
        world.entity_mut(rig).add_child(camera);
        (world, rig, camera)
    }

    #[test]
    fn paused_rig_does_not_move_or_turn() {
        let (mut world, rig, camera) = moving_world(true);
        let before = *world.get::<Transform>(rig).unwrap();
        let camera_before = *world.get::<Transform>(camera).unwrap();

        world.run_system_once(locomote).unwrap();

        assert_eq!(*world.get::<Transform>(rig).unwrap(), before);
        assert_eq!(*world.get::<Transform>(camera).unwrap(), camera_before);
        assert_eq!(world.get::<PlayerRig>(rig).unwrap().pitch, -12.5);
    }

    #[test]
    fn clear_gate_moves_and_turns() {
        let (mut world, rig, _) = moving_world(false);
        let before = *world.get::<Transform>(rig).unwrap();

        world.run_system_once(locomote).unwrap();

        let after = *world.get::<Transform>(rig).unwrap();
        // 10 u/s forward along -Z and 5 u/s up, for 0.1 s
        assert!((after.translation - Vec3::new(0.0, 10.5, 99.0)).length() < 1e-4);
        assert_ne!(after.rotation, before.rotation);
        // Mouse up looks up: 25 px * 10 deg/px/s * 0.1 s
        assert!((world.get::<PlayerRig>(rig).unwrap().pitch - 12.5).abs() < 1e-4);
    }

    fn cursor_state(world: &mut World, window: Entity) -> (CursorGrabMode, bool) {
        world.run_system_once(assert_cursor).unwrap();
        let opts = world.get::<CursorOptions>(window).unwrap();
        (opts.grab_mode, opts.visible)
    }

    #[test]
    fn cursor_follows_pause_gate() {
        let mut world = World::new();
        let window = world.spawn((CursorOptions::default(), PrimaryWindow)).id();
        world.insert_resource(PauseGate::default());
        assert_eq!(cursor_state(&mut world, window), (CursorGrabMode::Locked, false));

        world.resource_mut::<PauseGate>().raise();
        assert_eq!(cursor_state(&mut world, window), (CursorGrabMode::None, true));

        world.resource_mut::<PauseGate>().clear();
        assert_eq!(cursor_state(&mut world, window), (CursorGrabMode::Locked, false));
    }

    #[test]
    fn cursor_tampering_is_undone() {
        let mut world = World::new();
        let window = world.spawn((CursorOptions::default(), PrimaryWindow)).id();
        world.insert_resource(PauseGate::default());
        cursor_state(&mut world, window);

        {
            let mut opts = world.get_mut::<CursorOptions>(window).unwrap();
            opts.grab_mode = CursorGrabMode::None;
            opts.visible = true;
        }
        assert_eq!(cursor_state(&mut world, window), (CursorGrabMode::Locked, false));
    }

    // ── plugin wiring ───────────────────────────────────────────────

    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            StatesPlugin,
            ExplorePlugin,
            LocomotionPlugin(LocomotionConfig::default()),
        ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(InputSample {
            move_z: 1.0,
            ..default()
        })
        .init_resource::<PauseGate>();
        app.update();
        app
    }

    fn rig_translation(app: &mut App) -> Vec3 {
        let mut rigs = app.world_mut().query_filtered::<&Transform, With<PlayerRig>>();
        rigs.single(app.world()).unwrap().translation
    }

    #[test]
    fn spawned_rig_is_ready_and_moves() {
        let mut app = headless_app();
        assert_eq!(*app.world().resource::<RigStatus>(), RigStatus::Ready);

        let start = rig_translation(&mut app);
        app.update();
        app.update();
        assert_ne!(rig_translation(&mut app), start);
    }

    #[test]
    fn inert_controller_never_moves() {
        let mut app = headless_app();
        app.insert_resource(RigStatus::Inert);

        let start = rig_translation(&mut app);
        app.update();
        app.update();
        assert_eq!(rig_translation(&mut app), start);
    }
}
