use std::time::Duration;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::FocusConfig;
use crate::focus::{FocusError, FocusTarget, SceneQuery, resolve_target};
use crate::input::InputSample;
use crate::locomotion::{PlayerRig, RigCamera, RigPose, pitch_rotation};
use crate::math;
use crate::pause::PauseGate;
use crate::reveal::{InfoPanel, RevealConfig};

/// Rig and visibility access the focus state machine drives.
pub trait FocusStage {
    /// Current rig pose, `None` if there is no rig.
    fn rig_pose(&self) -> Option<RigPose>;
    /// Overwrites the rig pose, including camera pitch.
    fn set_rig_pose(&mut self, pose: RigPose);
    /// Rig-local position of the camera.
    fn camera_offset(&self) -> Vec3;
    /// Every renderable that is not already hidden, with its visibility.
    fn visible_renderables(&self) -> Vec<(Entity, Visibility)>;
    /// Sets one renderable's visibility.
    fn set_visibility(&mut self, entity: Entity, visibility: Visibility);
}

/// Everything a focus transition touches besides the machine itself.
pub struct FocusContext<'a, S: FocusStage> {
    /// Rig pose and scene visibility.
    pub stage: &'a mut S,
    /// Info panel and its reveal task.
    pub panel: &'a mut InfoPanel,
    /// Pause gate raised while focused.
    pub gate: &'a mut PauseGate,
    /// Real (unscaled) time of this frame.
    pub now: Duration,
    /// Delay between revealed characters.
    pub cadence: Duration,
}

/// State held for one focus session.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSession {
    /// The focused body.
    pub target: FocusTarget,
    /// Rig pose before the session, restored on exit.
    pub saved_pose: RigPose,
    /// Renderables this session hid, with the visibility they had.
    pub hidden: Vec<(Entity, Visibility)>,
}

/// Interaction lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
    /// Free exploration; the player owns the rig.
    #[default]
    Idle,
    /// Camera parked in front of a body; the machine owns the rig.
    Focused(FocusSession),
}

/// Click-to-focus state machine.
#[derive(Resource, Debug, Default)]
pub struct FocusMachine {
    state: InteractionState,
}

impl FocusMachine {
    /// Current state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// `true` while no body is focused.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Whether a click should be resolved at all: idle and no reveal still
    /// typing.
    pub fn accepts_click(&self, panel: &InfoPanel) -> bool {
        self.is_idle() && !panel.is_revealing()
    }

    /// Resolves a click along `ray` and enters focus on a hit.
    ///
    /// Returns `Ok(false)` when the click is not accepted or hits nothing
    /// focusable; the scene is not queried unless the click is accepted.
    pub fn click<Q: SceneQuery, S: FocusStage>(
        &mut self,
        scene: &mut Q,
        ray: Ray3d,
        cx: &mut FocusContext<'_, S>,
        cfg: &FocusConfig,
    ) -> Result<bool, FocusError> {
        if !self.accepts_click(cx.panel) {
            return Ok(false);
        }
        Ok(match resolve_target(scene, ray)? {
            Some(target) => self.enter(target, cx, cfg),
            None => false,
        })
    }

    /// Applies one frame of input edges, the click before the cancel.
    ///
    /// A click in a focused frame is ignored and the cancel then leaves
    /// focus. A click and a cancel in the same idle frame enter focus and
    /// leave it again at once. Returns the click outcome (`None` without a
    /// click ray) and whether the cancel left focus.
    pub fn apply_edges<Q: SceneQuery, S: FocusStage>(
        &mut self,
        scene: &mut Q,
        click: Option<Ray3d>,
        cancel: bool,
        cx: &mut FocusContext<'_, S>,
        cfg: &FocusConfig,
    ) -> (Option<Result<bool, FocusError>>, bool) {
        let clicked = click.map(|ray| self.click(scene, ray, cx, cfg));
        let exited = cancel && self.exit(cx);
        (clicked, exited)
    }

    /// Idle → Focused on `target`. Returns `false` and changes nothing when
    /// the click is not accepted or there is no rig to move.
    pub fn enter<S: FocusStage>(&mut self, target: FocusTarget, cx: &mut FocusContext<'_, S>, cfg: &FocusConfig) -> bool {
        if !self.accepts_click(cx.panel) {
            return false;
        }
        let Some(saved_pose) = cx.stage.rig_pose() else {
            warn!("no player rig to move; ignoring focus on {}", target.name);
            return false;
        };

        let overview = RigPose {
            translation: saved_pose.translation.with_y(cfg.overview_altitude),
            ..saved_pose
        };
        cx.stage.set_rig_pose(overview);

        cx.panel.show(&target.name);
        cx.panel.start_reveal(&target.description, cx.cadence, cx.now);
        cx.gate.raise();

        cx.stage.set_rig_pose(vantage_pose(
            overview.camera_position(cx.stage.camera_offset()),
            &target,
            cfg.camera_distance,
        ));

        let hidden: Vec<_> = cx
            .stage
            .visible_renderables()
            .into_iter()
            .filter(|(entity, _)| *entity != target.entity)
            .collect();
        for (entity, _) in &hidden {
            cx.stage.set_visibility(*entity, Visibility::Hidden);
        }

        info!(
            "focused {} (radius {:.1}, {} objects hidden)",
            target.name,
            target.radius,
            hidden.len()
        );
        self.state = InteractionState::Focused(FocusSession {
            target,
            saved_pose,
            hidden,
        });
        true
    }

    /// Focused → Idle, restoring the rig, the panel, visibility and time.
    /// Returns `false` when already idle.
    pub fn exit<S: FocusStage>(&mut self, cx: &mut FocusContext<'_, S>) -> bool {
        let InteractionState::Focused(session) = std::mem::take(&mut self.state) else {
            return false;
        };

        cx.stage.set_rig_pose(session.saved_pose);
        cx.panel.close();
        for (entity, visibility) in session.hidden {
            cx.stage.set_visibility(entity, visibility);
        }
        cx.gate.clear();

        info!("left focus on {}", session.target.name);
        true
    }
}

/// Rig pose at the vantage point, looking straight at the target centre.
pub fn vantage_pose(camera: Vec3, target: &FocusTarget, base_distance: f32) -> RigPose {
    let position = math::vantage_point(camera, target.center, base_distance, target.radius);
    let rotation = Transform::from_translation(position)
        .looking_at(target.center, Vec3::Y)
        .rotation;
    RigPose {
        translation: position,
        rotation,
        pitch: 0.0,
    }
}

/// [`FocusStage`] over the rig, its camera and every mesh in the world.
#[derive(SystemParam)]
pub struct SceneStage<'w, 's> {
    rigs: Query<'w, 's, (&'static mut Transform, &'static mut PlayerRig), Without<RigCamera>>,
    cameras: Query<'w, 's, &'static mut Transform, (With<RigCamera>, Without<PlayerRig>)>,
    renderables: Query<'w, 's, (Entity, &'static mut Visibility), With<Mesh3d>>,
}

impl FocusStage for SceneStage<'_, '_> {
    fn rig_pose(&self) -> Option<RigPose> {
        let (transform, rig) = self.rigs.single().ok()?;
        Some(RigPose {
            translation: transform.translation,
            rotation: transform.rotation,
            pitch: rig.pitch,
        })
    }

    fn set_rig_pose(&mut self, pose: RigPose) {
        if let Ok((mut transform, mut rig)) = self.rigs.single_mut() {
            transform.translation = pose.translation;
            transform.rotation = pose.rotation;
            rig.pitch = pose.pitch;
        }
        if let Ok(mut camera) = self.cameras.single_mut() {
            camera.rotation = pitch_rotation(pose.pitch);
        }
    }

    fn camera_offset(&self) -> Vec3 {
        self.cameras
            .single()
            .map_or(Vec3::ZERO, |camera| camera.translation)
    }

    fn visible_renderables(&self) -> Vec<(Entity, Visibility)> {
        self.renderables
            .iter()
            .filter(|(_, visibility)| **visibility != Visibility::Hidden)
            .map(|(entity, visibility)| (entity, *visibility))
            .collect()
    }

    fn set_visibility(&mut self, entity: Entity, visibility: Visibility) {
        if let Ok((_, mut current)) = self.renderables.get_mut(entity) {
            *current = visibility;
        }
    }
}

/// Bundled read-only inputs of [`super::systems::handle_focus_input`].
#[derive(SystemParam)]
pub struct FocusInput<'w, 's> {
    pub(super) sample: Res<'w, InputSample>,
    pub(super) time: Res<'w, Time<Real>>,
    pub(super) cfg: Res<'w, FocusConfig>,
    pub(super) reveal: Res<'w, RevealConfig>,
    pub(super) cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<RigCamera>>,
}
