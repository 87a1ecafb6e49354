//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use bevy::prelude::Vec3;

/// Direction used for the vantage offset when the camera sits exactly on the
/// target centre and no camera-to-target direction exists.
pub const FALLBACK_VANTAGE_AXIS: Vec3 = Vec3::Z;

/// Adds a pitch change to the running accumulator and clamps the result.
///
/// `current` and `delta` are in degrees; the result always lies in
/// `[-limit, limit]`. Non-finite input leaves the accumulator untouched.
///
/// # Examples
/// ```
/// # use solar_focus::math::clamp_pitch;
/// assert_eq!(clamp_pitch(80.0, 20.0, 85.0), 85.0);
/// assert_eq!(clamp_pitch(0.0, -10.0, 85.0), -10.0);
/// ```
pub fn clamp_pitch(current: f32, delta: f32, limit: f32) -> f32 {
    let limit = limit.abs();
    let next = current + delta;
    if next.is_finite() {
        next.clamp(-limit, limit)
    } else {
        current.clamp(-limit, limit)
    }
}

/// Projects a camera's forward/right axes onto the horizontal plane.
///
/// The vertical component of `forward` is dropped and both vectors are
/// renormalized, so looking up or down never changes walking speed.
/// A camera looking straight down yields a zero forward vector.
pub fn planar_basis(forward: Vec3, right: Vec3) -> (Vec3, Vec3) {
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    (forward, right.normalize_or_zero())
}

/// Vertical input direction from the ascend/descend keys.
///
/// Ascend is checked first, so holding both keys climbs.
pub fn vertical_step(ascend: bool, descend: bool) -> f32 {
    if ascend {
        1.0
    } else if descend {
        -1.0
    } else {
        0.0
    }
}

/// Speeds and timestep applied to one frame of locomotion input.
#[derive(Clone, Copy, Debug)]
pub struct MoveScale {
    /// Horizontal speed in world-units per second.
    pub move_speed: f32,
    /// Vertical speed in world-units per second.
    pub vertical_speed: f32,
    /// Elapsed time for this frame, in seconds.
    pub dt: f32,
}

/// World-space displacement for one frame of movement input.
///
/// `forward` and `right` must already be planar (see [`planar_basis`]).
/// `axis` is `(move_x, move_z)` in `[-1, 1]`, `vertical` comes from
/// [`vertical_step`].
pub fn movement_delta(forward: Vec3, right: Vec3, axis: (f32, f32), vertical: f32, scale: MoveScale) -> Vec3 {
    let (move_x, move_z) = axis;
    let horizontal = (forward * move_z + right * move_x) * scale.move_speed;
    let lift = Vec3::Y * vertical * scale.vertical_speed;
    (horizontal + lift) * scale.dt
}

/// Radius of a collision volume: its largest half-extent.
pub fn bounding_radius(half_extents: Vec3) -> f32 {
    half_extents.abs().max_element()
}

/// Camera position used while focused on a body.
///
/// Places the camera on the line from `center` through `camera`, at
/// `base_distance + radius` from the centre. When `camera == center` the
/// offset falls back to [`FALLBACK_VANTAGE_AXIS`].
pub fn vantage_point(camera: Vec3, center: Vec3, base_distance: f32, radius: f32) -> Vec3 {
    let dir = (camera - center)
        .try_normalize()
        .unwrap_or(FALLBACK_VANTAGE_AXIS);
    center + dir * (base_distance + radius)
}

/// Applies `delta` to a spherical character body and pushes it out of any
/// overlapping obstacle.
///
/// `obstacles` yields `(centre, radius)` pairs. Obstacles are resolved in
/// order; a body ending exactly on an obstacle centre is pushed back toward
/// where it came from (or straight up if it started there too).
pub fn resolve_move(
    from: Vec3,
    delta: Vec3,
    body_radius: f32,
    obstacles: impl IntoIterator<Item = (Vec3, f32)>,
) -> Vec3 {
    let mut target = from + delta;
    for (center, radius) in obstacles {
        let min_dist = radius + body_radius;
        let offset = target - center;
        if offset.length_squared() >= min_dist * min_dist {
            continue;
        }
        let push = offset
            .try_normalize()
            .or_else(|| (from - center).try_normalize())
            .unwrap_or(Vec3::Y);
        target = center + push * min_dist;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── clamp_pitch ─────────────────────────────────────────────────

    #[test]
    fn small_delta_passes_through() {
        assert!((clamp_pitch(0.0, 10.0, 85.0) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn clamps_at_upper_limit() {
        assert_eq!(clamp_pitch(84.0, 50.0, 85.0), 85.0);
    }

    #[test]
    fn clamps_at_lower_limit() {
        assert_eq!(clamp_pitch(-84.0, -50.0, 85.0), -85.0);
    }

    #[test]
    fn pitch_never_leaves_range() {
        let mut pitch = 0.0;
        for i in 0..200 {
            let magnitude = if i % 3 == 0 { -1.0e4 } else { 7.5e3 };
            let delta = magnitude * (i as f32 + 1.0);
            pitch = clamp_pitch(pitch, delta, 85.0);
            assert!((-85.0..=85.0).contains(&pitch), "pitch {pitch} escaped");
        }
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        assert_eq!(clamp_pitch(12.0, f32::NAN, 85.0), 12.0);
        assert_eq!(clamp_pitch(12.0, f32::INFINITY, 85.0), 12.0);
    }

    // ── planar_basis / movement_delta ───────────────────────────────

    const SCALE: MoveScale = MoveScale {
        move_speed: 10.0,
        vertical_speed: 5.0,
        dt: 0.5,
    };

    #[test]
    fn forward_speed_ignores_camera_pitch() {
        let level = Vec3::NEG_Z;
        let tilted = Vec3::new(0.0, -0.9, -0.1).normalize();
        let (f_level, r_level) = planar_basis(level, Vec3::X);
        let (f_tilted, r_tilted) = planar_basis(tilted, Vec3::X);

        let a = movement_delta(f_level, r_level, (0.0, 1.0), 0.0, SCALE);
        let b = movement_delta(f_tilted, r_tilted, (0.0, 1.0), 0.0, SCALE);
        assert!((a - b).length() < 1e-5);
        assert!((a - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
        assert_eq!(b.y, 0.0);
    }

    #[test]
    fn straight_down_forward_degenerates_to_zero() {
        let (forward, _) = planar_basis(Vec3::NEG_Y, Vec3::X);
        assert_eq!(forward, Vec3::ZERO);
    }

    #[test]
    fn strafe_uses_right_axis() {
        let (f, r) = planar_basis(Vec3::NEG_Z, Vec3::X * 3.0);
        let d = movement_delta(f, r, (-1.0, 0.0), 0.0, SCALE);
        assert!((d - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn vertical_uses_its_own_speed() {
        let (f, r) = planar_basis(Vec3::NEG_Z, Vec3::X);
        let up = movement_delta(f, r, (0.0, 0.0), vertical_step(true, false), SCALE);
        let down = movement_delta(f, r, (0.0, 0.0), vertical_step(false, true), SCALE);
        assert!((up - Vec3::new(0.0, 2.5, 0.0)).length() < 1e-6);
        assert!((down - Vec3::new(0.0, -2.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn ascend_wins_when_both_held() {
        assert_eq!(vertical_step(true, true), 1.0);
        assert_eq!(vertical_step(false, false), 0.0);
    }

    // ── bounding_radius / vantage_point ─────────────────────────────

    #[test]
    fn radius_is_largest_half_extent() {
        assert_eq!(bounding_radius(Vec3::new(1.0, 4.0, 2.5)), 4.0);
        assert_eq!(bounding_radius(Vec3::new(-6.0, 4.0, 2.5)), 6.0);
    }

    #[test]
    fn vantage_sits_on_camera_side_at_adjusted_distance() {
        let center = Vec3::new(10.0, 0.0, 0.0);
        let camera = Vec3::new(10.0, 0.0, 100.0);
        let v = vantage_point(camera, center, 20.0, 5.0);
        assert!((v.distance(center) - 25.0).abs() < 1e-5);
        assert!((v - Vec3::new(10.0, 0.0, 25.0)).length() < 1e-5);
    }

    #[test]
    fn vantage_falls_back_when_camera_on_center() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let v = vantage_point(center, center, 20.0, 5.0);
        assert!(v.is_finite());
        assert!((v - (center + FALLBACK_VANTAGE_AXIS * 25.0)).length() < 1e-5);
    }

    // ── resolve_move ────────────────────────────────────────────────

    #[test]
    fn free_move_is_unchanged() {
        let end = resolve_move(Vec3::ZERO, Vec3::X, 0.5, [(Vec3::new(0.0, 0.0, 50.0), 5.0)]);
        assert_eq!(end, Vec3::X);
    }

    #[test]
    fn move_into_obstacle_stops_at_surface() {
        let center = Vec3::new(10.0, 0.0, 0.0);
        let end = resolve_move(Vec3::ZERO, Vec3::X * 9.0, 1.0, [(center, 5.0)]);
        assert!((end.distance(center) - 6.0).abs() < 1e-5);
        assert!(end.x < center.x);
    }

    #[test]
    fn landing_on_center_pushes_back_along_approach() {
        let center = Vec3::new(10.0, 0.0, 0.0);
        let end = resolve_move(Vec3::ZERO, center, 1.0, [(center, 2.0)]);
        assert!((end - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-5);
    }
}
