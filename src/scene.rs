//! Demo solar system: a glowing sun, focusable planets and a ring of
//! non-focusable asteroids.
//!
//! Bodies are static; the scene only exists to give the explorer something
//! to fly around and focus on.

mod systems;

use bevy::prelude::*;

/// One focusable body of the demo system.
#[derive(Clone, Debug, Reflect)]
pub struct BodySpec {
    /// Display name, also the info panel heading.
    pub name: String,
    /// Text revealed while focused.
    pub description: String,
    /// Sphere radius.
    pub radius: f32,
    /// Distance from the sun along the orbital plane.
    pub orbit: f32,
    /// Position on the orbit (degrees).
    pub angle: f32,
    /// Surface colour.
    pub color: Color,
    /// Emissive glow, used for the sun.
    pub glow: f32,
}

impl BodySpec {
    fn new(name: &str, radius: f32, orbit: f32, angle: f32, color: Color, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            radius,
            orbit,
            angle,
            color,
            glow: 0.0,
        }
    }

    /// World-space centre of the body.
    pub fn position(&self) -> Vec3 {
        let a = self.angle.to_radians();
        Vec3::new(a.cos() * self.orbit, 0.0, a.sin() * self.orbit)
    }
}

/// Per-plugin configuration for the demo scene.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct SceneConfig {
    /// Focusable bodies, the sun first.
    pub bodies: Vec<BodySpec>,
    /// Number of decorative asteroids.
    pub asteroid_count: u32,
    /// Radius of the asteroid belt.
    pub belt_radius: f32,
    /// Radial spread of the belt.
    pub belt_width: f32,
    /// Background clear color.
    pub clear_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut sun = BodySpec::new(
            "Sun",
            30.0,
            0.0,
            0.0,
            Color::srgb(1.0, 0.8, 0.3),
            "A yellow dwarf star holding 99.8% of the system's mass. Its light takes about eight minutes to reach Earth.",
        );
        sun.glow = 8.0;
        Self {
            bodies: vec![
                sun,
                BodySpec::new(
                    "Mercury",
                    2.0,
                    60.0,
                    20.0,
                    Color::srgb(0.6, 0.6, 0.6),
                    "The smallest planet and the closest to the Sun. A year there lasts only 88 days.",
                ),
                BodySpec::new(
                    "Venus",
                    4.5,
                    90.0,
                    140.0,
                    Color::srgb(0.9, 0.7, 0.4),
                    "Wrapped in thick clouds of sulfuric acid, Venus is the hottest planet despite not being the closest to the Sun.",
                ),
                BodySpec::new(
                    "Earth",
                    5.0,
                    125.0,
                    250.0,
                    Color::srgb(0.2, 0.4, 0.9),
                    "The only known world with liquid water on its surface and life.",
                ),
                BodySpec::new(
                    "Mars",
                    3.0,
                    160.0,
                    320.0,
                    Color::srgb(0.8, 0.3, 0.1),
                    "The red planet, home of Olympus Mons, the tallest volcano in the solar system.",
                ),
                BodySpec::new(
                    "Jupiter",
                    16.0,
                    260.0,
                    60.0,
                    Color::srgb(0.8, 0.6, 0.4),
                    "A gas giant more than twice as massive as all other planets combined. Its Great Red Spot is a storm larger than Earth.",
                ),
                BodySpec::new(
                    "Saturn",
                    13.0,
                    340.0,
                    190.0,
                    Color::srgb(0.9, 0.8, 0.5),
                    "Famous for its bright rings of ice and rock. It is less dense than water.",
                ),
            ],
            asteroid_count: 160,
            belt_radius: 205.0,
            belt_width: 18.0,
            clear_color: Color::srgb(0.0, 0.0, 0.01),
        }
    }
}

/// Spawns the demo solar system at startup.
pub struct ScenePlugin(pub SceneConfig);

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(Startup, systems::spawn_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_sits_at_origin() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.bodies[0].position(), Vec3::ZERO);
    }

    #[test]
    fn bodies_do_not_overlap() {
        let cfg = SceneConfig::default();
        for (i, a) in cfg.bodies.iter().enumerate() {
            for b in &cfg.bodies[i + 1..] {
                let gap = a.position().distance(b.position()) - a.radius - b.radius;
                assert!(gap > 0.0, "{} overlaps {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn orbit_angle_places_body_on_circle() {
        let body = BodySpec::new("X", 1.0, 10.0, 90.0, Color::WHITE, "");
        assert!((body.position() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }
}
