use bevy::prelude::*;
use thiserror::Error;

use crate::math;

/// Tag marking a body the player may focus by clicking it.
#[derive(Component, Reflect)]
pub struct Focusable;

/// Descriptive data shown while a body is focused.
#[derive(Component, Clone, Debug, Reflect)]
pub struct BodyInfo {
    /// Text typed into the info panel.
    pub description: String,
}

/// Box-shaped collision volume in local space.
#[derive(Component, Clone, Copy, Debug, Reflect)]
pub struct BodyCollider {
    /// Half size along each local axis.
    pub half_extents: Vec3,
}

impl BodyCollider {
    /// Collider enclosing a sphere of `radius`.
    pub fn sphere(radius: f32) -> Self {
        Self {
            half_extents: Vec3::splat(radius),
        }
    }

    /// Bounding radius after applying the entity's world scale.
    pub fn world_radius(&self, transform: &GlobalTransform) -> f32 {
        let (scale, _, _) = transform.to_scale_rotation_translation();
        math::bounding_radius(self.half_extents * scale.abs())
    }
}

/// A resolved click target.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusTarget {
    /// The focused scene entity.
    pub entity: Entity,
    /// Display name for the info panel heading.
    pub name: String,
    /// World-space centre of the body.
    pub center: Vec3,
    /// Bounding radius from the collision volume.
    pub radius: f32,
    /// Description revealed while focused.
    pub description: String,
}

/// A body tagged [`Focusable`] lacks data needed to focus it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FocusError {
    /// No [`BodyInfo`] on the body.
    #[error("focusable body {0:?} has no BodyInfo description")]
    MissingDescription(Entity),
    /// No [`BodyCollider`] on the body.
    #[error("focusable body {0:?} has no BodyCollider")]
    MissingCollider(Entity),
    /// The body has no world transform.
    #[error("focusable body {0:?} has no GlobalTransform")]
    MissingTransform(Entity),
}
