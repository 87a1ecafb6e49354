//! Focus target resolution: which body, if any, is under the cursor.
//!
//! The resolver only reads the scene. [`resolve_target`] works against any
//! [`SceneQuery`]; [`ScenePicker`] is the ECS-backed implementation.

mod entities;
mod picker;

pub use entities::{BodyCollider, BodyInfo, FocusError, FocusTarget, Focusable};
pub use picker::ScenePicker;

use bevy::prelude::*;

/// Read access to the scene needed to resolve a click.
pub trait SceneQuery {
    /// Nearest hit along `ray`, with the hit point.
    fn cast_ray(&mut self, ray: Ray3d) -> Option<(Entity, Vec3)>;
    /// Whether `entity` is tagged [`Focusable`].
    fn is_focusable(&self, entity: Entity) -> bool;
    /// World-space centre of `entity`.
    fn center(&self, entity: Entity) -> Option<Vec3>;
    /// Bounding radius from the entity's collision volume.
    fn bounding_radius(&self, entity: Entity) -> Option<f32>;
    /// Description text of a focusable body.
    fn description(&self, entity: Entity) -> Option<&str>;
    /// Display name, if the entity has one.
    fn name(&self, entity: Entity) -> Option<&str>;
}

/// Resolves the nearest hit along `ray` to a [`FocusTarget`].
///
/// Misses and hits on non-focusable entities give `Ok(None)`. A focusable
/// body missing its description, collider or transform is an error; callers
/// report it and treat it as no target.
pub fn resolve_target<S: SceneQuery>(scene: &mut S, ray: Ray3d) -> Result<Option<FocusTarget>, FocusError> {
    let Some((entity, _)) = scene.cast_ray(ray) else {
        return Ok(None);
    };
    if !scene.is_focusable(entity) {
        return Ok(None);
    }
    let description = scene
        .description(entity)
        .ok_or(FocusError::MissingDescription(entity))?
        .to_owned();
    let radius = scene
        .bounding_radius(entity)
        .ok_or(FocusError::MissingCollider(entity))?;
    let center = scene.center(entity).ok_or(FocusError::MissingTransform(entity))?;
    let name = scene.name(entity).unwrap_or("Unknown body").to_owned();
    Ok(Some(FocusTarget {
        entity,
        name,
        center,
        radius,
        description,
    }))
}
