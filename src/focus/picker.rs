use bevy::ecs::system::SystemParam;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;

use super::SceneQuery;
use super::entities::{BodyCollider, BodyInfo, Focusable};

/// [`SceneQuery`] over the live ECS world, using mesh ray casts.
#[derive(SystemParam)]
pub struct ScenePicker<'w, 's> {
    ray_cast: MeshRayCast<'w, 's>,
    focusable: Query<'w, 's, (), With<Focusable>>,
    transforms: Query<'w, 's, &'static GlobalTransform>,
    colliders: Query<'w, 's, (&'static BodyCollider, &'static GlobalTransform)>,
    infos: Query<'w, 's, &'static BodyInfo>,
    names: Query<'w, 's, &'static Name>,
}

impl SceneQuery for ScenePicker<'_, '_> {
    fn cast_ray(&mut self, ray: Ray3d) -> Option<(Entity, Vec3)> {
        self.ray_cast
            .cast_ray(ray, &MeshRayCastSettings::default())
            .first()
            .map(|(entity, hit)| (*entity, hit.point))
    }

    fn is_focusable(&self, entity: Entity) -> bool {
        self.focusable.contains(entity)
    }

    fn center(&self, entity: Entity) -> Option<Vec3> {
        self.transforms.get(entity).ok().map(GlobalTransform::translation)
    }

    fn bounding_radius(&self, entity: Entity) -> Option<f32> {
        self.colliders
            .get(entity)
            .ok()
            .map(|(collider, gt)| collider.world_radius(gt))
    }

    fn description(&self, entity: Entity) -> Option<&str> {
        self.infos.get(entity).ok().map(|info| info.description.as_str())
    }

    fn name(&self, entity: Entity) -> Option<&str> {
        self.names.get(entity).ok().map(Name::as_str)
    }
}
