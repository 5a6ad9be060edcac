use bevy::prelude::*;

/// Anything that can turn a screen position into a ray through the world.
pub trait Viewpoint {
    fn screen_ray(&self, screen_position: Vec2) -> Option<Ray3d>;
}

/// The camera drawing the launcher, injected into the drag controller every tick.
pub struct CameraViewpoint<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl Viewpoint for CameraViewpoint<'_> {
    fn screen_ray(&self, screen_position: Vec2) -> Option<Ray3d> {
        self.camera
            .viewport_to_world(self.transform, screen_position)
            .ok()
    }
}

/// Maps a pointer position onto the world plane `z = depth`.
pub fn map(viewpoint: &dyn Viewpoint, screen_position: Vec2, depth: f32) -> Option<Vec3> {
    let ray = viewpoint.screen_ray(screen_position)?;
    project_ray_to_depth(ray, depth)
}

/// Where `ray` crosses the plane `z = depth`, if it does in front of its origin.
pub fn project_ray_to_depth(ray: Ray3d, depth: f32) -> Option<Vec3> {
    let distance = ray.intersect_plane(Vec3::new(0.0, 0.0, depth), InfinitePlane3d::new(Vec3::Z))?;
    Some(ray.get_point(distance))
}
