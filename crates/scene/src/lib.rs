mod camera;
mod sdf;

pub use crate::{
    camera::{Camera, Screen, ScreenError},
    sdf::{Object, Sdf, Sphere, Torus},
};

use geom::v64;

/// A camera and the union of the shapes it looks at.
///
/// Objects can be updated in place between renders but never removed.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    objects: Vec<Object>,
}

impl Scene {
    pub fn new(camera: Camera) -> Scene {
        Scene { camera, objects: Vec::new() }
    }

    pub fn add_object(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into())
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }
}

impl Sdf for Scene {
    /// Pointwise minimum over all objects, `f64::INFINITY` for an empty scene.
    fn distance_to(&self, point: v64) -> f64 {
        self.objects.iter().map(|it| it.distance_to(point)).fold(f64::INFINITY, f64::min)
    }
}

#[test]
fn test_union_is_nearest_object() {
    let screen = Screen::new(10, 10).unwrap();
    let mut scene = Scene::new(Camera::new(v64::ZERO, v64::Y, screen));
    assert_eq!(scene.distance_to(v64::ZERO), f64::INFINITY);

    scene.add_object(Sphere::new(geom::v64(0.0, 9.0, 0.0), 2.0));
    scene.add_object(Sphere::new(geom::v64(4.0, 7.0, 0.0), 2.0));
    assert_eq!(scene.objects().len(), 2);

    let p = geom::v64(4.0, 4.0, 0.0);
    assert_eq!(scene.distance_to(p), 1.0);
    let p = geom::v64(0.0, 13.0, 0.0);
    assert_eq!(scene.distance_to(p), 2.0);
}
