use geom::{v64, Ray};
use scene::Sdf;

/// A march step shorter than this counts as touching the surface.
pub const HIT_EPSILON: f64 = 0.01;
/// Steps taken before a ray is declared a miss.
///
/// Low on purpose: grazing rays and far surfaces may come out as misses.
pub const MAX_STEPS: u32 = 10;

/// Sphere-traces `ray` through `field`, returning where it touched a surface.
pub(crate) fn trace<S: Sdf + ?Sized>(field: &S, ray: &Ray) -> Option<v64> {
    let mut pos = ray.origin();
    let mut steps = 0;
    loop {
        let d = field.distance_to(pos);
        if !d.is_finite() {
            return None;
        }
        pos += ray.dir() * d;
        if d < HIT_EPSILON {
            return Some(pos);
        }
        if steps > MAX_STEPS {
            return None;
        }
        steps += 1;
    }
}

#[cfg(test)]
use scene::Sphere;

#[test]
fn test_hits_sphere_ahead() {
    let ray = Ray::new(v64::ZERO, v64::Y).unwrap();
    for (d, r) in [(10.0, 2.0), (5.0, 0.5), (31.0, 2.0), (200.0, 1.0)] {
        let sphere = Sphere::new(v64(0.0, d, 0.0), r);
        let hit = trace(&sphere, &ray).unwrap();
        assert!((hit.y - (d - r)).abs() < HIT_EPSILON, "{hit:?}");
    }
}

#[test]
fn test_misses() {
    let sphere = Sphere::new(v64(0.0, 10.0, 0.0), 2.0);
    let away = Ray::new(v64::ZERO, -v64::Y).unwrap();
    assert_eq!(trace(&sphere, &away), None);
    let past = Ray::new(v64(2.5, 0.0, 0.0), v64::Y).unwrap();
    assert_eq!(trace(&sphere, &past), None);
}

#[test]
fn test_oblique_hit_converges() {
    let sphere = Sphere::new(v64(0.0, 10.0, 0.0), 2.0);
    let ray = Ray::from_to(v64::ZERO, v64(0.1, 1.0, 0.05)).unwrap();
    let hit = trace(&sphere, &ray).unwrap();
    assert!(sphere.distance_to(hit).abs() < HIT_EPSILON);
}

#[test]
fn test_empty_field_misses() {
    let screen = scene::Screen::new(1, 1).unwrap();
    let empty = scene::Scene::new(scene::Camera::new(v64::ZERO, v64::Y, screen));
    let ray = Ray::new(v64::ZERO, v64::Y).unwrap();
    assert_eq!(trace(&empty, &ray), None);
}
