use geom::{cross, distance, dot, v64, ZeroVectorError};

/// A surface described by its distance field.
///
/// Implementations must be 1-Lipschitz: advancing a point by the returned
/// distance never crosses the surface.
pub trait Sdf {
    fn distance_to(&self, point: v64) -> f64;
}

#[derive(Clone, Debug)]
pub enum Object {
    Sphere(Sphere),
    Torus(Torus),
}

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: v64,
    pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct Torus {
    pub center: v64,
    pub minor_radius: f64,
    pub major_radius: f64,
    axis: v64,
    // Any unit vector in the ring plane, used when the point lies on the axis.
    radial: v64,
}

impl Sdf for Object {
    fn distance_to(&self, point: v64) -> f64 {
        match self {
            Object::Sphere(it) => it.distance_to(point),
            Object::Torus(it) => it.distance_to(point),
        }
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Object {
        Object::Sphere(sphere)
    }
}

impl From<Torus> for Object {
    fn from(torus: Torus) -> Object {
        Object::Torus(torus)
    }
}

impl Sphere {
    pub fn new(center: v64, radius: f64) -> Sphere {
        Sphere { center, radius }
    }
}

impl Sdf for Sphere {
    fn distance_to(&self, point: v64) -> f64 {
        distance(point, self.center) - self.radius
    }
}

impl Torus {
    pub fn new(
        center: v64,
        axis: v64,
        minor_radius: f64,
        major_radius: f64,
    ) -> Result<Torus, ZeroVectorError> {
        let mut res = Torus { center, minor_radius, major_radius, axis: v64::Z, radial: v64::X };
        res.set_axis(axis)?;
        Ok(res)
    }

    pub fn axis(&self) -> v64 {
        self.axis
    }

    pub fn set_axis(&mut self, axis: v64) -> Result<(), ZeroVectorError> {
        self.axis = axis.to_unit()?;
        self.radial = orthogonal(self.axis);
        Ok(())
    }
}

impl Sdf for Torus {
    fn distance_to(&self, point: v64) -> f64 {
        let offset = point - self.center;
        let along = self.axis * dot(offset, self.axis);
        let radial = offset - along;
        // On the axis every ring point is equally near; rounding noise must not pick one.
        let radial = if radial.norm() > 1e-12 * offset.norm() {
            radial / radial.norm()
        } else {
            self.radial
        };
        let ring = self.center + radial * self.major_radius;
        distance(point, ring) - self.minor_radius
    }
}

fn orthogonal(unit: v64) -> v64 {
    let [x, y, z] = unit.xyz().map(f64::abs);
    let least_aligned = if x <= y && x <= z {
        v64::X
    } else if y <= z {
        v64::Y
    } else {
        v64::Z
    };
    let res = cross(unit, least_aligned);
    res / res.norm()
}

#[cfg(test)]
fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn test_sphere_distance() {
    let r = 1.5;
    let sphere = Sphere::new(v64::ZERO, r);
    for p in [v64(3.0, 4.0, 0.0), v64(0.1, 0.0, 0.0), v64(-2.0, 7.0, 1.0), v64::ZERO] {
        assert_close(sphere.distance_to(p), p.norm() - r);
    }
    assert!(sphere.distance_to(v64::ZERO) < 0.0);
}

#[test]
fn test_torus_surface() {
    let center = v64(0.0, 20.0, 0.0);
    let torus = Torus::new(center, v64(0.0, 3.0, 0.0), 1.0, 4.0).unwrap();
    assert_eq!(torus.axis(), v64::Y);

    // Ring points offset by the minor radius, outwards, inwards and along the axis.
    for p in [v64(5.0, 20.0, 0.0), v64(3.0, 20.0, 0.0), v64(0.0, 21.0, 4.0), v64(-4.0, 19.0, 0.0)] {
        assert_close(torus.distance_to(p), 0.0);
    }
    // Inside the tube.
    assert_close(torus.distance_to(v64(4.0, 20.0, 0.0)), -1.0);
    assert_close(torus.distance_to(v64(0.0, 23.0, 0.0)), 5.0 - 1.0);
}

#[test]
fn test_torus_on_axis() {
    for axis in [v64::X, v64::Y, v64::Z, v64(1.0, 1.0, 1.0), v64(0.0, -2.0, 0.5)] {
        let torus = Torus::new(v64(1.0, 2.0, 3.0), axis, 1.0, 4.0).unwrap();
        let d = torus.distance_to(v64(1.0, 2.0, 3.0));
        assert_close(d, 3.0);
        let d = torus.distance_to(v64(1.0, 2.0, 3.0) + torus.axis() * 3.0);
        assert_close(d, 4.0);
    }
}

#[test]
fn test_torus_rejects_zero_axis() {
    assert!(Torus::new(v64::ZERO, v64::ZERO, 1.0, 4.0).is_err());
    let mut torus = Torus::new(v64::ZERO, v64::Z, 1.0, 4.0).unwrap();
    assert!(torus.set_axis(v64::ZERO).is_err());
}
