use std::{error, ops};

#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[allow(non_camel_case_types)]
pub struct v64 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[allow(non_camel_case_types)]
pub struct v2 {
    pub x: f64,
    pub y: f64,
}

/// cannot normalize a zero-length vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, displaydoc::Display)]
pub struct ZeroVectorError;

impl error::Error for ZeroVectorError {}

/// Origin plus a unit direction.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    origin: v64,
    dir: v64,
}

pub const fn v64(x: f64, y: f64, z: f64) -> v64 {
    v64 { x, y, z }
}

pub const fn v2(x: f64, y: f64) -> v2 {
    v2 { x, y }
}

impl v64 {
    pub const ZERO: v64 = v64(0.0, 0.0, 0.0);
    pub const X: v64 = v64(1.0, 0.0, 0.0);
    pub const Y: v64 = v64(0.0, 1.0, 0.0);
    pub const Z: v64 = v64(0.0, 0.0, 1.0);

    pub fn xyz(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
    pub fn to_unit(self) -> Result<v64, ZeroVectorError> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(ZeroVectorError);
        }
        Ok(self / norm)
    }
    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }
    pub fn norm_squared(self) -> f64 {
        dot(self, self)
    }
}

impl v2 {
    pub const ZERO: v2 = v2(0.0, 0.0);

    pub fn xy(self) -> [f64; 2] {
        [self.x, self.y]
    }
    pub fn to_unit(self) -> Result<v2, ZeroVectorError> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(ZeroVectorError);
        }
        Ok(self / norm)
    }
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

pub fn dot(lhs: v64, rhs: v64) -> f64 {
    lhs.x * rhs.x + lhs.y * rhs.y + lhs.z * rhs.z
}
pub fn cross(lhs: v64, rhs: v64) -> v64 {
    let [lx, ly, lz] = lhs.xyz();
    let [rx, ry, rz] = rhs.xyz();
    v64(ly * rz - lz * ry, -(lx * rz - lz * rx), lx * ry - ly * rx)
}
pub fn distance(lhs: v64, rhs: v64) -> f64 {
    (lhs - rhs).norm()
}

impl ops::Neg for v64 {
    type Output = v64;

    fn neg(self) -> v64 {
        v64(-self.x, -self.y, -self.z)
    }
}

impl ops::Add for v64 {
    type Output = v64;

    fn add(self, rhs: v64) -> v64 {
        v64(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::AddAssign for v64 {
    fn add_assign(&mut self, rhs: v64) {
        *self = *self + rhs
    }
}

impl ops::Sub for v64 {
    type Output = v64;

    fn sub(self, rhs: v64) -> v64 {
        v64(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::Div<f64> for v64 {
    type Output = v64;

    fn div(self, c: f64) -> v64 {
        let r = 1.0 / c;
        v64(self.x * r, self.y * r, self.z * r)
    }
}

impl ops::Mul<f64> for v64 {
    type Output = v64;

    fn mul(self, c: f64) -> v64 {
        v64(self.x * c, self.y * c, self.z * c)
    }
}

impl ops::Mul<v64> for f64 {
    type Output = v64;

    fn mul(self, v: v64) -> v64 {
        v * self
    }
}

impl ops::Add for v2 {
    type Output = v2;

    fn add(self, rhs: v2) -> v2 {
        v2(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::AddAssign for v2 {
    fn add_assign(&mut self, rhs: v2) {
        *self = *self + rhs
    }
}

impl ops::Sub for v2 {
    type Output = v2;

    fn sub(self, rhs: v2) -> v2 {
        v2(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Div<f64> for v2 {
    type Output = v2;

    fn div(self, c: f64) -> v2 {
        v2(self.x / c, self.y / c)
    }
}

impl ops::Mul<f64> for v2 {
    type Output = v2;

    fn mul(self, c: f64) -> v2 {
        v2(self.x * c, self.y * c)
    }
}

impl Ray {
    pub fn new(origin: v64, dir: v64) -> Result<Ray, ZeroVectorError> {
        let dir = dir.to_unit()?;
        Ok(Ray { origin, dir })
    }

    pub fn from_to(from: v64, to: v64) -> Result<Ray, ZeroVectorError> {
        Ray::new(from, to - from)
    }

    pub fn origin(&self) -> v64 {
        self.origin
    }

    pub fn dir(&self) -> v64 {
        self.dir
    }

    pub fn at(&self, dt: f64) -> v64 {
        self.origin + self.dir * dt
    }
}

#[cfg(test)]
fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn test_unit_vectors_have_unit_norm() {
    for v in [v64(3.0, 4.0, 0.0), v64(-1.0, 2.0, -7.5), v64(1e-6, 0.0, 0.0), v64(1e6, 1e6, 1e6)] {
        assert_close(v.to_unit().unwrap().norm(), 1.0);
    }
    assert_close(v2(0.3, -0.4).to_unit().unwrap().norm(), 1.0);
}

#[test]
fn test_zero_vector_does_not_normalize() {
    assert_eq!(v64::ZERO.to_unit(), Err(ZeroVectorError));
    assert_eq!(v2::ZERO.to_unit(), Err(ZeroVectorError));
    assert!(Ray::from_to(v64(1.0, 2.0, 3.0), v64(1.0, 2.0, 3.0)).is_err());
}

#[test]
fn test_products_and_distance() {
    let a = v64(1.0, 2.0, 3.0);
    let b = v64(-2.0, 0.5, 4.0);
    assert_close(dot(a, b), -2.0 + 1.0 + 12.0);
    let c = cross(v64::X, v64::Y);
    assert_eq!(c, v64::Z);
    assert_close(distance(a, b), (a - b).norm());
    assert_close(distance(v64(0.0, 0.0, 0.0), v64(0.0, 3.0, 4.0)), 5.0);

    let mut acc = v64::ZERO;
    acc += a;
    acc += a;
    assert_eq!(acc, 2.0 * a);
}

#[test]
fn test_ray_from_points() {
    let ray = Ray::from_to(v64(1.0, 1.0, 1.0), v64(1.0, 5.0, 1.0)).unwrap();
    assert_eq!(ray.dir(), v64::Y);
    assert_eq!(ray.at(2.0), v64(1.0, 3.0, 1.0));
}
