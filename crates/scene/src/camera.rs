use std::error;

use geom::{v2, v64, Ray, ZeroVectorError};

/// Pixel dimensions of the virtual screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    width: u32,
    height: u32,
}

/// screen dimensions must be non-zero, got {width}x{height}
#[derive(Debug, displaydoc::Display)]
pub struct ScreenError {
    width: u32,
    height: u32,
}

impl error::Error for ScreenError {}

/// A pinhole camera looking through a view plane placed `view_distance`
/// in front of it.
///
/// The screen basis is fixed to the world axes: columns run along +x and rows
/// along -z whatever the camera looks at, only `direction` moves the plane.
#[derive(Clone, Debug)]
pub struct Camera {
    pub direction: v64,
    position: v64,
    screen: Screen,
    physical_size: v2,
    view_distance: f64,
}

const LEFT: v64 = v64(-1.0, 0.0, 0.0);
const UP: v64 = v64(0.0, 0.0, 1.0);

impl Screen {
    pub fn new(width: u32, height: u32) -> Result<Screen, ScreenError> {
        if width == 0 || height == 0 {
            return Err(ScreenError { width, height });
        }
        Ok(Screen { width, height })
    }
    pub fn dim(&self) -> [u32; 2] {
        [self.width, self.height]
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Camera {
    pub const DEFAULT_PHYSICAL_SIZE: v2 = v2(1.0, 9.0 / 16.0);
    pub const DEFAULT_VIEW_DISTANCE: f64 = 1.0;

    pub fn new(position: v64, direction: v64, screen: Screen) -> Camera {
        Camera {
            direction,
            position,
            screen,
            physical_size: Camera::DEFAULT_PHYSICAL_SIZE,
            view_distance: Camera::DEFAULT_VIEW_DISTANCE,
        }
    }

    pub fn with_physical_size(mut self, size: v2) -> Camera {
        self.physical_size = size;
        self
    }

    pub fn with_view_distance(mut self, distance: f64) -> Camera {
        self.view_distance = distance;
        self
    }

    pub fn position(&self) -> v64 {
        self.position
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn physical_size(&self) -> v2 {
        self.physical_size
    }

    pub fn view_distance(&self) -> f64 {
        self.view_distance
    }

    /// World-space point on the view plane under pixel `[col, row]`.
    pub fn project(&self, col: u32, row: u32) -> Result<v64, ZeroVectorError> {
        let [w, h] = self.screen.dim().map(f64::from);
        let dx = 0.5 - f64::from(col) / w;
        let dy = 0.5 - f64::from(row) / h;

        let mut point = self.position + self.direction.to_unit()? * self.view_distance;
        point += LEFT * (self.physical_size.x * dx);
        point += UP * (self.physical_size.y * dy);
        Ok(point)
    }

    pub fn cast(&self, col: u32, row: u32) -> Result<Ray, ZeroVectorError> {
        let to = self.project(col, row)?;
        Ray::from_to(self.position, to)
    }
}

#[cfg(test)]
fn assert_close(actual: v64, expected: v64) {
    assert!(geom::distance(actual, expected) < 1e-9, "{actual:?} != {expected:?}");
}

#[test]
fn test_project_sweeps_view_plane() {
    let screen = Screen::new(10, 8).unwrap();
    let camera = Camera::new(v64(1.0, 0.0, 0.0), v64(0.0, 5.0, 0.0), screen)
        .with_physical_size(v2(2.0, 1.0))
        .with_view_distance(3.0);

    assert_close(camera.project(5, 4).unwrap(), v64(1.0, 3.0, 0.0));
    assert_close(camera.project(0, 0).unwrap(), v64(0.0, 3.0, 0.5));
    assert_close(camera.project(10, 8).unwrap(), v64(2.0, 3.0, -0.5));
    assert_close(camera.project(9, 0).unwrap(), v64(1.8, 3.0, 0.5));
}

#[test]
fn test_basis_ignores_look_direction() {
    let screen = Screen::new(4, 4).unwrap();
    let camera = Camera::new(v64::ZERO, v64(1.0, 1.0, 0.0), screen);
    let center = v64(1.0, 1.0, 0.0) / 2f64.sqrt();
    assert_close(camera.project(2, 2).unwrap(), center);
    assert_close(camera.project(0, 2).unwrap(), center + v64(-0.5, 0.0, 0.0));
}

#[test]
fn test_degenerate_camera() {
    let screen = Screen::new(4, 4).unwrap();
    let camera = Camera::new(v64::ZERO, v64::ZERO, screen);
    assert!(camera.project(1, 1).is_err());
    assert!(camera.cast(1, 1).is_err());
    assert!(Screen::new(0, 4).is_err());
}
