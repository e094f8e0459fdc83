use std::str::FromStr;

use geom::v64;
use scene::{Camera, Object, Scene, Screen, Sphere, Torus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    /// A torus tumbling in front of the camera.
    Torus,
    /// Two spheres, the camera sweeping left and right.
    Spheres,
}

impl FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Kind> {
        match s {
            "torus" => Ok(Kind::Torus),
            "spheres" => Ok(Kind::Spheres),
            _ => anyhow::bail!("unknown scene `{s}`, expected `torus` or `spheres`"),
        }
    }
}

/// A scene plus the per-tick animation applied to it.
pub(crate) struct Demo {
    kind: Kind,
    scene: Scene,
    step: f64,
    angle: f64,
}

impl Demo {
    pub(crate) fn new(kind: Kind, screen: Screen, step: f64) -> anyhow::Result<Demo> {
        let camera = Camera::new(v64::ZERO, v64::Y, screen);
        let mut scene = Scene::new(camera);
        match kind {
            Kind::Torus => {
                scene.add_object(Torus::new(v64(0.0, 20.0, 0.0000001), v64::Y, 1.0, 4.0)?);
            }
            Kind::Spheres => {
                scene.add_object(Sphere::new(v64(0.0, 9.0, 0.0), 2.0));
                scene.add_object(Sphere::new(v64(4.0, 7.0, 0.0), 2.0));
            }
        }
        Ok(Demo { kind, scene, step, angle: 0.0 })
    }

    pub(crate) fn scene(&self) -> &Scene {
        &self.scene
    }

    pub(crate) fn update(&mut self) -> anyhow::Result<()> {
        self.angle = (self.angle + self.step) % 360.0;
        let (sin, cos) = self.angle.to_radians().sin_cos();
        match self.kind {
            Kind::Torus => {
                for object in self.scene.objects_mut() {
                    if let Object::Torus(torus) = object {
                        torus.set_axis(v64(cos, sin, 0.0))?;
                    }
                }
            }
            Kind::Spheres => self.scene.camera.direction = v64(0.3 * sin, 1.0, 0.0),
        }
        Ok(())
    }
}

#[test]
fn test_torus_turns_in_xy_plane() {
    let screen = Screen::new(8, 4).unwrap();
    let mut demo = Demo::new(Kind::Torus, screen, 90.0).unwrap();
    demo.update().unwrap();
    let Object::Torus(torus) = &demo.scene().objects()[0] else { panic!("expected a torus") };
    assert!(geom::distance(torus.axis(), v64::Y) < 1e-12);

    for _ in 0..4 {
        demo.update().unwrap();
    }
    assert_eq!(demo.angle, 90.0);
}

#[test]
fn test_parse_kind() {
    assert_eq!("torus".parse::<Kind>().unwrap(), Kind::Torus);
    assert_eq!("spheres".parse::<Kind>().unwrap(), Kind::Spheres);
    assert!("cube".parse::<Kind>().is_err());
}
