use std::num::NonZeroUsize;

use geom::v64;
use scene::{Camera, Scene, Screen, Sphere, Torus};

use crate::{bands, Palette, Renderer, Threads, WORKER_COUNT};

fn sphere_scene(width: u32, height: u32) -> Scene {
    let screen = Screen::new(width, height).unwrap();
    let mut scene = Scene::new(Camera::new(v64::ZERO, v64::Y, screen));
    scene.add_object(Sphere::new(v64(0.0, 10.0, 0.0), 2.0));
    scene
}

#[test]
fn test_bands_cover_every_row_once() {
    let parts = bands(63, WORKER_COUNT);
    assert_eq!(parts, [0..15, 15..30, 30..45, 45..63]);

    for height in [1, 2, 3, 4, 5, 63, 64, 100, 1001] {
        let parts = bands(height, WORKER_COUNT);
        assert_eq!(parts.len(), WORKER_COUNT as usize);
        let rows: Vec<u32> = parts.into_iter().flatten().collect();
        assert_eq!(rows, (0..height).collect::<Vec<_>>());
    }
}

#[test]
fn test_sphere_frame() {
    let sequential = |f: &(dyn Fn() + Sync)| f();
    let renderer = Renderer::new(&sequential);
    let frame = renderer.render(&sphere_scene(10, 10)).unwrap();
    assert_eq!(frame.dim(), [10, 10]);

    // Straight ahead the surface is 8 units away.
    assert_eq!(frame[[5, 5]], renderer.palette().glyph(8.0));
    for idx in [[4, 5], [5, 4], [4, 4], [6, 6]] {
        assert_ne!(frame[idx], ' ', "{idx:?}\n{frame}");
    }
    for idx in [[0, 0], [9, 0], [0, 9], [9, 9]] {
        assert_eq!(frame[idx], ' ', "{idx:?}\n{frame}");
    }
}

#[test]
fn test_remainder_rows_are_rendered() {
    // The camera sits inside the sphere, so every ray hits at distance 5.
    let screen = Screen::new(7, 63).unwrap();
    let mut scene = Scene::new(Camera::new(v64::ZERO, v64::Y, screen));
    scene.add_object(Sphere::new(v64::ZERO, 5.0));

    let palette = Palette::new("#*", '.').unwrap();
    let sequential = |f: &(dyn Fn() + Sync)| f();
    let renderer = Renderer::new(&sequential).with_palette(palette);
    let frame = renderer.render(&scene).unwrap();
    assert_eq!(frame.rows().count(), 63);
    assert!(frame.buf().iter().all(|&c| c == '#'), "{frame}");
}

#[test]
fn test_thread_pool_matches_sequential() {
    let sequential = |f: &(dyn Fn() + Sync)| f();
    let expected = Renderer::new(&sequential).render(&sphere_scene(31, 17)).unwrap();

    for n in [1, 2, 4, 7] {
        let threads = Threads::new(NonZeroUsize::new(n).unwrap());
        let in_parallel = |f: &(dyn Fn() + Sync)| threads.in_parallel(f);
        let renderer = Renderer::new(&in_parallel);
        let scene = sphere_scene(31, 17);
        let first = renderer.render(&scene).unwrap();
        let second = renderer.render(&scene).unwrap();
        assert_eq!(first, expected, "{n} threads");
        assert_eq!(first, second);
    }
}

#[test]
fn test_torus_ring() {
    let threads = Threads::new(NonZeroUsize::new(WORKER_COUNT as usize).unwrap());
    let in_parallel = |f: &(dyn Fn() + Sync)| threads.in_parallel(f);
    let renderer = Renderer::new(&in_parallel);

    let screen = Screen::new(232, 63).unwrap();
    let mut scene = Scene::new(Camera::new(v64::ZERO, v64::Y, screen));
    scene.add_object(Torus::new(v64(0.0, 20.0, 1e-7), v64::Y, 1.0, 4.0).unwrap());
    let frame = renderer.render(&scene).unwrap();

    // Looking through the hole.
    assert_eq!(frame[[116, 31]], ' ');
    assert_ne!(frame[[162, 31]], ' ');
    assert_ne!(frame[[70, 31]], ' ');
}

#[test]
fn test_degenerate_camera_fails() {
    let mut scene = sphere_scene(4, 4);
    scene.camera.direction = v64::ZERO;
    let sequential = |f: &(dyn Fn() + Sync)| f();
    let err = Renderer::new(&sequential).render(&scene).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot cast a ray through pixel [0, 0]: cannot normalize a zero-length vector"
    );
}

#[test]
fn test_unrun_band_fails() {
    let idle = |_: &(dyn Fn() + Sync)| ();
    let err = Renderer::new(&idle).render(&sphere_scene(4, 4)).unwrap_err();
    assert_eq!(err.to_string(), "band 0 was not rendered by any worker");
}
