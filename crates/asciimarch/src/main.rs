mod demo;

use std::{
    io::{self, Write},
    num::{NonZeroU32, NonZeroUsize},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use render::{Renderer, Threads, WORKER_COUNT};
use scene::Screen;

/// Renders an animated distance-field scene as text on stdout.
#[derive(argh::FromArgs)]
struct Args {
    /// worker threads, defaults to one per band
    #[argh(option, short = 'j', default = "default_jobs()")]
    jobs: NonZeroUsize,

    /// width of the screen, in characters
    #[argh(option, default = "232")]
    width: u32,

    /// height of the screen, in characters
    #[argh(option, default = "63")]
    height: u32,

    /// number of frames to render
    #[argh(option, default = "36")]
    frames: u64,

    /// degrees the scene turns per frame
    #[argh(option, default = "10.0")]
    step: f64,

    /// frames per second, unlimited if not set
    #[argh(option)]
    fps: Option<NonZeroU32>,

    /// scene to animate, `torus` or `spheres`
    #[argh(option, default = "demo::Kind::Torus")]
    scene: demo::Kind,
}

fn default_jobs() -> NonZeroUsize {
    NonZeroUsize::new(WORKER_COUNT as usize).unwrap()
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    tracing::info!(
        jobs = args.jobs.get(),
        width = args.width,
        height = args.height,
        frames = args.frames,
        scene = ?args.scene,
        "starting"
    );

    let screen = Screen::new(args.width, args.height)?;
    let mut demo = demo::Demo::new(args.scene, screen, args.step)?;

    let threads = Threads::new(args.jobs);
    let in_parallel = |f: &(dyn Fn() + Sync)| threads.in_parallel(f);
    let renderer = Renderer::new(&in_parallel);

    let pace = args.fps.map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps.get())));
    let mut stdout = io::stdout().lock();
    for tick in 0..args.frames {
        let start = Instant::now();
        demo.update()?;
        let frame =
            renderer.render(demo.scene()).with_context(|| format!("rendering frame {tick}"))?;
        write!(stdout, "{frame}").context("writing output")?;
        stdout.flush().context("writing output")?;
        tracing::debug!(tick, elapsed = ?start.elapsed(), "frame written");

        if let Some(rest) = pace.and_then(|it| it.checked_sub(start.elapsed())) {
            thread::sleep(rest);
        }
    }
    Ok(())
}
