use std::{
    num::NonZeroUsize,
    sync::{mpsc, Condvar, Mutex},
    thread::JoinHandle,
};

/// A fixed set of worker threads.
///
/// Create it once, hand `|f| threads.in_parallel(f)` to every
/// [`Renderer`](crate::Renderer) that needs it, and drop it on exit: dropping
/// joins the workers.
pub struct Threads {
    senders: Vec<mpsc::Sender<Job<'static>>>,
    handles: Vec<JoinHandle<()>>,
}

impl Threads {
    pub fn new(n_threads: NonZeroUsize) -> Threads {
        let n_threads = n_threads.get();
        let mut res = Threads {
            senders: Vec::with_capacity(n_threads),
            handles: Vec::with_capacity(n_threads),
        };
        for _ in 0..n_threads {
            let (sender, receiver) = mpsc::channel::<Job>();
            let handle = std::thread::spawn(move || {
                for job in receiver {
                    (job.f)()
                }
            });
            res.senders.push(sender);
            res.handles.push(handle)
        }
        res
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Runs `f` once on every worker and blocks until all of them return.
    pub fn in_parallel<'a>(&self, f: &'a (dyn Fn() + Sync)) {
        let job_count = JobCount::new();
        for (worker, s) in self.senders.iter().enumerate() {
            let job = Job { f, _g: job_count.inc() };
            // A dead worker hands the job back, dropping it releases its guard.
            if s.send(unsafe { job.erase_lifetime() }).is_err() {
                tracing::warn!(worker, "worker thread is gone, job dropped");
            }
        }
    }
}

impl Drop for Threads {
    fn drop(&mut self) {
        self.senders.clear();
        for h in self.handles.drain(..) {
            let _ = h.join();
        }
    }
}

struct Job<'a> {
    f: &'a (dyn Fn() + Sync),
    _g: JobGuard<'a>,
}

struct JobCount {
    mux: Mutex<usize>,
    cv: Condvar,
}

struct JobGuard<'a> {
    count: &'a JobCount,
}

impl<'a> Job<'a> {
    unsafe fn erase_lifetime(self) -> Job<'static> {
        std::mem::transmute(self)
    }
}

impl JobCount {
    fn new() -> JobCount {
        JobCount { mux: Mutex::new(0), cv: Condvar::new() }
    }
    fn inc(&self) -> JobGuard<'_> {
        *self.mux.lock().unwrap() += 1;
        JobGuard { count: self }
    }
    fn dec(&self) {
        let mut g = self.mux.lock().unwrap();
        *g -= 1;
        if *g == 0 {
            self.cv.notify_all()
        }
    }
}

impl Drop for JobCount {
    fn drop(&mut self) {
        let mut g = self.mux.lock().unwrap();
        while *g > 0 {
            g = self.cv.wait(g).unwrap();
        }
    }
}

impl<'a> Drop for JobGuard<'a> {
    fn drop(&mut self) {
        self.count.dec()
    }
}

#[test]
fn test_runs_once_per_worker_and_waits() {
    use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};

    let threads = Threads::new(NonZeroUsize::new(3).unwrap());
    assert_eq!(threads.len(), 3);
    let calls = AtomicUsize::new(0);
    for round in 1..=4 {
        threads.in_parallel(&|| {
            calls.fetch_add(1, SeqCst);
        });
        assert_eq!(calls.load(SeqCst), 3 * round);
    }
}
