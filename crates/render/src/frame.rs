use std::{
    fmt,
    ops::{self, Range},
    slice,
    sync::{
        atomic::{AtomicUsize, Ordering::SeqCst},
        Mutex, OnceLock,
    },
};

pub type Idx = [u32; 2];

/// Row-major grid of characters, one per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    dim: [u32; 2],
    buf: Vec<char>,
}

impl Frame {
    pub(crate) fn new(dim @ [dx, dy]: Idx, fill: char) -> Frame {
        Frame { dim, buf: vec![fill; dx as usize * dy as usize] }
    }
    pub fn dim(&self) -> Idx {
        self.dim
    }
    pub fn width(&self) -> u32 {
        self.dim[0]
    }
    pub fn height(&self) -> u32 {
        self.dim[1]
    }
    pub fn buf(&self) -> &[char] {
        &self.buf
    }
    pub fn rows(&self) -> slice::Chunks<'_, char> {
        self.buf.chunks(self.dim[0].max(1) as usize)
    }
    pub fn row(&self, y: u32) -> &[char] {
        let w = self.dim[0] as usize;
        let start = y as usize * w;
        &self.buf[start..start + w]
    }
    /// Splits the frame into disjoint row bands for concurrent filling.
    pub(crate) fn partition<E>(&mut self, bands: &[Range<u32>]) -> Partition<'_, E> {
        let w = self.dim[0] as usize;
        let mut rest = &mut self.buf[..];
        let mut slots = Vec::with_capacity(bands.len());
        for (index, rows) in bands.iter().enumerate() {
            let len = rows.len() * w;
            let (buf, tail) = rest.split_at_mut(len);
            rest = tail;
            slots.push(Mutex::new(Some(Band { index, rows: rows.clone(), buf })));
        }
        assert!(rest.is_empty(), "bands do not cover the frame");
        let outcomes = bands.iter().map(|_| OnceLock::new()).collect();
        Partition { next_band: AtomicUsize::new(0), slots, outcomes }
    }
    fn linear(&self, idx: Idx) -> Option<usize> {
        if !(idx[0] < self.dim[0] && idx[1] < self.dim[1]) {
            return None;
        }
        Some(idx[0] as usize + idx[1] as usize * self.dim[0] as usize)
    }
}

impl ops::Index<Idx> for Frame {
    type Output = char;

    fn index(&self, index: Idx) -> &char {
        let l = self.linear(index).unwrap();
        &self.buf[l]
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &c in row {
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, h] = self.dim;
        write!(f, "Frame {w}x{h}\n{self}")
    }
}

/// Rows `[rows.start, rows.end)` of a frame, owned by one worker.
pub(crate) struct Band<'a> {
    pub(crate) index: usize,
    pub(crate) rows: Range<u32>,
    pub(crate) buf: &'a mut [char],
}

pub(crate) struct Partition<'a, E> {
    next_band: AtomicUsize,
    slots: Vec<Mutex<Option<Band<'a>>>>,
    outcomes: Vec<OnceLock<Result<(), E>>>,
}

impl<'a, E> Partition<'a, E> {
    pub(crate) fn next_band(&self) -> Option<Band<'a>> {
        let i = self.next_band.fetch_add(1, SeqCst);
        let slot = self.slots.get(i)?;
        let band = slot.lock().unwrap().take();
        band
    }

    pub(crate) fn complete(&self, index: usize, outcome: Result<(), E>) {
        let _ = self.outcomes[index].set(outcome);
    }

    /// Outcome of every band in band order, `None` for bands nobody completed.
    pub(crate) fn finish(self) -> impl Iterator<Item = Option<Result<(), E>>> {
        self.outcomes.into_iter().map(OnceLock::into_inner)
    }
}

#[test]
fn test_partition_hands_out_disjoint_bands() {
    let mut frame = Frame::new([3, 5], ' ');
    let partition = frame.partition::<()>(&[0..1, 1..1, 1..5]);
    let mut seen = Vec::new();
    while let Some(band) = partition.next_band() {
        assert_eq!(band.buf.len(), band.rows.len() * 3);
        band.buf.fill(char::from(b'a' + band.index as u8));
        seen.push(band.index);
        if band.index != 1 {
            partition.complete(band.index, Ok(()));
        }
    }
    assert_eq!(seen, [0, 1, 2]);
    let outcomes: Vec<_> = partition.finish().collect();
    assert_eq!(outcomes, [Some(Ok(())), None, Some(Ok(()))]);

    assert_eq!(frame.row(0), ['a'; 3]);
    assert_eq!(frame.row(4), ['c'; 3]);
    assert_eq!(frame[[2, 3]], 'c');
    assert_eq!(frame.to_string(), "aaa\nccc\nccc\nccc\nccc\n");
}
