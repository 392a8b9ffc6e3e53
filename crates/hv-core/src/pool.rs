//! Pools de buffers réutilisables.
//!
//! Pixel buffers are grouped in size classes keyed by canonical resolutions.
//! A request takes a buffer from the smallest class that fits and narrows its
//! logical bounds; the stride of the class is kept. Requests larger than every
//! class get a fresh exact-size buffer that is never pooled.
//!
//! Freelists are bounded `flume` channels: `acquire`/`release` are safe from
//! any thread and two frames never receive the same buffer.

use flume::{Receiver, Sender};

use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer};

/// Résolutions canoniques des classes de taille, de la plus petite à la plus grande.
pub const RESOLUTIONS: [(u32, u32); 8] = [
    (141, 58), // terminal par défaut
    (160, 120),
    (320, 240),
    (640, 480),
    (1280, 720),
    (1920, 1080),
    (2560, 1440),
    (3840, 2160),
];

/// Free buffers kept per size class.
const FREE_PER_CLASS: usize = 4;

/// Output buffers larger than this are dropped instead of pooled.
const MAX_POOLED_BYTES: usize = 8 * 1024 * 1024;

/// Initial capacity of a fresh output buffer.
const DEFAULT_BYTES: usize = 16 * 1024;

struct SizeClass {
    width: u32,
    height: u32,
    tx: Sender<PixelBuffer>,
    rx: Receiver<PixelBuffer>,
}

impl SizeClass {
    fn fits(&self, width: u32, height: u32) -> bool {
        self.width >= width && self.height >= height
    }

    fn owns(&self, buf: &PixelBuffer) -> bool {
        buf.stride() == self.width as usize * BYTES_PER_PIXEL
            && buf.capacity_rows() == self.height as usize
    }
}

/// Pool de `PixelBuffer` par classe de résolution.
///
/// # Example
/// ```
/// use hv_core::pool::PixelPool;
/// let pool = PixelPool::new();
/// let buf = pool.acquire(100, 50);
/// assert_eq!((buf.width(), buf.height()), (100, 50));
/// assert_eq!(buf.stride(), 141 * 4);
/// pool.release(buf);
/// assert_eq!(pool.available(), 1);
/// ```
pub struct PixelPool {
    classes: Vec<SizeClass>,
}

impl PixelPool {
    /// Pool over [`RESOLUTIONS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_classes(&RESOLUTIONS, FREE_PER_CLASS)
    }

    /// Pool over custom classes, sorted smallest first.
    #[must_use]
    pub fn with_classes(resolutions: &[(u32, u32)], free_per_class: usize) -> Self {
        let classes = resolutions
            .iter()
            .map(|&(width, height)| {
                let (tx, rx) = flume::bounded(free_per_class.max(1));
                SizeClass {
                    width,
                    height,
                    tx,
                    rx,
                }
            })
            .collect();
        Self { classes }
    }

    /// Take a zeroed buffer with the given logical bounds.
    #[must_use]
    pub fn acquire(&self, width: u32, height: u32) -> PixelBuffer {
        let Some(class) = self.classes.iter().find(|c| c.fits(width, height)) else {
            log::trace!("pool: {width}×{height} hors classes, allocation directe");
            return PixelBuffer::new(width, height);
        };
        let mut buf = class
            .rx
            .try_recv()
            .unwrap_or_else(|_| PixelBuffer::new(class.width, class.height));
        if buf.reshape(width, height) {
            buf
        } else {
            PixelBuffer::new(width, height)
        }
    }

    /// Zero `buf` and hand it back to its size class.
    ///
    /// Buffers that match no class, or whose class is full, are dropped.
    pub fn release(&self, mut buf: PixelBuffer) {
        buf.clear();
        let Some(class) = self.classes.iter().find(|c| c.owns(&buf)) else {
            log::trace!("pool: buffer {}×{} hors classes, libéré", buf.width(), buf.height());
            return;
        };
        if class.tx.try_send(buf).is_err() {
            log::trace!("pool: classe {}×{} pleine", class.width, class.height);
        }
    }

    /// Free buffers currently pooled, all classes together.
    #[must_use]
    pub fn available(&self) -> usize {
        self.classes.iter().map(|c| c.rx.len()).sum()
    }
}

impl Default for PixelPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool de buffers de sortie (`Vec<u8>`).
///
/// # Example
/// ```
/// use hv_core::pool::BytePool;
/// let pool = BytePool::new();
/// let mut out = pool.acquire();
/// out.extend_from_slice(b"\x1b[H");
/// pool.release(out);
/// assert!(pool.acquire().is_empty());
/// ```
pub struct BytePool {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl BytePool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::bounded(FREE_PER_CLASS);
        Self { tx, rx }
    }

    /// Take an empty output buffer.
    #[must_use]
    pub fn acquire(&self) -> Vec<u8> {
        self.rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(DEFAULT_BYTES))
    }

    /// Clear `buf` and pool it, unless it grew too large.
    pub fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_POOLED_BYTES {
            return;
        }
        buf.clear();
        let _ = self.tx.try_send(buf);
    }
}

impl Default for BytePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use std::sync::Arc;

    #[test]
    fn released_buffers_come_back_zeroed() {
        let pool = PixelPool::new();
        let mut buf = pool.acquire(10, 10);
        buf.fill(Pixel::rgb(200, 100, 50));
        pool.release(buf);

        let again = pool.acquire(20, 4);
        assert_eq!(again.stride(), 141 * 4);
        assert!(again.data().iter().all(|&b| b == 0));
        assert_eq!((again.width(), again.height()), (20, 4));
    }

    #[test]
    fn smallest_fitting_class_is_used() {
        let pool = PixelPool::new();
        assert_eq!(pool.acquire(150, 10).stride(), 160 * 4);
        assert_eq!(pool.acquire(10, 100).stride(), 160 * 4);
        assert_eq!(pool.acquire(1920, 1080).stride(), 1920 * 4);
    }

    #[test]
    fn oversized_requests_are_not_pooled() {
        let pool = PixelPool::new();
        let buf = pool.acquire(4000, 10);
        assert_eq!(buf.stride(), 4000 * 4);
        pool.release(buf);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn full_class_drops_extra_buffers() {
        let pool = PixelPool::with_classes(&[(4, 4)], 2);
        let bufs: Vec<_> = (0..3).map(|_| pool.acquire(2, 2)).collect();
        for b in bufs {
            pool.release(b);
        }
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn concurrent_acquire_release() {
        let pool = Arc::new(PixelPool::with_classes(&[(8, 8)], 4));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let mut buf = pool.acquire(8, 8);
                        assert!(buf.data().iter().all(|&b| b == 0));
                        buf.fill(Pixel::rgb(i, i, i));
                        pool.release(buf);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(pool.available() <= 4);
    }

    #[test]
    fn byte_pool_drops_huge_buffers() {
        let pool = BytePool::new();
        pool.release(Vec::with_capacity(MAX_POOLED_BYTES + 1));
        assert!(pool.acquire().capacity() < MAX_POOLED_BYTES);
        let mut small = pool.acquire();
        small.push(1);
        pool.release(small);
        assert!(pool.acquire().is_empty());
    }
}
