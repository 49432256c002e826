// Copyright @yucwang 2026

use crate::core::accumulator::PixelAccumulator;
use crate::core::error::RenderError;
use crate::core::rng::LcgRng;
use crate::renderers::barrier::{row_barrier, RowBarrier, WorkerGate};
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// State owned by one worker for the whole session.
#[derive(Debug, Clone)]
pub struct ThreadContext {
    pub index: usize,
    pub rng: LcgRng,
    pub samples_per_pixel: u32,
}

impl ThreadContext {
    pub fn new(index: usize, seed: u64, samples_per_pixel: u32) -> Self {
        Self { index, rng: LcgRng::for_worker(seed, index), samples_per_pixel }
    }
}

/// Per-pixel work run by the scheduler. `out` is the pixel's slot in the
/// row buffer; `accumulator` persists across passes.
pub trait PixelKernel: Send + Sync + 'static {
    fn render_pixel(&self,
                    ctx: &mut ThreadContext,
                    x: usize,
                    y: usize,
                    accumulator: &mut PixelAccumulator,
                    out: &mut [u8]);
}

/// Proof that a column was handed out by the cursor for the current row.
#[derive(Debug)]
pub struct ColumnClaim {
    column: usize,
}

impl ColumnClaim {
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Next unclaimed column of the row in flight, counting down to zero.
#[derive(Debug)]
pub struct RowCursor {
    next: AtomicIsize,
}

impl RowCursor {
    pub fn new() -> Self {
        Self { next: AtomicIsize::new(-1) }
    }

    pub fn reset(&self, width: usize) {
        self.next.store(width as isize - 1, Ordering::Relaxed);
    }

    pub fn claim(&self) -> Option<ColumnClaim> {
        let column = self.next.fetch_sub(1, Ordering::Relaxed);
        if column < 0 {
            None
        } else {
            Some(ColumnClaim { column: column as usize })
        }
    }
}

impl Default for RowCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-size buffer written concurrently through disjoint ranges.
struct SharedCells<T> {
    cells: Box<[UnsafeCell<T>]>,
}

// Access is coordinated by the row cursor and the row barrier.
unsafe impl<T: Send> Sync for SharedCells<T> {}

impl<T: Clone> SharedCells<T> {
    fn new(len: usize, value: T) -> Self {
        Self { cells: (0..len).map(|_| UnsafeCell::new(value.clone())).collect() }
    }
}

impl<T> SharedCells<T> {
    fn len(&self) -> usize {
        self.cells.len()
    }

    /// # Safety
    /// No other reference into `start..start + len` may be live.
    #[allow(clippy::mut_from_ref)]
    unsafe fn slice_mut(&self, start: usize, len: usize) -> &mut [T] {
        assert!(start + len <= self.cells.len());
        let ptr = UnsafeCell::raw_get(self.cells.as_ptr().add(start));
        std::slice::from_raw_parts_mut(ptr, len)
    }

    /// # Safety
    /// No mutable reference into the buffer may be live.
    unsafe fn as_slice(&self) -> &[T] {
        let ptr = UnsafeCell::raw_get(self.cells.as_ptr()) as *const T;
        std::slice::from_raw_parts(ptr, self.cells.len())
    }
}

struct RowState<K> {
    kernel: K,
    width: usize,
    stride: usize,
    cursor: RowCursor,
    row: SharedCells<u8>,
    accumulators: SharedCells<PixelAccumulator>,
}

impl<K: PixelKernel> RowState<K> {
    /// Claims columns of row `y` until the cursor runs out.
    fn drain(&self, y: usize, ctx: &mut ThreadContext) {
        while let Some(claim) = self.cursor.claim() {
            let x = claim.column();
            // SAFETY: the cursor yields each column once per row and the
            // barrier keeps a single row in flight, so no other thread holds
            // this pixel's accumulator or byte range.
            let (accumulator, out) = unsafe {
                (&mut self.accumulators.slice_mut(y * self.width + x, 1)[0],
                 self.row.slice_mut(x * self.stride, self.stride))
            };
            self.kernel.render_pixel(ctx, x, y, accumulator, out);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub width: usize,
    pub height: usize,
    /// Bytes per pixel in the row buffer.
    pub stride: usize,
    /// Total workers, the calling thread included.
    pub workers: usize,
    pub samples_per_pixel: u32,
    pub seed: u64,
}

/// Renders one row at a time across a fixed pool of threads. The calling
/// thread works the row too, so a single worker spawns no threads at all.
pub struct TileScheduler<K: PixelKernel> {
    state: Arc<RowState<K>>,
    barrier: RowBarrier,
    local: ThreadContext,
    handles: Vec<JoinHandle<()>>,
    height: usize,
    poisoned: bool,
}

impl<K: PixelKernel> TileScheduler<K> {
    pub fn new(kernel: K, config: &SchedulerConfig) -> Result<Self, RenderError> {
        if config.workers == 0 {
            return Err(RenderError::InvalidSettings(String::from("scheduler needs at least one worker")));
        }
        let state = Arc::new(RowState {
            kernel,
            width: config.width,
            stride: config.stride,
            cursor: RowCursor::new(),
            row: SharedCells::new(config.width * config.stride, 0u8),
            accumulators: SharedCells::new(config.width * config.height, PixelAccumulator::default()),
        });

        let (barrier, gates) = row_barrier(config.workers - 1);
        let mut handles = Vec::with_capacity(gates.len());
        for gate in gates {
            let ctx = ThreadContext::new(gate.index(), config.seed, config.samples_per_pixel);
            let state = Arc::clone(&state);
            let handle = thread::Builder::new()
                .name(format!("render-worker-{}", ctx.index))
                .spawn(move || worker_loop(state, gate, ctx))?;
            handles.push(handle);
        }

        Ok(Self {
            state,
            barrier,
            local: ThreadContext::new(0, config.seed, config.samples_per_pixel),
            handles,
            height: config.height,
            poisoned: false,
        })
    }

    pub fn width(&self) -> usize {
        self.state.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn workers(&self) -> usize {
        self.barrier.workers() + 1
    }

    pub fn kernel(&self) -> &K {
        &self.state.kernel
    }

    /// Renders every column of row `y` and returns the row buffer once all
    /// workers have finished it.
    pub fn render_row(&mut self, y: usize) -> Result<&[u8], RenderError> {
        if y >= self.height {
            return Err(RenderError::RowOutOfRange { row: y, height: self.height });
        }
        if self.poisoned {
            return Err(RenderError::WorkerLost);
        }

        self.state.cursor.reset(self.state.width);
        let released = self.barrier.release(y);
        self.state.drain(y, &mut self.local);
        let finished = self.barrier.await_done(released);
        if finished.is_err() || released < self.barrier.workers() {
            self.poisoned = true;
            return Err(RenderError::WorkerLost);
        }

        // SAFETY: every released worker has signalled and is parked on its
        // gate until the next call, which needs `&mut self`.
        Ok(unsafe { self.state.row.as_slice() })
    }

    /// Per-pixel accumulators in row-major order.
    pub fn accumulators(&self) -> &[PixelAccumulator] {
        // SAFETY: rows only run inside `render_row`, which holds `&mut self`.
        unsafe { self.state.accumulators.as_slice() }
    }

    /// Drops all accumulated samples.
    pub fn reset(&mut self) {
        // SAFETY: as in `accumulators`, no row is in flight.
        let accumulators = unsafe { self.state.accumulators.slice_mut(0, self.state.accumulators.len()) };
        for accumulator in accumulators {
            accumulator.clear();
        }
    }
}

impl<K: PixelKernel> Drop for TileScheduler<K> {
    fn drop(&mut self) {
        self.barrier.close();
        for handle in self.handles.drain(..) {
            let name = handle.thread().name().map(String::from);
            if handle.join().is_err() {
                log::warn!("{} panicked before shutdown", name.as_deref().unwrap_or("render worker"));
            }
        }
    }
}

fn worker_loop<K: PixelKernel>(state: Arc<RowState<K>>, gate: WorkerGate, mut ctx: ThreadContext) {
    log::debug!("render worker {} started", ctx.index);
    while let Some(y) = gate.await_go() {
        state.drain(y, &mut ctx);
        if !gate.signal_done() {
            break;
        }
    }
    log::debug!("render worker {} stopped", ctx.index);
}
