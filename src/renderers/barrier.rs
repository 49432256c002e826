// Copyright @yucwang 2026

//! Two-phase row barrier between the driving thread and the worker pool.
//! The driver releases a row to every worker ("go") and then waits for one
//! signal per released worker ("done") before touching the row again.

use crate::core::error::RenderError;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerSignal {
    Done(usize),
    Lost(usize),
}

/// Driver side.
pub struct RowBarrier {
    go: Vec<Sender<usize>>,
    done: Receiver<WorkerSignal>,
}

/// Worker side. Dropping a gate while its thread panics reports the worker
/// as lost, so the driver never waits on a dead thread.
pub struct WorkerGate {
    index: usize,
    go: Receiver<usize>,
    done: Sender<WorkerSignal>,
}

/// Barrier for `workers` spawned threads. Gates are numbered from 1; index 0
/// belongs to the driving thread.
pub fn row_barrier(workers: usize) -> (RowBarrier, Vec<WorkerGate>) {
    let (done_tx, done_rx) = mpsc::channel();
    let mut go = Vec::with_capacity(workers);
    let mut gates = Vec::with_capacity(workers);
    for i in 0..workers {
        let (go_tx, go_rx) = mpsc::channel();
        go.push(go_tx);
        gates.push(WorkerGate { index: i + 1, go: go_rx, done: done_tx.clone() });
    }
    (RowBarrier { go, done: done_rx }, gates)
}

impl RowBarrier {
    pub fn workers(&self) -> usize {
        self.go.len()
    }

    /// Sends `row` to every worker and returns how many accepted it.
    pub fn release(&self, row: usize) -> usize {
        self.go.iter().filter(|tx| tx.send(row).is_ok()).count()
    }

    /// Blocks until `released` workers have signalled. Always consumes every
    /// signal, even after a worker is reported lost.
    pub fn await_done(&self, released: usize) -> Result<(), RenderError> {
        let mut lost = false;
        for _ in 0..released {
            match self.done.recv() {
                Ok(WorkerSignal::Done(_)) => {}
                Ok(WorkerSignal::Lost(index)) => {
                    log::error!("render worker {} panicked mid-row", index);
                    lost = true;
                }
                Err(_) => return Err(RenderError::WorkerLost),
            }
        }
        if lost {
            Err(RenderError::WorkerLost)
        } else {
            Ok(())
        }
    }

    /// Disconnects every worker; their next `await_go` returns `None`.
    pub fn close(&mut self) {
        self.go.clear();
    }
}

impl WorkerGate {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Waits for the next row, `None` once the barrier is closed.
    pub fn await_go(&self) -> Option<usize> {
        self.go.recv().ok()
    }

    pub fn signal_done(&self) -> bool {
        self.done.send(WorkerSignal::Done(self.index)).is_ok()
    }
}

impl Drop for WorkerGate {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let _ = self.done.send(WorkerSignal::Lost(self.index));
        }
    }
}
