//! This module defines the execution-queue abstraction and the per-call
//! execution context.
//!
//! A [`TaskQueue`] is a FIFO ordering domain for bulk, data-parallel work:
//! operations submitted to the same queue execute in submission order, while
//! operations on independent queues may run concurrently with no ordering
//! guarantee between them. There is no cooperative suspension and no
//! cancellation of submitted work; callers control concurrency only by
//! choosing queues and by synchronizing before depending on a result.
//!
//! The in-process model here is deliberately minimal: `run` executes the work
//! inside the queue's critical section, so same-queue submissions serialize
//! in submission order and `synchronize` drains everything submitted before
//! it. The handle has the same shape as an accelerator stream, so a device
//! implementation can slot in without touching the operations.

use parking_lot::Mutex;

use crate::storage::{Allocator, HostAllocator};

//==================================================================================
// 1. Task Queue
//==================================================================================

/// A FIFO-ordered execution domain.
pub struct TaskQueue {
    gate: Mutex<()>,
}

impl TaskQueue {
    pub const fn new() -> Self {
        Self {
            gate: Mutex::new(()),
        }
    }

    /// Submits `work` to the queue and runs it to completion.
    ///
    /// Work submitted to the same queue from multiple threads executes one
    /// submission at a time, in lock-acquisition order.
    pub fn run<R>(&self, work: impl FnOnce() -> R) -> R {
        let _ticket = self.gate.lock();
        work()
    }

    /// Blocks until all work submitted to this queue before the call has completed.
    pub fn synchronize(&self) {
        drop(self.gate.lock());
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================
// 2. Execution Context
//==================================================================================

static HOST_ALLOCATOR: HostAllocator = HostAllocator;
static DEFAULT_QUEUE: TaskQueue = TaskQueue::new();

/// The per-call execution context threaded through every operation.
///
/// Bundles the caller-supplied allocator with the queue the operation's bulk
/// work is submitted to. `ExecContext::default()` uses host memory and a
/// process-wide default queue.
#[derive(Clone, Copy)]
pub struct ExecContext<'a> {
    pub allocator: &'a dyn Allocator,
    pub queue: &'a TaskQueue,
}

impl<'a> ExecContext<'a> {
    pub fn new(allocator: &'a dyn Allocator, queue: &'a TaskQueue) -> Self {
        Self { allocator, queue }
    }
}

impl Default for ExecContext<'static> {
    fn default() -> Self {
        Self {
            allocator: &HOST_ALLOCATOR,
            queue: &DEFAULT_QUEUE,
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_returns_value() {
        let queue = TaskQueue::new();
        let out = queue.run(|| 41 + 1);
        assert_eq!(out, 42);
    }

    #[test]
    fn test_same_queue_serializes() {
        let queue = TaskQueue::new();
        let log = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for i in 0..4 {
                let queue = &queue;
                let log = &log;
                scope.spawn(move || {
                    queue.run(|| {
                        // Entries written inside `run` are never interleaved.
                        log.lock().push(i);
                        log.lock().push(i);
                    });
                });
            }
        });
        queue.synchronize();

        let entries = log.into_inner();
        assert_eq!(entries.len(), 8);
        for pair in entries.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_default_context() {
        let ctx = ExecContext::default();
        let buf = ctx.allocator.allocate(8).unwrap();
        assert_eq!(buf.len(), 8);
        ctx.queue.synchronize();
    }
}
