//! Background driver for the autoplay controller
//!
//! [`ThreadScheduler`] keeps the single pending deadline in shared state,
//! and a worker thread owned by [`AutoplayRuntime`] sleeps until it is due
//! and delivers it to the controller. Every mutation of the controller goes
//! through one `parking_lot::Mutex`, so the controller still sees a single
//! execution context.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::core::AutoplayController;
use crate::host::CarouselHost;
use crate::timing::{Clock, Scheduler, SystemClock, TimerId};

#[derive(Debug, Default)]
struct Pending {
    /// Timers waiting to fire as (deadline, id)
    timers: Vec<(Instant, TimerId)>,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct Shared {
    pending: Mutex<Pending>,
    wakeup: Condvar,
}

/// Scheduler backed by the system clock and a worker thread
#[derive(Debug)]
pub struct ThreadScheduler {
    clock: SystemClock,
    next_id: u64,
    shared: Arc<Shared>,
}

impl ThreadScheduler {
    /// Create a scheduler with no pending timers
    pub fn new() -> Self {
        Self {
            clock: SystemClock::new(),
            next_id: 0,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Number of timers not yet handed to the controller
    pub fn pending_count(&self) -> usize {
        self.shared.pending.lock().timers.len()
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ThreadScheduler {
    fn now(&self) -> Duration {
        self.clock.now()
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule(&mut self, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        let deadline = self.clock.origin() + self.clock.now() + after;

        self.shared.pending.lock().timers.push((deadline, id));
        self.shared.wakeup.notify_one();
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.shared
            .pending
            .lock()
            .timers
            .retain(|(_, pending)| *pending != id);
        self.shared.wakeup.notify_one();
    }
}

/// Block until a timer is due or shutdown is requested
fn next_due(shared: &Shared) -> Option<TimerId> {
    let mut pending = shared.pending.lock();
    loop {
        if pending.shutdown {
            return None;
        }

        let earliest = pending
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, (deadline, id))| (*deadline, *id))
            .map(|(index, (deadline, _))| (index, *deadline));

        match earliest {
            None => shared.wakeup.wait(&mut pending),
            Some((index, deadline)) => {
                if Instant::now() >= deadline {
                    let (_, id) = pending.timers.remove(index);
                    return Some(id);
                }
                let _ = shared.wakeup.wait_until(&mut pending, deadline);
            }
        }
    }
}

/// Shared controller handle
pub type SharedController<H> = Arc<Mutex<AutoplayController<H, ThreadScheduler>>>;

/// Runs a controller on a background timer thread
///
/// The worker is stopped and joined on [`shutdown`](Self::shutdown) or drop.
pub struct AutoplayRuntime<H>
where
    H: CarouselHost + Send + 'static,
    H::Node: Send,
{
    controller: SharedController<H>,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl<H> AutoplayRuntime<H>
where
    H: CarouselHost + Send + 'static,
    H::Node: Send,
{
    /// Take ownership of `controller` and start delivering its timers
    pub fn spawn(controller: AutoplayController<H, ThreadScheduler>) -> std::io::Result<Self> {
        let shared = Arc::clone(&controller.scheduler().shared);
        let controller = Arc::new(Mutex::new(controller));

        let worker = {
            let controller = Arc::clone(&controller);
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("autoplay-timer".to_string())
                .spawn(move || {
                    log::debug!("Autoplay timer thread started");
                    while let Some(id) = next_due(&shared) {
                        // Cancellation that raced the wakeup is caught by the timer slot
                        controller.lock().on_timer(id);
                    }
                    log::debug!("Autoplay timer thread exiting");
                })?
        };

        Ok(Self {
            controller,
            shared,
            worker: Some(worker),
        })
    }

    /// Run `f` with exclusive access to the controller
    pub fn with<R>(&self, f: impl FnOnce(&mut AutoplayController<H, ThreadScheduler>) -> R) -> R {
        f(&mut self.controller.lock())
    }

    /// Clone of the shared controller handle, for event callbacks
    pub fn controller(&self) -> SharedController<H> {
        Arc::clone(&self.controller)
    }

    /// Destroy the controller and join the worker
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        self.controller.lock().destroy();
        {
            let mut pending = self.shared.pending.lock();
            pending.shutdown = true;
            pending.timers.clear();
        }
        self.shared.wakeup.notify_all();

        if worker.join().is_err() {
            log::error!("Autoplay timer thread panicked");
        }
    }
}

impl<H> Drop for AutoplayRuntime<H>
where
    H: CarouselHost + Send + 'static,
    H::Node: Send,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
