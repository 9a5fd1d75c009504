//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the execution-context
//! traits defined in `rowcache-foundation`: a channel-backed [`MainLoop`]
//! standing in for a platform's main/UI context, and a thread-spawning
//! [`StdBackgroundExecutor`] for the measurement worker.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use rowcache_foundation::{BackgroundExecutor, MainDispatcher, MainTask};

/// Cooperative single-threaded main loop.
///
/// Tasks posted through a [`MainHandle`] from any thread execute on the
/// thread that drains the loop, in post order. The draining thread plays the
/// role of the toolkit's main/UI thread.
pub struct MainLoop {
    sender: Sender<MainTask>,
    receiver: Receiver<MainTask>,
}

impl MainLoop {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Returns a cloneable handle for posting tasks from other threads.
    pub fn handle(&self) -> MainHandle {
        MainHandle {
            sender: self.sender.clone(),
        }
    }

    /// Executes one pending task, if any. Returns whether a task ran.
    pub fn run_one(&self) -> bool {
        match self.receiver.try_recv() {
            Ok(task) => {
                task();
                true
            }
            Err(_) => false,
        }
    }

    /// Executes pending tasks until the queue is empty. Returns the number
    /// of tasks executed.
    pub fn run_until_idle(&self) -> usize {
        let mut executed = 0;
        while self.run_one() {
            executed += 1;
        }
        executed
    }

    /// Runs tasks until `done` reports true, blocking briefly between
    /// arrivals so the caller does not spin.
    pub fn run_until(&self, mut done: impl FnMut() -> bool) {
        while !done() {
            match self.receiver.recv_timeout(Duration::from_millis(50)) {
                Ok(task) => task(),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

impl Default for MainLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting side of a [`MainLoop`].
#[derive(Clone)]
pub struct MainHandle {
    sender: Sender<MainTask>,
}

impl MainDispatcher for MainHandle {
    fn post(&self, task: MainTask) {
        // A dropped loop means the owner is tearing down; posted work is
        // discarded silently.
        let _ = self.sender.send(task);
    }
}

/// Background executor that runs each job on its own named thread.
pub struct StdBackgroundExecutor;

impl BackgroundExecutor for StdBackgroundExecutor {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        let builder = thread::Builder::new().name("rowcache-worker".into());
        if let Err(err) = builder.spawn(job) {
            log::error!("failed to spawn background worker: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn tasks_run_in_post_order() {
        let main_loop = MainLoop::new();
        let handle = main_loop.handle();
        let order = Arc::new(Mutex::new(Vec::new()));
        for value in 0..5 {
            let order = Arc::clone(&order);
            handle.post(Box::new(move || order.lock().unwrap().push(value)));
        }
        assert_eq!(main_loop.run_until_idle(), 5);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn run_one_reports_idle_queue() {
        let main_loop = MainLoop::new();
        assert!(!main_loop.run_one());
    }

    #[test]
    fn posting_works_across_threads() {
        let main_loop = MainLoop::new();
        let handle = main_loop.handle();
        let counter = Arc::new(AtomicUsize::new(0));
        let posted = Arc::clone(&counter);
        let worker = thread::spawn(move || {
            for _ in 0..10 {
                let posted = Arc::clone(&posted);
                handle.post(Box::new(move || {
                    posted.fetch_add(1, Ordering::SeqCst);
                }));
            }
        });
        worker.join().unwrap();
        main_loop.run_until_idle();
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn background_executor_runs_the_job() {
        let (sender, receiver) = channel();
        StdBackgroundExecutor.execute(Box::new(move || {
            sender.send(thread::current().name().map(str::to_owned)).unwrap();
        }));
        let name = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("rowcache-worker"));
    }

    #[test]
    fn run_until_drains_while_waiting_for_completion() {
        let main_loop = MainLoop::new();
        let handle = main_loop.handle();
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..3 {
                    let counter = Arc::clone(&counter);
                    handle.post(Box::new(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }));
                }
            });
        }
        let observed = Arc::clone(&counter);
        main_loop.run_until(|| observed.load(Ordering::SeqCst) == 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
