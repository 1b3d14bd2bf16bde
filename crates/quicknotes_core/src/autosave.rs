//! Debounced task scheduling for note autosave.
//!
//! # Responsibility
//! - Own the delayed-save timer as an explicit, caller-held value instead
//!   of module-global state.
//! - Keep at most one pending task; a newer schedule replaces it.
//!
//! # Invariants
//! - A scheduled task runs exactly once, after `delay` passes with no
//!   newer schedule or cancel.
//! - `cancel` discards the pending task without running it.
//! - Dropping the handle stops the worker; pending work is discarded.
//! - Commands against a stopped worker return a typed error instead of
//!   being dropped silently.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

pub type AutosaveResult<T> = Result<T, AutosaveError>;

/// Scheduling error for a stopped debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveError {
    /// The worker thread is gone; no further commands are accepted.
    WorkerGone,
}

impl Display for AutosaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkerGone => write!(f, "autosave worker is no longer running"),
        }
    }
}

impl Error for AutosaveError {}

type Task = Box<dyn FnOnce() + Send + 'static>;

enum Command {
    Schedule(Task),
    Cancel,
    Shutdown,
}

/// Cancellable single-slot debouncer backed by one worker thread.
pub struct Debouncer {
    sender: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer firing tasks after `delay` of schedule silence.
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();

        let worker = std::thread::spawn(move || {
            let mut pending: Option<Task> = None;
            loop {
                let command = if pending.is_some() {
                    match receiver.recv_timeout(delay) {
                        Ok(command) => command,
                        Err(RecvTimeoutError::Timeout) => {
                            if let Some(task) = pending.take() {
                                task();
                                info!("event=autosave_fire module=autosave status=ok");
                            }
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                } else {
                    match receiver.recv() {
                        Ok(command) => command,
                        Err(_) => break,
                    }
                };

                match command {
                    Command::Schedule(task) => pending = Some(task),
                    Command::Cancel => pending = None,
                    Command::Shutdown => break,
                }
            }
        });

        Self {
            sender,
            worker: Some(worker),
        }
    }

    /// Schedules `task`, replacing any pending one and restarting the
    /// delay.
    ///
    /// # Errors
    /// [`AutosaveError::WorkerGone`] when the worker has already stopped.
    pub fn schedule(&self, task: impl FnOnce() + Send + 'static) -> AutosaveResult<()> {
        self.send(Command::Schedule(Box::new(task)), "autosave_schedule")
    }

    /// Discards the pending task, if any.
    ///
    /// # Errors
    /// [`AutosaveError::WorkerGone`] when the worker has already stopped.
    pub fn cancel(&self) -> AutosaveResult<()> {
        self.send(Command::Cancel, "autosave_cancel")
    }

    fn send(&self, command: Command, event: &str) -> AutosaveResult<()> {
        if self.sender.send(command).is_err() {
            warn!("event={event} module=autosave status=error error_code=worker_gone");
            return Err(AutosaveError::WorkerGone);
        }
        Ok(())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn rapid_schedules_coalesce_into_one_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(50));

        for _ in 0..3 {
            let runs = Arc::clone(&runs);
            debouncer
                .schedule(move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_suppresses_pending_task() {
        let runs = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(50));

        {
            let runs = Arc::clone(&runs);
            debouncer
                .schedule(move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }
        debouncer.cancel().unwrap();

        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_discards_pending_task() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let debouncer = Debouncer::new(Duration::from_millis(200));
            let runs = Arc::clone(&runs);
            debouncer
                .schedule(move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn separate_schedules_each_fire() {
        let runs = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(30));

        for _ in 0..2 {
            let runs = Arc::clone(&runs);
            debouncer
                .schedule(move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            std::thread::sleep(Duration::from_millis(150));
        }

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
