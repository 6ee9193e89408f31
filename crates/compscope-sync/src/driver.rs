//! Tokio task that owns a [`Debouncer`] and publishes its commits.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::clock::TokioClock;
use crate::debounce::Debouncer;

#[derive(Debug, Error)]
#[error("debounce driver has shut down")]
pub struct DriverClosed;

#[derive(Debug)]
enum Command<T> {
    Edit(T),
    Commit(T),
    Flush,
    Sync(T),
}

/// Sends edits to a running debounce task
#[derive(Debug, Clone)]
pub struct DebounceHandle<T> {
    tx: mpsc::UnboundedSender<Command<T>>,
}

impl<T> DebounceHandle<T> {
    /// User edit; committed after the delay unless superseded
    pub fn edit(&self, value: T) -> Result<(), DriverClosed> {
        self.send(Command::Edit(value))
    }

    /// Commit `value` immediately, cancelling any pending edit
    pub fn commit(&self, value: T) -> Result<(), DriverClosed> {
        self.send(Command::Commit(value))
    }

    /// Commit the pending edit immediately, if any
    pub fn flush(&self) -> Result<(), DriverClosed> {
        self.send(Command::Flush)
    }

    /// Replace the committed value from outside, dropping any pending edit
    pub fn sync(&self, value: T) -> Result<(), DriverClosed> {
        self.send(Command::Sync(value))
    }

    fn send(&self, command: Command<T>) -> Result<(), DriverClosed> {
        self.tx.send(command).map_err(|_| DriverClosed)
    }
}

/// Spawn a debounce task on the current runtime.
///
/// Committed values are published on the returned `watch` receiver. The task
/// exits once every [`DebounceHandle`] has been dropped.
pub fn spawn_debouncer<T>(
    initial: T,
    delay: Duration,
) -> (DebounceHandle<T>, watch::Receiver<T>, JoinHandle<()>)
where
    T: Clone + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (publish, committed) = watch::channel(initial.clone());

    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new(initial, delay, TokioClock);

        loop {
            tokio::select! {
                command = rx.recv() => match command {
                    Some(Command::Edit(value)) => debouncer.edit(value),
                    Some(Command::Commit(value)) => {
                        publish.send_replace(debouncer.commit(value));
                    }
                    Some(Command::Flush) => {
                        if let Some(value) = debouncer.flush() {
                            publish.send_replace(value);
                        }
                    }
                    Some(Command::Sync(value)) => {
                        debouncer.sync(value.clone());
                        publish.send_replace(value);
                    }
                    None => break,
                },
                _ = sleep_until(debouncer.deadline()) => {
                    if let Some(value) = debouncer.poll() {
                        publish.send_replace(value);
                    }
                }
            }
        }

        tracing::debug!(commits = debouncer.commit_count(), "debounce driver stopped");
    });

    (DebounceHandle { tx }, committed, task)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
