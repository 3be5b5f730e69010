use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Background tasks that share one teardown path.
pub struct TaskSet {
    cancel: CancellationToken,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            handles: Vec::new(),
        }
    }

    /// Spawns `task`; it is dropped at its next await point once the set is
    /// cancelled.
    pub fn spawn<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => log::debug!("Task `{name}` cancelled"),
                () = task => log::debug!("Task `{name}` finished"),
            }
        });
        self.handles.push((name, handle));
    }

    /// Runs `tick` every `period`, first one `period` from now. A slow tick
    /// delays only this loop.
    pub fn spawn_repeating<F, Fut>(&mut self, name: &'static str, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.spawn(name, async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                log::trace!("Tick `{name}`");
                tick().await;
            }
        });
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(|(name, _)| *name).collect()
    }

    /// Cancels every task. Safe to call any number of times; returns how many
    /// tasks this call cancelled.
    pub fn cancel_all(&mut self) -> usize {
        self.cancel.cancel();
        let count = self.handles.len();
        for (name, handle) in self.handles.drain(..) {
            handle.abort();
            log::debug!("Stopped `{name}`");
        }
        count
    }
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
