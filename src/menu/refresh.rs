//! Dynamic refresh: a repeating background task bound to one open view.
//!
//! Each open session with `dynamic-gui` enabled gets exactly one refresh
//! session. The task re-runs the population step on a fixed interval and
//! self-terminates the first time it sees the view without observers — there
//! is no external cancel; closing the view is the only stop signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::catalog::Viewer;

use super::container::MenuContainer;
use super::view::CategoryMenu;

/// Lifecycle of a refresh session. One-way: once cancelled, a session never
/// reschedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Scheduled,
    Cancelled,
}

/// Observation handle for a spawned refresh session.
///
/// Deliberately exposes no cancel operation; dropping the handle detaches the
/// task, which keeps running until its view loses its last observer.
pub struct RefreshHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn state(&self) -> RefreshState {
        if self.cancelled.load(Ordering::Acquire) {
            RefreshState::Cancelled
        } else {
            RefreshState::Scheduled
        }
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct RefreshScheduler;

impl RefreshScheduler {
    /// Spawn the repeating refresh task for one open view.
    ///
    /// The first tick fires immediately, performing the initial population.
    /// Ticks never overlap: a population pass that runs long simply delays
    /// the next tick's visible effect.
    pub fn spawn(
        menu: CategoryMenu,
        container: Arc<dyn MenuContainer>,
        viewer: Arc<dyn Viewer>,
        period: Duration,
    ) -> RefreshHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if container.observer_count() == 0 {
                    flag.store(true, Ordering::Release);
                    tracing::debug!(
                        viewer = %viewer.name(),
                        "Category view has no observers, stopping dynamic refresh"
                    );
                    break;
                }

                menu.populate(&container, &viewer);
                menu.refresh_title(&container);
            }
        });

        RefreshHandle { cancelled, task }
    }
}
