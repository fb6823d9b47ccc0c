// ── Monitor lifecycle ──
//
// Idle/Running state machine for the notifier's single background loop.
// The loop body lives with the notifier; this type only decides whether a
// loop may start, hands each run its own cancellation token, and keeps a
// permanent shutdown switch.

use std::future::Future;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug)]
enum Phase {
    Idle,
    /// The task is detached; `cancel` stops it and it calls `finish(run)`.
    Running { run: u64, cancel: CancellationToken },
}

#[derive(Debug)]
struct State {
    phase: Phase,
    runs: u64,
}

#[derive(Debug)]
pub(crate) struct Monitor {
    state: Mutex<State>,
    /// Parent of every run token. Cancelled once, on shutdown.
    shutdown: CancellationToken,
    runtime: Option<Handle>,
}

impl Monitor {
    pub(crate) fn new(runtime: Option<Handle>) -> Self {
        Self {
            state: Mutex::new(State {
                phase: Phase::Idle,
                runs: 0,
            }),
            shutdown: CancellationToken::new(),
            runtime,
        }
    }

    /// Spawn a loop unless one is already running.
    ///
    /// `start` receives the run id and that run's cancellation token and
    /// returns the loop future. Returns `true` if a new run was spawned.
    pub(crate) fn ensure_started<F, Fut>(&self, start: F) -> bool
    where
        F: FnOnce(u64, CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.shutdown.is_cancelled() {
            return false;
        }

        let mut state = self.state.lock();
        if matches!(state.phase, Phase::Running { .. }) {
            return false;
        }

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!("no tokio runtime available; change monitor stays idle");
            return false;
        };

        state.runs += 1;
        let run = state.runs;
        let cancel = self.shutdown.child_token();
        runtime.spawn(start(run, cancel.clone()));
        state.phase = Phase::Running { run, cancel };
        debug!(run, "change monitor spawned");
        true
    }

    /// Return to idle, but only if `run` still owns the running state.
    pub(crate) fn finish(&self, run: u64) {
        let mut state = self.state.lock();
        if matches!(state.phase, Phase::Running { run: current, .. } if current == run) {
            state.phase = Phase::Idle;
        }
    }

    /// Cancel the current run and refuse every future start.
    pub(crate) fn shutdown(&self) {
        self.shutdown.cancel();
        let mut state = self.state.lock();
        if let Phase::Running { run, cancel } = std::mem::replace(&mut state.phase, Phase::Idle) {
            cancel.cancel();
            debug!(run, "change monitor shut down");
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        matches!(self.state.lock().phase, Phase::Running { .. })
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
