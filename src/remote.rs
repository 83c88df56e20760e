//! State of one remote operation, as seen by a page.
//!
//! Each page keeps its operations in `RwSignal<RemoteOp<T>>`. Completions are
//! tagged with the generation returned by [`RemoteOp::start`]; a completion
//! from an older generation (superseded, or reset while in flight) is dropped.

use std::future::Future;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteOp<T> {
    phase: Phase,
    value: Option<T>,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for RemoteOp<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            value: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T> RemoteOp<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Last successful payload. Kept while a new request is pending.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark a request as issued. The previous payload stays visible.
    pub fn start(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Pending;
        self.error = None;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Store a payload verbatim. Returns `false` for a stale completion.
    pub fn succeed(&mut self, generation: u64, value: T) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = Phase::Fulfilled;
        self.value = Some(value);
        self.error = None;
        true
    }

    pub fn fail(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = Phase::Rejected;
        self.error = Some(message.into());
        true
    }

    /// Back to idle. Work in flight is not cancelled, its completion is ignored.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.value = None;
        self.error = None;
    }

    /// Edit the stored payload in place, e.g. to drop a deleted row.
    pub fn update_value(&mut self, edit: impl FnOnce(&mut T)) {
        if let Some(value) = self.value.as_mut() {
            edit(value);
        }
    }
}

/// Run `fut` against `op`.
pub fn dispatch<T, F>(op: RwSignal<RemoteOp<T>>, fut: F)
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<T, String>> + 'static,
{
    dispatch_then(op, fut, |_| {});
}

/// Run `fut` against `op`, then call `on_settled` if the completion is still
/// current. Nothing happens if the page owning `op` has gone away.
pub fn dispatch_then<T, F, C>(op: RwSignal<RemoteOp<T>>, fut: F, on_settled: C)
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<T, String>> + 'static,
    C: FnOnce(Result<&T, &str>) + 'static,
{
    let Some(generation) = op.try_update(|o| o.start()) else {
        return;
    };

    spawn_local(async move {
        let result = fut.await;
        let current = op
            .try_with_untracked(|o| o.is_current(generation))
            .unwrap_or(false);
        if !current {
            return;
        }

        match &result {
            Ok(value) => on_settled(Ok(value)),
            Err(message) => on_settled(Err(message.as_str())),
        }
        op.try_update(|o| match result {
            Ok(value) => o.succeed(generation, value),
            Err(message) => o.fail(generation, message),
        });
    });
}
