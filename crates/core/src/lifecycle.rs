//! Panel lifecycle: the `Loading → Ready | Failed` state machine every
//! dashboard panel goes through, and the mount guard that keeps a panel from
//! receiving results after it has been torn down.

use std::future::Future;

use tokio::sync::watch;

use crate::errors::CoreError;

/// Load state of one panel.
///
/// Panels start out `Loading`. A fetch settles them into `Ready` or
/// `Failed`; neither is left again except by a fresh load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed)
    }

    /// The loaded value, if the fetch succeeded.
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Settle a fetch result into a terminal load state.
///
/// Errors stop here: they are logged against `panel` and the panel falls
/// back to its empty or sentinel display. Nothing is retried.
pub fn settle<T>(panel: &str, result: Result<T, CoreError>) -> LoadState<T> {
    match result {
        Ok(value) => LoadState::Ready(value),
        Err(e) => {
            tracing::error!(panel, error = %e, "error fetching panel data");
            LoadState::Failed
        }
    }
}

/// Lifetime of one mounted panel.
///
/// Dropping the mount (or calling [`Mount::unmount`]) cancels every future
/// started through one of its handles; their results are discarded.
#[derive(Debug)]
pub struct Mount {
    cancel: watch::Sender<bool>,
}

/// Cheap, cloneable view of a [`Mount`] that work in flight can observe.
#[derive(Debug, Clone)]
pub struct MountHandle {
    cancelled: watch::Receiver<bool>,
}

impl Mount {
    pub fn new() -> Self {
        let (cancel, _) = watch::channel(false);
        Self { cancel }
    }

    #[must_use]
    pub fn handle(&self) -> MountHandle {
        MountHandle {
            cancelled: self.cancel.subscribe(),
        }
    }

    /// Run `fut` for as long as this mount lives.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        self.handle().run(fut).await
    }

    /// Tear the panel down, cancelling anything still in flight.
    pub fn unmount(self) {}
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

impl MountHandle {
    /// `true` once the owning mount is gone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves when the owning mount is torn down.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.clone();
        // An error means the sender is gone, which only happens after Drop
        // has already published `true`.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `fut` to completion unless the mount is torn down first.
    ///
    /// Returns `None` when cancelled, so a late result can never be applied
    /// to a panel that no longer exists.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            output = fut => {
                if self.is_cancelled() {
                    None
                } else {
                    Some(output)
                }
            }
        }
    }
}
