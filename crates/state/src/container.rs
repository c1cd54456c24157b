//! Observable list container and the load/report protocol.

use std::future::Future;

use impulso_library::LibraryResult;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Where a container is in its load cycle.
///
/// Every load re-enters `Loading` regardless of the prior phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Snapshot published to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    pub data: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: Phase,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            is_loading: false,
            error: None,
            phase: Phase::Idle,
        }
    }
}

/// What a failed load leaves in `data`.
#[derive(Debug, Clone)]
pub enum Fallback<T> {
    /// Carry the last successful data forward.
    KeepData,
    /// Reset to empty.
    Clear,
    /// Reset to the given entries.
    Replace(Vec<T>),
}

/// Latest-value cell holding one list for presentation.
///
/// Observers call [`subscribe`](Self::subscribe) and await changes on the
/// returned receiver. Once [`detach`](Self::detach)ed the container is no
/// longer live: in-flight loads are abandoned and nothing is written to it
/// again.
pub struct StateContainer<T> {
    sender: watch::Sender<ListState<T>>,
    live: CancellationToken,
}

impl<T> Default for StateContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateContainer<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ListState::default());
        Self {
            sender,
            live: CancellationToken::new(),
        }
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.sender.subscribe()
    }

    pub fn is_live(&self) -> bool {
        !self.live.is_cancelled()
    }

    /// Mark the container dead. Idempotent.
    pub fn detach(&self) {
        self.live.cancel();
    }

    /// Token cancelled when the container is detached.
    pub fn lifetime(&self) -> CancellationToken {
        self.live.clone()
    }

    /// Apply `f` to the current state, unless the container is detached.
    fn update(&self, f: impl FnOnce(&mut ListState<T>)) -> bool {
        if !self.is_live() {
            return false;
        }
        self.sender.send_modify(f);
        true
    }

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }

    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|s| s.error = Some(message));
    }

    /// Surface the outcome of a mutating call.
    ///
    /// Success clears the error; failure stores `"Failed to {action}: ..."`.
    /// `data` is never touched.
    pub fn report<V>(&self, action: &str, result: LibraryResult<V>) -> Option<V> {
        match result {
            Ok(value) => {
                self.clear_error();
                Some(value)
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "Operation failed");
                self.set_error(format!("Failed to {action}: {e}"));
                None
            }
        }
    }
}

impl<T: Clone> StateContainer<T> {
    /// Clone of the current state.
    pub fn snapshot(&self) -> ListState<T> {
        self.sender.borrow().clone()
    }

    /// Clone of the current data.
    pub fn data(&self) -> Vec<T> {
        self.sender.borrow().data.clone()
    }

    /// Run one load through the container protocol.
    ///
    /// Sets `is_loading`, awaits `fut`, then on success replaces `data` and
    /// clears `error`; on failure applies `fallback` and stores the error.
    /// If the container is detached before `fut` completes the load is
    /// abandoned. Returns `true` only when fresh data was applied.
    pub async fn load<F>(&self, action: &str, fut: F, fallback: Fallback<T>) -> bool
    where
        F: Future<Output = LibraryResult<Vec<T>>>,
    {
        let began = self.update(|s| {
            s.is_loading = true;
            s.phase = Phase::Loading;
        });
        if !began {
            return false;
        }

        let lifetime = self.lifetime();
        let result = tokio::select! {
            _ = lifetime.cancelled() => {
                tracing::debug!(action, "Container detached, load abandoned");
                return false;
            }
            result = fut => result,
        };

        match result {
            Ok(data) => self.update(|s| {
                s.data = data;
                s.error = None;
                s.is_loading = false;
                s.phase = Phase::Loaded;
            }),
            Err(e) => {
                tracing::warn!(action, error = %e, "Load failed");
                let message = format!("Failed to {action}: {e}");
                self.update(|s| {
                    match fallback {
                        Fallback::KeepData => {}
                        Fallback::Clear => s.data.clear(),
                        Fallback::Replace(data) => s.data = data,
                    }
                    s.error = Some(message);
                    s.is_loading = false;
                    s.phase = Phase::Failed;
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use impulso_core::error::CoreError;
    use impulso_library::LibraryError;

    use super::*;

    fn failure() -> LibraryError {
        CoreError::NotFound {
            entity: "resource",
            id: 7,
        }
        .into()
    }

    #[tokio::test]
    async fn load_success_replaces_data() {
        let container = StateContainer::<i32>::new();
        assert_eq!(container.snapshot().phase, Phase::Idle);

        assert!(container.load("load", async { Ok(vec![1, 2]) }, Fallback::KeepData).await);
        let state = container.snapshot();
        assert_eq!(state.data, vec![1, 2]);
        assert_eq!(state.phase, Phase::Loaded);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn failed_load_applies_fallback() {
        let container = StateContainer::<i32>::new();
        container.load("load", async { Ok(vec![1]) }, Fallback::KeepData).await;

        assert!(!container.load("load", async { Err(failure()) }, Fallback::KeepData).await);
        let state = container.snapshot();
        assert_eq!(state.data, vec![1]);
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to load: Entity not found: resource with id 7")
        );

        container.load("load", async { Err(failure()) }, Fallback::Clear).await;
        assert!(container.data().is_empty());

        container
            .load("load", async { Err(failure()) }, Fallback::Replace(vec![-1]))
            .await;
        assert_eq!(container.data(), vec![-1]);
    }

    #[tokio::test]
    async fn loading_flag_is_observable() {
        let container = StateContainer::<i32>::new();
        let mut rx = container.subscribe();
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let load = container.load(
            "load",
            async move {
                let _ = gate.await;
                Ok(vec![5])
            },
            Fallback::KeepData,
        );
        let observe = async {
            rx.changed().await.unwrap();
            let loading = rx.borrow_and_update().is_loading;
            let _ = release.send(());
            loading
        };

        let (loaded, was_loading) = tokio::join!(load, observe);
        assert!(loaded);
        assert!(was_loading);
        assert!(!container.snapshot().is_loading);
    }

    #[tokio::test]
    async fn detached_container_ignores_results() {
        let container = StateContainer::<i32>::new();
        container.load("load", async { Ok(vec![1]) }, Fallback::KeepData).await;
        container.detach();
        container.detach();

        assert!(!container.load("load", async { Ok(vec![2]) }, Fallback::KeepData).await);
        container.set_error("late");
        assert_eq!(container.data(), vec![1]);
        assert_eq!(container.snapshot().error, None);
    }

    #[tokio::test]
    async fn detach_abandons_in_flight_load() {
        let container = StateContainer::<i32>::new();
        let load = container.load("load", std::future::pending(), Fallback::KeepData);
        let detach = async {
            tokio::task::yield_now().await;
            container.detach();
        };

        let (loaded, ()) = tokio::join!(load, detach);
        assert!(!loaded);
        assert!(container.data().is_empty());
    }

    #[test]
    fn report_sets_and_clears_error() {
        let container = StateContainer::<i32>::new();
        assert_eq!(container.report::<()>("delete resource", Err(failure())), None);
        assert_eq!(
            container.snapshot().error.as_deref(),
            Some("Failed to delete resource: Entity not found: resource with id 7")
        );
        assert_eq!(container.report("delete resource", Ok(3)), Some(3));
        assert_eq!(container.snapshot().error, None);
    }
}
