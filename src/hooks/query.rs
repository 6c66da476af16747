//! Reactive Query Handle
//!
//! Wraps a `Poller` so its state lands in a signal and its key follows a
//! reactive source. The poller lives as long as the calling component.

use std::fmt::Debug;
use std::rc::Rc;
use std::time::Duration;

use comanda_core::{Fetcher, LocalFuture, PollOptions, Poller, QueryState, Scheduler};
use leptos::prelude::*;

/// Browser event loop: `spawn_local` plus `setTimeout`-backed sleeps
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    fn spawn(&self, task: LocalFuture<()>) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, period: Duration) -> LocalFuture<()> {
        Box::pin(gloo_timers::future::sleep(period))
    }
}

/// Copyable handle to a polled query
pub struct Query<K: 'static, T: Send + Sync + 'static> {
    pub state: RwSignal<QueryState<T>>,
    /// Last payload only; does not notify when just `loading` or `error` move
    pub payload: Memo<Option<T>>,
    poller: StoredValue<Poller<K, T>, LocalStorage>,
}

impl<K: 'static, T: Send + Sync + 'static> Clone for Query<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: 'static, T: Send + Sync + 'static> Copy for Query<K, T> {}

impl<K, T> Query<K, T>
where
    K: Clone + PartialEq + Debug + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn data(&self) -> Option<T> {
        self.payload.get()
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.with(|s| s.error_message())
    }

    pub fn refetch(&self) {
        self.poller.try_with_value(|p| p.refetch());
    }
}

/// Poll `fetcher` for whatever `key` currently holds; `None` keeps it idle.
pub fn use_polled_query<K, T>(
    name: &'static str,
    key: Signal<Option<K>>,
    options: PollOptions,
    fetcher: Fetcher<K, T>,
) -> Query<K, T>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let state = RwSignal::new(QueryState::default());
    let payload = payload_memo(state);
    let poller = Poller::new(name, Rc::new(WebScheduler), fetcher, options);
    poller.subscribe(move |snapshot| {
        state.try_set(snapshot.clone());
    });
    let poller = StoredValue::new_local(poller);

    Effect::new(move |_| {
        let key = key.get();
        poller.with_value(|p| p.set_key(key));
    });

    on_cleanup(move || {
        poller.try_with_value(|p| p.cancel());
    });

    Query {
        state,
        payload,
        poller,
    }
}

/// Narrow a query state to its payload so readers re-run only when the
/// data itself changes, not on every poll tick.
fn payload_memo<T>(state: RwSignal<QueryState<T>>) -> Memo<Option<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    Memo::new(move |_| state.with(|s| s.data.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_payload_ignores_loading_and_error_churn() {
        let owner = Owner::new();
        owner.with(|| {
            let state = RwSignal::new(QueryState::<Vec<u32>>::default());
            let payload = payload_memo(state);
            let renders = Arc::new(AtomicUsize::new(0));
            let counted = renders.clone();
            let rows = Memo::new(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
                payload.get().map(|items| items.len())
            });

            assert_eq!(rows.get(), None);
            assert_eq!(renders.load(Ordering::SeqCst), 1);

            state.update(|s| s.loading = true);
            assert_eq!(rows.get(), None);
            assert_eq!(renders.load(Ordering::SeqCst), 1);

            state.update(|s| {
                s.loading = false;
                s.data = Some(vec![1, 2]);
            });
            assert_eq!(rows.get(), Some(2));
            assert_eq!(renders.load(Ordering::SeqCst), 2);

            // Same payload again, as every poll tick delivers
            state.update(|s| {
                s.loading = true;
                s.data = Some(vec![1, 2]);
            });
            state.update(|s| s.loading = false);
            assert_eq!(rows.get(), Some(2));
            assert_eq!(renders.load(Ordering::SeqCst), 2);
        });
    }
}
