//! Keyed Polling
//!
//! `Poller` owns one repeating fetch task per key. Changing the key tears the
//! old task down and starts a new one; a response is applied only if its key
//! is still current when it resolves. Responses for the current key are applied
//! in the order they resolve.
//!
//! Everything is single-threaded: tasks are `!Send` futures handed to a
//! `Scheduler`, and state lives in `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};

pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Spawns local tasks and provides timers (browser event loop, tokio LocalSet...)
pub trait Scheduler {
    fn spawn(&self, task: LocalFuture<()>);
    fn sleep(&self, period: Duration) -> LocalFuture<()>;
}

/// Produces the fetch future for a key
pub type Fetcher<K, T> = Rc<dyn Fn(K) -> LocalFuture<ApiResult<T>>>;

type Listener<T> = Rc<dyn Fn(&QueryState<T>)>;

/// What a polled query exposes to views
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Latest successful payload for the current key
    pub data: Option<T>,
    /// A request for the current key is in flight
    pub loading: bool,
    /// Latest failure for the current key, cleared by the next success
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// `None` fetches once per key
    pub interval: Option<Duration>,
    /// Keep the last good payload next to a failure
    pub keep_data_on_error: bool,
}

impl PollOptions {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            keep_data_on_error: true,
        }
    }

    pub fn once() -> Self {
        Self {
            interval: None,
            keep_data_on_error: true,
        }
    }

    pub fn clear_data_on_error(mut self) -> Self {
        self.keep_data_on_error = false;
        self
    }
}

struct Slot<K, T> {
    key: Option<K>,
    /// Bumped on every key change or cancel; tasks and responses carry the
    /// generation they were started under.
    generation: u64,
    in_flight: usize,
    state: QueryState<T>,
}

struct Core<K, T> {
    name: &'static str,
    slot: RefCell<Slot<K, T>>,
    scheduler: Rc<dyn Scheduler>,
    fetcher: Fetcher<K, T>,
    listener: RefCell<Option<Listener<T>>>,
    options: PollOptions,
}

pub struct Poller<K, T> {
    core: Rc<Core<K, T>>,
}

impl<K, T> Poller<K, T>
where
    K: Clone + PartialEq + Debug + 'static,
    T: Clone + 'static,
{
    pub fn new(
        name: &'static str,
        scheduler: Rc<dyn Scheduler>,
        fetcher: Fetcher<K, T>,
        options: PollOptions,
    ) -> Self {
        Self {
            core: Rc::new(Core {
                name,
                slot: RefCell::new(Slot {
                    key: None,
                    generation: 0,
                    in_flight: 0,
                    state: QueryState::default(),
                }),
                scheduler,
                fetcher,
                listener: RefCell::new(None),
                options,
            }),
        }
    }

    /// Called with a snapshot after every state change
    pub fn subscribe(&self, listener: impl Fn(&QueryState<T>) + 'static) {
        *self.core.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn key(&self) -> Option<K> {
        self.core.slot.borrow().key.clone()
    }

    pub fn state(&self) -> QueryState<T> {
        self.core.slot.borrow().state.clone()
    }

    /// Switch to `key`. Same key is a no-op; `None` stops polling.
    pub fn set_key(&self, key: Option<K>) {
        let generation = {
            let mut slot = self.core.slot.borrow_mut();
            if slot.key == key {
                return;
            }
            slot.generation += 1;
            slot.key = key.clone();
            slot.in_flight = 0;
            slot.state = QueryState::default();
            slot.generation
        };
        self.core.emit();

        match key {
            Some(key) => {
                log::debug!("[POLL] {} -> {:?} (gen {})", self.core.name, key, generation);
                Core::start(&self.core, key, generation);
            }
            None => log::debug!("[POLL] {} idle (gen {})", self.core.name, generation),
        }
    }

    /// One extra fetch for the current key, outside the schedule
    pub fn refetch(&self) {
        let (key, generation) = {
            let slot = self.core.slot.borrow();
            (slot.key.clone(), slot.generation)
        };
        if let Some(key) = key {
            let core = self.core.clone();
            self.core
                .scheduler
                .spawn(Box::pin(async move { Core::fetch_once(&core, key, generation).await }));
        }
    }

    /// Stop the current task and forget the key; in-flight responses are dropped
    pub fn cancel(&self) {
        let mut slot = self.core.slot.borrow_mut();
        slot.generation += 1;
        slot.key = None;
        slot.in_flight = 0;
        slot.state.loading = false;
    }
}

impl<K, T> Drop for Poller<K, T> {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.core.slot.try_borrow_mut() {
            slot.generation += 1;
            slot.key = None;
        }
    }
}

impl<K, T> Core<K, T>
where
    K: Clone + PartialEq + Debug + 'static,
    T: Clone + 'static,
{
    fn is_current(&self, generation: u64) -> bool {
        self.slot.borrow().generation == generation
    }

    fn emit(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            let snapshot = self.slot.borrow().state.clone();
            listener(&snapshot);
        }
    }

    /// Ticker for one generation: a fetch per tick, never waiting on the
    /// previous one, so a hung request cannot stall the schedule.
    fn start(core: &Rc<Self>, key: K, generation: u64) {
        let ticker = core.clone();
        core.scheduler.spawn(Box::pin(async move {
            loop {
                if !ticker.is_current(generation) {
                    break;
                }
                let fetch_core = ticker.clone();
                let fetch_key = key.clone();
                ticker.scheduler.spawn(Box::pin(async move {
                    Core::fetch_once(&fetch_core, fetch_key, generation).await
                }));

                let Some(period) = ticker.options.interval else {
                    break;
                };
                ticker.scheduler.sleep(period).await;
            }
            log::debug!("[POLL] {} gen {} stopped", ticker.name, generation);
        }));
    }

    async fn fetch_once(core: &Rc<Self>, key: K, generation: u64) {
        {
            let mut slot = core.slot.borrow_mut();
            if slot.generation != generation {
                return;
            }
            slot.in_flight += 1;
            slot.state.loading = true;
        }
        core.emit();

        let result = (core.fetcher)(key.clone()).await;

        {
            let mut slot = core.slot.borrow_mut();
            if slot.generation != generation {
                log::debug!("[POLL] {} dropped stale response for {:?}", core.name, key);
                return;
            }
            slot.in_flight = slot.in_flight.saturating_sub(1);
            slot.state.loading = slot.in_flight > 0;
            match result {
                Ok(data) => {
                    slot.state.data = Some(data);
                    slot.state.error = None;
                }
                Err(err) => {
                    log::warn!("[POLL] {} {:?} failed: {}", core.name, key, err);
                    if !core.options.keep_data_on_error {
                        slot.state.data = None;
                    }
                    slot.state.error = Some(err);
                }
            }
        }
        core.emit();
    }
}
