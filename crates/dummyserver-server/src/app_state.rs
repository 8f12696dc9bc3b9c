//! Shared application state: the one counter instance and its collaborators.
//!
//! Every read and mutation of the counter goes through a single
//! `tokio::sync::Mutex`. The lock queues waiters in FIFO order, so history
//! order is the order in which mutations acquire it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use dummyserver_core::error::Result;
use dummyserver_core::{ActionKind, Counter, Operation};

use crate::config::ServerConfig;
use crate::obs::{CounterEvent, EventSink, ServerMetrics};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    counter: Mutex<Counter>,
    sink: Arc<dyn EventSink>,
    metrics: ServerMetrics,
    draining: AtomicBool,
}

impl AppState {
    /// Wrap an already-initialized counter. No startup events are emitted.
    pub fn new(counter: Counter, sink: Arc<dyn EventSink>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                counter: Mutex::new(counter),
                sink,
                metrics: ServerMetrics::default(),
                draining: AtomicBool::new(false),
            }),
        }
    }

    /// Startup procedure: announce, draw (or take the configured) initial
    /// value, seed the history, announce the value.
    pub fn start(cfg: &ServerConfig, sink: Arc<dyn EventSink>) -> Result<Self> {
        sink.emit(&CounterEvent::Starting);

        let counter = match cfg.counter.initial_value {
            Some(v) => Counter::new(v),
            None => Counter::random()?,
        };
        sink.emit(&CounterEvent::Initialized {
            number: counter.value(),
        });

        Ok(Self::new(counter, sink))
    }

    pub fn emit(&self, event: CounterEvent) {
        self.inner.sink.emit(&event);
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }

    pub async fn number(&self) -> i64 {
        let number = self.inner.counter.lock().await.value();
        self.emit(CounterEvent::NumberRead { number });
        number
    }

    /// Read-compute-write-append under the lock. Both events are emitted
    /// while it is held so their order matches history order.
    pub async fn modify(&self, action: ActionKind, value: i64) -> i64 {
        let mut counter = self.inner.counter.lock().await;

        self.emit(CounterEvent::OperationReceived {
            action,
            value,
            current: counter.value(),
        });
        let new_number = counter.apply(action, value);
        self.emit(CounterEvent::NumberUpdated {
            new_number,
            action,
            value,
        });
        drop(counter);

        self.inner
            .metrics
            .operations_applied
            .inc(&[("action", action.as_str())]);
        new_number
    }

    pub async fn history(&self) -> Vec<Operation> {
        let history = self.inner.counter.lock().await.history().to_vec();
        self.emit(CounterEvent::LogReturned {
            count: history.len(),
        });
        history
    }

    /// `(value, history length)` without emitting events.
    pub async fn snapshot(&self) -> (i64, usize) {
        let counter = self.inner.counter.lock().await;
        (counter.value(), counter.history_len())
    }

    /// Flip readiness off and announce shutdown. Idempotent.
    pub fn begin_shutdown(&self) {
        if !self.inner.draining.swap(true, Ordering::Relaxed) {
            self.emit(CounterEvent::ShuttingDown);
        }
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
