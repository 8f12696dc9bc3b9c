//! Counter service events and the sink they are emitted into.
//!
//! The service never waits on, or reacts to, the outcome of emitting an
//! event: `EventSink::emit` has no return value.

use dummyserver_core::ActionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    Starting,
    Initialized { number: i64 },
    RootCalled,
    NumberRead { number: i64 },
    /// Emitted before the mutation, with the value it is about to change.
    OperationReceived { action: ActionKind, value: i64, current: i64 },
    /// Emitted after the mutation.
    NumberUpdated { new_number: i64, action: ActionKind, value: i64 },
    LogReturned { count: usize },
    ShuttingDown,
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &CounterEvent);
}

/// Default sink: one `tracing` record per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &CounterEvent) {
        match *event {
            CounterEvent::Starting => tracing::info!("server starting up"),
            CounterEvent::Initialized { number } => {
                tracing::info!(number, "initialized number")
            }
            CounterEvent::RootCalled => tracing::info!("root endpoint called"),
            CounterEvent::NumberRead { number } => {
                tracing::info!(number, "getting current number")
            }
            CounterEvent::OperationReceived { action, value, current } => {
                tracing::info!(action = %action, value, current, "received operation")
            }
            CounterEvent::NumberUpdated { new_number, action, value } => {
                tracing::info!(new_number, operation = %action, value, "number updated")
            }
            CounterEvent::LogReturned { count } => {
                tracing::info!(count, "returning operation log")
            }
            CounterEvent::ShuttingDown => tracing::info!("server shutting down"),
        }
    }
}
