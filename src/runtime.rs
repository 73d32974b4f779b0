//! Async session driver
//!
//! Wraps a [`ConversationEngine`] so the response delay runs as a tokio
//! task instead of being polled. Each accepted message spawns one delivery
//! task that sleeps for the configured delay and then completes the
//! response. The state is published on a watch channel so a front end can
//! show the typing indicator while the task is pending.
//!
//! Dropping the session aborts any pending delivery.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::core::models::{ConversationState, ConversationTurn};
use crate::core::ports::Clock;
use crate::core::services::{ConversationEngine, ConversationError, Delivery};

/// Clock that follows tokio's time source, including paused test time
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// A conversation whose responses are delivered by a background task
#[derive(Debug)]
pub struct ConversationSession {
    engine: Arc<Mutex<ConversationEngine>>,
    state: Arc<watch::Sender<ConversationState>>,
    pending: Option<JoinHandle<Option<Delivery>>>,
}

impl ConversationSession {
    /// Drive an engine; it should read time from [`TokioClock`]
    #[must_use]
    pub fn new(engine: ConversationEngine) -> Self {
        let (state, _) = watch::channel(engine.current_state());
        Self {
            engine: Arc::new(Mutex::new(engine)),
            state: Arc::new(state),
            pending: None,
        }
    }

    /// Submit a message and schedule its response
    pub async fn submit_message(&mut self, text: &str) -> Result<(), ConversationError> {
        let delay = {
            let mut engine = self.engine.lock().await;
            engine.submit_message(text)?;
            self.state.send_replace(engine.current_state());
            engine.time_until_response().unwrap_or_default()
        };

        let engine = Arc::clone(&self.engine);
        let state = Arc::clone(&self.state);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut engine = engine.lock().await;
            let delivery = engine.deliver();
            state.send_replace(engine.current_state());
            delivery
        }));
        Ok(())
    }

    /// Receiver for state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.state.subscribe()
    }

    /// Latest published state
    #[must_use]
    pub fn current_state(&self) -> ConversationState {
        *self.state.borrow()
    }

    /// Whether a response is being composed
    #[must_use]
    pub fn is_composing(&self) -> bool {
        self.current_state().is_composing()
    }

    /// Copy of the transcript so far
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.engine.lock().await.transcript().to_vec()
    }

    /// Wait until the pending response, if any, has been delivered
    pub async fn wait_for_response(&mut self) -> Option<Delivery> {
        let handle = self.pending.take()?;
        match handle.await {
            Ok(delivery) => delivery,
            Err(err) => {
                log::warn!("response task did not complete: {err}");
                None
            },
        }
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
