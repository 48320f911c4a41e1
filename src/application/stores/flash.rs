//! Self-clearing success messages

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Default)]
struct FlashState {
    text: String,
    generation: u64,
    clear_task: Option<JoinHandle<()>>,
}

impl FlashState {
    fn cancel_pending(&mut self) {
        if let Some(task) = self.clear_task.take() {
            task.abort();
        }
        self.generation += 1;
    }
}

/// A message that clears itself after a fixed delay.
///
/// Setting a new message cancels the pending clear of the previous one, so
/// every message stays visible for the full delay.
pub struct FlashMessage {
    inner: Arc<Mutex<FlashState>>,
    ttl: Duration,
}

impl FlashMessage {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FlashState::default())),
            ttl,
        }
    }

    /// Current message, empty when none
    pub async fn get(&self) -> String {
        self.inner.lock().await.text.clone()
    }

    /// Show `text` and schedule it to clear after the delay
    pub async fn set(&self, text: impl Into<String>) {
        let mut state = self.inner.lock().await;
        state.cancel_pending();
        state.text = text.into();

        let generation = state.generation;
        let inner = Arc::clone(&self.inner);
        let ttl = self.ttl;
        state.clear_task = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut state = inner.lock().await;
            // A newer message may have landed while this task waited on the lock
            if state.generation == generation {
                state.text.clear();
                state.clear_task = None;
            }
        }));
    }

    /// Clear the message now and drop any pending clear
    pub async fn clear(&self) {
        let mut state = self.inner.lock().await;
        state.cancel_pending();
        state.text.clear();
    }
}

impl Drop for FlashMessage {
    fn drop(&mut self) {
        if let Ok(mut state) = self.inner.try_lock() {
            if let Some(task) = state.clear_task.take() {
                task.abort();
            }
        }
    }
}
