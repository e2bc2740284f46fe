use tokio::sync::watch;

use crate::entity::UiState;

/// Observable widget state. The controller writes, renderers subscribe.
#[derive(Debug)]
pub struct SwapStore {
    sender: watch::Sender<UiState>,
}

impl SwapStore {
    pub fn new(initial: UiState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn snapshot(&self) -> UiState {
        self.sender.borrow().clone()
    }

    /// Applies `f` and notifies subscribers only when it reports a change.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut UiState) -> bool,
    {
        self.sender.send_if_modified(f)
    }

    /// Applies `f` and always notifies subscribers.
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut UiState),
    {
        self.sender.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.sender.subscribe()
    }
}

impl Default for SwapStore {
    fn default() -> Self {
        Self::new(UiState::default())
    }
}
