use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{watch, Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::application::{
    CompletionClient, ConfirmationPrompt, MessageStorage, MessageStore, DAILY_SUMMARY_SENTINEL,
};
use crate::domain::Message;

pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear the conversation history?";

/// Result of a single call to [`ConversationController::handle_send_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input; nothing was appended and no request was made.
    Ignored,
    /// The provider answered; carries the appended model message.
    Replied(Message),
    /// The request failed; carries the appended error-flagged message.
    Failed(Message),
}

impl SendOutcome {
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SendOutcome::Ignored => None,
            SendOutcome::Replied(msg) | SendOutcome::Failed(msg) => Some(msg),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, SendOutcome::Ignored)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SendOutcome::Failed(_))
    }
}

/// Drives the turn-taking protocol between the user, the message log, and
/// the completion provider.
///
/// Sends are queued: a turn lock is held from the user append until the
/// model (or error) append, so every user message is immediately followed by
/// its own reply. Callers waiting in the queue already count as loading.
/// A send dropped after its user message was logged still gets the apology.
pub struct ConversationController {
    store: Arc<Mutex<MessageStore>>,
    client: CompletionClient,
    turn_lock: Arc<Mutex<()>>,
    pending: StdMutex<usize>,
    loading: watch::Sender<bool>,
}

impl ConversationController {
    pub fn new(store: MessageStore, client: CompletionClient) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            store: Arc::new(Mutex::new(store)),
            client,
            turn_lock: Arc::new(Mutex::new(())),
            pending: StdMutex::new(0),
            loading,
        }
    }

    /// Revives the log from `storage` and wraps it in a controller.
    pub async fn open(storage: Arc<dyn MessageStorage>, client: CompletionClient) -> Self {
        Self::new(MessageStore::open(storage).await, client)
    }

    pub async fn handle_send_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring blank message");
            return SendOutcome::Ignored;
        }

        // Raised before the first await so the input affordance disables at once.
        let _loading = LoadingGuard::enter(&self.pending, &self.loading);
        let turn = self.turn_lock.clone().lock_owned().await;

        let (history, unanswered) = {
            let mut store = self.store.lock().await;
            let history = store.messages().to_vec();
            let user = Message::user(text);
            let unanswered = UnansweredTurn::new(&self.store, turn, user.id());
            store.append(user).await;
            (history, unanswered)
        };

        let outcome = match self.client.complete(&history, text).await {
            Ok(reply) => SendOutcome::Replied(Message::model(reply)),
            Err(e) => {
                warn!("Completion request failed: {}", e);
                SendOutcome::Failed(Message::error())
            }
        };

        if let Some(reply) = outcome.reply() {
            self.store.lock().await.append(reply.clone()).await;
        }
        unanswered.answered();

        outcome
    }

    /// Sends the daily-summary control marker through the regular pipeline.
    pub async fn trigger_daily_summary(&self) -> SendOutcome {
        info!("Triggering daily summary");
        self.handle_send_message(DAILY_SUMMARY_SENTINEL).await
    }

    /// Replaces the log with a fresh welcome message once the user confirms.
    ///
    /// Returns whether the conversation was cleared.
    pub async fn clear_conversation(&self, prompt: &dyn ConfirmationPrompt) -> bool {
        if !prompt.confirm(CLEAR_CONFIRMATION) {
            debug!("Clear conversation cancelled");
            return false;
        }

        let _turn = self.turn_lock.lock().await;
        self.store.lock().await.reset(Message::welcome()).await;
        info!("Conversation history cleared");
        true
    }

    /// Snapshot of the current log.
    pub async fn messages(&self) -> Vec<Message> {
        self.store.lock().await.messages().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}

/// Keeps the loading flag raised while at least one send is pending.
struct LoadingGuard<'a> {
    pending: &'a StdMutex<usize>,
    loading: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn enter(pending: &'a StdMutex<usize>, loading: &'a watch::Sender<bool>) -> Self {
        let mut count = pending.lock().unwrap_or_else(|e| e.into_inner());
        *count += 1;
        loading.send_replace(true);
        drop(count);
        Self { pending, loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut count = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.loading.send_replace(false);
        }
    }
}

/// Holds the turn from the user append until the reply is logged.
///
/// Dropped unanswered, it hands the turn to a task that appends the apology,
/// so the log never ends on a user message left without a reply.
struct UnansweredTurn {
    store: Arc<Mutex<MessageStore>>,
    turn: Option<OwnedMutexGuard<()>>,
    user_id: String,
}

impl UnansweredTurn {
    fn new(store: &Arc<Mutex<MessageStore>>, turn: OwnedMutexGuard<()>, user_id: &str) -> Self {
        Self {
            store: store.clone(),
            turn: Some(turn),
            user_id: user_id.to_string(),
        }
    }

    fn answered(mut self) {
        self.turn.take();
    }
}

impl Drop for UnansweredTurn {
    fn drop(&mut self) {
        let Some(turn) = self.turn.take() else {
            return;
        };
        let store = self.store.clone();
        let user_id = std::mem::take(&mut self.user_id);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("Send abandoned outside a runtime; reply not recorded");
            return;
        };
        runtime.spawn(async move {
            let _turn = turn;
            let mut store = store.lock().await;
            if store.last().map(Message::id) == Some(user_id.as_str()) {
                warn!("Send abandoned before a reply arrived; logging the apology");
                store.append(Message::error()).await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_nests() {
        let pending = StdMutex::new(0);
        let (loading, rx) = watch::channel(false);

        let outer = LoadingGuard::enter(&pending, &loading);
        let inner = LoadingGuard::enter(&pending, &loading);
        assert!(*rx.borrow());

        drop(inner);
        assert!(*rx.borrow());

        drop(outer);
        assert!(!*rx.borrow());
    }

    #[test]
    fn test_send_outcome_accessors() {
        assert!(SendOutcome::Ignored.reply().is_none());
        assert!(SendOutcome::Ignored.is_ignored());

        let failed = SendOutcome::Failed(Message::error());
        assert!(failed.is_failed());
        assert!(failed.reply().unwrap().is_error());
    }
}
