//! Bracket actor hosting a manager behind an async mailbox.
//!
//! Messages are handled strictly one at a time, so event handlers never
//! interleave even when acknowledgments, match results and queries arrive
//! from different tasks.

use super::{
    config::MatchConfig,
    errors::ActorError,
    events::{BracketEvent, MatchRunner, Presentation},
    manager::BracketManager,
    messages::{BracketMessage, BracketNotification, BracketSnapshot},
    models::{Entrant, EntrantId},
};
use tokio::sync::{mpsc, oneshot};

/// Mailbox capacity for a bracket actor
const MAILBOX_CAPACITY: usize = 100;

/// Bracket actor handle for sending messages
#[derive(Debug, Clone)]
pub struct BracketHandle {
    sender: mpsc::Sender<BracketMessage>,
}

impl BracketHandle {
    /// Create a handle and the inbox it feeds
    pub fn mailbox() -> (Self, mpsc::Receiver<BracketMessage>) {
        let (sender, inbox) = mpsc::channel(MAILBOX_CAPACITY);
        (Self { sender }, inbox)
    }

    /// Send a message to the bracket
    pub async fn send(&self, message: BracketMessage) -> Result<(), ActorError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| ActorError::Closed)
    }

    /// Start the bracket
    pub async fn start(
        &self,
        entrants: Vec<Entrant>,
        config: MatchConfig,
    ) -> Result<(), ActorError> {
        let (response, rx) = oneshot::channel();
        self.send(BracketMessage::Start {
            entrants,
            config,
            response,
        })
        .await?;
        rx.await.map_err(|_| ActorError::Closed)??;
        Ok(())
    }

    pub async fn acknowledge(&self) -> Result<(), ActorError> {
        self.send(BracketMessage::Event(BracketEvent::Acknowledged))
            .await
    }

    pub async fn complete_match(&self, winner: EntrantId) -> Result<(), ActorError> {
        self.send(BracketMessage::Event(BracketEvent::MatchCompleted { winner }))
            .await
    }

    pub async fn advance(&self) -> Result<(), ActorError> {
        self.send(BracketMessage::Event(BracketEvent::AdvanceRequested))
            .await
    }

    /// Get the current bracket
    pub async fn snapshot(&self) -> Result<BracketSnapshot, ActorError> {
        let (response, rx) = oneshot::channel();
        self.send(BracketMessage::GetSnapshot { response }).await?;
        rx.await.map_err(|_| ActorError::Closed)
    }

    /// Receive a notification after every handled event
    pub async fn subscribe(&self) -> Result<mpsc::Receiver<BracketNotification>, ActorError> {
        let (sender, rx) = mpsc::channel(MAILBOX_CAPACITY);
        self.send(BracketMessage::Subscribe { sender }).await?;
        Ok(rx)
    }

    pub async fn shutdown(&self) -> Result<(), ActorError> {
        self.send(BracketMessage::Shutdown).await
    }
}

/// Bracket actor owning a single bracket manager
pub struct BracketActor<R, P> {
    manager: BracketManager<R, P>,
    inbox: mpsc::Receiver<BracketMessage>,
    subscribers: Vec<mpsc::Sender<BracketNotification>>,
}

impl<R: MatchRunner, P: Presentation> BracketActor<R, P> {
    /// Create a new bracket actor reading from `inbox`
    ///
    /// The inbox comes from [`BracketHandle::mailbox`], so collaborators
    /// that report back (such as a match runner) can hold a handle before
    /// the actor exists.
    pub fn new(manager: BracketManager<R, P>, inbox: mpsc::Receiver<BracketMessage>) -> Self {
        Self {
            manager,
            inbox,
            subscribers: Vec::new(),
        }
    }

    /// Run the bracket actor event loop.
    ///
    /// Returns once the champion is decided, on `Shutdown`, or when every
    /// handle has been dropped.
    pub async fn run(mut self) -> BracketSnapshot {
        log::info!("Bracket actor starting");

        while let Some(message) = self.inbox.recv().await {
            if !self.handle_message(message).await {
                break;
            }

            if self.manager.is_complete() {
                break;
            }
        }

        log::info!("Bracket actor stopped in phase {}", self.manager.phase());
        self.snapshot()
    }

    /// Handle a bracket message; `false` stops the actor
    async fn handle_message(&mut self, message: BracketMessage) -> bool {
        match message {
            BracketMessage::Start {
                entrants,
                config,
                response,
            } => {
                let result = self.manager.start(entrants, config);
                if result.is_ok() {
                    self.notify(BracketNotification::PhaseChanged(self.manager.phase()));
                }
                let _ = response.send(result);
            }

            BracketMessage::Event(event) => {
                let notification = match self.manager.handle(event) {
                    Ok(phase) => BracketNotification::PhaseChanged(phase),
                    Err(violation) => BracketNotification::EventRejected(violation),
                };
                self.notify(notification);

                if let Some(champion) = self
                    .manager
                    .champion()
                    .filter(|_| self.manager.is_complete())
                    .cloned()
                {
                    self.notify(BracketNotification::Completed { champion });
                }
            }

            BracketMessage::GetSnapshot { response } => {
                let _ = response.send(self.snapshot());
            }

            BracketMessage::Subscribe { sender } => {
                self.subscribers.push(sender);
            }

            BracketMessage::Shutdown => {
                log::info!("Bracket actor shutting down");
                return false;
            }
        }

        true
    }

    /// Broadcast a notification without waiting on slow subscribers
    fn notify(&mut self, notification: BracketNotification) {
        self.subscribers
            .retain(|subscriber| match subscriber.try_send(notification.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber channel full, dropping notification");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber disconnected, removing");
                    false
                }
            });
    }

    fn snapshot(&self) -> BracketSnapshot {
        BracketSnapshot {
            phase: self.manager.phase(),
            state: self.manager.snapshot(),
            history: self.manager.history().to_vec(),
        }
    }
}
