//! Table actor implementation with async message handling.

use super::{
    config::TableConfig,
    messages::{StateChangeNotification, TableError, TableMessage},
};
use crate::game::{
    ActionError, GameEngine, SubscriptionId,
    entities::{Command, GameState, Player, PlayerId},
};
use crate::table::config::GameConfig;
use std::collections::HashMap;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
}

impl TableHandle {
    /// Create a new table handle
    pub fn new(sender: mpsc::Sender<TableMessage>) -> Self {
        Self { sender }
    }

    /// Send a message to the table
    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, TableError> {
        let (response, receiver) = oneshot::channel();
        self.send(message(response)).await?;
        receiver.await.map_err(|_| TableError::Closed)
    }

    /// Start a new game with the given configuration
    pub async fn start_game(&self, config: GameConfig) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::StartGame { config, response })
            .await??)
    }

    /// Submit a command on behalf of `player`
    pub async fn submit(&self, player: PlayerId, command: Command) -> Result<(), TableError> {
        Ok(self
            .request(|response| TableMessage::Command {
                player,
                command,
                response,
            })
            .await??)
    }

    pub async fn state(&self) -> Result<GameState, TableError> {
        self.request(|response| TableMessage::GetState { response })
            .await
    }

    pub async fn player(&self, player: PlayerId) -> Result<Option<Player>, TableError> {
        self.request(|response| TableMessage::GetPlayer { player, response })
            .await
    }

    pub async fn is_active(&self) -> Result<bool, TableError> {
        self.request(|response| TableMessage::IsActive { response })
            .await
    }

    /// Subscribe to state changes
    ///
    /// # Arguments
    ///
    /// * `subscriber_id` - Caller-chosen id, replaces an earlier subscription
    ///   with the same id
    /// * `capacity` - Notifications buffered before new ones are dropped
    pub async fn subscribe(
        &self,
        subscriber_id: u64,
        capacity: usize,
    ) -> Result<mpsc::Receiver<StateChangeNotification>, TableError> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        self.send(TableMessage::Subscribe {
            subscriber_id,
            sender,
        })
        .await?;
        Ok(receiver)
    }

    pub async fn unsubscribe(&self, subscriber_id: u64) -> Result<(), TableError> {
        self.send(TableMessage::Unsubscribe { subscriber_id }).await
    }

    /// Stop the table. Pending bot turns are cancelled.
    pub async fn close(&self) -> Result<(), TableError> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// Table actor owning one game engine
pub struct TableActor {
    /// Table configuration
    config: TableConfig,

    /// Game state machine
    engine: GameEngine,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    /// Lets delayed bot turns post back without keeping the table alive
    outbox: mpsc::WeakSender<TableMessage>,

    /// Bot turn sleeping through its thinking time
    pending_turn: Option<JoinHandle<()>>,

    /// Subscribers for state change notifications
    subscribers: HashMap<u64, (SubscriptionId, mpsc::Sender<StateChangeNotification>)>,

    /// Is table closed
    is_closed: bool,
}

impl TableActor {
    /// Create a new table actor
    ///
    /// # Returns
    ///
    /// * `(TableActor, TableHandle)` - Actor and handle for sending messages
    pub fn new(config: TableConfig, engine: GameEngine) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));

        let actor = Self {
            outbox: sender.downgrade(),
            config,
            engine,
            inbox,
            pending_turn: None,
            subscribers: HashMap::new(),
            is_closed: false,
        };

        (actor, TableHandle::new(sender))
    }

    /// Run the table actor event loop
    ///
    /// Ends on [`TableMessage::Close`] or once every handle is dropped.
    pub async fn run(mut self) {
        log::info!(
            "Table starting (think time {}-{}ms)",
            self.config.think_time_min_ms,
            self.config.think_time_max_ms
        );

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            self.prune_subscribers();

            if self.is_closed {
                break;
            }
            self.schedule_bot_turn();
        }

        self.cancel_bot_turn();
        log::info!("Table closed");
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::StartGame { config, response } => {
                self.cancel_bot_turn();
                let result = self.engine.start_game(&config);
                let _ = response.send(result);
            }

            TableMessage::Command {
                player,
                command,
                response,
            } => {
                if command == Command::NewGame {
                    self.cancel_bot_turn();
                }
                let result = self.engine.handle_for(&player, command);
                let _ = response.send(result);
            }

            TableMessage::GetState { response } => {
                let _ = response.send(self.engine.state().clone());
            }

            TableMessage::GetPlayer { player, response } => {
                let _ = response.send(self.engine.player(&player).cloned());
            }

            TableMessage::IsActive { response } => {
                let _ = response.send(self.engine.is_active());
            }

            TableMessage::Subscribe {
                subscriber_id,
                sender,
            } => {
                self.add_subscriber(subscriber_id, sender);
            }

            TableMessage::Unsubscribe { subscriber_id } => {
                if let Some((id, _)) = self.subscribers.remove(&subscriber_id) {
                    self.engine.unsubscribe(id);
                    log::debug!("Subscriber {subscriber_id} unsubscribed");
                }
            }

            TableMessage::BotTurn(turn) => {
                self.pending_turn = None;
                match self.engine.run_scheduled_turn(turn) {
                    Ok(_) | Err(ActionError::StaleTurn) => {}
                    Err(e) => log::error!("Bot turn failed: {e}"),
                }
            }

            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    /// Forward every committed state change to `sender`
    fn add_subscriber(&mut self, subscriber_id: u64, sender: mpsc::Sender<StateChangeNotification>) {
        let channel = sender.clone();
        let id = self.engine.subscribe(move |state: &GameState| {
            let notification = StateChangeNotification::StateChanged(Box::new(state.clone()));
            match channel.try_send(notification) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "Subscriber {subscriber_id} channel full, dropping notification"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {subscriber_id} disconnected");
                }
            }
        });

        if let Some((previous, _)) = self.subscribers.insert(subscriber_id, (id, sender)) {
            self.engine.unsubscribe(previous);
        }
        log::debug!("Subscriber {subscriber_id} subscribed to state changes");
    }

    /// Drop subscribers whose receiving end is gone
    fn prune_subscribers(&mut self) {
        let engine = &mut self.engine;
        self.subscribers.retain(|subscriber_id, (id, sender)| {
            if sender.is_closed() {
                log::debug!("Subscriber {subscriber_id} disconnected, removing");
                engine.unsubscribe(*id);
                false
            } else {
                true
            }
        });
    }

    /// Start the thinking time of the bot the engine wants to act next
    fn schedule_bot_turn(&mut self) {
        let Some(turn) = self.engine.take_scheduled_turn() else {
            return;
        };
        self.cancel_bot_turn();

        let delay = self.config.think_delay(&mut rand::rng());
        let outbox = self.outbox.clone();
        log::debug!("{} thinks for {}ms", turn.player, delay.as_millis());

        self.pending_turn = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sender) = outbox.upgrade() {
                let _ = sender.send(TableMessage::BotTurn(turn)).await;
            }
        }));
    }

    fn cancel_bot_turn(&mut self) {
        if let Some(pending) = self.pending_turn.take() {
            pending.abort();
        }
    }
}
