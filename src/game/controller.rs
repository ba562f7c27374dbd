//! Async front door to the state machine.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::{GameEvent, GameMachine, GuessOutcome, LoadResolution, Session};
use crate::GameError;
use crate::puzzle::{PuzzleProvider, WordId};

/// Shares one [`GameMachine`] between a presentation layer and provider
/// requests.
///
/// The machine lock is never held across a provider call, so a second
/// start or resign can supersede a request that is still running. Every
/// method returns a snapshot of the session after the operation.
#[derive(Clone)]
pub struct GameController {
    machine: Arc<Mutex<GameMachine>>,
    provider: Arc<dyn PuzzleProvider>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController").finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates a controller around `machine`.
    #[instrument(skip_all)]
    pub fn new(machine: GameMachine, provider: Arc<dyn PuzzleProvider>) -> Self {
        Self {
            machine: Arc::new(Mutex::new(machine)),
            provider,
        }
    }

    /// Starts a puzzle on `topic` and waits for it to load.
    #[instrument(skip(self))]
    pub async fn start_game(&self, topic: &str) -> Session {
        let ticket = self.machine.lock().await.begin_start(topic);
        self.finish(ticket).await
    }

    /// Forfeits the current puzzle and loads a new one on the same topic.
    #[instrument(skip(self))]
    pub async fn resign(&self) -> Session {
        let ticket = self.machine.lock().await.begin_resign();
        self.finish(ticket).await
    }

    async fn finish(&self, ticket: super::LoadTicket) -> Session {
        let result = self.provider.generate(ticket.topic()).await;
        let mut machine = self.machine.lock().await;
        if machine.complete_load(&ticket, result) == LoadResolution::Stale {
            debug!(generation = ticket.generation(), "Response superseded");
        }
        machine.session().clone()
    }

    /// Changes the topic for the next game; ignored mid-game.
    pub async fn set_topic(&self, topic: &str) -> Session {
        self.machine.lock().await.set_topic(topic).clone()
    }

    /// Toggles a word in the selection.
    pub async fn toggle_word(&self, id: WordId) -> Session {
        self.machine.lock().await.toggle_word(id).clone()
    }

    /// Clears the selection.
    pub async fn clear_selection(&self) -> Session {
        self.machine.lock().await.clear_selection().clone()
    }

    /// Shuffles the board.
    pub async fn shuffle(&self) -> Session {
        self.machine.lock().await.shuffle().clone()
    }

    /// Submits the current selection.
    ///
    /// # Errors
    ///
    /// See [`GameMachine::submit_guess`].
    pub async fn submit_guess(&self) -> Result<(Option<GuessOutcome>, Session), GameError> {
        let mut machine = self.machine.lock().await;
        let outcome = machine.submit_guess()?;
        Ok((outcome, machine.session().clone()))
    }

    /// Current session snapshot.
    pub async fn session(&self) -> Session {
        self.machine.lock().await.session().clone()
    }

    /// Drains pending events.
    pub async fn take_events(&self) -> Vec<GameEvent> {
        self.machine.lock().await.take_events()
    }
}
