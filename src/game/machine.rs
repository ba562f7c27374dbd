//! The game state machine.
//!
//! ```text
//! idle ──start──▶ loading ──ok──▶ playing ──solve all──▶ won
//!  ▲                 │                │
//!  └─────failure─────┘                └──out of lives──▶ lost
//! ```
//!
//! `won`, `lost`, `idle` and `playing` (via resign) all re-enter `loading`
//! through [`GameMachine::begin_start`]. A start issued while a request is
//! in flight supersedes it: every request carries a generation tag and
//! only the newest one may commit.

use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use super::{GameEvent, GameStatus, GuessOutcome, MAX_LIVES, Session, evaluate};
use crate::puzzle::{PuzzleProvider, RawPuzzle, WordId, roster, shuffle_words, validate};
use crate::{GameConfig, GameError, ProviderError};

/// Handle for one in-flight provider request.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LoadTicket {
    generation: u64,
    topic: String,
}

/// What happened to a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResolution {
    /// The puzzle is on the board.
    Loaded,
    /// The session went back to `idle` with an error message.
    Failed(GameError),
    /// The request had been superseded; nothing changed.
    Stale,
}

/// Owns the session and applies every transition to it.
///
/// Transitions append [`GameEvent`]s to an internal queue that only
/// [`GameMachine::take_events`] empties; callers driving the machine
/// directly must drain it.
#[derive(Debug)]
pub struct GameMachine {
    session: Session,
    generation: u64,
    in_flight: Option<u64>,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameMachine {
    /// Creates an idle machine with an entropy-seeded shuffle source.
    #[instrument(skip(default_topic))]
    pub fn new(default_topic: impl Into<String>, max_lives: u8) -> Self {
        Self::with_rng(default_topic, max_lives, StdRng::from_entropy())
    }

    /// Creates an idle machine with a reproducible shuffle source.
    #[instrument(skip(default_topic))]
    pub fn with_seed(default_topic: impl Into<String>, max_lives: u8, seed: u64) -> Self {
        Self::with_rng(default_topic, max_lives, StdRng::seed_from_u64(seed))
    }

    /// Creates an idle machine using `rng` for every shuffle.
    pub fn with_rng(default_topic: impl Into<String>, max_lives: u8, rng: StdRng) -> Self {
        Self {
            session: Session::new(default_topic, max_lives),
            generation: 0,
            in_flight: None,
            rng,
            events: Vec::new(),
        }
    }

    /// Creates an idle machine from configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig, seed: Option<u64>) -> Self {
        let topic = config.default_topic().clone();
        let lives = *config.max_lives();
        match seed {
            Some(seed) => Self::with_seed(topic, lives, seed),
            None => Self::new(topic, lives),
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Generation tag of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true while a provider request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Changes the topic used by the next start or resign.
    ///
    /// Only honored between games (`idle`, `won`, `lost`). While a puzzle
    /// is loading or on the board the topic stays tied to it, so resign
    /// reloads the forfeited topic.
    #[instrument(skip(self, topic))]
    pub fn set_topic(&mut self, topic: impl Into<String>) -> &Session {
        let topic = topic.into();
        let between_games = matches!(
            self.session.status,
            GameStatus::Idle | GameStatus::Won | GameStatus::Lost
        );
        if !between_games || topic.trim().is_empty() {
            debug!("Topic change ignored");
            return &self.session;
        }
        self.session.topic = topic.trim().to_string();
        &self.session
    }

    /// Resets the session for `topic` and issues a new request.
    ///
    /// A blank topic keeps the current one. Any request already in flight
    /// is superseded and its response will be discarded.
    #[instrument(skip(self), fields(previous = ?self.in_flight))]
    pub fn begin_start(&mut self, topic: &str) -> LoadTicket {
        let topic = match topic.trim() {
            "" => self.session.topic.clone(),
            trimmed => trimmed.to_string(),
        };

        if let Some(previous) = self.in_flight {
            debug!(previous, "Superseding in-flight request");
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.session.reset_for_load(topic.clone());

        info!(generation = self.generation, topic = %topic, "Load started");
        self.events.push(GameEvent::LoadStarted {
            topic: topic.clone(),
            generation: self.generation,
        });

        LoadTicket {
            generation: self.generation,
            topic,
        }
    }

    /// Forfeits the current puzzle and requests a new one on the same topic.
    #[instrument(skip(self))]
    pub fn begin_resign(&mut self) -> LoadTicket {
        let topic = self.session.topic.clone();
        info!(topic = %topic, status = %self.session.status, "Resigning");
        self.begin_start(&topic)
    }

    /// Applies a provider response.
    ///
    /// Responses for superseded tickets leave the session untouched.
    #[instrument(skip(self, ticket, result), fields(generation = ticket.generation, current = self.generation))]
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<RawPuzzle, ProviderError>,
    ) -> LoadResolution {
        if self.in_flight != Some(ticket.generation) {
            debug!("Discarding stale provider response");
            self.events.push(GameEvent::StaleResponseDiscarded {
                generation: ticket.generation,
            });
            return LoadResolution::Stale;
        }
        self.in_flight = None;

        let assembled = result.map_err(GameError::from).and_then(|raw| {
            let puzzle = validate(&raw)?;
            let words = roster(&puzzle, &mut self.rng);
            Ok((puzzle, words))
        });

        match assembled {
            Ok((puzzle, words)) => {
                self.session.active_words = words;
                self.session.puzzle = Some(puzzle);
                self.session.status = GameStatus::Playing;
                info!(topic = %self.session.topic, "Puzzle loaded");
                self.events.push(GameEvent::PuzzleLoaded {
                    topic: self.session.topic.clone(),
                });
                LoadResolution::Loaded
            }
            Err(e) => {
                warn!(error = %e, "Puzzle load failed");
                let message = e.user_message().to_string();
                self.session.status = GameStatus::Idle;
                self.session.last_error = Some(message.clone());
                self.events.push(GameEvent::LoadFailed { message });
                LoadResolution::Failed(e)
            }
        }
    }

    /// Starts a new puzzle and waits for the provider.
    #[instrument(skip(self, provider))]
    pub async fn start_game(&mut self, provider: &dyn PuzzleProvider, topic: &str) -> &Session {
        let ticket = self.begin_start(topic);
        let result = provider.generate(ticket.topic()).await;
        self.complete_load(&ticket, result);
        &self.session
    }

    /// Resigns and waits for the replacement puzzle.
    #[instrument(skip(self, provider))]
    pub async fn resign(&mut self, provider: &dyn PuzzleProvider) -> &Session {
        let ticket = self.begin_resign();
        let result = provider.generate(ticket.topic()).await;
        self.complete_load(&ticket, result);
        &self.session
    }

    /// Adds or removes a word from the selection.
    ///
    /// Ignored outside `playing` and for words not on the board.
    #[instrument(skip(self), fields(id = %id))]
    pub fn toggle_word(&mut self, id: WordId) -> &Session {
        if !self.is_playing() {
            return &self.session;
        }
        if self.session.word(id).is_none() {
            debug!("Toggle for word not on the board ignored");
            return &self.session;
        }
        self.session.selection.toggle(id);
        &self.session
    }

    /// Deselects every word.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) -> &Session {
        if self.is_playing() {
            self.session.selection.clear();
        }
        &self.session
    }

    /// Reorders the board.
    #[instrument(skip(self))]
    pub fn shuffle(&mut self) -> &Session {
        if self.is_playing() {
            shuffle_words(&mut self.session.active_words, &mut self.rng);
        }
        &self.session
    }

    /// Submits the current selection as a guess.
    ///
    /// Returns `Ok(None)` without changing anything unless the game is
    /// `playing` with exactly four words selected.
    ///
    /// # Errors
    ///
    /// Propagates evaluator errors; the session is unchanged when one
    /// occurs.
    #[instrument(skip(self), fields(selected = self.session.selection.len(), lives = self.session.lives))]
    pub fn submit_guess(&mut self) -> Result<Option<GuessOutcome>, GameError> {
        if !self.is_playing() || !self.session.selection.is_full() {
            debug!("Guess not ready, ignoring submit");
            return Ok(None);
        }

        let selected = self.session.selection.ids().to_vec();
        let evaluation = evaluate(&self.session, &selected)?;
        self.session = evaluation.next;

        match &evaluation.outcome {
            GuessOutcome::Correct { category } => {
                self.events.push(GameEvent::CategorySolved {
                    name: category.name().clone(),
                });
            }
            GuessOutcome::Incorrect {
                one_away,
                lives_left,
            } => {
                if *one_away {
                    self.events.push(GameEvent::OneAway);
                }
                self.events.push(GameEvent::Mistake {
                    lives_left: *lives_left,
                });
            }
        }

        match self.session.status {
            GameStatus::Won => {
                info!(topic = %self.session.topic, "Game won");
                self.events.push(GameEvent::Won);
            }
            GameStatus::Lost => {
                info!(topic = %self.session.topic, "Game lost");
                self.events.push(GameEvent::Lost);
            }
            _ => {}
        }

        Ok(Some(evaluation.outcome))
    }

    fn is_playing(&self) -> bool {
        if self.session.status == GameStatus::Playing {
            true
        } else {
            debug!(status = %self.session.status, "Not playing, ignoring");
            false
        }
    }
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOPICS[0], MAX_LIVES)
    }
}
