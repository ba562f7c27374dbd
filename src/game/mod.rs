//! Game session, selection, guess evaluation and the state machine.

mod controller;
mod evaluator;
mod events;
mod machine;
mod selection;
mod session;

pub use controller::GameController;
pub use evaluator::{Evaluation, GuessOutcome, evaluate, is_one_away};
pub use events::GameEvent;
pub use machine::{GameMachine, LoadResolution, LoadTicket};
pub use selection::{SELECTION_LIMIT, Selection};
pub use session::{GameStatus, MAX_LIVES, Session, WordView};
