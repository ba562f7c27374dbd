//! Tests for the async controller and provider supersession.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mindmatch::{
    GameController, GameEvent, GameMachine, GameStatus, ProviderError, PuzzleProvider,
    RawCategory, RawPuzzle,
};
use tokio::sync::oneshot;

fn puzzle_for(topic: &str) -> RawPuzzle {
    RawPuzzle::new(
        ["A", "B", "C", "D"]
            .iter()
            .map(|c| {
                RawCategory::new(
                    format!("{} {}", topic, c),
                    String::new(),
                    (1..=4).map(|i| format!("{}{}", c.to_lowercase(), i)).collect(),
                )
            })
            .collect(),
    )
}

/// Provider whose responses are released by the test, per topic.
#[derive(Default)]
struct ScriptedProvider {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<RawPuzzle, ProviderError>>>>,
}

impl ScriptedProvider {
    fn expect(&self, topic: &str) -> oneshot::Sender<Result<RawPuzzle, ProviderError>> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("Gate lock poisoned")
            .insert(topic.to_string(), rx);
        tx
    }
}

#[async_trait]
impl PuzzleProvider for ScriptedProvider {
    async fn generate(&self, topic: &str) -> Result<RawPuzzle, ProviderError> {
        let rx = self
            .gates
            .lock()
            .expect("Gate lock poisoned")
            .remove(topic)
            .expect("Unexpected topic");
        rx.await
            .unwrap_or_else(|_| Err(ProviderError::new("Gate dropped")))
    }
}

/// Provider that always answers immediately.
struct FixedProvider;

#[async_trait]
impl PuzzleProvider for FixedProvider {
    async fn generate(&self, topic: &str) -> Result<RawPuzzle, ProviderError> {
        Ok(puzzle_for(topic))
    }
}

/// Waits until the controller has issued `generation` requests.
async fn wait_for_generation(controller: &GameController, generation: u64) {
    loop {
        let session = controller.session().await;
        if session.status() == GameStatus::Loading {
            let count = controller
                .take_events()
                .await
                .iter()
                .filter(|e| matches!(e, GameEvent::LoadStarted { generation: g, .. } if *g == generation))
                .count();
            if count > 0 {
                return;
            }
        }
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_second_start_supersedes_first() {
    let provider = Arc::new(ScriptedProvider::default());
    let history_gate = provider.expect("History");
    let science_gate = provider.expect("Science");

    let controller = GameController::new(GameMachine::with_seed("History", 4, 3), provider.clone());

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start_game("History").await })
    };
    wait_for_generation(&controller, 1).await;

    let second = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start_game("Science").await })
    };
    wait_for_generation(&controller, 2).await;

    // Science resolves first, then the stale History response arrives.
    science_gate
        .send(Ok(puzzle_for("Science")))
        .expect("Science request waiting");
    let science_session = second.await.expect("Task panicked");
    assert_eq!(science_session.status(), GameStatus::Playing);

    history_gate
        .send(Ok(puzzle_for("History")))
        .expect("History request waiting");
    first.await.expect("Task panicked");

    let session = controller.session().await;
    assert_eq!(session.topic(), "Science");
    assert_eq!(session.status(), GameStatus::Playing);
    assert!(
        session
            .active_words()
            .iter()
            .all(|w| w.category_name().starts_with("Science"))
    );
    assert!(
        controller
            .take_events()
            .await
            .contains(&GameEvent::StaleResponseDiscarded { generation: 1 })
    );
}

#[tokio::test]
async fn test_stale_failure_while_newer_request_pending() {
    let provider = Arc::new(ScriptedProvider::default());
    let history_gate = provider.expect("History");
    let science_gate = provider.expect("Science");

    let controller = GameController::new(GameMachine::with_seed("History", 4, 3), provider.clone());

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start_game("History").await })
    };
    wait_for_generation(&controller, 1).await;
    let second = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start_game("Science").await })
    };
    wait_for_generation(&controller, 2).await;

    // The superseded request fails while the newer one is still loading.
    history_gate
        .send(Err(ProviderError::new("timed out")))
        .expect("History request waiting");
    let stale = first.await.expect("Task panicked");
    assert_eq!(stale.status(), GameStatus::Loading);
    assert!(stale.last_error().is_none());

    science_gate
        .send(Ok(puzzle_for("Science")))
        .expect("Science request waiting");
    let session = second.await.expect("Task panicked");
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.topic(), "Science");
}

#[tokio::test]
async fn test_full_game_through_controller() {
    let controller = GameController::new(GameMachine::with_seed("Pop Culture", 4, 8), Arc::new(FixedProvider));
    let session = controller.start_game("Pop Culture").await;
    assert_eq!(session.status(), GameStatus::Playing);

    for letter in ["a", "b", "c", "d"] {
        let session = controller.session().await;
        let ids: Vec<_> = session
            .active_words()
            .iter()
            .filter(|w| w.text().starts_with(letter))
            .map(|w| *w.id())
            .collect();
        for id in ids {
            controller.toggle_word(id).await;
        }
        let (outcome, _) = controller.submit_guess().await.expect("Valid guess");
        assert!(outcome.expect("Guess submitted").is_correct());
    }

    let session = controller.session().await;
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.solved_categories().len(), 4);
}

#[tokio::test]
async fn test_resign_through_controller() {
    let controller = GameController::new(GameMachine::with_seed("History", 2, 8), Arc::new(FixedProvider));
    controller.start_game("History").await;

    let session = controller.session().await;
    let mixed: Vec<_> = ["a1", "b1", "c1", "d1"]
        .iter()
        .filter_map(|t| session.active_words().iter().find(|w| w.text() == t))
        .map(|w| *w.id())
        .collect();
    for id in mixed {
        controller.toggle_word(id).await;
    }
    let (_, session) = controller.submit_guess().await.expect("Valid guess");
    assert_eq!(session.lives(), 1);

    let session = controller.resign().await;
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.lives(), 2);
    assert_eq!(session.topic(), "History");
}
